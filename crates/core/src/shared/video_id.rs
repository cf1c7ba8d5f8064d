use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
#[error("invalid video id {0:?}: expected a single directory name")]
pub struct InvalidVideoId(pub String);

/// Video ids name a directory directly under the work directory, so they
/// must not be empty, `.`/`..`, or contain a path separator.
pub fn check_video_id(video_id: &str) -> Result<&str, InvalidVideoId> {
    let invalid = video_id.is_empty()
        || video_id == "."
        || video_id == ".."
        || video_id.contains(['/', '\\', '\0']);
    if invalid {
        Err(InvalidVideoId(video_id.to_string()))
    } else {
        Ok(video_id)
    }
}
