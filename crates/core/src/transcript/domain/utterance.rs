use serde::{Deserialize, Serialize};

/// One timestamped unit of caption or speech text.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Utterance {
    #[serde(default)]
    pub text: String,
    pub start: f64,
    pub end: f64,
}

impl Utterance {
    pub fn new(text: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            text: text.into(),
            start,
            end,
        }
    }
}

/// Drops utterances that start before `offset_sec`.
///
/// Used to skip intros before planning; an offset of zero keeps everything.
pub fn skip_leading(utterances: Vec<Utterance>, offset_sec: f64) -> Vec<Utterance> {
    if offset_sec <= 0.0 {
        return utterances;
    }
    utterances
        .into_iter()
        .filter(|u| u.start >= offset_sec)
        .collect()
}
