use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::scoring::domain::code_scorer::{CodeScorer, ScoringError};
use crate::scoring::domain::vocabulary::ScoringVocabulary;

#[derive(Error, Debug)]
pub enum VocabularyFileError {
    #[error("failed to read vocabulary {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid vocabulary JSON in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Scoring(#[from] ScoringError),
}

/// Load a scoring table from JSON. Fields left out keep their defaults.
pub fn load(path: &Path) -> Result<ScoringVocabulary, VocabularyFileError> {
    let json = fs::read_to_string(path).map_err(|e| VocabularyFileError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_json::from_str(&json).map_err(|e| VocabularyFileError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Build a scorer from an optional table path, falling back to the built-in vocabulary.
pub fn scorer_from(path: Option<&Path>) -> Result<CodeScorer, VocabularyFileError> {
    let vocabulary = match path {
        Some(p) => {
            log::info!("Loading scoring vocabulary from {}", p.display());
            load(p)?
        }
        None => ScoringVocabulary::default(),
    };
    Ok(CodeScorer::new(vocabulary)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_partial_table() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("vocab.json");
        fs::write(&path, r#"{"keywords": ["fn", "match"], "narration_penalty": 0.5}"#).unwrap();

        let vocab = load(&path).unwrap();
        assert_eq!(vocab.keywords, vec!["fn".to_string(), "match".to_string()]);
        assert_eq!(vocab.narration_penalty, 0.5);
        assert_eq!(vocab.symbol_weight, 0.8);
    }

    #[test]
    fn test_load_missing_file() {
        let tmp = TempDir::new().unwrap();
        let err = load(&tmp.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, VocabularyFileError::Read { .. }));
    }

    #[test]
    fn test_load_bad_json() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("vocab.json");
        fs::write(&path, "[1, 2").unwrap();
        assert!(matches!(
            load(&path).unwrap_err(),
            VocabularyFileError::Parse { .. }
        ));
    }

    #[test]
    fn test_scorer_from_none_uses_defaults() {
        let scorer = scorer_from(None).unwrap();
        assert_eq!(scorer.vocabulary(), &ScoringVocabulary::default());
    }

    #[test]
    fn test_scorer_from_invalid_table_is_scoring_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("vocab.json");
        fs::write(&path, r#"{"keyword_weight": -1.0}"#).unwrap();
        assert!(matches!(
            scorer_from(Some(&path)),
            Err(VocabularyFileError::Scoring(_))
        ));
    }
}
