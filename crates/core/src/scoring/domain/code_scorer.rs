use std::collections::HashSet;

use regex::Regex;
use thiserror::Error;

use super::vocabulary::ScoringVocabulary;

#[derive(Error, Debug)]
pub enum ScoringError {
    #[error("invalid scoring vocabulary: {0}")]
    InvalidVocabulary(String),
    #[error("failed to build keyword pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Scores a single utterance's text for how likely it is to be code talk.
///
/// The score only depends on the text: keyword hits and symbol density,
/// with a penalty for spoken complexity analysis.
pub struct CodeScorer {
    vocabulary: ScoringVocabulary,
    keyword_pattern: Option<Regex>,
    symbols: HashSet<char>,
    narration_phrases: Vec<String>,
}

impl CodeScorer {
    pub fn new(vocabulary: ScoringVocabulary) -> Result<Self, ScoringError> {
        validate(&vocabulary)?;

        let keyword_pattern = if vocabulary.keywords.is_empty() {
            None
        } else {
            let alternatives: Vec<String> =
                vocabulary.keywords.iter().map(|k| regex::escape(k)).collect();
            Some(Regex::new(&format!(
                r"(?i)\b(?:{})\b",
                alternatives.join("|")
            ))?)
        };

        let symbols = vocabulary.symbols.chars().collect();
        let narration_phrases = vocabulary
            .narration_phrases
            .iter()
            .map(|p| p.to_lowercase())
            .collect();

        Ok(Self {
            vocabulary,
            keyword_pattern,
            symbols,
            narration_phrases,
        })
    }

    pub fn vocabulary(&self) -> &ScoringVocabulary {
        &self.vocabulary
    }

    /// Code-likelihood in `[0, 1]`.
    pub fn score(&self, text: &str) -> f64 {
        if text.is_empty() {
            return 0.0;
        }

        let kw = self.keyword_hits(text) as f64;
        let sym_ratio = self.symbol_ratio(text);
        let mut score = (self.vocabulary.keyword_weight * kw
            + self.vocabulary.symbol_weight * sym_ratio)
            .min(1.0);

        if self.is_narration(text) {
            score *= self.vocabulary.narration_penalty;
        }
        score
    }

    /// Case-insensitive whole-word keyword matches.
    pub fn keyword_hits(&self, text: &str) -> usize {
        self.keyword_pattern
            .as_ref()
            .map_or(0, |re| re.find_iter(text).count())
    }

    /// Share of characters (not bytes) that belong to the symbol set.
    pub fn symbol_ratio(&self, text: &str) -> f64 {
        let (total, symbolic) = text.chars().fold((0usize, 0usize), |(total, sym), ch| {
            (total + 1, sym + usize::from(self.symbols.contains(&ch)))
        });
        symbolic as f64 / total.max(1) as f64
    }

    fn is_narration(&self, text: &str) -> bool {
        if self.narration_phrases.is_empty() {
            return false;
        }
        let lower = text.to_lowercase();
        self.narration_phrases.iter().any(|p| lower.contains(p.as_str()))
    }
}

fn validate(vocabulary: &ScoringVocabulary) -> Result<(), ScoringError> {
    let weights = [
        ("keyword_weight", vocabulary.keyword_weight),
        ("symbol_weight", vocabulary.symbol_weight),
    ];
    for (name, value) in weights {
        if !value.is_finite() || value < 0.0 {
            return Err(ScoringError::InvalidVocabulary(format!(
                "{name} must be a non-negative number, got {value}"
            )));
        }
    }
    if !(0.0..=1.0).contains(&vocabulary.narration_penalty) {
        return Err(ScoringError::InvalidVocabulary(format!(
            "narration_penalty must be between 0.0 and 1.0, got {}",
            vocabulary.narration_penalty
        )));
    }
    if let Some(blank) = vocabulary.keywords.iter().find(|k| k.trim().is_empty()) {
        return Err(ScoringError::InvalidVocabulary(format!(
            "keywords must not be blank, got {blank:?}"
        )));
    }
    Ok(())
}
