use serde::{Deserialize, Serialize};

pub const DEFAULT_KEYWORDS: &[&str] = &[
    "def", "class", "return", "for", "while", "if", "else", "elif", "try", "except", "lambda",
    "import", "from", "with", "yield", "static", "public", "void", "int", "long", "bool", "queue",
    "stack", "heap", "graph", "dp",
];

/// Characters that show up when code is read aloud or captions render it literally.
pub const DEFAULT_SYMBOLS: &str = "()[]{}:=;,.<>_+-/*|&%!`";

/// Spoken complexity analysis shares vocabulary with code but is not code on screen.
pub const DEFAULT_NARRATION_PHRASES: &[&str] = &["time complexity", "space complexity"];

pub const DEFAULT_KEYWORD_WEIGHT: f64 = 0.2;
pub const DEFAULT_SYMBOL_WEIGHT: f64 = 0.8;
pub const DEFAULT_NARRATION_PENALTY: f64 = 0.6;

/// Tunable lexical tables and weights for the code-likelihood heuristic.
///
/// Kept as data so a JSON table can retune scoring without touching the
/// planner. Missing fields fall back to the built-in defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringVocabulary {
    pub keywords: Vec<String>,
    pub symbols: String,
    pub narration_phrases: Vec<String>,
    pub keyword_weight: f64,
    pub symbol_weight: f64,
    pub narration_penalty: f64,
}

impl Default for ScoringVocabulary {
    fn default() -> Self {
        Self {
            keywords: DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            symbols: DEFAULT_SYMBOLS.to_string(),
            narration_phrases: DEFAULT_NARRATION_PHRASES
                .iter()
                .map(|p| p.to_string())
                .collect(),
            keyword_weight: DEFAULT_KEYWORD_WEIGHT,
            symbol_weight: DEFAULT_SYMBOL_WEIGHT,
            narration_penalty: DEFAULT_NARRATION_PENALTY,
        }
    }
}
