//! Keyword sentiment for AI summaries
//!
//! A deliberately crude two-bucket heuristic: a summary mentioning any
//! trigger keyword is shown as positive, everything else as negative.
//! There is no neutral bucket.

use serde::{Deserialize, Serialize};

/// Lowercase keywords that mark a summary as positive
pub const POSITIVE_KEYWORDS: &[&str] = &["buy", "positive"];

/// Display bucket for a summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
        }
    }

    pub fn is_positive(&self) -> bool {
        matches!(self, Self::Positive)
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classify summary text by case-insensitive substring match
pub fn classify_sentiment(text: &str) -> Sentiment {
    let lower = text.to_lowercase();
    if POSITIVE_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
        Sentiment::Positive
    } else {
        Sentiment::Negative
    }
}
