//! Lightweight analytics attached to each generated response.
//!
//! Word count is measured on the generated reply; sentiment is classified from
//! the customer's feedback, not from the reply.

use serde::{Deserialize, Serialize};

const POSITIVE_KEYWORDS: &[&str] = &["great", "excellent", "amazing", "wonderful", "outstanding"];
const NEGATIVE_KEYWORDS: &[&str] = &["bad", "terrible", "awful", "horrible"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseAnalytics {
    pub word_count: usize,
    pub sentiment: Sentiment,
}

impl ResponseAnalytics {
    pub fn compute(generated: &str, feedback_text: &str) -> Self {
        Self {
            word_count: word_count(generated),
            sentiment: classify_sentiment(feedback_text),
        }
    }
}

/// Number of whitespace-delimited tokens.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Case-insensitive substring match; positive keywords are checked first.
pub fn classify_sentiment(feedback_text: &str) -> Sentiment {
    let lower = feedback_text.to_lowercase();
    if POSITIVE_KEYWORDS.iter().any(|k| lower.contains(k)) {
        Sentiment::Positive
    } else if NEGATIVE_KEYWORDS.iter().any(|k| lower.contains(k)) {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    }
}
