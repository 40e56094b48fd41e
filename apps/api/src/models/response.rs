use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Configuration id recorded when a response is created without one.
/// Matches the configuration seeded into a fresh store.
pub const FALLBACK_CONFIGURATION_ID: u64 = 1;

/// One persisted generation result. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseRecord {
    pub id: u64,
    pub feedback_text: String,
    pub rendered_output: String,
    pub configuration_id: u64,
    pub created_at: DateTime<Utc>,
}

/// Input for `ResponseStore::create`.
#[derive(Debug, Clone)]
pub struct NewResponseRecord {
    pub feedback_text: String,
    pub rendered_output: String,
    pub configuration_id: Option<u64>,
}

impl NewResponseRecord {
    pub(crate) fn into_record(self, id: u64) -> ResponseRecord {
        ResponseRecord {
            id,
            feedback_text: self.feedback_text,
            rendered_output: self.rendered_output,
            configuration_id: self
                .configuration_id
                .unwrap_or(FALLBACK_CONFIGURATION_ID),
            created_at: Utc::now(),
        }
    }
}
