//! Chat message model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single message in a match thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub sender_id: String,
    /// Never empty; stored trimmed.
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Creates a message with a fresh id stamped with the current time.
    pub fn new(sender_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            sender_id: sender_id.into(),
            text: text.into(),
            created_at: Utc::now(),
        }
    }

    pub fn is_from(&self, profile_id: &str) -> bool {
        self.sender_id == profile_id
    }
}
