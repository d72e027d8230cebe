//! Commit metadata shown in the changelog header

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identity and message of the commit being described
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitInfo {
    /// Full object id
    pub id: String,
    /// Abbreviated object id
    pub short_id: String,
    /// First line of the message
    pub summary: String,
    /// Full message
    pub message: String,
    /// Author name
    pub author: String,
    /// Commit time
    pub time: DateTime<Utc>,
}

impl CommitInfo {
    /// Returns the message with surrounding whitespace removed
    pub fn trimmed_message(&self) -> &str {
        self.message.trim()
    }
}
