//! Append-only voter log entry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One cast ballot: who voted, for whom, and when.
///
/// Records are immutable once created and only ever removed by a full
/// reset. The one-entry-per-name rule is enforced before voting is
/// allowed, not by the log itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BallotRecord {
    /// Voter name as entered at the identity gate.
    pub name: String,
    /// Candidate name at the time the vote was cast.
    pub voted: String,
    /// When the ballot was cast.
    #[serde(default = "Utc::now")]
    pub cast_at: DateTime<Utc>,
}

impl BallotRecord {
    /// Creates a record stamped with the current time.
    #[must_use]
    pub fn new(name: impl Into<String>, voted: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            voted: voted.into(),
            cast_at: Utc::now(),
        }
    }

    /// Case-insensitive match against a voter name.
    #[must_use]
    pub fn matches_voter(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}
