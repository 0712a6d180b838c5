//! Votable candidate entity.

use serde::{Deserialize, Serialize};

/// A votable option with a display label and a vote counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Display label, unique within a roster by convention.
    pub name: String,
    /// Accumulated vote count.
    #[serde(default)]
    pub votes: u64,
}

impl Candidate {
    /// Creates a candidate with zero votes.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            votes: 0,
        }
    }

    /// The roster used when no stored roster exists.
    #[must_use]
    pub fn default_roster() -> Vec<Self> {
        vec![Self::new("Candidate A"), Self::new("Candidate B")]
    }

    /// Placeholder label for the nth roster slot (1-based).
    #[must_use]
    pub fn placeholder_name(position: usize) -> String {
        format!("Candidate {position}")
    }
}
