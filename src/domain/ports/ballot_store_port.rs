//! Ballot store port definition.

use crate::domain::entities::{BallotRecord, Candidate};
use crate::domain::errors::StoreError;

/// Port for persisting the two named ballot records.
///
/// Loads return `None` when a record is absent or unreadable; callers
/// fall back to defaults. Saves are fire-and-forget from the session's
/// point of view.
pub trait BallotStorePort: Send + Sync {
    /// Loads the stored candidate roster.
    fn load_candidates(&self) -> Option<Vec<Candidate>>;

    /// Persists the candidate roster.
    ///
    /// # Errors
    /// Returns `StoreError` if the record cannot be written.
    fn save_candidates(&self, candidates: &[Candidate]) -> Result<(), StoreError>;

    /// Loads the stored voter log.
    fn load_voter_log(&self) -> Option<Vec<BallotRecord>>;

    /// Persists the voter log.
    ///
    /// # Errors
    /// Returns `StoreError` if the record cannot be written.
    fn save_voter_log(&self, log: &[BallotRecord]) -> Result<(), StoreError>;
}
