//! Application layer with the ballot session state machine.

/// Ballot session state machine.
pub mod session;

pub use session::{BallotSession, VoteFlow};
