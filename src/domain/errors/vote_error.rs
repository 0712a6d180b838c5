//! Voting error types.

use thiserror::Error;

/// Errors surfaced by ballot session operations.
///
/// Validation errors are rendered inline to the user and leave state
/// unchanged; none of them is fatal to the session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VoteError {
    /// The voter name field was empty.
    #[error("enter a name before confirming")]
    EmptyName,

    /// The name already appears in the voter log.
    #[error("this name has already voted")]
    AlreadyVoted {
        /// Name as entered at the gate.
        name: String,
    },

    /// Admin password did not match the configured secret.
    #[error("incorrect password")]
    IncorrectPassword,

    /// A vote was attempted while the global voting lock is set.
    #[error("voting is currently locked")]
    VotingLocked,

    /// A cast was attempted without a matching pending confirmation.
    #[error("no pending confirmation for this candidate")]
    NotConfirmed,

    /// A candidate label was blank.
    #[error("candidate name cannot be empty")]
    EmptyCandidateName,
}

impl VoteError {
    /// Creates an already-voted error.
    #[must_use]
    pub fn already_voted(name: impl Into<String>) -> Self {
        Self::AlreadyVoted { name: name.into() }
    }

    /// Returns whether the error concerns the voter identity gate.
    #[must_use]
    pub const fn is_gate_error(&self) -> bool {
        matches!(self, Self::EmptyName | Self::AlreadyVoted { .. })
    }
}
