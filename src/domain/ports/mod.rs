//! Port definitions for external collaborators.

mod ballot_store_port;
mod credential_port;
mod feedback_port;

pub use ballot_store_port::BallotStorePort;
pub use credential_port::CredentialPort;
pub use feedback_port::FeedbackPort;

#[cfg(test)]
pub mod mocks {
    pub use super::ballot_store_port::mock::MockBallotStore;
    pub use super::credential_port::mock::MockCredential;
    pub use super::feedback_port::mock::MockFeedback;
}
