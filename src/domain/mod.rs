//! Domain layer with core entities and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Port definitions.
pub mod ports;
/// Pure domain services.
pub mod services;

pub use entities::{AdminSecret, BallotRecord, Candidate};
pub use errors::{StoreError, VoteError};
pub use ports::{BallotStorePort, CredentialPort, FeedbackPort};
pub use services::{Winner, winner};
