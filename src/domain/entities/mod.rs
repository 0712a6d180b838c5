//! Domain entity definitions.

mod admin_secret;
mod ballot_record;
mod candidate;

pub use admin_secret::AdminSecret;
pub use ballot_record::BallotRecord;
pub use candidate::Candidate;
