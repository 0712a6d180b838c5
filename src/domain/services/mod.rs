//! Pure domain services.

/// Winner computation.
pub mod tally;

pub use tally::{Winner, winner};
