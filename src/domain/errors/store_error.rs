//! Persistence error types.

use thiserror::Error;

/// Errors from the ballot store adapter.
///
/// Store failures are never fatal: the session logs them and keeps its
/// in-memory state authoritative.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The platform data directory could not be determined.
    #[error("failed to determine data directory")]
    DataDirNotFound,

    /// Filesystem failure while reading or writing a record.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A record could not be serialized.
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}
