//! Infrastructure layer with external service adapters.

/// Application configuration.
pub mod config;
/// Admin credential adapter.
pub mod credentials;
/// Vote feedback (terminal bell, desktop notifications).
pub mod feedback;
/// Ballot record persistence.
pub mod store;

pub use config::{AppConfig, CliArgs, ConfigError, LogLevel, StorageManager};
pub use credentials::ConfiguredCredential;
pub use feedback::DesktopFeedbackService;
pub use store::JsonBallotStore;
