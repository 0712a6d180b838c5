//! Admin credential port definition.

/// Port for checking the admin credential.
///
/// Keeps the session independent of where the secret lives.
pub trait CredentialPort: Send + Sync {
    /// Returns whether the supplied password unlocks the admin panel.
    fn verify(&self, password: &str) -> bool;
}
