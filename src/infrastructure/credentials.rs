//! Config-backed admin credential check.

use crate::domain::entities::AdminSecret;
use crate::domain::ports::CredentialPort;

/// Credential adapter comparing against the configured admin secret.
pub struct ConfiguredCredential {
    secret: AdminSecret,
}

impl ConfiguredCredential {
    /// Wraps the configured secret.
    #[must_use]
    pub const fn new(secret: AdminSecret) -> Self {
        Self { secret }
    }
}

impl CredentialPort for ConfiguredCredential {
    fn verify(&self, password: &str) -> bool {
        self.secret.matches(password)
    }
}
