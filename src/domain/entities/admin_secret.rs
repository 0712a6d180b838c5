//! Admin secret value object.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Configured admin password, zeroed on drop and masked in debug output.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct AdminSecret {
    value: String,
}

impl AdminSecret {
    /// Wraps a configured secret.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// Compares a candidate password against the secret.
    #[must_use]
    pub fn matches(&self, candidate: &str) -> bool {
        self.value == candidate
    }
}

impl fmt::Debug for AdminSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminSecret")
            .field("value", &"*".repeat(self.value.len().min(8)))
            .finish()
    }
}
