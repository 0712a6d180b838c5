//! Vote feedback through the terminal bell and desktop notifications.

use std::io::Write;

use notify_rust::Notification;
use tracing::warn;

use crate::domain::ports::FeedbackPort;

/// Feedback service backed by the terminal bell and `notify-rust`.
///
/// Both channels are individually togglable and strictly best-effort:
/// failures are logged and otherwise ignored.
#[derive(Debug, Clone, Default)]
pub struct DesktopFeedbackService {
    bell: bool,
    desktop: bool,
}

impl DesktopFeedbackService {
    /// Creates the service with the given channel toggles.
    #[must_use]
    pub fn new(bell: bool, desktop: bool) -> Self {
        Self { bell, desktop }
    }
}

impl FeedbackPort for DesktopFeedbackService {
    fn play_tone(&self) {
        if !self.bell {
            return;
        }

        let mut stdout = std::io::stdout();
        if stdout.write_all(b"\x07").and_then(|()| stdout.flush()).is_err() {
            warn!("Failed to ring the terminal bell");
        }
    }

    fn announce(&self, phrase: &str) {
        if !self.desktop {
            return;
        }

        let phrase = phrase.to_string();
        tokio::task::spawn_blocking(move || {
            if let Err(e) = Notification::new()
                .summary("Votebooth")
                .body(&phrase)
                .appname("Votebooth")
                .show()
            {
                warn!("Failed to show notification: {}", e);
            }
        });
    }
}
