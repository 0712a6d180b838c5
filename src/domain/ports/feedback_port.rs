//! Audio/visual feedback port definition.

/// Port for best-effort vote feedback.
///
/// Both operations are fire-and-forget: no return value is consumed
/// and failures are ignored by callers.
pub trait FeedbackPort: Send + Sync {
    /// Plays a short fixed-pitch tone.
    fn play_tone(&self);

    /// Announces a short phrase.
    fn announce(&self, phrase: &str);
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    /// Feedback port recording every event in order.
    #[derive(Default)]
    pub struct MockFeedback {
        pub events: Mutex<Vec<String>>,
    }

    impl MockFeedback {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn events(&self) -> Vec<String> {
            self.events.lock().unwrap().clone()
        }

        pub fn tone_count(&self) -> usize {
            self.events().iter().filter(|e| *e == "tone").count()
        }
    }

    impl FeedbackPort for MockFeedback {
        fn play_tone(&self) {
            self.events.lock().unwrap().push("tone".to_string());
        }

        fn announce(&self, phrase: &str) {
            self.events.lock().unwrap().push(format!("announce:{phrase}"));
        }
    }
}
