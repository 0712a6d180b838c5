//! Event handling.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Key event predicates shared across screens.
pub struct EventHandler;

impl EventHandler {
    /// Checks if key is a hard-quit event (Ctrl+C).
    #[must_use]
    pub fn is_quit_event(key: &KeyEvent) -> bool {
        matches!(
            key,
            KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
                ..
            }
        )
    }

    /// Checks if a key event is a press (repeats and releases are
    /// ignored so one action fires per keystroke).
    #[must_use]
    pub fn is_press(key: &KeyEvent) -> bool {
        matches!(key.kind, KeyEventKind::Press)
    }
}
