//! Reusable widgets.

mod input;

pub use input::TextInput;
