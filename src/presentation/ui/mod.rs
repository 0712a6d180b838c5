//! UI screens.

mod app;
mod booth_screen;

pub use app::App;
pub use booth_screen::{BoothAction, BoothMode, BoothScreen};
