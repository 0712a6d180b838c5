//! Votebooth - a keyboard-driven terminal voting booth.
//!
//! This crate provides a single-screen TUI for running a small election:
//! a voter-identity gate with a one-vote-per-name rule, two-phase vote
//! confirmation, and an admin panel for managing candidates, locking
//! voting, and viewing tallies.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing the ballot session state machine.
pub mod application;
/// Domain layer containing entities, errors, ports, and tally logic.
pub mod domain;
/// Infrastructure layer containing adapters for external services.
pub mod infrastructure;
/// Presentation layer containing UI components and event handling.
pub mod presentation;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "votebooth";
