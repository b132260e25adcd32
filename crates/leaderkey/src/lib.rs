//! Core state for Leader Key, a leader-key launcher for the macOS menu bar.
//!
//! - [`CommandTracker`] remembers the last command that ran.
//! - [`KeyButton`] drives the capture of a single key for a shortcut field,
//!   using [`leaderkey_keyboard::resolve`] to interpret each key press.
//! - [`config`] persists user overrides of the glyph table.

pub mod config;
mod error;
pub mod key_button;
mod last_command;
pub mod log;
pub mod setup;
pub mod validation;

pub use error::Error;
pub use key_button::{
    CaptureEvent, CaptureState, KeyButton, KeyChange, KeyChangeDispatcher, TransitionRejection,
};
pub use last_command::CommandTracker;
pub use validation::{validate_group, validate_key, KeyValidationError};

pub use leaderkey_keyboard as keyboard;
