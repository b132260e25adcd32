//! Key codes, glyph tables and key-capture resolution for Leader Key.
//!
//! A control that captures a single key press hands each [`KeyEvent`] to
//! [`resolve`], which decides whether the press cancels the capture, clears
//! the value or produces a new one. [`glyph_for`] turns a stored value back
//! into something to put on screen.
//!
//! # Example
//!
//! ```
//! use leaderkey_keyboard::{resolve, CaptureResult, KeyEvent, KeyMap};
//!
//! let keymap = KeyMap::default();
//!
//! assert_eq!(
//!     resolve(&KeyEvent::new(36), &keymap),
//!     CaptureResult::Resolved("⏎".to_string())
//! );
//! assert_eq!(resolve(&KeyEvent::new(53), &keymap), CaptureResult::Cancelled);
//! assert_eq!(
//!     resolve(&KeyEvent::with_characters(0, "a"), &keymap),
//!     CaptureResult::Unmapped("a".to_string())
//! );
//! ```

mod capture;
mod event;
mod key;
mod keymap;

pub use capture::{glyph_for, resolve, CaptureResult};
pub use event::KeyEvent;
pub use key::Key;
pub use keymap::{KeyMap, KeyMapEntry};

use thiserror::Error;

/// Errors that can occur when building a glyph table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum KeymapError {
    /// Two entries share a key code.
    #[error("Key code {code} is mapped more than once")]
    DuplicateCode { code: u16 },

    /// An entry has nothing to display.
    #[error("Key code {code} has an empty glyph")]
    EmptyGlyph { code: u16 },

    /// Two entries share a canonical name.
    #[error("Key name '{name}' is used more than once")]
    DuplicateName { name: String },

    /// A name is spelled like another entry's glyph, so a stored value could
    /// refer to either.
    #[error("Key name '{name}' is also another key's glyph")]
    AmbiguousName { name: String },
}
