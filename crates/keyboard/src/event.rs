//! Key press events delivered while a capture is in progress.

use crate::Key;

/// A single key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    /// macOS virtual key code of the pressed key.
    pub code: u16,

    /// The characters this key press would produce with the current keyboard
    /// layout and modifiers. `None` for keys that produce no text.
    pub characters: Option<String>,
}

impl KeyEvent {
    /// Create an event for a key that produced no characters.
    pub fn new(code: u16) -> Self {
        Self {
            code,
            characters: None,
        }
    }

    /// Create an event carrying the characters the key produced.
    pub fn with_characters(code: u16, characters: impl Into<String>) -> Self {
        Self {
            code,
            characters: Some(characters.into()),
        }
    }

    /// The key that was pressed.
    pub fn key(&self) -> Key {
        Key::from_macos_keycode(self.code)
    }

    /// First character produced by the key press, if any.
    pub fn first_character(&self) -> Option<char> {
        self.characters.as_deref().and_then(|s| s.chars().next())
    }
}
