//! Resolution of a captured key press.

use crate::{KeyEvent, KeyMap};

/// What a key press means to a control that is capturing a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureResult {
    /// Abort the capture and restore the value from before it began.
    Cancelled,
    /// Set the value to the empty string.
    Cleared,
    /// The key has a glyph in the table.
    Resolved(String),
    /// No glyph for the key; fall back to the first character it produced.
    Unmapped(String),
    /// Nothing to act on. Keep listening.
    NoResolution,
}

impl CaptureResult {
    /// Whether the result ends the capture.
    pub fn is_actionable(&self) -> bool {
        !matches!(self, CaptureResult::NoResolution)
    }

    /// The value a control should hold after applying this result.
    ///
    /// `before` is the value from when the capture began. Returns `None` for
    /// [`CaptureResult::NoResolution`], meaning the value is left alone.
    pub fn apply(&self, before: &str) -> Option<String> {
        match self {
            CaptureResult::Cancelled => Some(before.to_string()),
            CaptureResult::Cleared => Some(String::new()),
            CaptureResult::Resolved(value) | CaptureResult::Unmapped(value) => {
                Some(value.clone())
            }
            CaptureResult::NoResolution => None,
        }
    }
}

/// Resolve a key press against a glyph table.
///
/// Escape always cancels and Delete/Forward-Delete always clear, even when the
/// table has an entry for the same key code.
pub fn resolve(event: &KeyEvent, keymap: &KeyMap) -> CaptureResult {
    let key = event.key();

    if key.is_cancel() {
        return CaptureResult::Cancelled;
    }
    if key.is_clear() {
        return CaptureResult::Cleared;
    }

    if let Some(glyph) = keymap.glyph(event.code) {
        return CaptureResult::Resolved(glyph.to_string());
    }

    match event.first_character() {
        Some(c) => CaptureResult::Unmapped(c.to_string()),
        None => CaptureResult::NoResolution,
    }
}

/// Best glyph to display for a stored value; see [`KeyMap::glyph_for`].
pub fn glyph_for(value: &str, keymap: &KeyMap) -> String {
    keymap.glyph_for(value)
}
