//! Key code to glyph table.

use crate::{Key, KeymapError};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One row of the glyph table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyMapEntry {
    /// macOS virtual key code.
    pub code: u16,
    /// What the key looks like on screen, e.g. "⏎".
    pub glyph: String,
    /// Lower-case canonical name, e.g. "return".
    pub name: String,
}

impl KeyMapEntry {
    pub fn new(code: u16, glyph: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code,
            glyph: glyph.into(),
            name: name.into(),
        }
    }
}

/// Immutable lookup table from key code to [`KeyMapEntry`].
///
/// Construction guarantees that codes and names are unique and that no name
/// is spelled like another entry's glyph, so a stored value is never both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMap {
    entries: BTreeMap<u16, KeyMapEntry>,
}

impl KeyMap {
    /// Build a table, rejecting inconsistent entries.
    pub fn new(entries: impl IntoIterator<Item = KeyMapEntry>) -> Result<Self, KeymapError> {
        let mut map = BTreeMap::new();
        for entry in entries {
            if entry.glyph.is_empty() {
                return Err(KeymapError::EmptyGlyph { code: entry.code });
            }
            if map.contains_key(&entry.code) {
                return Err(KeymapError::DuplicateCode { code: entry.code });
            }
            map.insert(entry.code, entry);
        }

        let keymap = Self { entries: map };
        keymap.check_names()?;
        Ok(keymap)
    }

    /// A table with no entries. Every value displays as itself.
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Return a new table with `overrides` replacing entries that share a key
    /// code and adding the rest.
    pub fn with_overrides(
        &self,
        overrides: impl IntoIterator<Item = KeyMapEntry>,
    ) -> Result<Self, KeymapError> {
        let mut entries = self.entries.clone();
        for entry in overrides {
            if entry.glyph.is_empty() {
                return Err(KeymapError::EmptyGlyph { code: entry.code });
            }
            let code = entry.code;
            if let Some(previous) = entries.insert(code, entry) {
                debug!("Keymap override for key code {}: replaced '{}'", code, previous.glyph);
            }
        }

        let keymap = Self { entries };
        keymap.check_names()?;
        Ok(keymap)
    }

    fn check_names(&self) -> Result<(), KeymapError> {
        let mut seen: Vec<&str> = Vec::with_capacity(self.entries.len());
        for entry in self.entries.values() {
            if entry.name.is_empty() {
                continue;
            }
            if seen.contains(&entry.name.as_str()) {
                return Err(KeymapError::DuplicateName {
                    name: entry.name.clone(),
                });
            }
            seen.push(&entry.name);

            let clashes = self
                .entries
                .values()
                .any(|other| other.code != entry.code && other.glyph == entry.name);
            if clashes {
                return Err(KeymapError::AmbiguousName {
                    name: entry.name.clone(),
                });
            }
        }
        Ok(())
    }

    pub fn entry(&self, code: u16) -> Option<&KeyMapEntry> {
        self.entries.get(&code)
    }

    pub fn glyph(&self, code: u16) -> Option<&str> {
        self.entry(code).map(|e| e.glyph.as_str())
    }

    /// Find the entry a stored value refers to, matching either its glyph or
    /// its canonical name. Entries without a name only match by glyph.
    pub fn entry_for_value(&self, value: &str) -> Option<&KeyMapEntry> {
        self.entries
            .values()
            .find(|e| e.glyph == value)
            .or_else(|| {
                self.entries
                    .values()
                    .find(|e| !e.name.is_empty() && e.name == value)
            })
    }

    /// Best glyph to display for a stored value. Values with no registered
    /// glyph are returned unchanged.
    pub fn glyph_for(&self, value: &str) -> String {
        match self.entry_for_value(value) {
            Some(entry) => entry.glyph.clone(),
            None => value.to_string(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &KeyMapEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for KeyMap {
    /// The built-in macOS glyph table.
    fn default() -> Self {
        let glyphs = [
            (Key::Return, "⏎", "return"),
            (Key::KeypadEnter, "⌤", "enter"),
            (Key::Tab, "⇥", "tab"),
            (Key::Space, "␣", "space"),
            (Key::Delete, "⌫", "delete"),
            (Key::Escape, "⎋", "escape"),
            (Key::ForwardDelete, "⌦", "forwarddelete"),
            (Key::LeftArrow, "←", "left"),
            (Key::RightArrow, "→", "right"),
            (Key::DownArrow, "↓", "down"),
            (Key::UpArrow, "↑", "up"),
            (Key::Home, "↖", "home"),
            (Key::End, "↘", "end"),
            (Key::PageUp, "⇞", "pageup"),
            (Key::PageDown, "⇟", "pagedown"),
            (Key::F1, "F1", "f1"),
            (Key::F2, "F2", "f2"),
            (Key::F3, "F3", "f3"),
            (Key::F4, "F4", "f4"),
            (Key::F5, "F5", "f5"),
            (Key::F6, "F6", "f6"),
            (Key::F7, "F7", "f7"),
            (Key::F8, "F8", "f8"),
            (Key::F9, "F9", "f9"),
            (Key::F10, "F10", "f10"),
            (Key::F11, "F11", "f11"),
            (Key::F12, "F12", "f12"),
        ];

        let entries = glyphs
            .into_iter()
            .map(|(key, glyph, name)| {
                let code = key.macos_keycode();
                (code, KeyMapEntry::new(code, glyph, name))
            })
            .collect();

        Self { entries }
    }
}
