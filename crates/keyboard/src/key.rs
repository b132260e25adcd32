//! Named keys and their macOS virtual key codes.

/// A physical key, identified by its macOS virtual key code.
///
/// Only the keys Leader Key treats specially are named; everything else is
/// carried as [`Key::Unknown`] with its raw code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Return,
    KeypadEnter,
    Tab,
    Space,
    /// Backspace. macOS labels it "delete".
    Delete,
    Escape,
    ForwardDelete,
    LeftArrow,
    RightArrow,
    DownArrow,
    UpArrow,
    Home,
    End,
    PageUp,
    PageDown,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
    Unknown(u16),
}

// Key codes from <HIToolbox/Events.h>
const KEYCODES: &[(Key, u16)] = &[
    (Key::Return, 36),
    (Key::KeypadEnter, 76),
    (Key::Tab, 48),
    (Key::Space, 49),
    (Key::Delete, 51),
    (Key::Escape, 53),
    (Key::ForwardDelete, 117),
    (Key::LeftArrow, 123),
    (Key::RightArrow, 124),
    (Key::DownArrow, 125),
    (Key::UpArrow, 126),
    (Key::Home, 115),
    (Key::End, 119),
    (Key::PageUp, 116),
    (Key::PageDown, 121),
    (Key::F1, 122),
    (Key::F2, 120),
    (Key::F3, 99),
    (Key::F4, 118),
    (Key::F5, 96),
    (Key::F6, 97),
    (Key::F7, 98),
    (Key::F8, 100),
    (Key::F9, 101),
    (Key::F10, 109),
    (Key::F11, 103),
    (Key::F12, 111),
];

impl Key {
    /// Map a macOS virtual key code to a key.
    pub fn from_macos_keycode(code: u16) -> Self {
        KEYCODES
            .iter()
            .find(|(_, c)| *c == code)
            .map(|(key, _)| *key)
            .unwrap_or(Key::Unknown(code))
    }

    /// The macOS virtual key code for this key.
    pub fn macos_keycode(self) -> u16 {
        match self {
            Key::Unknown(code) => code,
            named => KEYCODES
                .iter()
                .find(|(key, _)| *key == named)
                .map(|(_, code)| *code)
                .unwrap_or_default(),
        }
    }

    /// Keys that abort a capture and restore the previous value.
    pub fn is_cancel(self) -> bool {
        self == Key::Escape
    }

    /// Keys that clear the captured value.
    pub fn is_clear(self) -> bool {
        matches!(self, Key::Delete | Key::ForwardDelete)
    }

    /// All named keys, in key code table order.
    pub fn named() -> impl Iterator<Item = Key> {
        KEYCODES.iter().map(|(key, _)| *key)
    }
}
