use leaderkey_keyboard::KeyMap;

/// Why a captured key cannot be saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum KeyValidationError {
    #[error("Key is empty")]
    EmptyKey,
    #[error("Key is already used in this group")]
    DuplicateKey,
    #[error("Key must be a single character")]
    NonSingleCharacterKey,
}

/// Check one key against the other keys of its group.
///
/// A key is a single character or a value the keymap knows (glyph or name).
/// Two keys are duplicates when they display as the same glyph, so "return"
/// and "⏎" collide.
pub fn validate_key(key: &str, siblings: &[&str], keymap: &KeyMap) -> Result<(), KeyValidationError> {
    if key.is_empty() {
        return Err(KeyValidationError::EmptyKey);
    }

    let is_single_char = key.chars().count() == 1;
    if !is_single_char && keymap.entry_for_value(key).is_none() {
        return Err(KeyValidationError::NonSingleCharacterKey);
    }

    let glyph = keymap.glyph_for(key);
    if siblings.iter().any(|s| keymap.glyph_for(s) == glyph) {
        return Err(KeyValidationError::DuplicateKey);
    }

    Ok(())
}

/// Validate every key of a group. The result has one slot per key.
pub fn validate_group(keys: &[&str], keymap: &KeyMap) -> Vec<Option<KeyValidationError>> {
    keys.iter()
        .enumerate()
        .map(|(i, key)| {
            let siblings: Vec<&str> = keys
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != i)
                .map(|(_, k)| *k)
                .collect();
            validate_key(key, &siblings, keymap).err()
        })
        .collect()
}
