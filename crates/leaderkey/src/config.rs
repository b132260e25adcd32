use directories::ProjectDirs;
use leaderkey_keyboard::{KeyMap, KeyMapEntry, KeymapError};
use log::{debug, info, warn};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::io;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

const CONFIG_FILE_NAME: &str = "config.json";

/// Type-safe configuration key that associates a key name with its value type
#[derive(Debug, Clone, Copy)]
pub struct ConfigKey<T> {
    name: &'static str,
    _phantom: PhantomData<T>,
}

impl<T> ConfigKey<T> {
    const fn new(name: &'static str) -> Self {
        Self {
            name,
            _phantom: PhantomData,
        }
    }

    pub fn key_name(&self) -> &'static str {
        self.name
    }
}

// ===== Keymap Configuration =====

/// User changes to the built-in glyph table
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct KeymapConfig {
    /// Entries replacing built-in ones with the same key code, or adding new ones
    #[serde(default)]
    pub overrides: Vec<KeyMapEntry>,
}

impl ConfigKey<KeymapConfig> {
    pub const KEYMAP: Self = Self::new("keymapConfig");
}

/// Build the glyph table: built-in entries with the stored overrides applied.
pub fn load_keymap(store: &impl ConfigStore) -> Result<KeyMap, KeymapError> {
    let config = store.get(&ConfigKey::KEYMAP).unwrap_or_default();
    if config.overrides.is_empty() {
        return Ok(KeyMap::default());
    }

    info!("Applying {} keymap overrides", config.overrides.len());
    KeyMap::default().with_overrides(config.overrides)
}

// ===== Type-Safe Config Store =====

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to access config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Config file {0} does not contain a JSON object")]
    NotAnObject(PathBuf),
    #[error("Could not determine the config directory")]
    NoConfigDir,
}

pub trait ConfigStore {
    fn get<T: DeserializeOwned>(&self, key: &ConfigKey<T>) -> Option<T>;
    fn set<T: Serialize>(&self, key: &ConfigKey<T>, value: T) -> Result<(), ConfigError>;
    fn delete<T>(&self, key: &ConfigKey<T>) -> Result<(), ConfigError>;
}

/// Config store backed by a single JSON object on disk
///
/// The whole file is read on open and rewritten on every change.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    data: Mutex<Map<String, Value>>,
}

impl JsonFileStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let data = match fs::read(&path) {
            Ok(bytes) => match serde_json::from_slice::<Value>(&bytes)? {
                Value::Object(map) => map,
                _ => return Err(ConfigError::NotAnObject(path)),
            },
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!("No config file at {}, starting empty", path.display());
                Map::new()
            }
            Err(source) => return Err(ConfigError::Io { path, source }),
        };

        Ok(Self {
            path,
            data: Mutex::new(data),
        })
    }

    /// Open the store in the platform config directory
    /// (`~/Library/Application Support/com.leaderkey.Leader-Key` on macOS).
    pub fn open_default() -> Result<Self, ConfigError> {
        let dirs =
            ProjectDirs::from("com", "leaderkey", "Leader Key").ok_or(ConfigError::NoConfigDir)?;
        Self::open(dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> MutexGuard<'_, Map<String, Value>> {
        self.data.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn save(&self, data: &Map<String, Value>) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let bytes = serde_json::to_vec_pretty(data)?;
        fs::write(&self.path, bytes).map_err(io_err)?;
        Ok(())
    }
}

impl ConfigStore for JsonFileStore {
    fn get<T: DeserializeOwned>(&self, key: &ConfigKey<T>) -> Option<T> {
        let value = self.lock().get(key.key_name()).cloned()?;
        serde_json::from_value(value)
            .map_err(|e| warn!("Ignoring invalid '{}' config: {}", key.key_name(), e))
            .ok()
    }

    fn set<T: Serialize>(&self, key: &ConfigKey<T>, value: T) -> Result<(), ConfigError> {
        let val = serde_json::to_value(value)?;
        let mut data = self.lock();
        let mut updated = data.clone();
        updated.insert(key.key_name().to_string(), val);
        self.save(&updated)?;
        *data = updated;
        Ok(())
    }

    fn delete<T>(&self, key: &ConfigKey<T>) -> Result<(), ConfigError> {
        let mut data = self.lock();
        let mut updated = data.clone();
        updated.remove(key.key_name());
        self.save(&updated)?;
        *data = updated;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    // Simple in-memory mock store for testing
    struct MockConfigStore {
        data: RefCell<HashMap<String, serde_json::Value>>,
    }

    impl MockConfigStore {
        fn new() -> Self {
            Self {
                data: RefCell::new(HashMap::new()),
            }
        }
    }

    impl ConfigStore for MockConfigStore {
        fn get<T: DeserializeOwned>(&self, key: &ConfigKey<T>) -> Option<T> {
            self.data
                .borrow()
                .get(key.key_name())
                .and_then(|v| serde_json::from_value(v.clone()).ok())
        }

        fn set<T: Serialize>(&self, key: &ConfigKey<T>, value: T) -> Result<(), ConfigError> {
            let val = serde_json::to_value(value)?;
            self.data
                .borrow_mut()
                .insert(key.key_name().to_string(), val);
            Ok(())
        }

        fn delete<T>(&self, key: &ConfigKey<T>) -> Result<(), ConfigError> {
            self.data.borrow_mut().remove(key.key_name());
            Ok(())
        }
    }

    #[test]
    fn test_keymap_config_store() {
        let store = MockConfigStore::new();
        let config = KeymapConfig {
            overrides: vec![KeyMapEntry::new(36, "↩", "return")],
        };

        assert!(store.get(&ConfigKey::KEYMAP).is_none());
        store.set(&ConfigKey::KEYMAP, config.clone()).unwrap();
        assert_eq!(store.get(&ConfigKey::KEYMAP), Some(config));

        let stored = store.data.borrow().get("keymapConfig").cloned().unwrap();
        assert_eq!(
            stored,
            serde_json::json!({
                "overrides": [{"code": 36, "glyph": "↩", "name": "return"}]
            })
        );

        store.delete(&ConfigKey::KEYMAP).unwrap();
        assert!(store.get(&ConfigKey::KEYMAP).is_none());
    }

    #[test]
    fn test_keymap_config_defaults_when_fields_missing() {
        let config: KeymapConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, KeymapConfig::default());
    }

    #[test]
    fn test_load_keymap() {
        let store = MockConfigStore::new();
        assert_eq!(load_keymap(&store), Ok(KeyMap::default()));

        store
            .set(
                &ConfigKey::KEYMAP,
                KeymapConfig {
                    overrides: vec![KeyMapEntry::new(36, "↩", "return")],
                },
            )
            .unwrap();
        let keymap = load_keymap(&store).unwrap();
        assert_eq!(keymap.glyph(36), Some("↩"));
        assert_eq!(keymap.glyph(48), Some("⇥"));
    }

    #[test]
    fn test_load_keymap_rejects_bad_overrides() {
        let store = MockConfigStore::new();
        store
            .set(
                &ConfigKey::KEYMAP,
                KeymapConfig {
                    overrides: vec![KeyMapEntry::new(36, "", "return")],
                },
            )
            .unwrap();
        assert_eq!(load_keymap(&store), Err(KeymapError::EmptyGlyph { code: 36 }));
    }

    #[test]
    fn test_file_store_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE_NAME);
        let config = KeymapConfig {
            overrides: vec![KeyMapEntry::new(105, "F13", "f13")],
        };

        let store = JsonFileStore::open(&path).unwrap();
        assert!(store.get(&ConfigKey::KEYMAP).is_none());
        store.set(&ConfigKey::KEYMAP, config.clone()).unwrap();

        let reopened = JsonFileStore::open(&path).unwrap();
        assert_eq!(reopened.get(&ConfigKey::KEYMAP), Some(config));

        reopened.delete(&ConfigKey::KEYMAP).unwrap();
        let reopened = JsonFileStore::open(&path).unwrap();
        assert!(reopened.get(&ConfigKey::KEYMAP).is_none());
    }

    #[test]
    fn test_file_store_open_errors() {
        let dir = tempfile::tempdir().unwrap();

        let malformed = dir.path().join("malformed.json");
        fs::write(&malformed, "{ not json").unwrap();
        assert!(matches!(
            JsonFileStore::open(&malformed),
            Err(ConfigError::Json(_))
        ));

        let array = dir.path().join("array.json");
        fs::write(&array, "[1, 2]").unwrap();
        assert!(matches!(
            JsonFileStore::open(&array),
            Err(ConfigError::NotAnObject(_))
        ));
    }

    #[test]
    fn test_file_store_keeps_memory_in_sync_when_write_fails() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("sub");
        let path = sub.join(CONFIG_FILE_NAME);
        let saved = KeymapConfig {
            overrides: vec![KeyMapEntry::new(105, "F13", "f13")],
        };

        let store = JsonFileStore::open(&path).unwrap();
        store.set(&ConfigKey::KEYMAP, saved.clone()).unwrap();

        // A plain file where the config directory was makes every save fail
        fs::remove_dir_all(&sub).unwrap();
        fs::write(&sub, "").unwrap();

        let result = store.set(&ConfigKey::KEYMAP, KeymapConfig::default());
        assert!(matches!(result, Err(ConfigError::Io { .. })));
        assert_eq!(store.get(&ConfigKey::KEYMAP), Some(saved.clone()));

        let result = store.delete(&ConfigKey::KEYMAP);
        assert!(matches!(result, Err(ConfigError::Io { .. })));
        assert_eq!(store.get(&ConfigKey::KEYMAP), Some(saved));
    }

    #[test]
    fn test_file_store_ignores_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, r#"{"keymapConfig": {"overrides": "nope"}}"#).unwrap();

        let store = JsonFileStore::open(&path).unwrap();
        assert!(store.get(&ConfigKey::KEYMAP).is_none());
        assert_eq!(load_keymap(&store), Ok(KeyMap::default()));
    }
}
