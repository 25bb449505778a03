//! Persisted user preferences.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use ontime_core::StorageError;
use parking_lot::Mutex;

/// Storage key for the display locale code.
pub const LOCALE_KEY: &str = "flightontime_language";
/// Storage key for the unit system code.
pub const UNIT_KEY: &str = "flightontime_distance_unit";

const PREFERENCES_FILE: &str = "preferences.toml";

/// Key/value persistence for preferences.
pub trait PreferenceStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Non-persistent store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Flat TOML map stored as `preferences.toml` in a directory.
///
/// The file is read once on open and rewritten in full on every `set`.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    values: Mutex<BTreeMap<String, String>>,
}

impl FileStore {
    /// Open the store in `dir`. A missing file starts empty; so does an
    /// unreadable one, with a warning.
    pub fn open(dir: &Path) -> Self {
        let path = dir.join(PREFERENCES_FILE);
        let values = match Self::read(&path) {
            Ok(values) => values,
            Err(e) => {
                tracing::warn!("Ignoring saved preferences: {}", e);
                BTreeMap::new()
            }
        };

        Self {
            path,
            values: Mutex::new(values),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(path: &Path) -> Result<BTreeMap<String, String>, StorageError> {
        if !path.exists() {
            return Ok(BTreeMap::new());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| StorageError::Read(format!("{}: {}", path.display(), e)))?;

        toml::from_str(&content)
            .map_err(|e| StorageError::Read(format!("{}: {}", path.display(), e)))
    }

    fn write(&self, values: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| StorageError::Write(e.to_string()))?;
        }

        let content = toml::to_string(values).map_err(|e| StorageError::Write(e.to_string()))?;
        fs::write(&self.path, content)
            .map_err(|e| StorageError::Write(format!("{}: {}", self.path.display(), e)))?;

        tracing::debug!("Saved preferences to {:?}", self.path);
        Ok(())
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut values = self.values.lock();
        values.insert(key.to_string(), value.to_string());
        self.write(&values)
    }
}
