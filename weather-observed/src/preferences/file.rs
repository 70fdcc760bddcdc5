//! Disk-backed preferences.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::warn;

use super::Preferences;
use super::error::PreferencesError;

/// Preferences stored as a JSON object in a single file.
///
/// The file is read on every `get`, so changes made by another process are
/// picked up. Writes from this process are serialized.
#[derive(Debug)]
pub struct FilePreferences {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FilePreferences {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Get the preferences file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read all stored entries. A missing file holds no entries.
    fn load(&self) -> Result<BTreeMap<String, String>, PreferencesError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => {
                return Err(PreferencesError::Io {
                    message: format!("failed to read {}: {}", self.path.display(), e),
                });
            }
        };

        serde_json::from_str(&contents).map_err(|e| PreferencesError::Serialization {
            message: format!("failed to parse {}: {}", self.path.display(), e),
        })
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> Result<(), PreferencesError> {
        // Create parent directories if needed
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| PreferencesError::Io {
                message: format!("failed to create preferences directory: {}", e),
            })?;
        }

        let json =
            serde_json::to_string_pretty(entries).map_err(|e| PreferencesError::Serialization {
                message: format!("failed to serialize preferences: {}", e),
            })?;

        std::fs::write(&self.path, json).map_err(|e| PreferencesError::Io {
            message: format!("failed to write preferences file: {}", e),
        })
    }
}

impl Preferences for FilePreferences {
    fn get(&self, key: &str) -> Option<String> {
        match self.load() {
            Ok(mut entries) => entries.remove(key),
            Err(e) => {
                warn!(error = %e, key, "failed to read preference");
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PreferencesError> {
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let mut entries = self.load()?;
        entries.insert(key.to_string(), value.to_string());
        self.save(&entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn set_and_get() {
        let dir = tempdir().unwrap();
        let prefs = FilePreferences::new(dir.path().join("prefs.json"));

        assert_eq!(prefs.get("SessionToken"), None);

        prefs.set("SessionToken", "r:abc").unwrap();
        prefs.set("OSCAWeather_favouriteWeatherObserved", "Xk2lP0aBcd").unwrap();

        assert_eq!(prefs.get("SessionToken").as_deref(), Some("r:abc"));
        assert_eq!(
            prefs.get("OSCAWeather_favouriteWeatherObserved").as_deref(),
            Some("Xk2lP0aBcd")
        );
    }

    #[test]
    fn values_survive_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("prefs.json");

        FilePreferences::new(&path).set("key", "value").unwrap();

        let reopened = FilePreferences::new(&path);
        assert_eq!(reopened.get("key").as_deref(), Some("value"));
    }

    #[test]
    fn creates_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("dir").join("prefs.json");
        let prefs = FilePreferences::new(&path);

        prefs.set("key", "value").unwrap();

        assert!(path.exists());
        assert_eq!(prefs.path(), path);
    }

    #[test]
    fn corrupt_file_reads_as_absent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, "not json").unwrap();

        let prefs = FilePreferences::new(&path);
        assert_eq!(prefs.get("key"), None);
    }

    #[test]
    fn corrupt_file_rejects_write() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, "[1, 2, 3]").unwrap();

        let prefs = FilePreferences::new(&path);
        let err = prefs.set("key", "value").unwrap_err();
        assert!(matches!(err, PreferencesError::Serialization { .. }));

        // The file is left untouched.
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[1, 2, 3]");
    }
}
