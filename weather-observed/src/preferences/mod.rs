//! Scalar key/value persistence.
//!
//! Stores the session token and the favorite station. Each key holds a
//! single string; writes overwrite.

mod error;
mod file;

use std::collections::HashMap;
use std::sync::RwLock;

pub use error::PreferencesError;
pub use file::FilePreferences;

/// Persistence key of the session token.
pub const SESSION_TOKEN_KEY: &str = "SessionToken";

/// Persistence key of the favorite station.
pub const FAVORITE_STATION_KEY: &str = "OSCAWeather_favouriteWeatherObserved";

/// Scalar string storage keyed by a fixed key.
///
/// A single `set` is atomic; nothing else is guaranteed. Concurrent writers
/// to the same key race and the last write wins.
pub trait Preferences: Send + Sync {
    /// The stored value, or `None` if the key was never set.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), PreferencesError>;
}

/// In-process preferences, lost when dropped.
#[derive(Debug, Default)]
pub struct MemoryPreferences {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create preferences holding the given entries.
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: RwLock::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }
}

impl Preferences for MemoryPreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.values
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PreferencesError> {
        self.values
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
