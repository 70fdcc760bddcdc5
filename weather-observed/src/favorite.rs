//! The user's favorite station.
//!
//! A single persisted station id. Observers register with
//! [`FavoriteStation::subscribe`] and receive one
//! [`WeatherEvent::FavoriteStationChanged`] per successful `set`.

use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::debug;

use crate::preferences::{FAVORITE_STATION_KEY, Preferences, PreferencesError};

/// Capacity of the event channel; slower observers see `Lagged`.
const EVENT_CAPACITY: usize = 16;

/// Events published by the weather layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherEvent {
    /// The favorite station was set.
    FavoriteStationChanged,
}

impl WeatherEvent {
    /// Event name, for observers that dispatch by name.
    pub fn name(&self) -> &'static str {
        match self {
            WeatherEvent::FavoriteStationChanged => "OSCAWeather_UserWeatherStationDidChange",
        }
    }
}

/// Single-slot store of the favorite station id.
#[derive(Debug)]
pub struct FavoriteStation<P> {
    preferences: Arc<P>,
    events: broadcast::Sender<WeatherEvent>,
}

impl<P: Preferences> FavoriteStation<P> {
    pub fn new(preferences: Arc<P>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            preferences,
            events,
        }
    }

    /// Register an observer. It sees events published after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<WeatherEvent> {
        self.events.subscribe()
    }

    /// Persist `station_id`, replacing any previous favorite, then notify
    /// observers. Nothing is published if persisting fails.
    pub fn set(&self, station_id: &str) -> Result<(), PreferencesError> {
        self.preferences.set(FAVORITE_STATION_KEY, station_id)?;

        // No receivers is not an error.
        let observers = self
            .events
            .send(WeatherEvent::FavoriteStationChanged)
            .unwrap_or(0);
        debug!(station_id, observers, "favorite station changed");
        Ok(())
    }

    /// The favorite station id, or `None` if never set.
    pub fn get(&self) -> Option<String> {
        self.preferences.get(FAVORITE_STATION_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preferences::{FilePreferences, MemoryPreferences};
    use tokio::sync::broadcast::error::TryRecvError;

    /// Preferences that refuse every write.
    struct ReadOnlyPreferences;

    impl Preferences for ReadOnlyPreferences {
        fn get(&self, _key: &str) -> Option<String> {
            None
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), PreferencesError> {
            Err(PreferencesError::Io {
                message: "read-only".to_string(),
            })
        }
    }

    #[test]
    fn unset_favorite_is_absent() {
        let favorite = FavoriteStation::new(Arc::new(MemoryPreferences::new()));
        assert_eq!(favorite.get(), None);
    }

    #[test]
    fn set_then_get_notifies_once() {
        let favorite = FavoriteStation::new(Arc::new(MemoryPreferences::new()));
        let mut events = favorite.subscribe();

        favorite.set("abc123").unwrap();

        assert_eq!(favorite.get().as_deref(), Some("abc123"));
        assert_eq!(events.try_recv(), Ok(WeatherEvent::FavoriteStationChanged));
        assert_eq!(events.try_recv(), Err(TryRecvError::Empty));
    }

    #[test]
    fn set_overwrites_and_notifies_every_time() {
        let favorite = FavoriteStation::new(Arc::new(MemoryPreferences::new()));
        let mut events = favorite.subscribe();

        favorite.set("first").unwrap();
        favorite.set("second").unwrap();

        assert_eq!(favorite.get().as_deref(), Some("second"));
        assert_eq!(events.try_recv(), Ok(WeatherEvent::FavoriteStationChanged));
        assert_eq!(events.try_recv(), Ok(WeatherEvent::FavoriteStationChanged));
        assert_eq!(events.try_recv(), Err(TryRecvError::Empty));
    }

    #[test]
    fn every_observer_is_notified() {
        let favorite = FavoriteStation::new(Arc::new(MemoryPreferences::new()));
        let mut first = favorite.subscribe();
        let mut second = favorite.subscribe();

        favorite.set("abc123").unwrap();

        assert_eq!(first.try_recv(), Ok(WeatherEvent::FavoriteStationChanged));
        assert_eq!(second.try_recv(), Ok(WeatherEvent::FavoriteStationChanged));
    }

    #[test]
    fn set_without_observers_succeeds() {
        let favorite = FavoriteStation::new(Arc::new(MemoryPreferences::new()));
        favorite.set("abc123").unwrap();
        assert_eq!(favorite.get().as_deref(), Some("abc123"));
    }

    #[test]
    fn failed_set_does_not_notify() {
        let favorite = FavoriteStation::new(Arc::new(ReadOnlyPreferences));
        let mut events = favorite.subscribe();

        assert!(favorite.set("abc123").is_err());
        assert_eq!(events.try_recv(), Err(TryRecvError::Empty));
    }

    #[test]
    fn shares_slot_with_file_preferences() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = Arc::new(FilePreferences::new(dir.path().join("prefs.json")));
        let favorite = FavoriteStation::new(Arc::clone(&prefs));

        favorite.set("Xk2lP0aBcd").unwrap();

        assert_eq!(
            prefs.get(FAVORITE_STATION_KEY).as_deref(),
            Some("Xk2lP0aBcd")
        );
    }

    #[test]
    fn event_name() {
        assert_eq!(
            WeatherEvent::FavoriteStationChanged.name(),
            "OSCAWeather_UserWeatherStationDidChange"
        );
    }
}
