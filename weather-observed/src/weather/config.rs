//! Retrieval configuration for the weather service.

/// Default number of observations requested when the caller gives no limit.
const DEFAULT_LIMIT: usize = 1000;

/// Default search index of weather observations.
const DEFAULT_SEARCH_INDEX: &str = "weather_observed";

/// Configuration parameters for observation retrieval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherConfig {
    /// Limit used by [`fetch_default_observations`](super::WeatherService::fetch_default_observations).
    pub default_limit: usize,

    /// Search index used by [`search_default`](super::WeatherService::search_default).
    pub search_index: String,
}

impl WeatherConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(default_limit: usize, search_index: impl Into<String>) -> Self {
        Self {
            default_limit,
            search_index: search_index.into(),
        }
    }

    /// Set the default fetch limit.
    pub fn with_default_limit(mut self, limit: usize) -> Self {
        self.default_limit = limit;
        self
    }

    /// Set the search index.
    pub fn with_search_index(mut self, index: impl Into<String>) -> Self {
        self.search_index = index.into();
        self
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self::new(DEFAULT_LIMIT, DEFAULT_SEARCH_INDEX)
    }
}
