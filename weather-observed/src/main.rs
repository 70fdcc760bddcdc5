use std::collections::BTreeMap;
use std::sync::Arc;

use futures::StreamExt;
use tokio::runtime::Handle;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use weather_observed::domain::WeatherObserved;
use weather_observed::favorite::FavoriteStation;
use weather_observed::parse::{MockTransport, ParseClient, ParseConfig, Transport};
use weather_observed::preferences::FilePreferences;
use weather_observed::weather::WeatherService;

/// Number of stations fetched when `WEATHER_LIMIT` is not set.
const DEFAULT_LIMIT: usize = 10;

/// Preferences file used when `WEATHER_PREFERENCES` is not set.
const DEFAULT_PREFERENCES_PATH: &str = "weather_preferences.json";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ParseConfig::from_env();
    let preferences_path = std::env::var("WEATHER_PREFERENCES")
        .unwrap_or_else(|_| DEFAULT_PREFERENCES_PATH.to_string());
    let preferences = Arc::new(FilePreferences::new(preferences_path));

    // Serve canned responses instead of calling the server
    if let Ok(dir) = std::env::var("WEATHER_MOCK_DIR") {
        info!(%dir, "using mock responses");
        let transport = MockTransport::from_dir(config, &dir)?;
        run(transport, preferences).await
    } else {
        let transport = ParseClient::new(config)?;
        run(transport, preferences).await
    }
}

async fn run<T: Transport + 'static>(
    transport: T,
    preferences: Arc<FilePreferences>,
) -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let favorite = FavoriteStation::new(Arc::clone(&preferences));

    if let [command, station_id] = args.as_slice()
        && command == "favorite"
    {
        favorite.set(station_id)?;
        info!(%station_id, "favorite station saved");
        return Ok(());
    }

    let service = WeatherService::new(Arc::new(transport), preferences, Handle::current());
    let favorite_id = favorite.get();

    let observations = match args.first() {
        Some(query) => {
            info!(%query, "searching stations");
            let mut results = service.search_default(query);
            match results.next().await {
                Some(result) => result?,
                None => Vec::new(),
            }
        }
        None => {
            let limit = std::env::var("WEATHER_LIMIT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_LIMIT);
            info!(limit, "fetching stations");
            service.fetch_observations(limit, BTreeMap::new()).await?
        }
    };

    info!(count = observations.len(), "received stations");
    for observed in &observations {
        log_station(observed, favorite_id.as_deref());
    }

    Ok(())
}

fn log_station(observed: &WeatherObserved, favorite_id: Option<&str>) {
    let id = observed.object_id().unwrap_or("?");
    let name = observed.name.as_deref().unwrap_or("(unnamed)");
    let favorite = favorite_id.is_some_and(|f| Some(f) == observed.object_id());

    if observed.maintenance == Some(true) {
        warn!(id, name, "station under maintenance");
    }

    let readings: Vec<String> = observed
        .primary_values()
        .into_iter()
        .map(|value| {
            format!(
                "{}={}{}",
                value.name.as_deref().unwrap_or("?"),
                value
                    .value
                    .map(|v| v.to_string())
                    .unwrap_or_else(|| "-".to_string()),
                value.unit.as_deref().unwrap_or("")
            )
        })
        .collect();

    info!(
        id,
        name,
        favorite,
        observed_at = ?observed.date_observed,
        readings = %readings.join(", "),
        "station"
    );
}
