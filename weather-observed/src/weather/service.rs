//! Observation retrieval.
//!
//! [`WeatherService`] builds Parse requests, runs them through a
//! [`Transport`], decodes the returned records and translates transport
//! failures into [`WeatherError`].
//!
//! Both operations run the request and decoding on the background runtime.
//! They differ in delivery:
//!
//! - [`WeatherService::fetch_observations`] hands the result back to the
//!   task that awaits it, which is the completion context.
//! - [`WeatherService::search_observations`] yields the background task's
//!   output as the stream's single item, with no hand-back step. Callers
//!   that need the result on a particular task must forward it themselves.

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;

use futures::StreamExt;
use futures::stream::{self, BoxStream};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::domain::{WeatherError, WeatherObserved};
use crate::parse::{ElasticSearchQuery, RawRecord, RequestResource, Transport, TransportError};
use crate::preferences::{Preferences, SESSION_TOKEN_KEY};

use super::config::WeatherConfig;

/// Header carrying the Parse session token.
pub const SESSION_TOKEN_HEADER: &str = "X-Parse-Session-Token";

/// Query parameter limiting the number of returned records.
const LIMIT_PARAMETER: &str = "limit";

/// Aborts the wrapped task when the awaiting future is dropped.
struct AbortOnDrop<T>(JoinHandle<T>);

impl<T> Drop for AbortOnDrop<T> {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// Retrieves weather station observations from a Parse server.
#[derive(Debug)]
pub struct WeatherService<T, P> {
    transport: Arc<T>,
    preferences: Arc<P>,
    config: WeatherConfig,
    background: Handle,
}

impl<T, P> WeatherService<T, P>
where
    T: Transport + 'static,
    P: Preferences,
{
    /// Create a service that downloads on the `background` runtime.
    pub fn new(transport: Arc<T>, preferences: Arc<P>, background: Handle) -> Self {
        Self {
            transport,
            preferences,
            config: WeatherConfig::default(),
            background,
        }
    }

    /// Replace the retrieval configuration.
    pub fn with_config(mut self, config: WeatherConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &WeatherConfig {
        &self.config
    }

    /// Download up to `limit` observations.
    ///
    /// `query` is sent as additional query parameters; a `limit` entry in it
    /// is replaced. The persisted session token, if any, is sent along.
    ///
    /// Dropping the returned future aborts the download.
    pub async fn fetch_observations(
        &self,
        limit: usize,
        query: BTreeMap<String, String>,
    ) -> Result<Vec<WeatherObserved>, WeatherError> {
        let resource = self.observations_resource(limit, query);
        debug!(limit, url = %resource.url(), "fetching weather observations");

        let transport = Arc::clone(&self.transport);
        let work = async move { transport.download(&resource).await };
        run_in_background(&self.background, work)
            .await
            .inspect_err(|e| warn!(error = %e, "failed to fetch weather observations"))
    }

    /// Download up to the configured default number of observations.
    pub async fn fetch_default_observations(&self) -> Result<Vec<WeatherObserved>, WeatherError> {
        self.fetch_observations(self.config.default_limit, BTreeMap::new())
            .await
    }

    /// Full-text search of observations in the search index `index`.
    ///
    /// An empty `query` or `index` yields a stream that ends immediately,
    /// without a request. Otherwise the stream yields exactly one item: the
    /// decoded results or the translated failure.
    ///
    /// The request starts on the background runtime when the stream is first
    /// polled. Dropping the stream aborts it.
    pub fn search_observations(
        &self,
        query: &str,
        index: &str,
    ) -> BoxStream<'static, Result<Vec<WeatherObserved>, WeatherError>> {
        if query.is_empty() || index.is_empty() {
            debug!(query, index, "skipping search with empty query or index");
            return stream::empty().boxed();
        }

        let config = self.transport.config();
        let resource = RequestResource::elastic_search(
            config.base_url.clone(),
            config.headers(),
            ElasticSearchQuery {
                index: index.to_string(),
                query: query.to_string(),
            },
        );
        debug!(query, index, "searching weather observations");

        let transport = Arc::clone(&self.transport);
        let background = self.background.clone();
        stream::once(async move {
            let work = async move { transport.fetch(&resource).await };
            run_in_background(&background, work)
                .await
                .inspect_err(|e| warn!(error = %e, "weather observation search failed"))
        })
        .boxed()
    }

    /// Search the configured default index.
    pub fn search_default(
        &self,
        query: &str,
    ) -> BoxStream<'static, Result<Vec<WeatherObserved>, WeatherError>> {
        self.search_observations(query, &self.config.search_index)
    }

    fn observations_resource(
        &self,
        limit: usize,
        mut query: BTreeMap<String, String>,
    ) -> RequestResource {
        query.insert(LIMIT_PARAMETER.to_string(), limit.to_string());

        let config = self.transport.config();
        let mut headers = config.headers();
        if let Some(token) = self.preferences.get(SESSION_TOKEN_KEY) {
            headers.insert(SESSION_TOKEN_HEADER.to_string(), token);
        }

        RequestResource::weather_observed(config.base_url.clone(), headers, query)
    }
}

/// Run a transport call and decode its records on `background`.
///
/// The spawned task is aborted if the returned future is dropped. A task
/// that panics or is cancelled yields [`WeatherError::Network`].
async fn run_in_background<F>(
    background: &Handle,
    work: F,
) -> Result<Vec<WeatherObserved>, WeatherError>
where
    F: Future<Output = Result<Vec<RawRecord>, TransportError>> + Send + 'static,
{
    let mut task = AbortOnDrop(
        background.spawn(async move { work.await.map(|records| decode_records(&records)) }),
    );

    match (&mut task.0).await {
        Ok(result) => result.map_err(WeatherError::from),
        Err(e) => {
            warn!(error = %e, "weather observation task did not complete");
            Err(WeatherError::Network)
        }
    }
}

fn decode_records(records: &[RawRecord]) -> Vec<WeatherObserved> {
    let observations: Vec<_> = records.iter().map(WeatherObserved::from_record).collect();
    debug!(count = observations.len(), "decoded weather observations");
    observations
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
