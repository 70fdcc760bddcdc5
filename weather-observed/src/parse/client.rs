//! Parse Server HTTP client.
//!
//! Executes class queries and cloud function calls over HTTPS and unwraps
//! the Parse response envelopes (`{"results": [...]}` for classes,
//! `{"result": [...]}` for functions).

use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::Deserialize;
use tracing::{debug, warn};

use super::error::TransportError;
use super::resource::RequestResource;
use super::transport::{RawRecord, Transport};

/// Default base URL of the Parse server.
const DEFAULT_BASE_URL: &str = "https://parse-dev.solingen.de";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Header carrying the Parse application id.
pub const APPLICATION_ID_HEADER: &str = "X-Parse-Application-Id";

/// Header carrying the Parse client key.
pub const CLIENT_KEY_HEADER: &str = "X-Parse-Client-Key";

/// Configuration for the Parse client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseConfig {
    /// Base URL of the Parse server
    pub base_url: String,
    /// Parse application id
    pub application_id: String,
    /// Parse client key
    pub client_key: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl ParseConfig {
    /// Create a new config with the given credentials.
    pub fn new(application_id: impl Into<String>, client_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            application_id: application_id.into(),
            client_key: client_key.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Read the config from `PARSE_BASE_URL`, `PARSE_APPLICATION_ID`,
    /// `PARSE_CLIENT_KEY` and `PARSE_TIMEOUT_SECS`.
    ///
    /// Missing credentials are replaced by empty strings; requests will then
    /// be rejected by the server.
    pub fn from_env() -> Self {
        let application_id = std::env::var("PARSE_APPLICATION_ID").unwrap_or_else(|_| {
            warn!("PARSE_APPLICATION_ID not set, requests will be rejected");
            String::new()
        });
        let client_key = std::env::var("PARSE_CLIENT_KEY").unwrap_or_else(|_| {
            warn!("PARSE_CLIENT_KEY not set, requests will be rejected");
            String::new()
        });

        let mut config = Self::new(application_id, client_key);
        if let Ok(url) = std::env::var("PARSE_BASE_URL") {
            config = config.with_base_url(url);
        }
        if let Some(secs) = std::env::var("PARSE_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
        {
            config = config.with_timeout(secs);
        }
        config
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Authentication headers sent with every request.
    pub fn headers(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            (
                APPLICATION_ID_HEADER.to_string(),
                self.application_id.clone(),
            ),
            (CLIENT_KEY_HEADER.to_string(), self.client_key.clone()),
        ])
    }
}

/// Envelope of a class query response.
#[derive(Debug, Deserialize)]
struct ClassResponse {
    results: Vec<RawRecord>,
}

/// Envelope of a cloud function response.
#[derive(Debug, Deserialize)]
struct FunctionResponse {
    result: Vec<RawRecord>,
}

/// Unwrap the records from a response body.
pub(crate) fn decode_envelope(
    resource: &RequestResource,
    body: &[u8],
) -> Result<Vec<RawRecord>, TransportError> {
    match resource {
        RequestResource::Class { .. } => serde_json::from_slice::<ClassResponse>(body)
            .map(|response| response.results)
            .map_err(TransportError::JsonDecoding),
        RequestResource::Function { .. } => serde_json::from_slice::<FunctionResponse>(body)
            .map(|response| response.result)
            .map_err(TransportError::JsonDecoding),
    }
}

fn header_map(headers: &BTreeMap<String, String>) -> Result<HeaderMap, TransportError> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| TransportError::InvalidRequest(format!("invalid header name {name}")))?;
        let value = HeaderValue::from_str(value).map_err(|_| {
            TransportError::InvalidRequest(format!("invalid value for header {name}"))
        })?;
        map.insert(name, value);
    }
    Ok(map)
}

/// Parse Server API client.
#[derive(Debug, Clone)]
pub struct ParseClient {
    http: reqwest::Client,
    config: ParseConfig,
}

impl ParseClient {
    /// Create a new Parse client with the given configuration.
    pub fn new(config: ParseConfig) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { http, config })
    }

    async fn execute(&self, resource: &RequestResource) -> Result<Vec<RawRecord>, TransportError> {
        let url = resource.url();
        let headers = header_map(resource.headers())?;

        let request = match resource {
            RequestResource::Class { query, .. } => self.http.get(&url).query(query),
            RequestResource::Function { body, .. } => self.http.post(&url).json(body),
        };

        debug!(%url, method = ?resource.method(), "sending Parse request");
        let response = request.headers(headers).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "Parse request failed");
            return Err(TransportError::DataLoading {
                status_code: status.as_u16(),
                data: body.to_vec(),
            });
        }

        let records = decode_envelope(resource, &body)?;
        debug!(%url, count = records.len(), "received Parse records");
        Ok(records)
    }
}

impl Transport for ParseClient {
    fn config(&self) -> &ParseConfig {
        &self.config
    }

    async fn download(
        &self,
        resource: &RequestResource,
    ) -> Result<Vec<RawRecord>, TransportError> {
        self.execute(resource).await
    }

    async fn fetch(&self, resource: &RequestResource) -> Result<Vec<RawRecord>, TransportError> {
        self.execute(resource).await
    }
}
