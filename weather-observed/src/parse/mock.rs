//! Mock Parse transport for testing without server access.
//!
//! Serves canned responses and records every resource it is asked to
//! execute, so tests can inspect the headers and parameters that were sent.

use std::path::Path;
use std::sync::Mutex;

use super::client::{ParseConfig, decode_envelope};
use super::error::TransportError;
use super::resource::{
    ELASTIC_SEARCH_FUNCTION, ElasticSearchQuery, RequestResource, WEATHER_OBSERVED_CLASS,
};
use super::transport::{RawRecord, Transport};

/// A canned answer of the mock transport.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Succeed with these records.
    Records(Vec<RawRecord>),
    /// Fail with a non-success HTTP status and body.
    Status { status_code: u16, body: Vec<u8> },
    /// Fail as if the body could not be decoded.
    Malformed(String),
    /// Fail as if the server could not be reached.
    Offline,
}

impl MockResponse {
    fn respond(&self, resource: &RequestResource) -> Result<Vec<RawRecord>, TransportError> {
        match self {
            MockResponse::Records(records) => Ok(records.clone()),
            MockResponse::Status { status_code, body } => Err(TransportError::DataLoading {
                status_code: *status_code,
                data: body.clone(),
            }),
            MockResponse::Malformed(body) => decode_envelope(resource, body.as_bytes()),
            MockResponse::Offline => Err(TransportError::NoInternetConnection),
        }
    }
}

/// Mock transport serving canned class and function responses.
#[derive(Debug)]
pub struct MockTransport {
    config: ParseConfig,
    class_response: MockResponse,
    function_response: MockResponse,
    requests: Mutex<Vec<RequestResource>>,
}

impl MockTransport {
    /// Create a mock that answers every request with no records.
    pub fn new(config: ParseConfig) -> Self {
        Self {
            config,
            class_response: MockResponse::Records(Vec::new()),
            function_response: MockResponse::Records(Vec::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Create a mock by loading response bodies from a directory.
    ///
    /// Expects `WeatherObserved.json` (a class query response) and/or
    /// `elastic-search.json` (a cloud function response). Missing files
    /// leave the corresponding response empty.
    pub fn from_dir(config: ParseConfig, data_dir: impl AsRef<Path>) -> Result<Self, TransportError> {
        let data_dir = data_dir.as_ref();
        let mut mock = Self::new(config);

        let class_path = data_dir.join(format!("{WEATHER_OBSERVED_CLASS}.json"));
        if class_path.is_file() {
            let resource = RequestResource::weather_observed(
                mock.config.base_url.clone(),
                Default::default(),
                Default::default(),
            );
            mock.class_response = MockResponse::Records(load_records(&class_path, &resource)?);
        }

        let function_path = data_dir.join(format!("{ELASTIC_SEARCH_FUNCTION}.json"));
        if function_path.is_file() {
            let resource = RequestResource::elastic_search(
                mock.config.base_url.clone(),
                Default::default(),
                ElasticSearchQuery {
                    index: String::new(),
                    query: String::new(),
                },
            );
            mock.function_response =
                MockResponse::Records(load_records(&function_path, &resource)?);
        }

        Ok(mock)
    }

    /// Set the answer to class queries.
    pub fn with_class_response(mut self, response: MockResponse) -> Self {
        self.class_response = response;
        self
    }

    /// Set the answer to cloud function calls.
    pub fn with_function_response(mut self, response: MockResponse) -> Self {
        self.function_response = response;
        self
    }

    /// All resources executed so far, oldest first.
    pub fn requests(&self) -> Vec<RequestResource> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Number of resources executed so far.
    pub fn request_count(&self) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    fn record(&self, resource: &RequestResource) {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(resource.clone());
    }

    fn respond(&self, resource: &RequestResource) -> Result<Vec<RawRecord>, TransportError> {
        self.record(resource);
        match resource {
            RequestResource::Class { .. } => self.class_response.respond(resource),
            RequestResource::Function { .. } => self.function_response.respond(resource),
        }
    }
}

fn load_records(path: &Path, resource: &RequestResource) -> Result<Vec<RawRecord>, TransportError> {
    let body = std::fs::read(path).map_err(|e| {
        TransportError::InvalidResponse(format!("failed to read {}: {}", path.display(), e))
    })?;
    decode_envelope(resource, &body)
}

impl Transport for MockTransport {
    fn config(&self) -> &ParseConfig {
        &self.config
    }

    async fn download(
        &self,
        resource: &RequestResource,
    ) -> Result<Vec<RawRecord>, TransportError> {
        self.respond(resource)
    }

    async fn fetch(&self, resource: &RequestResource) -> Result<Vec<RawRecord>, TransportError> {
        self.respond(resource)
    }
}
