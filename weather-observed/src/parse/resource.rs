//! Request resources for the Parse REST API.
//!
//! A resource describes one request completely: where it goes, which
//! headers it carries and which parameters or body it sends. The weather
//! service builds resources; a [`Transport`](super::Transport) executes them.

use std::collections::BTreeMap;

use serde::Serialize;

/// Parse class holding the sensor station observations.
pub const WEATHER_OBSERVED_CLASS: &str = "WeatherObserved";

/// Cloud function running a full-text search over an index.
pub const ELASTIC_SEARCH_FUNCTION: &str = "elastic-search";

/// HTTP method of a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// Body of the `elastic-search` cloud function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ElasticSearchQuery {
    /// Name of the search index (e.g. "weather_observed").
    pub index: String,
    /// Free-text query.
    pub query: String,
}

/// A request against the Parse server.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestResource {
    /// `GET {base_url}/classes/{class_name}` with query parameters.
    Class {
        base_url: String,
        class_name: String,
        headers: BTreeMap<String, String>,
        query: BTreeMap<String, String>,
    },

    /// `POST {base_url}/functions/{function_name}` with a JSON body.
    Function {
        base_url: String,
        function_name: String,
        headers: BTreeMap<String, String>,
        body: ElasticSearchQuery,
    },
}

impl RequestResource {
    /// Class query for weather observations.
    ///
    /// ```console
    /// curl -vX GET \
    ///   -H "X-Parse-Application-Id: <APP_ID>" \
    ///   -H "X-Parse-Client-Key: <CLIENT_KEY>" \
    ///   'https://parse-dev.solingen.de/classes/WeatherObserved?limit=1'
    /// ```
    pub fn weather_observed(
        base_url: impl Into<String>,
        headers: BTreeMap<String, String>,
        query: BTreeMap<String, String>,
    ) -> Self {
        RequestResource::Class {
            base_url: base_url.into(),
            class_name: WEATHER_OBSERVED_CLASS.to_string(),
            headers,
            query,
        }
    }

    /// Cloud function call searching weather observations.
    ///
    /// ```console
    /// curl -vX POST 'https://parse-dev.solingen.de/functions/elastic-search' \
    ///   -H "X-Parse-Application-Id: <APP_ID>" \
    ///   -H "X-Parse-Client-Key: <CLIENT_KEY>" \
    ///   -H 'Content-Type: application/json' \
    ///   -d '{"index":"weather_observed","query":"Mitte"}'
    /// ```
    pub fn elastic_search(
        base_url: impl Into<String>,
        headers: BTreeMap<String, String>,
        body: ElasticSearchQuery,
    ) -> Self {
        RequestResource::Function {
            base_url: base_url.into(),
            function_name: ELASTIC_SEARCH_FUNCTION.to_string(),
            headers,
            body,
        }
    }

    pub fn method(&self) -> Method {
        match self {
            RequestResource::Class { .. } => Method::Get,
            RequestResource::Function { .. } => Method::Post,
        }
    }

    /// Full request URL, without query parameters.
    pub fn url(&self) -> String {
        match self {
            RequestResource::Class {
                base_url,
                class_name,
                ..
            } => format!("{}/classes/{}", base_url.trim_end_matches('/'), class_name),
            RequestResource::Function {
                base_url,
                function_name,
                ..
            } => format!(
                "{}/functions/{}",
                base_url.trim_end_matches('/'),
                function_name
            ),
        }
    }

    pub fn headers(&self) -> &BTreeMap<String, String> {
        match self {
            RequestResource::Class { headers, .. } | RequestResource::Function { headers, .. } => {
                headers
            }
        }
    }

    /// Query parameters (empty for function calls).
    pub fn query(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            RequestResource::Class { query, .. } => Some(query),
            RequestResource::Function { .. } => None,
        }
    }

    /// Function body (absent for class queries).
    pub fn body(&self) -> Option<&ElasticSearchQuery> {
        match self {
            RequestResource::Class { .. } => None,
            RequestResource::Function { body, .. } => Some(body),
        }
    }
}
