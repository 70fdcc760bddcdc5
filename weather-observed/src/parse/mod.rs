//! Parse Server transport.
//!
//! The weather observations live in a Parse Server. This module provides
//! the request resources the service understands, a [`Transport`] trait
//! executing them, an HTTP implementation and a mock.
//!
//! Key characteristics of the Parse REST API:
//! - Every request carries the application id and client key headers;
//!   a logged-in user adds a session token
//! - Class queries answer `{"results": [...]}`, cloud functions
//!   answer `{"result": [...]}`

mod client;
mod error;
mod mock;
mod resource;
mod transport;

pub use client::{APPLICATION_ID_HEADER, CLIENT_KEY_HEADER, ParseClient, ParseConfig};
pub use error::TransportError;
pub use mock::{MockResponse, MockTransport};
pub use resource::{
    ELASTIC_SEARCH_FUNCTION, ElasticSearchQuery, Method, RequestResource, WEATHER_OBSERVED_CLASS,
};
pub use transport::{RawRecord, Transport};
