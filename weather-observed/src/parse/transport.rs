//! The transport seam between the weather service and the network.

use std::future::Future;

use super::client::ParseConfig;
use super::error::TransportError;
use super::resource::RequestResource;

/// One record as returned by the data service, not yet decoded.
pub type RawRecord = serde_json::Value;

/// Executes [`RequestResource`]s against a Parse server.
///
/// This abstraction allows the weather service to be tested with canned
/// responses (see [`MockTransport`](super::MockTransport)).
pub trait Transport: Send + Sync {
    /// Connection settings: base URL and application credentials.
    fn config(&self) -> &ParseConfig;

    /// Run a class query and return the records of its `results` array.
    fn download(
        &self,
        resource: &RequestResource,
    ) -> impl Future<Output = Result<Vec<RawRecord>, TransportError>> + Send;

    /// Call a cloud function and return the records of its `result` array.
    fn fetch(
        &self,
        resource: &RequestResource,
    ) -> impl Future<Output = Result<Vec<RawRecord>, TransportError>> + Send;
}
