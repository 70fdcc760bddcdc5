//! Parse transport error types.

/// Errors from the Parse transport.
///
/// These are the transport's own failure categories. Callers of the
/// weather service never see them directly; they are translated into
/// [`WeatherError`](crate::domain::WeatherError) first.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The request could not be built (bad header, bad URL, ...)
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The response could not be read
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// The server answered with a non-success status code
    #[error("data loading failed with status {status_code} ({} bytes)", .data.len())]
    DataLoading { status_code: u16, data: Vec<u8> },

    /// The response body was not the expected JSON envelope
    #[error("JSON decoding failed: {0}")]
    JsonDecoding(#[source] serde_json::Error),

    /// The server could not be reached at all
    #[error("no internet connection")]
    NoInternetConnection,

    /// Any other network failure (timeouts, redirects, ...)
    #[error("network error: {0}")]
    Network(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() {
            TransportError::NoInternetConnection
        } else if err.is_timeout() {
            TransportError::Network(err.to_string())
        } else if err.is_builder() || err.is_request() {
            TransportError::InvalidRequest(err.to_string())
        } else if err.is_body() || err.is_decode() {
            TransportError::InvalidResponse(err.to_string())
        } else {
            TransportError::Network(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = TransportError::DataLoading {
            status_code: 500,
            data: b"server error".to_vec(),
        };
        assert_eq!(err.to_string(), "data loading failed with status 500 (12 bytes)");

        let err = TransportError::NoInternetConnection;
        assert_eq!(err.to_string(), "no internet connection");

        let err = TransportError::InvalidRequest("bad header".into());
        assert_eq!(err.to_string(), "invalid request: bad header");

        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = TransportError::JsonDecoding(json_err);
        assert!(err.to_string().starts_with("JSON decoding failed"));
    }

    #[test]
    fn json_error_has_source() {
        use std::error::Error;

        let json_err = serde_json::from_str::<serde_json::Value>("[1,").unwrap_err();
        let err = TransportError::JsonDecoding(json_err);
        assert!(err.source().is_some());
        assert!(TransportError::NoInternetConnection.source().is_none());
    }
}
