//! Domain error types.
//!
//! These are the only errors callers of the weather service see. Transport
//! failures are translated into them; decoding problems inside a record
//! never are (they only make fields absent).

use crate::parse::TransportError;

/// Errors surfaced by weather observation retrieval.
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    /// The request could not be built
    #[error("network problem: invalid request")]
    InvalidRequest,

    /// The response could not be read
    #[error("network problem: invalid response")]
    InvalidResponse,

    /// The server answered with a non-success status
    #[error(
        "network problem: data loading failed with status code {status_code}: {}",
        String::from_utf8_lossy(.data)
    )]
    DataLoading { status_code: u16, data: Vec<u8> },

    /// The response was not the expected JSON
    #[error("{}", json_decoding_message(&**.0))]
    JsonDecoding(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The server could not be reached
    #[error("network problem: internet connection failure")]
    NoInternetConnection,

    /// Any other network failure
    #[error("unspecified network problem")]
    Network,
}

/// Full decoding detail in debug builds, a generic message otherwise.
fn json_decoding_message(error: &(dyn std::error::Error + Send + Sync)) -> String {
    if cfg!(debug_assertions) {
        format!("network problem: JSON decoding: {error}")
    } else {
        "network problem with JSON decoding".to_string()
    }
}

impl From<TransportError> for WeatherError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::InvalidRequest(_) => WeatherError::InvalidRequest,
            TransportError::InvalidResponse(_) => WeatherError::InvalidResponse,
            TransportError::DataLoading { status_code, data } => {
                WeatherError::DataLoading { status_code, data }
            }
            TransportError::JsonDecoding(e) => WeatherError::JsonDecoding(Box::new(e)),
            TransportError::NoInternetConnection => WeatherError::NoInternetConnection,
            TransportError::Network(_) => WeatherError::Network,
        }
    }
}

/// Decoding failures are all equal to each other; data loading failures
/// compare status code and payload bytes.
impl PartialEq for WeatherError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (WeatherError::InvalidRequest, WeatherError::InvalidRequest) => true,
            (WeatherError::InvalidResponse, WeatherError::InvalidResponse) => true,
            (
                WeatherError::DataLoading {
                    status_code: lhs_status,
                    data: lhs_data,
                },
                WeatherError::DataLoading {
                    status_code: rhs_status,
                    data: rhs_data,
                },
            ) => lhs_status == rhs_status && lhs_data == rhs_data,
            (WeatherError::JsonDecoding(_), WeatherError::JsonDecoding(_)) => true,
            (WeatherError::NoInternetConnection, WeatherError::NoInternetConnection) => true,
            (WeatherError::Network, WeatherError::Network) => true,
            _ => false,
        }
    }
}
