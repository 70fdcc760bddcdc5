//! Weather observation retrieval.
//!
//! Wraps the Parse transport with request assembly, per-record decoding,
//! error translation and background scheduling.

mod config;
mod service;

pub use config::WeatherConfig;
pub use service::{SESSION_TOKEN_HEADER, WeatherService};
