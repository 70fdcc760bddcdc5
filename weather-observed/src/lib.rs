//! Weather station observations from a Parse server.
//!
//! Fetches and searches sensor station records, decodes their loosely
//! typed measurement payloads into [`domain::WeatherObserved`], and keeps
//! track of the user's favorite station.

pub mod domain;
pub mod favorite;
pub mod parse;
pub mod preferences;
pub mod weather;
