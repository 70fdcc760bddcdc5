//! Domain types for weather station observations.
//!
//! This module contains the decoded form of the data service's records.
//! Decoding is tolerant by construction: a malformed field becomes `None`
//! and never fails the record around it.

mod error;
mod lenient;
mod measurement;
mod observed;
mod value;
mod values;

pub use error::WeatherError;
pub use measurement::MeasurementType;
pub use observed::{GeoPoint, WeatherObserved};
pub use value::{MeasurementValue, MeasurementViews};
pub use values::{Slot, WeatherValues};
