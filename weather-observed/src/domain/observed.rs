//! Sensor station observations.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::warn;

use super::lenient::{lenient, lenient_date};
use super::value::MeasurementValue;
use super::values::WeatherValues;

/// A Parse GeoPoint.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// One sensor station and its latest readings.
///
/// Two observations are equal when their object ids are equal; every other
/// field is metadata that may change between fetches. Use the fields
/// directly to compare contents.
///
/// Decoding is tolerant: each field is decoded on its own and a field that
/// is missing or malformed is `None`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherObserved {
    #[serde(default, deserialize_with = "lenient")]
    object_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_date")]
    created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_date")]
    updated_at: Option<DateTime<Utc>>,

    /// Short version of the name.
    #[serde(default, deserialize_with = "lenient")]
    pub short_name: Option<String>,
    /// Name of the station.
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub district: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub city: Option<String>,
    /// URL of an image of the station.
    #[serde(default, deserialize_with = "lenient")]
    pub image: Option<String>,
    /// Name of the data provider.
    #[serde(default, deserialize_with = "lenient")]
    pub data_provider: Option<String>,
    /// URL of the data provider.
    #[serde(default, deserialize_with = "lenient")]
    pub source: Option<String>,
    /// The data provider's own id for the station.
    #[serde(default, deserialize_with = "lenient")]
    pub source_id: Option<String>,
    /// When the readings were taken (UTC).
    #[serde(default, deserialize_with = "lenient_date")]
    pub date_observed: Option<DateTime<Utc>>,
    /// Whether the station is under maintenance.
    #[serde(default, deserialize_with = "lenient")]
    pub maintenance: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub geopoint: Option<GeoPoint>,
    #[serde(default, deserialize_with = "lenient")]
    pub values: Option<WeatherValues>,
    /// Search index id; identical to the object id on search results.
    #[serde(rename = "_id", default, deserialize_with = "lenient")]
    pub elastic_id: Option<String>,
}

impl PartialEq for WeatherObserved {
    fn eq(&self, other: &Self) -> bool {
        self.object_id == other.object_id
    }
}

impl WeatherObserved {
    /// Create an empty observation with the given object id.
    pub fn with_object_id(object_id: impl Into<String>) -> Self {
        Self {
            object_id: Some(object_id.into()),
            ..Self::default()
        }
    }

    /// Decode one raw record.
    ///
    /// Never fails: a record that is not a JSON object decodes as an
    /// observation with every field absent.
    pub fn from_record(record: &serde_json::Value) -> Self {
        if !record.is_object() {
            warn!(kind = json_kind(record), "station record is not an object");
            return Self::default();
        }

        Self::deserialize(record).unwrap_or_else(|e| {
            warn!(error = %e, "failed to decode station record");
            Self::default()
        })
    }

    /// Parse object id of the station.
    pub fn object_id(&self) -> Option<&str> {
        self.object_id.as_deref()
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// Every present value, in slot order.
    pub fn value_list(&self) -> Vec<&MeasurementValue> {
        self.values
            .as_ref()
            .map(|values| values.iter().map(|(_, value)| value).collect())
            .unwrap_or_default()
    }

    /// Present values other than sunrise and sunset.
    pub fn primary_values(&self) -> Vec<&MeasurementValue> {
        self.values
            .as_ref()
            .map(WeatherValues::primary_values)
            .unwrap_or_default()
    }

    /// Present sunrise and sunset values.
    pub fn sun_cycle_values(&self) -> Vec<&MeasurementValue> {
        self.values
            .as_ref()
            .map(WeatherValues::sun_cycle_values)
            .unwrap_or_default()
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MeasurementType;
    use chrono::TimeZone;
    use serde_json::json;

    fn station_record() -> serde_json::Value {
        json!({
            "objectId": "Xk2lP0aBcd",
            "createdAt": "2022-02-10T08:00:00.000Z",
            "updatedAt": "2022-06-21T12:30:00.000Z",
            "shortName": "Mitte",
            "name": "Wetterstation Solingen-Mitte",
            "district": "Mitte",
            "city": "Solingen",
            "image": "https://example.org/stations/mitte.jpg",
            "dataProvider": "Technische Betriebe Solingen",
            "source": "https://example.org",
            "sourceId": "tbs-0815",
            "dateObserved": {"__type": "Date", "iso": "2022-06-21T12:25:00.000Z"},
            "maintenance": false,
            "geopoint": {"__type": "GeoPoint", "latitude": 51.1657, "longitude": 7.0672},
            "values": {
                "lufttemperatur": {"unit": "°C", "value": 22.1, "name": "Temperatur", "type": "lufttemperatur"},
                "relative_luftfeuchte": {"unit": "%", "value": 48.0, "type": "relative_luftfeuchte"},
                "sonnenaufgang": {"name": "Sonnenaufgang", "value": 5.18},
                "sonnenuntergang": {"name": "Sonnenuntergang", "value": 21.49}
            }
        })
    }

    #[test]
    fn decode_full_record() {
        let observed = WeatherObserved::from_record(&station_record());

        assert_eq!(observed.object_id(), Some("Xk2lP0aBcd"));
        assert_eq!(
            observed.created_at(),
            Some(Utc.with_ymd_and_hms(2022, 2, 10, 8, 0, 0).unwrap())
        );
        assert_eq!(
            observed.updated_at(),
            Some(Utc.with_ymd_and_hms(2022, 6, 21, 12, 30, 0).unwrap())
        );
        assert_eq!(observed.short_name.as_deref(), Some("Mitte"));
        assert_eq!(observed.name.as_deref(), Some("Wetterstation Solingen-Mitte"));
        assert_eq!(observed.city.as_deref(), Some("Solingen"));
        assert_eq!(observed.source_id.as_deref(), Some("tbs-0815"));
        assert_eq!(
            observed.date_observed,
            Some(Utc.with_ymd_and_hms(2022, 6, 21, 12, 25, 0).unwrap())
        );
        assert_eq!(observed.maintenance, Some(false));
        assert_eq!(
            observed.geopoint,
            Some(GeoPoint {
                latitude: 51.1657,
                longitude: 7.0672
            })
        );

        assert_eq!(observed.value_list().len(), 4);
        assert_eq!(observed.primary_values().len(), 2);
        assert_eq!(observed.sun_cycle_values().len(), 2);
        assert_eq!(
            observed.primary_values()[0].kind,
            Some(MeasurementType::Temperature)
        );
    }

    #[test]
    fn malformed_fields_are_absent() {
        let observed = WeatherObserved::from_record(&json!({
            "objectId": "abc",
            "name": 42,
            "maintenance": "no",
            "geopoint": {"latitude": "north"},
            "dateObserved": "last tuesday",
            "values": [1, 2, 3]
        }));

        assert_eq!(observed.object_id(), Some("abc"));
        assert!(observed.name.is_none());
        assert!(observed.maintenance.is_none());
        assert!(observed.geopoint.is_none());
        assert!(observed.date_observed.is_none());
        assert!(observed.values.is_none());
        assert!(observed.value_list().is_empty());
    }

    #[test]
    fn non_object_record_is_empty() {
        let observed = WeatherObserved::from_record(&json!("station"));
        assert!(observed.object_id().is_none());
        assert!(observed.values.is_none());
    }

    #[test]
    fn search_result_keeps_elastic_id() {
        let observed = WeatherObserved::from_record(&json!({
            "_id": "Xk2lP0aBcd",
            "objectId": "Xk2lP0aBcd",
            "name": "Mitte"
        }));
        assert_eq!(observed.elastic_id.as_deref(), Some("Xk2lP0aBcd"));
    }

    #[test]
    fn equality_uses_object_id_only() {
        let a = WeatherObserved::from_record(&station_record());
        let mut b = WeatherObserved::with_object_id("Xk2lP0aBcd");
        b.name = Some("Renamed".into());
        assert_eq!(a, b);

        let c = WeatherObserved::with_object_id("other");
        assert_ne!(a, c);
    }

    #[test]
    fn absent_ids_compare_equal() {
        let a = WeatherObserved {
            city: Some("Solingen".into()),
            ..WeatherObserved::default()
        };
        let b = WeatherObserved::default();
        assert_eq!(a, b);

        assert_ne!(a, WeatherObserved::with_object_id("abc"));
    }
}
