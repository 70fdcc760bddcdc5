//! A single measurement reading.

use serde::Deserialize;

use super::lenient::lenient;
use super::measurement::MeasurementType;

/// One reading of a sensor station.
///
/// Every field is optional. Decoding never fails on the contents of a
/// reading: a field that is missing or has the wrong type is `None`, and the
/// other fields are decoded regardless.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "RawMeasurementValue")]
pub struct MeasurementValue {
    /// Unit of `value` (e.g. "°C", "km/h").
    pub unit: Option<String>,
    /// The measured number.
    pub value: Option<f64>,
    /// Display name of the reading.
    pub name: Option<String>,
    /// URL of an icon for the reading.
    pub icon_url: Option<String>,
    /// Classified kind of the reading.
    pub kind: Option<MeasurementType>,
}

/// Wire shape of a reading; `type` is the source channel name.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMeasurementValue {
    #[serde(default, deserialize_with = "lenient")]
    unit: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    value: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    icon_url: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "lenient")]
    type_name: Option<String>,
}

impl From<RawMeasurementValue> for MeasurementValue {
    fn from(raw: RawMeasurementValue) -> Self {
        Self {
            unit: raw.unit,
            value: raw.value,
            name: raw.name,
            icon_url: raw.icon_url,
            kind: raw.type_name.as_deref().and_then(MeasurementType::from_name),
        }
    }
}

impl MeasurementValue {
    /// Create a reading, classifying `type_name` like a decoded `type` field.
    pub fn new(
        unit: Option<String>,
        value: Option<f64>,
        name: Option<String>,
        type_name: Option<&str>,
        icon_url: Option<String>,
    ) -> Self {
        Self {
            unit,
            value,
            name,
            icon_url,
            kind: type_name.and_then(MeasurementType::from_name),
        }
    }

    /// Replace the classified kind.
    pub fn with_kind(mut self, kind: MeasurementType) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Whether no field at all was decoded.
    pub fn is_empty(&self) -> bool {
        self.unit.is_none()
            && self.value.is_none()
            && self.name.is_none()
            && self.icon_url.is_none()
            && self.kind.is_none()
    }
}

/// Sun-cycle partitioning of a flat list of readings, by their kind.
pub trait MeasurementViews {
    /// Readings that are not sunrise or sunset.
    fn primary_values(&self) -> Vec<&MeasurementValue>;

    /// Sunrise and sunset readings.
    fn sun_cycle_values(&self) -> Vec<&MeasurementValue>;
}

impl MeasurementViews for [MeasurementValue] {
    fn primary_values(&self) -> Vec<&MeasurementValue> {
        self.iter()
            .filter(|v| !v.kind.is_some_and(|kind| kind.is_sun_cycle()))
            .collect()
    }

    fn sun_cycle_values(&self) -> Vec<&MeasurementValue> {
        self.iter()
            .filter(|v| v.kind.is_some_and(|kind| kind.is_sun_cycle()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode(value: serde_json::Value) -> MeasurementValue {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn decode_complete_value() {
        let value = decode(json!({
            "unit": "°C",
            "value": 21.4,
            "name": "Lufttemperatur",
            "iconUrl": "https://example.org/icons/temperature.png",
            "type": "lufttemperatur"
        }));

        assert_eq!(value.unit.as_deref(), Some("°C"));
        assert_eq!(value.value, Some(21.4));
        assert_eq!(value.name.as_deref(), Some("Lufttemperatur"));
        assert_eq!(
            value.icon_url.as_deref(),
            Some("https://example.org/icons/temperature.png")
        );
        assert_eq!(value.kind, Some(MeasurementType::Temperature));
    }

    #[test]
    fn integer_value_decodes_as_double() {
        let value = decode(json!({"value": 3}));
        assert_eq!(value.value, Some(3.0));
    }

    #[test]
    fn missing_fields_are_absent() {
        let value = decode(json!({"unit": "%", "value": 65.0}));

        assert_eq!(value.unit.as_deref(), Some("%"));
        assert_eq!(value.value, Some(65.0));
        assert!(value.name.is_none());
        assert!(value.icon_url.is_none());
        assert!(value.kind.is_none());
    }

    #[test]
    fn bad_fields_do_not_block_others() {
        let value = decode(json!({
            "unit": 7,
            "value": "hoch",
            "name": "Windrichtung",
            "iconUrl": ["a", "b"],
            "type": "windrichtung"
        }));

        assert!(value.unit.is_none());
        assert!(value.value.is_none());
        assert!(value.icon_url.is_none());
        assert_eq!(value.name.as_deref(), Some("Windrichtung"));
        assert_eq!(value.kind, Some(MeasurementType::WindDirection));
    }

    #[test]
    fn empty_object_is_empty_value() {
        let value = decode(json!({}));
        assert!(value.is_empty());
        assert_eq!(value, MeasurementValue::default());
    }

    #[test]
    fn unknown_type_is_unclassified() {
        let value = decode(json!({"value": 12.0, "type": "feinstaub_pm10"}));
        assert_eq!(value.value, Some(12.0));
        assert!(value.kind.is_none());
    }

    #[test]
    fn non_object_fails_to_decode() {
        assert!(serde_json::from_value::<MeasurementValue>(json!(21.4)).is_err());
        assert!(serde_json::from_value::<MeasurementValue>(json!("warm")).is_err());
    }

    #[test]
    fn new_classifies_type_name() {
        let value = MeasurementValue::new(
            Some("km/h".into()),
            Some(12.0),
            None,
            Some("WINDGESCHWINDIGKEIT_KMH"),
            None,
        );
        assert_eq!(value.kind, Some(MeasurementType::WindSpeed));
    }

    #[test]
    fn equality_is_structural() {
        let a = MeasurementValue::new(Some("%".into()), Some(50.0), None, None, None);
        let b = MeasurementValue::new(Some("%".into()), Some(50.0), None, None, None);
        assert_eq!(a, b);

        assert_ne!(a.clone(), b.clone().with_kind(MeasurementType::Humidity));

        let mut c = a.clone();
        c.icon_url = Some("icon".into());
        assert_ne!(a, c);
    }

    #[test]
    fn views_split_by_kind() {
        let values = vec![
            MeasurementValue::default().with_kind(MeasurementType::Temperature),
            MeasurementValue::default().with_kind(MeasurementType::Sunrise),
            MeasurementValue::default(),
            MeasurementValue::default().with_kind(MeasurementType::Sunset),
        ];

        assert_eq!(values.primary_values().len(), 2);
        assert_eq!(values.sun_cycle_values().len(), 2);
        assert_eq!(
            values.sun_cycle_values()[0].kind,
            Some(MeasurementType::Sunrise)
        );
    }
}
