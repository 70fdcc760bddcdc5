//! Try-decode-or-absent helpers.
//!
//! The data service fills its records loosely: fields go missing, change
//! type or hold `null`. Every field decoded through these helpers turns a
//! mismatch into `None` instead of failing the enclosing record.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserialize a field, treating any type mismatch as an absent value.
///
/// Use together with `#[serde(default)]` so a missing key is absent too.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).ok())
}

/// Deserialize a Parse date, treating anything unparseable as absent.
pub(crate) fn lenient_date<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(parse_date(&value))
}

/// Parse a date in either of the shapes Parse uses.
///
/// Built-in columns (`createdAt`, `updatedAt`) are plain ISO-8601 strings;
/// date columns are objects `{"__type": "Date", "iso": "..."}`.
pub(crate) fn parse_date(value: &Value) -> Option<DateTime<Utc>> {
    let iso = match value {
        Value::String(s) => s.as_str(),
        Value::Object(map) => map.get("iso")?.as_str()?,
        _ => return None,
    };

    DateTime::parse_from_rfc3339(iso)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
