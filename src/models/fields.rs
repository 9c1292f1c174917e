//! Lenient field accessors for JSON objects

use super::enums::{ApiEnum, EnumValue};
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;

/// String field; numeric values are rendered (Graph ids are sometimes numbers)
pub(crate) fn string_field(value: &Value, key: &str) -> Option<String> {
    match value.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Unsigned integer field, also accepting numeric strings
pub(crate) fn u64_field(value: &Value, key: &str) -> Option<u64> {
    match value.get(key)? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

/// Boolean field, also accepting "true"/"false"
pub(crate) fn bool_field(value: &Value, key: &str) -> Option<bool> {
    match value.get(key)? {
        Value::Bool(b) => Some(*b),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

pub(crate) fn enum_field<E: ApiEnum>(value: &Value, key: &str) -> Option<EnumValue<E>> {
    value.get(key)?.as_str().map(EnumValue::parse)
}

pub(crate) fn timestamp_field(value: &Value, key: &str) -> Option<DateTime<Utc>> {
    parse_timestamp(value.get(key)?)
}

/// Parse an API timestamp
///
/// Accepts unix seconds, RFC 3339, and the Graph form with a `+0000`
/// offset. Anything else is `None`.
pub fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Number(n) => Utc.timestamp_opt(n.as_i64()?, 0).single(),
        Value::String(s) => {
            if let Ok(seconds) = s.parse::<i64>() {
                return Utc.timestamp_opt(seconds, 0).single();
            }
            DateTime::parse_from_rfc3339(s)
                .or_else(|_| DateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%z"))
                .map(|dt| dt.with_timezone(&Utc))
                .ok()
                .or_else(|| {
                    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
                        .ok()
                        .map(|naive| naive.and_utc())
                })
        }
        _ => None,
    }
}
