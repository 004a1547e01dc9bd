//! Serde helper functions for user record deserialization.
//!
//! The remote API is loose about absent values: optional strings may come
//! back empty and timestamps may be epoch milliseconds, RFC 3339 strings,
//! or a falsy placeholder. These helpers normalize all of those to `None`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

/// Deserialize an optional string, treating empty strings as None.
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.filter(|s| !s.trim().is_empty()))
}

/// Raw timestamp as the API may send it.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Millis(i64),
    Float(f64),
    Text(String),
    Flag(bool),
}

/// Deserialize an optional timestamp.
///
/// Accepts epoch milliseconds (integer or float) or an RFC 3339 string.
/// Falsy values (`null`, `0`, `""`, `false`) become None.
pub fn deserialize_optional_timestamp<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<RawTimestamp> = Option::deserialize(deserializer)?;
    match raw {
        None | Some(RawTimestamp::Flag(_)) => Ok(None),
        Some(RawTimestamp::Millis(0)) => Ok(None),
        Some(RawTimestamp::Millis(ms)) => DateTime::from_timestamp_millis(ms)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("timestamp out of range: {ms}"))),
        Some(RawTimestamp::Float(ms)) if ms == 0.0 => Ok(None),
        Some(RawTimestamp::Float(ms)) => DateTime::from_timestamp_millis(ms as i64)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("timestamp out of range: {ms}"))),
        Some(RawTimestamp::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(RawTimestamp::Text(s)) => DateTime::parse_from_rfc3339(s.trim())
            .map(|dt| Some(dt.with_timezone(&Utc)))
            .map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    /// Test struct that uses the deserializer functions
    #[derive(Debug, Deserialize, PartialEq)]
    struct TestStruct {
        #[serde(default, deserialize_with = "deserialize_optional_string")]
        string_field: Option<String>,
        #[serde(default, deserialize_with = "deserialize_optional_timestamp")]
        timestamp_field: Option<DateTime<Utc>>,
    }

    #[test]
    fn test_deserialize_optional_string_empty() {
        let json = r#"{"string_field": ""}"#;
        let result: TestStruct = serde_json::from_str(json).unwrap();
        assert_eq!(result.string_field, None);
    }

    #[test]
    fn test_deserialize_optional_string_whitespace() {
        let json = r#"{"string_field": "   "}"#;
        let result: TestStruct = serde_json::from_str(json).unwrap();
        assert_eq!(result.string_field, None);
    }

    #[test]
    fn test_deserialize_optional_string_value() {
        let json = r#"{"string_field": "hello"}"#;
        let result: TestStruct = serde_json::from_str(json).unwrap();
        assert_eq!(result.string_field, Some("hello".to_string()));
    }

    #[test]
    fn test_deserialize_timestamp_millis() {
        let json = r#"{"timestamp_field": 1700000000000}"#;
        let result: TestStruct = serde_json::from_str(json).unwrap();
        assert_eq!(
            result.timestamp_field,
            Some(Utc.timestamp_millis_opt(1_700_000_000_000).unwrap())
        );
    }

    #[test]
    fn test_deserialize_timestamp_rfc3339() {
        let json = r#"{"timestamp_field": "2024-03-01T12:30:00Z"}"#;
        let result: TestStruct = serde_json::from_str(json).unwrap();
        assert_eq!(
            result.timestamp_field,
            Some(Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap())
        );
    }

    #[test]
    fn test_deserialize_timestamp_falsy_values() {
        for json in [
            r#"{"timestamp_field": 0}"#,
            r#"{"timestamp_field": ""}"#,
            r#"{"timestamp_field": null}"#,
            r#"{"timestamp_field": false}"#,
            r#"{}"#,
        ] {
            let result: TestStruct = serde_json::from_str(json).unwrap();
            assert_eq!(result.timestamp_field, None, "input: {json}");
        }
    }

    #[test]
    fn test_deserialize_timestamp_invalid_string() {
        let json = r#"{"timestamp_field": "yesterday"}"#;
        let result: Result<TestStruct, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
