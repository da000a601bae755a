//! Serde helpers for the optional election window bounds.
//!
//! Bounds are always written as RFC 3339 UTC. On the way in we also accept the
//! `YYYY-MM-DDTHH:MM[:SS]` form produced by an HTML `datetime-local` input,
//! which carries no offset and is taken to be UTC.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

const LOCAL_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];

/// Parse a window bound from either supported textual form.
pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(datetime) = DateTime::parse_from_rfc3339(raw) {
        return Some(datetime.with_timezone(&Utc));
    }
    LOCAL_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| Utc.from_utc_datetime(&naive))
}

pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(datetime) => serializer.serialize_some(&datetime.to_rfc3339()),
        None => serializer.serialize_none(),
    }
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        // The dashboard clears a bound by submitting an empty input.
        Some(raw) if raw.is_empty() => Ok(None),
        Some(raw) => parse(&raw)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("invalid timestamp: {raw:?}"))),
        None => Ok(None),
    }
}

/// Deserializer for patch fields, where an absent field (`None`) must be told
/// apart from an explicit `null` (`Some(None)`). Use with `#[serde(default)]`.
pub fn deserialize_patch<'de, D>(deserializer: D) -> Result<Option<Option<DateTime<Utc>>>, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize(deserializer).map(Some)
}
