//! Timestamp parsing for backend payloads
//!
//! The backend emits naive ISO-8601 timestamps (`2024-01-15T10:30:00.123456`)
//! that are implicitly UTC. RFC 3339 values with an offset are accepted too.

use crate::error::{TypeError, TypeResult};
use chrono::{DateTime, NaiveDateTime, Utc};

const NAIVE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Parse a backend timestamp into UTC
pub fn parse(value: &str) -> TypeResult<DateTime<Utc>> {
    let trimmed = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(trimmed, NAIVE_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|_| TypeError::InvalidTimestamp {
            value: value.to_string(),
        })
}

/// Serde adapter for `Option<DateTime<Utc>>` fields
pub mod option {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    /// Serialize as RFC 3339, or `null`
    #[allow(clippy::ref_option)]
    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(timestamp) => serializer.serialize_str(&timestamp.to_rfc3339()),
            None => serializer.serialize_none(),
        }
    }

    /// Deserialize from a naive or RFC 3339 string, or `null`
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer)?
            .filter(|raw| !raw.trim().is_empty())
            .map(|raw| super::parse(&raw).map_err(serde::de::Error::custom))
            .transpose()
    }
}
