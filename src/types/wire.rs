//! Serde helpers for the agent's JSON encoding.
//!
//! The agent is written in Go, so its JSON has a few quirks:
//! nil slices encode as `null`, durations encode as integer nanoseconds,
//! and unset timestamps encode as `0001-01-01T00:00:00Z`.

use std::fmt;
use std::time::Duration;

use serde::de::{self, Deserializer, Unexpected, Visitor};
use serde::{Deserialize, Serialize, Serializer};

/// Unix timestamp of Go's zero `time.Time`.
const GO_ZERO_TIME_SECS: i64 = -62_135_596_800;

/// Longest duration Go can represent: `time.Duration` is an `int64` of
/// nanoseconds.
const GO_MAX_DURATION_NANOS: f64 = i64::MAX as f64;

/// Decodes `null` as the type's default (e.g. an empty `Vec`).
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Parses a Go duration string such as `"1h30m"`, `"1.5s"` or `"250ms"`.
///
/// Returns `None` for negative, malformed or out-of-range input.
pub(crate) fn parse_go_duration(input: &str) -> Option<Duration> {
    let input = input.trim();
    if input == "0" {
        return Some(Duration::ZERO);
    }
    if input.is_empty() {
        return None;
    }

    let mut rest = input.strip_prefix('+').unwrap_or(input);
    let mut total_nanos = 0f64;

    while !rest.is_empty() {
        let number_end = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        if number_end == 0 {
            return None;
        }
        let value: f64 = rest[..number_end].parse().ok()?;
        rest = &rest[number_end..];

        let unit_end = rest
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(rest.len());
        let scale = match &rest[..unit_end] {
            "ns" => 1.0,
            "us" | "µs" | "μs" => 1e3,
            "ms" => 1e6,
            "s" => 1e9,
            "m" => 60e9,
            "h" => 3600e9,
            _ => return None,
        };
        rest = &rest[unit_end..];
        total_nanos += value * scale;
    }

    let total_nanos = total_nanos.round();
    if !total_nanos.is_finite() || total_nanos > GO_MAX_DURATION_NANOS {
        return None;
    }
    Some(Duration::from_nanos(total_nanos as u64))
}

/// `Option<Duration>` as Go `time.Duration`: integer nanoseconds on the way
/// out, integer nanoseconds or a duration string on the way in. Zero
/// decodes as `None`.
pub(crate) mod go_duration {
    use super::*;

    pub(crate) fn serialize<S>(value: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(duration) => {
                let nanos = i64::try_from(duration.as_nanos()).unwrap_or(i64::MAX);
                serializer.serialize_i64(nanos)
            }
            None => serializer.serialize_none(),
        }
    }

    pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_option(DurationVisitor)
    }

    struct DurationVisitor;

    fn non_zero(duration: Duration) -> Option<Duration> {
        (!duration.is_zero()).then_some(duration)
    }

    impl<'de> Visitor<'de> for DurationVisitor {
        type Value = Option<Duration>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a duration in nanoseconds or a Go duration string")
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_any(self)
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
            Ok(non_zero(Duration::from_nanos(value)))
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
            let nanos = u64::try_from(value)
                .map_err(|_| E::invalid_value(Unexpected::Signed(value), &self))?;
            self.visit_u64(nanos)
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            if value.is_empty() {
                return Ok(None);
            }
            parse_go_duration(value)
                .map(non_zero)
                .ok_or_else(|| E::invalid_value(Unexpected::Str(value), &self))
        }
    }
}

/// `Option<DateTime<Utc>>` where Go's zero time decodes as `None`.
pub(crate) mod go_time {
    use chrono::{DateTime, Utc};

    use super::*;

    pub(crate) fn serialize<S>(
        value: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        value.serialize(serializer)
    }

    pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<DateTime<Utc>>::deserialize(deserializer)?;
        Ok(value.filter(|time| time.timestamp() > GO_ZERO_TIME_SECS))
    }
}
