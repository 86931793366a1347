//! Wire codec for timestamps.
//!
//! Timestamps go out as RFC 3339 UTC with millisecond precision
//! (`2024-03-15T00:00:00.000Z`), or microseconds when the value carries
//! sub-millisecond digits. Incoming values may be any RFC 3339 string or a
//! naive `YYYY-MM-DDTHH:MM:SS[.fff]`, which is read as UTC.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, NaiveDateTime, SecondsFormat, SubsecRound, Utc};
use serde::{de, Deserialize, Deserializer, Serializer};

static LAST_MICROS: AtomicI64 = AtomicI64::new(i64::MIN);

/// Current time at microsecond precision, strictly increasing within the
/// process. Records stamped with it survive [`format`]/[`parse`] unchanged and
/// keep their creation order even when made within the same microsecond.
pub fn now() -> DateTime<Utc> {
    let wall = Utc::now().trunc_subsecs(6);
    let mut last = LAST_MICROS.load(Ordering::Relaxed);
    loop {
        let next = wall.timestamp_micros().max(last.saturating_add(1));
        match LAST_MICROS.compare_exchange_weak(last, next, Ordering::Relaxed, Ordering::Relaxed) {
            Ok(_) => return DateTime::<Utc>::from_timestamp_micros(next).unwrap_or(wall),
            Err(current) => last = current,
        }
    }
}

pub fn format(value: &DateTime<Utc>) -> String {
    let precision = if value.timestamp_subsec_nanos() % 1_000_000 == 0 {
        SecondsFormat::Millis
    } else {
        SecondsFormat::Micros
    };
    value.to_rfc3339_opts(precision, true)
}

pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format(value))
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse(&raw).ok_or_else(|| de::Error::custom(format!("invalid timestamp: {raw}")))
}

pub mod option {
    use super::*;

    pub fn serialize<S: Serializer>(
        value: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(value) => serializer.serialize_some(&super::format(value)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) if raw.is_empty() => Ok(None),
            Some(raw) => super::parse(&raw)
                .map(Some)
                .ok_or_else(|| de::Error::custom(format!("invalid timestamp: {raw}"))),
            None => Ok(None),
        }
    }
}
