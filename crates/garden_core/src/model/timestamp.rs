//! Millisecond-precision UTC timestamps.
//!
//! # Invariants
//! - Values never carry sub-millisecond precision.
//! - The string form is always `YYYY-MM-DDTHH:MM:SS.mmmZ`, so
//!   format -> parse -> format is the identity.

use chrono::{DateTime, SecondsFormat, TimeZone, Timelike, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// UTC instant used for `createdAt` / `updatedAt` bookkeeping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Current wall-clock time, truncated to milliseconds.
    pub fn now() -> Self {
        Self::from_datetime(Utc::now())
    }

    pub fn from_datetime(value: DateTime<Utc>) -> Self {
        let millis_only = (value.nanosecond() / 1_000_000) * 1_000_000;
        Self(value.with_nanosecond(millis_only).unwrap_or(value))
    }

    /// Returns `None` when `millis` is outside the representable range.
    pub fn from_epoch_millis(millis: i64) -> Option<Self> {
        Utc.timestamp_millis_opt(millis).single().map(Self)
    }

    pub fn epoch_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    pub fn as_datetime(&self) -> DateTime<Utc> {
        self.0
    }

    /// Shifts the instant by `millis` (negative values move backwards).
    ///
    /// Saturates at the current value if the result would overflow.
    pub fn plus_millis(self, millis: i64) -> Self {
        self.0
            .checked_add_signed(chrono::TimeDelta::milliseconds(millis))
            .map(Self)
            .unwrap_or(self)
    }

    /// Parses any RFC 3339 string, normalizing to UTC milliseconds.
    pub fn parse(value: &str) -> Result<Self, chrono::ParseError> {
        DateTime::parse_from_rfc3339(value.trim())
            .map(|parsed| Self::from_datetime(parsed.with_timezone(&Utc)))
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0.to_rfc3339_opts(SecondsFormat::Millis, true))
    }
}

impl FromStr for Timestamp {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(value: DateTime<Utc>) -> Self {
        Self::from_datetime(value)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw)
            .map_err(|err| D::Error::custom(format!("invalid ISO-8601 timestamp `{raw}`: {err}")))
    }
}

#[cfg(test)]
mod tests {
    use super::Timestamp;
    use chrono::{TimeZone, Utc};

    #[test]
    fn display_uses_millisecond_iso_format() {
        let ts = Timestamp::from_epoch_millis(1_700_000_000_123).unwrap();
        assert_eq!(ts.to_string(), "2023-11-14T22:13:20.123Z");
    }

    #[test]
    fn from_datetime_drops_sub_millisecond_precision() {
        let precise = Utc.timestamp_nanos(1_700_000_000_123_456_789);
        let ts = Timestamp::from_datetime(precise);
        assert_eq!(ts.epoch_millis(), 1_700_000_000_123);
        assert_eq!(ts.as_datetime().timestamp_subsec_nanos(), 123_000_000);
    }

    #[test]
    fn parse_accepts_offsets_and_normalizes_to_utc() {
        let ts = Timestamp::parse("2024-03-01T10:00:00.5+02:00").unwrap();
        assert_eq!(ts.to_string(), "2024-03-01T08:00:00.500Z");
    }

    #[test]
    fn string_form_survives_reparse() {
        let original = "2024-05-06T07:08:09.010Z";
        let ts: Timestamp = original.parse().unwrap();
        assert_eq!(ts.to_string(), original);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(Timestamp::parse("yesterday").is_err());
    }

    #[test]
    fn plus_millis_moves_both_directions() {
        let ts = Timestamp::from_epoch_millis(10_000).unwrap();
        assert_eq!(ts.plus_millis(5).epoch_millis(), 10_005);
        assert_eq!(ts.plus_millis(-5).epoch_millis(), 9_995);
    }
}
