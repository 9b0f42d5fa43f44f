//! Wall-clock timestamps for entity creation and update times.
//!
//! Timestamps are naive local times held at microsecond precision, so that
//! rendering to text and parsing it back is lossless.

use crate::{Error, Result};
use chrono::{Datelike, Local, NaiveDateTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Text format of a persisted timestamp: `YYYY-MM-DDTHH:MM:SS.ffffff`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

const PARSE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// A microsecond-precision local timestamp without a timezone offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(NaiveDateTime);

impl Timestamp {
    /// Creates a timestamp at the current local time.
    #[must_use]
    pub fn now() -> Self {
        Self::from_naive(Local::now().naive_local())
    }

    /// Creates a timestamp from a naive datetime, dropping sub-microsecond digits.
    #[must_use]
    pub fn from_naive(dt: NaiveDateTime) -> Self {
        let micros = dt.nanosecond() / 1_000 * 1_000;
        Self(dt.with_nanosecond(micros).unwrap_or(dt))
    }

    /// Parses a timestamp in [`TIMESTAMP_FORMAT`].
    ///
    /// The fraction is mandatory and holds one to six digits.
    pub fn parse(s: &str) -> Result<Self> {
        let fraction_ok = s.rsplit_once('.').is_some_and(|(_, frac)| {
            (1..=6).contains(&frac.len()) && frac.bytes().all(|b| b.is_ascii_digit())
        });
        if !fraction_ok {
            return Err(Error::InvalidTimestamp(format!(
                "{s:?}: expected a fraction of one to six digits after the seconds"
            )));
        }
        NaiveDateTime::parse_from_str(s, PARSE_FORMAT)
            .map(Self::from_naive)
            .map_err(|e| Error::InvalidTimestamp(format!("{s:?}: {e}")))
    }

    /// Returns the underlying naive datetime.
    #[must_use]
    pub const fn as_naive(&self) -> NaiveDateTime {
        self.0
    }

    /// Returns the sub-second part in microseconds.
    #[must_use]
    pub fn microsecond(&self) -> u32 {
        self.0.nanosecond() / 1_000
    }

    /// Renders the timestamp as a constructor-style literal,
    /// e.g. `datetime.datetime(2017, 9, 28, 21, 5, 54, 119427)`.
    #[must_use]
    pub fn to_repr(&self) -> String {
        let dt = &self.0;
        format!(
            "datetime.datetime({}, {}, {}, {}, {}, {}, {})",
            dt.year(),
            dt.month(),
            dt.day(),
            dt.hour(),
            dt.minute(),
            dt.second(),
            self.microsecond()
        )
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(TIMESTAMP_FORMAT))
    }
}

impl FromStr for Timestamp {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<NaiveDateTime> for Timestamp {
    fn from(dt: NaiveDateTime) -> Self {
        Self::from_naive(dt)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
