//! # Timestamp Value Object
//!
//! UTC point in time used for quote expiry.
//!
//! Providers send expiry timestamps in several shapes, so [`Timestamp::parse`]
//! accepts RFC 3339, SQL-style datetimes, bare dates and Unix seconds.
//!
//! # Examples
//!
//! ```
//! use fx_quotes::domain::value_objects::timestamp::Timestamp;
//!
//! let now = Timestamp::now();
//! let later = now.add_secs(60);
//!
//! assert!(later.is_after(&now));
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// SQL-style datetime layouts, interpreted as UTC.
const NAIVE_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// A UTC timestamp.
///
/// Wraps `chrono::DateTime<Utc>` and serializes as an RFC 3339 string.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    #[must_use]
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from Unix seconds.
    ///
    /// Returns `None` if the value is out of range.
    ///
    /// # Examples
    ///
    /// ```
    /// use fx_quotes::domain::value_objects::timestamp::Timestamp;
    ///
    /// let ts = Timestamp::from_secs(1_704_067_200).unwrap();
    /// assert_eq!(ts.timestamp_secs(), 1_704_067_200);
    /// ```
    #[must_use]
    pub fn from_secs(secs: i64) -> Option<Self> {
        Utc.timestamp_opt(secs, 0).single().map(Self)
    }

    /// Creates a timestamp from Unix milliseconds.
    #[must_use]
    pub fn from_millis(millis: i64) -> Option<Self> {
        Utc.timestamp_millis_opt(millis).single().map(Self)
    }

    /// Parses an absolute timestamp as sent by quote providers.
    ///
    /// Accepted shapes, tried in order:
    ///
    /// - RFC 3339 (`2024-01-01T12:00:00Z`, `2024-01-01T12:00:00+02:00`)
    /// - naive datetime in UTC (`2024-01-01 12:00:00`, optional fraction)
    /// - date only, at midnight UTC (`2024-01-01`)
    /// - integer Unix seconds (`1704110400`)
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTimestamp` if none of the shapes match.
    ///
    /// # Examples
    ///
    /// ```
    /// use fx_quotes::domain::value_objects::timestamp::Timestamp;
    ///
    /// let a = Timestamp::parse("2024-01-01T00:00:00Z").unwrap();
    /// let b = Timestamp::parse("2024-01-01 00:00:00").unwrap();
    /// let c = Timestamp::parse("1704067200").unwrap();
    /// assert_eq!(a, b);
    /// assert_eq!(b, c);
    /// assert!(Timestamp::parse("tomorrow").is_err());
    /// ```
    pub fn parse(input: &str) -> DomainResult<Self> {
        let value = input.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
            return Ok(Self(dt.with_timezone(&Utc)));
        }

        for format in NAIVE_DATETIME_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
                return Ok(Self(naive.and_utc()));
            }
        }

        if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d")
            && let Some(midnight) = date.and_hms_opt(0, 0, 0)
        {
            return Ok(Self(midnight.and_utc()));
        }

        if let Ok(secs) = value.parse::<i64>()
            && let Some(ts) = Self::from_secs(secs)
        {
            return Ok(ts);
        }

        Err(DomainError::invalid_timestamp(input))
    }

    /// Returns the Unix timestamp in seconds.
    #[inline]
    #[must_use]
    pub fn timestamp_secs(&self) -> i64 {
        self.0.timestamp()
    }

    /// Returns the Unix timestamp in milliseconds.
    #[inline]
    #[must_use]
    pub fn timestamp_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    /// Adds seconds to the timestamp (negative values move backwards).
    ///
    /// Saturates at the representable range instead of overflowing.
    #[must_use]
    pub fn add_secs(&self, secs: i64) -> Self {
        let delta = Duration::try_seconds(secs).unwrap_or(if secs < 0 {
            Duration::MIN
        } else {
            Duration::MAX
        });
        match self.0.checked_add_signed(delta) {
            Some(dt) => Self(dt),
            None if secs < 0 => Self(DateTime::<Utc>::MIN_UTC),
            None => Self(DateTime::<Utc>::MAX_UTC),
        }
    }

    /// Subtracts seconds from the timestamp.
    #[must_use]
    pub fn sub_secs(&self, secs: i64) -> Self {
        self.add_secs(secs.saturating_neg())
    }

    /// Returns true if this timestamp is in the past.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(&Self::now())
    }

    /// Returns true if this timestamp is strictly before `now`.
    #[inline]
    #[must_use]
    pub fn is_expired_at(&self, now: &Self) -> bool {
        self.0 < now.0
    }

    /// Returns true if this timestamp is before another.
    #[inline]
    #[must_use]
    pub fn is_before(&self, other: &Self) -> bool {
        self.0 < other.0
    }

    /// Returns true if this timestamp is after another.
    #[inline]
    #[must_use]
    pub fn is_after(&self, other: &Self) -> bool {
        self.0 > other.0
    }

    /// Returns the duration from this timestamp until `other`.
    ///
    /// Returns `Duration::ZERO` if `other` is not after `self`.
    #[must_use]
    pub fn duration_until(&self, other: &Self) -> std::time::Duration {
        (other.0 - self.0)
            .to_std()
            .unwrap_or(std::time::Duration::ZERO)
    }

    /// Formats the timestamp as RFC 3339 with a `Z` suffix, matching the
    /// serialized form.
    #[must_use]
    pub fn to_iso8601(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::AutoSi, true)
    }

    /// Returns the underlying DateTime.
    #[inline]
    #[must_use]
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}

impl From<Timestamp> for DateTime<Utc> {
    fn from(ts: Timestamp) -> Self {
        ts.0
    }
}
