//! Civil wall-clock times of day.
//!
//! A [`Time`] keeps only the hour and minute. Seconds and fractions are
//! accepted when parsing and then dropped, so `"13:26:33"` and `"13:26"`
//! produce the same value. It maps onto storage columns of type `TIME`.
//! Most arithmetic on bare times is not meaningful; prefer [`DateTime`]
//! when a real date is involved.
//!
//! [`DateTime`]: crate::DateTime

use std::fmt;
use std::str::FromStr;

use chrono::{Duration, TimeZone, Timelike, Utc};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{CivilError, Result};
use crate::instant;
use crate::parse::{self, CLOCK_LAYOUT};
use crate::storage::{self, Scanner, SqlValue, Valuer};

/// A time of day (hour, minute) without a date or location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Time {
    /// Hour of the day in 24-hour format, 0-23.
    pub hour: u32,
    /// Minute of the hour, 0-59.
    pub minute: u32,
    pub valid: bool,
}

impl Time {
    /// A valid time from its fields. The fields are not range-checked.
    pub const fn new(hour: u32, minute: u32) -> Self {
        Time {
            hour,
            minute,
            valid: true,
        }
    }

    /// The wall-clock time of `t` in its own location, ignoring the date.
    ///
    /// Invalid only when `t` is the unset instant.
    pub fn of<T: TimeZone>(t: &chrono::DateTime<T>) -> Self {
        Time {
            hour: t.hour(),
            minute: t.minute(),
            valid: !instant::is_zero_instant(t),
        }
    }

    /// Parse `HH:MM`, falling back to `HH:MM:SS[.fff]`.
    ///
    /// # Errors
    ///
    /// Returns the [`CivilError::Parse`] of the `HH:MM:SS` attempt when both
    /// layouts fail.
    pub fn parse(s: &str) -> Result<Self> {
        let clock = parse::parse_clock(s, false).or_else(|_| parse::parse_clock(s, true))?;
        Ok(Time::new(clock.hour, clock.minute))
    }

    /// This time of day placed on 1970-01-01 UTC.
    ///
    /// The date is nominal; use [`DateTime::in_tz`] for real dates.
    /// Out-of-range fields roll over (`Time::new(24, 0)` lands on January 2).
    ///
    /// # Panics
    ///
    /// Panics if the fields are so large that the result leaves chrono's range.
    ///
    /// [`DateTime::in_tz`]: crate::DateTime::in_tz
    pub fn to_instant(&self) -> chrono::DateTime<Utc> {
        let minutes = i64::from(self.hour) * 60 + i64::from(self.minute);
        chrono::DateTime::<Utc>::UNIX_EPOCH + Duration::minutes(minutes)
    }

    /// Reports whether `self` is strictly later in the day than `other`.
    pub fn after(&self, other: Time) -> bool {
        if self.hour == other.hour {
            return self.minute > other.minute;
        }
        self.hour > other.hour
    }

    /// Reports whether `self` is strictly earlier in the day than `other`.
    pub fn before(&self, other: Time) -> bool {
        if self.hour == other.hour {
            return self.minute < other.minute;
        }
        self.hour < other.hour
    }

    /// Signed difference in minutes:
    /// `(self.hour - other.hour) * 60 + (self.minute - other.minute)`.
    pub fn subtract(&self, other: Time) -> i64 {
        (i64::from(self.hour) - i64::from(other.hour)) * 60 + i64::from(self.minute)
            - i64::from(other.minute)
    }

    /// The canonical text form, empty when invalid.
    pub fn marshal_text(&self) -> Vec<u8> {
        self.to_string().into_bytes()
    }

    /// Overwrite `self` with the time parsed from `data`.
    ///
    /// On failure `self` becomes the zero value.
    pub fn unmarshal_text(&mut self, data: &[u8]) -> Result<()> {
        match parse::utf8(data, CLOCK_LAYOUT).and_then(Time::parse) {
            Ok(t) => {
                *self = t;
                Ok(())
            }
            Err(e) => {
                *self = Time::default();
                Err(e)
            }
        }
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.valid {
            write!(f, "{:02}:{:02}", self.hour, self.minute)
        } else {
            Ok(())
        }
    }
}

impl FromStr for Time {
    type Err = CivilError;

    fn from_str(s: &str) -> Result<Self> {
        Time::parse(s)
    }
}

impl Serialize for Time {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Time {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Time::parse(&s).map_err(de::Error::custom)
    }
}

impl Valuer for Time {
    fn value(&self) -> SqlValue {
        if self.valid {
            SqlValue::Text(self.to_string())
        } else {
            SqlValue::Null
        }
    }
}

impl Scanner for Time {
    /// `NULL` resets `self` to the zero value.
    fn scan(&mut self, src: &SqlValue) -> Result<()> {
        match storage::scan_text(src, "Time", CLOCK_LAYOUT)? {
            None => *self = Time::default(),
            Some(s) => *self = Time::parse(s)?,
        }
        Ok(())
    }
}
