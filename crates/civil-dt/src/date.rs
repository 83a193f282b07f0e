//! Civil calendar dates.
//!
//! A [`Date`] is a year, month and day with no location attached, so it
//! does not describe a unique 24-hour span. It maps onto storage columns of
//! type `DATE`.
//!
//! # Validity
//!
//! `valid` marks whether the value came from a successful parse or
//! conversion. The zero value (`Date::default()`) is invalid, formats as the
//! empty string and is stored as `NULL`. Field ranges are not enforced: a
//! hand-built `Date { month: 1, day: 32, .. }` is accepted and rolls over to
//! February 1 when converted to an instant.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, TimeZone, Utc};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{CivilError, Result};
use crate::instant::{self, SECONDS_PER_DAY};
use crate::parse::{self, DATE_LAYOUT};
use crate::storage::{self, Scanner, SqlValue, Valuer};

/// A date (year, month, day) without a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Date {
    /// Year (e.g. 2014).
    pub year: i32,
    /// Month of the year, January = 1.
    pub month: u32,
    /// Day of the month, starting at 1.
    pub day: u32,
    pub valid: bool,
}

impl Date {
    /// A valid date from its fields. The fields are not range-checked.
    pub const fn new(year: i32, month: u32, day: u32) -> Self {
        Date {
            year,
            month,
            day,
            valid: true,
        }
    }

    /// The date on which `t` falls in its own location.
    ///
    /// The result is invalid only when `t` is the unset instant
    /// (`0001-01-01T00:00:00Z`).
    ///
    /// ```
    /// use chrono::TimeZone;
    /// use civil_dt::Date;
    ///
    /// let tokyo: chrono_tz::Tz = "Asia/Tokyo".parse().unwrap();
    /// let t = chrono::Utc.with_ymd_and_hms(2019, 12, 31, 20, 0, 0).unwrap();
    /// assert_eq!(Date::of(&t.with_timezone(&tokyo)), Date::new(2020, 1, 1));
    /// ```
    pub fn of<T: TimeZone>(t: &chrono::DateTime<T>) -> Self {
        Date {
            year: t.year(),
            month: t.month(),
            day: t.day(),
            valid: !instant::is_zero_instant(t),
        }
    }

    /// Parse a `YYYY-MM-DD` date.
    ///
    /// # Errors
    ///
    /// Returns [`CivilError::Parse`] when the input deviates from the layout
    /// or names a day that does not exist (`2019-02-29`).
    pub fn parse(s: &str) -> Result<Self> {
        let fields = parse::parse_date(s)?;
        Ok(Date::new(fields.year, fields.month, fields.day))
    }

    /// Midnight at the start of this date in `tz`.
    ///
    /// Agrees with chrono's own calendar even when local midnight is skipped:
    /// in `America/Indiana/Vincennes`, 1955-05-01 yields 23:00 on April 30.
    ///
    /// # Panics
    ///
    /// Panics if the normalized date is outside chrono's representable range.
    /// Use [`Date::checked_in_tz`] to handle that case.
    pub fn in_tz<T: TimeZone>(&self, tz: &T) -> chrono::DateTime<T> {
        match self.checked_in_tz(tz) {
            Some(t) => t,
            None => panic!("date {self:?} is out of range"),
        }
    }

    /// Like [`Date::in_tz`], returning `None` when out of range.
    pub fn checked_in_tz<T: TimeZone>(&self, tz: &T) -> Option<chrono::DateTime<T>> {
        instant::civil_to_instant(tz, self.year, self.month, self.day, 0, 0)
    }

    /// Midnight UTC at the start of this date.
    pub fn to_utc(&self) -> chrono::DateTime<Utc> {
        self.in_tz(&Utc)
    }

    /// The date `n` days later; `n` may be negative.
    ///
    /// The result keeps the receiver's validity.
    ///
    /// # Panics
    ///
    /// Panics if the result is outside chrono's representable range.
    pub fn add_days(self, n: i64) -> Self {
        match self.checked_add_days(n) {
            Some(d) => d,
            None => panic!("date {self:?} plus {n} days is out of range"),
        }
    }

    /// Like [`Date::add_days`], returning `None` when out of range.
    pub fn checked_add_days(self, n: i64) -> Option<Self> {
        let midnight = self.checked_in_tz(&Utc)?;
        let shifted = midnight.checked_add_signed(Duration::try_days(n)?)?;
        Some(Date {
            valid: self.valid,
            ..Date::of(&shifted)
        })
    }

    /// Signed number of days from `since` to `self`, not counting the end day.
    ///
    /// This is the inverse of [`Date::add_days`]: `d.add_days(n).days_since(d) == n`.
    /// Unix time has exactly 86400 seconds per day, so leap seconds do not
    /// affect the count.
    pub fn days_since(&self, since: Date) -> i64 {
        let delta = self.to_utc().timestamp() - since.to_utc().timestamp();
        delta / SECONDS_PER_DAY
    }

    /// Reports whether `self` comes before `other`, comparing
    /// (year, month, day) without normalization.
    pub fn before(&self, other: Date) -> bool {
        (self.year, self.month, self.day) < (other.year, other.month, other.day)
    }

    /// The canonical text form, empty when invalid.
    pub fn marshal_text(&self) -> Vec<u8> {
        self.to_string().into_bytes()
    }

    /// Overwrite `self` with the date parsed from `data`.
    ///
    /// On failure `self` becomes the zero value.
    pub fn unmarshal_text(&mut self, data: &[u8]) -> Result<()> {
        match parse::utf8(data, DATE_LAYOUT).and_then(Date::parse) {
            Ok(d) => {
                *self = d;
                Ok(())
            }
            Err(e) => {
                *self = Date::default();
                Err(e)
            }
        }
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.valid {
            write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
        } else {
            Ok(())
        }
    }
}

impl FromStr for Date {
    type Err = CivilError;

    fn from_str(s: &str) -> Result<Self> {
        Date::parse(s)
    }
}

impl Serialize for Date {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Date {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Date::parse(&s).map_err(de::Error::custom)
    }
}

impl Valuer for Date {
    fn value(&self) -> SqlValue {
        if self.valid {
            SqlValue::Text(self.to_string())
        } else {
            SqlValue::Null
        }
    }
}

impl Scanner for Date {
    /// `NULL` resets `self` to the zero value.
    fn scan(&mut self, src: &SqlValue) -> Result<()> {
        match storage::scan_text(src, "Date", DATE_LAYOUT)? {
            None => *self = Date::default(),
            Some(s) => *self = Date::parse(s)?,
        }
        Ok(())
    }
}
