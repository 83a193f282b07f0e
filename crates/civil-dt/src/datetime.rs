//! Civil date-times: a [`Date`] paired with a [`Time`].
//!
//! [`DateTime`] holds its parts by composition. Date-only operations such as
//! [`Date::add_days`] and time-only ones such as [`Time::subtract`] are not
//! available on it; reach into `.date` or `.time` explicitly.

use std::fmt;
use std::str::FromStr;

use chrono::{TimeZone, Utc};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::date::Date;
use crate::error::{CivilError, Result};
use crate::instant;
use crate::parse::{self, DATETIME_LAYOUTS};
use crate::storage::{self, Scanner, SqlValue, Valuer};
use crate::time::Time;

/// A date and a time of day without a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DateTime {
    pub date: Date,
    pub time: Time,
}

impl DateTime {
    pub const fn new(date: Date, time: Time) -> Self {
        DateTime { date, time }
    }

    /// The date and wall-clock time of `t` in its own location.
    pub fn of<T: TimeZone>(t: &chrono::DateTime<T>) -> Self {
        DateTime {
            date: Date::of(t),
            time: Time::of(t),
        }
    }

    /// Both parts are valid.
    pub fn is_valid(&self) -> bool {
        self.date.valid && self.time.valid
    }

    /// Parse a date-time, trying these layouts in order:
    ///
    /// 1. `YYYY-MM-DDTHH:MM`
    /// 2. `YYYY-MM-DDTHH:MM:SS[.fff]`
    /// 3. `YYYY-MM-DD HH:MM:SS[.fff]`
    /// 4. `YYYY-MM-DD HH:MM`
    ///
    /// The `T` separator may also be a lower-case `t`. Seconds are dropped.
    ///
    /// # Errors
    ///
    /// Returns the [`CivilError::Parse`] of the last layout when none match.
    ///
    /// ```
    /// use civil_dt::{Date, DateTime, Time};
    ///
    /// let dt = DateTime::parse("2019-08-22T13:26:33").unwrap();
    /// assert_eq!(dt, DateTime::new(Date::new(2019, 8, 22), Time::new(13, 26)));
    /// assert!(DateTime::parse("2016-03-22").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let mut last_err = None;
        for layout in &DATETIME_LAYOUTS {
            match parse::parse_datetime(s, layout) {
                Ok((date, clock)) => {
                    return Ok(DateTime {
                        date: Date::new(date.year, date.month, date.day),
                        time: Time::new(clock.hour, clock.minute),
                    });
                }
                Err(e) => last_err = Some(e),
            }
        }
        Err(last_err.unwrap_or_else(|| CivilError::parse(s, "date-time", "no layouts")))
    }

    /// This date-time as an instant in `tz`.
    ///
    /// Skipped and repeated local times resolve the same way as
    /// [`Date::in_tz`]: in `America/Indiana/Vincennes`, 1955-05-01 00:30
    /// yields 23:30 on April 30.
    ///
    /// # Panics
    ///
    /// Panics if the normalized fields are outside chrono's representable
    /// range. Use [`DateTime::checked_in_tz`] to handle that case.
    pub fn in_tz<T: TimeZone>(&self, tz: &T) -> chrono::DateTime<T> {
        match self.checked_in_tz(tz) {
            Some(t) => t,
            None => panic!("date-time {self:?} is out of range"),
        }
    }

    /// Like [`DateTime::in_tz`], returning `None` when out of range.
    pub fn checked_in_tz<T: TimeZone>(&self, tz: &T) -> Option<chrono::DateTime<T>> {
        instant::civil_to_instant(
            tz,
            self.date.year,
            self.date.month,
            self.date.day,
            self.time.hour,
            self.time.minute,
        )
    }

    /// Reports whether `self` occurs before `other`, comparing both as
    /// instants in UTC.
    pub fn before(&self, other: DateTime) -> bool {
        self.in_tz(&Utc) < other.in_tz(&Utc)
    }

    /// The canonical text form, empty unless both parts are valid.
    pub fn marshal_text(&self) -> Vec<u8> {
        self.to_string().into_bytes()
    }

    /// Overwrite `self` with the date-time parsed from `data`.
    ///
    /// On failure `self` becomes the zero value.
    pub fn unmarshal_text(&mut self, data: &[u8]) -> Result<()> {
        match parse::utf8(data, DATETIME_LAYOUTS[0].name).and_then(DateTime::parse) {
            Ok(dt) => {
                *self = dt;
                Ok(())
            }
            Err(e) => {
                *self = DateTime::default();
                Err(e)
            }
        }
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "{}T{}", self.date, self.time)
        } else {
            Ok(())
        }
    }
}

impl FromStr for DateTime {
    type Err = CivilError;

    fn from_str(s: &str) -> Result<Self> {
        DateTime::parse(s)
    }
}

impl Serialize for DateTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DateTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        DateTime::parse(&s).map_err(de::Error::custom)
    }
}

impl Valuer for DateTime {
    fn value(&self) -> SqlValue {
        if self.is_valid() {
            SqlValue::Text(self.to_string())
        } else {
            SqlValue::Null
        }
    }
}

impl Scanner for DateTime {
    /// Unlike [`Date`] and [`Time`], `NULL` leaves `self` untouched.
    fn scan(&mut self, src: &SqlValue) -> Result<()> {
        if let Some(s) = storage::scan_text(src, "DateTime", DATETIME_LAYOUTS[0].name)? {
            *self = DateTime::parse(s)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instant::load_location;
    use chrono::{Datelike, FixedOffset, Timelike};

    fn dt(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime {
        DateTime::new(Date::new(y, mo, d), Time::new(h, mi))
    }

    // ── of ──────────────────────────────────────────────────────────────

    #[test]
    fn test_of() {
        let offset = FixedOffset::west_opt(7 * 3600).unwrap();
        let t = offset.with_ymd_and_hms(2014, 8, 20, 15, 8, 0).unwrap();
        assert_eq!(DateTime::of(&t), dt(2014, 8, 20, 15, 8));
    }

    // ── parse ───────────────────────────────────────────────────────────

    #[test]
    fn test_parse() {
        let cases = [
            ("empty string", "", None),
            ("date only", "2016-03-22", None),
            ("wrong separating character", "2016-03-22-13:26:33", None),
            ("extra char at end", "2016-03-22T13:26:33x", None),
            ("valid T with seconds", "2019-08-22T13:26:33", Some(dt(2019, 8, 22, 13, 26))),
            ("valid T", "2019-08-22T13:26", Some(dt(2019, 8, 22, 13, 26))),
            ("lower-case t", "2019-08-22t13:26", Some(dt(2019, 8, 22, 13, 26))),
            ("space with seconds", "2019-08-22 13:26:33", Some(dt(2019, 8, 22, 13, 26))),
            ("space", "2019-08-22 13:26", Some(dt(2019, 8, 22, 13, 26))),
            ("fraction", "2019-08-22T13:26:33.250", Some(dt(2019, 8, 22, 13, 26))),
            ("invalid day", "2019-02-30T13:26", None),
        ];
        for (name, input, want) in cases {
            match (DateTime::parse(input), want) {
                (Ok(got), Some(want)) => assert_eq!(got, want, "[{name}]"),
                (Err(e), None) => assert!(matches!(e, CivilError::Parse { .. }), "[{name}]"),
                (got, want) => panic!("[{name}] got {got:?}, want {want:?}"),
            }
        }
    }

    #[test]
    fn test_parse_reports_last_layout_error() {
        let err = DateTime::parse("2016-03-22").unwrap_err();
        assert!(matches!(
            err,
            CivilError::Parse {
                layout: "YYYY-MM-DD HH:MM",
                ..
            }
        ));
    }

    // ── format ──────────────────────────────────────────────────────────

    #[test]
    fn test_format() {
        assert_eq!(dt(2019, 12, 31, 15, 35).to_string(), "2019-12-31T15:35");
        assert_eq!(DateTime::default().to_string(), "");

        let half = DateTime::new(Date::new(2019, 12, 31), Time::default());
        assert_eq!(half.to_string(), "");
        let half = DateTime::new(Date::default(), Time::new(15, 35));
        assert_eq!(half.to_string(), "");
    }

    // ── in_tz ───────────────────────────────────────────────────────────

    #[test]
    fn test_in_tz_utc() {
        let got = dt(2016, 1, 2, 3, 4).in_tz(&Utc);
        assert_eq!(got, Utc.with_ymd_and_hms(2016, 1, 2, 3, 4, 0).unwrap());
    }

    #[test]
    fn test_in_tz_location() {
        let tz = load_location("Europe/Berlin").unwrap();
        let got = dt(2019, 7, 15, 12, 0).in_tz(&tz);
        assert_eq!(
            got.with_timezone(&Utc),
            Utc.with_ymd_and_hms(2019, 7, 15, 10, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_in_tz_skipped_local_time() {
        let tz = load_location("America/Indiana/Vincennes").unwrap();
        let got = dt(1955, 5, 1, 0, 30).in_tz(&tz);
        assert_eq!((got.month(), got.day(), got.hour(), got.minute()), (4, 30, 23, 30));
    }

    #[test]
    fn test_in_tz_normalizes_fields() {
        let got = dt(2019, 12, 31, 23, 60).in_tz(&Utc);
        assert_eq!(got, Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap());
    }

    // ── before ──────────────────────────────────────────────────────────

    #[test]
    fn test_before() {
        let d1 = Date::new(2016, 12, 31);
        let d2 = Date::new(2017, 1, 1);
        let t1 = Time::new(5, 6);
        let t2 = Time::new(5, 7);
        let cases = [
            (DateTime::new(d1, t1), DateTime::new(d2, t1), true),
            (DateTime::new(d1, t1), DateTime::new(d1, t2), true),
            (DateTime::new(d2, t1), DateTime::new(d1, t2), false),
            (DateTime::new(d2, t2), DateTime::new(d2, t2), false),
        ];
        for (a, b, want) in cases {
            assert_eq!(a.before(b), want, "{a}.before({b})");
        }
    }

    #[test]
    fn test_before_compares_normalized_instants() {
        // 24:00 on Dec 31 is midnight Jan 1, which is after 23:59 on Dec 31.
        let late = DateTime::new(Date::new(2016, 12, 31), Time::new(24, 0));
        let early = dt(2016, 12, 31, 23, 59);
        assert!(early.before(late));
        assert!(!late.before(early));
        assert!(!late.before(dt(2017, 1, 1, 0, 0)));
    }

    // ── text ────────────────────────────────────────────────────────────

    #[test]
    fn test_unmarshal_text() {
        let mut value = dt(1999, 1, 1, 1, 1);
        value.unmarshal_text(b"2019-08-22 13:26").unwrap();
        assert_eq!(value, dt(2019, 8, 22, 13, 26));

        assert!(value.unmarshal_text(b"2016-03-22").is_err());
        assert_eq!(value, DateTime::default());
    }

    #[derive(Debug, Serialize, Deserialize)]
    struct Event {
        starts_at: DateTime,
    }

    #[test]
    fn test_json() {
        let event = Event {
            starts_at: dt(2019, 12, 31, 15, 35),
        };
        assert_eq!(
            serde_json::to_string(&event).unwrap(),
            r#"{"starts_at":"2019-12-31T15:35"}"#
        );

        let back: Event = serde_json::from_str(r#"{"starts_at":"2019-12-31 15:35:10"}"#).unwrap();
        assert_eq!(back.starts_at, event.starts_at);
        assert!(serde_json::from_str::<Event>(r#"{"starts_at":"2019-12-31"}"#).is_err());
    }

    // ── storage ─────────────────────────────────────────────────────────

    #[test]
    fn test_value() {
        assert_eq!(
            dt(2019, 12, 31, 15, 35).value(),
            SqlValue::Text("2019-12-31T15:35".to_string())
        );
        assert_eq!(DateTime::default().value(), SqlValue::Null);
        let half = DateTime::new(Date::new(2019, 12, 31), Time::default());
        assert_eq!(half.value(), SqlValue::Null);
    }

    #[test]
    fn test_scan() {
        let cases = [
            ("bytes value", SqlValue::from(&b"2019-08-22T13:26:33"[..]), dt(2019, 8, 22, 13, 26), false),
            ("bytes error", SqlValue::from(&b"2019-08-22"[..]), DateTime::default(), true),
            ("string value", SqlValue::from("2019-08-22 13:26"), dt(2019, 8, 22, 13, 26), false),
            ("string error", SqlValue::from("13:26"), DateTime::default(), true),
            ("invalid type", SqlValue::Int(8), DateTime::default(), true),
        ];
        for (name, src, want, want_err) in cases {
            let mut value = DateTime::default();
            let result = value.scan(&src);
            assert_eq!(result.is_err(), want_err, "[{name}] {result:?}");
            assert_eq!(value, want, "[{name}]");
        }
    }

    #[test]
    fn test_scan_null_leaves_receiver() {
        let mut value = dt(2019, 8, 22, 13, 26);
        value.scan(&SqlValue::Null).unwrap();
        assert_eq!(value, dt(2019, 8, 22, 13, 26));
    }

    #[test]
    fn test_scan_timestamp_is_type_error() {
        let mut value = DateTime::default();
        let src = SqlValue::Timestamp(Utc.with_ymd_and_hms(2019, 8, 22, 13, 26, 0).unwrap());
        let err = value.scan(&src).unwrap_err();
        assert_eq!(err.to_string(), "Can't convert timestamp to DateTime");
    }
}
