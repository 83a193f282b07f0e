//! Conversion between civil fields and absolute instants.
//!
//! Civil values carry no location. Turning one into an instant needs a
//! [`TimeZone`] supplied by the caller, and two rules:
//!
//! - **Normalization**: fields outside their usual range roll over instead of
//!   being rejected. Day 32 of January is February 1, month 0 is December of
//!   the previous year, minute 60 is the next hour.
//! - **Legal-time resolution**: a local time that is skipped or repeated by a
//!   zone transition is resolved by reading the naive value as UTC, looking up
//!   the offset in force there, shifting by it, and then applying the offset
//!   in force at the shifted instant. For `America/Indiana/Vincennes`, local
//!   midnight on 1955-05-01 does not exist and resolves to 23:00 on April 30.

use chrono::{
    DateTime, Duration, LocalResult, NaiveDate, NaiveDateTime, Offset, TimeZone,
};
use chrono_tz::Tz;

use crate::error::CivilError;

/// Seconds in one civil day on the Unix time scale (no leap seconds).
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Unix timestamp of `0001-01-01T00:00:00Z`, the "unset" instant.
pub const ZERO_INSTANT_UNIX: i64 = -62_135_596_800;

/// Reports whether `t` is the unset instant (`0001-01-01T00:00:00Z`).
///
/// Values derived from the unset instant are marked invalid.
pub fn is_zero_instant<T: TimeZone>(t: &DateTime<T>) -> bool {
    t.timestamp() == ZERO_INSTANT_UNIX && t.timestamp_subsec_nanos() == 0
}

/// Look up an IANA location by name (e.g. `"America/New_York"`).
///
/// # Errors
///
/// Returns [`CivilError::InvalidTimezone`] if the name is not a known IANA zone.
pub fn load_location(name: &str) -> Result<Tz, CivilError> {
    name.parse::<Tz>()
        .map_err(|_| CivilError::InvalidTimezone(format!("'{}'", name)))
}

/// Build a naive local datetime from possibly out-of-range civil fields.
///
/// Returns `None` only when the normalized value leaves chrono's range.
pub(crate) fn normalize(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
) -> Option<NaiveDateTime> {
    let months = i64::from(year) * 12 + i64::from(month) - 1;
    let year = i32::try_from(months.div_euclid(12)).ok()?;
    let month = u32::try_from(months.rem_euclid(12)).ok()? + 1;

    let first = NaiveDate::from_ymd_opt(year, month, 1)?.and_hms_opt(0, 0, 0)?;
    let offset = Duration::try_days(i64::from(day) - 1)?
        .checked_add(&Duration::try_hours(i64::from(hour))?)?
        .checked_add(&Duration::try_minutes(i64::from(minute))?)?;
    first.checked_add_signed(offset)
}

/// Resolve a naive local datetime to an instant in `tz`.
pub(crate) fn resolve_local<T: TimeZone>(tz: &T, local: NaiveDateTime) -> Option<DateTime<T>> {
    if let LocalResult::Single(dt) = tz.from_local_datetime(&local) {
        return Some(dt);
    }

    // Skipped or repeated local time.
    let probe = tz.offset_from_utc_datetime(&local).fix().local_minus_utc();
    let guess = local.checked_sub_signed(Duration::seconds(i64::from(probe)))?;
    let offset = tz.offset_from_utc_datetime(&guess).fix().local_minus_utc();
    let utc = local.checked_sub_signed(Duration::seconds(i64::from(offset)))?;
    Some(tz.from_utc_datetime(&utc))
}

/// Normalize civil fields and resolve them in `tz`.
pub(crate) fn civil_to_instant<T: TimeZone>(
    tz: &T,
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
) -> Option<DateTime<T>> {
    resolve_local(tz, normalize(year, month, day, hour, minute)?)
}
