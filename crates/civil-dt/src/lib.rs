//! # civil-dt
//!
//! Civil (location-free) dates, times of day and date-times.
//!
//! These types describe calendar dates and wall-clock times such as
//! `2019-12-31` or `15:35` without tying them to a zone or a 24-hour
//! instant. They map onto storage columns of type `DATE`, `TIME` and
//! `DATETIME` where the location lives elsewhere or does not matter.
//!
//! Each type carries an explicit `valid` flag instead of being wrapped in
//! `Option`: the zero value means "no value", formats as the empty string
//! and is stored as `NULL`.
//!
//! ## Modules
//!
//! - [`date`] — [`Date`]: parsing, formatting, day arithmetic
//! - [`time`] — [`Time`]: hour and minute of the day
//! - [`datetime`] — [`DateTime`]: a `Date` and a `Time` by composition
//! - [`instant`] — Conversion to chrono instants at a location
//! - [`storage`] — SQL-style value/scan adapters
//! - [`error`] — Error types
//!
//! ```
//! use civil_dt::{Date, DateTime, Time};
//!
//! let d = Date::parse("2004-01-01").unwrap();
//! assert_eq!(d.add_days(366), Date::new(2005, 1, 1));
//!
//! let dt = DateTime::new(d, Time::parse("15:35:20").unwrap());
//! assert_eq!(dt.to_string(), "2004-01-01T15:35");
//! ```

pub mod date;
pub mod datetime;
pub mod error;
pub mod instant;
pub mod storage;
pub mod time;

mod parse;

pub use date::Date;
pub use datetime::DateTime;
pub use error::{CivilError, Result};
pub use instant::load_location;
pub use storage::{Scanner, SqlValue, Valuer};
pub use time::Time;
