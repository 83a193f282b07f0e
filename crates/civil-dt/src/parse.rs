//! Strict matching of the canonical text layouts.
//!
//! Layouts are matched byte for byte: no surrounding whitespace, no signs,
//! fixed digit counts except for the hour, which may be one or two digits.
//! After a seconds field an optional fraction (`.` or `,` followed by at
//! least one digit) is accepted and dropped.

use chrono::NaiveDate;

use crate::error::{CivilError, Result};

pub(crate) const DATE_LAYOUT: &str = "YYYY-MM-DD";
pub(crate) const CLOCK_LAYOUT: &str = "HH:MM";
pub(crate) const CLOCK_SECONDS_LAYOUT: &str = "HH:MM:SS";

/// Date and clock fields recovered from a successful match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DateFields {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ClockFields {
    pub hour: u32,
    pub minute: u32,
}

/// One accepted date-time layout: a date, a separator, then a clock.
#[derive(Debug, Clone, Copy)]
pub(crate) struct DateTimeLayout {
    pub name: &'static str,
    pub separators: &'static [u8],
    pub seconds: bool,
}

/// Date-time layouts in the order they are attempted.
pub(crate) const DATETIME_LAYOUTS: [DateTimeLayout; 4] = [
    DateTimeLayout {
        name: "YYYY-MM-DDTHH:MM",
        separators: b"Tt",
        seconds: false,
    },
    DateTimeLayout {
        name: "YYYY-MM-DDTHH:MM:SS",
        separators: b"Tt",
        seconds: true,
    },
    DateTimeLayout {
        name: "YYYY-MM-DD HH:MM:SS",
        separators: b" ",
        seconds: true,
    },
    DateTimeLayout {
        name: "YYYY-MM-DD HH:MM",
        separators: b" ",
        seconds: false,
    },
];

struct Cursor<'a> {
    input: &'a str,
    bytes: &'a [u8],
    pos: usize,
    layout: &'static str,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str, layout: &'static str) -> Self {
        Cursor {
            input,
            bytes: input.as_bytes(),
            pos: 0,
            layout,
        }
    }

    fn error(&self, reason: impl Into<String>) -> CivilError {
        CivilError::parse(self.input, self.layout, reason)
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn peek_digit(&self) -> bool {
        self.peek().is_some_and(|b| b.is_ascii_digit())
    }

    /// Read between `min` and `max` ASCII digits.
    fn digits(&mut self, min: usize, max: usize, field: &str) -> Result<u32> {
        let mut value = 0u32;
        let mut count = 0;
        while count < max && self.peek_digit() {
            value = value * 10 + u32::from(self.bytes[self.pos] - b'0');
            self.pos += 1;
            count += 1;
        }
        if count < min {
            return Err(self.error(format!("expected {field}")));
        }
        Ok(value)
    }

    fn expect(&mut self, allowed: &[u8]) -> Result<()> {
        match self.peek() {
            Some(b) if allowed.contains(&b) => {
                self.pos += 1;
                Ok(())
            }
            _ => Err(self.error(format!(
                "expected '{}' at offset {}",
                String::from_utf8_lossy(&allowed[..1]),
                self.pos
            ))),
        }
    }

    fn finish(&self) -> Result<()> {
        if self.pos == self.bytes.len() {
            Ok(())
        } else {
            Err(self.error(format!(
                "extra text \"{}\"",
                String::from_utf8_lossy(&self.bytes[self.pos..])
            )))
        }
    }

    fn date(&mut self) -> Result<DateFields> {
        let year = self.digits(4, 4, "year")?;
        self.expect(b"-")?;
        let month = self.digits(2, 2, "month")?;
        if !(1..=12).contains(&month) {
            return Err(self.error("month out of range"));
        }
        self.expect(b"-")?;
        let day = self.digits(2, 2, "day")?;

        // Four digits always fit in i32.
        let year = year as i32;
        if NaiveDate::from_ymd_opt(year, month, day).is_none() {
            return Err(self.error("day out of range"));
        }
        Ok(DateFields { year, month, day })
    }

    fn clock(&mut self, seconds: bool) -> Result<ClockFields> {
        let hour = self.digits(1, 2, "hour")?;
        if hour > 23 {
            return Err(self.error("hour out of range"));
        }
        self.expect(b":")?;
        let minute = self.digits(2, 2, "minute")?;
        if minute > 59 {
            return Err(self.error("minute out of range"));
        }
        if seconds {
            self.expect(b":")?;
            let second = self.digits(2, 2, "second")?;
            if second > 59 {
                return Err(self.error("second out of range"));
            }
            self.fraction();
        }
        Ok(ClockFields { hour, minute })
    }

    /// Skip an optional fractional-second suffix.
    fn fraction(&mut self) {
        let has_fraction = matches!(self.peek(), Some(b'.') | Some(b','))
            && self.bytes.get(self.pos + 1).is_some_and(|b| b.is_ascii_digit());
        if has_fraction {
            self.pos += 1;
            while self.peek_digit() {
                self.pos += 1;
            }
        }
    }
}

/// Match `YYYY-MM-DD`.
pub(crate) fn parse_date(s: &str) -> Result<DateFields> {
    let mut cur = Cursor::new(s, DATE_LAYOUT);
    let date = cur.date()?;
    cur.finish()?;
    Ok(date)
}

/// Match `HH:MM`, or `HH:MM:SS` when `seconds` is set.
pub(crate) fn parse_clock(s: &str, seconds: bool) -> Result<ClockFields> {
    let layout = if seconds {
        CLOCK_SECONDS_LAYOUT
    } else {
        CLOCK_LAYOUT
    };
    let mut cur = Cursor::new(s, layout);
    let clock = cur.clock(seconds)?;
    cur.finish()?;
    Ok(clock)
}

/// Match one date-time layout.
pub(crate) fn parse_datetime(s: &str, layout: &DateTimeLayout) -> Result<(DateFields, ClockFields)> {
    let mut cur = Cursor::new(s, layout.name);
    let date = cur.date()?;
    cur.expect(layout.separators)?;
    let clock = cur.clock(layout.seconds)?;
    cur.finish()?;
    Ok((date, clock))
}

/// Decode raw text input, rejecting invalid UTF-8 as a parse error.
pub(crate) fn utf8<'a>(data: &'a [u8], layout: &'static str) -> Result<&'a str> {
    std::str::from_utf8(data).map_err(|e| {
        CivilError::parse(&String::from_utf8_lossy(data), layout, e.to_string())
    })
}
