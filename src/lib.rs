mod consts;
mod prelude;
mod range;
mod types;
mod weekday;

pub use consts::*;
pub use range::{DateRange, Days, RangeError, count_weekend_days};
pub use types::{Day, Month, Year, days_in_month, is_leap_year, month_length};
pub use weekday::Weekday;

use crate::prelude::*;
use std::str::FromStr;

/// A validated day in the proleptic Gregorian calendar, years 1 through 9999.
///
/// Field order gives chronological ordering. Values are immutable; stepping
/// forward with [`CalendarDate::next_date`] produces a new date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{year}-{month}-{day}")]
pub struct CalendarDate {
    year:  Year,
    month: Month,
    day:   Day,
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Invalid date format: {_0:?} (expected YYYY-MM-DD)")]
    InvalidFormat(String),
    #[display(fmt = "Invalid year: {} (must be 1-{})", "_0", MAX_YEAR)]
    InvalidYear(u16),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u8),
    #[display(fmt = "Invalid day {day} for month {year:04}-{month:02}")]
    InvalidDay { year: u16, month: u8, day: u8 },
}

impl std::error::Error for ParseError {}

/// Misuse of the calendar arithmetic itself, as opposed to bad user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum CalendarError {
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u8),
}

impl std::error::Error for CalendarError {}

impl CalendarDate {
    /// Creates a date from raw components, validating each one.
    ///
    /// # Errors
    /// Returns the `ParseError` of the first component that is out of range.
    pub fn new(year: u16, month: u8, day: u8) -> Result<Self, ParseError> {
        let year = Year::new(year)?;
        let month = Month::new(month)?;
        let day = Day::new(day, year, month)?;
        Ok(Self { year, month, day })
    }

    /// Parses a strict `YYYY-MM-DD` string.
    ///
    /// The layout is checked before any number is read: exactly ten bytes,
    /// hyphens at offsets 4 and 7, ASCII digits everywhere else. Signs,
    /// whitespace and short fields are rejected as `InvalidFormat`.
    ///
    /// # Errors
    /// Returns `ParseError` describing the first failed check.
    pub fn parse(s: &str) -> Result<Self, ParseError> {
        let bytes = s.as_bytes();
        let separator = DATE_SEPARATOR as u8;
        if bytes.len() != DATE_STRING_LEN
            || bytes[YEAR_MONTH_SEPARATOR_POS] != separator
            || bytes[MONTH_DAY_SEPARATOR_POS] != separator
        {
            return Err(ParseError::InvalidFormat(s.to_owned()));
        }

        let invalid = || ParseError::InvalidFormat(s.to_owned());
        let year = parse_digits(&bytes[..YEAR_MONTH_SEPARATOR_POS]).ok_or_else(invalid)?;
        let month = parse_digits(&bytes[YEAR_MONTH_SEPARATOR_POS + 1..MONTH_DAY_SEPARATOR_POS])
            .and_then(|m| u8::try_from(m).ok())
            .ok_or_else(invalid)?;
        let day = parse_digits(&bytes[MONTH_DAY_SEPARATOR_POS + 1..])
            .and_then(|d| u8::try_from(d).ok())
            .ok_or_else(invalid)?;

        Self::new(year, month, day)
    }

    pub const fn year(&self) -> Year {
        self.year
    }

    pub const fn month(&self) -> Month {
        self.month
    }

    pub const fn day(&self) -> Day {
        self.day
    }

    /// Days since 1970-01-01 (negative before it).
    ///
    /// Counts in 400-year eras starting on March 1st so that the leap day
    /// lands at the end of each computational year.
    pub fn days_since_epoch(&self) -> i64 {
        let month = i64::from(self.month.get());
        let day = i64::from(self.day.get());
        let year = i64::from(self.year.get()) - i64::from(month <= i64::from(FEBRUARY));

        let era = year.div_euclid(i64::from(consts::GREGORIAN_CYCLE));
        let year_of_era = year.rem_euclid(i64::from(consts::GREGORIAN_CYCLE));
        let month_from_march = (month + 9) % 12;
        let day_of_year = (153 * month_from_march + 2) / 5 + day - 1;
        let day_of_era = year_of_era * 365 + year_of_era / 4 - year_of_era / 100 + day_of_year;

        era * consts::DAYS_PER_ERA + day_of_era - consts::EPOCH_OFFSET_DAYS
    }

    /// Day of the week. 1970-01-01 was a Thursday.
    pub fn weekday(&self) -> Weekday {
        let monday_index = (self.days_since_epoch() + 3).rem_euclid(7);
        // rem_euclid(7) is always in 0..7
        u8::try_from(monday_index)
            .ok()
            .and_then(Weekday::from_monday_index)
            .unwrap_or(Weekday::Mon)
    }

    /// The following calendar day, rolling over month and year ends.
    ///
    /// Returns `None` only for 9999-12-31, whose successor has no
    /// four-digit year.
    pub fn next_date(&self) -> Option<Self> {
        let (year, month, day) = (self.year.get(), self.month.get(), self.day.get());
        let (year, month, day) = if day < days_in_month(self.year, self.month) {
            (year, month, day + 1)
        } else if !self.month.is_last() {
            (year, month + 1, MIN_DAY)
        } else {
            (year.checked_add(1)?, JANUARY, MIN_DAY)
        };
        Self::new(year, month, day).ok()
    }
}

/// Reads a field made only of ASCII digits. Fields here are at most four
/// digits, so the value always fits.
fn parse_digits(field: &[u8]) -> Option<u16> {
    if field.is_empty() {
        return None;
    }
    field
        .iter()
        .try_fold(0u16, |acc, &b| b.is_ascii_digit().then(|| acc * 10 + u16::from(b - b'0')))
}

/// DateValidator entry point: the parsed date, or `None` for any invalid input.
pub fn parse_and_validate(s: &str) -> Option<CalendarDate> {
    CalendarDate::parse(s).ok()
}

/// True when `s` is a real date in strict `YYYY-MM-DD` form.
pub fn is_valid_date(s: &str) -> bool {
    parse_and_validate(s).is_some()
}

impl FromStr for CalendarDate {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<(u16, u8, u8)> for CalendarDate {
    type Error = ParseError;

    fn try_from((year, month, day): (u16, u8, u8)) -> Result<Self, Self::Error> {
        Self::new(year, month, day)
    }
}

impl serde::Serialize for CalendarDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for CalendarDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
