use std::{iter::FusedIterator, str::FromStr};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{CalendarDate, ParseError, RANGE_SEPARATOR, prelude::*};

/// An inclusive span of calendar days.
/// The start is never after the end; constructors put the endpoints in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
#[display(fmt = "{start}/{end}")]
pub struct DateRange {
    start: CalendarDate,
    end:   CalendarDate,
}

/// Error type for date range operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    /// One of the endpoint strings is not a valid date.
    #[error("Invalid date format: {input:?}")]
    InvalidDateFormat {
        input:  String,
        #[source]
        source: ParseError,
    },

    /// Invalid range format.
    #[error("Invalid range format: {0}")]
    InvalidFormat(String),
}

impl DateRange {
    /// Creates a range covering both dates, swapping them if `a` is later than `b`.
    pub fn new(a: CalendarDate, b: CalendarDate) -> Self {
        if a > b {
            debug!(start = %b, end = %a, "swapping out-of-order range endpoints");
            Self { start: b, end: a }
        } else {
            Self { start: a, end: b }
        }
    }

    /// Validates two date strings and builds the range between them.
    ///
    /// # Errors
    /// Returns `RangeError::InvalidDateFormat` naming the first invalid input.
    pub fn from_strs(a: &str, b: &str) -> Result<Self, RangeError> {
        Ok(Self::new(parse_endpoint(a)?, parse_endpoint(b)?))
    }

    /// Returns the earlier endpoint
    pub const fn start(&self) -> CalendarDate {
        self.start
    }

    /// Returns the later endpoint
    pub const fn end(&self) -> CalendarDate {
        self.end
    }

    /// Checks if the range contains a given date, endpoints included
    pub fn contains(&self, date: &CalendarDate) -> bool {
        self.start <= *date && *date <= self.end
    }

    /// Number of days in the range, counting both endpoints
    pub fn num_days(&self) -> u64 {
        (self.end.days_since_epoch() - self.start.days_since_epoch()).unsigned_abs() + 1
    }

    /// Every date from start through end
    pub const fn iter(&self) -> Days {
        Days {
            next: Some(self.start),
            end:  self.end,
        }
    }

    /// Walks the range one day at a time and counts Saturdays and Sundays.
    pub fn weekend_days(&self) -> u64 {
        let mut count = 0;
        for date in self {
            let weekday = date.weekday();
            if weekday.is_weekend() {
                trace!(%date, %weekday, "weekend day");
                count += 1;
            }
        }
        count
    }
}

fn parse_endpoint(input: &str) -> Result<CalendarDate, RangeError> {
    CalendarDate::parse(input).map_err(|source| RangeError::InvalidDateFormat {
        input: input.to_owned(),
        source,
    })
}

/// Counts the weekend days between two `YYYY-MM-DD` dates, inclusive of both.
///
/// The dates may be given in either order.
///
/// # Errors
/// Returns `RangeError::InvalidDateFormat` if either input fails validation.
pub fn count_weekend_days(start: &str, end: &str) -> Result<u64, RangeError> {
    let range = DateRange::from_strs(start, end)?;
    let count = range.weekend_days();
    debug!(%range, days = range.num_days(), count, "counted weekend days");
    Ok(count)
}

/// Iterator over the days of a [`DateRange`].
#[derive(Debug, Clone)]
pub struct Days {
    next: Option<CalendarDate>,
    end:  CalendarDate,
}

impl Iterator for Days {
    type Item = CalendarDate;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = if current < self.end {
            current.next_date()
        } else {
            None
        };
        Some(current)
    }
}

impl FusedIterator for Days {}

impl IntoIterator for &DateRange {
    type Item = CalendarDate;
    type IntoIter = Days;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromStr for DateRange {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let separator_count = trimmed.matches(RANGE_SEPARATOR).count();

        match trimmed.split_once(RANGE_SEPARATOR) {
            Some((start, end)) if separator_count == 1 => Self::from_strs(start.trim(), end.trim()),
            None => Err(RangeError::InvalidFormat(format!(
                "No range separator found (expected '{RANGE_SEPARATOR}'): {s}"
            ))),
            Some(_) => Err(RangeError::InvalidFormat(format!(
                "Too many '{RANGE_SEPARATOR}' separators: expected 1, found {separator_count}"
            ))),
        }
    }
}

impl Serialize for DateRange {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for DateRange {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
