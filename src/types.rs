use crate::consts::{
    CENTURY_CYCLE, DAYS_IN_MONTH, DECEMBER, FEBRUARY, FEBRUARY_DAYS_LEAP, GREGORIAN_CYCLE,
    JANUARY, LEAP_YEAR_CYCLE, MAX_MONTH, MAX_YEAR,
};
use crate::{CalendarError, ParseError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU16;
use std::num::NonZeroU8;

/// A year value guaranteed to be in the range `1..=MAX_YEAR` (1..=9999)
/// Uses `NonZeroU16` internally, so 0 is not a valid year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct Year(NonZeroU16);

impl Year {
    /// Creates a new Year, validating that it's non-zero and <= `MAX_YEAR`
    ///
    /// # Errors
    /// Returns `ParseError::InvalidYear` if the value is 0 or > `MAX_YEAR`.
    pub fn new(value: u16) -> Result<Self, ParseError> {
        let non_zero = NonZeroU16::new(value).ok_or(ParseError::InvalidYear(value))?;
        if value > MAX_YEAR {
            return Err(ParseError::InvalidYear(value));
        }
        Ok(Self(non_zero))
    }

    /// Returns the year value as u16
    #[inline]
    pub const fn get(self) -> u16 {
        self.0.get()
    }

    /// Whether this year has a February 29th
    #[inline]
    pub const fn is_leap(self) -> bool {
        is_leap_year(self.get() as i32)
    }
}

impl TryFrom<u16> for Year {
    type Error = ParseError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Year> for u16 {
    fn from(year: Year) -> Self {
        year.0.get()
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.get())
    }
}

/// A month value guaranteed to be in the range `1..=MAX_MONTH` (1..=12)
/// Uses `NonZeroU8` internally, so 0 is not a valid month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Month(NonZeroU8);

impl Month {
    /// Creates a new Month, validating that it's non-zero and <= `MAX_MONTH`
    ///
    /// # Errors
    /// Returns `ParseError::InvalidMonth` if the value is 0 or > `MAX_MONTH`.
    pub fn new(value: u8) -> Result<Self, ParseError> {
        let non_zero = NonZeroU8::new(value).ok_or(ParseError::InvalidMonth(value))?;
        if value > MAX_MONTH {
            return Err(ParseError::InvalidMonth(value));
        }
        Ok(Self(non_zero))
    }

    /// Returns the month value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }

    /// True for December, the month whose successor is in the next year
    #[inline]
    pub const fn is_last(self) -> bool {
        self.get() == DECEMBER
    }
}

impl TryFrom<u8> for Month {
    type Error = ParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Month> for u8 {
    fn from(month: Month) -> Self {
        month.0.get()
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.get())
    }
}

/// A day value guaranteed to be valid for a given year and month
/// Uses `NonZeroU8` internally, so 0 is not a valid day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Day(NonZeroU8);

impl Day {
    /// Creates a new Day, validating that it's non-zero and fits the given year and month
    ///
    /// # Errors
    /// Returns `ParseError::InvalidDay` if the value is 0 or past the end of the month.
    pub fn new(value: u8, year: Year, month: Month) -> Result<Self, ParseError> {
        let invalid = ParseError::InvalidDay {
            year:  year.get(),
            month: month.get(),
            day:   value,
        };
        let non_zero = NonZeroU8::new(value).ok_or_else(|| invalid.clone())?;
        if value > days_in_month(year, month) {
            return Err(invalid);
        }
        Ok(Self(non_zero))
    }

    /// Returns the day value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl TryFrom<u8> for Day {
    type Error = ParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        // Without year/month context only the widest month can be checked
        let longest = DAYS_IN_MONTH[DECEMBER as usize];
        match NonZeroU8::new(value) {
            Some(non_zero) if value <= longest => Ok(Self(non_zero)),
            _ => Err(ParseError::InvalidDay {
                year:  0,
                month: 0,
                day:   value,
            }),
        }
    }
}

impl From<Day> for u8 {
    fn from(day: Day) -> Self {
        day.0.get()
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.get())
    }
}

/// Proleptic Gregorian leap year rule, defined for every integer year.
pub const fn is_leap_year(year: i32) -> bool {
    year % LEAP_YEAR_CYCLE == 0 && (year % CENTURY_CYCLE != 0 || year % GREGORIAN_CYCLE == 0)
}

/// Number of days in `month` of `year`.
///
/// # Errors
/// Returns `CalendarError::InvalidMonth` if `month` is outside `1..=12`.
pub const fn month_length(month: u8, year: i32) -> Result<u8, CalendarError> {
    if month < JANUARY || month > MAX_MONTH {
        return Err(CalendarError::InvalidMonth(month));
    }
    if month == FEBRUARY && is_leap_year(year) {
        Ok(FEBRUARY_DAYS_LEAP)
    } else {
        Ok(DAYS_IN_MONTH[month as usize])
    }
}

/// Month length for already validated components.
pub const fn days_in_month(year: Year, month: Month) -> u8 {
    if month.get() == FEBRUARY && year.is_leap() {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month.get() as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn year(value: u16) -> Year {
        Year::new(value).expect("valid year")
    }

    fn month(value: u8) -> Month {
        Month::new(value).expect("valid month")
    }

    #[test]
    fn test_year_new_valid() {
        assert!(Year::new(1).is_ok());
        assert!(Year::new(2000).is_ok());
        assert!(Year::new(9999).is_ok());
    }

    #[test]
    fn test_year_new_invalid_zero() {
        let result = Year::new(0);
        assert!(matches!(result, Err(ParseError::InvalidYear(0))));
    }

    #[test]
    fn test_year_new_invalid_too_large() {
        let result = Year::new(10000);
        assert!(matches!(result, Err(ParseError::InvalidYear(10000))));
    }

    #[test]
    fn test_year_display_is_zero_padded() {
        assert_eq!(year(2024).to_string(), "2024");
        assert_eq!(year(7).to_string(), "0007");
    }

    #[test]
    fn test_year_serde() {
        let y = year(2024);
        let json = serde_json::to_string(&y).expect("serialize year");
        assert_eq!(json, "2024");

        let parsed: Year = serde_json::from_str(&json).expect("deserialize year");
        assert_eq!(y, parsed);

        assert!(serde_json::from_str::<Year>("0").is_err());
    }

    #[test]
    fn test_month_new_valid() {
        for m in 1..=12 {
            assert!(Month::new(m).is_ok(), "Month {m} should be valid");
        }
    }

    #[test]
    fn test_month_new_invalid() {
        assert!(matches!(Month::new(0), Err(ParseError::InvalidMonth(0))));
        assert!(matches!(Month::new(13), Err(ParseError::InvalidMonth(13))));
        assert!(matches!(Month::new(255), Err(ParseError::InvalidMonth(255))));
    }

    #[test]
    fn test_month_is_last() {
        assert!(month(12).is_last());
        assert!(!month(11).is_last());
    }

    #[test]
    fn test_day_new_respects_month_length() {
        // January - 31 days
        assert!(Day::new(1, year(2024), month(1)).is_ok());
        assert!(Day::new(31, year(2024), month(1)).is_ok());
        assert!(Day::new(32, year(2024), month(1)).is_err());

        // February non-leap - 28 days
        assert!(Day::new(28, year(2023), month(2)).is_ok());
        assert!(Day::new(29, year(2023), month(2)).is_err());

        // February leap year - 29 days
        assert!(Day::new(29, year(2024), month(2)).is_ok());
        assert!(Day::new(30, year(2024), month(2)).is_err());

        // April - 30 days
        assert!(Day::new(30, year(2024), month(4)).is_ok());
        assert!(Day::new(31, year(2024), month(4)).is_err());
    }

    #[test]
    fn test_day_new_reports_context() {
        let result = Day::new(0, year(2024), month(1));
        assert!(matches!(
            result,
            Err(ParseError::InvalidDay {
                year:  2024,
                month: 1,
                day:   0,
            })
        ));
    }

    #[test]
    fn test_day_serde_context_free() {
        let parsed: Day = serde_json::from_str("15").expect("deserialize day");
        assert_eq!(parsed.get(), 15);
        assert!(serde_json::from_str::<Day>("0").is_err());
        assert!(serde_json::from_str::<Day>("32").is_err());
    }

    #[test]
    fn test_is_leap_year_cases() {
        struct TestCase {
            year:        i32,
            is_leap:     bool,
            description: &'static str,
        }

        let cases = [
            TestCase {
                year:        2024,
                is_leap:     true,
                description: "divisible by 4",
            },
            TestCase {
                year:        2023,
                is_leap:     false,
                description: "not divisible by 4",
            },
            TestCase {
                year:        1900,
                is_leap:     false,
                description: "century not divisible by 400",
            },
            TestCase {
                year:        2100,
                is_leap:     false,
                description: "century not divisible by 400",
            },
            TestCase {
                year:        2000,
                is_leap:     true,
                description: "divisible by 400",
            },
            TestCase {
                year:        0,
                is_leap:     true,
                description: "year zero is divisible by 400",
            },
            TestCase {
                year:        -4,
                is_leap:     true,
                description: "negative year divisible by 4",
            },
            TestCase {
                year:        -100,
                is_leap:     false,
                description: "negative century not divisible by 400",
            },
            TestCase {
                year:        -1,
                is_leap:     false,
                description: "negative year not divisible by 4",
            },
        ];

        for case in &cases {
            assert_eq!(
                is_leap_year(case.year),
                case.is_leap,
                "Year {} ({})",
                case.year,
                case.description
            );
        }
    }

    #[test]
    fn test_is_leap_year_matches_rule_over_wide_span() {
        for y in -2000..=2800 {
            let expected = y % 400 == 0 || (y % 4 == 0 && y % 100 != 0);
            assert_eq!(is_leap_year(y), expected, "year {y}");
        }
    }

    #[test]
    fn test_month_length_boundaries() {
        assert_eq!(month_length(2, 2000), Ok(29));
        assert_eq!(month_length(2, 1900), Ok(28));
        assert_eq!(month_length(2, 2024), Ok(29));
        assert_eq!(month_length(2, 2023), Ok(28));
    }

    #[test]
    fn test_month_length_fixed_months() {
        for m in [1, 3, 5, 7, 8, 10, 12] {
            assert_eq!(month_length(m, 2023), Ok(31), "Month {m} should have 31 days");
        }
        for m in [4, 6, 9, 11] {
            assert_eq!(month_length(m, 2023), Ok(30), "Month {m} should have 30 days");
        }
    }

    #[test]
    fn test_month_length_rejects_out_of_range() {
        assert_eq!(month_length(0, 2024), Err(CalendarError::InvalidMonth(0)));
        assert_eq!(month_length(13, 2024), Err(CalendarError::InvalidMonth(13)));
    }

    #[test]
    fn test_days_in_month_agrees_with_month_length() {
        for y in [1, 1900, 2000, 2023, 2024, 9999] {
            for m in 1..=12 {
                assert_eq!(
                    Ok(days_in_month(year(y), month(m))),
                    month_length(m, i32::from(y)),
                    "{y}-{m:02}"
                );
            }
        }
    }
}
