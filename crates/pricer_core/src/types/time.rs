//! Time types and year-fraction conventions for the hedging engine.
//!
//! This module provides:
//! - `Date`: Type-safe date wrapper around chrono::NaiveDate
//! - `year_fraction`: valuation-to-maturity time on an ACT/365.25 basis,
//!   floored at zero so that expired instruments have `t == 0`
//! - `tenor_to_years`: market tenor strings (`"1W"`, `"3M"`, `"2Y"`) to years
//!
//! # Examples
//!
//! ```
//! use pricer_core::types::time::{year_fraction, Date};
//!
//! let valuation = Date::from_ymd(2024, 1, 1).unwrap();
//! let maturity = Date::from_ymd(2025, 1, 1).unwrap();
//!
//! let t = year_fraction(valuation, maturity);
//! assert!((t - 366.0 / 365.25).abs() < 1e-12);
//!
//! // Maturity in the past is clamped to zero
//! assert_eq!(year_fraction(maturity, valuation), 0.0);
//! ```

use chrono::{Datelike, Local, Months, NaiveDate};
use std::fmt;
use std::ops::Sub;
use std::str::FromStr;

use super::error::DateError;

/// Days per year used for every time-to-maturity in the engine.
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Weeks per year used by [`tenor_to_years`].
pub const WEEKS_PER_YEAR: f64 = 52.18;

/// Type-safe date wrapper around chrono::NaiveDate.
///
/// Serialises as an ISO 8601 string (`"2024-06-15"`).
///
/// # Examples
///
/// ```
/// use pricer_core::types::time::Date;
///
/// let date = Date::from_ymd(2024, 6, 15).unwrap();
/// assert_eq!(date.year(), 2024);
///
/// let parsed: Date = "2024-06-15".parse().unwrap();
/// assert_eq!(date, parsed);
///
/// let start = Date::from_ymd(2024, 1, 1).unwrap();
/// let end = Date::from_ymd(2024, 1, 11).unwrap();
/// assert_eq!(end - start, 10);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a Date from year, month, and day components.
    ///
    /// # Errors
    /// Returns `DateError::InvalidDate` if the components do not form a valid date.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, DateError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or(DateError::InvalidDate { year, month, day })
    }

    /// Returns today's date in the local timezone.
    pub fn today() -> Self {
        Date(Local::now().date_naive())
    }

    /// Parses a date from an ISO 8601 string (YYYY-MM-DD).
    pub fn parse(s: &str) -> Result<Self, DateError> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Date)
            .map_err(|e| DateError::ParseError(format!("{}: {}", s, e)))
    }

    /// Returns the date `months` calendar months later.
    ///
    /// Month-end dates roll back to the last valid day (31 Jan + 1M = 29 Feb
    /// in a leap year).
    pub fn add_months(self, months: u32) -> Result<Self, DateError> {
        self.0
            .checked_add_months(Months::new(months))
            .map(Date)
            .ok_or_else(|| DateError::ParseError(format!("{} + {} months overflows", self, months)))
    }

    /// Returns the underlying NaiveDate.
    pub fn into_inner(self) -> NaiveDate {
        self.0
    }

    /// Returns the year component.
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month component (1-12).
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day component (1-31).
    pub fn day(&self) -> u32 {
        self.0.day()
    }
}

impl Sub for Date {
    type Output = i64;

    /// Signed number of days between two dates.
    fn sub(self, other: Self) -> i64 {
        (self.0 - other.0).num_days()
    }
}

impl FromStr for Date {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, DateError> {
        Date::parse(s)
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Date(date)
    }
}

/// Time to maturity in years: `max(0, (maturity − valuation) / 365.25)`.
///
/// A result of exactly `0.0` marks the instrument as expired.
#[inline]
pub fn year_fraction(valuation: Date, maturity: Date) -> f64 {
    let days = (maturity - valuation) as f64;
    (days / DAYS_PER_YEAR).max(0.0)
}

/// Converts a market tenor string to a year fraction.
///
/// Supported units (case-insensitive): `D` (days / 365.25), `W` (weeks / 52.18),
/// `M` (months / 12), `Y` (years).
///
/// # Errors
/// Returns `DateError::InvalidTenor` for an empty string, a non-numeric
/// count, or an unknown unit.
///
/// # Examples
/// ```
/// use pricer_core::types::time::tenor_to_years;
///
/// assert_eq!(tenor_to_years("6M").unwrap(), 0.5);
/// assert_eq!(tenor_to_years("2y").unwrap(), 2.0);
/// assert!(tenor_to_years("3Q").is_err());
/// ```
pub fn tenor_to_years(tenor: &str) -> Result<f64, DateError> {
    let tenor = tenor.trim();
    let invalid = || DateError::InvalidTenor(tenor.to_string());

    let unit = tenor.chars().last().ok_or_else(invalid)?;
    let count: f64 = tenor[..tenor.len() - unit.len_utf8()]
        .parse()
        .map_err(|_| invalid())?;

    match unit.to_ascii_uppercase() {
        'D' => Ok(count / DAYS_PER_YEAR),
        'W' => Ok(count / WEEKS_PER_YEAR),
        'M' => Ok(count / 12.0),
        'Y' => Ok(count),
        _ => Err(invalid()),
    }
}
