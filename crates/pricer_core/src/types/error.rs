//! Error types for structured error handling.
//!
//! This module provides:
//! - `DateError`: Errors from date construction, parsing and tenor strings
//! - `CurrencyError`: Errors from currency and currency-pair parsing

use std::fmt;

/// Date construction and parsing errors.
///
/// # Variants
/// - `InvalidDate`: The year/month/day triple does not name a calendar date
/// - `ParseError`: The string is not an ISO 8601 date
/// - `InvalidTenor`: The tenor string is not `<n><D|W|M|Y>`
///
/// # Examples
/// ```
/// use pricer_core::types::error::DateError;
///
/// let err = DateError::InvalidDate { year: 2024, month: 2, day: 30 };
/// assert_eq!(format!("{}", err), "Invalid date: 2024-2-30");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    /// Invalid date components.
    InvalidDate {
        /// Year component
        year: i32,
        /// Month component (1-12)
        month: u32,
        /// Day component (1-31)
        day: u32,
    },

    /// Failed to parse a date string.
    ParseError(String),

    /// Tenor string could not be interpreted.
    InvalidTenor(String),
}

impl fmt::Display for DateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateError::InvalidDate { year, month, day } => {
                write!(f, "Invalid date: {}-{}-{}", year, month, day)
            }
            DateError::ParseError(msg) => write!(f, "Date parse error: {}", msg),
            DateError::InvalidTenor(tenor) => write!(f, "Invalid tenor: {}", tenor),
        }
    }
}

impl std::error::Error for DateError {}

/// Currency and currency-pair errors.
///
/// # Examples
/// ```
/// use pricer_core::types::error::CurrencyError;
///
/// let err = CurrencyError::UnknownCurrency("XYZ".to_string());
/// assert_eq!(format!("{}", err), "Unknown currency: XYZ");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CurrencyError {
    /// Unknown ISO 4217 code.
    UnknownCurrency(String),

    /// Malformed currency-pair string.
    ParseError(String),

    /// Base and quote currencies are identical.
    SameCurrency(String),
}

impl fmt::Display for CurrencyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurrencyError::UnknownCurrency(code) => write!(f, "Unknown currency: {}", code),
            CurrencyError::ParseError(msg) => write!(f, "Currency parse error: {}", msg),
            CurrencyError::SameCurrency(code) => {
                write!(f, "Base and quote currencies are the same: {}", code)
            }
        }
    }
}

impl std::error::Error for CurrencyError {}
