//! Time types for option valuation.
//!
//! This module provides:
//! - `Date`: Type-safe date wrapper around chrono::NaiveDate
//! - `time_to_expiry`: ACT/365 year fraction between valuation and expiry dates
//!
//! # Examples
//!
//! ```
//! use pricer_core::types::time::{time_to_expiry, Date};
//!
//! let valuation = Date::from_ymd(2024, 1, 1).unwrap();
//! let expiry = Date::from_ymd(2024, 7, 1).unwrap();
//!
//! // 182 days / 365.0
//! let t = time_to_expiry(valuation, expiry).unwrap();
//! assert!((t - 0.4986).abs() < 0.001);
//! ```

use chrono::{Datelike, Local, Months, NaiveDate};
use std::fmt;
use std::ops::Sub;
use std::str::FromStr;

use super::error::{DateError, PricingError, EXPIRY_BEFORE_VALUATION};

/// Days in a year under the ACT/365 Fixed convention.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Type-safe date wrapper around chrono::NaiveDate.
///
/// Provides ISO 8601 parsing and formatting and whole-day arithmetic.
///
/// # Examples
///
/// ```
/// use pricer_core::types::time::Date;
///
/// // Create from year, month, day
/// let date = Date::from_ymd(2024, 6, 15).unwrap();
/// assert_eq!(date.year(), 2024);
/// assert_eq!(date.month(), 6);
/// assert_eq!(date.day(), 15);
///
/// // Parse from ISO 8601 string
/// let parsed: Date = "2024-06-15".parse().unwrap();
/// assert_eq!(date, parsed);
///
/// // Calculate days between dates
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
    /// # Returns
    /// `Ok(Date)` if the date is valid, `Err(DateError::InvalidDate)` otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_core::types::time::Date;
    ///
    /// // Leap year February 29th
    /// assert!(Date::from_ymd(2024, 2, 29).is_ok());
    ///
    /// // Invalid date returns error
    /// assert!(Date::from_ymd(2024, 2, 30).is_err());
    /// ```
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, DateError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or(DateError::InvalidDate { year, month, day })
    }

    /// Returns today's date based on local system time.
    pub fn today() -> Self {
        Date(Local::now().date_naive())
    }

    /// Parses a date from ISO 8601 format string (YYYY-MM-DD).
    ///
    /// Surrounding whitespace is ignored. Month and day must be zero-padded
    /// and the year must be four digits without a sign.
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_core::types::time::Date;
    ///
    /// let date = Date::parse("2024-06-15").unwrap();
    /// assert_eq!(date.year(), 2024);
    ///
    /// assert!(Date::parse("not-a-date").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, DateError> {
        let trimmed = s.trim();
        let well_formed = trimmed.len() == 10
            && trimmed.bytes().enumerate().all(|(i, b)| match i {
                4 | 7 => b == b'-',
                _ => b.is_ascii_digit(),
            });
        if !well_formed {
            return Err(DateError::ParseError(format!(
                "expected YYYY-MM-DD: '{}'",
                s
            )));
        }

        NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            .map(Date)
            .map_err(|e| DateError::ParseError(format!("{}: '{}'", e, s)))
    }

    /// Adds whole calendar months.
    ///
    /// When the target month is shorter, the day is clamped to its last day
    /// (January 31st plus one month is the last day of February).
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_core::types::time::Date;
    ///
    /// let date = Date::from_ymd(2024, 1, 31).unwrap();
    /// assert_eq!(date.add_months(1).unwrap(), Date::from_ymd(2024, 2, 29).unwrap());
    /// ```
    pub fn add_months(self, months: u32) -> Result<Self, DateError> {
        self.0
            .checked_add_months(Months::new(months))
            .map(Date)
            .ok_or(DateError::InvalidDate {
                year: self.year(),
                month: self.month().saturating_add(months),
                day: self.day(),
            })
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

    /// Returns the number of whole days between two dates.
    ///
    /// The result is positive if `self` is after `other`, negative otherwise.
    fn sub(self, other: Self) -> i64 {
        (self.0 - other.0).num_days()
    }
}

impl FromStr for Date {
    type Err = DateError;

    /// Parses a date from ISO 8601 format string (YYYY-MM-DD).
    fn from_str(s: &str) -> Result<Self, DateError> {
        Date::parse(s)
    }
}

impl fmt::Display for Date {
    /// Formats the date as ISO 8601 (YYYY-MM-DD).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Date(date)
    }
}

/// Time to expiry in years between a valuation date and an expiry date.
///
/// Uses the whole-day difference on an ACT/365 Fixed basis. The expiry must
/// fall strictly after the valuation date.
///
/// # Errors
/// `PricingError::InvalidInput("Expiry date must be after valuation date")`
/// when the day count is zero or negative.
///
/// # Examples
///
/// ```
/// use pricer_core::types::time::{time_to_expiry, Date};
///
/// let valuation = Date::from_ymd(2024, 1, 1).unwrap();
/// let expiry = Date::from_ymd(2025, 1, 1).unwrap();
///
/// // 2024 is a leap year: 366 / 365
/// let t = time_to_expiry(valuation, expiry).unwrap();
/// assert!((t - 1.0027).abs() < 0.001);
///
/// assert!(time_to_expiry(valuation, valuation).is_err());
/// ```
pub fn time_to_expiry(valuation: Date, expiry: Date) -> Result<f64, PricingError> {
    let days = expiry - valuation;
    if days <= 0 {
        return Err(PricingError::invalid_input(EXPIRY_BEFORE_VALUATION));
    }
    Ok(days as f64 / DAYS_PER_YEAR)
}
