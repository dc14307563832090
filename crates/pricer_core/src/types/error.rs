//! Error types for structured error handling.
//!
//! This module provides:
//! - `PricingError`: Errors from pricing operations
//! - `DateError`: Errors from date construction and parsing

use thiserror::Error;

/// Reason reported when spot or strike is not strictly positive.
pub const SPOT_STRIKE_NOT_POSITIVE: &str = "Spot and strike must be positive";

/// Reason reported when the time to expiry is not strictly positive.
pub const EXPIRY_NOT_POSITIVE: &str = "Time to expiry must be positive";

/// Reason reported when volatility is not strictly positive.
pub const VOLATILITY_NOT_POSITIVE: &str = "Volatility must be positive";

/// Reason reported when the expiry date does not fall after the valuation date.
pub const EXPIRY_BEFORE_VALUATION: &str = "Expiry date must be after valuation date";

/// Pricing errors.
///
/// Validation failure is the only failure mode of the closed-form core. The
/// variant carries a human-readable reason which is displayed verbatim, so the
/// boundary can show it to the end user as-is.
///
/// # Examples
/// ```
/// use pricer_core::types::PricingError;
///
/// let err = PricingError::invalid_input("Volatility must be positive");
/// assert_eq!(format!("{}", err), "Volatility must be positive");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    /// Invalid input data or parameters
    #[error("{0}")]
    InvalidInput(String),
}

impl PricingError {
    /// Create an invalid input error
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput(reason.into())
    }

    /// Returns the human-readable reason.
    pub fn reason(&self) -> &str {
        match self {
            PricingError::InvalidInput(reason) => reason,
        }
    }
}

/// Date-related errors.
///
/// Provides structured error handling for date construction and parsing
/// with descriptive context for each failure mode.
///
/// # Variants
/// - `InvalidDate`: Invalid date components (e.g., February 30th)
/// - `ParseError`: Failed to parse date string
///
/// # Examples
/// ```
/// use pricer_core::types::DateError;
///
/// let err = DateError::InvalidDate { year: 2024, month: 2, day: 30 };
/// assert_eq!(format!("{}", err), "Invalid date: 2024-2-30");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    /// Invalid date components (e.g., February 30th).
    #[error("Invalid date: {year}-{month}-{day}")]
    InvalidDate {
        /// Year component
        year: i32,
        /// Month component (1-12)
        month: u32,
        /// Day component (1-31)
        day: u32,
    },

    /// Failed to parse date string.
    #[error("Date parse error: {0}")]
    ParseError(String),
}
