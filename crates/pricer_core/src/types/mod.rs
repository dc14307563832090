//! Core time and error types, plus boundary unit conversions.
//!
//! This module provides:
//! - `time`: `Date` and the ACT/365 time-to-expiry conversion used at the request boundary
//! - `percent`: Conversion of quoted percentages to decimals
//! - `error`: Structured error types for pricing and date operations
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level:
//! - [`Date`], [`time_to_expiry`], [`DAYS_PER_YEAR`] from `time`
//! - [`percent_to_decimal`] from `percent`
//! - [`PricingError`], [`DateError`] from `error`

pub mod error;
pub mod percent;
pub mod time;

// Re-export commonly used types at module level
pub use error::{DateError, PricingError};
pub use percent::percent_to_decimal;
pub use time::{time_to_expiry, Date, DAYS_PER_YEAR};
