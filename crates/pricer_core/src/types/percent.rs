//! Percent-to-decimal conversion at the request boundary.
//!
//! Volatility and risk-free rate arrive quoted in percent (`20.0` meaning 20%)
//! and the pricing core works in decimals.

/// Converts a quoted percentage into a decimal fraction.
///
/// # Examples
/// ```
/// use pricer_core::types::percent_to_decimal;
///
/// assert!((percent_to_decimal(4.0) - 0.04).abs() < 1e-15);
/// assert!((percent_to_decimal(-0.5) + 0.005).abs() < 1e-15);
/// ```
#[inline]
pub fn percent_to_decimal(percent: f64) -> f64 {
    percent / 100.0
}
