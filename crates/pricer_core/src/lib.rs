//! # pricer_core: Foundation Types for the Black-Scholes Pricer
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core is the bottom layer of the workspace, providing:
//! - Error types: `PricingError`, `DateError` (`types::error`)
//! - Time types: `Date` and the ACT/365 `time_to_expiry` conversion (`types::time`)
//! - Percent-to-decimal conversion for quoted rates and volatilities (`types::percent`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates, with minimal external dependencies:
//! - chrono: Date arithmetic
//! - thiserror: Error derivation
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::types::{percent_to_decimal, time_to_expiry, Date};
//!
//! let valuation = Date::from_ymd(2026, 2, 16).unwrap();
//! let expiry = Date::from_ymd(2026, 3, 16).unwrap();
//!
//! // 28 days on an ACT/365 basis
//! let t = time_to_expiry(valuation, expiry).unwrap();
//! assert!((t - 28.0 / 365.0).abs() < 1e-12);
//!
//! // Quoted 20% volatility
//! assert!((percent_to_decimal(20.0) - 0.2).abs() < 1e-12);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for `Date`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod types;
