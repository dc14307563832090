//! Web front end for Black-Scholes European option pricing
//!
//! This crate serves an HTML pricing form with a strike scenario table, a CSV
//! export of that table, and JSON endpoints for prices, Greeks and scenarios.
//! Form defaults are pre-filled from live index quotes when available.

pub mod config;
pub mod error;
pub mod export;
pub mod market_data;
pub mod render;
pub mod routes;
pub mod server;
pub mod valuation;

// Re-export pricer dependencies for integration
pub use pricer_core;
pub use pricer_models;

/// Server version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
