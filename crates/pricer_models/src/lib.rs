//! # Pricer Models (L2: Business Logic)
//!
//! Closed-form Black-Scholes pricing for European calls and puts.
//!
//! This crate provides:
//! - Standard normal distribution primitives (`analytical::distributions`)
//! - Black-Scholes prices and Greeks (`analytical::black_scholes`)
//! - The strike scenario table (`scenarios`)
//!
//! ## Usage
//!
//! ```rust
//! use pricer_models::analytical::{greeks, price};
//! use pricer_models::scenarios::scenario_table;
//!
//! let prices = price(100.0, 100.0, 1.0, 0.05, 0.2).unwrap();
//! let sensitivities = greeks(100.0, 100.0, 1.0, 0.05, 0.2).unwrap();
//! let table = scenario_table(100.0, 100.0, 1.0, 0.05, 0.2).unwrap();
//!
//! assert!(prices.call_price > 0.0);
//! assert!(sensitivities.gamma > 0.0);
//! assert_eq!(table.len(), 5);
//! ```
//!
//! ## Scope
//!
//! European exercise only, no dividends, constant volatility and rate.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod scenarios;

pub use analytical::{greeks, price, GreeksResult, PriceResult, PricingInputs};
pub use scenarios::{scenario_table, ScenarioRow, STRIKE_MULTIPLIERS};
