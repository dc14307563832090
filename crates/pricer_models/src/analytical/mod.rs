//! Analytical pricing formulas for European options.
//!
//! This module provides closed-form solutions for option pricing:
//! - Standard normal CDF and PDF
//! - Black-Scholes model for lognormal dynamics
//! - Analytical Greeks (Delta, Gamma, Vega, Theta, Rho)
//!
//! Every function here is pure: no shared state, no I/O, safe to call from
//! any number of threads.

pub mod black_scholes;
pub mod distributions;

// Re-export main types at module level
pub use black_scholes::{greeks, price, GreeksResult, PriceResult, PricingInputs};
pub use distributions::{norm_cdf, norm_pdf};
