//! Black-Scholes pricing model for European options.
//!
//! This module provides closed-form prices and analytical Greeks for European
//! calls and puts on a non-dividend-paying underlying.
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = S·N(d₁) - K·e^(-rT)·N(d₂)
//! **Put Price**: P = K·e^(-rT)·N(-d₂) - S·N(-d₁)
//!
//! Where:
//! - d₁ = (ln(S/K) + (r + σ²/2)T) / (σ√T)
//! - d₂ = d₁ - σ√T
//!
//! ## Units
//!
//! Greeks are reported in absolute units: vega per 1.00 change in volatility,
//! rho per 1.00 change in rate, theta per year. Callers that display
//! per-1% or per-day figures must rescale themselves.

use pricer_core::types::error::{
    PricingError, EXPIRY_NOT_POSITIVE, SPOT_STRIKE_NOT_POSITIVE, VOLATILITY_NOT_POSITIVE,
};

use super::distributions::{norm_cdf, norm_pdf};

/// Validated Black-Scholes inputs for a single option.
///
/// Spot, strike, time to expiry and volatility are strictly positive; the
/// risk-free rate may take any real value, including zero and negative rates.
///
/// # Examples
/// ```
/// use pricer_models::analytical::PricingInputs;
///
/// let inputs = PricingInputs::new(100.0, 100.0, 1.0, 0.05, 0.2).unwrap();
/// let prices = inputs.price();
///
/// // Put-call parity: C - P = S - K*exp(-rT)
/// let parity = prices.call_price - prices.put_price - (100.0 - 100.0 * (-0.05_f64).exp());
/// assert!(parity.abs() < 1e-10);
///
/// // Invalid volatility
/// assert!(PricingInputs::new(100.0, 100.0, 1.0, 0.05, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricingInputs {
    /// Spot price (S)
    spot: f64,
    /// Strike price (K)
    strike: f64,
    /// Time to expiry in years (T)
    time_to_expiry: f64,
    /// Risk-free interest rate (r), continuously compounded
    rate: f64,
    /// Volatility (σ)
    volatility: f64,
}

impl PricingInputs {
    /// Creates validated pricing inputs.
    ///
    /// # Errors
    /// `PricingError::InvalidInput` with one of these reasons, checked in order:
    /// - `"Spot and strike must be positive"` if spot <= 0 or strike <= 0
    /// - `"Time to expiry must be positive"` if time_to_expiry <= 0
    /// - `"Volatility must be positive"` if volatility <= 0
    ///
    /// NaN values fail the same checks.
    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    pub fn new(
        spot: f64,
        strike: f64,
        time_to_expiry: f64,
        rate: f64,
        volatility: f64,
    ) -> Result<Self, PricingError> {
        if !(spot > 0.0) || !(strike > 0.0) {
            return Err(PricingError::invalid_input(SPOT_STRIKE_NOT_POSITIVE));
        }
        if !(time_to_expiry > 0.0) {
            return Err(PricingError::invalid_input(EXPIRY_NOT_POSITIVE));
        }
        if !(volatility > 0.0) {
            return Err(PricingError::invalid_input(VOLATILITY_NOT_POSITIVE));
        }

        Ok(Self {
            spot,
            strike,
            time_to_expiry,
            rate,
            volatility,
        })
    }

    /// Returns the same market inputs at a different strike.
    pub fn with_strike(&self, strike: f64) -> Result<Self, PricingError> {
        Self::new(
            self.spot,
            strike,
            self.time_to_expiry,
            self.rate,
            self.volatility,
        )
    }

    /// Returns the spot price.
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Returns the strike price.
    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Returns the time to expiry in years.
    #[inline]
    pub fn time_to_expiry(&self) -> f64 {
        self.time_to_expiry
    }

    /// Returns the risk-free rate.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Returns the volatility.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Discount factor e^(-rT).
    #[inline]
    pub fn discount_factor(&self) -> f64 {
        (-self.rate * self.time_to_expiry).exp()
    }

    /// Computes the d1 term.
    ///
    /// d₁ = (ln(S/K) + (r + σ²/2)T) / (σ√T)
    #[inline]
    pub fn d1(&self) -> f64 {
        let vol_sqrt_t = self.volatility * self.time_to_expiry.sqrt();
        let log_moneyness = (self.spot / self.strike).ln();
        let drift = (self.rate + 0.5 * self.volatility * self.volatility) * self.time_to_expiry;

        (log_moneyness + drift) / vol_sqrt_t
    }

    /// Computes the d2 term.
    ///
    /// d₂ = d₁ - σ√T
    #[inline]
    pub fn d2(&self) -> f64 {
        self.d1() - self.volatility * self.time_to_expiry.sqrt()
    }

    /// Computes European call and put prices.
    ///
    /// Both prices are floored at zero to absorb negative round-off on deep
    /// out-of-the-money options.
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::PricingInputs;
    ///
    /// let prices = PricingInputs::new(100.0, 100.0, 1.0, 0.05, 0.2).unwrap().price();
    /// assert!((prices.call_price - 10.4506).abs() < 1e-3);
    /// assert!((prices.put_price - 5.5735).abs() < 1e-3);
    /// ```
    pub fn price(&self) -> PriceResult {
        let d1 = self.d1();
        let d2 = d1 - self.volatility * self.time_to_expiry.sqrt();
        let discounted_strike = self.strike * self.discount_factor();

        // C = S·N(d₁) - K·e^(-rT)·N(d₂)
        let call = self.spot * norm_cdf(d1) - discounted_strike * norm_cdf(d2);
        // P = K·e^(-rT)·N(-d₂) - S·N(-d₁)
        let put = discounted_strike * norm_cdf(-d2) - self.spot * norm_cdf(-d1);

        PriceResult {
            call_price: call.max(0.0),
            put_price: put.max(0.0),
        }
    }

    /// Computes the eight standard Greeks for the call and the put.
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::PricingInputs;
    ///
    /// let greeks = PricingInputs::new(100.0, 100.0, 1.0, 0.05, 0.2).unwrap().greeks();
    /// assert!((greeks.call_delta - 0.6368).abs() < 1e-2);
    /// assert_eq!(greeks.put_delta, greeks.call_delta - 1.0);
    /// ```
    pub fn greeks(&self) -> GreeksResult {
        let sqrt_t = self.time_to_expiry.sqrt();
        let d1 = self.d1();
        let d2 = d1 - self.volatility * sqrt_t;
        let pdf = norm_pdf(d1);
        let discount = self.discount_factor();

        let n_d2 = norm_cdf(d2);
        let n_minus_d2 = norm_cdf(-d2);

        // Common theta term: -(S·φ(d₁)·σ)/(2√T)
        let time_decay = -(self.spot * pdf * self.volatility) / (2.0 * sqrt_t);
        let call_delta = norm_cdf(d1);

        GreeksResult {
            call_delta,
            put_delta: call_delta - 1.0,
            gamma: pdf / (self.spot * self.volatility * sqrt_t),
            vega: self.spot * pdf * sqrt_t,
            call_theta: time_decay - self.rate * self.strike * discount * n_d2,
            put_theta: time_decay + self.rate * self.strike * discount * n_minus_d2,
            call_rho: self.strike * self.time_to_expiry * discount * n_d2,
            put_rho: -self.strike * self.time_to_expiry * discount * n_minus_d2,
        }
    }
}

/// European call and put prices for one set of inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct PriceResult {
    /// Call price
    pub call_price: f64,
    /// Put price
    pub put_price: f64,
}

/// Analytical Black-Scholes Greeks in absolute units.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct GreeksResult {
    /// ∂C/∂S = N(d₁)
    pub call_delta: f64,
    /// ∂P/∂S = N(d₁) - 1
    pub put_delta: f64,
    /// ∂²V/∂S², shared by call and put
    pub gamma: f64,
    /// ∂V/∂σ per 1.00 volatility, shared by call and put
    pub vega: f64,
    /// Call theta per year
    pub call_theta: f64,
    /// Put theta per year
    pub put_theta: f64,
    /// ∂C/∂r per 1.00 rate
    pub call_rho: f64,
    /// ∂P/∂r per 1.00 rate
    pub put_rho: f64,
}

/// Prices a European call and put.
///
/// # Errors
/// `PricingError::InvalidInput` when spot, strike, time to expiry or
/// volatility is not strictly positive.
///
/// # Examples
/// ```
/// use pricer_models::analytical::price;
///
/// let prices = price(100.0, 100.0, 1.0, 0.05, 0.2).unwrap();
/// assert!(prices.call_price > prices.put_price);
///
/// assert!(price(100.0, -1.0, 1.0, 0.05, 0.2).is_err());
/// ```
pub fn price(
    spot: f64,
    strike: f64,
    time_to_expiry: f64,
    rate: f64,
    volatility: f64,
) -> Result<PriceResult, PricingError> {
    Ok(PricingInputs::new(spot, strike, time_to_expiry, rate, volatility)?.price())
}

/// Computes call and put Greeks.
///
/// # Errors
/// Same validation as [`price`].
pub fn greeks(
    spot: f64,
    strike: f64,
    time_to_expiry: f64,
    rate: f64,
    volatility: f64,
) -> Result<GreeksResult, PricingError> {
    Ok(PricingInputs::new(spot, strike, time_to_expiry, rate, volatility)?.greeks())
}
