//! Form valuation
//!
//! Turns the six form fields into an at-the-money valuation and the strike
//! scenario table. Numbers are parsed before dates, and dates before pricing,
//! so the first problem found is the one reported.

use pricer_core::types::{percent_to_decimal, time_to_expiry, Date};
use pricer_models::analytical::{GreeksResult, PriceResult, PricingInputs};
use pricer_models::scenarios::{scenario_table_for, ScenarioRow};

use crate::error::FormError;
use crate::market_data::MarketDefaults;

/// Raw form or query-string fields; any of them may be absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormInput {
    /// Valuation date, `YYYY-MM-DD`
    pub valuation_date: Option<String>,
    /// Expiry date, `YYYY-MM-DD`
    pub expiry_date: Option<String>,
    /// Spot level
    pub spot: Option<String>,
    /// Strike level
    pub strike: Option<String>,
    /// Volatility in percent
    pub vol_pct: Option<String>,
    /// Risk-free rate in percent
    pub risk_free_pct: Option<String>,
}

impl FormInput {
    /// Collect the known fields from decoded name/value pairs.
    ///
    /// A repeated field keeps its first value; unknown names are ignored.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut input = Self::default();
        for (name, value) in pairs {
            let slot = match name.as_str() {
                "valuation_date" => &mut input.valuation_date,
                "expiry_date" => &mut input.expiry_date,
                "spot" => &mut input.spot,
                "strike" => &mut input.strike,
                "vol_pct" => &mut input.vol_pct,
                "risk_free_pct" => &mut input.risk_free_pct,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        input
    }
}

/// Field values as shown in the form, defaults merged with submitted input.
#[derive(Debug, Clone, PartialEq)]
pub struct FormValues {
    /// Valuation date as entered
    pub valuation_date: String,
    /// Expiry date as entered
    pub expiry_date: String,
    /// Spot as entered
    pub spot: String,
    /// Strike as entered
    pub strike: String,
    /// Volatility percent as entered
    pub vol_pct: String,
    /// Risk-free rate percent as entered
    pub risk_free_pct: String,
}

impl FormValues {
    /// Values for a fresh form: valued `today`, expiring one month later,
    /// market levels from `market`.
    pub fn initial(today: Date, market: &MarketDefaults) -> Self {
        // add_months only fails at the end of the representable calendar
        let expiry = today.add_months(1).unwrap_or(today);

        Self {
            valuation_date: today.to_string(),
            expiry_date: expiry.to_string(),
            spot: market.spot.to_string(),
            strike: market.strike.to_string(),
            vol_pct: market.vol_pct.to_string(),
            risk_free_pct: market.risk_free_pct.to_string(),
        }
    }

    /// Replace every field present in `input`.
    pub fn merge(mut self, input: FormInput) -> Self {
        let FormInput {
            valuation_date,
            expiry_date,
            spot,
            strike,
            vol_pct,
            risk_free_pct,
        } = input;

        if let Some(v) = valuation_date {
            self.valuation_date = v;
        }
        if let Some(v) = expiry_date {
            self.expiry_date = v;
        }
        if let Some(v) = spot {
            self.spot = v;
        }
        if let Some(v) = strike {
            self.strike = v;
        }
        if let Some(v) = vol_pct {
            self.vol_pct = v;
        }
        if let Some(v) = risk_free_pct {
            self.risk_free_pct = v;
        }
        self
    }
}

/// Parsed form values, before domain validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValuationRequest {
    /// Valuation date
    pub valuation_date: Date,
    /// Expiry date
    pub expiry_date: Date,
    /// Spot level
    pub spot: f64,
    /// Strike level
    pub strike: f64,
    /// Volatility in percent (`20.0` is 20%)
    pub vol_pct: f64,
    /// Risk-free rate in percent
    pub risk_free_pct: f64,
}

/// ATM valuation plus the scenario table.
#[derive(Debug, Clone, PartialEq)]
pub struct Valuation {
    /// Year fraction between valuation and expiry (ACT/365)
    pub time_to_expiry: f64,
    /// ATM call and put
    pub prices: PriceResult,
    /// ATM Greeks
    pub greeks: GreeksResult,
    /// One row per strike multiplier, in order
    pub rows: Vec<ScenarioRow>,
}

fn parse_number(field: &'static str, raw: &str) -> Result<f64, FormError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| FormError::InvalidNumber {
            field,
            value: raw.to_string(),
        })
}

impl ValuationRequest {
    /// Parse the textual form values.
    pub fn parse(values: &FormValues) -> Result<Self, FormError> {
        let spot = parse_number("spot", &values.spot)?;
        let strike = parse_number("strike", &values.strike)?;
        let vol_pct = parse_number("vol_pct", &values.vol_pct)?;
        let risk_free_pct = parse_number("risk_free_pct", &values.risk_free_pct)?;

        Ok(Self {
            valuation_date: Date::parse(&values.valuation_date)?,
            expiry_date: Date::parse(&values.expiry_date)?,
            spot,
            strike,
            vol_pct,
            risk_free_pct,
        })
    }

    /// Price at the submitted strike and across the scenario strikes.
    pub fn value(&self) -> Result<Valuation, FormError> {
        let t = time_to_expiry(self.valuation_date, self.expiry_date)?;
        let inputs = PricingInputs::new(
            self.spot,
            self.strike,
            t,
            percent_to_decimal(self.risk_free_pct),
            percent_to_decimal(self.vol_pct),
        )?;

        let valuation = Valuation {
            time_to_expiry: t,
            prices: inputs.price(),
            greeks: inputs.greeks(),
            rows: scenario_table_for(&inputs)?,
        };

        tracing::debug!(
            spot = self.spot,
            strike = self.strike,
            time_to_expiry = t,
            call = valuation.prices.call_price,
            put = valuation.prices.put_price,
            "Computed valuation"
        );

        Ok(valuation)
    }
}

/// Parse and value `values` in one step.
pub fn evaluate(values: &FormValues) -> Result<Valuation, FormError> {
    ValuationRequest::parse(values)?.value()
}
