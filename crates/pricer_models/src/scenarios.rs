//! Strike scenario table.
//!
//! Prices the option at a fixed ladder of strikes around a base strike so the
//! presentation layer can show a comparative grid of prices and Greeks.
//! Row order follows [`STRIKE_MULTIPLIERS`] and is relied upon by both the
//! HTML and CSV outputs.

use pricer_core::types::PricingError;

use crate::analytical::{GreeksResult, PricingInputs};

/// Strike multipliers applied to the base strike, in output order.
pub const STRIKE_MULTIPLIERS: [f64; 5] = [0.90, 0.95, 1.00, 1.05, 1.10];

/// One row of the scenario table.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ScenarioRow {
    /// Signed percentage offset from the base strike, e.g. `"-10%"` or `"+0%"`
    pub offset_label: String,
    /// Multiplier applied to the base strike
    pub multiplier: f64,
    /// Strike of this row
    pub strike: f64,
    /// Call price at this strike
    pub call_price: f64,
    /// Put price at this strike
    pub put_price: f64,
    /// Greeks at this strike
    pub greeks: GreeksResult,
}

impl ScenarioRow {
    fn at_multiplier(base: &PricingInputs, multiplier: f64) -> Result<Self, PricingError> {
        let inputs = base.with_strike(base.strike() * multiplier)?;
        let prices = inputs.price();

        Ok(Self {
            offset_label: offset_label(multiplier),
            multiplier,
            strike: inputs.strike(),
            call_price: prices.call_price,
            put_price: prices.put_price,
            greeks: inputs.greeks(),
        })
    }
}

/// Formats a strike multiplier as a signed whole-percent offset.
///
/// The offset is `round((multiplier - 1) * 100)`, always rendered with an
/// explicit sign and a `%` suffix.
///
/// # Examples
/// ```
/// use pricer_models::scenarios::offset_label;
///
/// assert_eq!(offset_label(0.90), "-10%");
/// assert_eq!(offset_label(1.00), "+0%");
/// assert_eq!(offset_label(1.10), "+10%");
/// ```
pub fn offset_label(multiplier: f64) -> String {
    let percent = ((multiplier - 1.0) * 100.0).round() as i64;
    format!("{:+}%", percent)
}

/// Builds the strike scenario table around `base_strike`.
///
/// Returns one row per entry of [`STRIKE_MULTIPLIERS`], in that order.
///
/// # Errors
/// Fails as a whole with the pricing error of the first invalid row; no
/// partial table is returned.
///
/// # Examples
/// ```
/// use pricer_models::scenarios::scenario_table;
///
/// let rows = scenario_table(100.0, 100.0, 1.0, 0.05, 0.2).unwrap();
/// let labels: Vec<&str> = rows.iter().map(|row| row.offset_label.as_str()).collect();
/// assert_eq!(labels, ["-10%", "-5%", "+0%", "+5%", "+10%"]);
/// ```
pub fn scenario_table(
    spot: f64,
    base_strike: f64,
    time_to_expiry: f64,
    rate: f64,
    volatility: f64,
) -> Result<Vec<ScenarioRow>, PricingError> {
    let base = PricingInputs::new(spot, base_strike, time_to_expiry, rate, volatility)?;
    scenario_table_for(&base)
}

/// Builds the strike scenario table from already validated inputs, using
/// their strike as the base strike.
pub fn scenario_table_for(base: &PricingInputs) -> Result<Vec<ScenarioRow>, PricingError> {
    STRIKE_MULTIPLIERS
        .iter()
        .map(|&multiplier| ScenarioRow::at_multiplier(base, multiplier))
        .collect()
}
