//! Option pricing endpoints
//!
//! Provides JSON endpoints for European call/put prices and the strike
//! scenario table. Inputs are in decimal units (`0.2` is 20% volatility).

use axum::{response::Json, routing::post, Router};
use pricer_models::analytical::{PriceResult, PricingInputs};
use pricer_models::scenarios::{scenario_table_for, ScenarioRow};
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::error::ApiError;

/// Pricing request shared by the price, greeks and scenario endpoints
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingRequest {
    /// Spot price of the underlying
    pub spot: f64,
    /// Strike; the base strike for scenarios
    pub strike: f64,
    /// Year fraction
    pub time_to_expiry: f64,
    /// Continuously compounded risk-free rate
    pub rate: f64,
    /// Annualised volatility as a decimal
    pub volatility: f64,
}

impl PricingRequest {
    /// Validate into pricing inputs
    pub fn inputs(&self) -> Result<PricingInputs, ApiError> {
        Ok(PricingInputs::new(
            self.spot,
            self.strike,
            self.time_to_expiry,
            self.rate,
            self.volatility,
        )?)
    }
}

/// Scenario table response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenariosResponse {
    /// One row per strike multiplier, in order
    pub rows: Vec<ScenarioRow>,
}

/// Build the pricing routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/price", post(price_handler))
        .route("/api/v1/scenarios", post(scenarios_handler))
}

/// POST /api/v1/price - European call and put prices
async fn price_handler(Json(request): Json<PricingRequest>) -> Result<Json<PriceResult>, ApiError> {
    let prices = request.inputs()?.price();
    tracing::debug!(?request, ?prices, "Priced");
    Ok(Json(prices))
}

/// POST /api/v1/scenarios - Prices and Greeks across the strike ladder
async fn scenarios_handler(
    Json(request): Json<PricingRequest>,
) -> Result<Json<ScenariosResponse>, ApiError> {
    let rows = scenario_table_for(&request.inputs()?)?;
    Ok(Json(ScenariosResponse { rows }))
}
