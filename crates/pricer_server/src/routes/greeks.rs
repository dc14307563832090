//! Greeks calculation endpoints
//!
//! Greeks are in absolute units: vega per 1.00 volatility, rho per 1.00 rate,
//! theta per year.

use axum::{response::Json, routing::post, Router};
use pricer_models::analytical::GreeksResult;

use super::pricing::PricingRequest;
use super::AppState;
use crate::error::ApiError;

/// Build the greeks routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/api/v1/greeks", post(greeks_handler))
}

/// POST /api/v1/greeks - Call and put Greeks
async fn greeks_handler(
    Json(request): Json<PricingRequest>,
) -> Result<Json<GreeksResult>, ApiError> {
    Ok(Json(request.inputs()?.greeks()))
}
