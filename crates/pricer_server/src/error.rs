//! Error types for the web layer
//!
//! - [`FormError`]: anything that stops a form or CSV valuation; its message is shown to the user
//! - [`ApiError`]: JSON API failures, rendered as `{"error", "message"}` bodies
//! - [`ServerError`]: startup failures

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use pricer_core::types::{DateError, PricingError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::market_data::MarketDataError;

/// Failure to value a submitted form
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormError {
    /// A numeric field did not parse to a finite number
    #[error("Invalid number for {field}: {value}")]
    InvalidNumber {
        /// Form field name
        field: &'static str,
        /// Submitted text
        value: String,
    },

    /// A date field is malformed or not a calendar date
    #[error(transparent)]
    Date(#[from] DateError),

    /// Inputs rejected by the pricing model
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

/// JSON error body
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// Machine-readable error code
    pub error: String,
    /// Human-readable description
    pub message: String,
}

/// JSON API error
#[derive(Debug, Error)]
pub enum ApiError {
    /// Inputs rejected by the pricing model
    #[error(transparent)]
    InvalidInput(#[from] PricingError),
}

impl ApiError {
    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::InvalidInput(_) => "invalid_input",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::debug!(error = %self, "Rejecting API request");
        let body = ErrorResponse {
            error: self.code().to_string(),
            message: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

/// Server startup error
#[derive(Debug, Error)]
pub enum ServerError {
    /// Configured host and port do not form a socket address
    #[error("Invalid socket address {addr}: {source}")]
    Address {
        /// The `host:port` string
        addr: String,
        /// Parse failure
        source: std::net::AddrParseError,
    },

    /// The HTTP client for quotes could not be built
    #[error("Failed to initialise market data source: {0}")]
    MarketData(#[from] MarketDataError),

    /// Bind or serve failure
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricer_core::types::error::{EXPIRY_BEFORE_VALUATION, VOLATILITY_NOT_POSITIVE};

    #[test]
    fn test_form_error_messages() {
        let err = FormError::InvalidNumber {
            field: "spot",
            value: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid number for spot: abc");

        let err: FormError = PricingError::invalid_input(EXPIRY_BEFORE_VALUATION).into();
        assert_eq!(err.to_string(), EXPIRY_BEFORE_VALUATION);
    }

    #[tokio::test]
    async fn test_api_error_response() {
        let err: ApiError = PricingError::invalid_input(VOLATILITY_NOT_POSITIVE).into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let parsed: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(parsed.error, "invalid_input");
        assert_eq!(parsed.message, VOLATILITY_NOT_POSITIVE);
    }
}
