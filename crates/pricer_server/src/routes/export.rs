//! CSV export endpoint
//!
//! `GET /export_csv` takes the same fields as the form, as query parameters.
//! A repeated parameter keeps its first value.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use pricer_core::types::Date;

use super::AppState;
use crate::export::{scenarios_csv, CSV_FILENAME};
use crate::valuation::{evaluate, FormInput, FormValues};

/// Build the export routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/export_csv", get(export_csv_handler))
}

fn plain_text(status: StatusCode, message: String) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        message,
    )
        .into_response()
}

/// GET /export_csv - Scenario table as a CSV attachment
///
/// Invalid input answers 400 with the error message as plain text.
async fn export_csv_handler(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Response {
    let input = match query {
        Ok(Query(pairs)) => FormInput::from_pairs(pairs),
        Err(rejection) => {
            tracing::info!(error = %rejection, "CSV export query rejected");
            return plain_text(StatusCode::BAD_REQUEST, rejection.body_text());
        }
    };

    let market = state.market_defaults().await;
    let values = FormValues::initial(Date::today(), &market).merge(input);

    let valuation = match evaluate(&values) {
        Ok(valuation) => valuation,
        Err(e) => {
            tracing::info!(error = %e, "CSV export rejected");
            return plain_text(StatusCode::BAD_REQUEST, e.to_string());
        }
    };

    match scenarios_csv(&valuation.rows) {
        Ok(body) => {
            tracing::info!(rows = valuation.rows.len(), "CSV export generated");
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{}\"", CSV_FILENAME),
                    ),
                ],
                body,
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to write CSV");
            plain_text(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to write CSV".to_string(),
            )
        }
    }
}
