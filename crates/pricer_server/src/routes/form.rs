//! HTML pricing form
//!
//! `GET /` shows the form filled with today's dates and market defaults.
//! `POST /` values the submitted fields and renders results or the error
//! inline; the page itself always returns 200, including for bodies that
//! cannot be decoded. A repeated field keeps its first value.

use axum::{
    extract::{rejection::FormRejection, State},
    response::Html,
    routing::get,
    Form, Router,
};
use pricer_core::types::Date;

use super::AppState;
use crate::render::render_page;
use crate::valuation::{evaluate, FormInput, FormValues};

/// Build the form routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(index_handler).post(submit_handler))
}

async fn initial_values(state: &AppState) -> FormValues {
    let market = state.market_defaults().await;
    FormValues::initial(Date::today(), &market)
}

/// GET / - Empty pricing form
async fn index_handler(State(state): State<AppState>) -> Html<String> {
    let values = initial_values(&state).await;
    Html(render_page(&values, None, None))
}

/// POST / - Value the submitted form
async fn submit_handler(
    State(state): State<AppState>,
    form: Result<Form<Vec<(String, String)>>, FormRejection>,
) -> Html<String> {
    let values = initial_values(&state).await;
    let values = match form {
        Ok(Form(pairs)) => values.merge(FormInput::from_pairs(pairs)),
        Err(rejection) => {
            tracing::info!(error = %rejection, "Form body rejected");
            return Html(render_page(&values, None, Some(&rejection.body_text())));
        }
    };

    match evaluate(&values) {
        Ok(valuation) => {
            tracing::info!(
                valuation_date = %values.valuation_date,
                expiry_date = %values.expiry_date,
                time_to_expiry = valuation.time_to_expiry,
                "Form valuation computed"
            );
            Html(render_page(&values, Some(&valuation), None))
        }
        Err(e) => {
            tracing::info!(error = %e, "Form valuation rejected");
            Html(render_page(&values, None, Some(&e.to_string())))
        }
    }
}
