//! End-to-end tests through the public router.
//!
//! The router is driven with `oneshot`, so no sockets are opened.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use pricer_server::config::ServerConfig;
use pricer_server::market_data::StaticQuoteSource;
use pricer_server::routes::{build_router, AppState};
use tower::ServiceExt;

fn offline_router() -> axum::Router {
    let mut config = ServerConfig::default();
    config.market_data.enabled = false;
    build_router(AppState::from_config(Arc::new(config)).unwrap())
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_export_csv_route() {
    let response = offline_router()
        .oneshot(
            Request::builder()
                .uri("/export_csv?valuation_date=2026-02-16&expiry_date=2026-03-16&spot=5000&strike=5000&vol_pct=20&risk_free_pct=4")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
    assert!(content_type.starts_with("text/csv"));
    assert!(body_text(response)
        .await
        .contains("offset,strike,call_price,put_price"));
}

#[tokio::test]
async fn test_form_and_csv_agree() {
    let query = "valuation_date=2026-02-16&expiry_date=2026-03-16&spot=5000&strike=5000&vol_pct=20&risk_free_pct=4";
    let router = offline_router();

    let html = body_text(
        router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/")
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from(query))
                    .unwrap(),
            )
            .await
            .unwrap(),
    )
    .await;

    let csv = body_text(
        router
            .oneshot(
                Request::builder()
                    .uri(format!("/export_csv?{}", query))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap(),
    )
    .await;

    let mut reader = csv::Reader::from_reader(csv.as_bytes());
    for record in reader.records() {
        let record = record.unwrap();
        let call: f64 = record[2].parse().unwrap();
        assert!(
            html.contains(&format!("<td>{:.4}</td>", call)),
            "call {} for {} missing from page",
            call,
            &record[0]
        );
    }
}

#[tokio::test]
async fn test_json_api_error_shape() {
    let response = offline_router()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/price")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    r#"{"spot":-1,"strike":100,"timeToExpiry":1,"rate":0.05,"volatility":0.2}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body["error"], "invalid_input");
    assert_eq!(body["message"], "Spot and strike must be positive");
}

#[tokio::test]
async fn test_live_quotes_prefill_form() {
    let quotes = StaticQuoteSource::new()
        .with_quote("^GSPC", 6001.25)
        .with_quote("^VIX", 17.0)
        .with_quote("^IRX", 4.1);
    let state = AppState::with_quote_source(Arc::new(ServerConfig::default()), Arc::new(quotes));

    let response = build_router(state)
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let html = body_text(response).await;

    assert!(html.contains("name=\"spot\" value=\"6001.25\""));
    assert!(html.contains("name=\"strike\" value=\"6001.25\""));
    assert!(html.contains("name=\"vol_pct\" value=\"17\""));
    assert!(html.contains("name=\"risk_free_pct\" value=\"4.1\""));
}
