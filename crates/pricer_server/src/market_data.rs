//! Market data used to pre-fill the pricing form.
//!
//! The form opens with the latest index spot, implied volatility index and
//! short-rate index levels. Each lookup is independent: a failed quote falls
//! back to the configured default for that field only.

use std::collections::HashMap;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

/// Market data error types
#[derive(Debug, Error)]
pub enum MarketDataError {
    #[error("Market data request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Market data provider returned status {status} for {symbol}")]
    Status { symbol: String, status: u16 },

    #[error("Market data provider error for {symbol}: {code} - {description}")]
    Provider {
        symbol: String,
        code: String,
        description: String,
    },

    #[error("No close price available for {0}")]
    NoData(String),

    #[error("Unusable quote for {symbol}: {value}")]
    InvalidQuote { symbol: String, value: f64 },
}

/// Form defaults derived from market data.
///
/// Percent fields are in percent units (`20.0` means 20%).
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct MarketDefaults {
    /// Underlying spot level
    pub spot: f64,
    /// Base strike
    pub strike: f64,
    /// Volatility in percent
    pub vol_pct: f64,
    /// Risk-free rate in percent
    pub risk_free_pct: f64,
}

impl Default for MarketDefaults {
    fn default() -> Self {
        Self {
            spot: 5000.0,
            strike: 5000.0,
            vol_pct: 20.0,
            risk_free_pct: 4.0,
        }
    }
}

/// Symbols looked up for each defaulted field.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MarketSymbols {
    /// Equity index; the strike follows the spot when this resolves
    pub spot: String,
    /// Volatility index, read as a percentage
    pub volatility: String,
    /// 13-week treasury bill yield index, read as a percentage
    pub rate: String,
}

impl Default for MarketSymbols {
    fn default() -> Self {
        Self {
            spot: "^GSPC".to_string(),
            volatility: "^VIX".to_string(),
            rate: "^IRX".to_string(),
        }
    }
}

/// Source of latest close prices.
#[async_trait::async_trait]
pub trait QuoteSource: Send + Sync {
    /// Latest available daily close for `symbol`.
    async fn latest_close(&self, symbol: &str) -> Result<f64, MarketDataError>;
}

/// Quote source backed by the Yahoo Finance chart API.
pub struct YahooQuoteSource {
    base_url: String,
    client: reqwest::Client,
}

/// Yahoo Finance chart response
#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartBody,
}

#[derive(Debug, Deserialize)]
struct ChartBody {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteData>,
}

#[derive(Debug, Deserialize)]
struct QuoteData {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

impl YahooQuoteSource {
    /// Create a client for `base_url` (e.g. `https://query1.finance.yahoo.com`)
    /// with a per-request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, MarketDataError> {
        let client = reqwest::Client::builder()
            .user_agent("Mozilla/5.0")
            .timeout(timeout)
            .build()?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait::async_trait]
impl QuoteSource for YahooQuoteSource {
    async fn latest_close(&self, symbol: &str) -> Result<f64, MarketDataError> {
        let url = format!("{}/v8/finance/chart/{}", self.base_url, symbol);
        tracing::debug!(%url, "Fetching market quote");

        let response = self
            .client
            .get(&url)
            .query(&[("range", "5d"), ("interval", "1d")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(MarketDataError::Status {
                symbol: symbol.to_string(),
                status: status.as_u16(),
            });
        }

        let body: ChartResponse = response.json().await?;
        last_close(body, symbol)
    }
}

/// Last non-null close in a chart response.
fn last_close(body: ChartResponse, symbol: &str) -> Result<f64, MarketDataError> {
    if let Some(error) = body.chart.error {
        return Err(MarketDataError::Provider {
            symbol: symbol.to_string(),
            code: error.code,
            description: error.description,
        });
    }

    body.chart
        .result
        .into_iter()
        .flatten()
        .next()
        .and_then(|data| data.indicators.quote.into_iter().next())
        .and_then(|quote| quote.close.into_iter().rev().flatten().next())
        .ok_or_else(|| MarketDataError::NoData(symbol.to_string()))
}

/// Quote source answering from a fixed symbol map.
#[derive(Debug, Clone, Default)]
pub struct StaticQuoteSource {
    quotes: HashMap<String, f64>,
}

impl StaticQuoteSource {
    /// Create an empty source; every lookup fails with `NoData`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a quote
    pub fn with_quote(mut self, symbol: impl Into<String>, close: f64) -> Self {
        self.quotes.insert(symbol.into(), close);
        self
    }
}

#[async_trait::async_trait]
impl QuoteSource for StaticQuoteSource {
    async fn latest_close(&self, symbol: &str) -> Result<f64, MarketDataError> {
        self.quotes
            .get(symbol)
            .copied()
            .ok_or_else(|| MarketDataError::NoData(symbol.to_string()))
    }
}

async fn positive_quote(source: &dyn QuoteSource, symbol: &str) -> Result<f64, MarketDataError> {
    let value = source.latest_close(symbol).await?;
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(MarketDataError::InvalidQuote {
            symbol: symbol.to_string(),
            value,
        })
    }
}

async fn finite_quote(source: &dyn QuoteSource, symbol: &str) -> Result<f64, MarketDataError> {
    let value = source.latest_close(symbol).await?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(MarketDataError::InvalidQuote {
            symbol: symbol.to_string(),
            value,
        })
    }
}

/// Resolve form defaults from `source`, field by field.
///
/// - spot: `symbols.spot`; when it resolves the strike is set to the same level
/// - vol_pct: `symbols.volatility` level
/// - risk_free_pct: `symbols.rate` level
///
/// Spot and volatility must be finite and positive, the rate only finite.
/// Any failed lookup keeps the corresponding `fallback` value and is logged
/// at `warn`; this function never fails.
pub async fn fetch_market_defaults(
    source: &dyn QuoteSource,
    fallback: &MarketDefaults,
    symbols: &MarketSymbols,
) -> MarketDefaults {
    let (spot, vol, rate) = tokio::join!(
        positive_quote(source, &symbols.spot),
        positive_quote(source, &symbols.volatility),
        finite_quote(source, &symbols.rate),
    );

    let mut defaults = *fallback;

    match spot {
        Ok(level) => {
            defaults.spot = level;
            defaults.strike = level;
        }
        Err(e) => tracing::warn!(symbol = %symbols.spot, error = %e, "Using fallback spot"),
    }

    match vol {
        Ok(level) => defaults.vol_pct = level,
        Err(e) => {
            tracing::warn!(symbol = %symbols.volatility, error = %e, "Using fallback volatility")
        }
    }

    match rate {
        Ok(level) => defaults.risk_free_pct = level,
        Err(e) => tracing::warn!(symbol = %symbols.rate, error = %e, "Using fallback rate"),
    }

    defaults
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::Path, http::StatusCode, routing::get, Json, Router};
    use tokio::net::TcpListener;

    fn chart(json: &str) -> ChartResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_last_close_skips_trailing_nulls() {
        let body = chart(
            r#"{"chart":{"result":[{"indicators":{"quote":[{"close":[5010.5,5020.25,null]}]}}],"error":null}}"#,
        );
        assert_eq!(last_close(body, "^GSPC").unwrap(), 5020.25);
    }

    #[test]
    fn test_last_close_all_null_is_no_data() {
        let body = chart(
            r#"{"chart":{"result":[{"indicators":{"quote":[{"close":[null,null]}]}}],"error":null}}"#,
        );
        assert!(matches!(
            last_close(body, "^VIX"),
            Err(MarketDataError::NoData(symbol)) if symbol == "^VIX"
        ));
    }

    #[test]
    fn test_last_close_empty_result_is_no_data() {
        let body = chart(r#"{"chart":{"result":[],"error":null}}"#);
        assert!(matches!(last_close(body, "^IRX"), Err(MarketDataError::NoData(_))));

        let body = chart(r#"{"chart":{"result":null,"error":null}}"#);
        assert!(matches!(last_close(body, "^IRX"), Err(MarketDataError::NoData(_))));
    }

    #[test]
    fn test_last_close_provider_error() {
        let body = chart(
            r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found, symbol may be delisted"}}}"#,
        );
        let err = last_close(body, "^NOPE").unwrap_err();
        assert!(err.to_string().contains("Not Found"));
        assert!(err.to_string().contains("^NOPE"));
    }

    #[test]
    fn test_default_symbols_and_fallback() {
        let symbols = MarketSymbols::default();
        assert_eq!(symbols.spot, "^GSPC");
        assert_eq!(symbols.volatility, "^VIX");
        assert_eq!(symbols.rate, "^IRX");

        let fallback = MarketDefaults::default();
        assert_eq!(fallback.spot, 5000.0);
        assert_eq!(fallback.strike, 5000.0);
        assert_eq!(fallback.vol_pct, 20.0);
        assert_eq!(fallback.risk_free_pct, 4.0);
    }

    #[tokio::test]
    async fn test_all_quotes_resolve() {
        let source = StaticQuoteSource::new()
            .with_quote("^GSPC", 5100.0)
            .with_quote("^VIX", 15.5)
            .with_quote("^IRX", 4.25);

        let defaults = fetch_market_defaults(
            &source,
            &MarketDefaults::default(),
            &MarketSymbols::default(),
        )
        .await;

        assert_eq!(defaults.spot, 5100.0);
        assert_eq!(defaults.strike, 5100.0);
        assert_eq!(defaults.vol_pct, 15.5);
        assert_eq!(defaults.risk_free_pct, 4.25);
    }

    #[tokio::test]
    async fn test_each_lookup_falls_back_independently() {
        let source = StaticQuoteSource::new().with_quote("^VIX", 18.0);

        let defaults = fetch_market_defaults(
            &source,
            &MarketDefaults::default(),
            &MarketSymbols::default(),
        )
        .await;

        assert_eq!(defaults.spot, 5000.0);
        assert_eq!(defaults.strike, 5000.0);
        assert_eq!(defaults.vol_pct, 18.0);
        assert_eq!(defaults.risk_free_pct, 4.0);
    }

    #[tokio::test]
    async fn test_unusable_quotes_fall_back() {
        let source = StaticQuoteSource::new()
            .with_quote("^GSPC", f64::NAN)
            .with_quote("^VIX", 0.0)
            .with_quote("^IRX", f64::INFINITY);

        let defaults = fetch_market_defaults(
            &source,
            &MarketDefaults::default(),
            &MarketSymbols::default(),
        )
        .await;

        assert_eq!(defaults, MarketDefaults::default());
    }

    #[tokio::test]
    async fn test_zero_rate_is_accepted() {
        let source = StaticQuoteSource::new().with_quote("^IRX", 0.0);

        let defaults = fetch_market_defaults(
            &source,
            &MarketDefaults::default(),
            &MarketSymbols::default(),
        )
        .await;

        assert_eq!(defaults.risk_free_pct, 0.0);
    }

    #[tokio::test]
    async fn test_empty_static_source_keeps_fallback() {
        let fallback = MarketDefaults {
            spot: 4200.0,
            strike: 4000.0,
            vol_pct: 25.0,
            risk_free_pct: 3.0,
        };
        let symbols = MarketSymbols::default();
        let source = StaticQuoteSource::new();

        assert!(matches!(
            source.latest_close(&symbols.spot).await,
            Err(MarketDataError::NoData(_))
        ));
        let defaults = fetch_market_defaults(&source, &fallback, &symbols).await;
        assert_eq!(defaults, fallback);
    }

    async fn spawn_chart_server() -> String {
        async fn chart_handler(Path(symbol): Path<String>) -> (StatusCode, Json<serde_json::Value>) {
            match symbol.as_str() {
                "^GSPC" => (
                    StatusCode::OK,
                    Json(serde_json::json!({
                        "chart": {
                            "result": [{"indicators": {"quote": [{"close": [5001.0, 5002.5, null]}]}}],
                            "error": null
                        }
                    })),
                ),
                _ => (
                    StatusCode::NOT_FOUND,
                    Json(serde_json::json!({
                        "chart": {
                            "result": null,
                            "error": {"code": "Not Found", "description": "No data found"}
                        }
                    })),
                ),
            }
        }

        let router = Router::new().route("/v8/finance/chart/{symbol}", get(chart_handler));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.ok();
        });

        format!("http://{}/", addr)
    }

    #[tokio::test]
    async fn test_yahoo_source_reads_last_close() {
        let base_url = spawn_chart_server().await;
        let source = YahooQuoteSource::new(base_url, Duration::from_secs(5)).unwrap();
        assert!(!source.base_url().ends_with('/'));

        let close = source.latest_close("^GSPC").await.unwrap();
        assert_eq!(close, 5002.5);
    }

    #[tokio::test]
    async fn test_yahoo_source_non_success_status() {
        let base_url = spawn_chart_server().await;
        let source = YahooQuoteSource::new(base_url, Duration::from_secs(5)).unwrap();

        let err = source.latest_close("^VIX").await.unwrap_err();
        assert!(matches!(err, MarketDataError::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_yahoo_source_unreachable_falls_back() {
        // Bind then drop to get a port with nothing listening
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let source =
            YahooQuoteSource::new(format!("http://{}", addr), Duration::from_millis(500)).unwrap();
        let defaults = fetch_market_defaults(
            &source,
            &MarketDefaults::default(),
            &MarketSymbols::default(),
        )
        .await;

        assert_eq!(defaults, MarketDefaults::default());
    }
}
