//! Route modules for the pricer server
//!
//! This module contains endpoint group-specific routers:
//! - form: HTML pricing form (`/`)
//! - export: CSV download of the scenario table (`/export_csv`)
//! - pricing: JSON price and scenario endpoints
//! - greeks: JSON Greeks endpoint
//! - health: Health check and readiness endpoints

pub mod export;
pub mod form;
pub mod greeks;
pub mod health;
pub mod pricing;

use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::error::ServerError;
use crate::market_data::{
    fetch_market_defaults, MarketDefaults, QuoteSource, StaticQuoteSource, YahooQuoteSource,
};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Server configuration
    pub config: Arc<ServerConfig>,
    /// Source of form default quotes
    pub quotes: Arc<dyn QuoteSource>,
    /// Server start time for uptime calculation
    pub start_time: std::time::Instant,
}

impl AppState {
    /// Create state with an explicit quote source
    pub fn with_quote_source(config: Arc<ServerConfig>, quotes: Arc<dyn QuoteSource>) -> Self {
        Self {
            config,
            quotes,
            start_time: std::time::Instant::now(),
        }
    }

    /// Create state with the quote source the configuration asks for.
    ///
    /// With market data disabled the source is empty and never consulted.
    pub fn from_config(config: Arc<ServerConfig>) -> Result<Self, ServerError> {
        let market = &config.market_data;
        let quotes: Arc<dyn QuoteSource> = if market.enabled {
            Arc::new(YahooQuoteSource::new(market.base_url.clone(), market.timeout())?)
        } else {
            Arc::new(StaticQuoteSource::new())
        };

        Ok(Self::with_quote_source(config, quotes))
    }

    /// Current form defaults, falling back field by field.
    ///
    /// With market data disabled the configured defaults are returned unchanged.
    pub async fn market_defaults(&self) -> MarketDefaults {
        if !self.config.market_data.enabled {
            return self.config.defaults;
        }
        fetch_market_defaults(
            self.quotes.as_ref(),
            &self.config.defaults,
            &self.config.market_data.symbols,
        )
        .await
    }
}

/// Build the main application router by merging all route modules
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(form::routes())
        .merge(export::routes())
        .merge(pricing::routes())
        .merge(greeks::routes())
        .merge(health::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
