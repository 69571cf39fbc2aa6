//! HTTP server for the price page
//!
//! Single route: `GET /` renders the chart and average-price alert.

pub mod handlers;
pub mod page;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::{header, HeaderValue};
use axum::{routing::get, Router};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::api::wemix::WemixClient;
use crate::config::Config;
use crate::services::chart_service::ChartStyle;

/// Shared, read-only state for the page handler
pub struct AppState {
    pub config: Config,
    pub client: WemixClient,
    pub style: ChartStyle,
}

impl AppState {
    pub fn new(config: Config, client: WemixClient) -> Self {
        Self {
            config,
            client,
            style: ChartStyle::default(),
        }
    }
}

/// Build the router; every response is marked `Cache-Control: no-store`
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .with_state(state)
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .layer(TraceLayer::new_for_http())
}

/// Bind to localhost on the configured port and serve until the process exits
pub async fn run(state: Arc<AppState>) -> Result<(), std::io::Error> {
    let addr = SocketAddr::from(([127, 0, 0, 1], state.config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Serving price page on http://{}/", addr);
    info!("Upstream: {}", state.client.chart_url());
    info!(
        "Threshold: {}, refresh every {} ms",
        state.config.threshold, state.config.refresh_ms
    );

    axum::serve(listener, router(state)).await
}
