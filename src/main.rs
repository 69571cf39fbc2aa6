use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod api;
mod config;
mod models;
mod server;
mod services;

use api::wemix::WemixClient;
use config::Config;
use server::AppState;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env()
            .add_directive("crow_chart=debug".parse().unwrap())
            .add_directive("hyper=warn".parse().unwrap()))
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("📈 Starting CROW price chart...");

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return;
        }
    };

    let client = match WemixClient::new(config.price_url.clone(), config.fetch_timeout) {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to create price client: {}", e);
            return;
        }
    };

    let state = Arc::new(AppState::new(config, client));

    if let Err(e) = server::run(state).await {
        error!("Server error: {}", e);
    }
}
