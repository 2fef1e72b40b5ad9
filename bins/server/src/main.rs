//! Fiado API Server
//!
//! Main entry point for the Fiado backend service.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fiado_api::{AppState, create_router};
use fiado_core::rate::{FixedRateSource, RateSource};
use fiado_rates::HttpRateSource;
use fiado_shared::AppConfig;
use fiado_store::Store;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fiado=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load()?;

    // Wire the rate source: live HTTP endpoint when configured, fixed
    // fallback rates otherwise.
    let rates: Arc<dyn RateSource> = match &config.rates.base_url {
        Some(base_url) => {
            info!(base_url = %base_url, "using HTTP rate source");
            Arc::new(HttpRateSource::new(base_url))
        }
        None => {
            info!(
                usd = %config.rates.fallback_usd,
                eur = %config.rates.fallback_eur,
                "no rate endpoint configured, using fixed fallback rates"
            );
            Arc::new(FixedRateSource::new(
                config.rates.fallback_usd,
                config.rates.fallback_eur,
            ))
        }
    };

    // Create application state
    let state = AppState {
        store: Arc::new(Store::new()),
        rates,
    };

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
