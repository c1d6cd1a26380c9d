//! Moxie Stats Frame API server binary entrypoint.

use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use moxie_common::config::AppConfig;
use moxie_engine::airstack::AirstackClient;
use moxie_engine::earnings::EarningsAggregator;
use moxie_engine::frames::EnvelopeVerifier;

use moxie_api::routes::create_router;
use moxie_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("moxie_api=debug,moxie_engine=debug,tower_http=debug")
        }))
        .init();

    tracing::info!("Starting Moxie Stats Frame API server...");

    // Load configuration — fails fast when AIRSTACK_API_KEY is absent
    let config = AppConfig::from_env()?;

    // One Airstack client per process lifetime, injected into the router state
    let client = AirstackClient::new(&config.airstack_api_url, &config.airstack_api_key);
    tracing::info!("Airstack client initialized for Moxie earnings");

    let aggregator = EarningsAggregator::new(Arc::new(client));
    let state = AppState::new(aggregator, Arc::new(EnvelopeVerifier), config.clone());

    // Build router
    let app = create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.bind_port));
    tracing::info!("API server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
