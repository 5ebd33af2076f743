mod api;
mod chart;
mod config;
mod diagnostics;
mod errors;
mod jobs;
mod routes;
mod state;
mod views;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::api::{resolve_base_url, FetchClient, ReqwestTransport};
use crate::config::Config;
use crate::diagnostics::TracingLog;
use crate::jobs::JobService;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Configuration is resolved once, before anything else reads it
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Jobs Web v{}", env!("CARGO_PKG_VERSION"));

    let http = reqwest::Client::new();

    // Job search goes through the fetch client; a relative base URL lands on our own proxy
    let base_url = resolve_base_url(&config.api_base_url, &config.app_origin)?;
    let client = FetchClient::new(Arc::new(ReqwestTransport::new(http.clone())), base_url);
    info!("Job search API at {}", client.base_url());
    info!(
        "Proxying /api to {}{}",
        config.proxy_target, config.proxy_path
    );

    let state = AppState {
        jobs: JobService::shared(client),
        log: Arc::new(TracingLog),
        http,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
