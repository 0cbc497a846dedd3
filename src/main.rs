//! PubMed Chat - conversational front-end for a PubMed summarize service
//!
//! Serves a single page that forwards each new question to the summarize
//! endpoint and shows the summary and the referenced articles.

mod api;
mod config;
mod render;
mod session;
mod summarize;

use api::{create_router, AppState};
use config::AppConfig;
use std::net::SocketAddr;
use std::sync::Arc;
use summarize::{HttpSummaryClient, LoggingClient};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pubmed_chat=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    // Configuration
    let config = AppConfig::from_env()?;
    if config.api.insecure_tls {
        tracing::warn!(
            url = %config.api.base_url,
            "TLS certificate verification is DISABLED for the summarize service"
        );
    }

    let client = HttpSummaryClient::new(&config.api)?;
    tracing::info!(
        endpoint = %config.api.summarize_endpoint(),
        timeout_secs = config.api.timeout.as_secs(),
        "Summarize client ready"
    );
    let state = AppState::new(
        Arc::new(LoggingClient::new(Arc::new(client))),
        config.session_ttl,
    );
    state.sessions.spawn_sweeper();
    tracing::info!(
        ttl_secs = config.session_ttl.as_secs(),
        "Idle sessions will be dropped"
    );

    let compression = CompressionLayer::new()
        .gzip(true)
        .br(true)
        .deflate(true)
        .zstd(true);

    let app = create_router(state)
        .layer(compression)
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("PubMed Chat listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
