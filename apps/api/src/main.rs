mod analysis;
mod config;
mod errors;
mod market;
mod matching;
mod models;
mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::market::outlook::LinearProjector;
use crate::matching::relevance::CatalogRelevanceScorer;
use crate::models::catalog::JobCatalog;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (malformed values abort startup)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting SkillMatch API v{}", env!("CARGO_PKG_VERSION"));

    // Load and validate the job catalog
    let catalog = match &config.catalog_path {
        Some(path) => JobCatalog::from_path(path)
            .with_context(|| format!("failed to load catalog from {}", path.display()))?,
        None => JobCatalog::bundled().context("bundled catalog is invalid")?,
    };
    anyhow::ensure!(!catalog.is_empty(), "job catalog contains no roles");
    let catalog = Arc::new(catalog);
    info!("Job catalog loaded ({} roles)", catalog.len());

    let relevance_scorer = Arc::new(CatalogRelevanceScorer::new(
        Arc::clone(&catalog),
        config.relevance_threshold,
    ));
    info!(
        "Relevance scorer initialized (threshold: {})",
        config.relevance_threshold
    );

    let state = AppState {
        catalog,
        relevance_scorer,
        projector: Arc::new(LinearProjector),
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
