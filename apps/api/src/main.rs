mod config;
mod document;
mod errors;
mod generation;
mod models;
mod pipeline;
mod render;
mod routes;
mod schema;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::generation::client::{HttpGenerationClient, MODEL};
use crate::render::export::PdfExporter;
use crate::render::a4_geometry;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CVForge API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the generation client
    let backend = Arc::new(HttpGenerationClient::new(
        config.gemini_api_url.clone(),
        config.gemini_api_key.clone(),
    ));
    info!("Generation client initialized (model: {MODEL})");

    // Page geometry for pagination and PDF export
    let geometry = a4_geometry(config.page_margin_mm, config.page_font_size_pt);
    info!(
        "Page geometry: A4, {}mm margins, {}pt body",
        config.page_margin_mm, config.page_font_size_pt
    );

    // Build app state
    let state = AppState {
        backend,
        exporter: Arc::new(PdfExporter),
        geometry,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
