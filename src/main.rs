// Main entry point - Dependency injection and server setup
mod domain;
mod application;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};
use axum::{routing::{get, post}, Router};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};
use tracing_subscriber::EnvFilter;

use crate::application::dashboard_controller::DashboardController;
use crate::application::series_builder::SeriesBuilder;
use crate::infrastructure::config::load_dashboard_config;
use crate::infrastructure::http_sample_source::HttpSampleSource;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{get_dashboard, health_check, reload_dashboard, stream_dashboard};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = load_dashboard_config()?;
    let tz = config.display.timezone()?;
    let window = config.display.window()?;

    // Create sample source (infrastructure layer)
    let source = Arc::new(HttpSampleSource::new(
        config.source.url.clone(),
        config.source.timeout(),
    )?);

    // Start the controller; it performs the initial load on its own
    let dashboard = DashboardController::spawn(source, SeriesBuilder::new(window, tz));

    let state = Arc::new(AppState {
        dashboard,
        title: config.display.title.clone(),
        tz,
    });

    // Build router (presentation layer)
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/dashboard", get(get_dashboard))
        .route("/dashboard/events", get(stream_dashboard))
        .route("/dashboard/reload", post(reload_dashboard))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr: SocketAddr = config.server.bind.parse()?;
    tracing::info!(source = %config.source.url, "Starting brewery-dashboard on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
