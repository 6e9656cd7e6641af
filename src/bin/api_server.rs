// Advisor API server entry point
//
// Usage: cargo run --features api --bin api_server

use std::net::SocketAddr;

use crop_advisor::{create_router, AdvisorConfig, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing (structured logging)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                // Default log level: info for our crate, warn for others
                "crop_advisor=info,tower_http=debug,axum=debug,warn".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting advisor API server...");

    // Configuration from environment variables
    let config = AdvisorConfig::from_env();
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);

    tracing::info!("Configuration:");
    tracing::info!("  DATA_FILE: {}", config.dataset_path.display());
    tracing::info!("  DOCS_DIR: {}", config.docs_dir.display());
    tracing::info!("  CROP_KEYWORD: {}", config.crop_keyword);
    tracing::info!("  PORT: {}", port);

    // Initialize application state (loads dataset, builds docs index).
    // No classifier is wired here: deployments attach their model runtime,
    // or drive the pipeline via /api/advise.
    let state = AppState::new(config);

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
