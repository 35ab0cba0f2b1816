//! Goalpost Web Server
//!
//! Run with: cargo run -p goalpost-web

use anyhow::Context;
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting Goalpost Web Server...");

    let config = goalpost_common::AppConfig::from_env()?;

    // Connect and run idempotent schema setup (tables + feedback trigger)
    let db = goalpost_db::Database::connect(&config).await?;
    db.initialize().await?;
    let stats = db.stats().await?;
    info!(
        employees = stats.employees,
        goals = stats.goals,
        feedback = stats.feedback,
        "database ready"
    );

    let state = goalpost_web::state::AppState::new(db.pool().clone());
    let app = goalpost_web::router::build_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("invalid listen address: {}", config.listen_addr))?;
    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
