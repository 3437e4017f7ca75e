//! Merchandising Analytics Platform - Backend Server
//!
//! Serves stagnant-inventory analysis and season trend reports for the
//! accessory merchandising dashboard.

use sqlx::postgres::PgPoolOptions;
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use merch_analytics_backend::{create_app, AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "merch_analytics_backend=debug,tower_http=debug,sqlx=warn".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    tracing::info!("Starting Merchandising Analytics Server");
    tracing::info!("Environment: {}", config.environment);

    // Create warehouse connection pool
    tracing::info!("Connecting to warehouse...");
    let db_pool = PgPoolOptions::new()
        .max_connections(config.warehouse.max_connections)
        .min_connections(config.warehouse.min_connections)
        .acquire_timeout(Duration::from_secs(30))
        .connect(&config.warehouse.url)
        .await?;

    tracing::info!("Warehouse connection established");

    // Create application state
    let state = AppState {
        db: db_pool,
        config: Arc::new(config.clone()),
    };

    // Build application
    let app = create_app(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
