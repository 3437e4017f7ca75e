//! Route definitions for the Merchandising Analytics Platform

use axum::{routing::get, Router};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Stagnant-stock analysis
        .route("/stagnant-stock", get(handlers::get_stagnant_stock))
        // Season trend chart
        .route(
            "/inventory-season-chart",
            get(handlers::get_inventory_season_chart),
        )
}
