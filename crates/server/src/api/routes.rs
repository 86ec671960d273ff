use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::{agent, audit, handlers, middleware::metrics_middleware, trending};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    // API routes
    let api_routes = Router::new()
        // Health and config
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config))
        // Agent
        .route("/agent/run", post(agent::run_pipeline))
        .route("/agent/process", post(agent::process_single))
        .route("/agent/status", get(agent::get_status))
        .route("/agent/cancel", post(agent::cancel))
        // Discovery
        .route("/trending", get(trending::get_trending))
        // Run log
        .route("/audit", get(audit::query_audit))
        .route("/audit/document", get(audit::get_document))
        .with_state(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/metrics", get(handlers::metrics))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
