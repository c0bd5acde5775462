//! API layer - routes, handlers, and middleware

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod routes;

use crate::state::AppState;
use axum::{
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use serde_json::json;

/// Prefix of the versioned catalog API.
pub const API_PREFIX: &str = "/api/v1";

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    let cors_origins = state.config.server.cors_origins.clone();

    let mut catalog = routes::catalog::catalog_routes();
    if let Some(cache) = state.cache.clone() {
        catalog = catalog.layer(axum::middleware::from_fn_with_state(
            cache,
            middleware::cache_middleware,
        ));
    }

    Router::new()
        .route("/health", get(health_check))
        .nest(API_PREFIX, catalog)
        .with_state(state)
        // Applied in reverse order: the request-id span wraps everything.
        .layer(middleware::compression())
        .layer(middleware::cors(&cors_origins))
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
}

async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "movies-api",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
