//! Route definitions for the dashboard

use crate::{
    handlers::{api, pages},
    state::AppState,
};
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

/// HTML pages and the forms that drive them
pub fn page_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(pages::index))
        .route("/scoring", get(pages::scoring))
        .route("/scoring/compute", post(pages::compute_score))
        .route("/importance", get(pages::importance))
        .route("/analysis", get(pages::analysis))
        .route("/client", post(pages::select_client))
        .route("/session/reload", post(pages::reload))
}

/// JSON view descriptions
pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/view/:page", get(api::view_page))
}

/// Health check
pub fn health_routes() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(api::health_check))
}

/// Build the complete router
pub fn build_routes() -> Router<Arc<AppState>> {
    Router::new()
        .merge(page_routes())
        .merge(api_routes())
        .merge(health_routes())
        .fallback(not_found_handler)
}

/// Handle 404 Not Found errors
async fn not_found_handler() -> (axum::http::StatusCode, axum::Json<serde_json::Value>) {
    (
        axum::http::StatusCode::NOT_FOUND,
        axum::Json(serde_json::json!({
            "error": "Not Found",
            "code": "ROUTE_NOT_FOUND",
            "message": "The requested endpoint does not exist"
        })),
    )
}
