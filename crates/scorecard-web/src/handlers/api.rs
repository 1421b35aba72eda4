//! JSON and health handlers

use crate::controller;
use crate::handlers::pages::AnalysisQuery;
use crate::pages::PageInput;
use crate::session::Page;
use crate::state::AppState;
use crate::views::Rendered;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use std::sync::Arc;
use tracing::debug;

/// `GET /api/view/:page`: view description of a page, without side effects
///
/// # Errors
///
/// Returns 404 with a JSON body for an unknown page slug.
pub async fn view_page(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    Query(query): Query<AnalysisQuery>,
) -> Result<Json<Rendered>, (StatusCode, Json<serde_json::Value>)> {
    let Some(page) = Page::from_slug(&slug) else {
        debug!(slug = %slug, "Unknown page requested");
        return Err((
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({
                "error": "Not Found",
                "code": "PAGE_NOT_FOUND",
                "message": format!("Unknown page: {slug}")
            })),
        ));
    };

    let input = match page {
        Page::Analysis => PageInput::Analysis {
            variable: query.variable.filter(|v| !v.trim().is_empty()),
        },
        other => PageInput::view(other),
    };

    let session = state.session.lock().await;
    Ok(Json(controller::preview_page(
        &session,
        &state.datasets.reference,
        state.threshold(),
        &input,
    )))
}

/// `GET /health`
#[allow(clippy::unused_async)]
pub async fn health_check() -> &'static str {
    "OK"
}
