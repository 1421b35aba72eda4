//! HTML page handlers
//!
//! Every handler holds the session lock for the whole interaction.

use crate::components::render_document;
use crate::controller::{self, ControlError, Selection};
use crate::pages::PageInput;
use crate::state::AppState;
use crate::views::Rendered;
use axum::{
    Form,
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::warn;

/// Query of the analysis page
#[derive(Debug, Default, Deserialize)]
pub struct AnalysisQuery {
    /// Picked variable
    pub variable: Option<String>,
}

/// Body of the client selector form
#[derive(Debug, Deserialize)]
pub struct ClientForm {
    /// Selected identifier or the sentinel
    #[serde(default)]
    pub client_id: String,
}

/// `GET /`: redirect to the current page
pub async fn index(State(state): State<Arc<AppState>>) -> Redirect {
    let page = state.session.lock().await.page;
    Redirect::to(&page.path())
}

/// `GET /scoring`
pub async fn scoring(State(state): State<Arc<AppState>>) -> Html<String> {
    show(&state, &PageInput::Scoring { compute: false }).await
}

/// `POST /scoring/compute`: the "Calculer le Score" trigger
pub async fn compute_score(State(state): State<Arc<AppState>>) -> Html<String> {
    show(&state, &PageInput::Scoring { compute: true }).await
}

/// `GET /importance`
pub async fn importance(State(state): State<Arc<AppState>>) -> Html<String> {
    show(&state, &PageInput::Importance).await
}

/// `GET /analysis?variable=...`
pub async fn analysis(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AnalysisQuery>,
) -> Html<String> {
    let variable = query.variable.filter(|v| !v.trim().is_empty());
    show(&state, &PageInput::Analysis { variable }).await
}

/// `POST /client`: select a client, then show the current page again
pub async fn select_client(
    State(state): State<Arc<AppState>>,
    Form(form): Form<ClientForm>,
) -> Response {
    let mut session = state.session.lock().await;
    let result = controller::select_client(
        &mut session,
        state.scoring.as_ref(),
        &state.datasets.identifiers,
        Selection::parse(&form.client_id),
    )
    .await;

    match result {
        Ok(()) => Redirect::to(&session.page.path()).into_response(),
        Err(e @ ControlError::UnknownClient(_)) => {
            warn!(error = %e, "Rejected client selection");
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
    }
}

/// `POST /session/reload`: fetch the selected client again
pub async fn reload(State(state): State<Arc<AppState>>) -> Redirect {
    let mut session = state.session.lock().await;
    controller::reload(&mut session, state.scoring.as_ref()).await;
    Redirect::to(&session.page.path())
}

async fn show(state: &AppState, input: &PageInput) -> Html<String> {
    let rendered: Rendered = {
        let mut session = state.session.lock().await;
        controller::show_page(
            &mut session,
            &state.datasets.reference,
            state.threshold(),
            input,
        )
    };
    Html(render_document(&rendered, &state.datasets.identifiers))
}
