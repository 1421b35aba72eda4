//! Dashboard controller: the only code that mutates a [`Session`]

use crate::pages::{self, PageInput, RenderContext};
use crate::session::{NO_CLIENT_SENTINEL, Session};
use crate::views::Rendered;
use scorecard_client::ScoringService;
use scorecard_core::{ClientIdentifierList, ReferenceDataset};
use thiserror::Error;
use tracing::{debug, info};

/// Value posted by the client selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// The sentinel entry
    NoClient,
    /// A client identifier
    Client(String),
}

impl Selection {
    /// Interpret a posted selector value; empty input and the sentinel mean no client
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() || raw == NO_CLIENT_SENTINEL {
            Self::NoClient
        } else {
            Self::Client(raw.to_string())
        }
    }
}

/// Rejected controller input
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ControlError {
    /// The identifier is not in the selectable list
    #[error("Unknown client identifier: {0}")]
    UnknownClient(String),
}

/// Select a client, fetching its record, or clear the selection
///
/// A fetch failure is not an error here: the session records it and the
/// pages show their usual warnings.
///
/// # Errors
///
/// Returns [`ControlError::UnknownClient`] without touching the session when
/// the identifier is not selectable.
pub async fn select_client(
    session: &mut Session,
    service: &dyn ScoringService,
    identifiers: &ClientIdentifierList,
    selection: Selection,
) -> Result<(), ControlError> {
    match selection {
        Selection::NoClient => {
            debug!("Client selection cleared");
            session.clear_selection();
            Ok(())
        }
        Selection::Client(id) => {
            if !identifiers.contains(&id) {
                return Err(ControlError::UnknownClient(id));
            }
            info!(client_id = %id, service = service.name(), "Client selected");
            let outcome = service.fetch_client(&id).await;
            session.apply_fetch(&id, outcome);
            session.selected = Some(id);
            Ok(())
        }
    }
}

/// Fetch the selected client's record again; no-op without a selection
pub async fn reload(session: &mut Session, service: &dyn ScoringService) {
    let Some(id) = session.selected.clone() else {
        debug!("Reload without selection");
        return;
    };
    info!(client_id = %id, "Reloading client record");
    let outcome = service.fetch_client(&id).await;
    session.apply_fetch(&id, outcome);
}

/// Navigate to a page and render it, applying the score flag
pub fn show_page(
    session: &mut Session,
    reference: &ReferenceDataset,
    threshold: f64,
    input: &PageInput,
) -> Rendered {
    session.page = input.page();
    let rendered = preview_page(session, reference, threshold, input);
    if rendered.score_computed {
        session.score_computed = true;
    }
    rendered
}

/// Render a page without navigating or applying any state change
pub fn preview_page(
    session: &Session,
    reference: &ReferenceDataset,
    threshold: f64,
    input: &PageInput,
) -> Rendered {
    pages::render(
        &RenderContext {
            session,
            reference,
            threshold,
        },
        input,
    )
}
