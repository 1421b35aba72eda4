//! Per-user dashboard state
//!
//! The dashboard re-evaluates every page from this state on each
//! interaction. Only the controller mutates it.

use scorecard_client::FetchError;
use scorecard_core::ClientRecord;
use serde::Serialize;
use std::fmt;
use tracing::warn;

/// Placeholder entry of the client selector meaning "no client"
pub const NO_CLIENT_SENTINEL: &str = "Sélectionner...";

/// The three dashboard pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    /// Score and decision of the selected client
    #[default]
    Scoring,
    /// Global and local feature importance
    Importance,
    /// Reference distribution of one variable
    Analysis,
}

impl Page {
    /// All pages in navigation order
    pub const ALL: [Self; 3] = [Self::Scoring, Self::Importance, Self::Analysis];

    /// Navigation label
    pub const fn label(self) -> &'static str {
        match self {
            Self::Scoring => "Scoring Client",
            Self::Importance => "Importance des Variables",
            Self::Analysis => "Analyse d'une Variable",
        }
    }

    /// URL path segment
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Scoring => "scoring",
            Self::Importance => "importance",
            Self::Analysis => "analysis",
        }
    }

    /// URL path of the page
    pub fn path(self) -> String {
        format!("/{}", self.slug())
    }

    /// Look a page up by its path segment
    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|page| page.slug() == slug)
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of the most recent fetch
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FetchStatus {
    /// Nothing fetched yet
    #[default]
    Idle,
    /// The record of `client` was fetched
    Loaded {
        /// Fetched client
        client: String,
    },
    /// Fetching `client` failed; the previous record, if any, is kept
    Failed {
        /// Requested client
        client: String,
        /// Failure kind
        reason: String,
    },
}

/// Dashboard state of one user
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Session {
    /// Page shown on the last navigation
    pub page: Page,
    /// Selected client, if any
    pub selected: Option<String>,
    /// Last successfully fetched record
    pub record: Option<ClientRecord>,
    /// Outcome of the most recent fetch
    pub fetch_status: FetchStatus,
    /// Whether the score was displayed at least once
    pub score_computed: bool,
}

impl Session {
    /// Create an empty session on the scoring page
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a client is selected
    pub const fn has_selection(&self) -> bool {
        self.selected.is_some()
    }

    /// Clear the selected client, keeping the record and the score flag
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Record the outcome of fetching `client_id`
    ///
    /// A success replaces the record wholesale. A failure leaves the previous
    /// record untouched.
    pub fn apply_fetch(
        &mut self,
        client_id: &str,
        outcome: Result<ClientRecord, FetchError>,
    ) {
        match outcome {
            Ok(record) => {
                self.record = Some(record);
                self.fetch_status = FetchStatus::Loaded {
                    client: client_id.to_string(),
                };
            }
            Err(e) => {
                warn!(client_id, error = %e, "No data for client");
                self.fetch_status = FetchStatus::Failed {
                    client: client_id.to_string(),
                    reason: e.kind().to_string(),
                };
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(score: f64) -> ClientRecord {
        serde_json::from_value(serde_json::json!({
            "age": null,
            "income": null,
            "credit_amount": null,
            "employment_length": null,
            "score": score,
            "decision": "Refuse",
            "global_importance_names": [],
            "global_importance_values": [],
            "local_importance_names": [],
            "local_importance_values": []
        }))
        .unwrap()
    }

    #[test]
    fn test_page_slugs_round_trip() {
        for page in Page::ALL {
            assert_eq!(Page::from_slug(page.slug()), Some(page));
        }
        assert_eq!(Page::from_slug("admin"), None);
        assert_eq!(Page::Analysis.path(), "/analysis");
        assert_eq!(Page::Importance.to_string(), "Importance des Variables");
    }

    #[test]
    fn test_successful_fetch_replaces_record() {
        let mut session = Session::new();
        session.apply_fetch("1", Ok(record(0.2)));
        session.apply_fetch("2", Ok(record(0.7)));

        assert_eq!(session.record.unwrap().score, 0.7);
        assert_eq!(
            session.fetch_status,
            FetchStatus::Loaded {
                client: "2".to_string()
            }
        );
    }

    #[test]
    fn test_failed_fetch_keeps_previous_record() {
        let mut session = Session::new();
        session.apply_fetch("1", Ok(record(0.2)));
        session.score_computed = true;

        session.apply_fetch("2", Err(FetchError::status("2", 500)));

        assert_eq!(session.record.as_ref().unwrap().score, 0.2);
        assert!(session.score_computed);
        assert_eq!(
            session.fetch_status,
            FetchStatus::Failed {
                client: "2".to_string(),
                reason: "status".to_string()
            }
        );
    }

    #[test]
    fn test_clear_selection_keeps_record() {
        let mut session = Session::new();
        session.selected = Some("1".to_string());
        session.apply_fetch("1", Ok(record(0.2)));
        session.score_computed = true;

        session.clear_selection();

        assert!(!session.has_selection());
        assert!(session.record.is_some());
        assert!(session.score_computed);
    }
}
