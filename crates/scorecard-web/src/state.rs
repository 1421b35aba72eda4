//! Application state management

use crate::session::Session;
use scorecard_client::ScoringService;
use scorecard_core::{Config, Datasets};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Shared state of the dashboard
pub struct AppState {
    /// Application configuration
    pub config: Config,
    /// Identifier list and reference table, loaded once
    pub datasets: Arc<Datasets>,
    /// Source of client records
    pub scoring: Arc<dyn ScoringService>,
    /// The dashboard session; held for the whole of one interaction
    pub session: Mutex<Session>,
}

impl AppState {
    /// Create state with an empty session
    pub fn new(config: Config, datasets: Arc<Datasets>, scoring: Arc<dyn ScoringService>) -> Self {
        Self {
            config,
            datasets,
            scoring,
            session: Mutex::new(Session::new()),
        }
    }

    /// Decision threshold shown on the scoring page
    pub const fn threshold(&self) -> f64 {
        self.config.dashboard.decision_threshold
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("identifiers", &self.datasets.identifiers.len())
            .field("reference_rows", &self.datasets.reference.len())
            .field("scoring", &self.scoring.name())
            .finish_non_exhaustive()
    }
}
