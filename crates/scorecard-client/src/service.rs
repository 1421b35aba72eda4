//! Scoring service trait

use crate::error::FetchResult;
use async_trait::async_trait;
use scorecard_core::ClientRecord;

/// Source of pre-computed client scoring records
///
/// The dashboard fetches one record per client selection through this trait,
/// which lets tests swap the remote service for [`crate::MockScoringService`].
#[async_trait]
pub trait ScoringService: Send + Sync {
    /// Fetch the scoring record for `client_id`
    ///
    /// Implementations return a record only for a complete, valid answer;
    /// anything else is an error.
    async fn fetch_client(&self, client_id: &str) -> FetchResult<ClientRecord>;

    /// Get service name
    fn name(&self) -> &str;
}
