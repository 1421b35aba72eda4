//! Mock scoring service for testing

use crate::error::{FetchError, FetchResult};
use crate::service::ScoringService;
use async_trait::async_trait;
use scorecard_core::ClientRecord;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Canned response for one client
#[derive(Debug, Clone)]
enum Canned {
    Record(ClientRecord),
    Status(u16),
    Malformed(String),
    Timeout,
}

/// Mock scoring service serving canned records from memory
///
/// Unknown clients get a 404, like the remote service.
#[derive(Debug, Default)]
pub struct MockScoringService {
    responses: Mutex<HashMap<String, Canned>>,
    calls: AtomicUsize,
}

impl MockScoringService {
    /// Create a mock with no known clients
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `record` for `client_id`
    pub fn with_record(self, client_id: impl Into<String>, record: ClientRecord) -> Self {
        self.set(client_id, Canned::Record(record));
        self
    }

    /// Answer `client_id` with an HTTP status other than 200
    pub fn with_status(self, client_id: impl Into<String>, status: u16) -> Self {
        self.set(client_id, Canned::Status(status));
        self
    }

    /// Answer `client_id` with a body that is not a client record
    pub fn with_malformed(self, client_id: impl Into<String>, reason: impl Into<String>) -> Self {
        self.set(client_id, Canned::Malformed(reason.into()));
        self
    }

    /// Let requests for `client_id` time out
    pub fn with_timeout(self, client_id: impl Into<String>) -> Self {
        self.set(client_id, Canned::Timeout);
        self
    }

    /// Replace the answer for `client_id` on a shared instance
    pub fn set_record(&self, client_id: impl Into<String>, record: ClientRecord) {
        self.set(client_id, Canned::Record(record));
    }

    /// Make `client_id` fail with `status` on a shared instance
    pub fn set_status(&self, client_id: impl Into<String>, status: u16) {
        self.set(client_id, Canned::Status(status));
    }

    /// Number of fetches served so far
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn set(&self, client_id: impl Into<String>, canned: Canned) {
        if let Ok(mut responses) = self.responses.lock() {
            responses.insert(client_id.into(), canned);
        }
    }

    fn lookup(&self, client_id: &str) -> Option<Canned> {
        self.responses
            .lock()
            .ok()
            .and_then(|responses| responses.get(client_id).cloned())
    }
}

#[async_trait]
impl ScoringService for MockScoringService {
    async fn fetch_client(&self, client_id: &str) -> FetchResult<ClientRecord> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if client_id.trim().is_empty() {
            return Err(FetchError::invalid_identifier(client_id));
        }

        match self.lookup(client_id) {
            Some(Canned::Record(record)) => Ok(record),
            Some(Canned::Status(status)) => Err(FetchError::status(client_id, status)),
            Some(Canned::Malformed(reason)) => Err(FetchError::malformed(client_id, reason)),
            Some(Canned::Timeout) => Err(FetchError::timeout(10)),
            None => Err(FetchError::status(client_id, 404)),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use scorecard_core::Decision;

    fn record(score: f64) -> ClientRecord {
        ClientRecord {
            age: Some(40.0),
            income: None,
            credit_amount: None,
            employment_length: None,
            score,
            decision: Decision::Rejected,
            global_importance_names: Vec::new(),
            global_importance_values: Vec::new(),
            local_importance_names: Vec::new(),
            local_importance_values: Vec::new(),
            client_important_values: Default::default(),
        }
    }

    #[tokio::test]
    async fn test_mock_serves_records_and_counts_calls() {
        let service = MockScoringService::new().with_record("100002", record(0.3));

        let fetched = service.fetch_client("100002").await.unwrap();
        assert_eq!(fetched.score, 0.3);
        assert_eq!(service.call_count(), 1);
        assert_eq!(service.name(), "mock");
    }

    #[tokio::test]
    async fn test_mock_unknown_client_is_404() {
        let service = MockScoringService::new();

        let err = service.fetch_client("999").await.unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_mock_failure_modes() {
        let service = MockScoringService::new()
            .with_status("1", 500)
            .with_malformed("2", "missing field `score`")
            .with_timeout("3");

        assert!(matches!(
            service.fetch_client("1").await,
            Err(FetchError::Status { status: 500, .. })
        ));
        assert!(matches!(
            service.fetch_client("2").await,
            Err(FetchError::Malformed { .. })
        ));
        assert!(service.fetch_client("3").await.unwrap_err().is_retryable());
        assert_eq!(service.call_count(), 3);
    }

    #[tokio::test]
    async fn test_mock_answers_can_change() {
        let service = MockScoringService::new().with_record("100002", record(0.3));

        service.set_status("100002", 503);
        assert!(service.fetch_client("100002").await.is_err());

        service.set_record("100002", record(0.9));
        assert_eq!(service.fetch_client("100002").await.unwrap().score, 0.9);
    }
}
