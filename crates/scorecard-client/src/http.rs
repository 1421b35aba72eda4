//! HTTP implementation of the scoring service

use crate::error::{FetchError, FetchResult};
use crate::service::ScoringService;
use async_trait::async_trait;
use reqwest::StatusCode;
use scorecard_core::ClientRecord;
use scorecard_core::config::ScoringConfig;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, warn};

/// Delay before the first retry; doubles on each further attempt
const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(250);

/// Scoring service reached over HTTP at `{base_url}/client/{id}`
#[derive(Debug, Clone)]
pub struct HttpScoringService {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
    max_retries: u32,
    retry_delay: Duration,
}

impl HttpScoringService {
    /// Create a client from the scoring configuration
    ///
    /// # Errors
    ///
    /// Returns a transport error if the HTTP client cannot be built.
    pub fn new(config: &ScoringConfig) -> FetchResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("scorecard/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(FetchError::transport)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(config.timeout_seconds),
            max_retries: config.max_retries,
            retry_delay: DEFAULT_RETRY_DELAY,
        })
    }

    /// Override the per-request timeout
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the delay before the first retry
    pub const fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn client_url(&self, client_id: &str) -> FetchResult<String> {
        if client_id.trim().is_empty() {
            return Err(FetchError::invalid_identifier(client_id));
        }
        Ok(format!(
            "{}/client/{}",
            self.base_url,
            urlencoding::encode(client_id)
        ))
    }

    fn map_transport(&self, error: &reqwest::Error) -> FetchError {
        if error.is_timeout() {
            FetchError::timeout(self.timeout.as_secs())
        } else {
            FetchError::transport(error)
        }
    }

    async fn fetch_once(&self, client_id: &str, url: &str) -> FetchResult<ClientRecord> {
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| self.map_transport(&e))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::status(client_id, status.as_u16()));
        }

        let body = response.bytes().await.map_err(|e| self.map_transport(&e))?;
        let record: ClientRecord =
            serde_json::from_slice(&body).map_err(|e| FetchError::malformed(client_id, e))?;
        record
            .validate()
            .map_err(|e| FetchError::malformed(client_id, e))?;

        Ok(record)
    }
}

#[async_trait]
impl ScoringService for HttpScoringService {
    async fn fetch_client(&self, client_id: &str) -> FetchResult<ClientRecord> {
        let url = self.client_url(client_id)?;
        let attempts = self.max_retries.saturating_add(1);
        let mut attempt = 1;

        loop {
            debug!(client_id, attempt, attempts, "Fetching client record");

            match self.fetch_once(client_id, &url).await {
                Ok(record) => {
                    info!(
                        client_id,
                        score = record.score,
                        decision = %record.decision,
                        "Fetched client record"
                    );
                    return Ok(record);
                }
                Err(e) if e.is_retryable() && attempt < attempts => {
                    let delay = self.retry_delay * (1 << (attempt - 1).min(16));
                    warn!(
                        client_id,
                        attempt,
                        error = %e,
                        "Scoring request failed, retrying in {delay:?}"
                    );
                    sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn name(&self) -> &str {
        "http"
    }
}
