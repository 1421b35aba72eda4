//! Common fixtures and helpers for dashboard integration tests

#![allow(dead_code, clippy::missing_panics_doc)]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use scorecard_client::{MockScoringService, ScoringService};
use scorecard_core::context_error::{ResultExt, Result};
use scorecard_core::{ClientRecord, Config, Datasets};
use scorecard_web::{AppState, build_app};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

/// Record served for client 100002
pub const RECORD_100002: &str = r#"{
    "age": 25.9,
    "income": 202500.0,
    "credit_amount": 406597.5,
    "employment_length": null,
    "score": 0.62,
    "decision": "Accepte",
    "global_importance_names": ["EXT_SOURCE_3", "EXT_SOURCE_2", "DAYS_BIRTH"],
    "global_importance_values": [0.31, -0.12, 0.0],
    "local_importance_names": ["CODE_GENDER", "AMT_CREDIT"],
    "local_importance_values": [-0.05, 0.2],
    "client_important_values": {"CODE_GENDER": 1, "EXT_SOURCE_3": 0.14, "DAYS_BIRTH": null}
}"#;

/// Rejected client with an out-of-range score
pub const RECORD_100004: &str = r#"{
    "age": 52.3,
    "income": 135000.0,
    "credit_amount": 1293502.5,
    "employment_length": 3.2,
    "score": 1.3,
    "decision": "Refuse",
    "global_importance_names": ["EXT_SOURCE_3"],
    "global_importance_values": [0.31],
    "local_importance_names": ["EXT_SOURCE_3"],
    "local_importance_values": [-0.4],
    "client_important_values": {"EXT_SOURCE_3": 0.55}
}"#;

pub const IDENTIFIERS_CSV: &str = "SK_ID_CURR\n100002\n100003\n100004\n";

pub const REFERENCE_CSV: &str = "\
TARGET,CODE_GENDER,EXT_SOURCE_3,DAYS_BIRTH
0,0,0.71,-12000
0,1,0.55,-15000
1,1,0.12,-9000
0,0,0.64,-20000
1,1,0.20,-10000
0,0,0.48,-17000
";

/// Parse a fixture record
pub fn record(json: &str) -> Result<ClientRecord> {
    serde_json::from_str(json).with_context(|| "Invalid fixture record")
}

/// A running dashboard over temporary CSV files and a mock scoring service
pub struct TestDashboard {
    pub app: Router,
    pub service: Arc<MockScoringService>,
    _dir: TempDir,
}

impl TestDashboard {
    /// Dashboard knowing 100002 and 100004; 100003 answers 500
    pub fn new() -> Result<Self> {
        let service = MockScoringService::new()
            .with_record("100002", record(RECORD_100002)?)
            .with_record("100004", record(RECORD_100004)?)
            .with_status("100003", 500);
        Self::with_service(service)
    }

    /// Dashboard using `service` for client records
    pub fn with_service(service: MockScoringService) -> Result<Self> {
        let dir = TempDir::new()?;
        let identifiers_path = dir.path().join("identifiers.csv");
        let reference_path = dir.path().join("reference.csv");
        std::fs::write(&identifiers_path, IDENTIFIERS_CSV)?;
        std::fs::write(&reference_path, REFERENCE_CSV)?;

        let mut config = Config::default();
        config.data.identifiers_path = identifiers_path;
        config.data.reference_path = reference_path;
        let datasets = Datasets::load(&config.data)?;

        let service = Arc::new(service);
        let scoring: Arc<dyn ScoringService> = service.clone();
        let state = Arc::new(AppState::new(config, Arc::new(datasets), scoring));

        Ok(Self {
            app: build_app(state),
            service,
            _dir: dir,
        })
    }

    /// Send a GET request
    pub async fn get(&self, uri: &str) -> Result<TestResponse> {
        let request = Request::builder()
            .uri(uri)
            .body(Body::empty())
            .with_context(|| format!("Invalid request for {uri}"))?;
        self.send(request).await
    }

    /// Send a form-encoded POST request
    pub async fn post_form(&self, uri: &str, form: &str) -> Result<TestResponse> {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string()))
            .with_context(|| format!("Invalid request for {uri}"))?;
        self.send(request).await
    }

    /// Select a client through the sidebar form
    pub async fn select(&self, client_id: &str) -> Result<TestResponse> {
        self.post_form("/client", &format!("client_id={client_id}"))
            .await
    }

    async fn send(&self, request: Request<Body>) -> Result<TestResponse> {
        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .with_context(|| "Request failed")?;
        let status = response.status();
        let location = response
            .headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .with_context(|| "Failed to read body")?;
        Ok(TestResponse {
            status,
            location,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        })
    }
}

/// Collected response
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub location: Option<String>,
    pub body: String,
}

impl TestResponse {
    /// Parse the body as JSON
    pub fn json(&self) -> Result<serde_json::Value> {
        serde_json::from_str(&self.body).with_context(|| "Body is not JSON")
    }
}
