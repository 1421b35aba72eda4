//! Entry point of the credit scoring dashboard
#![forbid(unsafe_code)]

use scorecard_client::{HttpScoringService, ScoringService};
use scorecard_core::{Config, Datasets, context_error, context_error::Result, init_logging};
use scorecard_web::{AppState, build_app};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("Note: .env file not loaded: {e}");
    }

    // Without a scorecard.* file or SCORECARD__* variables every setting keeps its default
    let config = Config::load()?;
    init_logging(&config.logging)?;

    info!(
        "Starting credit scoring dashboard v{} on {}:{}",
        env!("CARGO_PKG_VERSION"),
        config.server.host,
        config.server.port
    );

    let datasets = Datasets::load(&config.data).map_err(|e| {
        error!("Failed to load datasets: {}", e);
        context_error!("Dataset loading failed: {}", e)
    })?;
    info!(
        identifiers = datasets.identifiers.len(),
        reference_rows = datasets.reference.len(),
        "Datasets loaded"
    );

    let scoring: Arc<dyn ScoringService> = Arc::new(
        HttpScoringService::new(&config.scoring)
            .map_err(|e| context_error!("Failed to build scoring client: {}", e))?,
    );
    info!(service = scoring.name(), base_url = %config.scoring.base_url, "Scoring service ready");

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .map_err(|e| context_error!("Invalid server address: {}", e))?;

    let state = Arc::new(AppState::new(config, Arc::new(datasets), scoring));
    let app = build_app(state);

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| context_error!("Failed to bind to {}: {}", addr, e))?;
    info!("Dashboard ready at http://{}", addr);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| context_error!("Server error: {}", e))?;

    info!("Server shutdown complete");
    Ok(())
}

/// Resolve on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, shutting down gracefully...");
        },
        () = terminate => {
            info!("Received terminate signal, shutting down gracefully...");
        },
    }
}
