//! Core types, configuration and reference data for the scorecard dashboard

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

pub mod config;
pub mod dataset;
pub mod density;
pub mod error;
pub mod types;

/// Simple error context handling for binaries and startup code
pub mod context_error {
    use std::{error::Error as StdError, fmt};

    /// A simple error type that can wrap any error with context
    #[derive(Debug)]
    pub struct ContextError {
        source: Option<Box<dyn StdError + Send + Sync>>,
        message: String,
    }

    impl ContextError {
        /// Create a new context error from a message
        pub fn new<S: Into<String>>(message: S) -> Self {
            Self {
                source: None,
                message: message.into(),
            }
        }

        /// Create a new context error from an existing error with context
        pub fn with_context<E, S>(error: E, message: S) -> Self
        where
            E: StdError + Send + Sync + 'static,
            S: Into<String>,
        {
            Self {
                source: Some(Box::new(error)),
                message: message.into(),
            }
        }
    }

    impl fmt::Display for ContextError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match &self.source {
                Some(source) => write!(f, "{}: {source}", self.message),
                None => f.write_str(&self.message),
            }
        }
    }

    impl StdError for ContextError {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            self.source.as_ref().map(|e| e.as_ref() as &(dyn StdError + 'static))
        }
    }

    /// Result type alias for context errors
    pub type Result<T> = std::result::Result<T, ContextError>;

    /// Create a context error from a message or format string
    #[macro_export]
    macro_rules! context_error {
        ($msg:literal) => {
            $crate::context_error::ContextError::new($msg)
        };
        ($fmt:expr, $($arg:tt)*) => {
            $crate::context_error::ContextError::new(format!($fmt, $($arg)*))
        };
    }

    /// Extension trait for adding context to results
    pub trait ResultExt<T> {
        /// Add context to an error
        ///
        /// # Errors
        ///
        /// Returns the original error wrapped with the message from `f`.
        fn with_context<F, S>(self, f: F) -> Result<T>
        where
            F: FnOnce() -> S,
            S: Into<String>;
    }

    impl<T, E> ResultExt<T> for std::result::Result<T, E>
    where
        E: StdError + Send + Sync + 'static,
    {
        fn with_context<F, S>(self, f: F) -> Result<T>
        where
            F: FnOnce() -> S,
            S: Into<String>,
        {
            self.map_err(|e| ContextError::with_context(e, f()))
        }
    }

    impl From<std::io::Error> for ContextError {
        fn from(err: std::io::Error) -> Self {
            Self::with_context(err, "I/O operation failed")
        }
    }

    impl From<crate::Error> for ContextError {
        fn from(err: crate::Error) -> Self {
            Self::with_context(err, "Dashboard setup failed")
        }
    }

    impl From<config::ConfigError> for ContextError {
        fn from(err: config::ConfigError) -> Self {
            Self::with_context(err, "Configuration error")
        }
    }
}

// Re-export commonly used types
pub use config::Config;
pub use dataset::{ClientIdentifierList, Datasets, ReferenceDataset};
pub use density::{DensityCurve, gaussian_kde};
pub use error::{Error, Result};
pub use types::{ClientRecord, Decision};

/// Initialize the logging system
///
/// `RUST_LOG` takes precedence over the configured level. The configured
/// format selects JSON lines (`json`) or human-readable output (anything
/// else).
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_logging(config: &config::LoggingConfig) -> context_error::Result<()> {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);
    let result = if config.format.eq_ignore_ascii_case("json") {
        registry.with(tracing_subscriber::fmt::layer().json()).try_init()
    } else {
        registry.with(tracing_subscriber::fmt::layer().pretty()).try_init()
    };

    result.map_err(|e| context_error::ContextError::with_context(e, "Failed to install logger"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::missing_panics_doc)]
mod tests {
    use super::context_error::{ContextError, ResultExt};
    use super::*;
    use std::error::Error as StdError;

    #[test]
    fn test_context_error_keeps_source() {
        let result: std::result::Result<(), std::io::Error> =
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "train_sample.csv"));

        let err = result.with_context(|| "Loading reference data").unwrap_err();

        assert_eq!(err.to_string(), "Loading reference data: train_sample.csv");
        assert!(err.source().is_some());
    }

    #[test]
    fn test_context_error_macro() {
        let err: ContextError = context_error!("bad port {}", 70000);
        assert_eq!(err.to_string(), "bad port 70000");
        assert!(err.source().is_none());
    }

    #[test]
    fn test_context_error_from_core_error() {
        let err = ContextError::from(Error::dataset("ids.csv", "empty"));
        assert!(err.to_string().contains("Dataset error in ids.csv: empty"));
    }
}
