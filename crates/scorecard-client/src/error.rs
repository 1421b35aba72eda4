//! Error types for the scoring client

use thiserror::Error;

/// Result type alias for scoring service calls
pub type FetchResult<T> = Result<T, FetchError>;

/// Ways fetching a client record can fail
///
/// Every variant means "no data for this client" to the dashboard; the
/// distinction only matters for logging and retries.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The service answered with a status other than 200
    #[error("Scoring service returned HTTP {status} for client {client_id}")]
    Status {
        /// Requested client
        client_id: String,
        /// HTTP status code
        status: u16,
    },

    /// The body was not a valid client record
    #[error("Malformed client record for {client_id}: {reason}")]
    Malformed {
        /// Requested client
        client_id: String,
        /// What was wrong with the body
        reason: String,
    },

    /// No response within the configured timeout
    #[error("Scoring service timed out after {seconds} seconds")]
    Timeout {
        /// Timeout duration
        seconds: u64,
    },

    /// Connection or protocol failure
    #[error("Failed to reach scoring service: {message}")]
    Transport {
        /// Error message
        message: String,
    },

    /// The identifier cannot be used in a request path
    #[error("Invalid client identifier: {client_id:?}")]
    InvalidIdentifier {
        /// Rejected identifier
        client_id: String,
    },
}

impl FetchError {
    /// Create a status error
    pub fn status(client_id: impl Into<String>, status: u16) -> Self {
        Self::Status {
            client_id: client_id.into(),
            status,
        }
    }

    /// Create a malformed body error
    pub fn malformed(client_id: impl Into<String>, reason: impl ToString) -> Self {
        Self::Malformed {
            client_id: client_id.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a timeout error
    pub const fn timeout(seconds: u64) -> Self {
        Self::Timeout { seconds }
    }

    /// Create a transport error
    pub fn transport(message: impl ToString) -> Self {
        Self::Transport {
            message: message.to_string(),
        }
    }

    /// Create an invalid identifier error
    pub fn invalid_identifier(client_id: impl Into<String>) -> Self {
        Self::InvalidIdentifier {
            client_id: client_id.into(),
        }
    }

    /// Check if error is retryable
    ///
    /// Only failures to get any answer are retried. A definite answer from
    /// the service, good or bad, is final.
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Timeout { .. } | Self::Transport { .. })
    }

    /// Short reason recorded in the session's fetch status
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Status { .. } => "status",
            Self::Malformed { .. } => "malformed",
            Self::Timeout { .. } => "timeout",
            Self::Transport { .. } => "transport",
            Self::InvalidIdentifier { .. } => "invalid_identifier",
        }
    }
}
