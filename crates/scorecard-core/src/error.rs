//! Error types for the scorecard dashboard

use std::{error::Error as StdError, fmt};

/// Main error type for the scorecard dashboard
#[derive(Debug)]
pub enum Error {
    /// I/O error
    Io(std::io::Error),

    /// Configuration error
    Configuration {
        /// Error message
        message: String,
    },

    /// CSV parsing error
    Csv(csv::Error),

    /// Reference or identifier dataset is unusable
    Dataset {
        /// Dataset path or name
        source_name: String,
        /// Error message
        message: String,
    },

    /// Validation error
    Validation {
        /// Field that failed validation
        field: String,
        /// Validation error message
        message: String,
    },
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a dataset error
    pub fn dataset(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Dataset {
            source_name: source_name.into(),
            message: message.into(),
        }
    }

    /// Create a validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "I/O error: {err}"),
            Self::Configuration { message } => write!(f, "Configuration error: {message}"),
            Self::Csv(err) => write!(f, "CSV error: {err}"),
            Self::Dataset {
                source_name,
                message,
            } => write!(f, "Dataset error in {source_name}: {message}"),
            Self::Validation { field, message } => {
                write!(f, "Validation error: {field} - {message}")
            }
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Csv(err) => Some(err),
            _ => None,
        }
    }
}

// From implementations for automatic conversions
impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::missing_panics_doc,
    clippy::uninlined_format_args,
    clippy::match_same_arms
)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::error::Error as StdError;
    use std::io;

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let app_error = Error::from(io_error);

        match app_error {
            Error::Io(_) => {}
            _ => panic!("Expected Io error variant"),
        }

        assert!(format!("{}", app_error).contains("I/O error"));
    }

    #[test]
    fn test_configuration_error() {
        let error = Error::Configuration {
            message: "Invalid base URL".to_string(),
        };

        assert_eq!(format!("{}", error), "Configuration error: Invalid base URL");
    }

    #[test]
    fn test_dataset_error() {
        let error = Error::dataset("train_sample.csv", "missing TARGET column");

        assert_eq!(
            format!("{}", error),
            "Dataset error in train_sample.csv: missing TARGET column"
        );
        assert!(error.source().is_none());
    }

    #[test]
    fn test_validation_error() {
        let error = Error::validation("global_importance_values", "length mismatch");

        assert_eq!(
            format!("{}", error),
            "Validation error: global_importance_values - length mismatch"
        );
    }

    #[test]
    fn test_csv_error_keeps_source() {
        let data = "a,b\n1,2,3\n";
        let mut reader = csv::Reader::from_reader(data.as_bytes());
        let csv_error = reader.records().next().unwrap().unwrap_err();
        let app_error = Error::from(csv_error);

        assert!(format!("{}", app_error).starts_with("CSV error"));
        assert!(app_error.source().is_some());
    }
}
