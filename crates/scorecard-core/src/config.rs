//! Configuration management for the scorecard dashboard

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Web server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Remote scoring service configuration
    #[serde(default)]
    pub scoring: ScoringConfig,

    /// Local data files
    #[serde(default)]
    pub data: DataConfig,

    /// Dashboard display settings
    #[serde(default)]
    pub dashboard: DashboardConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Remote scoring service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Base URL; client records are fetched from `{base_url}/client/{id}`
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Additional attempts after a transport failure or timeout
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

/// Local data file configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// CSV holding the selectable client identifiers
    #[serde(default = "default_identifiers_path")]
    pub identifiers_path: PathBuf,

    /// Column of `identifiers_path` holding the identifiers
    #[serde(default = "default_identifier_column")]
    pub identifier_column: String,

    /// CSV of historical rows used for reference distributions
    #[serde(default = "default_reference_path")]
    pub reference_path: PathBuf,

    /// Binary outcome column of `reference_path`
    #[serde(default = "default_target_column")]
    pub target_column: String,
}

/// Dashboard display settings
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Decision threshold, shown for information only
    #[serde(default = "default_decision_threshold")]
    pub decision_threshold: f64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (json or pretty)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    8501
}

fn default_base_url() -> String {
    "https://appliscoring-1f1f7c4e1003.herokuapp.com".to_string()
}

const fn default_timeout_seconds() -> u64 {
    10
}

const fn default_max_retries() -> u32 {
    1
}

fn default_identifiers_path() -> PathBuf {
    PathBuf::from("test_data.csv")
}

fn default_identifier_column() -> String {
    "SK_ID_CURR".to_string()
}

fn default_reference_path() -> PathBuf {
    PathBuf::from("train_sample.csv")
}

fn default_target_column() -> String {
    "TARGET".to_string()
}

const fn default_decision_threshold() -> f64 {
    0.46
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout_seconds(),
            max_retries: default_max_retries(),
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            identifiers_path: default_identifiers_path(),
            identifier_column: default_identifier_column(),
            reference_path: default_reference_path(),
            target_column: default_target_column(),
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            decision_threshold: default_decision_threshold(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from an optional `scorecard.*` file and `SCORECARD__*` environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or parsed.
    pub fn load() -> crate::Result<Self> {
        Self::build(config::File::with_name("scorecard").required(false))
    }

    /// Load configuration from an explicit file, still honouring the environment
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or the configuration cannot be parsed.
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        Self::build(config::File::from(path))
    }

    fn build(file: config::File<config::FileSourceFile, config::FileFormat>) -> crate::Result<Self> {
        let config = config::Config::builder()
            .add_source(file)
            .add_source(config::Environment::with_prefix("SCORECARD").separator("__"))
            .build()
            .map_err(|e| crate::Error::Configuration {
                message: e.to_string(),
            })?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| crate::Error::Configuration {
                message: e.to_string(),
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Check values that would make the dashboard unusable
    ///
    /// # Errors
    ///
    /// Returns a configuration error naming the first invalid value.
    pub fn validate(&self) -> crate::Result<()> {
        if self.scoring.base_url.trim().is_empty() {
            return Err(crate::Error::Configuration {
                message: "scoring.base_url must not be empty".to_string(),
            });
        }
        if self.scoring.timeout_seconds == 0 {
            return Err(crate::Error::Configuration {
                message: "scoring.timeout_seconds must be greater than zero".to_string(),
            });
        }
        if !(0.0..=1.0).contains(&self.dashboard.decision_threshold) {
            return Err(crate::Error::Configuration {
                message: format!(
                    "dashboard.decision_threshold must lie in [0, 1], got {}",
                    self.dashboard.decision_threshold
                ),
            });
        }
        Ok(())
    }
}
