//! Configuration management for the project operator
//!
//! Settings are loaded from:
//! 1. Environment variables (highest priority)
//! 2. Configuration file (TOML format)
//! 3. Default values (lowest priority)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::logging::LogRotation;

/// Main configuration struct
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OperatorConfig {
    /// Cluster connection
    pub kubernetes: KubernetesConfig,
    /// Controller loop tuning
    pub controller: ControllerConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Cluster connection settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KubernetesConfig {
    /// Explicit kubeconfig file; inferred from the environment when unset
    pub kubeconfig: Option<PathBuf>,
    /// Context within the kubeconfig
    pub context: Option<String>,
}

/// Controller loop settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Delay before a failed reconcile is retried
    pub retry_backoff_secs: u64,
    /// How long in-flight reconciles get to finish on shutdown
    pub shutdown_timeout_secs: u64,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    pub level: String,
    /// Directory for rolling JSON log files; console only when unset
    pub log_dir: Option<PathBuf>,
    pub rotation: LogRotation,
    /// Emit console logs as JSON
    pub json: bool,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            retry_backoff_secs: 5,
            shutdown_timeout_secs: 30,
        }
    }
}

impl ControllerConfig {
    pub fn retry_backoff(&self) -> Duration {
        Duration::from_secs(self.retry_backoff_secs)
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_secs)
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            log_dir: None,
            rotation: LogRotation::Daily,
            json: false,
        }
    }
}

impl OperatorConfig {
    /// Load configuration from an optional explicit file, a discovered file,
    /// and environment variables
    ///
    /// An explicit path must be readable; discovered files are best effort.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::load_from_file(path)?,
            None => match Self::find_config_file() {
                Some(found) => Self::load_from_file(&found).unwrap_or_else(|e| {
                    tracing::warn!("Ignoring config file {}: {}", found.display(), e);
                    Self::default()
                }),
                None => Self::default(),
            },
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a specific file path
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_path_buf(), e.to_string()))?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Find configuration file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        let paths = [
            std::env::var("PROJECT_OPERATOR_CONFIG").ok().map(PathBuf::from),
            Some(PathBuf::from("/etc/project-operator/config.toml")),
            Some(PathBuf::from("./config.toml")),
            Some(PathBuf::from("./project-operator.toml")),
        ];

        paths.into_iter().flatten().find(|p| p.exists())
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        // Kubernetes
        if let Some(path) = lookup("PROJECT_OPERATOR_KUBECONFIG") {
            self.kubernetes.kubeconfig = Some(PathBuf::from(path));
        }
        if let Some(context) = lookup("PROJECT_OPERATOR_CONTEXT") {
            self.kubernetes.context = Some(context);
        }

        // Controller
        if let Some(secs) = lookup("PROJECT_OPERATOR_RETRY_BACKOFF_SECS") {
            if let Ok(secs) = secs.parse() {
                self.controller.retry_backoff_secs = secs;
            }
        }
        if let Some(secs) = lookup("PROJECT_OPERATOR_SHUTDOWN_TIMEOUT_SECS") {
            if let Ok(secs) = secs.parse() {
                self.controller.shutdown_timeout_secs = secs;
            }
        }

        // Logging
        if let Some(level) = lookup("PROJECT_OPERATOR_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(dir) = lookup("PROJECT_OPERATOR_LOG_DIR") {
            self.logging.log_dir = Some(PathBuf::from(dir));
        }
        if let Some(json) = lookup("PROJECT_OPERATOR_LOG_JSON") {
            self.logging.json = json.parse().unwrap_or(false);
        }
    }

    /// Generate a sample configuration file
    pub fn generate_sample() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.controller.retry_backoff_secs == 0 {
            return Err(ConfigError::Validation(
                "Retry backoff must be at least one second".to_string(),
            ));
        }

        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::Validation(
                "Log level cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// Failed to read configuration file
    #[error("Failed to read config file {0:?}: {1}")]
    FileRead(PathBuf, String),
    /// Failed to parse configuration
    #[error("Failed to parse config: {0}")]
    Parse(String),
    /// Configuration validation failed
    #[error("Config validation failed: {0}")]
    Validation(String),
}
