//! Top-level operator errors

use thiserror::Error;

use crate::config::ConfigError;
use crate::kubernetes::K8sError;
use crate::logging::LoggingError;

#[derive(Debug, Error)]
pub enum OperatorError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Kubernetes(#[from] K8sError),

    #[error(transparent)]
    Logging(#[from] LoggingError),

    #[error("Controller task failed: {0}")]
    Task(String),
}

pub type Result<T> = std::result::Result<T, OperatorError>;
