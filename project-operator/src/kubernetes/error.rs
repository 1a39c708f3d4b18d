//! Kubernetes error types
//!
//! Separates the "not found" conditions that drive the create path from
//! every other failure, which aborts the current reconcile.

use thiserror::Error;

/// Kubernetes-specific errors
#[derive(Debug, Error)]
pub enum K8sError {
    /// Downstream object does not exist
    #[error("Resource not found: {kind}/{name} in namespace {namespace}")]
    NotFound {
        kind: String,
        name: String,
        namespace: String,
    },

    /// The triggering Project no longer exists
    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    /// Error from kube-rs client
    #[error("Kubernetes API error: {0}")]
    Kube(#[from] kube::Error),

    /// Invalid kubeconfig
    #[error("Invalid kubeconfig: {0}")]
    InvalidKubeconfig(String),

    /// Object could not be (de)serialized
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Internal system error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl K8sError {
    /// Build a NotFound error for an object key
    pub fn not_found(kind: &str, name: &str, namespace: Option<&str>) -> Self {
        K8sError::NotFound {
            kind: kind.to_string(),
            name: name.to_string(),
            namespace: namespace.unwrap_or_default().to_string(),
        }
    }

    /// True for both downstream and Project "not found" conditions
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            K8sError::NotFound { .. } | K8sError::ProjectNotFound(_)
        )
    }
}

impl From<serde_json::Error> for K8sError {
    fn from(err: serde_json::Error) -> Self {
        K8sError::Serialization(err.to_string())
    }
}

impl From<K8sError> for project_common::Error {
    fn from(err: K8sError) -> Self {
        match err {
            K8sError::ProjectNotFound(name) => project_common::Error::ProjectNotFound(name),
            K8sError::InvalidKubeconfig(msg) => project_common::Error::InvalidConfig(msg),
            other => project_common::Error::System(other.to_string()),
        }
    }
}

/// Result type alias for Kubernetes operations
pub type K8sResult<T> = std::result::Result<T, K8sError>;
