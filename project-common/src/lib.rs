//! Common types shared between the project operator and its tooling

pub mod project;

pub use project::{
    Environment, Limits, Project, ProjectSpec, ProjectStatus, Requests, Resources,
};

/// Shared error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("System error: {0}")]
    System(String),
}

pub type Result<T> = std::result::Result<T, Error>;
