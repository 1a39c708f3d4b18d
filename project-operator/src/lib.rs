//! Project Operator Library
//!
//! Turns a cluster-scoped `Project` resource into one namespace and one
//! resource quota per environment, plus one role binding per environment
//! and member. Objects are created when missing and otherwise left alone.

// Core modules
pub mod config;
pub mod error;

// Kubernetes integration
pub mod kubernetes;

// Reconciliation
pub mod controller;
pub mod reconcile;

// Logging configuration
pub mod logging;

// Graceful shutdown handling
pub mod shutdown;

pub use config::OperatorConfig;
pub use error::{OperatorError, Result};
