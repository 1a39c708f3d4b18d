//! Kubernetes integration for the project operator
//!
//! Provides:
//! - Cluster connection via kubeconfig or in-cluster config
//! - The cluster port the reconciler reads and creates through
//! - The Project CRD manifest

pub mod client;
pub mod cluster;
pub mod crd;
pub mod error;

pub use client::K8sClient;
pub use cluster::{Cluster, DownstreamResource, KubeCluster, ObjectKey};
pub use error::{K8sError, K8sResult};
