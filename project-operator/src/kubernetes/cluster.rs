//! Cluster access port
//!
//! The reconciler only needs three primitives from the cluster: fetch the
//! triggering Project, look up a downstream object by key, and create a
//! downstream object. `KubeCluster` provides them over the API server; tests
//! provide an in-memory implementation.

use async_trait::async_trait;
use k8s_openapi::api::core::v1::{Namespace, ResourceQuota};
use k8s_openapi::api::rbac::v1::RoleBinding;
use kube::api::{Api, PostParams};
use kube::{Client, Resource, ResourceExt};
use project_common::Project;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;

use super::client::K8sClient;
use super::error::{K8sError, K8sResult};

/// Identity of an object: name plus namespace for namespaced kinds
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectKey {
    pub name: String,
    pub namespace: Option<String>,
}

impl ObjectKey {
    pub fn cluster_scoped(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: None,
        }
    }

    pub fn namespaced(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: Some(namespace.into()),
        }
    }

    /// Key of an existing or desired object, read from its metadata
    pub fn of<K: Resource>(object: &K) -> Self {
        Self {
            name: object.name_any(),
            namespace: object.namespace(),
        }
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{}/{}", ns, self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

/// A kind of object the operator creates on behalf of a Project
pub trait DownstreamResource:
    Resource<DynamicType = ()>
    + Clone
    + fmt::Debug
    + Serialize
    + DeserializeOwned
    + Send
    + Sync
    + 'static
{
    /// Scoped API handle for this kind
    fn api(client: Client, namespace: Option<&str>) -> Api<Self>;

    /// Kind name used in logs and errors
    fn kind_name() -> String {
        Self::kind(&()).into_owned()
    }
}

impl DownstreamResource for Namespace {
    fn api(client: Client, _namespace: Option<&str>) -> Api<Self> {
        Api::all(client)
    }
}

impl DownstreamResource for ResourceQuota {
    fn api(client: Client, namespace: Option<&str>) -> Api<Self> {
        match namespace {
            Some(ns) => Api::namespaced(client, ns),
            None => Api::default_namespaced(client),
        }
    }
}

impl DownstreamResource for RoleBinding {
    fn api(client: Client, namespace: Option<&str>) -> Api<Self> {
        match namespace {
            Some(ns) => Api::namespaced(client, ns),
            None => Api::default_namespaced(client),
        }
    }
}

/// Read and create primitives the reconciler depends on
#[async_trait]
pub trait Cluster: Send + Sync {
    /// Fetch a Project; `K8sError::ProjectNotFound` when it is gone
    async fn get_project(&self, name: &str) -> K8sResult<Project>;

    /// Look up an object; `K8sError::NotFound` when absent
    async fn get<K: DownstreamResource>(&self, key: &ObjectKey) -> K8sResult<K>;

    /// Create an object at the key recorded in its metadata
    async fn create<K: DownstreamResource>(&self, object: &K) -> K8sResult<K>;
}

/// Cluster port backed by the Kubernetes API server
#[derive(Clone, Debug)]
pub struct KubeCluster {
    client: K8sClient,
}

impl KubeCluster {
    pub fn new(client: K8sClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &K8sClient {
        &self.client
    }
}

#[async_trait]
impl Cluster for KubeCluster {
    async fn get_project(&self, name: &str) -> K8sResult<Project> {
        let projects: Api<Project> = Api::all(self.client.inner().clone());

        projects
            .get_opt(name)
            .await?
            .ok_or_else(|| K8sError::ProjectNotFound(name.to_string()))
    }

    async fn get<K: DownstreamResource>(&self, key: &ObjectKey) -> K8sResult<K> {
        let api = K::api(self.client.inner().clone(), key.namespace.as_deref());

        api.get_opt(&key.name).await?.ok_or_else(|| {
            K8sError::not_found(&K::kind_name(), &key.name, key.namespace.as_deref())
        })
    }

    async fn create<K: DownstreamResource>(&self, object: &K) -> K8sResult<K> {
        let namespace = object.namespace();
        let api = K::api(self.client.inner().clone(), namespace.as_deref());

        Ok(api.create(&PostParams::default(), object).await?)
    }
}
