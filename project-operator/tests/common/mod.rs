//! Common test utilities and helpers
//!
//! `FakeCluster` is an in-memory cluster port: objects are stored as JSON
//! keyed by kind and object key, every successful create is logged, and
//! individual lookups or creates can be made to fail.

#![allow(dead_code)]

use async_trait::async_trait;
use k8s_openapi::api::core::v1::{Namespace, ResourceQuota};
use k8s_openapi::api::rbac::v1::RoleBinding;
use project_common::{Environment, Project, ProjectSpec};
use project_operator::kubernetes::{Cluster, DownstreamResource, K8sError, K8sResult, ObjectKey};
use std::collections::{BTreeMap, HashSet};
use std::sync::Mutex;

/// A create recorded by the fake cluster
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mutation {
    pub kind: String,
    pub key: ObjectKey,
}

type StoreKey = (String, ObjectKey);

#[derive(Default)]
pub struct FakeCluster {
    projects: Mutex<BTreeMap<String, Project>>,
    objects: Mutex<BTreeMap<StoreKey, serde_json::Value>>,
    mutations: Mutex<Vec<Mutation>>,
    failing_gets: Mutex<HashSet<StoreKey>>,
    failing_creates: Mutex<HashSet<StoreKey>>,
    failing_project_fetch: Mutex<bool>,
}

impl FakeCluster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_project(project: Project) -> Self {
        let cluster = Self::new();
        cluster.put_project(project);
        cluster
    }

    pub fn put_project(&self, project: Project) {
        let name = project.metadata.name.clone().unwrap_or_default();
        self.projects.lock().unwrap().insert(name, project);
    }

    pub fn delete_project(&self, name: &str) {
        self.projects.lock().unwrap().remove(name);
    }

    /// Store an object directly, without logging a mutation
    pub fn seed<K: DownstreamResource>(&self, object: &K) {
        let key = (K::kind_name(), ObjectKey::of(object));
        let value = serde_json::to_value(object).unwrap();
        self.objects.lock().unwrap().insert(key, value);
    }

    pub fn fail_get<K: DownstreamResource>(&self, key: ObjectKey) {
        self.failing_gets.lock().unwrap().insert((K::kind_name(), key));
    }

    pub fn fail_create<K: DownstreamResource>(&self, key: ObjectKey) {
        self.failing_creates.lock().unwrap().insert((K::kind_name(), key));
    }

    pub fn fail_project_fetch(&self) {
        *self.failing_project_fetch.lock().unwrap() = true;
    }

    pub fn clear_faults(&self) {
        self.failing_gets.lock().unwrap().clear();
        self.failing_creates.lock().unwrap().clear();
        *self.failing_project_fetch.lock().unwrap() = false;
    }

    pub fn object<K: DownstreamResource>(&self, key: &ObjectKey) -> Option<K> {
        self.objects
            .lock()
            .unwrap()
            .get(&(K::kind_name(), key.clone()))
            .map(|v| serde_json::from_value(v.clone()).unwrap())
    }

    pub fn namespace(&self, name: &str) -> Option<Namespace> {
        self.object(&ObjectKey::cluster_scoped(name))
    }

    pub fn quota(&self, namespace: &str) -> Option<ResourceQuota> {
        self.object(&ObjectKey::namespaced(namespace, "resource-quota"))
    }

    pub fn binding(&self, namespace: &str, member: &str) -> Option<RoleBinding> {
        self.object(&ObjectKey::namespaced(namespace, member))
    }

    pub fn count<K: DownstreamResource>(&self) -> usize {
        let kind = K::kind_name();
        self.objects
            .lock()
            .unwrap()
            .keys()
            .filter(|(k, _)| *k == kind)
            .count()
    }

    pub fn mutations(&self) -> Vec<Mutation> {
        self.mutations.lock().unwrap().clone()
    }
}

#[async_trait]
impl Cluster for FakeCluster {
    async fn get_project(&self, name: &str) -> K8sResult<Project> {
        if *self.failing_project_fetch.lock().unwrap() {
            return Err(K8sError::Internal("injected project fetch failure".to_string()));
        }

        self.projects
            .lock()
            .unwrap()
            .get(name)
            .cloned()
            .ok_or_else(|| K8sError::ProjectNotFound(name.to_string()))
    }

    async fn get<K: DownstreamResource>(&self, key: &ObjectKey) -> K8sResult<K> {
        let store_key = (K::kind_name(), key.clone());

        if self.failing_gets.lock().unwrap().contains(&store_key) {
            return Err(K8sError::Internal(format!("injected get failure for {}", key)));
        }

        match self.objects.lock().unwrap().get(&store_key) {
            Some(value) => Ok(serde_json::from_value(value.clone())?),
            None => Err(K8sError::not_found(&store_key.0, &key.name, key.namespace.as_deref())),
        }
    }

    async fn create<K: DownstreamResource>(&self, object: &K) -> K8sResult<K> {
        let key = ObjectKey::of(object);
        let store_key = (K::kind_name(), key.clone());

        if self.failing_creates.lock().unwrap().contains(&store_key) {
            return Err(K8sError::Internal(format!("injected create failure for {}", key)));
        }

        let mut objects = self.objects.lock().unwrap();
        if objects.contains_key(&store_key) {
            return Err(K8sError::Internal(format!("{} already exists", key)));
        }

        objects.insert(store_key.clone(), serde_json::to_value(object)?);
        self.mutations.lock().unwrap().push(Mutation {
            kind: store_key.0,
            key,
        });

        Ok(object.clone())
    }
}

/// The "acme" project: members alice and bob, one "dev" environment
pub fn acme_project() -> Project {
    Project::new(
        "acme",
        ProjectSpec {
            members: vec!["alice".to_string(), "bob".to_string()],
            environments: vec![Environment::new(
                "dev",
                ("100m", "128Mi"),
                ("200m", "256Mi"),
            )],
        },
    )
}

/// A project with the given members and environment names
pub fn project_with(name: &str, members: &[&str], environments: &[&str]) -> Project {
    Project::new(
        name,
        ProjectSpec {
            members: members.iter().map(|m| m.to_string()).collect(),
            environments: environments
                .iter()
                .map(|env| Environment::new(*env, ("500m", "512Mi"), ("1", "1Gi")))
                .collect(),
        },
    )
}
