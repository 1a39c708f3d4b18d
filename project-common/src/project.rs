//! The `Project` custom resource
//!
//! A Project names a set of members and a set of environments, each with a
//! CPU/memory request and limit budget. It is cluster scoped and only ever
//! read by the operator.

use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Desired state of a Project
#[derive(CustomResource, Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "operations.operator.io",
    version = "v1alpha1",
    kind = "Project",
    plural = "projects",
    shortname = "pr",
    shortname = "prg",
    status = "ProjectStatus"
)]
pub struct ProjectSpec {
    /// Service account names granted `edit` in every environment
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub environments: Vec<Environment>,
}

/// A named, resource-budgeted subdivision of a Project
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Environment {
    #[schemars(length(min = 1, max = 15))]
    pub name: String,
    #[serde(default)]
    pub resources: Resources,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Resources {
    #[serde(default)]
    pub requests: Requests,
    #[serde(default)]
    pub limits: Limits,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Requests {
    #[serde(default)]
    pub cpu: Quantity,
    #[serde(default)]
    pub memory: Quantity,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Limits {
    #[serde(default)]
    pub cpu: Quantity,
    #[serde(default)]
    pub memory: Quantity,
}

/// Observed state of a Project (nothing is recorded yet)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ProjectStatus {}

impl Environment {
    /// Build an environment from plain quantity strings
    pub fn new(
        name: impl Into<String>,
        requests: (&str, &str),
        limits: (&str, &str),
    ) -> Self {
        Self {
            name: name.into(),
            resources: Resources {
                requests: Requests {
                    cpu: Quantity(requests.0.to_string()),
                    memory: Quantity(requests.1.to_string()),
                },
                limits: Limits {
                    cpu: Quantity(limits.0.to_string()),
                    memory: Quantity(limits.1.to_string()),
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kube::{CustomResourceExt, Resource};

    #[test]
    fn test_project_is_cluster_scoped() {
        let crd = Project::crd();
        assert_eq!(crd.spec.scope, "Cluster");
        assert_eq!(crd.spec.group, "operations.operator.io");
        assert_eq!(Project::kind(&()), "Project");
        assert_eq!(Project::api_version(&()), "operations.operator.io/v1alpha1");
    }

    #[test]
    fn test_crd_short_names() {
        let crd = Project::crd();
        let short = crd.spec.names.short_names.unwrap_or_default();
        assert_eq!(short, vec!["pr".to_string(), "prg".to_string()]);
    }

    #[test]
    fn test_spec_deserializes_with_missing_fields() {
        let spec: ProjectSpec = serde_json::from_str("{}").unwrap();
        assert!(spec.members.is_empty());
        assert!(spec.environments.is_empty());
    }

    #[test]
    fn test_spec_wire_format() {
        let json = serde_json::json!({
            "members": ["alice", "bob"],
            "environments": [{
                "name": "dev",
                "resources": {
                    "requests": {"cpu": "100m", "memory": "128Mi"},
                    "limits": {"cpu": "200m", "memory": "256Mi"}
                }
            }]
        });

        let spec: ProjectSpec = serde_json::from_value(json).unwrap();
        assert_eq!(spec.members, vec!["alice", "bob"]);
        assert_eq!(
            spec.environments[0],
            Environment::new("dev", ("100m", "128Mi"), ("200m", "256Mi"))
        );
    }

    #[test]
    fn test_quantities_are_not_normalized() {
        let env: Environment = serde_json::from_value(serde_json::json!({
            "name": "prod",
            "resources": {"requests": {"cpu": "0.5"}}
        }))
        .unwrap();

        assert_eq!(env.resources.requests.cpu, Quantity("0.5".to_string()));
        assert_eq!(env.resources.requests.memory, Quantity::default());
    }
}
