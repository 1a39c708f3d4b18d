//! Desired state of the objects derived from a Project
//!
//! Pure functions: the same (project, environment, member) always yields the
//! same object. Quantities are copied verbatim.

use k8s_openapi::api::core::v1::{Namespace, ResourceQuota, ResourceQuotaSpec};
use k8s_openapi::api::rbac::v1::{RoleBinding, RoleRef, Subject};
use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use project_common::{Environment, Project};
use std::collections::BTreeMap;

use super::naming::{
    namespace_name, owner_labels, Component, CLUSTER_ROLE_KIND, MEMBER_CLUSTER_ROLE,
    MEMBER_NAMESPACE, MEMBER_SUBJECT_KIND, RBAC_API_GROUP, RESOURCE_QUOTA_NAME,
};

pub fn describe_namespace(project: &Project, env: &Environment) -> Namespace {
    Namespace {
        metadata: ObjectMeta {
            name: Some(namespace_name(project, env)),
            labels: Some(owner_labels(project, Component::Namespace)),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Quota with hard limits taken from the environment's requests and limits
pub fn describe_resource_quota(project: &Project, env: &Environment) -> ResourceQuota {
    let resources = &env.resources;

    let hard: BTreeMap<String, Quantity> = BTreeMap::from([
        ("requests.cpu".to_string(), resources.requests.cpu.clone()),
        ("requests.memory".to_string(), resources.requests.memory.clone()),
        ("limits.cpu".to_string(), resources.limits.cpu.clone()),
        ("limits.memory".to_string(), resources.limits.memory.clone()),
    ]);

    ResourceQuota {
        metadata: ObjectMeta {
            name: Some(RESOURCE_QUOTA_NAME.to_string()),
            namespace: Some(namespace_name(project, env)),
            labels: Some(owner_labels(project, Component::ResourceQuota)),
            ..Default::default()
        },
        spec: Some(ResourceQuotaSpec {
            hard: Some(hard),
            ..Default::default()
        }),
        ..Default::default()
    }
}

/// Grants `edit` to the member's service account in the `users` namespace.
/// The service account itself is expected to exist already.
pub fn describe_role_binding(project: &Project, env: &Environment, member: &str) -> RoleBinding {
    RoleBinding {
        metadata: ObjectMeta {
            name: Some(member.to_string()),
            namespace: Some(namespace_name(project, env)),
            labels: Some(owner_labels(project, Component::RoleBinding)),
            ..Default::default()
        },
        role_ref: RoleRef {
            api_group: RBAC_API_GROUP.to_string(),
            kind: CLUSTER_ROLE_KIND.to_string(),
            name: MEMBER_CLUSTER_ROLE.to_string(),
        },
        subjects: Some(vec![Subject {
            kind: MEMBER_SUBJECT_KIND.to_string(),
            name: member.to_string(),
            namespace: Some(MEMBER_NAMESPACE.to_string()),
            ..Default::default()
        }]),
    }
}
