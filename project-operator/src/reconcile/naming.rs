//! Names and ownership labels for downstream objects

use kube::ResourceExt;
use project_common::{Environment, Project};
use std::collections::BTreeMap;
use std::fmt;

pub const LABEL_NAME: &str = "app.kubernetes.io/name";
pub const LABEL_COMPONENT: &str = "app.kubernetes.io/component";
pub const LABEL_MANAGED_BY: &str = "app.kubernetes.io/managed-by";

/// Value of the managed-by label on every object this operator creates
pub const MANAGED_BY: &str = "project-operator";

/// Name of the quota object inside each environment namespace
pub const RESOURCE_QUOTA_NAME: &str = "resource-quota";

/// Cluster role granted to members in every environment
pub const MEMBER_CLUSTER_ROLE: &str = "edit";
pub const RBAC_API_GROUP: &str = "rbac.authorization.k8s.io";
pub const CLUSTER_ROLE_KIND: &str = "ClusterRole";

/// Members are service accounts living in this namespace
pub const MEMBER_SUBJECT_KIND: &str = "ServiceAccount";
pub const MEMBER_NAMESPACE: &str = "users";

/// Component tag recorded on downstream objects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    Namespace,
    ResourceQuota,
    RoleBinding,
}

impl Component {
    pub fn as_str(&self) -> &'static str {
        match self {
            Component::Namespace => "namespace",
            Component::ResourceQuota => "resource-quota",
            Component::RoleBinding => "role-binding",
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `<project>-<environment>`
pub fn namespace_name(project: &Project, env: &Environment) -> String {
    format!("{}-{}", project.name_any(), env.name)
}

pub fn owner_labels(project: &Project, component: Component) -> BTreeMap<String, String> {
    BTreeMap::from([
        (LABEL_NAME.to_string(), project.name_any()),
        (LABEL_COMPONENT.to_string(), component.to_string()),
        (LABEL_MANAGED_BY.to_string(), MANAGED_BY.to_string()),
    ])
}
