//! Project CustomResourceDefinition manifest

use kube::CustomResourceExt;
use project_common::Project;

use super::error::{K8sError, K8sResult};

/// Render the Project CRD as a YAML manifest ready for `kubectl apply`
pub fn project_crd_yaml() -> K8sResult<String> {
    serde_yaml::to_string(&Project::crd()).map_err(|e| K8sError::Serialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crd_manifest() {
        let yaml = project_crd_yaml().unwrap();
        assert!(yaml.contains("kind: CustomResourceDefinition"));
        assert!(yaml.contains("name: projects.operations.operator.io"));
        assert!(yaml.contains("scope: Cluster"));
        assert!(yaml.contains("maxLength: 15"));
        assert!(yaml.contains("minLength: 1"));
    }
}
