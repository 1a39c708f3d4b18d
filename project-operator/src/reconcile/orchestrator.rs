//! Reconcile loop for a single Project
//!
//! Walks the Project's environments in spec order. For each one the
//! namespace is ensured first, then the quota, then one binding per member.
//! The first error aborts the whole walk; objects created before it stay in
//! place and the next invocation re-runs the walk from the start.

use kube::ResourceExt;
use project_common::Project;
use tracing::{error, info, info_span, Instrument};

use super::converge::{ensure, Outcome};
use super::describe::{describe_namespace, describe_resource_quota, describe_role_binding};
use crate::kubernetes::{Cluster, DownstreamResource, K8sError, K8sResult};

/// Counts of what a successful reconcile did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileSummary {
    pub created: usize,
    pub already_existed: usize,
    /// Set when the Project was gone and nothing was attempted
    pub project_missing: bool,
}

impl ReconcileSummary {
    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Created => self.created += 1,
            Outcome::AlreadyExists => self.already_existed += 1,
        }
    }

    /// Total number of objects visited
    pub fn visited(&self) -> usize {
        self.created + self.already_existed
    }
}

/// Reconcile the Project called `name`
///
/// A Project that no longer exists is treated as already deleted and
/// reconciles successfully without touching the cluster.
pub async fn reconcile_project<C: Cluster>(cluster: &C, name: &str) -> K8sResult<ReconcileSummary> {
    let span = info_span!("reconcile", project = %name);

    async move {
        info!("Starting reconcile loop for {}", name);
        let result = run(cluster, name).await;
        info!("Finished reconcile loop for {}", name);
        result
    }
    .instrument(span)
    .await
}

async fn run<C: Cluster>(cluster: &C, name: &str) -> K8sResult<ReconcileSummary> {
    let project = match cluster.get_project(name).await {
        Ok(project) => project,
        Err(K8sError::ProjectNotFound(_)) => {
            info!("Project {} not found, assuming it was deleted", name);
            return Ok(ReconcileSummary {
                project_missing: true,
                ..Default::default()
            });
        }
        Err(e) => {
            error!(error = %e, "unable to fetch Project");
            return Err(e);
        }
    };

    converge_project(cluster, &project).await
}

/// Ensure every object derived from an already-fetched Project
pub async fn converge_project<C: Cluster>(
    cluster: &C,
    project: &Project,
) -> K8sResult<ReconcileSummary> {
    let mut summary = ReconcileSummary::default();

    for env in &project.spec.environments {
        step(cluster, &describe_namespace(project, env), &mut summary).await?;
        step(cluster, &describe_resource_quota(project, env), &mut summary).await?;

        for member in &project.spec.members {
            step(cluster, &describe_role_binding(project, env, member), &mut summary).await?;
        }
    }

    info!(
        project = %project.name_any(),
        created = summary.created,
        existing = summary.already_existed,
        "Project converged"
    );

    Ok(summary)
}

async fn step<C: Cluster, K: DownstreamResource>(
    cluster: &C,
    desired: &K,
    summary: &mut ReconcileSummary,
) -> K8sResult<()> {
    let outcome = ensure(cluster, desired).await?;
    summary.record(outcome);
    Ok(())
}
