//! Event-to-invocation adapter
//!
//! `kube::runtime::Controller` watches Project objects and serializes
//! reconciles per Project key. This module hands it the reconcile entry
//! point and the retry policy.

use futures::{FutureExt, StreamExt};
use kube::api::Api;
use kube::runtime::controller::{Action, Controller};
use kube::runtime::watcher;
use kube::ResourceExt;
use project_common::Project;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::config::ControllerConfig;
use crate::kubernetes::{Cluster, K8sError, KubeCluster};
use crate::reconcile::reconcile_project;
use crate::shutdown::ShutdownCoordinator;

/// Shared state handed to every reconcile
pub struct Context<C> {
    pub cluster: C,
    pub retry_backoff: Duration,
}

impl<C: Cluster> Context<C> {
    pub fn new(cluster: C, config: &ControllerConfig) -> Arc<Self> {
        Arc::new(Self {
            cluster,
            retry_backoff: config.retry_backoff(),
        })
    }
}

/// Reconcile entry point invoked per changed Project
///
/// Only the name is taken from the event; the Project itself is re-read so a
/// deletion between event and invocation reconciles as a no-op.
pub async fn reconcile<C: Cluster>(
    project: Arc<Project>,
    ctx: Arc<Context<C>>,
) -> Result<Action, K8sError> {
    let name = project.name_any();
    reconcile_project(&ctx.cluster, &name).await?;

    Ok(Action::await_change())
}

/// Requeue a failed Project after the configured backoff
pub fn error_policy<C: Cluster>(
    project: Arc<Project>,
    error: &K8sError,
    ctx: Arc<Context<C>>,
) -> Action {
    warn!(
        project = %project.name_any(),
        error = %error,
        "Reconcile failed, retrying in {:?}",
        ctx.retry_backoff
    );

    Action::requeue(ctx.retry_backoff)
}

/// Run the Project controller until shutdown is signalled
pub async fn run(cluster: KubeCluster, config: &ControllerConfig, shutdown: ShutdownCoordinator) {
    let projects: Api<Project> = Api::all(cluster.client().inner().clone());
    let ctx = Context::new(cluster, config);

    info!("Starting Project controller");

    // graceful_shutdown_on requires a Sync future
    let trigger = async move { shutdown.signalled().await }.boxed().shared();

    Controller::new(projects, watcher::Config::default())
        .graceful_shutdown_on(trigger)
        .run(reconcile::<KubeCluster>, error_policy::<KubeCluster>, ctx)
        .for_each(|result| async move {
            match result {
                Ok((object, _)) => info!(project = %object.name, "Reconciled"),
                Err(e) => warn!(error = %e, "Reconcile error"),
            }
        })
        .await;

    info!("Project controller stopped");
}
