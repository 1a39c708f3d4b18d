//! Create-if-absent convergence
//!
//! An existing object is accepted as-is: it is never compared against the
//! desired shape and never updated.

use tracing::{debug, error, info};

use crate::kubernetes::{Cluster, DownstreamResource, K8sError, K8sResult, ObjectKey};

/// Which path `ensure` took
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Created,
    AlreadyExists,
}

/// Make sure an object exists at the desired object's key
///
/// Any error other than "not found" on lookup, and any error on create, is
/// returned unchanged.
pub async fn ensure<C, K>(cluster: &C, desired: &K) -> K8sResult<Outcome>
where
    C: Cluster,
    K: DownstreamResource,
{
    let key = ObjectKey::of(desired);
    let kind = K::kind_name();

    match cluster.get::<K>(&key).await {
        Ok(_) => {
            debug!(kind = %kind, key = %key, "Object already exists");
            Ok(Outcome::AlreadyExists)
        }
        Err(K8sError::NotFound { .. }) => {
            info!(kind = %kind, key = %key, "Creating a new {}", kind);

            if let Err(e) = cluster.create(desired).await {
                error!(kind = %kind, key = %key, error = %e, "Failed to create new {}", kind);
                return Err(e);
            }

            Ok(Outcome::Created)
        }
        Err(e) => {
            error!(kind = %kind, key = %key, error = %e, "Failed to get {}", kind);
            Err(e)
        }
    }
}
