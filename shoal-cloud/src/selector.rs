//! Replica eligibility rules
//!
//! Pure selection over a topology snapshot: no suspension, no side effects.
//! The selector only narrows the candidate set; spreading load across the
//! returned candidates is the facade's job.

use crate::error::{CloudError, Result};
use crate::topology::{ClusterSnapshot, Replica};

/// Collect the replicas eligible to serve an operation
///
/// Without `leader_only`, every active replica of every shard qualifies.
/// With it, the shard must be active and the replica must carry the leader
/// flag. An absent `collection` falls back to the first collection
/// encountered in the snapshot.
///
/// The returned list borrows from the snapshot and is never empty.
pub fn eligible_replicas<'a>(
    snapshot: Option<&'a ClusterSnapshot>,
    collection: Option<&str>,
    leader_only: bool,
) -> Result<Vec<&'a Replica>> {
    let snapshot = snapshot.ok_or(CloudError::NoTopology)?;
    if snapshot.is_empty() {
        return Err(CloudError::NoTopology);
    }

    let collection = match collection {
        Some(name) => snapshot
            .collection(name)
            .ok_or_else(|| CloudError::UnknownCollection(name.to_string()))?,
        None => snapshot.first_collection().ok_or(CloudError::NoTopology)?,
    };

    let replicas: Vec<&Replica> = collection
        .shards
        .values()
        .filter(|shard| !leader_only || shard.is_active)
        .flat_map(|shard| shard.replicas.values())
        .filter(|replica| replica.is_active && (!leader_only || replica.is_leader))
        .collect();

    if replicas.is_empty() {
        return Err(CloudError::NoEligibleReplica);
    }

    Ok(replicas)
}
