//! Point-in-time cluster topology model
//!
//! Value types describing the collections, shards and replicas of a Shoal
//! deployment as last reported by the cluster metadata service. A snapshot
//! is immutable once built: the state source assembles a fresh one on every
//! reload and swaps it in atomically, so readers always observe a
//! consistent view and never a partially-updated one.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Replica flavor within a shard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReplicaType {
    /// Near-real-time replica; indexes locally and may be elected leader
    Nrt,
    /// Transaction-log replica; replays the leader's log, may be elected leader
    Tlog,
    /// Pull replica; copies finished segments from others, never accepts
    /// writes and never participates in leader election
    Pull,
}

impl Default for ReplicaType {
    fn default() -> Self {
        ReplicaType::Nrt
    }
}

impl ReplicaType {
    /// Get the replica type as a string for metrics
    pub fn as_str(&self) -> &'static str {
        match self {
            ReplicaType::Nrt => "nrt",
            ReplicaType::Tlog => "tlog",
            ReplicaType::Pull => "pull",
        }
    }
}

/// A single replica of a shard, addressable at a network endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Replica {
    /// Replica name (unique within its shard)
    pub name: String,

    /// Network endpoint serving this replica
    pub url: String,

    /// Is the replica currently serving
    pub is_active: bool,

    /// Is the replica its shard's current write leader
    pub is_leader: bool,

    /// Replica flavor
    pub replica_type: ReplicaType,
}

impl Replica {
    /// Create a new replica
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        is_active: bool,
        is_leader: bool,
        replica_type: ReplicaType,
    ) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            is_active,
            is_leader,
            replica_type,
        }
    }
}

/// A horizontal partition of a collection's data
///
/// Within one active shard at most one active replica carries the leader
/// flag; the metadata service is trusted to uphold this, the routing layer
/// only selects among what it is given.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shard {
    /// Shard name (unique within its collection)
    pub name: String,

    /// Is the shard serving; only active shards qualify for
    /// leader-restricted operations
    pub is_active: bool,

    /// Replicas by replica name
    pub replicas: HashMap<String, Replica>,
}

impl Shard {
    /// Create a new shard from its replica set
    pub fn new(
        name: impl Into<String>,
        is_active: bool,
        replicas: HashMap<String, Replica>,
    ) -> Self {
        Self {
            name: name.into(),
            is_active,
            replicas,
        }
    }
}

/// A named collection and its shards
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collection {
    /// Collection name (unique within a snapshot)
    pub name: String,

    /// Shards by shard name
    pub shards: HashMap<String, Shard>,
}

impl Collection {
    /// Create a new collection from its shard set
    pub fn new(name: impl Into<String>, shards: HashMap<String, Shard>) -> Self {
        Self {
            name: name.into(),
            shards,
        }
    }
}

/// Point-in-time view of every collection known to the cluster
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClusterSnapshot {
    /// Collections by collection name
    pub collections: HashMap<String, Collection>,
}

impl ClusterSnapshot {
    /// Create a snapshot from a collection set
    pub fn new(collections: HashMap<String, Collection>) -> Self {
        Self { collections }
    }

    /// Does the snapshot contain no collections at all
    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }

    /// Look up a collection by name
    pub fn collection(&self, name: &str) -> Option<&Collection> {
        self.collections.get(name)
    }

    /// An arbitrary collection, for callers not bound to a specific one
    pub fn first_collection(&self) -> Option<&Collection> {
        self.collections.values().next()
    }
}
