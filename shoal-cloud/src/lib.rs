//! Shoal Cloud - Cluster-aware operation routing for sharded Shoal deployments
//!
//! Given a desired collection and an operation style (read vs. write), this
//! crate picks a live endpoint from a dynamically changing cluster topology
//! and dispatches the caller's operation there, transparently recovering
//! from stale topology snapshots.
//!
//! # Architecture
//!
//! - **Topology**: immutable snapshot of collections, shards and replicas
//! - **Source**: pluggable provider of the last-known snapshot
//! - **Selector**: pure eligibility rules (active replicas, leader-only writes)
//! - **Retry**: refresh-then-retry driver with exponential backoff and
//!   cooperative cancellation
//! - **Ops**: facade that binds the chosen URL to an executor from the
//!   operations provider and runs the caller's operation against it
//!
//! # Selection flow
//!
//! ```text
//! caller → CloudOperations → retry driver → selector(snapshot)
//!            │                   │ failure: refresh topology, back off
//!            │                   └ success: eligible replicas
//!            └ pick URL (pull replicas preferred) → bind executor → run op
//! ```
//!
//! Transport, cluster-metadata plumbing and payload codecs stay behind the
//! [`OperationsProvider`] and [`CloudStateSource`] traits; this crate owns
//! only the routing decision.

pub mod config;
pub mod error;
pub mod metrics;
pub mod provider;
pub mod retry;
pub mod selector;
pub mod source;
pub mod topology;

mod ops;

pub use config::CloudConfig;
pub use error::{CloudError, Result};
pub use ops::CloudOperations;
pub use provider::OperationsProvider;
pub use retry::RetryPolicy;
pub use source::{CloudStateSource, StaticStateSource};
pub use topology::{ClusterSnapshot, Collection, Replica, ReplicaType, Shard};
