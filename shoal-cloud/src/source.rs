//! Cluster state sources
//!
//! Pluggable providers of the last-known cluster topology. A source owns the
//! snapshot lifecycle: it builds a fresh [`ClusterSnapshot`] on every reload
//! and swaps it in atomically. Readers get a cheap `Arc` handle that stays
//! consistent for the duration of one selection attempt; a forced refresh
//! invalidates every previously observed replica.

use crate::error::Result;
use crate::topology::ClusterSnapshot;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::sync::Arc;

/// Trait for cluster state source implementations
#[async_trait]
pub trait CloudStateSource: Send + Sync {
    /// Last-known topology, without blocking; `None` before the first load
    fn current_snapshot(&self) -> Option<Arc<ClusterSnapshot>>;

    /// Trigger a reload from the cluster metadata service and await its
    /// completion
    async fn refresh(&self) -> Result<()>;

    /// Get the source backend name for logs and metrics
    fn source_name(&self) -> &'static str;
}

/// Fixed state source holding a snapshot supplied by the embedding
/// application
///
/// Best for development and small fixed deployments. `refresh` is a no-op;
/// the topology only changes when the owner swaps it with
/// [`set_snapshot`](StaticStateSource::set_snapshot).
pub struct StaticStateSource {
    snapshot: RwLock<Option<Arc<ClusterSnapshot>>>,
}

impl StaticStateSource {
    /// Create a source serving the given snapshot
    pub fn new(snapshot: ClusterSnapshot) -> Self {
        Self {
            snapshot: RwLock::new(Some(Arc::new(snapshot))),
        }
    }

    /// Create a source with no topology loaded
    pub fn empty() -> Self {
        Self {
            snapshot: RwLock::new(None),
        }
    }

    /// Replace the served snapshot
    pub fn set_snapshot(&self, snapshot: ClusterSnapshot) {
        *self.snapshot.write() = Some(Arc::new(snapshot));
    }

    /// Drop the served snapshot entirely
    pub fn clear(&self) {
        *self.snapshot.write() = None;
    }
}

#[async_trait]
impl CloudStateSource for StaticStateSource {
    fn current_snapshot(&self) -> Option<Arc<ClusterSnapshot>> {
        self.snapshot.read().clone()
    }

    async fn refresh(&self) -> Result<()> {
        // Fixed topology, nothing to reload
        Ok(())
    }

    fn source_name(&self) -> &'static str {
        "static"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::{Collection, ClusterSnapshot};
    use std::collections::HashMap;

    fn one_collection_snapshot(name: &str) -> ClusterSnapshot {
        let mut collections = HashMap::new();
        collections.insert(name.to_string(), Collection::new(name, HashMap::new()));
        ClusterSnapshot::new(collections)
    }

    #[test]
    fn test_empty_source() {
        let source = StaticStateSource::empty();
        assert!(source.current_snapshot().is_none());
    }

    #[test]
    fn test_swap_and_clear() {
        let source = StaticStateSource::new(one_collection_snapshot("docs"));
        assert!(source.current_snapshot().unwrap().collection("docs").is_some());

        source.set_snapshot(one_collection_snapshot("products"));
        let snapshot = source.current_snapshot().unwrap();
        assert!(snapshot.collection("docs").is_none());
        assert!(snapshot.collection("products").is_some());

        source.clear();
        assert!(source.current_snapshot().is_none());
    }

    #[test]
    fn test_snapshot_handle_outlives_swap() {
        let source = StaticStateSource::new(one_collection_snapshot("docs"));
        let held = source.current_snapshot().unwrap();

        source.set_snapshot(one_collection_snapshot("products"));

        // The old handle still reads the view it was taken from
        assert!(held.collection("docs").is_some());
        assert!(source.current_snapshot().unwrap().collection("docs").is_none());
    }

    #[tokio::test]
    async fn test_refresh_is_noop() {
        let source = StaticStateSource::new(one_collection_snapshot("docs"));
        source.refresh().await.unwrap();
        assert!(source.current_snapshot().unwrap().collection("docs").is_some());
        assert_eq!(source.source_name(), "static");
    }
}
