//! End-to-end routing behavior over the public API

use shoal_cloud::{
    CloudConfig, CloudError, CloudOperations, ClusterSnapshot, Collection, OperationsProvider,
    Replica, ReplicaType, RetryPolicy, Shard, StaticStateSource,
};
use std::collections::HashMap;
use std::sync::Arc;

/// Provider handing back the bound URL as the "executor"
struct UrlProvider;

impl OperationsProvider for UrlProvider {
    type Basic = String;
    type Full = String;

    fn basic_executor(&self, url: &str, _write_capable: bool) -> Option<String> {
        Some(url.to_string())
    }

    fn executor(&self, url: &str, _write_capable: bool) -> Option<String> {
        Some(url.to_string())
    }
}

fn docs_snapshot() -> ClusterSnapshot {
    let replica = Replica::new("core_node1", "http://a:8983", true, false, ReplicaType::Nrt);
    let mut replicas = HashMap::new();
    replicas.insert(replica.name.clone(), replica);

    let mut shards = HashMap::new();
    shards.insert("shard1".to_string(), Shard::new("shard1", true, replicas));

    let mut collections = HashMap::new();
    collections.insert("docs".to_string(), Collection::new("docs", shards));
    ClusterSnapshot::new(collections)
}

#[tokio::test]
async fn routes_read_to_the_only_replica() {
    let source = Arc::new(StaticStateSource::new(docs_snapshot()));
    let facade = CloudOperations::new(source, Arc::new(UrlProvider), CloudConfig::default());

    let url = facade
        .perform_operation(|executor| async move { executor }, false)
        .await
        .unwrap();

    assert_eq!(url, "http://a:8983");
}

#[tokio::test(start_paused = true)]
async fn empty_cluster_state_surfaces_retry_exhaustion() {
    let source = Arc::new(StaticStateSource::empty());
    let config = CloudConfig {
        retry: RetryPolicy {
            max_retries: 4,
            base_delay_ms: 100,
            attempt_timeout_ms: None,
        },
        ..CloudConfig::default()
    };
    let facade = CloudOperations::new(source, Arc::new(UrlProvider), config);

    let err = facade
        .perform_operation(|executor| async move { executor }, false)
        .await
        .unwrap_err();

    assert!(matches!(err, CloudError::RetryExhausted { attempts: 4 }));
}

#[tokio::test]
async fn topology_swap_redirects_subsequent_calls() {
    let source = Arc::new(StaticStateSource::new(docs_snapshot()));
    let facade = CloudOperations::new(
        source.clone(),
        Arc::new(UrlProvider),
        CloudConfig::for_collection("docs"),
    );

    let url = facade
        .perform_operation(|executor| async move { executor }, false)
        .await
        .unwrap();
    assert_eq!(url, "http://a:8983");

    // The cluster moves the collection to a different node
    let replica = Replica::new("core_node2", "http://b:8983", true, false, ReplicaType::Nrt);
    let mut replicas = HashMap::new();
    replicas.insert(replica.name.clone(), replica);
    let mut shards = HashMap::new();
    shards.insert("shard1".to_string(), Shard::new("shard1", true, replicas));
    let mut collections = HashMap::new();
    collections.insert("docs".to_string(), Collection::new("docs", shards));
    source.set_snapshot(ClusterSnapshot::new(collections));

    let url = facade
        .perform_operation(|executor| async move { executor }, false)
        .await
        .unwrap();
    assert_eq!(url, "http://b:8983");
}
