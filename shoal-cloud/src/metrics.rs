//! Routing observability metrics
//!
//! Prometheus-compatible counters for the selection pipeline: attempt and
//! failure counts, forced topology refreshes, backoff waits and the replica
//! types ultimately chosen to serve traffic.

use std::time::Duration;

/// Record the start of a selection attempt
pub fn record_selection_attempt() {
    metrics::counter!("shoal_cloud_selection_attempts_total").increment(1);
}

/// Record a failed selection round
pub fn record_retry_failure(error_type: &str) {
    metrics::counter!(
        "shoal_cloud_selection_failures_total",
        "error_type" => error_type.to_string(),
    )
    .increment(1);
}

/// Record a backoff wait before the next selection round
pub fn record_retry_wait(delay: Duration) {
    metrics::histogram!("shoal_cloud_retry_wait_seconds").record(delay.as_secs_f64());
}

/// Record a forced topology refresh
pub fn record_topology_refresh(source: &str) {
    metrics::counter!(
        "shoal_cloud_topology_refreshes_total",
        "source" => source.to_string(),
    )
    .increment(1);
}

/// Record the replica type chosen to serve an operation
pub fn record_replica_selected(replica_type: &str) {
    metrics::counter!(
        "shoal_cloud_replicas_selected_total",
        "replica_type" => replica_type.to_string(),
    )
    .increment(1);
}

/// Record a binding refusal from the operations provider
pub fn record_bind_failure() {
    metrics::counter!("shoal_cloud_bind_failures_total").increment(1);
}
