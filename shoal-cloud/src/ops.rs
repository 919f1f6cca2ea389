//! Cloud operations facade
//!
//! Composes the state source, the replica selector and the retry driver
//! into the two public operation entry points. The facade picks a single
//! endpoint URL, asks the operations provider to bind an executor to it,
//! and runs the caller's operation against that executor.
//!
//! One facade instance is shared by any number of concurrent callers; the
//! only mutable instance state is the random source used to spread load
//! across equally eligible replicas.

use crate::config::CloudConfig;
use crate::error::{CloudError, Result};
use crate::metrics;
use crate::provider::OperationsProvider;
use crate::retry::RetryPolicy;
use crate::selector;
use crate::source::CloudStateSource;
use crate::topology::{Replica, ReplicaType};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::future::Future;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Cluster-aware entry point for search and update operations
pub struct CloudOperations<S, P> {
    state: Arc<S>,
    provider: Arc<P>,
    collection: Option<String>,
    write_capable: bool,
    retry: RetryPolicy,
    rng: Mutex<StdRng>,
}

impl<S, P> CloudOperations<S, P>
where
    S: CloudStateSource,
    P: OperationsProvider,
{
    /// Create a facade over a state source and an operations provider
    pub fn new(state: Arc<S>, provider: Arc<P>, config: CloudConfig) -> Self {
        Self {
            state,
            provider,
            collection: config.collection,
            write_capable: config.write_capable,
            retry: config.retry,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Replace the random source, e.g. with a seeded one in tests
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = Mutex::new(rng);
        self
    }

    /// Run an operation against the lighter-weight executor surface
    pub async fn perform_basic_operation<R, F, Fut>(&self, op: F, leader_only: bool) -> Result<R>
    where
        F: FnOnce(P::Basic) -> Fut,
        Fut: Future<Output = R>,
    {
        self.perform_basic_operation_with(&CancellationToken::new(), op, leader_only)
            .await
    }

    /// Run an operation against the lighter-weight executor surface,
    /// honoring a caller-supplied cancellation token
    pub async fn perform_basic_operation_with<R, F, Fut>(
        &self,
        cancel: &CancellationToken,
        op: F,
        leader_only: bool,
    ) -> Result<R>
    where
        F: FnOnce(P::Basic) -> Fut,
        Fut: Future<Output = R>,
    {
        let url = self.select_url(cancel, leader_only).await?;
        let executor = self
            .provider
            .basic_executor(&url, self.write_capable)
            .ok_or_else(|| Self::bind_failure(&url))?;
        Ok(op(executor).await)
    }

    /// Run an operation against the fully featured executor surface
    pub async fn perform_operation<R, F, Fut>(&self, op: F, leader_only: bool) -> Result<R>
    where
        F: FnOnce(P::Full) -> Fut,
        Fut: Future<Output = R>,
    {
        self.perform_operation_with(&CancellationToken::new(), op, leader_only)
            .await
    }

    /// Run an operation against the fully featured executor surface,
    /// honoring a caller-supplied cancellation token
    pub async fn perform_operation_with<R, F, Fut>(
        &self,
        cancel: &CancellationToken,
        op: F,
        leader_only: bool,
    ) -> Result<R>
    where
        F: FnOnce(P::Full) -> Fut,
        Fut: Future<Output = R>,
    {
        let url = self.select_url(cancel, leader_only).await?;
        let executor = self
            .provider
            .executor(&url, self.write_capable)
            .ok_or_else(|| Self::bind_failure(&url))?;
        Ok(op(executor).await)
    }

    /// Select the endpoint URL for one operation
    ///
    /// Runs refresh-then-select rounds inside the retry driver, then
    /// spreads load uniformly over the eligible candidates, preferring pull
    /// replicas when any are present.
    async fn select_url(&self, cancel: &CancellationToken, leader_only: bool) -> Result<String> {
        let replicas = self
            .retry
            .run_with_retry(cancel, || self.select_replicas(leader_only))
            .await?;
        Ok(self.choose_url(&replicas))
    }

    /// One selection attempt over the current snapshot
    ///
    /// On failure the topology is refreshed before the error is reported,
    /// so the next round observes updated state. The eligible replicas are
    /// cloned out of the snapshot; nothing selected here survives a later
    /// refresh.
    async fn select_replicas(&self, leader_only: bool) -> Result<Vec<Replica>> {
        metrics::record_selection_attempt();
        let snapshot = self.state.current_snapshot();

        match selector::eligible_replicas(
            snapshot.as_deref(),
            self.collection.as_deref(),
            leader_only,
        ) {
            Ok(replicas) => Ok(replicas.into_iter().cloned().collect()),
            Err(err) => {
                debug!(
                    error = %err,
                    source = self.state.source_name(),
                    "selection failed, refreshing topology"
                );
                metrics::record_topology_refresh(self.state.source_name());
                self.state.refresh().await?;
                Err(err)
            }
        }
    }

    /// Choose one URL uniformly at random, pull replicas first
    fn choose_url(&self, replicas: &[Replica]) -> String {
        let pull: Vec<&Replica> = replicas
            .iter()
            .filter(|replica| replica.replica_type == ReplicaType::Pull)
            .collect();

        let mut rng = self.rng.lock();
        let chosen = if pull.is_empty() {
            &replicas[rng.gen_range(0..replicas.len())]
        } else {
            pull[rng.gen_range(0..pull.len())]
        };

        metrics::record_replica_selected(chosen.replica_type.as_str());
        chosen.url.clone()
    }

    fn bind_failure(url: &str) -> CloudError {
        metrics::record_bind_failure();
        warn!(url, "operations provider returned no executor");
        CloudError::Provider(url.to_string())
    }
}
