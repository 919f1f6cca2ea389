//! Retry-with-refresh driver
//!
//! Generic retry loop used by the facade to recover from stale topology.
//! Each round races the supplied attempt against an optional per-attempt
//! deadline and the caller's cancellation token, then backs off
//! exponentially before the next round until the budget is spent. The
//! driver knows nothing about replicas or snapshots; the attempt closure
//! carries the refresh side effect.

use crate::error::{CloudError, Result};
use crate::metrics;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Retry behavior for replica selection
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RetryPolicy {
    /// Maximum selection rounds before giving up
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Base backoff delay in milliseconds; doubles after every failed round
    #[serde(default = "default_base_delay")]
    pub base_delay_ms: u64,

    /// Per-attempt timeout in milliseconds; attempts are unbounded when absent
    #[serde(default)]
    pub attempt_timeout_ms: Option<u64>,
}

fn default_max_retries() -> u32 {
    10
}

fn default_base_delay() -> u64 {
    100
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            base_delay_ms: default_base_delay(),
            attempt_timeout_ms: None,
        }
    }
}

impl RetryPolicy {
    /// Get the base backoff delay as a Duration
    pub fn base_delay(&self) -> Duration {
        Duration::from_millis(self.base_delay_ms)
    }

    /// Get the per-attempt timeout as a Duration
    pub fn attempt_timeout(&self) -> Option<Duration> {
        self.attempt_timeout_ms.map(Duration::from_millis)
    }

    /// Backoff delay after failed round `round` (1-based): base, 2*base,
    /// 4*base, ...
    pub fn backoff_delay(&self, round: u32) -> Duration {
        self.base_delay()
            .saturating_mul(2u32.saturating_pow(round.saturating_sub(1)))
    }

    /// Drive `attempt` until it succeeds or the budget is spent
    ///
    /// Non-fatal failures are retried after a backoff wait; a failure
    /// observed while `cancel` is already set propagates immediately with no
    /// further rounds. Cancellation raised during an attempt or a backoff
    /// wait surfaces as [`CloudError::Cancelled`].
    pub async fn run_with_retry<T, F, Fut>(
        &self,
        cancel: &CancellationToken,
        mut attempt: F,
    ) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        for round in 1..=self.max_retries {
            match self.run_attempt(cancel, attempt()).await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_fatal() => return Err(err),
                Err(err) => {
                    metrics::record_retry_failure(err.error_type());

                    if cancel.is_cancelled() {
                        return Err(err);
                    }
                    if round == self.max_retries {
                        warn!(attempts = round, error = %err, "selection retry budget exhausted");
                        break;
                    }

                    let delay = self.backoff_delay(round);
                    debug!(
                        round,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "attempt failed, backing off"
                    );
                    metrics::record_retry_wait(delay);

                    tokio::select! {
                        biased;
                        _ = cancel.cancelled() => return Err(CloudError::Cancelled),
                        _ = tokio::time::sleep(delay) => {}
                    }
                }
            }
        }

        Err(CloudError::RetryExhausted {
            attempts: self.max_retries,
        })
    }

    /// Run a single attempt, bounded by the per-attempt timeout and the
    /// cancellation token
    ///
    /// A timeout drops the attempt future, so the in-flight work is
    /// genuinely cancelled rather than left running unobserved.
    async fn run_attempt<T>(
        &self,
        cancel: &CancellationToken,
        attempt: impl Future<Output = Result<T>>,
    ) -> Result<T> {
        let bounded = async {
            match self.attempt_timeout() {
                Some(limit) => match tokio::time::timeout(limit, attempt).await {
                    Ok(outcome) => outcome,
                    Err(_) => Err(CloudError::Timeout(format!(
                        "attempt exceeded {}ms",
                        limit.as_millis()
                    ))),
                },
                None => attempt.await,
            }
        };

        tokio::select! {
            biased;
            outcome = bounded => outcome,
            _ = cancel.cancelled() => Err(CloudError::Cancelled),
        }
    }
}
