//! Routing-specific error types

use thiserror::Error;

/// Errors that can occur while routing an operation to the cluster
#[derive(Error, Debug, Clone)]
pub enum CloudError {
    #[error("no cluster topology available")]
    NoTopology,

    #[error("collection '{0}' not present in cluster topology")]
    UnknownCollection(String),

    #[error("no eligible replica to serve the operation")]
    NoEligibleReplica,

    #[error("cluster state source error: {0}")]
    StateSource(String),

    #[error("selection attempt timed out: {0}")]
    Timeout(String),

    #[error("could not select a replica after {attempts} attempts")]
    RetryExhausted { attempts: u32 },

    #[error("operations provider returned no executor for {0}")]
    Provider(String),

    #[error("operation cancelled")]
    Cancelled,
}

impl CloudError {
    /// Get the error type as a string for metrics labeling
    pub fn error_type(&self) -> &'static str {
        match self {
            CloudError::NoTopology => "no_topology",
            CloudError::UnknownCollection(_) => "unknown_collection",
            CloudError::NoEligibleReplica => "no_eligible_replica",
            CloudError::StateSource(_) => "state_source",
            CloudError::Timeout(_) => "timeout",
            CloudError::RetryExhausted { .. } => "retry_exhausted",
            CloudError::Provider(_) => "provider",
            CloudError::Cancelled => "cancelled",
        }
    }

    /// Fatal errors are surfaced to the caller immediately, never retried
    pub fn is_fatal(&self) -> bool {
        matches!(self, CloudError::Provider(_) | CloudError::Cancelled)
    }
}

pub type Result<T> = std::result::Result<T, CloudError>;
