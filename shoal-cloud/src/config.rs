//! Client configuration

use crate::retry::RetryPolicy;
use serde::{Deserialize, Serialize};

/// Configuration for a cloud operations facade
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CloudConfig {
    /// Collection every operation is bound to; `None` routes to the first
    /// collection reported by the topology
    #[serde(default)]
    pub collection: Option<String>,

    /// Request write-capable executors from the operations provider
    #[serde(default)]
    pub write_capable: bool,

    /// Retry behavior for replica selection
    #[serde(default)]
    pub retry: RetryPolicy,
}

impl CloudConfig {
    /// Configuration bound to a specific collection
    pub fn for_collection(name: impl Into<String>) -> Self {
        Self {
            collection: Some(name.into()),
            ..Self::default()
        }
    }

    /// Request write-capable executors
    pub fn write_capable(mut self) -> Self {
        self.write_capable = true;
        self
    }
}
