//! Song service configuration

use std::time::Duration;

/// Saves below this many entries are refused
pub const MINIMUM_LIST_SIZE: usize = 10;

/// Configuration for talking to the song service
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Base URL of the service (e.g., http://localhost:8080)
    pub base_url: String,

    /// Minimum list length accepted by `save`
    pub minimum_list_size: usize,

    /// Per-request timeout (None = wait for the transport to give up)
    pub timeout: Option<Duration>,
}

impl SyncConfig {
    /// Create a configuration for the service at `base_url`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            minimum_list_size: MINIMUM_LIST_SIZE,
            timeout: None,
        }
    }

    /// Override the minimum list size required for saving
    pub fn with_minimum_list_size(mut self, minimum: usize) -> Self {
        self.minimum_list_size = minimum;
        self
    }

    /// Set a per-request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}
