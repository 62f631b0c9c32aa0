//! Synchronizer Configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// What to do when a delete is requested for an id that already has one in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicateDeletePolicy {
    /// Report `Coalesced` at once and send nothing
    #[default]
    Coalesce,
    /// Send another request; the first confirmation removes the entry
    Forward,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Origin the `/items` routes hang off, e.g. `http://localhost:5000`
    pub base_url: String,
    /// Upper bound per request; `None` waits forever
    pub request_timeout_ms: Option<u64>,
    /// Extra attempts after a transport error or timeout
    pub transport_retries: u32,
    pub duplicate_deletes: DuplicateDeletePolicy,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            request_timeout_ms: Some(10_000),
            transport_retries: 0,
            duplicate_deletes: DuplicateDeletePolicy::default(),
        }
    }
}

impl SyncConfig {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }

    /// Base URL without trailing slashes
    pub fn origin(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}
