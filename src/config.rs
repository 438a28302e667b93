use serde::Deserialize;

/// Interval between progress polls while a download session is in flight.
pub const PROGRESS_POLL_INTERVAL_MS: u64 = 800;

/// Interval between keep-alive heartbeats, sent for the lifetime of the client.
pub const HEARTBEAT_INTERVAL_MS: u64 = 3000;

/// Silence window after which the server treats the client as gone and shuts
/// down. The heartbeat interval must stay well inside this.
pub const HEARTBEAT_GRACE_SECONDS: u64 = 10;

/// Default address of the local backend.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:4321";

/// Top-level configuration for the download client.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the backend, without a trailing slash.
    pub base_url: String,
    /// Progress poll cadence in milliseconds.
    pub poll_interval_ms: u64,
    /// Heartbeat cadence in milliseconds.
    pub heartbeat_interval_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            poll_interval_ms: PROGRESS_POLL_INTERVAL_MS,
            heartbeat_interval_ms: HEARTBEAT_INTERVAL_MS,
        }
    }
}
