use async_trait::async_trait;
use thiserror::Error;

use super::types::{DownloadRequest, DownloadResponse, ProgressSnapshot, ServerConfig};

#[derive(Debug, Error)]
pub enum BackendError {
    /// Non-success HTTP response. `detail` is the server-supplied message
    /// when the error body carried one.
    #[error("{}", .detail.as_deref().unwrap_or("request rejected"))]
    Rejected { status: u16, detail: Option<String> },

    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

pub type BackendResult<T> = Result<T, BackendError>;

/// Everything the download server exposes to this client.
#[async_trait]
pub trait DownloadBackend: Send + Sync {
    /// Submit a download and block until the job terminates.
    async fn start_download(&self, request: &DownloadRequest) -> BackendResult<DownloadResponse>;

    /// Fetch the current progress snapshot.
    async fn progress(&self) -> BackendResult<ProgressSnapshot>;

    /// Ask the server to cancel the job in flight.
    async fn cancel(&self) -> BackendResult<()>;

    /// Keep-alive ping.
    async fn heartbeat(&self) -> BackendResult<()>;

    /// Fetch server-side defaults (download directory, preferred quality).
    async fn fetch_config(&self) -> BackendResult<ServerConfig>;

    /// Open the server-side folder picker. `None` when the user dismissed it.
    async fn select_folder(&self) -> BackendResult<Option<String>>;

    /// Persist the preferred quality on the server.
    async fn set_quality(&self, quality: &str) -> BackendResult<()>;

    /// Reveal `file_path` in the server host's file manager.
    async fn open_folder(&self, file_path: &str) -> BackendResult<()>;
}
