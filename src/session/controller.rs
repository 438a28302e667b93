// Download session state machine — submit, observe, terminate.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{info, warn};

use super::poller::ProgressPoller;
use super::view::{ViewState, MSG_DOWNLOAD_FAILED, MSG_EMPTY_URL};
use crate::backend::traits::{BackendError, DownloadBackend};
use crate::backend::types::DownloadRequest;

/// Where the server put a finished download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionResult {
    pub filename: String,
    /// Absolute path on the server host.
    pub full_path: String,
}

/// Non-error terminal states of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    Completed(SessionResult),
    /// The server confirmed a cancellation. Distinct from failure: no result
    /// is recorded and no error is raised.
    Cancelled,
}

#[derive(Debug, Error)]
pub enum SessionError {
    /// Empty or whitespace-only url. Caught before any network call.
    #[error("{}", MSG_EMPTY_URL)]
    EmptyUrl,

    /// A submission is already outstanding; at most one poll loop may exist.
    #[error("a download session is already active")]
    AlreadyActive,

    /// The submission failed: server rejection (with its detail message) or
    /// transport failure.
    #[error("{0}")]
    Download(String),
}

/// Drives one download session at a time against a `DownloadBackend`.
///
/// Owns the observable view state and the single-slot record of the last
/// successful download's path. The slot is overwritten by each success and
/// read by the open-folder action; cancelled and failed sessions never touch
/// it.
pub struct SessionController {
    backend: Arc<dyn DownloadBackend>,
    view: Arc<watch::Sender<ViewState>>,
    poll_interval: Duration,
    active: AtomicBool,
    saved_path: Mutex<Option<String>>,
}

impl SessionController {
    pub fn new(backend: Arc<dyn DownloadBackend>, poll_interval: Duration) -> Self {
        let (view, _) = watch::channel(ViewState::new());
        Self {
            backend,
            view: Arc::new(view),
            poll_interval,
            active: AtomicBool::new(false),
            saved_path: Mutex::new(None),
        }
    }

    /// Subscribe to view-state updates.
    pub fn watch_view(&self) -> watch::Receiver<ViewState> {
        self.view.subscribe()
    }

    pub(crate) fn view_sender(&self) -> &Arc<watch::Sender<ViewState>> {
        &self.view
    }

    /// Absolute path of the most recent successful download, if any.
    pub fn last_saved_path(&self) -> Option<String> {
        self.saved_path.lock().clone()
    }

    /// Run one download session to its terminal state.
    ///
    /// Starts the progress poll loop, issues the blocking download request,
    /// and maps its response to an outcome. Whatever the outcome, the poll
    /// loop is stopped exactly once and the controls are handed back.
    pub async fn submit(
        &self,
        request: DownloadRequest,
    ) -> Result<SessionOutcome, SessionError> {
        if request.url.trim().is_empty() {
            self.view.send_modify(|v| v.finish_error(MSG_EMPTY_URL));
            return Err(SessionError::EmptyUrl);
        }

        if self.active.swap(true, Ordering::SeqCst) {
            return Err(SessionError::AlreadyActive);
        }

        self.view
            .send_modify(|v| v.begin_session(request.download_playlist));

        let poller = ProgressPoller::start(
            Arc::clone(&self.backend),
            Arc::clone(&self.view),
            self.poll_interval,
        );

        let outcome = self.run_submission(&request).await;

        match &outcome {
            Ok(SessionOutcome::Completed(result)) => {
                info!("download finished: {}", result.full_path);
                *self.saved_path.lock() = Some(result.full_path.clone());
                self.view.send_modify(|v| v.finish_success(&result.filename));
            }
            Ok(SessionOutcome::Cancelled) => {
                info!("download cancelled by server");
                self.view.send_modify(|v| v.finish_cancelled());
            }
            Err(e) => {
                warn!("download failed: {}", e);
                let detail = e.to_string();
                self.view.send_modify(|v| v.finish_error(&detail));
            }
        }

        poller.stop().await;
        self.view.send_modify(|v| v.end_session());
        self.active.store(false, Ordering::SeqCst);

        outcome
    }

    async fn run_submission(
        &self,
        request: &DownloadRequest,
    ) -> Result<SessionOutcome, SessionError> {
        let response = self
            .backend
            .start_download(request)
            .await
            .map_err(|e| match e {
                BackendError::Rejected { detail, .. } => SessionError::Download(
                    detail.unwrap_or_else(|| MSG_DOWNLOAD_FAILED.to_string()),
                ),
                other => SessionError::Download(other.to_string()),
            })?;

        if response.status == "cancelled" {
            return Ok(SessionOutcome::Cancelled);
        }

        Ok(SessionOutcome::Completed(SessionResult {
            filename: response.filename.unwrap_or_default(),
            full_path: response.full_path.unwrap_or_default(),
        }))
    }

    /// Ask the server to cancel the session in flight.
    ///
    /// Cooperative and asynchronous: nothing terminates locally here. The
    /// outstanding `submit` observes the resulting cancelled status in its
    /// own response.
    pub async fn cancel(&self) {
        self.view.send_modify(|v| v.cancel_enabled = false);
        if let Err(e) = self.backend.cancel().await {
            warn!("cancel request failed: {}", e);
        }
    }
}
