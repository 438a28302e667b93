use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::debug;

use crate::backend::http_backend::HttpBackend;
use crate::backend::traits::DownloadBackend;
use crate::backend::types::DownloadRequest;
use crate::config::ClientConfig;
use crate::session::controller::{SessionController, SessionError, SessionOutcome};
use crate::session::heartbeat::HeartbeatTask;
use crate::session::view::ViewState;

/// The one object an embedding front-end holds.
///
/// Wires the HTTP backend, the session controller, and the keep-alive loop
/// together. The heartbeat spans the whole client lifetime — dropping the
/// client is what lets the server notice this user is gone.
pub struct DownloadClient {
    backend: Arc<dyn DownloadBackend>,
    controller: SessionController,
    heartbeat: HeartbeatTask,
}

impl DownloadClient {
    pub fn new(config: &ClientConfig) -> Self {
        let backend: Arc<dyn DownloadBackend> = Arc::new(HttpBackend::new(&config.base_url));
        Self::with_backend(backend, config)
    }

    /// Build against any backend implementation.
    pub fn with_backend(backend: Arc<dyn DownloadBackend>, config: &ClientConfig) -> Self {
        let controller = SessionController::new(
            Arc::clone(&backend),
            Duration::from_millis(config.poll_interval_ms),
        );
        let heartbeat = HeartbeatTask::start(
            Arc::clone(&backend),
            Duration::from_millis(config.heartbeat_interval_ms),
        );
        Self {
            backend,
            controller,
            heartbeat,
        }
    }

    /// Subscribe to view-state updates.
    pub fn watch_view(&self) -> watch::Receiver<ViewState> {
        self.controller.watch_view()
    }

    /// Submit a download and drive it to its terminal state.
    pub async fn submit(&self, request: DownloadRequest) -> Result<SessionOutcome, SessionError> {
        self.controller.submit(request).await
    }

    /// Request cancellation of the session in flight.
    pub async fn cancel(&self) {
        self.controller.cancel().await;
    }

    /// Absolute path of the most recent successful download, if any.
    pub fn last_saved_path(&self) -> Option<String> {
        self.controller.last_saved_path()
    }

    /// Pull server-side defaults into the view. Failures are logged and the
    /// view keeps whatever it had.
    pub async fn refresh_config(&self) {
        match self.backend.fetch_config().await {
            Ok(config) => {
                self.controller.view_sender().send_modify(|v| {
                    if let Some(dir) = config.default_dir {
                        v.download_dir = dir;
                    }
                    if let Some(quality) = config.quality {
                        v.quality = Some(quality);
                    }
                });
            }
            Err(e) => debug!("config fetch failed: {}", e),
        }
    }

    /// Open the server-side folder picker and adopt the chosen directory.
    pub async fn browse_folder(&self) -> Option<String> {
        match self.backend.select_folder().await {
            Ok(Some(path)) => {
                self.controller
                    .view_sender()
                    .send_modify(|v| v.download_dir = path.clone());
                Some(path)
            }
            Ok(None) => None,
            Err(e) => {
                debug!("folder picker failed: {}", e);
                None
            }
        }
    }

    /// Adopt and persist a quality preference. Fire-and-forget.
    pub async fn set_quality(&self, quality: &str) {
        self.controller
            .view_sender()
            .send_modify(|v| v.quality = Some(quality.to_string()));
        if let Err(e) = self.backend.set_quality(quality).await {
            debug!("quality save failed: {}", e);
        }
    }

    /// Reveal the last successful download in the server host's file
    /// manager. No-op when nothing has been downloaded yet.
    pub async fn open_result_folder(&self) {
        let Some(path) = self.controller.last_saved_path() else {
            return;
        };
        if let Err(e) = self.backend.open_folder(&path).await {
            debug!("open folder failed: {}", e);
        }
    }

    /// Stop the keep-alive loop. After the server's grace window passes it
    /// will treat this client as closed.
    pub fn shutdown(&self) {
        self.heartbeat.stop();
    }
}
