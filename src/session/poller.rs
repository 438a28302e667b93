// Progress poll loop — best-effort telemetry while a submission is in flight.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::view::ViewState;
use crate::backend::traits::DownloadBackend;

/// Polls the progress endpoint at a fixed cadence and folds each snapshot
/// into the view. A failed or slow tick is simply dropped; the next one runs
/// at its scheduled time. Polling never decides the session outcome.
pub struct ProgressPoller {
    token: CancellationToken,
    handle: JoinHandle<()>,
}

impl ProgressPoller {
    pub fn start(
        backend: Arc<dyn DownloadBackend>,
        view: Arc<watch::Sender<ViewState>>,
        interval: Duration,
    ) -> Self {
        let token = CancellationToken::new();
        let task_token = token.clone();

        let handle = tokio::spawn(async move {
            // First tick after one full interval, matching the session's
            // placeholder render; skipped ticks are not replayed.
            let mut ticker = time::interval_at(time::Instant::now() + interval, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = task_token.cancelled() => {
                        debug!("progress poller stopped");
                        break;
                    }
                    _ = ticker.tick() => {
                        match backend.progress().await {
                            Ok(snapshot) => {
                                view.send_modify(|v| v.apply_snapshot(&snapshot));
                            }
                            Err(e) => {
                                debug!("progress poll failed: {}", e);
                            }
                        }
                    }
                }
            }
        });

        Self { token, handle }
    }

    /// Stop the loop and wait for the task to exit. Consuming `self` makes
    /// stopping a poller a one-shot operation.
    pub async fn stop(self) {
        self.token.cancel();
        let _ = self.handle.await;
    }
}
