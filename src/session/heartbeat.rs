// Keep-alive loop — tells the server this client is still here.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::{self, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::backend::traits::DownloadBackend;

/// Fires a lightweight heartbeat at a fixed cadence for the lifetime of the
/// client, independent of any download session. The server treats heartbeat
/// silence as the client having gone away and shuts itself down after a
/// grace window, so this loop must outlive every session.
pub struct HeartbeatTask {
    token: CancellationToken,
}

impl HeartbeatTask {
    pub fn start(backend: Arc<dyn DownloadBackend>, interval: Duration) -> Self {
        let token = CancellationToken::new();
        let task_token = token.clone();

        tokio::spawn(async move {
            let mut ticker = time::interval_at(time::Instant::now() + interval, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = task_token.cancelled() => {
                        debug!("heartbeat stopped");
                        break;
                    }
                    _ = ticker.tick() => {
                        if let Err(e) = backend.heartbeat().await {
                            warn!("heartbeat failed: {}", e);
                        }
                    }
                }
            }
        });

        Self { token }
    }

    pub fn stop(&self) {
        self.token.cancel();
    }
}

impl Drop for HeartbeatTask {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
