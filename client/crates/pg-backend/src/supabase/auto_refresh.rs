use crate::SupabaseBackend;

use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

impl SupabaseBackend {
    /// Keep the access token fresh in the background.
    ///
    /// Every `interval` the current session is refreshed if it expires within
    /// the configured margin. The task exits when `shutdown` fires or its
    /// sender is dropped.
    pub fn spawn_auto_refresh(
        self: &Arc<Self>,
        interval: Duration,
        mut shutdown: broadcast::Receiver<()>,
    ) -> JoinHandle<()> {
        let backend = Arc::clone(self);

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            info!(
                "Auto refresh started for {} (every {interval:?})",
                backend.base_url()
            );

            loop {
                tokio::select! {
                    _ = shutdown.recv() => {
                        info!("Auto refresh stopped");
                        break;
                    }
                    _ = ticker.tick() => {
                        match backend.refresh_if_expiring().await {
                            Ok(true) => debug!("Auto refresh renewed the session"),
                            Ok(false) => {}
                            Err(e) => warn!("Auto refresh failed: {e}"),
                        }
                    }
                }
            }
        })
    }
}
