//! Status polling for items that are still being analyzed.
//!
//! A watch is a spawned task that re-fetches one item until the backend
//! reports a terminal status. Fetches are strictly sequential: the next tick
//! is not scheduled until the previous fetch resolves, so there is never
//! more than one in-flight request per item. Fetch errors are surfaced to
//! the consumer as snapshots and retried on the next tick. There is no
//! attempt cap and no deadline; cancellation and terminal statuses are the
//! only exits.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::api::ItemsApi;
use crate::app::{ReadstashError, Result};
use crate::domain::Item;
use crate::session::SessionContext;

#[derive(Debug, Clone, Copy)]
pub struct PollConfig {
    /// Pause between a resolved fetch and the next one.
    pub interval: Duration,
    /// How long the completed checklist stays visible before the preview
    /// screen takes over.
    pub ready_delay: Duration,
    pub request_timeout: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(2),
            ready_delay: Duration::from_millis(1200),
            request_timeout: Duration::from_secs(10),
        }
    }
}

/// One observation of the watched item, successful or not.
#[derive(Debug)]
pub struct StatusSnapshot {
    /// 1-based fetch counter.
    pub attempt: u32,
    pub outcome: Result<Item>,
}

/// Handle to a running watch. Dropping it also ends the watch: the task
/// notices the closed channel on its next send and exits.
pub struct StatusWatch {
    snapshots: mpsc::Receiver<StatusSnapshot>,
    cancel_tx: broadcast::Sender<()>,
    join: JoinHandle<()>,
}

impl StatusWatch {
    pub async fn recv(&mut self) -> Option<StatusSnapshot> {
        self.snapshots.recv().await
    }

    /// Non-blocking drain for UI ticks.
    pub fn try_recv(&mut self) -> Option<StatusSnapshot> {
        self.snapshots.try_recv().ok()
    }

    /// Request cancellation without waiting for the task to finish. An
    /// in-flight request is not aborted; its result is simply ignored.
    pub fn cancel(&self) {
        let _ = self.cancel_tx.send(());
    }

    /// Cancel and wait for the task to wind down.
    pub async fn stop(self) {
        let _ = self.cancel_tx.send(());
        if let Err(err) = self.join.await {
            warn!(error = %err, "status watch task failed");
        }
    }
}

/// Start polling `item_id` every `config.interval` until a terminal status.
///
/// Each successful fetch also refreshes the session's cached status for the
/// item, so screens that resume from the session see the latest state.
pub fn spawn_status_watch(
    api: Arc<dyn ItemsApi>,
    item_id: String,
    session: SessionContext,
    config: PollConfig,
) -> StatusWatch {
    let (snapshot_tx, snapshots) = mpsc::channel(8);
    let (cancel_tx, mut cancel_rx) = broadcast::channel(1);

    let join = tokio::spawn(async move {
        let mut attempt = 0u32;
        loop {
            attempt += 1;
            let outcome = api.get_item(&item_id).await;

            let terminal = match &outcome {
                Ok(item) => {
                    session.update_status(&item_id, item.status);
                    item.status.is_terminal()
                }
                Err(err) => {
                    warn!(item = %item_id, error = %err, "status fetch failed, will retry");
                    false
                }
            };

            if snapshot_tx
                .send(StatusSnapshot { attempt, outcome })
                .await
                .is_err()
            {
                debug!(item = %item_id, "status watch consumer dropped");
                break;
            }

            if terminal {
                info!(item = %item_id, attempts = attempt, "item reached terminal status");
                break;
            }

            tokio::select! {
                _ = cancel_rx.recv() => {
                    info!(item = %item_id, "status watch cancelled");
                    break;
                }
                _ = tokio::time::sleep(config.interval) => {}
            }
        }
    });

    StatusWatch {
        snapshots,
        cancel_tx,
        join,
    }
}

/// Drain a watch until the item lands in a terminal status.
pub async fn await_terminal(mut watch: StatusWatch) -> Result<Item> {
    while let Some(snapshot) = watch.recv().await {
        if let Ok(item) = snapshot.outcome {
            if item.status.is_terminal() {
                return Ok(item);
            }
        }
    }
    Err(ReadstashError::Other(
        "status watch ended before a terminal state".to_string(),
    ))
}
