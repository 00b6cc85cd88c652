use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::interval;
use tokio::time::MissedTickBehavior;
use tracing::debug;
use tracing::info;
use tracing::warn;

use super::SyncEngine;
use crate::remote::ChangeNotification;
use crate::Error;

/// The background long-poll loop.
///
/// One watcher per engine. Each tick ships the full tracked
/// namespace/sequence set to the remote source; every reported change is
/// folded into cache and state *before* its notification is published, so
/// a subscriber reacting to a notification always observes the new data.
pub(crate) struct Watcher {
    engine: SyncEngine,
    watch_tx: mpsc::Sender<ChangeNotification>,
    err_tx: mpsc::Sender<Error>,
    stop_rx: mpsc::Receiver<()>,
}

impl Watcher {
    pub(crate) fn new(
        engine: SyncEngine,
        watch_tx: mpsc::Sender<ChangeNotification>,
        err_tx: mpsc::Sender<Error>,
        stop_rx: mpsc::Receiver<()>,
    ) -> Self {
        Watcher {
            engine,
            watch_tx,
            err_tx,
            stop_rx,
        }
    }

    pub(crate) async fn run(mut self, period: Duration) {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // interval fires immediately; the first poll should wait one period
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if !self.poll_once().await {
                        return;
                    }
                }
                _ = self.stop_rx.recv() => {
                    info!("stop watching");
                    return;
                }
            }
        }
    }

    /// One poll tick. Returns `false` once the subscriber is gone and the
    /// loop has nobody left to feed.
    async fn poll_once(&mut self) -> bool {
        let seen = self.engine.tracked();

        match self.engine.remote().fetch_notifications(&seen).await {
            // an empty answer is the common case: nothing changed
            Ok(changes) => {
                for change in changes {
                    self.engine
                        .record_sequence(&change.namespace, change.sequence);

                    // cache and state are current before anyone hears of it
                    if let Err(e) = self.engine.sync_namespace(&change.namespace).await {
                        warn!(namespace = %change.namespace, error = %e,
                            "refresh after notification failed");
                    }

                    if self.watch_tx.send(change).await.is_err() {
                        warn!("change subscriber dropped; stopping long poll");
                        return false;
                    }
                }
            }
            Err(e) => {
                warn!(error = %e, "failed to fetch notifications");
                if self.err_tx.send(e).await.is_err() {
                    debug!("error subscriber dropped");
                }
            }
        }

        true
    }
}
