/// One-way snapshot hand-off between ingestion and consumption
///
/// The queue is unbounded, so publishing never blocks and never drops a
/// snapshot while the consumer is alive. Snapshots arrive in publish order.
use tokio::sync::mpsc;

use crate::store::snapshot::Snapshot;

/// Create a connected publisher/receiver pair
pub fn snapshot_queue() -> (SnapshotPublisher, SnapshotReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (SnapshotPublisher { tx }, SnapshotReceiver { rx })
}

#[derive(Debug)]
pub struct SnapshotPublisher {
    tx: mpsc::UnboundedSender<Snapshot>,
}

impl SnapshotPublisher {
    /// Enqueue one snapshot without blocking
    ///
    /// Returns false when the receiver has been dropped; the snapshot is
    /// abandoned in that case.
    pub fn publish(&self, snapshot: Snapshot) -> bool {
        self.tx.send(snapshot).is_ok()
    }
}

#[derive(Debug)]
pub struct SnapshotReceiver {
    rx: mpsc::UnboundedReceiver<Snapshot>,
}

impl SnapshotReceiver {
    /// Non-blocking read; `None` when nothing is queued
    pub fn try_take(&mut self) -> Option<Snapshot> {
        self.rx.try_recv().ok()
    }

    /// Take everything queued and keep the newest
    ///
    /// # Returns
    /// The newest snapshot and how many older ones were skipped, or `None` when
    /// the queue was empty
    pub fn drain_latest(&mut self) -> Option<(Snapshot, usize)> {
        let mut latest = self.try_take()?;
        let mut skipped = 0;
        while let Some(next) = self.try_take() {
            latest = next;
            skipped += 1;
        }
        Some((latest, skipped))
    }

    /// True once the publisher is gone and nothing is left to read
    pub fn is_finished(&self) -> bool {
        self.rx.is_closed() && self.rx.is_empty()
    }
}
