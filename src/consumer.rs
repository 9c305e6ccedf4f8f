/// Periodic snapshot consumer
use log::{debug, info};
use time::OffsetDateTime;
use tokio::time::{interval, Duration, MissedTickBehavior};

use crate::store::{Snapshot, SnapshotReceiver};
use crate::utils::{format_averages, format_datetime, format_snapshot_summary};

/// Poll the snapshot queue on a fixed cadence and log what arrives
///
/// Only the newest snapshot of each tick is reported. An empty queue just
/// waits for the next tick. Returns once the publishing side is gone.
pub async fn run_consumer(mut receiver: SnapshotReceiver, poll_interval: Duration) {
    let mut ticker = interval(poll_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        if let Some((snapshot, skipped)) = receiver.drain_latest() {
            if skipped > 0 {
                debug!("Skipped {} older snapshots", skipped);
            }
            report_snapshot(&snapshot);
        } else if receiver.is_finished() {
            info!("Snapshot queue closed, consumer stopping");
            break;
        }
    }
}

fn report_snapshot(snapshot: &Snapshot) {
    info!(
        "Snapshot at {} with {} samples",
        format_datetime(&OffsetDateTime::now_utc()),
        snapshot.sample_count()
    );
    for line in format_snapshot_summary(snapshot) {
        info!("  {}", line);
    }
    info!("  {}", format_averages(snapshot));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{snapshot_queue, SlidingWindowStore};

    #[tokio::test]
    async fn stops_after_publisher_dropped() {
        let (publisher, receiver) = snapshot_queue();
        publisher.publish(SlidingWindowStore::new(4).snapshot());
        publisher.publish(SlidingWindowStore::new(4).snapshot());
        drop(publisher);

        tokio::time::timeout(
            Duration::from_secs(5),
            run_consumer(receiver, Duration::from_millis(1)),
        )
        .await
        .expect("consumer should stop once the queue is closed");
    }
}
