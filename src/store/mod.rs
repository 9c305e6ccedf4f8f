pub mod queue;
pub mod snapshot;
pub mod window;

pub use queue::{snapshot_queue, SnapshotPublisher, SnapshotReceiver};
pub use snapshot::Snapshot;
pub use window::SlidingWindowStore;
