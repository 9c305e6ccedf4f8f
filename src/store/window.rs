/// Fixed-capacity sample windows for every stream, plus per-channel averages
use std::collections::VecDeque;

use crate::models::{Channel, FilterKind, StreamKey};
use crate::store::snapshot::Snapshot;

/// FIFO buffer of the most recent samples of one stream
#[derive(Debug, Clone)]
pub struct SlidingWindow {
    samples: VecDeque<f64>,
    capacity: usize,
}

impl SlidingWindow {
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a sample, evicting the oldest one when full
    ///
    /// The first sample of an empty window becomes position 0.
    pub fn push(&mut self, value: f64) {
        if self.capacity == 0 {
            return;
        }
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(value);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.samples.iter().copied().collect()
    }
}

/// All windows keyed by `StreamKey`, owned by the ingestion side
#[derive(Debug, Clone)]
pub struct SlidingWindowStore {
    windows: [[SlidingWindow; FilterKind::COUNT]; Channel::COUNT],
    averages: [Option<f64>; Channel::COUNT],
    capacity: usize,
}

impl SlidingWindowStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            windows: std::array::from_fn(|_| {
                std::array::from_fn(|_| SlidingWindow::new(capacity))
            }),
            averages: [None; Channel::COUNT],
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn append(&mut self, key: StreamKey, value: f64) {
        self.windows[key.channel.index()][key.filter.index()].push(value);
    }

    /// Replace the latest chunk average of a channel
    pub fn set_average(&mut self, channel: Channel, value: f64) {
        self.averages[channel.index()] = Some(value);
    }

    pub fn window(&self, key: StreamKey) -> Vec<f64> {
        self.windows[key.channel.index()][key.filter.index()].to_vec()
    }

    pub fn average(&self, channel: Channel) -> Option<f64> {
        self.averages[channel.index()]
    }

    /// Deep copy of every window and average slot
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(
            std::array::from_fn(|c| std::array::from_fn(|f| self.windows[c][f].to_vec())),
            self.averages,
        )
    }
}
