/// Immutable point-in-time copy of the store
use crate::models::{Channel, FilterKind, StreamKey};

#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    windows: [[Vec<f64>; FilterKind::COUNT]; Channel::COUNT],
    averages: [Option<f64>; Channel::COUNT],
}

impl Snapshot {
    pub fn new(
        windows: [[Vec<f64>; FilterKind::COUNT]; Channel::COUNT],
        averages: [Option<f64>; Channel::COUNT],
    ) -> Self {
        Self { windows, averages }
    }

    /// Samples of one stream, oldest first; x positions are the indices
    pub fn window(&self, key: StreamKey) -> &[f64] {
        &self.windows[key.channel.index()][key.filter.index()]
    }

    pub fn average(&self, channel: Channel) -> Option<f64> {
        self.averages[channel.index()]
    }

    /// Every stream with its samples, channel-major
    pub fn streams(&self) -> impl Iterator<Item = (StreamKey, &[f64])> + '_ {
        StreamKey::all().map(move |key| (key, self.window(key)))
    }

    pub fn sample_count(&self) -> usize {
        self.streams().map(|(_, samples)| samples.len()).sum()
    }
}
