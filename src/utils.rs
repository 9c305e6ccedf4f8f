/// Utility functions for formatting snapshots in log output
use time::{format_description, OffsetDateTime};

use crate::models::Channel;
use crate::store::Snapshot;

/// Format a timestamp for human-readable logging
///
/// Converts an OffsetDateTime to DD.MM.YYYY - HH:MM:SS format
/// Falls back to default string representation if formatting fails.
pub fn format_datetime(dt: &OffsetDateTime) -> String {
    match format_description::parse("[day].[month].[year] - [hour]:[minute]:[second]") {
        Ok(format) => dt.format(&format).unwrap_or_else(|_| dt.to_string()),
        Err(_) => dt.to_string(),
    }
}

/// One line with the latest chunk average of every channel
///
/// Channels without an average yet are shown as `-`.
pub fn format_averages(snapshot: &Snapshot) -> String {
    let parts: Vec<String> = Channel::ALL
        .iter()
        .map(|channel| {
            let value = snapshot
                .average(*channel)
                .map(|avg| format!("{:.2}", avg))
                .unwrap_or_else(|| "-".to_string());
            format!("Avg {}: {}", channel.label(), value)
        })
        .collect();

    format!("Chunk Avgs - {}", parts.join("    "))
}

/// Per-stream summary lines: sample count and newest value
///
/// Streams without samples are skipped.
pub fn format_snapshot_summary(snapshot: &Snapshot) -> Vec<String> {
    snapshot
        .streams()
        .filter_map(|(key, samples)| {
            samples.last().map(|latest| {
                format!(
                    "{} / {}: {} samples, latest {:.2}",
                    key.channel.label(),
                    key.filter.label(),
                    samples.len(),
                    latest
                )
            })
        })
        .collect()
}
