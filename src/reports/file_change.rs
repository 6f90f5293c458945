// File changes: per-device change counts in 1-minute windows. Records at the
// log's earliest timestamp are the initial snapshot and are not changes.

use crate::aggregation::{CountStats, Window, count_stats, group_by_key};
use crate::models::{Cell, EventRecord, SummaryRow};

use super::Summary;

#[derive(Debug, Clone, PartialEq)]
pub struct FileChangeSummary {
    pub dev_id: String,
    pub total_files_changed: usize,
    pub avg_per_minute: f64,
    pub peak_per_minute: usize,
    /// Change span in minutes, floored to 1; 0 when the device had no changes.
    pub span_minutes: f64,
}

impl FileChangeSummary {
    fn from_counts(dev_id: String, counts: CountStats) -> Self {
        Self {
            dev_id,
            total_files_changed: counts.total,
            avg_per_minute: counts.average,
            peak_per_minute: counts.peak,
            span_minutes: counts.windows,
        }
    }
}

impl SummaryRow for FileChangeSummary {
    const HEADER: &'static [&'static str] = &[
        "DevID",
        "TotalFilesChanged",
        "AvgFilesChangedPerMin",
        "PeakFilesChangedPerMin",
        "ChangeTimeSpanMinutes",
    ];

    fn cells(&self) -> Vec<Cell> {
        vec![
            self.dev_id.as_str().into(),
            self.total_files_changed.into(),
            self.avg_per_minute.into(),
            self.peak_per_minute.into(),
            self.span_minutes.into(),
        ]
    }
}

/// Earliest timestamp in the log; records there form the baseline.
pub fn baseline(events: &[EventRecord]) -> Option<i64> {
    events.iter().map(|e| e.timestamp).min()
}

/// One row per device seen anywhere in the log, in device order. A device
/// with nothing after the baseline gets an all-zero row.
pub fn summarize(events: &[EventRecord]) -> Summary<FileChangeSummary> {
    let Some(baseline) = baseline(events) else {
        return Summary {
            rows: Vec::new(),
            degenerate: None,
        };
    };

    let rows = group_by_key(events, |e| e.dev_id.clone())
        .into_iter()
        .map(|(dev_id, group)| {
            let counts = count_stats(
                group
                    .iter()
                    .map(|e| e.timestamp)
                    .filter(|&t| t > baseline),
                Window::MINUTE,
            );
            FileChangeSummary::from_counts(dev_id, counts)
        })
        .collect();
    Summary {
        rows,
        degenerate: None,
    }
}
