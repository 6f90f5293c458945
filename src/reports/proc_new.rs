// Process creation: new processes per device, counted in 30-second windows.

use crate::aggregation::{Window, count_stats, group_by_key};
use crate::models::{Cell, EventRecord, SummaryRow};

use super::Summary;

#[derive(Debug, Clone, PartialEq)]
pub struct ProcCreationSummary {
    pub dev_id: String,
    pub total_new_procs: usize,
    pub avg_per_30s: f64,
    pub peak_per_30s: usize,
    /// Seconds between the device's first and last creation event.
    pub total_time_secs: i64,
}

impl SummaryRow for ProcCreationSummary {
    const HEADER: &'static [&'static str] = &[
        "DevID",
        "TotalNewProcs",
        "AvgNewProcsPer30Sec",
        "PeakNewProcsPer30Sec",
        "TotalTime",
    ];

    fn cells(&self) -> Vec<Cell> {
        vec![
            self.dev_id.as_str().into(),
            self.total_new_procs.into(),
            self.avg_per_30s.into(),
            self.peak_per_30s.into(),
            self.total_time_secs.into(),
        ]
    }
}

/// One row per device, in device order.
pub fn summarize(events: &[EventRecord]) -> Summary<ProcCreationSummary> {
    let rows = group_by_key(events, |e| e.dev_id.clone())
        .into_iter()
        .map(|(dev_id, group)| {
            let counts = count_stats(group.iter().map(|e| e.timestamp), Window::HALF_MINUTE);
            ProcCreationSummary {
                dev_id,
                total_new_procs: counts.total,
                avg_per_30s: counts.average,
                peak_per_30s: counts.peak,
                total_time_secs: counts.span,
            }
        })
        .collect();
    Summary {
        rows,
        degenerate: None,
    }
}
