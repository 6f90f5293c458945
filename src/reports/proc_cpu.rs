// Program CPU: time-weighted average where each reading holds until the next
// snapshot of any program.

use crate::aggregation::{DurationPolicy, Sample, Timeline, annotate, time_weighted};
use crate::models::{Cell, ProcCpuRecord, SummaryRow};

use super::{Summary, sort_descending};

#[derive(Debug, Clone, PartialEq)]
pub struct ProgramCpuSummary {
    pub name: String,
    /// Seconds covered by this program's readings.
    pub duration_secs: i64,
    pub avg_cpu_percent: Option<f64>,
    pub max_cpu_percent: f64,
    pub data_points: usize,
}

impl SummaryRow for ProgramCpuSummary {
    const HEADER: &'static [&'static str] = &[
        "Name",
        "Duration",
        "AvgCpuPercent",
        "MaxCpuUsage",
        "DataPoints",
    ];

    fn cells(&self) -> Vec<Cell> {
        vec![
            self.name.as_str().into(),
            self.duration_secs.into(),
            self.avg_cpu_percent.into(),
            self.max_cpu_percent.into(),
            self.data_points.into(),
        ]
    }
}

/// One row per program, highest average first. With fewer than two distinct
/// snapshot times every average is unavailable and only maxima are meaningful.
pub fn summarize(records: &[ProcCpuRecord]) -> Summary<ProgramCpuSummary> {
    let timeline = Timeline::build(
        records
            .iter()
            .map(|r| Sample::new(r.name.clone(), r.timestamp, r.cpu_percent)),
    );
    let clock = timeline.clock();
    let mut rows: Vec<ProgramCpuSummary> = timeline
        .groups()
        .filter_map(|(name, group)| {
            let annotated = annotate(group, DurationPolicy::NextGlobalTimestamp, clock);
            let stats = time_weighted(&annotated, |cpu| *cpu)?;
            Some(ProgramCpuSummary {
                name: name.clone(),
                duration_secs: stats.total_duration,
                avg_cpu_percent: stats.average,
                max_cpu_percent: stats.max,
                data_points: stats.samples,
            })
        })
        .collect();
    sort_descending(&mut rows, |r| r.avg_cpu_percent);
    Summary {
        rows,
        degenerate: clock.degeneracy(),
    }
}
