// Device CPU load: time-weighted average where each reading holds until the
// device's next reading.

use crate::aggregation::{DurationPolicy, Sample, Timeline, annotate, time_weighted};
use crate::models::{Cell, CpuLoadRecord, SummaryRow};

use super::Summary;

#[derive(Debug, Clone, PartialEq)]
pub struct DeviceLoadSummary {
    pub dev_id: String,
    pub avg_cpu_usage: Option<f64>,
    pub max_cpu_usage: f64,
    pub data_points: usize,
    pub total_duration_secs: i64,
}

impl SummaryRow for DeviceLoadSummary {
    const HEADER: &'static [&'static str] = &[
        "DevID",
        "AvgCpuUsage",
        "MaxCpuUsage",
        "DataPoints",
        "TotalDurationSeconds",
    ];

    fn cells(&self) -> Vec<Cell> {
        vec![
            self.dev_id.as_str().into(),
            self.avg_cpu_usage.into(),
            self.max_cpu_usage.into(),
            self.data_points.into(),
            self.total_duration_secs.into(),
        ]
    }
}

/// One row per device, in device order. A device with a single reading has
/// no covered time, so its average is unavailable.
pub fn summarize(records: &[CpuLoadRecord]) -> Summary<DeviceLoadSummary> {
    let timeline = Timeline::build(
        records
            .iter()
            .map(|r| Sample::new(r.dev_id.clone(), r.timestamp, r.load)),
    );
    let rows = timeline
        .groups()
        .filter_map(|(dev_id, group)| {
            let annotated = annotate(group, DurationPolicy::NextSample, timeline.clock());
            let stats = time_weighted(&annotated, |load| *load)?;
            Some(DeviceLoadSummary {
                dev_id: dev_id.clone(),
                avg_cpu_usage: stats.average,
                max_cpu_usage: stats.max,
                data_points: stats.samples,
                total_duration_secs: stats.total_duration,
            })
        })
        .collect();
    Summary {
        rows,
        degenerate: None,
    }
}
