// Program memory: time-weighted VmSize (held until the next snapshot of any
// program) plus the largest VmPeak and VmHWM seen, all in MiB.

use crate::aggregation::{DurationPolicy, Sample, Timeline, annotate, max_of, time_weighted};
use crate::models::{Cell, ProcMemRecord, SummaryRow};

use super::{Summary, sort_descending};

const BYTES_PER_MIB: f64 = 1024.0 * 1024.0;

fn to_mib(bytes: f64) -> f64 {
    bytes / BYTES_PER_MIB
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProgramMemSummary {
    pub name: String,
    pub avg_vm_size_mib: Option<f64>,
    pub max_vm_peak_mib: f64,
    pub max_vm_hwm_mib: f64,
    pub data_points: usize,
    /// Seconds covered by this program's readings.
    pub duration_secs: i64,
}

impl SummaryRow for ProgramMemSummary {
    const HEADER: &'static [&'static str] = &[
        "Name",
        "TimeWeightedAvgVmSizeMiB",
        "MaxVmPeakMiB",
        "MaxVmHwmMiB",
        "DataPoints",
        "PeakDuration",
    ];

    fn cells(&self) -> Vec<Cell> {
        vec![
            self.name.as_str().into(),
            self.avg_vm_size_mib.into(),
            self.max_vm_peak_mib.into(),
            self.max_vm_hwm_mib.into(),
            self.data_points.into(),
            self.duration_secs.into(),
        ]
    }
}

/// One row per program, largest average VmSize first.
pub fn summarize(records: &[ProcMemRecord]) -> Summary<ProgramMemSummary> {
    let timeline = Timeline::build(
        records
            .iter()
            .map(|r| Sample::new(r.name.clone(), r.timestamp, r)),
    );
    let clock = timeline.clock();
    let mut rows: Vec<ProgramMemSummary> = timeline
        .groups()
        .filter_map(|(name, group)| {
            let annotated = annotate(group, DurationPolicy::NextGlobalTimestamp, clock);
            let stats = time_weighted(&annotated, |r| r.vm_size as f64)?;
            let peak = max_of(&annotated, |r| r.vm_peak as f64)?;
            let hwm = max_of(&annotated, |r| r.vm_hwm as f64)?;
            Some(ProgramMemSummary {
                name: name.clone(),
                avg_vm_size_mib: stats.average.map(to_mib),
                max_vm_peak_mib: to_mib(peak),
                max_vm_hwm_mib: to_mib(hwm),
                data_points: stats.samples,
                duration_secs: stats.total_duration,
            })
        })
        .collect();
    sort_descending(&mut rows, |r| r.avg_vm_size_mib);
    Summary {
        rows,
        degenerate: clock.degeneracy(),
    }
}
