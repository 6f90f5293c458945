// Report kinds. Each one is a thin configuration of the aggregation engine:
// a record type, a grouping key, a duration policy or window width, and a row.

pub mod cpu_load;
pub mod file_change;
pub mod network;
pub mod proc_cpu;
pub mod proc_mem;
pub mod proc_new;

use std::cmp::Ordering;
use std::fmt;
use std::io::BufRead;

use serde::Deserialize;

use crate::aggregation::Degenerate;
use crate::extract::{ExtractStats, Extraction, JsonLineRecord, extract_lines};
use crate::models::{
    CpuLoadRecord, EventRecord, NetworkPacket, ProcCpuRecord, ProcMemRecord, SummaryRow, Table,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportKind {
    Network,
    CpuLoad,
    ProcCpu,
    ProcMem,
    ProcNew,
    FileChange,
}

impl ReportKind {
    pub const ALL: [ReportKind; 6] = [
        ReportKind::Network,
        ReportKind::CpuLoad,
        ReportKind::ProcCpu,
        ReportKind::ProcMem,
        ReportKind::ProcNew,
        ReportKind::FileChange,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ReportKind::Network => "network",
            ReportKind::CpuLoad => "cpu-load",
            ReportKind::ProcCpu => "proc-cpu",
            ReportKind::ProcMem => "proc-mem",
            ReportKind::ProcNew => "proc-new",
            ReportKind::FileChange => "file-change",
        }
    }

    /// What the report summarizes, for operator-facing messages.
    pub fn subject(self) -> &'static str {
        match self {
            ReportKind::Network => "communication",
            ReportKind::CpuLoad => "CPU usage",
            ReportKind::ProcCpu => "program CPU usage",
            ReportKind::ProcMem => "program memory usage",
            ReportKind::ProcNew => "process creation",
            ReportKind::FileChange => "file change",
        }
    }

    pub fn default_output(self) -> &'static str {
        match self {
            ReportKind::Network => "network-summary.csv",
            ReportKind::CpuLoad => "cpu-summary.csv",
            ReportKind::ProcCpu => "proc-cpu-summary.csv",
            ReportKind::ProcMem => "proc-mem-summary.csv",
            ReportKind::ProcNew => "proc-new-summary.csv",
            ReportKind::FileChange => "file-summary.csv",
        }
    }

    /// Decimal places used when the format config does not override them.
    pub fn default_precision(self) -> usize {
        match self {
            ReportKind::Network | ReportKind::ProcCpu => 3,
            _ => 2,
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Rows of one report plus any run-level reason averages are unavailable.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary<R> {
    pub rows: Vec<R>,
    pub degenerate: Option<Degenerate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoDataReason {
    /// Extraction produced no records.
    NoValidRecords,
    /// Records existed but no entity produced a row.
    EmptySummary,
}

impl NoDataReason {
    pub fn describe(&self) -> &'static str {
        match self {
            NoDataReason::NoValidRecords => "no valid records extracted",
            NoDataReason::EmptySummary => "no entity produced a summary row",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Table(Table),
    NoData(NoDataReason),
}

/// Everything one report run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Digest {
    pub kind: ReportKind,
    pub stats: ExtractStats,
    pub degenerate: Option<Degenerate>,
    pub outcome: Outcome,
}

impl Digest {
    pub fn table(&self) -> Option<&Table> {
        match &self.outcome {
            Outcome::Table(t) => Some(t),
            Outcome::NoData(_) => None,
        }
    }
}

/// Extracts `reader` as `kind`'s record type and aggregates it. Only a read
/// failure is an error; bad lines and empty input end up in the `Digest`.
pub fn digest<R: BufRead>(kind: ReportKind, reader: R) -> std::io::Result<Digest> {
    match kind {
        ReportKind::Network => run::<NetworkPacket, _, _>(kind, reader, network::summarize),
        ReportKind::CpuLoad => run::<CpuLoadRecord, _, _>(kind, reader, cpu_load::summarize),
        ReportKind::ProcCpu => run::<ProcCpuRecord, _, _>(kind, reader, proc_cpu::summarize),
        ReportKind::ProcMem => run::<ProcMemRecord, _, _>(kind, reader, proc_mem::summarize),
        ReportKind::ProcNew => run::<EventRecord, _, _>(kind, reader, proc_new::summarize),
        ReportKind::FileChange => {
            run::<EventRecord, _, _>(kind, reader, file_change::summarize)
        }
    }
}

fn run<T, Row, R>(
    kind: ReportKind,
    reader: R,
    summarize: fn(&[T]) -> Summary<Row>,
) -> std::io::Result<Digest>
where
    T: JsonLineRecord,
    Row: SummaryRow,
    R: BufRead,
{
    let Extraction { records, stats } = extract_lines::<T, R>(reader)?;
    if records.is_empty() {
        return Ok(Digest {
            kind,
            stats,
            degenerate: None,
            outcome: Outcome::NoData(NoDataReason::NoValidRecords),
        });
    }

    let summary = summarize(&records);
    let outcome = if summary.rows.is_empty() {
        Outcome::NoData(NoDataReason::EmptySummary)
    } else {
        Outcome::Table(Table::from_rows(&summary.rows))
    };
    Ok(Digest {
        kind,
        stats,
        degenerate: summary.degenerate,
        outcome,
    })
}

/// Stable descending sort; rows without a value go last.
pub(crate) fn sort_descending<R>(rows: &mut [R], key: impl Fn(&R) -> Option<f64>) {
    rows.sort_by(|a, b| match (key(a), key(b)) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}
