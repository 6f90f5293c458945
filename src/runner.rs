// Report runner: read the input, aggregate on the blocking pool, write the CSV.
// Batch mode runs each job as its own task; jobs share nothing.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use crate::emit::{self, FormatConfig};
use crate::error::ReportError;
use crate::extract::ExtractStats;
use crate::models::Table;
use crate::reports::{self, NoDataReason, Outcome, ReportKind};

/// One report to produce: which kind, from which log, to which CSV.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportJob {
    pub kind: ReportKind,
    pub input: PathBuf,
    #[serde(default)]
    pub output: Option<PathBuf>,
}

impl ReportJob {
    pub fn new(kind: ReportKind, input: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            input: input.into(),
            output: None,
        }
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }

    /// Explicit output, or the report's default file name.
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(self.kind.default_output()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    Written {
        path: PathBuf,
        table: Table,
        stats: ExtractStats,
    },
    /// Nothing to report; no file was written.
    NoData {
        reason: NoDataReason,
        stats: ExtractStats,
    },
}

impl RunOutcome {
    pub fn stats(&self) -> &ExtractStats {
        match self {
            RunOutcome::Written { stats, .. } | RunOutcome::NoData { stats, .. } => stats,
        }
    }
}

#[instrument(skip(job, format), fields(kind = %job.kind, input = %job.input.display()))]
pub async fn run_job(job: &ReportJob, format: &FormatConfig) -> Result<RunOutcome, ReportError> {
    let read_error = |source| ReportError::Read {
        path: job.input.clone(),
        source,
    };
    let bytes = tokio::fs::read(&job.input).await.map_err(read_error)?;

    let kind = job.kind;
    let digest = tokio::task::spawn_blocking(move || reports::digest(kind, bytes.as_slice()))
        .await
        .map_err(|source| ReportError::Task {
            path: job.input.clone(),
            source,
        })?
        .map_err(read_error)?;

    log_stats(&digest.stats);
    if let Some(degenerate) = digest.degenerate {
        warn!(
            reason = degenerate.describe(),
            "time-weighted averages unavailable"
        );
    }

    let table = match digest.outcome {
        Outcome::Table(table) => table,
        Outcome::NoData(reason) => {
            warn!(reason = reason.describe(), "no usable data; no summary written");
            return Ok(RunOutcome::NoData {
                reason,
                stats: digest.stats,
            });
        }
    };

    let output = job.output_path();
    let csv = emit::render_csv(&table, format.precision_for(kind), &format.missing).map_err(
        |source| ReportError::Encode {
            path: output.clone(),
            source,
        },
    )?;
    write_output(&output, &csv)
        .await
        .map_err(|source| ReportError::Write {
            path: output.clone(),
            source,
        })?;
    info!(rows = table.len(), output = %output.display(), "summary written");

    Ok(RunOutcome::Written {
        path: output,
        table,
        stats: digest.stats,
    })
}

/// Runs every job concurrently. Results come back in job order.
pub async fn run_batch(
    jobs: &[ReportJob],
    format: &FormatConfig,
) -> Vec<Result<RunOutcome, ReportError>> {
    let handles: Vec<_> = jobs
        .iter()
        .cloned()
        .map(|job| {
            let format = format.clone();
            tokio::spawn(async move { run_job(&job, &format).await })
        })
        .collect();

    let mut results = Vec::with_capacity(handles.len());
    for (job, handle) in jobs.iter().zip(handles) {
        let result = handle.await.unwrap_or_else(|source| {
            Err(ReportError::Task {
                path: job.input.clone(),
                source,
            })
        });
        results.push(result);
    }
    results
}

/// Creates missing parent directories, then writes `bytes` in one call.
async fn write_output(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, bytes).await
}

fn log_stats(stats: &ExtractStats) {
    debug!(
        lines = stats.lines,
        malformed = stats.malformed,
        incomplete = stats.incomplete,
        "extraction complete"
    );
    if stats.skipped_lines() > 0 {
        info!(
            skipped = stats.skipped_lines(),
            malformed = stats.malformed,
            incomplete = stats.incomplete,
            "lines skipped"
        );
    }
    if stats.dropped_items > 0 {
        info!(dropped = stats.dropped_items, "packets dropped for missing fields");
    }
}
