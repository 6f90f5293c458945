use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use telemetry_digest::config::{AppConfig, MAX_PRECISION};
use telemetry_digest::emit::{self, FormatConfig};
use telemetry_digest::reports::ReportKind;
use telemetry_digest::runner::{self, ReportJob, RunOutcome};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

#[derive(Parser)]
#[command(name = "telemetry-digest", version)]
#[command(about = "Per-entity time-weighted and windowed summaries of endpoint telemetry logs")]
struct Cli {
    /// Show per-line diagnostics (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Traffic per IP pair: packets, bytes, average and peak Mbps over 1-second windows
    Network(ReportArgs),
    /// Device CPU load: time-weighted average (until the device's next reading) and maximum
    CpuLoad(ReportArgs),
    /// Program CPU: time-weighted average across synchronized snapshots, and maximum
    ProcCpu(ReportArgs),
    /// Program memory: time-weighted VmSize, maximum VmPeak and VmHWM, in MiB
    ProcMem(ReportArgs),
    /// New processes per device: total, average and peak per 30 seconds
    ProcNew(ReportArgs),
    /// File changes per device after the baseline snapshot: total, average and peak per minute
    FileChange(ReportArgs),
    /// Run every [[report]] listed in a TOML config file
    Batch {
        /// Config path (default: $CONFIG_FILE, then digest.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[derive(Args)]
struct ReportArgs {
    /// Line-delimited JSON log written by the monitoring agent
    input: PathBuf,

    /// CSV destination (default: <report>-summary.csv)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Decimal places for fractional columns (default: 3 for network and proc-cpu, else 2)
    #[arg(long)]
    precision: Option<usize>,

    /// Text written in place of an unavailable average
    #[arg(long, default_value = "")]
    missing: String,

    /// Also print the summary table to stdout
    #[arg(long)]
    show: bool,
}

impl ReportArgs {
    fn into_job(self, kind: ReportKind) -> Result<(ReportJob, FormatConfig)> {
        if let Some(precision) = self.precision {
            anyhow::ensure!(
                precision <= MAX_PRECISION,
                "--precision must be at most {}, got {}",
                MAX_PRECISION,
                precision
            );
        }
        let job = ReportJob {
            kind,
            input: self.input,
            output: self.output,
        };
        let format = FormatConfig {
            precision: self.precision,
            missing: self.missing,
            show: self.show,
        };
        Ok((job, format))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let (kind, args) = match cli.command {
        Command::Batch { config } => return run_batch(config.as_deref()).await,
        Command::Network(args) => (ReportKind::Network, args),
        Command::CpuLoad(args) => (ReportKind::CpuLoad, args),
        Command::ProcCpu(args) => (ReportKind::ProcCpu, args),
        Command::ProcMem(args) => (ReportKind::ProcMem, args),
        Command::ProcNew(args) => (ReportKind::ProcNew, args),
        Command::FileChange(args) => (ReportKind::FileChange, args),
    };

    let (job, format) = args.into_job(kind)?;
    let outcome = runner::run_job(&job, &format).await.inspect_err(|e| {
        tracing::error!(kind = %job.kind, error = %e, "report failed");
    })?;
    present(&job, &format, outcome);
    Ok(())
}

async fn run_batch(path: Option<&Path>) -> Result<()> {
    let config = AppConfig::load(path)?;
    tracing::info!(reports = config.reports.len(), "starting batch");

    let results = runner::run_batch(&config.reports, &config.format).await;
    let mut failed = 0usize;
    for (job, result) in config.reports.iter().zip(results) {
        match result {
            Ok(outcome) => present(job, &config.format, outcome),
            Err(e) => {
                tracing::error!(kind = %job.kind, error = %e, "report failed");
                failed += 1;
            }
        }
    }
    anyhow::ensure!(
        failed == 0,
        "{} of {} reports failed",
        failed,
        config.reports.len()
    );
    Ok(())
}

fn present(job: &ReportJob, format: &FormatConfig, outcome: RunOutcome) {
    match outcome {
        RunOutcome::Written { table, .. } => {
            if format.show {
                print!(
                    "{}",
                    emit::render_text(&table, format.precision_for(job.kind), &format.missing)
                );
            }
        }
        RunOutcome::NoData { .. } => {
            println!(
                "No {} summary statistics generated for {}.",
                job.kind.subject(),
                job.input.display()
            );
        }
    }
}
