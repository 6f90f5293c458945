use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

use crate::emit::FormatConfig;
use crate::runner::ReportJob;

pub const DEFAULT_CONFIG_FILE: &str = "digest.toml";

/// Highest accepted `format.precision`.
pub const MAX_PRECISION: usize = 9;

/// Batch configuration: shared formatting plus the reports to produce.
///
/// ```toml
/// [format]
/// precision = 2
/// missing = "NA"
///
/// [[report]]
/// kind = "cpu-load"
/// input = "logs/cpu-load-data.txt"
/// output = "out/cpu-summary.csv"
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    #[serde(default)]
    pub format: FormatConfig,
    #[serde(rename = "report", default)]
    pub reports: Vec<ReportJob>,
}

impl AppConfig {
    /// Reads `path`, else `$CONFIG_FILE`, else `digest.toml`.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => PathBuf::from(
                std::env::var("CONFIG_FILE").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.into()),
            ),
        };
        let s = std::fs::read_to_string(&path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::load_from_str(&s).with_context(|| format!("loading config {}", path.display()))
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            !self.reports.is_empty(),
            "at least one [[report]] entry is required"
        );
        if let Some(precision) = self.format.precision {
            anyhow::ensure!(
                precision <= MAX_PRECISION,
                "format.precision must be at most {}, got {}",
                MAX_PRECISION,
                precision
            );
        }

        let mut outputs = HashSet::new();
        for (i, job) in self.reports.iter().enumerate() {
            anyhow::ensure!(
                !job.input.as_os_str().is_empty(),
                "report[{}].input must be non-empty",
                i
            );
            if let Some(output) = &job.output {
                anyhow::ensure!(
                    !output.as_os_str().is_empty(),
                    "report[{}].output must be non-empty",
                    i
                );
            }
            let output = job.output_path();
            anyhow::ensure!(
                outputs.insert(output.clone()),
                "report[{}].output {} is already written by another report",
                i,
                output.display()
            );
        }
        Ok(())
    }
}
