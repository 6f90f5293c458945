// Run-level failures. Line-level problems never get here; they are counted
// in ExtractStats.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to encode CSV for {}: {source}", .path.display())]
    Encode { path: PathBuf, source: csv::Error },
    #[error("aggregation task for {} failed: {source}", .path.display())]
    Task {
        path: PathBuf,
        source: tokio::task::JoinError,
    },
}

impl ReportError {
    pub fn path(&self) -> &std::path::Path {
        match self {
            ReportError::Read { path, .. }
            | ReportError::Write { path, .. }
            | ReportError::Encode { path, .. }
            | ReportError::Task { path, .. } => path,
        }
    }
}
