// Record extractor: line-delimited JSON → typed records.
// Bad lines are tallied and skipped; only a read failure stops extraction.

mod wire;

use std::io::BufRead;

use tracing::debug;

/// Why a single line was rejected.
#[derive(Debug, thiserror::Error)]
pub enum LineError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("missing required field {0}")]
    Missing(&'static str),
    #[error("field {field} is not numeric: {value}")]
    NotNumeric { field: &'static str, value: String },
}

/// Records decoded from one line, plus items inside it that were dropped
/// (packets without addresses, for instance) while the line itself was valid.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded<T> {
    pub records: Vec<T>,
    pub dropped: usize,
}

impl<T> Decoded<T> {
    pub fn one(record: T) -> Self {
        Self {
            records: vec![record],
            dropped: 0,
        }
    }
}

/// A record type that can be decoded from one JSON line.
pub trait JsonLineRecord: Sized {
    fn decode_line(line: &str) -> Result<Decoded<Self>, LineError>;
}

/// Tally of what extraction saw.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractStats {
    /// Non-blank lines read.
    pub lines: usize,
    /// Undecodable JSON, wrong types, non-numeric values, invalid UTF-8.
    pub malformed: usize,
    /// Decodable lines missing a required field.
    pub incomplete: usize,
    /// Items dropped inside otherwise valid lines.
    pub dropped_items: usize,
}

impl ExtractStats {
    /// Lines that contributed nothing.
    pub fn skipped_lines(&self) -> usize {
        self.malformed + self.incomplete
    }
}

#[derive(Debug, Clone)]
pub struct Extraction<T> {
    pub records: Vec<T>,
    pub stats: ExtractStats,
}

/// Decodes every line of `reader`. Blank lines are ignored without being
/// counted; any other line that fails to decode is counted and skipped.
pub fn extract_lines<T: JsonLineRecord, R: BufRead>(reader: R) -> std::io::Result<Extraction<T>> {
    let mut records = Vec::new();
    let mut stats = ExtractStats::default();

    for (idx, raw) in reader.split(b'\n').enumerate() {
        let raw = raw?;
        let line_num = idx + 1;
        let Ok(line) = std::str::from_utf8(&raw) else {
            stats.lines += 1;
            stats.malformed += 1;
            debug!(line = line_num, "skipping line: invalid UTF-8");
            continue;
        };
        if line.trim().is_empty() {
            continue;
        }
        stats.lines += 1;

        match T::decode_line(line) {
            Ok(decoded) => {
                stats.dropped_items += decoded.dropped;
                records.extend(decoded.records);
            }
            Err(e @ LineError::Missing(_)) => {
                stats.incomplete += 1;
                debug!(line = line_num, error = %e, "skipping incomplete line");
            }
            Err(e) => {
                stats.malformed += 1;
                debug!(line = line_num, error = %e, "skipping malformed line");
            }
        }
    }

    Ok(Extraction { records, stats })
}
