use crate::analyze::aggregate::{AggregationResult, TrafficAggregator};
use crate::analyze::parse::parse_line;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("failed to read log file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl AnalyzeError {
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadFile {
            path: path.into(),
            source,
        }
    }
}

/// Analyze one resolver log file in a single sequential pass.
///
/// An unreadable source is fatal for the run: anything aggregated before the
/// failure is discarded rather than returned as a complete picture. Stray
/// non-UTF-8 bytes inside a line are tolerated (decoded lossily), only I/O
/// failures abort.
pub fn analyze_file(path: &Path) -> Result<AggregationResult, AnalyzeError> {
    let file = File::open(path).map_err(|e| AnalyzeError::read_file(path, e))?;
    let mut reader = BufReader::new(file);

    let mut aggregator = TrafficAggregator::new();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        let n = reader
            .read_until(b'\n', &mut buf)
            .map_err(|e| AnalyzeError::read_file(path, e))?;
        if n == 0 {
            break;
        }

        aggregator.note_line();

        let line = String::from_utf8_lossy(&buf);
        if let Some(event) = parse_line(&line) {
            aggregator.push(event);
        }
    }

    let result = aggregator.finish();
    tracing::info!(
        path = %path.display(),
        lines = result.lines_read,
        queries = result.queries.len(),
        "log analysis complete"
    );

    Ok(result)
}
