//! Fixture helpers for the end-to-end pipeline tests.

use std::fs;
use std::path::{Path, PathBuf};

/// One resolver log line carrying a query record, in the envelope shape the
/// parser expects.
pub fn query_line(time: &str, client: &str, query_type: &str, domain: &str) -> String {
    format!(
        r#"{{"time":"{time}","level":"info","message":"QUERY: {client}:54321 (udp) -> listener.0: {query_type} {domain}"}}"#
    )
}

pub fn write_log(dir: &Path, lines: &[String]) -> PathBuf {
    let path = dir.join("resolver.log");
    let mut content = lines.join("\n");
    content.push('\n');
    fs::write(&path, content).unwrap();
    path
}
