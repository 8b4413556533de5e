//! DNS Query Log Analysis Pipeline
//!
//! This module turns a resolver's JSON log stream into traffic statistics.
//!
//! The resolver writes one JSON object per line. Most lines are ordinary
//! operational chatter; the interesting ones carry a DNS query record inside
//! their `message` field. The parser picks those out, everything else is
//! dropped silently - a line that doesn't parse is the expected common case
//! here, not an anomaly.
//!
//! The overall data processing architecture is:
//!
//! log file
//! parse_line
//! QueryEvent
//! TrafficAggregator
//! AggregationResult
//! render_report
//!
//! Aggregation is a single pass in log-file order. Ranking of domains and
//! query types is deterministic: ties are broken by first-seen order, never
//! by map iteration order.

mod aggregate;
mod parse;
mod render;
mod run;
#[cfg(test)]
mod tests;
pub mod types;

pub use aggregate::{AggregationResult, FrequencyTable, TrafficAggregator};
pub use parse::parse_line;
pub use render::{render_client_detail, render_report};
pub use run::{AnalyzeError, analyze_file};
