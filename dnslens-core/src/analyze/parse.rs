use crate::analyze::types::QueryEvent;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

/// Marker distinguishing query records from the resolver's other output.
const QUERY_MARKER: &str = "QUERY";

/// Structural shape of a query message:
/// `<client_ip>:<port> (<resolver_info>) -> listener.<n>: <query_type> <domain>`
static QUERY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d+\.\d+\.\d+\.\d+):\d+ \(([^)]+)\) -> listener\.\d+: (\w+) (.+)")
        .expect("query pattern compiles")
});

/// Parse one raw log line into a query event.
///
/// Returns `None` for lines that are not JSON, carry no `message`, lack the
/// query marker, or don't match the structural pattern. None of these is an
/// error; non-query lines make up most of the log.
pub fn parse_line(line: &str) -> Option<QueryEvent> {
    let envelope = serde_json::from_str::<Value>(line.trim()).ok()?;

    let message = envelope.get("message").and_then(Value::as_str)?;
    if !message.contains(QUERY_MARKER) {
        return None;
    }

    let caps = QUERY_PATTERN.captures(message)?;

    Some(QueryEvent {
        timestamp: envelope
            .get("time")
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_string(),
        client_ip: caps[1].to_string(),
        query_type: caps[3].to_string(),
        domain: caps[4].trim().to_string(),
        level: envelope
            .get("level")
            .and_then(Value::as_str)
            .unwrap_or("info")
            .to_string(),
    })
}
