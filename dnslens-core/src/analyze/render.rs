use crate::analyze::aggregate::{AggregationResult, FrequencyTable};

const TOP_CLIENTS: usize = 10;
const TOP_DOMAINS: usize = 20;
const RECENT_QUERIES: usize = 10;
const TIMESTAMP_WIDTH: usize = 19;

pub fn render_report(result: &AggregationResult) -> String {
    let mut out = String::new();

    if result.queries.is_empty() {
        out.push_str("No DNS queries found to analyze\n");
        return out;
    }

    out.push_str(&format!("\n{}\n", "=".repeat(60)));
    out.push_str("DNS TRAFFIC ANALYSIS REPORT\n");
    out.push_str(&format!("{}\n", "=".repeat(60)));

    out.push_str("\nTOP CLIENTS BY QUERY COUNT:\n");
    out.push_str(&format!("{}\n", "-".repeat(40)));
    for (ip, count) in result.client_counts.top(TOP_CLIENTS) {
        out.push_str(&format!("{ip:<15} {count:>6} queries\n"));
    }

    out.push_str("\nTOP DOMAINS QUERIED:\n");
    out.push_str(&format!("{}\n", "-".repeat(40)));
    for (domain, count) in result.domains.top(TOP_DOMAINS) {
        out.push_str(&format!("{domain:<40} {count:>6} queries\n"));
    }

    out.push_str("\nQUERY TYPES DISTRIBUTION:\n");
    out.push_str(&format!("{}\n", "-".repeat(40)));
    let total = result.query_types.total();
    for (query_type, count) in result.query_types.ranked() {
        let pct = (count as f64 / total as f64) * 100.0;
        out.push_str(&format!("{query_type:<10} {count:>6} queries ({pct:>5.1}%)\n"));
    }

    out.push_str(&format!(
        "\nRECENT DNS ACTIVITY (last {RECENT_QUERIES} queries):\n"
    ));
    out.push_str(&format!("{}\n", "-".repeat(60)));
    let start = result.queries.len().saturating_sub(RECENT_QUERIES);
    for query in &result.queries[start..] {
        let ts = query
            .timestamp
            .get(..TIMESTAMP_WIDTH)
            .unwrap_or(&query.timestamp);
        out.push_str(&format!(
            "{ts} {:<15} {:<6} {}\n",
            query.client_ip, query.query_type, query.domain
        ));
    }

    out
}

pub fn render_client_detail(result: &AggregationResult, client_ip: &str) -> String {
    let Some(events) = result.clients.get(client_ip) else {
        return format!("No queries found for client {client_ip}\n");
    };

    let mut domains = FrequencyTable::default();
    let mut query_types = FrequencyTable::default();
    for event in events {
        domains.increment(&event.domain);
        query_types.increment(&event.query_type);
    }

    let mut out = String::new();
    out.push_str(&format!("\nDETAILED ANALYSIS FOR CLIENT: {client_ip}\n"));
    out.push_str(&format!("{}\n", "=".repeat(50)));
    out.push_str(&format!("Total queries: {}\n", events.len()));

    out.push_str(&format!("\nTop domains for {client_ip}:\n"));
    for (domain, count) in domains.top(TOP_CLIENTS) {
        out.push_str(&format!("  {domain:<30} {count:>4} queries\n"));
    }

    out.push_str(&format!("\nQuery types for {client_ip}:\n"));
    for (query_type, count) in query_types.ranked() {
        out.push_str(&format!("  {query_type:<10} {count:>4} queries\n"));
    }

    out
}
