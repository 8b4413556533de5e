use crate::analyze::types::QueryEvent;
use std::collections::{HashMap, HashSet};

/// Insert-order-aware counter.
///
/// Ranking ties are broken by first-seen order, so reports come out the same
/// for the same input regardless of hash-map iteration order.
#[derive(Debug, Default, Clone)]
pub struct FrequencyTable {
    counts: HashMap<String, u64>,
    first_seen: Vec<String>,
}

impl FrequencyTable {
    pub fn increment(&mut self, key: &str) {
        if !self.counts.contains_key(key) {
            self.first_seen.push(key.to_string());
        }
        *self.counts.entry(key.to_string()).or_insert(0) += 1;
    }

    pub fn get(&self, key: &str) -> u64 {
        self.counts.get(key).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Entries ranked by count descending; stable sort keeps first-seen
    /// order on ties.
    pub fn ranked(&self) -> Vec<(&str, u64)> {
        let mut out: Vec<(&str, u64)> = self
            .first_seen
            .iter()
            .map(|key| (key.as_str(), self.counts[key]))
            .collect();
        out.sort_by(|a, b| b.1.cmp(&a.1));
        out
    }

    pub fn top(&self, n: usize) -> Vec<(&str, u64)> {
        let mut ranked = self.ranked();
        ranked.truncate(n);
        ranked
    }
}

/// Running per-client and per-domain statistics for one analysis pass.
///
/// Events arrive in log-file order and are never reordered or dropped once
/// the parser accepted them; the aggregator does not re-validate.
#[derive(Debug, Default)]
pub struct TrafficAggregator {
    lines_read: u64,
    queries: Vec<QueryEvent>,
    clients: HashMap<String, Vec<QueryEvent>>,
    client_counts: FrequencyTable,
    domains: FrequencyTable,
    query_types: FrequencyTable,
}

impl TrafficAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a raw source line, whether or not it produced an event.
    pub fn note_line(&mut self) {
        self.lines_read += 1;
    }

    pub fn push(&mut self, event: QueryEvent) {
        self.client_counts.increment(&event.client_ip);
        self.domains.increment(&event.domain);
        self.query_types.increment(&event.query_type);
        self.clients
            .entry(event.client_ip.clone())
            .or_default()
            .push(event.clone());
        self.queries.push(event);
    }

    pub fn finish(self) -> AggregationResult {
        AggregationResult {
            lines_read: self.lines_read,
            queries: self.queries,
            clients: self.clients,
            client_counts: self.client_counts,
            domains: self.domains,
            query_types: self.query_types,
        }
    }
}

/// One run's aggregated view of the traffic.
///
/// Transient: created fresh per analysis pass, folded into the device
/// registry by reconciliation, then discarded.
#[derive(Debug)]
pub struct AggregationResult {
    /// Total source lines read, including dropped ones.
    pub lines_read: u64,
    /// All events in arrival order.
    pub queries: Vec<QueryEvent>,
    /// Per-client events, each list in arrival order.
    pub clients: HashMap<String, Vec<QueryEvent>>,
    pub client_counts: FrequencyTable,
    pub domains: FrequencyTable,
    pub query_types: FrequencyTable,
}

impl AggregationResult {
    /// Distinct domains one client queried, in first-encountered order.
    pub fn client_domains(&self, client_ip: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();

        if let Some(events) = self.clients.get(client_ip) {
            for event in events {
                if seen.insert(event.domain.as_str()) {
                    out.push(event.domain.clone());
                }
            }
        }

        out
    }
}
