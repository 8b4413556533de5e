use crate::analyze::AggregationResult;
use crate::registry::error::RegistryError;
use crate::registry::store::DeviceRegistry;
use crate::registry::types::{COMMON_DOMAIN_LIMIT, last_octet};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Domains carried per routing-table entry.
const TOP_DOMAINS: usize = 3;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReconcileSummary {
    pub updated: usize,
    pub discovered: usize,
    pub skipped: usize,
}

impl ReconcileSummary {
    pub fn active_devices(&self) -> usize {
        self.updated + self.discovered
    }
}

/// Fold one run's aggregation into the registry.
///
/// Activity fields are a latest-run snapshot: `query_count` is overwritten
/// with this run's count and `common_domains` is replaced wholesale, never
/// accumulated across runs. Reconciling the same result twice leaves the
/// registry unchanged.
///
/// A device that cannot be updated is skipped and logged; a single bad
/// record never aborts the batch.
pub fn reconcile(registry: &mut DeviceRegistry, result: &AggregationResult) -> ReconcileSummary {
    let mut summary = ReconcileSummary::default();

    for (ip, count) in result.client_counts.ranked() {
        let Some(octet) = last_octet(ip) else {
            tracing::warn!(client = ip, "skipping device update: not a dotted-quad address");
            summary.skipped += 1;
            continue;
        };

        let mut domains = result.client_domains(ip);
        domains.truncate(COMMON_DOMAIN_LIMIT);

        if registry.contains(ip) {
            if let Some(device) = registry.device_mut(ip) {
                device.query_count = count;
                device.common_domains = domains;
            }
            summary.updated += 1;
        } else {
            let name = format!("Auto-detected-{octet}");
            let description = format!("Auto-detected from DNS logs with {count} queries");
            let device = registry.upsert(ip, &name, "Unknown", "Unknown", &description);
            device.query_count = count;
            device.common_domains = domains;
            summary.discovered += 1;

            tracing::info!(
                client = ip,
                queries = count,
                "auto-provisioned device from observed traffic"
            );
        }
    }

    tracing::info!(
        updated = summary.updated,
        discovered = summary.discovered,
        skipped = summary.skipped,
        "reconciliation complete"
    );

    summary
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingEntry {
    pub ip: String,
    pub name: String,
    #[serde(rename = "type")]
    pub device_type: String,
    pub category: String,
    pub activity: u64,
    pub top_domains: Vec<String>,
    pub last_seen: String,
}

/// Snapshot join of the registry and the latest folded-in traffic.
///
/// Entries follow the persisted key order (ascending lexical string sort of
/// the IPs). `last_seen` reuses the creation timestamp; no separate
/// last-activity instant is modeled.
pub fn routing_table(registry: &DeviceRegistry) -> Vec<RoutingEntry> {
    registry
        .devices()
        .iter()
        .map(|(ip, device)| RoutingEntry {
            ip: ip.clone(),
            name: device.name.clone(),
            device_type: device.device_type.clone(),
            category: device.category.clone(),
            activity: device.query_count,
            top_domains: device
                .common_domains
                .iter()
                .take(TOP_DOMAINS)
                .cloned()
                .collect(),
            last_seen: if device.added_at.is_empty() {
                "Unknown".to_string()
            } else {
                device.added_at.clone()
            },
        })
        .collect()
}

#[derive(Serialize)]
struct RoutingExport<'a> {
    generated: String,
    total_devices: usize,
    network_range: &'a str,
    routing_table: &'a [RoutingEntry],
}

/// Write the routing table artifact. Returns the number of entries written.
pub fn export_routing_table(
    registry: &DeviceRegistry,
    output: &Path,
) -> Result<usize, RegistryError> {
    let table = routing_table(registry);

    let export = RoutingExport {
        generated: chrono::Local::now().to_rfc3339(),
        total_devices: table.len(),
        network_range: registry.network_range(),
        routing_table: &table,
    };

    let json =
        serde_json::to_string_pretty(&export).map_err(|e| RegistryError::encode(output, e))?;
    fs::write(output, json).map_err(|e| RegistryError::write_file(output, e))?;

    Ok(table.len())
}
