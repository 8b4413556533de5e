use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_NETWORK_RANGE: &str = "192.168.1.0/24";
pub const MAP_SOURCE: &str = "DNS query log analysis";

/// Upper bound on domains remembered per device.
pub const COMMON_DOMAIN_LIMIT: usize = 5;

/// A named network identity, persisted across analysis runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub name: String,
    #[serde(rename = "type")]
    pub device_type: String,
    pub category: String,
    #[serde(default)]
    pub description: String,
    /// Creation timestamp, stamped once when the device first enters the map.
    #[serde(rename = "added", default)]
    pub added_at: String,
    #[serde(default)]
    pub query_count: u64,
    #[serde(default)]
    pub common_domains: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapMetadata {
    pub last_updated: String,
    pub network_range: String,
    pub total_devices: usize,
    pub source: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityPatterns {
    pub active_devices: usize,
    pub idle_devices: usize,
    pub total_queries: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub busiest_device: Option<String>,
    pub outside_range_devices: usize,
}

/// Summary block recomputed on every save; never hand-maintained.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkInsights {
    #[serde(default)]
    pub device_types: BTreeMap<String, u64>,
    #[serde(default)]
    pub top_services: BTreeMap<String, u64>,
    #[serde(default)]
    pub activity_patterns: ActivityPatterns,
}

/// The registry's persisted root.
///
/// Devices are keyed by IP in a `BTreeMap`, so the persisted key order and
/// the routing-table order are both the ascending lexical string sort.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceMap {
    pub metadata: MapMetadata,
    pub devices: BTreeMap<String, Device>,
    pub network_insights: NetworkInsights,
}

impl DeviceMap {
    pub fn empty() -> Self {
        Self {
            metadata: MapMetadata {
                last_updated: chrono::Local::now().format("%Y-%m-%d").to_string(),
                network_range: DEFAULT_NETWORK_RANGE.to_string(),
                total_devices: 0,
                source: MAP_SOURCE.to_string(),
            },
            devices: BTreeMap::new(),
            network_insights: NetworkInsights::default(),
        }
    }
}

/// Last octet of a dotted-quad address, used for synthesized device names.
///
/// Returns `None` when the string is not a dotted-quad; callers treat that
/// as a malformed record.
pub(crate) fn last_octet(ip: &str) -> Option<&str> {
    let parts: Vec<&str> = ip.split('.').collect();
    if parts.len() != 4 || parts.iter().any(|p| p.parse::<u8>().is_err()) {
        return None;
    }
    parts.last().copied()
}
