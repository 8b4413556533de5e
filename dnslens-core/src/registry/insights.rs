use crate::registry::types::{ActivityPatterns, DeviceMap, NetworkInsights};
use ipnet::Ipv4Net;
use std::collections::BTreeMap;
use std::net::Ipv4Addr;

const TOP_SERVICES: usize = 10;

/// Recompute the insights block from the device mapping.
///
/// Runs over the map in key order, so every derived field is deterministic:
/// `busiest_device` ties resolve to the lowest key, and `top_services` is
/// ranked count-descending with domains alphabetical on equal counts.
pub fn compute_insights(map: &DeviceMap) -> NetworkInsights {
    let range: Option<Ipv4Net> = map.metadata.network_range.parse().ok();

    let mut device_types: BTreeMap<String, u64> = BTreeMap::new();
    let mut service_counts: BTreeMap<String, u64> = BTreeMap::new();

    let mut active_devices = 0;
    let mut idle_devices = 0;
    let mut total_queries = 0u64;
    let mut busiest: Option<(&String, u64)> = None;
    let mut outside_range_devices = 0;

    for (ip, device) in &map.devices {
        *device_types.entry(device.device_type.clone()).or_insert(0) += 1;

        // count = number of devices listing the domain, not query volume
        for domain in &device.common_domains {
            *service_counts.entry(domain.clone()).or_insert(0) += 1;
        }

        if device.query_count > 0 {
            active_devices += 1;
            if busiest.is_none_or(|(_, count)| device.query_count > count) {
                busiest = Some((ip, device.query_count));
            }
        } else {
            idle_devices += 1;
        }
        total_queries += device.query_count;

        if let Some(net) = range {
            match ip.parse::<Ipv4Addr>() {
                Ok(addr) if net.contains(&addr) => {}
                _ => outside_range_devices += 1,
            }
        }
    }

    let mut ranked: Vec<(String, u64)> = service_counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(TOP_SERVICES);

    NetworkInsights {
        device_types,
        top_services: ranked.into_iter().collect(),
        activity_patterns: ActivityPatterns {
            active_devices,
            idle_devices,
            total_queries,
            busiest_device: busiest.map(|(ip, _)| ip.clone()),
            outside_range_devices,
        },
    }
}
