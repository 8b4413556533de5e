use crate::analyze::{analyze_file, render_client_detail, render_report};
use crate::registry::{DeviceRegistry, reconcile};
use anyhow::{Context, Result};
use std::path::Path;

/// Run the full pipeline: parse + aggregate the log, print the traffic
/// report, fold activity into the device map, persist it.
///
/// An unreadable log file aborts before any registry mutation.
pub fn run(log_file: &Path, client: Option<&str>, device_map: &Path) -> Result<()> {
    println!("Analyzing DNS log file: {}", log_file.display());

    let result = analyze_file(log_file)
        .with_context(|| format!("analysis aborted for {}", log_file.display()))?;

    println!("Processed {} DNS queries", result.queries.len());
    print!("{}", render_report(&result));

    if let Some(ip) = client {
        print!("{}", render_client_detail(&result, ip));
    }

    let mut registry = DeviceRegistry::load(device_map);
    let summary = reconcile(&mut registry, &result);
    registry.save().context("failed to save device map")?;

    println!(
        "\nAnalysis complete. Found activity from {} devices ({} newly discovered).",
        summary.active_devices(),
        summary.discovered
    );
    println!("Device map saved to: {}", registry.path().display());

    Ok(())
}
