use crate::registry::{DeviceRegistry, export_routing_table};
use anyhow::{Context, Result};
use std::path::Path;

pub fn run(device_map: &Path, output: &Path) -> Result<()> {
    let registry = DeviceRegistry::load(device_map);

    let count = export_routing_table(&registry, output)
        .with_context(|| format!("failed to export routing table to {}", output.display()))?;

    println!(
        "Routing table exported to: {} ({count} devices)",
        output.display()
    );
    Ok(())
}
