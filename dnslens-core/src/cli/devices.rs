use crate::registry::{DeviceRegistry, render_device_table};
use anyhow::{Context, Result};
use std::path::Path;

pub fn list(device_map: &Path) -> Result<()> {
    let registry = DeviceRegistry::load(device_map);
    print!("{}", render_device_table(&registry));
    Ok(())
}

pub fn add(
    device_map: &Path,
    ip: &str,
    name: &str,
    device_type: &str,
    category: &str,
    description: &str,
) -> Result<()> {
    let mut registry = DeviceRegistry::load(device_map);
    registry.upsert(ip, name, device_type, category, description);
    registry.save().context("failed to save device map")?;

    println!("Added device: {ip} -> {name} ({device_type})");
    println!("Device map saved to: {}", registry.path().display());
    Ok(())
}
