use crate::registry::store::DeviceRegistry;

pub fn render_device_table(registry: &DeviceRegistry) -> String {
    let mut out = String::new();

    out.push_str("\nDevice Routing Table:\n");
    out.push_str(&format!("{}\n", "=".repeat(80)));
    out.push_str(&format!(
        "{:<15} {:<25} {:<15} {:<15}\n",
        "IP Address", "Name", "Type", "Category"
    ));
    out.push_str(&format!("{}\n", "-".repeat(80)));

    for (ip, device) in registry.devices() {
        out.push_str(&format!(
            "{:<15} {:<25} {:<15} {:<15}\n",
            ip,
            clip(&device.name, 24),
            clip(&device.device_type, 14),
            clip(&device.category, 14)
        ));
    }

    out.push_str(&format!("\nTotal devices: {}\n", registry.len()));
    out
}

fn clip(s: &str, max: usize) -> &str {
    s.char_indices()
        .nth(max)
        .map(|(i, _)| &s[..i])
        .unwrap_or(s)
}
