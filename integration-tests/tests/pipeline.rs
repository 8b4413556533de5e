use dnslens_core::analyze::analyze_file;
use dnslens_core::registry::{DeviceRegistry, export_routing_table, reconcile};
use integration_tests::{query_line, write_log};
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::tempdir;

#[test]
fn log_to_routing_table_end_to_end() {
    // Arrange: two valid queries from one client plus one malformed line
    let dir = tempdir().unwrap();
    let log = write_log(
        dir.path(),
        &[
            query_line("2025-07-14T08:12:33.120Z", "192.168.1.10", "A", "x.com"),
            "not a json line".to_string(),
            query_line("2025-07-14T08:12:34.200Z", "192.168.1.10", "A", "y.com"),
        ],
    );
    let map_path = dir.path().join("device-map.json");

    // Act: analyze, reconcile into an empty registry, persist, export
    let result = analyze_file(&log).unwrap();
    let mut registry = DeviceRegistry::load(&map_path);
    let summary = reconcile(&mut registry, &result);
    registry.save().unwrap();

    let reloaded = DeviceRegistry::load(&map_path);
    let output = dir.path().join("device-routing-table.json");
    let exported = export_routing_table(&reloaded, &output).unwrap();

    // Assert
    assert_eq!(result.lines_read, 3);
    assert_eq!(result.queries.len(), 2);
    assert_eq!(summary.discovered, 1);

    let device = reloaded.get("192.168.1.10");
    assert_eq!(device.name, "Auto-detected-10");
    assert_eq!(device.query_count, 2);
    assert_eq!(device.common_domains, vec!["x.com", "y.com"]);

    assert_eq!(exported, 1);
    let raw: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(raw["total_devices"], 1);
    assert_eq!(raw["routing_table"].as_array().unwrap().len(), 1);
    assert_eq!(raw["routing_table"][0]["ip"], "192.168.1.10");
    assert_eq!(raw["routing_table"][0]["activity"], 2);
    assert_eq!(raw["routing_table"][0]["top_domains"][0], "x.com");
}

#[test]
fn second_run_replaces_the_activity_snapshot() {
    // Arrange: first run sees three queries, second run sees one
    let dir = tempdir().unwrap();
    let map_path = dir.path().join("device-map.json");

    let first = write_log(
        dir.path(),
        &[
            query_line("2025-07-14T08:12:33.120Z", "10.0.0.5", "A", "a.com"),
            query_line("2025-07-14T08:12:34.200Z", "10.0.0.5", "A", "b.com"),
            query_line("2025-07-14T08:12:35.300Z", "10.0.0.5", "A", "a.com"),
        ],
    );

    let mut registry = DeviceRegistry::load(&map_path);
    reconcile(&mut registry, &analyze_file(&first).unwrap());
    registry.save().unwrap();

    let second = write_log(
        dir.path(),
        &[query_line(
            "2025-07-15T09:00:00.000Z",
            "10.0.0.5",
            "AAAA",
            "c.com",
        )],
    );

    // Act
    let mut registry = DeviceRegistry::load(&map_path);
    reconcile(&mut registry, &analyze_file(&second).unwrap());
    registry.save().unwrap();

    // Assert: latest-snapshot policy, not a running total
    let device = DeviceRegistry::load(&map_path).get("10.0.0.5");
    assert_eq!(device.query_count, 1);
    assert_eq!(device.common_domains, vec!["c.com"]);
    assert_eq!(device.name, "Auto-detected-5");
}

#[test]
fn missing_log_fails_the_run_without_touching_the_registry() {
    // Arrange: a registry that already holds one device
    let dir = tempdir().unwrap();
    let map_path = dir.path().join("device-map.json");
    let mut registry = DeviceRegistry::load(&map_path);
    registry.upsert("192.168.1.2", "Gateway", "Router", "Network", "");
    registry.save().unwrap();
    let before = fs::read_to_string(&map_path).unwrap();

    // Act
    let err = analyze_file(&dir.path().join("absent.log"));

    // Assert: analysis is fatal for the run, registry file is untouched
    assert!(err.is_err());
    assert_eq!(fs::read_to_string(&map_path).unwrap(), before);
}

#[test]
fn corrupt_registry_degrades_and_rebuilds_from_logs() {
    // Arrange
    let dir = tempdir().unwrap();
    let map_path = dir.path().join("device-map.json");
    fs::write(&map_path, "{ definitely not json").unwrap();

    let log = write_log(
        dir.path(),
        &[query_line(
            "2025-07-14T08:12:33.120Z",
            "192.168.1.77",
            "A",
            "thermo.example",
        )],
    );

    // Act
    let mut registry = DeviceRegistry::load(&map_path);
    reconcile(&mut registry, &analyze_file(&log).unwrap());
    registry.save().unwrap();

    // Assert: the corrupt file was replaced by a well-formed map
    let reloaded = DeviceRegistry::load(&map_path);
    assert_eq!(reloaded.len(), 1);
    assert!(reloaded.contains("192.168.1.77"));
}
