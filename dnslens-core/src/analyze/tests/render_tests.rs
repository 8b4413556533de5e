use crate::analyze::types::QueryEvent;
use crate::analyze::{TrafficAggregator, render_client_detail, render_report};

fn event(client_ip: &str, domain: &str, query_type: &str) -> QueryEvent {
    QueryEvent {
        timestamp: "2025-07-14T08:12:33.120Z".to_string(),
        client_ip: client_ip.to_string(),
        query_type: query_type.to_string(),
        domain: domain.to_string(),
        level: "info".to_string(),
    }
}

#[test]
fn empty_result_renders_notice_instead_of_sections() {
    // Arrange
    let result = TrafficAggregator::new().finish();

    // Act
    let report = render_report(&result);

    // Assert
    assert!(report.contains("No DNS queries found to analyze"));
    assert!(!report.contains("TOP CLIENTS"));
}

#[test]
fn report_lists_tied_domains_in_first_seen_order() {
    // Arrange: a.com and b.com tie at 2
    let mut agg = TrafficAggregator::new();
    for domain in ["a.com", "b.com", "a.com", "b.com", "c.com"] {
        agg.push(event("192.168.1.10", domain, "A"));
    }
    let result = agg.finish();

    // Act
    let report = render_report(&result);

    // Assert
    assert!(report.contains("DNS TRAFFIC ANALYSIS REPORT"));
    assert!(report.contains("TOP CLIENTS BY QUERY COUNT:"));
    assert!(report.contains("QUERY TYPES DISTRIBUTION:"));
    let a = report.find("a.com").unwrap();
    let b = report.find("b.com").unwrap();
    assert!(a < b, "tied domains must keep first-seen order");
}

#[test]
fn report_shows_query_type_percentages() {
    // Arrange: 3 A, 1 AAAA -> 75.0% / 25.0%
    let mut agg = TrafficAggregator::new();
    for _ in 0..3 {
        agg.push(event("192.168.1.10", "x.com", "A"));
    }
    agg.push(event("192.168.1.10", "x.com", "AAAA"));
    let result = agg.finish();

    // Act
    let report = render_report(&result);

    // Assert
    assert!(report.contains("( 75.0%)"));
    assert!(report.contains("( 25.0%)"));
}

#[test]
fn recent_activity_truncates_timestamp_and_windows_last_ten() {
    // Arrange: 12 queries; only the last 10 appear
    let mut agg = TrafficAggregator::new();
    for i in 0..12 {
        agg.push(event("192.168.1.10", &format!("d{i}.com"), "A"));
    }
    let result = agg.finish();

    // Act
    let report = render_report(&result);

    // Assert
    assert!(!report.contains("d0.com"));
    assert!(!report.contains("d1.com"));
    assert!(report.contains("d2.com"));
    assert!(report.contains("d11.com"));
    // 19-char truncation drops the sub-second suffix
    assert!(report.contains("2025-07-14T08:12:33 "));
    assert!(!report.contains("08:12:33.120Z 192.168"));
}

#[test]
fn client_detail_reports_unknown_client() {
    // Arrange
    let result = TrafficAggregator::new().finish();

    // Act
    let detail = render_client_detail(&result, "10.0.0.9");

    // Assert
    assert_eq!(detail, "No queries found for client 10.0.0.9\n");
}

#[test]
fn client_detail_breaks_down_domains_and_types() {
    // Arrange
    let mut agg = TrafficAggregator::new();
    agg.push(event("10.0.0.5", "a.com", "A"));
    agg.push(event("10.0.0.5", "a.com", "AAAA"));
    agg.push(event("10.0.0.5", "b.com", "A"));
    agg.push(event("10.0.0.9", "other.com", "A"));
    let result = agg.finish();

    // Act
    let detail = render_client_detail(&result, "10.0.0.5");

    // Assert
    assert!(detail.contains("DETAILED ANALYSIS FOR CLIENT: 10.0.0.5"));
    assert!(detail.contains("Total queries: 3"));
    assert!(detail.contains("a.com"));
    assert!(detail.contains("b.com"));
    assert!(!detail.contains("other.com"));
}
