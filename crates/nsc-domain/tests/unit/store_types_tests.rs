//! Store value object tests

use nsc_domain::constants::MIN_SERVER_VERSION;
use nsc_domain::{ClearReport, ScanPage, ServerVersion};

#[test]
fn test_server_version_parse() {
    assert_eq!(ServerVersion::parse("7.2.4"), Some(ServerVersion::new(7, 2, 4)));
    assert_eq!(ServerVersion::parse("6.0"), Some(ServerVersion::new(6, 0, 0)));
    assert_eq!(ServerVersion::parse("255.255.255-rc1"), Some(ServerVersion::new(255, 255, 255)));
    assert_eq!(ServerVersion::parse("garbage"), None);
}

#[test]
fn test_server_version_ordering() {
    let minimum = ServerVersion::from(MIN_SERVER_VERSION);
    assert!(ServerVersion::new(2, 6, 17) < minimum);
    assert!(ServerVersion::new(2, 8, 0) >= minimum);
    assert!(ServerVersion::new(7, 0, 0) > minimum);
    assert_eq!(minimum.to_string(), "2.8.0");
}

#[test]
fn test_scan_page_last() {
    assert!(ScanPage::default().is_last());
    let page = ScanPage {
        cursor: 17,
        keys: vec![],
    };
    assert!(!page.is_last());
}

#[test]
fn test_clear_report_clean() {
    let report = ClearReport {
        removed: 3,
        failed_batches: 0,
        complete: true,
    };
    assert!(report.is_clean());
    let partial = ClearReport {
        failed_batches: 1,
        ..report
    };
    assert!(!partial.is_clean());
}
