use std::fs;

use tba_matchlog::aggregate::{Aggregation, aggregate};
use tba_matchlog::export::{export_workbook, workbook_filename};
use tba_matchlog::tba_fetch::{AllianceResult, CompLevel, MatchAlliances, MatchRecord};

fn temp_workbook(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("tba_matchlog_{}_{name}.xlsx", std::process::id()))
}

#[test]
fn filename_is_deterministic() {
    assert_eq!(workbook_filename("frc1710"), "tba_frc1710_matches.xlsx");
}

#[test]
fn empty_aggregation_writes_header_only_sheets() {
    let path = temp_workbook("empty");
    let report = export_workbook(&path, &Aggregation::default()).expect("export should succeed");
    assert_eq!(report.match_rows, 0);
    assert_eq!(report.partner_rows, 0);
    assert!(path.exists());
    // xlsx is a zip container; a header-only workbook is still a valid file.
    assert!(fs::metadata(&path).expect("file should exist").len() > 0);
    fs::remove_file(&path).ok();
}

#[test]
fn populated_aggregation_reports_row_counts() {
    let record = MatchRecord {
        key: "2023mokc_qm1".to_string(),
        event_key: "2023mokc".to_string(),
        comp_level: CompLevel::Qm,
        match_number: 1,
        set_number: None,
        alliances: MatchAlliances {
            red: AllianceResult {
                team_keys: vec![
                    "frc1710".to_string(),
                    "frc100".to_string(),
                    "frc200".to_string(),
                ],
                score: Some(50),
            },
            blue: AllianceResult {
                team_keys: vec![
                    "frc300".to_string(),
                    "frc400".to_string(),
                    "frc500".to_string(),
                ],
                score: Some(40),
            },
        },
    };
    let aggregation = aggregate("frc1710", &[record]);

    let path = temp_workbook("populated");
    let report = export_workbook(&path, &aggregation).expect("export should succeed");
    assert_eq!(report.match_rows, 1);
    assert_eq!(report.partner_rows, 5);
    assert!(path.exists());
    fs::remove_file(&path).ok();
}
