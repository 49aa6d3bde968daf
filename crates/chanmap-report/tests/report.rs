use std::fs;
use std::path::PathBuf;

use chanmap_ingest::DataTable;
use chanmap_model::{Match, MatchSet, MatchType};
use chanmap_report::{
    ReportError, UTF8_BOM, export_aligned, read_match_table, write_match_json, write_match_table,
};
use tempfile::TempDir;

fn sample_matches() -> Vec<Match> {
    vec![
        Match::new("Drive Speed", "Vx", 0.9, MatchType::Velocity, "Longitudinal velocity"),
        Match::new("FL Wheel Speed", "AVy_L1", 1.0, MatchType::Wheel, "Wheel spin (rpm) - FL=L1")
            .with_description("Wheel spin, front left"),
        Match::new("Ground Speed", "Vx", 1.0, MatchType::Velocity, "Longitudinal velocity"),
        Match::new("Brake Pressure Front", "PbkCh_L1", 0.95, MatchType::Brake, "Front brake pressure"),
        Match::new("Gear", "Gear_CL", 0.667, MatchType::Powertrain, "Gear measurement"),
    ]
}

fn target_table() -> DataTable {
    DataTable {
        headers: vec!["Time".into(), "Vx".into(), "AVy_L1".into()],
        rows: vec![
            vec!["0.0".into(), "10.0".into(), "31.2".into()],
            vec!["0.1".into(), "10.5".into(), "31.9".into()],
        ],
    }
}

#[test]
fn match_table_reads_back_in_ranked_order() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("matches.csv");
    write_match_table(&path, &sample_matches()).expect("write table");

    let text = fs::read_to_string(&path).unwrap();
    let mut lines = text.lines();
    assert_eq!(
        lines.next(),
        Some("\"Source_Variable\",\"Target_Variable\",\"Confidence\",\"Match_Type\",\"Description\",\"Notes\"")
    );
    assert_eq!(
        lines.next(),
        Some("\"FL Wheel Speed\",\"AVy_L1\",\"1.0\",\"Wheel\",\"Wheel spin, front left\",\"Wheel spin (rpm) - FL=L1\"")
    );

    let read = read_match_table(&path).expect("read table");
    let order: Vec<(&str, f32)> = read
        .iter()
        .map(|m| (m.source_name.as_str(), m.confidence))
        .collect();
    assert_eq!(
        order,
        vec![
            ("FL Wheel Speed", 1.0),
            ("Ground Speed", 1.0),
            ("Brake Pressure Front", 0.95),
            ("Drive Speed", 0.9),
            ("Gear", 0.667),
        ]
    );
    assert_eq!(read[4].match_type, MatchType::Powertrain);
    assert_eq!(read[0].description, "Wheel spin, front left");
}

#[test]
fn empty_match_table_still_has_header() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("matches.csv");
    write_match_table(&path, &[]).expect("write table");
    assert!(read_match_table(&path).expect("read table").is_empty());
    assert!(fs::read_to_string(&path).unwrap().starts_with("\"Source_Variable\""));
}

#[test]
fn match_table_without_optional_columns() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("matches.csv");
    fs::write(
        &path,
        "Source_Variable,Target_Variable,Confidence,Match_Type\nFuel Flow,Qfuel, 1.0 ,Fuel\n",
    )
    .unwrap();
    let read = read_match_table(&path).expect("read table");
    assert_eq!(read.len(), 1);
    assert_eq!(read[0].target_name, "Qfuel");
    assert!(read[0].note.is_empty());
}

#[test]
fn invalid_match_type_reports_line() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("matches.csv");
    fs::write(
        &path,
        "Source_Variable,Target_Variable,Confidence,Match_Type\nFuel Flow,Qfuel,1.0,Fuel\nGear,GearStat,1.0,Gearbox\n",
    )
    .unwrap();
    match read_match_table(&path).unwrap_err() {
        ReportError::InvalidRecord { line, .. } => assert_eq!(line, 3),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_match_table_is_reported() {
    let dir = TempDir::new().unwrap();
    let err = read_match_table(&dir.path().join("absent.csv")).unwrap_err();
    assert!(matches!(err, ReportError::FileNotFound { .. }));
}

#[test]
fn json_lists_matches_best_first() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("matches.json");
    write_match_json(&path, &sample_matches()).expect("write json");
    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    let items = value.as_array().expect("array");
    assert_eq!(items.len(), 5);
    assert_eq!(items[0]["source_name"], "FL Wheel Speed");
    assert_eq!(items[4]["match_type"], "Engine/Powertrain");
}

#[test]
fn aligned_export_writes_headers_data_and_skips() {
    let dir = TempDir::new().unwrap();
    let output: PathBuf = dir.path().join("aligned.csv");
    let resolution = MatchSet::from(sample_matches()).resolve(0.9);
    let summary = export_aligned(&output, &resolution, 3, &target_table()).expect("export");

    assert_eq!(summary.kept, 3);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.columns_written, 2);
    assert_eq!(summary.data_rows, 2);
    assert_eq!(summary.missing_targets, vec!["PbkCh_L1".to_string()]);

    let text = fs::read_to_string(&output).unwrap();
    let text = text.strip_prefix(UTF8_BOM).expect("export starts with a BOM");
    assert!(text.starts_with("# "));
    assert!(text.contains("# Source Data Rows: 3\n"));
    assert!(text.contains("# SKIPPED: Drive Speed → Vx (Conf: 0.90)\n"));
    let data: Vec<&str> = text.lines().filter(|line| !line.starts_with('#')).collect();
    assert_eq!(
        data,
        vec![
            "FL Wheel Speed,Ground Speed",
            "AVy_L1,Vx",
            "31.2,10.0",
            "31.9,10.5",
        ]
    );

    let skipped = summary.skipped_path.expect("skipped file");
    assert_eq!(skipped, dir.path().join("aligned_skipped.csv"));
    assert_eq!(
        fs::read_to_string(skipped).unwrap(),
        "Source_Variable,Target_Variable,Confidence,Reason\nDrive Speed,Vx,0.9,duplicate target\n"
    );
}

#[test]
fn export_without_skips_writes_no_side_file() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("aligned.csv");
    let resolution = MatchSet::from(vec![Match::new(
        "Ground Speed",
        "Vx",
        1.0,
        MatchType::Velocity,
        "",
    )])
    .resolve(0.9);
    let summary = export_aligned(&output, &resolution, 2, &target_table()).expect("export");
    assert!(summary.skipped_path.is_none());
    assert!(!dir.path().join("aligned_skipped.csv").exists());
}
