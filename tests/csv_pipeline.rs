mod common;

use std::fs;

use camino::Utf8Path;
use servetrack::observations::csv_reader::read_observations_file;
use servetrack::{AnalysisParams, ServeAnalyzer, ServeTrackError, ZoneId};

use common::identity_court;

const DETECTIONS: &str = "\
time,x,y,confidence
0.00,450.0,100.0,0.95
0.04,,,0.0
0.08,450.0,450.0,0.91
0.12,451.0,460.0,0.30
0.16,450.0,700.0,0.88
0.20,452.0,450.0,0.93
0.24,455.0,100.0,0.90
";

#[test]
fn detections_file_to_report_file() {
    let dir = tempfile::tempdir().unwrap();
    let root = Utf8Path::from_path(dir.path()).unwrap();
    let input = root.join("detections.csv");
    let output = root.join("report.csv");
    fs::write(&input, DETECTIONS).unwrap();

    let observations = read_observations_file(&input).unwrap();
    assert_eq!(observations.len(), 7);

    let params = AnalysisParams::builder()
        .neighbor_radius(1)
        .target_zones([ZoneId::Zone8])
        .build()
        .unwrap();
    let mut analyzer = ServeAnalyzer::new(identity_court(), params).unwrap();
    let stats = analyzer.ingest(&mut observations.into_iter());
    assert_eq!(stats.accepted, 5);
    assert_eq!(stats.skipped, 2);

    let record = analyzer.finalize();
    record.report.save_csv(&output).unwrap();

    let written = fs::read_to_string(&output).unwrap();
    assert_eq!(written, record.report.to_csv_string().unwrap());
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines.len(), 6);
    assert_eq!(lines[3], "0.160,450.00,700.00,Landing,Zone8");
    assert!(record.report.summary().hit_target());

    // Saving again overwrites with identical bytes.
    record.report.save_csv(&output).unwrap();
    assert_eq!(fs::read_to_string(&output).unwrap(), written);
}

#[test]
fn unreadable_detections_are_reported() {
    let dir = tempfile::tempdir().unwrap();
    let root = Utf8Path::from_path(dir.path()).unwrap();
    let input = root.join("broken.csv");
    fs::write(&input, "time,x,y,confidence\n0.0,abc,1.0,0.9\n").unwrap();

    let err = read_observations_file(&input).unwrap_err();
    assert!(matches!(err, ServeTrackError::CsvError(_)));
}
