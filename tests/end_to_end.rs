mod common;

use servetrack::{
    AnalysisParams, EventKind, Observation, Point2D, ServeAnalyzer, ServeTrackError, ZoneId,
};

use common::identity_court;

fn straight_serve() -> Vec<Observation> {
    [100.0, 450.0, 700.0, 450.0, 100.0]
        .into_iter()
        .enumerate()
        .map(|(i, y)| Observation::new(i as f64, Point2D::new(450.0, y), 0.9))
        .collect()
}

#[test]
fn identity_court_single_landing() {
    let params = AnalysisParams::builder().neighbor_radius(1).build().unwrap();
    let mut analyzer = ServeAnalyzer::new(identity_court(), params).unwrap();
    let stats = analyzer.ingest(&mut straight_serve().into_iter());
    assert_eq!(stats.accepted, 5);
    assert!(stats.rejected.is_empty());

    let record = analyzer.finalize();
    assert_eq!(record.landings.len(), 1);
    assert_eq!(record.landings[0].time, 2.0);

    let rows = record.report.rows();
    assert_eq!(rows.len(), 5);
    assert_eq!(rows[2].event, EventKind::Landing);
    assert_eq!(rows[2].zone, Some(ZoneId::Zone8));
    assert!(rows
        .iter()
        .enumerate()
        .all(|(i, r)| i == 2 || r.event == EventKind::Trajectory));

    let csv = record.report.to_csv_string().unwrap();
    assert_eq!(
        csv,
        "Time (s),X (px),Y (px),Event,Zone\n\
         0.000,450.00,100.00,Trajectory,Zone2\n\
         1.000,450.00,450.00,Trajectory,Zone5\n\
         2.000,450.00,700.00,Landing,Zone8\n\
         3.000,450.00,450.00,Trajectory,Zone5\n\
         4.000,450.00,100.00,Trajectory,Zone2\n"
    );

    let summary = record.report.summary();
    assert_eq!(summary.trajectory_points, 5);
    assert_eq!(summary.landings, 1);
    assert_eq!(summary.landings_per_zone.get(&ZoneId::Zone8), Some(&1));
}

#[test]
fn five_point_serve_flags_only_the_middle_row() {
    let params = AnalysisParams::builder().neighbor_radius(1).build().unwrap();
    let mut analyzer = ServeAnalyzer::new(identity_court(), params).unwrap();
    for (t, y) in [100.0, 300.0, 700.0, 300.0, 100.0].into_iter().enumerate() {
        analyzer
            .push(Observation::new(t as f64, Point2D::new(450.0, y), 0.9))
            .unwrap();
    }
    let record = analyzer.finalize();

    let rows = record.report.rows();
    assert_eq!(rows.len(), 5);
    let events: Vec<EventKind> = rows.iter().map(|r| r.event).collect();
    assert_eq!(
        events,
        vec![
            EventKind::Trajectory,
            EventKind::Trajectory,
            EventKind::Landing,
            EventKind::Trajectory,
            EventKind::Trajectory,
        ]
    );
    assert_eq!(rows[2].time_cell(), "2.000");
    assert_eq!(rows[2].zone, Some(ZoneId::Zone8));
    assert_eq!(rows[2].zone_cell(), "Zone8");

    let csv = record.report.to_csv_string().unwrap();
    assert_eq!(csv.lines().nth(3), Some("2.000,450.00,700.00,Landing,Zone8"));
}

#[test]
fn default_radius_detects_the_same_landing() {
    let mut analyzer = ServeAnalyzer::new(identity_court(), AnalysisParams::default()).unwrap();
    analyzer.ingest(&mut straight_serve().into_iter());
    let record = analyzer.finalize();
    let indices: Vec<usize> = record.landings.iter().map(|l| l.index).collect();
    assert_eq!(indices, vec![2]);
}

#[test]
fn report_is_reproducible() {
    let build = || {
        let mut analyzer =
            ServeAnalyzer::new(identity_court(), AnalysisParams::default()).unwrap();
        analyzer.ingest(&mut straight_serve().into_iter());
        analyzer.finalize()
    };
    let first = build();
    let second = build();
    assert_eq!(first.report, second.report);
    assert_eq!(
        first.report.to_csv_string().unwrap(),
        second.report.to_csv_string().unwrap()
    );
    assert_eq!(first.rebuild_report(), first.report);
}

#[test]
fn out_of_order_observation_leaves_run_intact() {
    let mut analyzer = ServeAnalyzer::new(identity_court(), AnalysisParams::default()).unwrap();
    for obs in straight_serve().into_iter().take(3) {
        analyzer.push(obs).unwrap();
    }
    let err = analyzer
        .push(Observation::new(1.5, Point2D::new(450.0, 800.0), 0.9))
        .unwrap_err();
    assert_eq!(
        err,
        ServeTrackError::OrderingViolation {
            index: 3,
            time: 1.5,
            last_time: 2.0
        }
    );
    assert_eq!(analyzer.trajectory().len(), 3);

    for obs in straight_serve().into_iter().skip(3) {
        analyzer.push(obs).unwrap();
    }
    let record = analyzer.finalize();
    assert_eq!(record.report.rows().len(), 5);
    assert_eq!(record.landings.len(), 1);
}

#[test]
fn too_few_points_means_no_landing() {
    let mut analyzer = ServeAnalyzer::new(identity_court(), AnalysisParams::default()).unwrap();
    analyzer.ingest(&mut straight_serve().into_iter().take(4));
    let record = analyzer.finalize();
    assert!(record.landings.is_empty());
    assert_eq!(record.report.landing_rows().count(), 0);
    assert_eq!(record.report.rows().len(), 4);
}
