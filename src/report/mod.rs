//! # Serve report
//!
//! The report is the final, immutable product of an analysis run: one row per trajectory
//! point and a summary of counts per zone.
//!
//! Rows
//! -----------------
//! Columns, in order: `Time (s)` | `X (px)` | `Y (px)` | `Event` | `Zone`.
//!
//! * Times are rendered with 3 decimals, coordinates with 2.
//! * `Event` is `Landing` when the point's time is **exactly** the time of a detected landing
//!   (landings are taken from trajectory points, so their timestamps are the same values),
//!   `Trajectory` otherwise.
//! * `Zone` is the zone label, or `-` for out-of-bounds points.
//! * With [`CoordinateSpace::Canonical`] the coordinate columns carry canonical court
//!   coordinates and are titled `X (court)` / `Y (court)`.
//!
//! Summary
//! -----------------
//! * Number of trajectory points and of landings.
//! * Landings per zone, sorted by zone label.
//! * Trajectory points per zone and out-of-bounds point count.
//! * Landings inside the configured target zones.
//!
//! Output
//! -----------------
//! * [`csv_writer`] – CSV serialization (`write_csv`, `to_csv_string`, `save_csv`).
//! * [`display`] – Human-readable table via `comfy-table`.
//!
//! Identical inputs always produce byte-identical rows.
pub mod csv_writer;
pub mod display;

use std::collections::BTreeMap;
use std::fmt;

use itertools::Itertools;

use crate::constants::{CourtUnit, Seconds, COORD_DECIMALS, NO_ZONE_LABEL, TIME_DECIMALS};
use crate::landing::LandingEvent;
use crate::trajectory::TrajectoryStore;
use crate::zones::ZoneId;

/// Coordinate space written in the `X` / `Y` columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoordinateSpace {
    /// Detector pixel coordinates.
    #[default]
    Pixel,
    /// Canonical court coordinates.
    Canonical,
}

impl CoordinateSpace {
    /// Titles of the two coordinate columns.
    pub fn column_titles(self) -> (&'static str, &'static str) {
        match self {
            CoordinateSpace::Pixel => ("X (px)", "Y (px)"),
            CoordinateSpace::Canonical => ("X (court)", "Y (court)"),
        }
    }
}

/// Kind of a report row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Trajectory,
    Landing,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::Trajectory => f.pad("Trajectory"),
            EventKind::Landing => f.pad("Landing"),
        }
    }
}

/// One output row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReportRow {
    pub time: Seconds,
    pub x: CourtUnit,
    pub y: CourtUnit,
    pub event: EventKind,
    pub zone: Option<ZoneId>,
}

impl ReportRow {
    pub fn time_cell(&self) -> String {
        format!("{:.*}", TIME_DECIMALS, self.time)
    }

    pub fn x_cell(&self) -> String {
        format!("{:.*}", COORD_DECIMALS, self.x)
    }

    pub fn y_cell(&self) -> String {
        format!("{:.*}", COORD_DECIMALS, self.y)
    }

    pub fn zone_cell(&self) -> String {
        self.zone
            .map_or_else(|| NO_ZONE_LABEL.to_string(), |z| z.to_string())
    }

    /// The five rendered cells, in column order.
    pub fn cells(&self) -> [String; 5] {
        [
            self.time_cell(),
            self.x_cell(),
            self.y_cell(),
            self.event.to_string(),
            self.zone_cell(),
        ]
    }
}

/// Aggregate statistics of one serve.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReportSummary {
    pub trajectory_points: usize,
    pub landings: usize,
    /// Landings per zone, ascending by zone label. Zones without landings are absent.
    pub landings_per_zone: BTreeMap<ZoneId, usize>,
    /// Trajectory points per zone, ascending by zone label.
    pub points_per_zone: BTreeMap<ZoneId, usize>,
    /// Trajectory points outside the court.
    pub out_of_bounds_points: usize,
    /// Target zones, sorted and deduplicated.
    pub target_zones: Vec<ZoneId>,
    /// Landings inside one of the target zones.
    pub target_hits: usize,
}

impl ReportSummary {
    /// `true` if at least one landing hit a target zone.
    pub fn hit_target(&self) -> bool {
        self.target_hits > 0
    }
}

impl fmt::Display for ReportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let zone_counts = |m: &BTreeMap<ZoneId, usize>| {
            m.iter().map(|(z, n)| format!("{z}={n}")).join(", ")
        };

        if f.alternate() {
            writeln!(f, "Serve summary")?;
            writeln!(f, "-------------")?;
            writeln!(f, "  trajectory points : {}", self.trajectory_points)?;
            writeln!(f, "  out of bounds     : {}", self.out_of_bounds_points)?;
            writeln!(f, "  landings          : {}", self.landings)?;
            writeln!(f, "[Landings per zone]")?;
            if self.landings_per_zone.is_empty() {
                writeln!(f, "  (none)")?;
            }
            for (zone, count) in &self.landings_per_zone {
                writeln!(f, "  {zone:<6} : {count}")?;
            }
            if !self.target_zones.is_empty() {
                writeln!(f, "[Targets]")?;
                writeln!(
                    f,
                    "  zones : {}",
                    self.target_zones.iter().map(ZoneId::to_string).join(", ")
                )?;
                writeln!(f, "  hits  : {}", self.target_hits)?;
            }
            Ok(())
        } else {
            write!(
                f,
                "ReportSummary(points={}, landings={}, landings_per_zone=[{}], target_hits={})",
                self.trajectory_points,
                self.landings,
                zone_counts(&self.landings_per_zone),
                self.target_hits,
            )
        }
    }
}

/// Final report of one serve. Built once by [`ReportBuilder`], never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    coordinate_space: CoordinateSpace,
    rows: Vec<ReportRow>,
    summary: ReportSummary,
}

impl Report {
    pub fn rows(&self) -> &[ReportRow] {
        &self.rows
    }

    pub fn summary(&self) -> &ReportSummary {
        &self.summary
    }

    pub fn coordinate_space(&self) -> CoordinateSpace {
        self.coordinate_space
    }

    /// Column titles, in output order.
    pub fn headers(&self) -> [&'static str; 5] {
        let (x, y) = self.coordinate_space.column_titles();
        ["Time (s)", x, y, "Event", "Zone"]
    }

    /// Rows flagged as landings.
    pub fn landing_rows(&self) -> impl Iterator<Item = &ReportRow> {
        self.rows.iter().filter(|r| r.event == EventKind::Landing)
    }
}

/// Merges a finalized trajectory and its landings into a [`Report`].
#[derive(Debug, Clone, Default)]
pub struct ReportBuilder {
    coordinate_space: CoordinateSpace,
    target_zones: Vec<ZoneId>,
}

impl ReportBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn coordinate_space(mut self, space: CoordinateSpace) -> Self {
        self.coordinate_space = space;
        self
    }

    pub fn target_zones<I: IntoIterator<Item = ZoneId>>(mut self, zones: I) -> Self {
        self.target_zones = zones.into_iter().sorted().dedup().collect();
        self
    }

    /// Build the report.
    ///
    /// Arguments
    /// -----------------
    /// * `store` – Finalized trajectory.
    /// * `landings` – Landings detected on that trajectory.
    pub fn build(&self, store: &TrajectoryStore, landings: &[LandingEvent]) -> Report {
        let rows: Vec<ReportRow> = store
            .iter()
            .map(|p| {
                let coords = match self.coordinate_space {
                    CoordinateSpace::Pixel => p.pixel,
                    CoordinateSpace::Canonical => p.canonical,
                };
                let event = if landings.iter().any(|l| l.time == p.time) {
                    EventKind::Landing
                } else {
                    EventKind::Trajectory
                };
                ReportRow {
                    time: p.time,
                    x: coords.x,
                    y: coords.y,
                    event,
                    zone: p.zone,
                }
            })
            .collect();

        let landings_per_zone: BTreeMap<ZoneId, usize> =
            landings.iter().filter_map(|l| l.zone).counts().into_iter().collect();
        let points_per_zone: BTreeMap<ZoneId, usize> =
            store.iter().filter_map(|p| p.zone).counts().into_iter().collect();
        let target_hits = landings
            .iter()
            .filter(|l| l.zone.is_some_and(|z| self.target_zones.contains(&z)))
            .count();

        let summary = ReportSummary {
            trajectory_points: store.len(),
            landings: landings.len(),
            landings_per_zone,
            points_per_zone,
            out_of_bounds_points: store.iter().filter(|p| p.zone.is_none()).count(),
            target_zones: self.target_zones.clone(),
            target_hits,
        };

        Report {
            coordinate_space: self.coordinate_space,
            rows,
            summary,
        }
    }
}
