//! # Serve analysis driver
//!
//! [`ServeAnalyzer`] wires the pipeline of one serve together:
//!
//! ```text
//! Observation ──► TrajectoryStore (court mapping + zone classifier)
//!                        │ finalize
//!                        ▼
//!                 LandingDetector ──► ReportBuilder ──► ServeRecord
//! ```
//!
//! Observations are pushed one at a time ([`ServeAnalyzer::push`]) or drained from any
//! [`ObservationSource`] ([`ServeAnalyzer::ingest`]). Finalizing consumes the analyzer, runs
//! the landing detector once over the frozen trajectory and builds the report.
//!
//! Example
//! -----------------
//! ```rust,no_run
//! use servetrack::analysis::{params::AnalysisParams, ServeAnalyzer};
//! use servetrack::court::{homography::CourtCorners, CourtDefinition};
//! use servetrack::observations::csv_reader::read_observations_file;
//! use camino::Utf8Path;
//!
//! let corners = CourtCorners::from_flat([312.0, 140.0, 968.0, 142.0, 1180.0, 690.0, 95.0, 684.0]);
//! let mut analyzer =
//!     ServeAnalyzer::new(CourtDefinition::Corners(corners), AnalysisParams::default()).unwrap();
//!
//! let observations = read_observations_file(Utf8Path::new("serve_01.csv")).unwrap();
//! let stats = analyzer.ingest(&mut observations.into_iter());
//! println!("{stats}");
//!
//! let record = analyzer.finalize();
//! println!("{:#}", record.report);
//! record.report.save_csv(Utf8Path::new("serve_01_report.csv")).unwrap();
//! ```
pub mod params;

use std::fmt;

use tracing::info;

use crate::court::{CourtDefinition, CourtProjection};
use crate::landing::{LandingDetector, LandingEvent};
use crate::observations::{Observation, ObservationSource};
use crate::report::{Report, ReportBuilder};
use crate::serve_errors::ServeTrackError;
use crate::trajectory::{AppendOutcome, TrajectoryStore};

use self::params::AnalysisParams;

/// Per-run counters returned by [`ServeAnalyzer::ingest`].
#[derive(Debug, Default)]
pub struct IngestStats {
    pub accepted: usize,
    pub skipped: usize,
    /// Rejected observations, in arrival order. Each error carries the observation index.
    pub rejected: Vec<ServeTrackError>,
}

impl IngestStats {
    /// Total number of observations drained from the source.
    pub fn total(&self) -> usize {
        self.accepted + self.skipped + self.rejected.len()
    }
}

impl fmt::Display for IngestStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "IngestStats(total={}, accepted={}, skipped={}, rejected={})",
            self.total(),
            self.accepted,
            self.skipped,
            self.rejected.len()
        )
    }
}

/// Frozen outcome of one analysis run.
#[derive(Debug, Clone)]
pub struct ServeRecord {
    pub trajectory: TrajectoryStore,
    pub landings: Vec<LandingEvent>,
    pub report: Report,
    builder: ReportBuilder,
}

impl ServeRecord {
    /// Build the report again from the frozen trajectory and landings.
    ///
    /// The result is always equal to [`ServeRecord::report`].
    pub fn rebuild_report(&self) -> Report {
        self.builder.build(&self.trajectory, &self.landings)
    }
}

/// Stateful driver of one serve analysis. Owns its trajectory exclusively.
#[derive(Debug)]
pub struct ServeAnalyzer {
    params: AnalysisParams,
    store: TrajectoryStore,
    detector: LandingDetector,
}

impl ServeAnalyzer {
    /// Resolve the court and prepare an empty run.
    ///
    /// Errors
    /// ----------
    /// * [`ServeTrackError::DegenerateGeometry`] if the court definition is unusable.
    /// * [`ServeTrackError::InvalidAnalysisParameter`] if `params.neighbor_radius == 0`.
    pub fn new(court: CourtDefinition, params: AnalysisParams) -> Result<Self, ServeTrackError> {
        let mapping = court.build(params.court_size)?;
        let detector = LandingDetector::new(params.neighbor_radius, mapping.bounds())?;
        let store = TrajectoryStore::new(mapping, params.confidence_threshold);
        Ok(ServeAnalyzer {
            params,
            store,
            detector,
        })
    }

    /// Offer one observation. See [`TrajectoryStore::append`].
    pub fn push(&mut self, obs: Observation) -> Result<AppendOutcome, ServeTrackError> {
        self.store.append(obs)
    }

    /// Drain `source` into the trajectory.
    ///
    /// Rejected observations are collected into [`IngestStats::rejected`] and the run goes
    /// on; a bad frame never aborts ingestion.
    pub fn ingest<S: ObservationSource + ?Sized>(&mut self, source: &mut S) -> IngestStats {
        let mut stats = IngestStats::default();
        while let Some(obs) = source.next_observation() {
            match self.push(obs) {
                Ok(AppendOutcome::Accepted(_)) => stats.accepted += 1,
                Ok(AppendOutcome::Skipped(_)) => stats.skipped += 1,
                Err(e) => stats.rejected.push(e),
            }
        }
        stats
    }

    pub fn params(&self) -> &AnalysisParams {
        &self.params
    }

    /// Trajectory accumulated so far.
    pub fn trajectory(&self) -> &TrajectoryStore {
        &self.store
    }

    /// Close the run: detect landings and build the report.
    pub fn finalize(self) -> ServeRecord {
        let landings = self.detector.detect(&self.store);
        let builder = ReportBuilder::new()
            .coordinate_space(self.params.coordinate_space)
            .target_zones(self.params.target_zones.iter().copied());
        let report = builder.build(&self.store, &landings);

        info!(
            observations = self.store.observations_received(),
            points = self.store.len(),
            landings = landings.len(),
            "serve analysis finalized"
        );

        ServeRecord {
            trajectory: self.store,
            landings,
            report,
            builder,
        }
    }
}
