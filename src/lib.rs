//! # servetrack
//!
//! Volleyball serve analysis: ball detections in camera pixels are mapped onto a canonical
//! court, classified into a 3×3 zone grid, scanned for landing points and summarized in a
//! tabular report.
//!
//! Modules
//! -----------------
//! * [`court`] – Pixel ↔ canonical court mapping (homography or axis-aligned rectangle).
//! * [`zones`] – 3×3 zone classification of canonical coordinates.
//! * [`observations`] – Detector observations, the observation source seam and a CSV reader.
//! * [`trajectory`] – Time-ordered buffer of accepted ball positions.
//! * [`landing`] – Local-maximum landing detection.
//! * [`report`] – Report rows, summary, CSV output and table display.
//! * [`analysis`] – Run driver and its parameters.
//! * [`serve_errors`] – Crate-wide error type.
pub mod analysis;
pub mod constants;
pub mod court;
pub mod landing;
pub mod observations;
pub mod report;
pub mod serve_errors;
pub mod trajectory;
pub mod zones;

pub use analysis::params::{AnalysisParams, AnalysisParamsBuilder};
pub use analysis::{IngestStats, ServeAnalyzer, ServeRecord};
pub use court::homography::{CourtCorners, CourtTransform};
pub use court::rectangle::RectangleCourt;
pub use court::{CourtDefinition, CourtMapping, CourtProjection, Point2D};
pub use landing::{LandingDetector, LandingEvent};
pub use observations::{Observation, ObservationSource};
pub use report::{CoordinateSpace, EventKind, Report, ReportBuilder, ReportRow, ReportSummary};
pub use serve_errors::ServeTrackError;
pub use trajectory::{AppendOutcome, SkipReason, TrajectoryPoint, TrajectoryStore};
pub use zones::{ZoneClassifier, ZoneId};
