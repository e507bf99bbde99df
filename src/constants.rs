//! # Constants and type definitions for servetrack
//!
//! This module centralizes the **geometric defaults**, **detection thresholds**, and
//! **common type aliases** used throughout the crate.
//!
//! ## Overview
//!
//! - Canonical court geometry (side length, grid subdivision)
//! - Landing detection window
//! - Observation acceptance threshold
//! - Numerical tolerances
//! - Core type aliases shared by the court, trajectory and report modules

// -------------------------------------------------------------------------------------------------
// Canonical court geometry
// -------------------------------------------------------------------------------------------------

/// Side length of the canonical top-down court square (one 9 m × 9 m half-court).
pub const COURT_SIZE: CourtUnit = 900.0;

/// Number of zone columns and rows in the grid (3 × 3 = 9 zones).
pub const GRID_DIVISIONS: usize = 3;

/// Total number of zones on the canonical court.
pub const ZONE_COUNT: usize = GRID_DIVISIONS * GRID_DIVISIONS;

// -------------------------------------------------------------------------------------------------
// Detection and acceptance
// -------------------------------------------------------------------------------------------------

/// Number of neighbors compared on each side of a landing candidate.
pub const DEFAULT_NEIGHBOR_RADIUS: usize = 2;

/// An observation is accepted only when its confidence is strictly above this value.
pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.5;

// -------------------------------------------------------------------------------------------------
// Numerics
// -------------------------------------------------------------------------------------------------

/// Relative tolerance used for collinearity and singularity checks.
pub const EPS: f64 = 1e-9;

/// Smallest homogeneous scale accepted when projecting a point.
pub const MIN_HOMOGENEOUS_W: f64 = 1e-12;

// -------------------------------------------------------------------------------------------------
// Report formatting
// -------------------------------------------------------------------------------------------------

/// Fractional digits of the `Time (s)` column.
pub const TIME_DECIMALS: usize = 3;

/// Fractional digits of the coordinate columns.
pub const COORD_DECIMALS: usize = 2;

/// Placeholder written in the `Zone` column for out-of-bounds points.
pub const NO_ZONE_LABEL: &str = "-";

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Time since the start of the clip, in seconds
pub type Seconds = f64;
/// Coordinate in camera pixel space
pub type Pixel = f64;
/// Coordinate in canonical court space
pub type CourtUnit = f64;
/// Detector confidence in `[0, 1]`
pub type Confidence = f64;
