//! # Court zones
//!
//! The canonical court is split into a 3×3 grid of equal cells, numbered row-major from the
//! top-left corner:
//!
//! ```text
//!   Zone1 | Zone2 | Zone3
//!   ------+-------+------
//!   Zone4 | Zone5 | Zone6
//!   ------+-------+------
//!   Zone7 | Zone8 | Zone9
//! ```
//!
//! Boundary policy
//! -----------------
//! * The court is the closed rectangle `[0,width]×[0,height]`. A point exactly on the far
//!   edge (`x = width` or `y = height`) is clamped into the last column/row.
//! * Points within [`CourtBounds::edge_tolerance`] of an edge count as on that edge, so
//!   projected court corners classify into the corner zones.
//! * Anything strictly outside on either axis, or non-finite, is **out of bounds** and
//!   classifies as `None`. Out of bounds is ordinary data, never an error.
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{CourtUnit, GRID_DIVISIONS, ZONE_COUNT};
use crate::court::{CourtBounds, Point2D};
use crate::serve_errors::ServeTrackError;

/// One of the nine court zones. Ordering follows the zone number, which is also the
/// lexical order of the labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ZoneId {
    Zone1,
    Zone2,
    Zone3,
    Zone4,
    Zone5,
    Zone6,
    Zone7,
    Zone8,
    Zone9,
}

impl ZoneId {
    pub const ALL: [ZoneId; ZONE_COUNT] = [
        ZoneId::Zone1,
        ZoneId::Zone2,
        ZoneId::Zone3,
        ZoneId::Zone4,
        ZoneId::Zone5,
        ZoneId::Zone6,
        ZoneId::Zone7,
        ZoneId::Zone8,
        ZoneId::Zone9,
    ];

    /// Zone from its 1-based number (`1..=9`).
    pub fn from_index(index: usize) -> Option<ZoneId> {
        index.checked_sub(1).and_then(|i| Self::ALL.get(i)).copied()
    }

    /// Zone from its grid cell, both in `0..3`.
    pub fn from_cell(row: usize, col: usize) -> Option<ZoneId> {
        if row >= GRID_DIVISIONS || col >= GRID_DIVISIONS {
            return None;
        }
        Self::from_index(row * GRID_DIVISIONS + col + 1)
    }

    /// 1-based zone number.
    pub fn index(self) -> usize {
        self as usize + 1
    }

    pub fn row(self) -> usize {
        (self as usize) / GRID_DIVISIONS
    }

    pub fn col(self) -> usize {
        (self as usize) % GRID_DIVISIONS
    }

    pub fn label(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&format!("Zone{}", self.index()))
    }
}

impl FromStr for ZoneId {
    type Err = ServeTrackError;

    /// Parse a `"Zone<n>"` label, `n` in `1..=9`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .strip_prefix("Zone")
            .and_then(|n| n.parse::<usize>().ok())
            .and_then(ZoneId::from_index)
            .ok_or_else(|| ServeTrackError::InvalidZoneLabel(s.to_string()))
    }
}

/// Classifies canonical coordinates into [`ZoneId`]s.
///
/// The classifier is a pure function of its bounds: it holds no mutable state and the same
/// point always lands in the same zone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneClassifier {
    bounds: CourtBounds,
}

impl ZoneClassifier {
    pub fn new(bounds: CourtBounds) -> Self {
        ZoneClassifier { bounds }
    }

    /// Classifier for a square canonical court of side `size`.
    pub fn square(size: CourtUnit) -> Self {
        Self::new(CourtBounds::square(size))
    }

    pub fn bounds(&self) -> CourtBounds {
        self.bounds
    }

    /// Zone containing `p`, or `None` if `p` is outside the court.
    pub fn classify(&self, p: Point2D) -> Option<ZoneId> {
        self.classify_xy(p.x, p.y)
    }

    /// Zone containing `(tx, ty)`, or `None` if the point is outside the court.
    pub fn classify_xy(&self, tx: CourtUnit, ty: CourtUnit) -> Option<ZoneId> {
        if !self.bounds.contains(Point2D::new(tx, ty)) {
            return None;
        }
        let cell_w = self.bounds.width / GRID_DIVISIONS as f64;
        let cell_h = self.bounds.height / GRID_DIVISIONS as f64;

        // Contained points may sit a rounding step outside the edges.
        let p = self.bounds.snap(Point2D::new(tx, ty));
        let last = GRID_DIVISIONS - 1;
        let col = ((p.x / cell_w).floor() as usize).min(last);
        let row = ((p.y / cell_h).floor() as usize).min(last);

        ZoneId::from_cell(row, col)
    }

    /// Canonical rectangle covered by `zone`, as `(top_left, bottom_right)`.
    pub fn zone_bounds(&self, zone: ZoneId) -> (Point2D, Point2D) {
        let cell_w = self.bounds.width / GRID_DIVISIONS as f64;
        let cell_h = self.bounds.height / GRID_DIVISIONS as f64;
        let (row, col) = (zone.row() as f64, zone.col() as f64);
        (
            Point2D::new(col * cell_w, row * cell_h),
            Point2D::new((col + 1.0) * cell_w, (row + 1.0) * cell_h),
        )
    }
}
