//! # Court geometry: pixel space ↔ canonical court space
//!
//! Every ball position reported by the detector lives in **camera pixel space**. All the
//! analysis (zones, landings, report) happens in **canonical court space**, a top-down
//! rectangle whose origin is the top-left court corner. This module owns the mapping
//! between the two.
//!
//! Court definitions
//! -----------------
//! * [`CourtDefinition::Corners`] – four pixel corners (TL, TR, BR, BL). A full projective
//!   transform ([`homography::CourtTransform`]) maps the quadrilateral onto the canonical
//!   square `[0,S]×[0,S]`, modelling the perspective of an oblique camera.
//! * [`CourtDefinition::Rectangle`] – two opposite pixel corners. Degraded axis-aligned mode
//!   ([`rectangle::RectangleCourt`]): canonical coordinates are `(x - xmin, y - ymin)` and no
//!   homography is involved.
//!
//! Both are resolved into a [`CourtMapping`], which implements [`CourtProjection`].
//!
//! See also
//! ------------
//! * [`crate::zones::ZoneClassifier`] – Discretizes canonical coordinates into zones.
//! * [`crate::landing::LandingDetector`] – Uses [`CourtBounds`] as its bounds filter.
pub mod homography;
pub mod rectangle;

use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::constants::{CourtUnit, EPS, GRID_DIVISIONS};
use crate::serve_errors::ServeTrackError;

use self::homography::{CourtCorners, CourtTransform};
use self::rectangle::RectangleCourt;

/// A 2-D point, either in pixel space or in canonical court space.
///
/// The space is never stored: it is implied by where the point comes from.
/// Crossing from one space to the other always goes through a [`CourtProjection`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub const fn new(x: f64, y: f64) -> Self {
        Point2D { x, y }
    }

    /// Both coordinates are finite (no NaN, no infinity).
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point2D {
    fn from((x, y): (f64, f64)) -> Self {
        Point2D::new(x, y)
    }
}

impl fmt::Display for Point2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match f.precision() {
            Some(p) => write!(f, "({:.*}, {:.*})", p, self.x, p, self.y),
            None => write!(f, "({}, {})", self.x, self.y),
        }
    }
}

/// Extent of the canonical court, anchored at the origin: `[0,width]×[0,height]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CourtBounds {
    pub width: CourtUnit,
    pub height: CourtUnit,
}

impl CourtBounds {
    pub fn new(width: CourtUnit, height: CourtUnit) -> Self {
        CourtBounds { width, height }
    }

    /// Square canonical court of side `size`.
    pub fn square(size: CourtUnit) -> Self {
        CourtBounds::new(size, size)
    }

    /// Per-axis slack accepted around the edges, relative to the court extent.
    ///
    /// Projected court corners and edges come back off by a few ulps; they must still count
    /// as on the court.
    pub fn edge_tolerance(&self) -> (CourtUnit, CourtUnit) {
        (EPS * self.width.max(1.0), EPS * self.height.max(1.0))
    }

    /// Inclusive containment test, with [`Self::edge_tolerance`] slack on every edge.
    /// Non-finite points are never contained.
    pub fn contains(&self, p: Point2D) -> bool {
        let (tx, ty) = self.edge_tolerance();
        p.is_finite()
            && p.x >= -tx
            && p.x <= self.width + tx
            && p.y >= -ty
            && p.y <= self.height + ty
    }

    /// Clamp a contained point onto `[0,width]×[0,height]`; other points are returned as is.
    pub fn snap(&self, p: Point2D) -> Point2D {
        if !self.contains(p) {
            return p;
        }
        // `+ 0.0` turns -0.0 into 0.0.
        Point2D::new(
            p.x.clamp(0.0, self.width) + 0.0,
            p.y.clamp(0.0, self.height) + 0.0,
        )
    }
}

/// Mapping between pixel space and canonical court space.
pub trait CourtProjection {
    /// Map a pixel-space point to canonical court space.
    fn to_canonical(&self, pixel: Point2D) -> Point2D;

    /// Map a canonical point back to pixel space (overlay rendering only).
    fn to_pixel(&self, canonical: Point2D) -> Point2D;

    /// Extent of the canonical court produced by [`Self::to_canonical`].
    fn bounds(&self) -> CourtBounds;
}

/// How the caller describes the court in the camera frame.
#[derive(Debug, Clone, PartialEq)]
pub enum CourtDefinition {
    /// Four corners, ordered top-left, top-right, bottom-right, bottom-left.
    Corners(CourtCorners),
    /// Two opposite corners of an axis-aligned rectangle, in any order.
    Rectangle { a: Point2D, b: Point2D },
}

impl CourtDefinition {
    /// Resolve the definition into a concrete mapping.
    ///
    /// Arguments
    /// -----------------
    /// * `court_size` – Side of the canonical square (projective mode only; the rectangle
    ///   mode keeps the pixel extent of the rectangle).
    ///
    /// Errors
    /// ----------
    /// * [`ServeTrackError::DegenerateGeometry`] if the corners cannot define a mapping.
    pub fn build(&self, court_size: CourtUnit) -> Result<CourtMapping, ServeTrackError> {
        match self {
            CourtDefinition::Corners(corners) => Ok(CourtMapping::Projective(
                CourtTransform::with_size(corners.clone(), court_size)?,
            )),
            CourtDefinition::Rectangle { a, b } => Ok(CourtMapping::Rectangle(
                RectangleCourt::from_opposite_corners(*a, *b)?,
            )),
        }
    }
}

/// A resolved court mapping, either projective or axis-aligned.
#[derive(Debug, Clone)]
pub enum CourtMapping {
    Projective(CourtTransform),
    Rectangle(RectangleCourt),
}

impl CourtProjection for CourtMapping {
    fn to_canonical(&self, pixel: Point2D) -> Point2D {
        match self {
            CourtMapping::Projective(t) => t.to_canonical(pixel),
            CourtMapping::Rectangle(r) => r.to_canonical(pixel),
        }
    }

    fn to_pixel(&self, canonical: Point2D) -> Point2D {
        match self {
            CourtMapping::Projective(t) => t.to_pixel(canonical),
            CourtMapping::Rectangle(r) => r.to_pixel(canonical),
        }
    }

    fn bounds(&self) -> CourtBounds {
        match self {
            CourtMapping::Projective(t) => t.bounds(),
            CourtMapping::Rectangle(r) => r.bounds(),
        }
    }
}

/// Pixel-space segment, used to hand grid lines to an overlay renderer.
pub type PixelSegment = (Point2D, Point2D);

/// Project the interior 3×3 grid lines and the court perimeter back to pixel space.
///
/// Return
/// ----------
/// * Two vertical lines, two horizontal lines, then the four perimeter edges
///   (TL→TR, TR→BR, BR→BL, BL→TL), each as a pixel-space segment.
pub fn grid_lines_in_pixels<P: CourtProjection + ?Sized>(projection: &P) -> Vec<PixelSegment> {
    let CourtBounds { width, height } = projection.bounds();
    let px = |x: CourtUnit, y: CourtUnit| -> Point2D { projection.to_pixel(Point2D::new(x, y)) };

    let mut lines = Vec::with_capacity(8);
    for k in 1..GRID_DIVISIONS {
        let lx = width * k as f64 / GRID_DIVISIONS as f64;
        lines.push((px(lx, 0.0), px(lx, height)));
    }
    for k in 1..GRID_DIVISIONS {
        let ly = height * k as f64 / GRID_DIVISIONS as f64;
        lines.push((px(0.0, ly), px(width, ly)));
    }
    let perimeter = [(0.0, 0.0), (width, 0.0), (width, height), (0.0, height)];
    for (&(x0, y0), &(x1, y1)) in perimeter.iter().circular_tuple_windows() {
        lines.push((px(x0, y0), px(x1, y1)));
    }
    lines
}

#[cfg(test)]
mod court_tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn bounds_are_inclusive_and_reject_non_finite() {
        let b = CourtBounds::square(900.0);
        assert!(b.contains(Point2D::new(0.0, 0.0)));
        assert!(b.contains(Point2D::new(900.0, 900.0)));
        assert!(!b.contains(Point2D::new(-0.001, 10.0)));
        assert!(!b.contains(Point2D::new(10.0, 900.5)));
        assert!(!b.contains(Point2D::new(f64::NAN, 10.0)));
        assert!(!b.contains(Point2D::new(f64::INFINITY, 10.0)));
    }

    #[test]
    fn edges_tolerate_rounding_noise() {
        let b = CourtBounds::square(900.0);
        let noisy = Point2D::new(900.000_000_000_000_1, -9.72e-14);
        assert!(b.contains(noisy));
        let snapped = b.snap(noisy);
        assert_eq!(snapped, Point2D::new(900.0, 0.0));
        assert!(snapped.y.is_sign_positive());
        assert!(b.snap(Point2D::new(-0.0, 450.0)).x.is_sign_positive());

        let outside = Point2D::new(901.0, 10.0);
        assert!(!b.contains(outside));
        assert_eq!(b.snap(outside), outside);
    }

    #[test]
    fn definition_dispatches_to_rectangle_mode() {
        let def = CourtDefinition::Rectangle {
            a: Point2D::new(300.0, 400.0),
            b: Point2D::new(100.0, 100.0),
        };
        let mapping = def.build(900.0).unwrap();
        assert!(matches!(mapping, CourtMapping::Rectangle(_)));
        assert_eq!(mapping.bounds(), CourtBounds::new(200.0, 300.0));

        let c = mapping.to_canonical(Point2D::new(150.0, 250.0));
        assert_abs_diff_eq!(c.x, 50.0);
        assert_abs_diff_eq!(c.y, 150.0);
    }

    #[test]
    fn grid_lines_identity_court() {
        let corners = CourtCorners::new([
            Point2D::new(0.0, 0.0),
            Point2D::new(900.0, 0.0),
            Point2D::new(900.0, 900.0),
            Point2D::new(0.0, 900.0),
        ]);
        let mapping = CourtDefinition::Corners(corners).build(900.0).unwrap();
        let lines = grid_lines_in_pixels(&mapping);
        assert_eq!(lines.len(), 8);

        let (a, b) = lines[0];
        assert_abs_diff_eq!(a.x, 300.0, epsilon = 1e-6);
        assert_abs_diff_eq!(a.y, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(b.x, 300.0, epsilon = 1e-6);
        assert_abs_diff_eq!(b.y, 900.0, epsilon = 1e-6);

        let (h_start, _) = lines[3];
        assert_abs_diff_eq!(h_start.y, 600.0, epsilon = 1e-6);
    }

    #[test]
    fn point_display_honours_precision() {
        let p = Point2D::new(1.23456, -7.0);
        assert_eq!(format!("{p:.2}"), "(1.23, -7.00)");
    }
}
