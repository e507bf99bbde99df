//! # Projective court transform
//!
//! [`CourtTransform`] holds the homography `H` that maps the court quadrilateral seen by an
//! oblique camera onto the canonical top-down square `[0,S]×[0,S]`, and its inverse `H⁻¹`.
//!
//! Corner correspondence
//! -----------------
//! ```text
//!   pixel space (oblique)            canonical space (top-down)
//!
//!        TL ______ TR                 (0,0) ________ (S,0)
//!          /      \                        |        |
//!         /        \          H            |        |
//!        /          \      -------->       |        |
//!     BL /____________\ BR            (0,S) |________| (S,S)
//! ```
//!
//! Estimation
//! -----------------
//! The eight unknowns of `H` (with `h33` fixed by scale) are solved from the four point
//! correspondences with an LU decomposition of the 8×8 direct linear transform system.
//! The pixel corners are first normalized (centroid at the origin, mean distance √2)
//! and the canonical targets scaled to the unit square, which keeps the system well
//! conditioned for high resolution frames. The normalization is folded back into `H`.
//!
//! Perspective foreshortening is fully modelled: equal pixel steps near the camera and far
//! from it map to different canonical distances. This is **not** an affine approximation.
use nalgebra::{Matrix3, SMatrix, SVector, Vector3};

use crate::constants::{CourtUnit, COURT_SIZE, EPS, MIN_HOMOGENEOUS_W};
use crate::serve_errors::ServeTrackError;

use super::{CourtBounds, CourtProjection, Point2D};

/// The four court corners in camera pixel space.
///
/// Order is **top-left, top-right, bottom-right, bottom-left**; the order decides which
/// canonical corner each point lands on.
#[derive(Debug, Clone, PartialEq)]
pub struct CourtCorners([Point2D; 4]);

impl CourtCorners {
    pub fn new(corners: [Point2D; 4]) -> Self {
        CourtCorners(corners)
    }

    /// Build from a slice, failing unless it holds exactly four points.
    ///
    /// Errors
    /// ----------
    /// * [`ServeTrackError::DegenerateGeometry`] when `points.len() != 4`.
    pub fn from_slice(points: &[Point2D]) -> Result<Self, ServeTrackError> {
        let corners: [Point2D; 4] = points.try_into().map_err(|_| {
            ServeTrackError::DegenerateGeometry(format!(
                "expected exactly 4 court corners, got {}",
                points.len()
            ))
        })?;
        Ok(CourtCorners(corners))
    }

    /// Build from the flat `TLx TLy TRx TRy BRx BRy BLx BLy` layout.
    pub fn from_flat(values: [f64; 8]) -> Self {
        CourtCorners([
            Point2D::new(values[0], values[1]),
            Point2D::new(values[2], values[3]),
            Point2D::new(values[4], values[5]),
            Point2D::new(values[6], values[7]),
        ])
    }

    pub fn top_left(&self) -> Point2D {
        self.0[0]
    }
    pub fn top_right(&self) -> Point2D {
        self.0[1]
    }
    pub fn bottom_right(&self) -> Point2D {
        self.0[2]
    }
    pub fn bottom_left(&self) -> Point2D {
        self.0[3]
    }

    pub fn as_array(&self) -> &[Point2D; 4] {
        &self.0
    }

    /// Reject non-finite, coincident or collinear corner sets.
    ///
    /// Every triple of corners must span a triangle whose doubled area is not negligible
    /// with respect to the squared size of that triple.
    fn check_non_degenerate(&self) -> Result<(), ServeTrackError> {
        if let Some(i) = self.0.iter().position(|p| !p.is_finite()) {
            return Err(ServeTrackError::DegenerateGeometry(format!(
                "corner #{i} is not finite: {}",
                self.0[i]
            )));
        }

        const TRIPLES: [[usize; 3]; 4] = [[0, 1, 2], [0, 1, 3], [0, 2, 3], [1, 2, 3]];
        for [i, j, k] in TRIPLES {
            let (a, b, c) = (self.0[i], self.0[j], self.0[k]);
            let (abx, aby) = (b.x - a.x, b.y - a.y);
            let (acx, acy) = (c.x - a.x, c.y - a.y);
            let (bcx, bcy) = (c.x - b.x, c.y - b.y);

            let cross = abx * acy - aby * acx;
            let scale = (abx * abx + aby * aby)
                .max(acx * acx + acy * acy)
                .max(bcx * bcx + bcy * bcy);

            if scale == 0.0 || cross.abs() <= EPS * scale {
                return Err(ServeTrackError::DegenerateGeometry(format!(
                    "corners #{i}, #{j} and #{k} are collinear or coincident"
                )));
            }
        }
        Ok(())
    }
}

/// Projective mapping between camera pixels and the canonical court square.
///
/// Fields
/// -----------------
/// * `corners` – Pixel corners used to build the transform.
/// * `size` – Side `S` of the canonical square.
/// * `h` – Pixel → canonical homography.
/// * `h_inv` – Canonical → pixel homography.
#[derive(Debug, Clone)]
pub struct CourtTransform {
    corners: CourtCorners,
    size: CourtUnit,
    h: Matrix3<f64>,
    h_inv: Matrix3<f64>,
}

impl CourtTransform {
    /// Build the transform onto the default canonical square ([`COURT_SIZE`]).
    pub fn new(corners: CourtCorners) -> Result<Self, ServeTrackError> {
        Self::with_size(corners, COURT_SIZE)
    }

    /// Build the transform onto a canonical square of side `size`.
    ///
    /// Arguments
    /// -----------------
    /// * `corners` – TL, TR, BR, BL in pixel space.
    /// * `size` – Side of the canonical square, strictly positive.
    ///
    /// Return
    /// ----------
    /// * A fully initialized transform; nothing is built on failure.
    ///
    /// Errors
    /// ----------
    /// * [`ServeTrackError::DegenerateGeometry`] if the corners are non-finite, coincident or
    ///   collinear, if the linear system is singular, or if `H` cannot be inverted.
    pub fn with_size(corners: CourtCorners, size: CourtUnit) -> Result<Self, ServeTrackError> {
        if !(size.is_finite() && size > 0.0) {
            return Err(ServeTrackError::DegenerateGeometry(format!(
                "canonical court size must be positive, got {size}"
            )));
        }
        corners.check_non_degenerate()?;

        let normalize = normalization_matrix(corners.as_array());
        let unit_square = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)];

        let mut a = SMatrix::<f64, 8, 8>::zeros();
        let mut b = SVector::<f64, 8>::zeros();
        for (k, (corner, &(u, v))) in corners.as_array().iter().zip(&unit_square).enumerate() {
            let p = normalize * Vector3::new(corner.x, corner.y, 1.0);
            let (x, y) = (p.x, p.y);
            let r = 2 * k;

            a[(r, 0)] = x;
            a[(r, 1)] = y;
            a[(r, 2)] = 1.0;
            a[(r, 6)] = -u * x;
            a[(r, 7)] = -u * y;
            b[r] = u;

            a[(r + 1, 3)] = x;
            a[(r + 1, 4)] = y;
            a[(r + 1, 5)] = 1.0;
            a[(r + 1, 6)] = -v * x;
            a[(r + 1, 7)] = -v * y;
            b[r + 1] = v;
        }

        let sol = a.lu().solve(&b).ok_or_else(|| {
            ServeTrackError::DegenerateGeometry(
                "corner correspondences do not determine a homography".into(),
            )
        })?;

        let h_unit = Matrix3::new(
            sol[0], sol[1], sol[2], sol[3], sol[4], sol[5], sol[6], sol[7], 1.0,
        );
        let denormalize = Matrix3::new(size, 0.0, 0.0, 0.0, size, 0.0, 0.0, 0.0, 1.0);
        let h = denormalize * h_unit * normalize;

        let h_inv = h.try_inverse().ok_or_else(|| {
            ServeTrackError::DegenerateGeometry("court homography is not invertible".into())
        })?;

        Ok(CourtTransform {
            corners,
            size,
            h,
            h_inv,
        })
    }

    pub fn corners(&self) -> &CourtCorners {
        &self.corners
    }

    pub fn canonical_size(&self) -> CourtUnit {
        self.size
    }

    /// Pixel → canonical homography.
    pub fn matrix(&self) -> &Matrix3<f64> {
        &self.h
    }

    /// Canonical → pixel homography.
    pub fn inverse_matrix(&self) -> &Matrix3<f64> {
        &self.h_inv
    }
}

impl CourtProjection for CourtTransform {
    fn to_canonical(&self, pixel: Point2D) -> Point2D {
        apply_homography(&self.h, pixel)
    }

    fn to_pixel(&self, canonical: Point2D) -> Point2D {
        apply_homography(&self.h_inv, canonical)
    }

    fn bounds(&self) -> CourtBounds {
        CourtBounds::square(self.size)
    }
}

/// Apply a homography to a single point, with perspective division.
///
/// Points on the vanishing line (`w ≈ 0`) have no finite image; they come back as NaN so
/// that every bounds check downstream rejects them.
fn apply_homography(m: &Matrix3<f64>, p: Point2D) -> Point2D {
    let q = m * Vector3::new(p.x, p.y, 1.0);
    if q.z.abs() < MIN_HOMOGENEOUS_W {
        return Point2D::new(f64::NAN, f64::NAN);
    }
    Point2D::new(q.x / q.z, q.y / q.z)
}

/// Similarity moving the corners' centroid to the origin with mean distance √2.
fn normalization_matrix(points: &[Point2D; 4]) -> Matrix3<f64> {
    let n = points.len() as f64;
    let cx = points.iter().map(|p| p.x).sum::<f64>() / n;
    let cy = points.iter().map(|p| p.y).sum::<f64>() / n;
    let mean_dist = points
        .iter()
        .map(|p| ((p.x - cx).powi(2) + (p.y - cy).powi(2)).sqrt())
        .sum::<f64>()
        / n;
    let s = std::f64::consts::SQRT_2 / mean_dist;
    Matrix3::new(s, 0.0, -s * cx, 0.0, s, -s * cy, 0.0, 0.0, 1.0)
}
