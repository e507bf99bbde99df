//! Axis-aligned court used when only two opposite corners are known.
//!
//! No perspective is modelled: canonical coordinates are the pixel offsets from the
//! rectangle's top-left corner, and the canonical court keeps the pixel extent of the
//! rectangle (it is generally not square).
use crate::constants::Pixel;
use crate::serve_errors::ServeTrackError;

use super::{CourtBounds, CourtProjection, Point2D};

#[derive(Debug, Clone, PartialEq)]
pub struct RectangleCourt {
    xmin: Pixel,
    ymin: Pixel,
    xmax: Pixel,
    ymax: Pixel,
}

impl RectangleCourt {
    /// Build from any two opposite corners.
    ///
    /// Errors
    /// ----------
    /// * [`ServeTrackError::DegenerateGeometry`] if a corner is non-finite or the rectangle
    ///   has zero width or height.
    pub fn from_opposite_corners(a: Point2D, b: Point2D) -> Result<Self, ServeTrackError> {
        if !a.is_finite() || !b.is_finite() {
            return Err(ServeTrackError::DegenerateGeometry(format!(
                "rectangle corners must be finite, got {a} and {b}"
            )));
        }
        let rect = RectangleCourt {
            xmin: a.x.min(b.x),
            ymin: a.y.min(b.y),
            xmax: a.x.max(b.x),
            ymax: a.y.max(b.y),
        };
        if rect.xmax - rect.xmin <= 0.0 || rect.ymax - rect.ymin <= 0.0 {
            return Err(ServeTrackError::DegenerateGeometry(format!(
                "rectangle spanned by {a} and {b} has zero area"
            )));
        }
        Ok(rect)
    }

    pub fn top_left(&self) -> Point2D {
        Point2D::new(self.xmin, self.ymin)
    }

    pub fn bottom_right(&self) -> Point2D {
        Point2D::new(self.xmax, self.ymax)
    }
}

impl CourtProjection for RectangleCourt {
    fn to_canonical(&self, pixel: Point2D) -> Point2D {
        Point2D::new(pixel.x - self.xmin, pixel.y - self.ymin)
    }

    fn to_pixel(&self, canonical: Point2D) -> Point2D {
        Point2D::new(canonical.x + self.xmin, canonical.y + self.ymin)
    }

    fn bounds(&self) -> CourtBounds {
        CourtBounds::new(self.xmax - self.xmin, self.ymax - self.ymin)
    }
}
