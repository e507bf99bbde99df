//! # Analysis parameters
//!
//! [`AnalysisParams`] gathers every tunable of a serve analysis run: canonical court size,
//! detection confidence threshold, landing window radius, report coordinate space and the
//! optional target zones. Build a validated instance with [`AnalysisParams::builder`].
//!
//! Validation rules
//! -----------------
//! * `court_size > 0` (and finite).
//! * `0 ≤ confidence_threshold ≤ 1`.
//! * `neighbor_radius ≥ 1`.
//!
//! Example
//! -----------------
//! ```rust,no_run
//! use servetrack::analysis::params::AnalysisParams;
//! use servetrack::report::CoordinateSpace;
//! use servetrack::zones::ZoneId;
//!
//! let params = AnalysisParams::builder()
//!     .confidence_threshold(0.3)
//!     .neighbor_radius(3)
//!     .coordinate_space(CoordinateSpace::Canonical)
//!     .target_zones([ZoneId::Zone1, ZoneId::Zone5])
//!     .build()
//!     .unwrap();
//! println!("{params:#}");
//! ```
use std::cmp::Ordering::{Equal, Greater, Less};
use std::fmt;

use itertools::Itertools;

use crate::constants::{
    Confidence, CourtUnit, COURT_SIZE, DEFAULT_CONFIDENCE_THRESHOLD, DEFAULT_NEIGHBOR_RADIUS,
};
use crate::report::CoordinateSpace;
use crate::serve_errors::ServeTrackError;
use crate::zones::ZoneId;

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisParams {
    /// Side of the canonical square in projective mode.
    pub court_size: CourtUnit,
    /// Detections must be strictly above this confidence to enter the trajectory.
    pub confidence_threshold: Confidence,
    /// Neighbors compared on each side by the landing detector.
    pub neighbor_radius: usize,
    pub coordinate_space: CoordinateSpace,
    pub target_zones: Vec<ZoneId>,
}

impl AnalysisParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> AnalysisParamsBuilder {
        AnalysisParamsBuilder::new()
    }
}

impl Default for AnalysisParams {
    fn default() -> Self {
        AnalysisParams {
            court_size: COURT_SIZE,
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            neighbor_radius: DEFAULT_NEIGHBOR_RADIUS,
            coordinate_space: CoordinateSpace::Pixel,
            target_zones: Vec::new(),
        }
    }
}

/// Builder for [`AnalysisParams`], with validation.
#[derive(Debug, Clone, Default)]
pub struct AnalysisParamsBuilder {
    params: AnalysisParams,
}

impl AnalysisParamsBuilder {
    pub fn new() -> Self {
        Self {
            params: AnalysisParams::default(),
        }
    }

    pub fn court_size(mut self, v: CourtUnit) -> Self {
        self.params.court_size = v;
        self
    }
    pub fn confidence_threshold(mut self, v: Confidence) -> Self {
        self.params.confidence_threshold = v;
        self
    }
    pub fn neighbor_radius(mut self, v: usize) -> Self {
        self.params.neighbor_radius = v;
        self
    }
    pub fn coordinate_space(mut self, v: CoordinateSpace) -> Self {
        self.params.coordinate_space = v;
        self
    }
    /// Zones counted as hits in the report summary. Duplicates are removed.
    pub fn target_zones<I: IntoIterator<Item = ZoneId>>(mut self, zones: I) -> Self {
        self.params.target_zones = zones.into_iter().sorted().dedup().collect();
        self
    }

    /// Return true iff x > 0.0 and comparable (i.e., not NaN).
    #[inline]
    fn gt0(x: f64) -> bool {
        x.partial_cmp(&0.0) == Some(Greater)
    }

    /// Return true iff x >= 0.0 and comparable (i.e., not NaN).
    #[inline]
    fn ge0(x: f64) -> bool {
        matches!(x.partial_cmp(&0.0), Some(Greater) | Some(Equal))
    }

    /// Return true iff a <= b and comparable (i.e., not NaN).
    #[inline]
    fn le(a: f64, b: f64) -> bool {
        matches!(a.partial_cmp(&b), Some(Less) | Some(Equal))
    }

    /// Finalize the builder.
    ///
    /// Errors
    /// ----------
    /// * [`ServeTrackError::InvalidAnalysisParameter`] naming the first rule that fails.
    pub fn build(self) -> Result<AnalysisParams, ServeTrackError> {
        let p = &self.params;

        if !Self::gt0(p.court_size) || !p.court_size.is_finite() {
            return Err(ServeTrackError::InvalidAnalysisParameter(
                "court_size must be a finite value > 0".into(),
            ));
        }
        if !Self::ge0(p.confidence_threshold) || !Self::le(p.confidence_threshold, 1.0) {
            return Err(ServeTrackError::InvalidAnalysisParameter(
                "confidence_threshold must be in [0, 1]".into(),
            ));
        }
        if p.neighbor_radius == 0 {
            return Err(ServeTrackError::InvalidAnalysisParameter(
                "neighbor_radius must be >= 1".into(),
            ));
        }

        Ok(self.params)
    }
}

impl fmt::Display for AnalysisParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let targets = if self.target_zones.is_empty() {
            "none".to_string()
        } else {
            self.target_zones.iter().join(",")
        };

        if f.alternate() {
            const PARAM_COL: usize = 40;
            writeln!(f, "Serve Analysis Parameters")?;
            writeln!(f, "-------------------------")?;

            macro_rules! line {
                ($fmt:expr, $val:expr, $comment:expr) => {{
                    let s = format!($fmt, $val);
                    let pad = if s.len() < PARAM_COL {
                        " ".repeat(PARAM_COL - s.len())
                    } else {
                        " ".to_string()
                    };
                    writeln!(f, "  {}{}# {}", s, pad, $comment)
                }};
            }

            writeln!(f, "[Court]")?;
            line!(
                "court_size           = {:.1}",
                self.court_size,
                "Side of the canonical square"
            )?;

            writeln!(f, "\n[Detection]")?;
            line!(
                "confidence_threshold = {:.2}",
                self.confidence_threshold,
                "Minimum (exclusive) detector confidence"
            )?;
            line!(
                "neighbor_radius      = {}",
                self.neighbor_radius,
                "Landing window half-width"
            )?;

            writeln!(f, "\n[Report]")?;
            line!(
                "coordinate_space     = {:?}",
                self.coordinate_space,
                "Space of the X/Y columns"
            )?;
            line!("target_zones         = {}", targets, "Zones counted as hits")?;
            Ok(())
        } else {
            write!(
                f,
                "AnalysisParams(court_size={:.1}, confidence>{:.2}, radius={}, space={:?}, targets={})",
                self.court_size,
                self.confidence_threshold,
                self.neighbor_radius,
                self.coordinate_space,
                targets,
            )
        }
    }
}

#[cfg(test)]
mod params_tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let p = AnalysisParams::builder().build().unwrap();
        assert_eq!(p, AnalysisParams::default());
        assert_eq!(p.court_size, 900.0);
        assert_eq!(p.confidence_threshold, 0.5);
        assert_eq!(p.neighbor_radius, 2);
        assert_eq!(p.coordinate_space, CoordinateSpace::Pixel);
        assert!(p.target_zones.is_empty());
    }

    #[test]
    fn invalid_values_are_rejected() {
        let cases = [
            AnalysisParams::builder().court_size(0.0),
            AnalysisParams::builder().court_size(f64::NAN),
            AnalysisParams::builder().court_size(f64::INFINITY),
            AnalysisParams::builder().confidence_threshold(-0.1),
            AnalysisParams::builder().confidence_threshold(1.5),
            AnalysisParams::builder().confidence_threshold(f64::NAN),
            AnalysisParams::builder().neighbor_radius(0),
        ];
        for builder in cases {
            let err = builder.clone().build().unwrap_err();
            assert!(
                matches!(err, ServeTrackError::InvalidAnalysisParameter(_)),
                "{builder:?}"
            );
        }
    }

    #[test]
    fn target_zones_are_sorted_and_deduplicated() {
        let p = AnalysisParams::builder()
            .target_zones([ZoneId::Zone9, ZoneId::Zone2, ZoneId::Zone9])
            .build()
            .unwrap();
        assert_eq!(p.target_zones, vec![ZoneId::Zone2, ZoneId::Zone9]);
    }

    #[test]
    fn display_modes() {
        let p = AnalysisParams::builder()
            .target_zones([ZoneId::Zone5])
            .build()
            .unwrap();
        assert_eq!(
            p.to_string(),
            "AnalysisParams(court_size=900.0, confidence>0.50, radius=2, space=Pixel, targets=Zone5)"
        );
        let long = format!("{p:#}");
        assert!(long.starts_with("Serve Analysis Parameters"));
        assert!(long.contains("neighbor_radius      = 2"));
        assert!(long.contains("target_zones         = Zone5"));
    }
}
