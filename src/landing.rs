//! # Landing detection
//!
//! A landing is where the ball meets the floor. In canonical court space the tracked ball
//! reaches its largest vertical coordinate `ty` at the lowest point of its flight, right
//! before the bounce, so landings are detected as **strict local maxima of `ty`**.
//!
//! Rule
//! -----------------
//! For every index `i` with `radius` points on each side, `i` is a candidate when
//! `ty[i] > ty[j]` for every `j` with `0 < |i - j| ≤ radius`. The first and last `radius`
//! points can never be candidates, so a trajectory of `2 * radius` points or fewer yields no
//! landing at all.
//!
//! A candidate whose canonical position is outside the court rectangle is discarded. This
//! check is done on the coordinates themselves and does not rely on the zone classifier.
//!
//! Limitations
//! -----------------
//! * Plateaus (several consecutive equal maxima) are never detected: no point of the plateau
//!   is *strictly* greater than its neighbors.
//! * The detector runs once over a finalized trajectory; it is not incremental.
use tracing::debug;

use crate::constants::{Seconds, DEFAULT_NEIGHBOR_RADIUS};
use crate::court::{CourtBounds, Point2D};
use crate::serve_errors::ServeTrackError;
use crate::trajectory::TrajectoryStore;
use crate::zones::ZoneId;

/// A trajectory point judged to be a floor contact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LandingEvent {
    /// Index of the originating point in the trajectory.
    pub index: usize,
    pub time: Seconds,
    pub pixel: Point2D,
    pub canonical: Point2D,
    pub zone: Option<ZoneId>,
}

/// Symmetric local-maximum landing detector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LandingDetector {
    radius: usize,
    bounds: CourtBounds,
}

impl LandingDetector {
    /// Arguments
    /// -----------------
    /// * `radius` – Neighbors compared on each side, at least 1.
    /// * `bounds` – Court rectangle used by the bounds filter.
    ///
    /// Errors
    /// ----------
    /// * [`ServeTrackError::InvalidAnalysisParameter`] when `radius == 0`.
    pub fn new(radius: usize, bounds: CourtBounds) -> Result<Self, ServeTrackError> {
        if radius == 0 {
            return Err(ServeTrackError::InvalidAnalysisParameter(
                "landing neighbor radius must be >= 1".into(),
            ));
        }
        Ok(LandingDetector { radius, bounds })
    }

    /// Detector with the default ±2 window.
    pub fn with_default_radius(bounds: CourtBounds) -> Self {
        LandingDetector {
            radius: DEFAULT_NEIGHBOR_RADIUS,
            bounds,
        }
    }

    pub fn radius(&self) -> usize {
        self.radius
    }

    /// Scan the whole trajectory and return the landings in time order.
    pub fn detect(&self, store: &TrajectoryStore) -> Vec<LandingEvent> {
        let n = store.len();
        if n <= self.radius.saturating_mul(2) {
            return Vec::new();
        }

        (self.radius..n - self.radius)
            .filter(|&i| self.is_strict_peak(store, i))
            .filter_map(|i| {
                let p = store.get(i)?;
                if !self.bounds.contains(p.canonical) {
                    debug!(
                        index = i,
                        time = p.time,
                        x = p.canonical.x,
                        y = p.canonical.y,
                        "discarding landing candidate outside the court"
                    );
                    return None;
                }
                Some(LandingEvent {
                    index: i,
                    time: p.time,
                    pixel: p.pixel,
                    canonical: p.canonical,
                    zone: p.zone,
                })
            })
            .collect()
    }

    /// `ty[i]` is strictly above every other point of its window.
    fn is_strict_peak(&self, store: &TrajectoryStore, i: usize) -> bool {
        let window = store.window(i, self.radius);
        let centre = self.radius.min(i);
        let ty = window[centre].canonical.y;
        window
            .iter()
            .enumerate()
            .filter(|&(k, _)| k != centre)
            .all(|(_, p)| ty > p.canonical.y)
    }
}

#[cfg(test)]
mod landing_tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use crate::court::homography::{CourtCorners, CourtTransform};
    use crate::court::CourtMapping;
    use crate::observations::Observation;

    fn store_from_ty(ty: &[f64]) -> TrajectoryStore {
        let corners = CourtCorners::from_flat([0.0, 0.0, 900.0, 0.0, 900.0, 900.0, 0.0, 900.0]);
        let mapping = CourtMapping::Projective(CourtTransform::new(corners).unwrap());
        let mut store = TrajectoryStore::new(mapping, 0.5);
        for (i, &y) in ty.iter().enumerate() {
            store
                .append(Observation::new(i as f64, Point2D::new(450.0, y), 0.9))
                .unwrap();
        }
        store
    }

    fn detector(radius: usize) -> LandingDetector {
        LandingDetector::new(radius, CourtBounds::square(900.0)).unwrap()
    }

    #[test]
    fn two_peaks_detected_exactly() {
        let store = store_from_ty(&[0., 1., 2., 5., 2., 1., 0., 1., 2., 5., 2., 1., 0.]);
        let landings = detector(2).detect(&store);
        let indices: Vec<usize> = landings.iter().map(|l| l.index).collect();
        assert_eq!(indices, vec![3, 9]);
        assert_eq!(landings[0].time, 3.0);
        assert_eq!(landings[1].time, 9.0);
    }

    #[test]
    fn short_trajectories_have_no_landing() {
        for len in 0..=4 {
            let ty: Vec<f64> = (0..len).map(|i| if i == len / 2 { 800.0 } else { 1.0 }).collect();
            let store = store_from_ty(&ty);
            assert!(detector(2).detect(&store).is_empty(), "len = {len}");
        }
    }

    #[test]
    fn edges_are_never_candidates() {
        let store = store_from_ty(&[9.0, 8.0, 1.0, 0.0, 1.0, 8.0, 9.0]);
        assert!(detector(2).detect(&store).is_empty());
    }

    #[test]
    fn plateau_is_not_detected() {
        let store = store_from_ty(&[0., 1., 5., 5., 1., 0., 0.]);
        assert!(detector(1).detect(&store).is_empty());
        assert!(detector(2).detect(&store).is_empty());
    }

    #[test]
    fn peak_must_beat_the_whole_window() {
        // Index 3 beats its direct neighbors but not index 5 (two steps away).
        let store = store_from_ty(&[0., 1., 2., 6., 4., 7., 3., 2., 1.]);
        let r1: Vec<usize> = detector(1).detect(&store).iter().map(|l| l.index).collect();
        let r2: Vec<usize> = detector(2).detect(&store).iter().map(|l| l.index).collect();
        assert_eq!(r1, vec![3, 5]);
        assert_eq!(r2, vec![5]);
    }

    #[test]
    fn out_of_court_peak_is_discarded() {
        let store = store_from_ty(&[100., 300., 950., 300., 100.]);
        assert_eq!(store.get(2).unwrap().zone, None);
        assert!(detector(1).detect(&store).is_empty());

        let wide = LandingDetector::new(1, CourtBounds::new(900.0, 1000.0)).unwrap();
        assert_eq!(wide.detect(&store).len(), 1);
    }

    #[test]
    fn huge_radius_finds_nothing_without_overflow() {
        let huge = detector(usize::MAX);
        assert!(huge.detect(&store_from_ty(&[])).is_empty());
        assert!(huge.detect(&store_from_ty(&[0., 1., 5., 1., 0.])).is_empty());

        let half = detector(usize::MAX / 2 + 1);
        assert!(half.detect(&store_from_ty(&[0., 1., 5., 1., 0.])).is_empty());
    }

    #[test]
    fn landing_on_the_baseline_is_kept() {
        let corners = CourtCorners::from_flat([
            300.0, 100.0, 600.0, 100.0, 800.0, 500.0, 100.0, 500.0,
        ]);
        let mapping = CourtMapping::Projective(CourtTransform::new(corners.clone()).unwrap());
        let mut store = TrajectoryStore::new(mapping, 0.5);
        let bottom_right = corners.bottom_right();
        let path = [
            Point2D::new(700.0, 300.0),
            Point2D::new(750.0, 400.0),
            bottom_right,
            Point2D::new(760.0, 420.0),
            Point2D::new(720.0, 330.0),
        ];
        for (i, p) in path.into_iter().enumerate() {
            store.append(Observation::new(i as f64, p, 0.9)).unwrap();
        }

        let landings = detector(2).detect(&store);
        assert_eq!(landings.len(), 1);
        assert_eq!(landings[0].index, 2);
        assert_abs_diff_eq!(landings[0].canonical.x, 900.0, epsilon = 1e-9);
        assert_abs_diff_eq!(landings[0].canonical.y, 900.0, epsilon = 1e-9);
        assert!(landings[0].canonical.x <= 900.0 && landings[0].canonical.y <= 900.0);
        assert_eq!(landings[0].zone, Some(ZoneId::Zone9));
    }

    #[test]
    fn zero_radius_is_invalid() {
        assert!(LandingDetector::new(0, CourtBounds::square(900.0)).is_err());
        assert_eq!(
            LandingDetector::with_default_radius(CourtBounds::square(900.0)).radius(),
            2
        );
    }
}
