//! # Trajectory buffering
//!
//! [`TrajectoryStore`] is the append-only, time-ordered buffer of accepted ball positions
//! for one analysis run. Each accepted [`Observation`] is mapped to canonical court space,
//! classified into a zone and frozen as a [`TrajectoryPoint`].
//!
//! Acceptance rules
//! -----------------
//! * Malformed observation (negative/non-finite time, confidence outside `[0,1]`,
//!   non-finite pixel) → [`ServeTrackError::InvalidObservation`], rejected.
//! * No pixel position → skipped ([`SkipReason::NotDetected`]).
//! * `confidence <= threshold` → skipped ([`SkipReason::LowConfidence`]).
//! * `time` earlier than the last stored point → [`ServeTrackError::OrderingViolation`],
//!   rejected. Equal timestamps are allowed.
//!
//! Time ordering is only enforced for observations that would be stored.
//!
//! Rejections and skips leave the store untouched, so the time-ascending invariant the
//! landing detector relies on always holds.
use tracing::{debug, warn};

use crate::constants::{Confidence, Seconds};
use crate::court::{CourtMapping, CourtProjection, Point2D};
use crate::observations::Observation;
use crate::serve_errors::ServeTrackError;
use crate::zones::{ZoneClassifier, ZoneId};

/// A ball position accepted into the trajectory. Immutable once stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectoryPoint {
    pub time: Seconds,
    /// Position reported by the detector, in pixel space.
    pub pixel: Point2D,
    /// Position in canonical court space.
    pub canonical: Point2D,
    /// Zone of `canonical`, `None` when out of bounds.
    pub zone: Option<ZoneId>,
    pub confidence: Confidence,
}

/// Why an observation was not stored even though it is well formed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NotDetected,
    LowConfidence,
}

/// Result of a successful [`TrajectoryStore::append`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendOutcome {
    /// Stored at this trajectory index.
    Accepted(usize),
    Skipped(SkipReason),
}

/// Append-only, time-ordered collection of [`TrajectoryPoint`]s.
///
/// The store owns the court mapping and the zone classifier used to derive each point, so
/// all points of a run share the same geometry.
#[derive(Debug, Clone)]
pub struct TrajectoryStore {
    mapping: CourtMapping,
    classifier: ZoneClassifier,
    confidence_threshold: Confidence,
    points: Vec<TrajectoryPoint>,
    received: usize,
}

impl TrajectoryStore {
    /// Create an empty store.
    ///
    /// Arguments
    /// -----------------
    /// * `mapping` – Court mapping used to reach canonical space.
    /// * `confidence_threshold` – Observations must be strictly above it to be stored.
    pub fn new(mapping: CourtMapping, confidence_threshold: Confidence) -> Self {
        let classifier = ZoneClassifier::new(mapping.bounds());
        TrajectoryStore {
            mapping,
            classifier,
            confidence_threshold,
            points: Vec::new(),
            received: 0,
        }
    }

    /// Offer one observation to the store.
    ///
    /// Every call consumes one observation index (used in error context), whether the
    /// observation is stored, skipped or rejected.
    ///
    /// Return
    /// ----------
    /// * `Ok(AppendOutcome::Accepted(i))` – stored at trajectory index `i`.
    /// * `Ok(AppendOutcome::Skipped(_))` – missed or low-confidence frame.
    ///
    /// Errors
    /// ----------
    /// * [`ServeTrackError::InvalidObservation`] – malformed observation.
    /// * [`ServeTrackError::OrderingViolation`] – time goes backwards.
    ///
    /// Both errors are recoverable: the store is unchanged and the run may continue.
    ///
    /// The ordering check only applies to observations that would be stored. A missed or
    /// low-confidence frame is skipped whatever its time, since it never enters the
    /// trajectory.
    ///
    /// Canonical positions within the court's edge tolerance are snapped onto the court, so
    /// a ball on a line is stored exactly on it.
    pub fn append(&mut self, obs: Observation) -> Result<AppendOutcome, ServeTrackError> {
        let index = self.received;
        self.received += 1;

        if let Some(reason) = obs.validation_error() {
            warn!(index, %reason, "rejecting malformed observation");
            return Err(ServeTrackError::InvalidObservation { index, reason });
        }

        let Some(pixel) = obs.pixel else {
            debug!(index, time = obs.time, "no ball detected");
            return Ok(AppendOutcome::Skipped(SkipReason::NotDetected));
        };
        if obs.confidence <= self.confidence_threshold {
            debug!(
                index,
                time = obs.time,
                confidence = obs.confidence,
                "detection below confidence threshold"
            );
            return Ok(AppendOutcome::Skipped(SkipReason::LowConfidence));
        }

        if let Some(last_time) = self.last_time() {
            if obs.time < last_time {
                warn!(index, time = obs.time, last_time, "out-of-order observation");
                return Err(ServeTrackError::OrderingViolation {
                    index,
                    time: obs.time,
                    last_time,
                });
            }
        }

        let canonical = self.classifier.bounds().snap(self.mapping.to_canonical(pixel));
        let zone = self.classifier.classify(canonical);
        self.points.push(TrajectoryPoint {
            time: obs.time,
            pixel,
            canonical,
            zone,
            confidence: obs.confidence,
        });
        Ok(AppendOutcome::Accepted(self.points.len() - 1))
    }

    /// All stored points, time-ascending.
    pub fn all(&self) -> &[TrajectoryPoint] {
        &self.points
    }

    /// Up to `2 * radius + 1` points centred on index `i`, clipped at both ends.
    ///
    /// An out-of-range `i` yields an empty slice.
    pub fn window(&self, i: usize, radius: usize) -> &[TrajectoryPoint] {
        if i >= self.points.len() {
            return &[];
        }
        let start = i.saturating_sub(radius);
        let end = i.saturating_add(radius).saturating_add(1).min(self.points.len());
        &self.points[start..end]
    }

    pub fn get(&self, i: usize) -> Option<&TrajectoryPoint> {
        self.points.get(i)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TrajectoryPoint> {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Time of the most recent stored point.
    pub fn last_time(&self) -> Option<Seconds> {
        self.points.last().map(|p| p.time)
    }

    /// Number of observations offered so far, stored or not.
    pub fn observations_received(&self) -> usize {
        self.received
    }

    pub fn mapping(&self) -> &CourtMapping {
        &self.mapping
    }

    pub fn classifier(&self) -> &ZoneClassifier {
        &self.classifier
    }
}

impl<'a> IntoIterator for &'a TrajectoryStore {
    type Item = &'a TrajectoryPoint;
    type IntoIter = std::slice::Iter<'a, TrajectoryPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
