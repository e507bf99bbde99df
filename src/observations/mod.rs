//! # Ball observations
//!
//! An [`Observation`] is the per-frame output of the external ball detector: a timestamp,
//! an optional pixel position and a confidence. The core never talks to a detector or a
//! video decoder; it only consumes observations through the [`ObservationSource`] trait.
//!
//! Modules
//! -----------------
//! * [`csv_reader`] – Load observation tables (`time,x,y,confidence`) from CSV.
pub mod csv_reader;

use crate::constants::{Confidence, Seconds};
use crate::court::Point2D;

/// One sampled frame's ball-detection result.
///
/// Fields
/// -----------------
/// * `time` – Seconds since the start of the clip, `≥ 0`.
/// * `pixel` – Ball centre in pixel space, `None` when nothing was detected.
/// * `confidence` – Detector confidence in `[0, 1]`; `0` when nothing was detected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub time: Seconds,
    pub pixel: Option<Point2D>,
    pub confidence: Confidence,
}

impl Observation {
    pub fn new(time: Seconds, pixel: Point2D, confidence: Confidence) -> Self {
        Observation {
            time,
            pixel: Some(pixel),
            confidence,
        }
    }

    /// A frame where the detector found no ball.
    pub fn missed(time: Seconds) -> Self {
        Observation {
            time,
            pixel: None,
            confidence: 0.0,
        }
    }

    /// Reason why this observation is malformed, if it is.
    ///
    /// Malformed observations are rejected; they are different from missed or
    /// low-confidence ones, which are simply skipped.
    pub(crate) fn validation_error(&self) -> Option<String> {
        if !self.time.is_finite() || self.time < 0.0 {
            return Some(format!("time must be finite and non-negative, got {}", self.time));
        }
        if !(0.0..=1.0).contains(&self.confidence) {
            return Some(format!(
                "confidence must be in [0, 1], got {}",
                self.confidence
            ));
        }
        match self.pixel {
            Some(p) if !p.is_finite() => Some(format!("pixel position is not finite: {p}")),
            _ => None,
        }
    }
}

/// Abstract supplier of observations, in time order.
///
/// Whatever produced the observations (a local model, a remote inference service, a
/// replayed CSV file) is invisible here. Any `Iterator<Item = Observation>` is a source.
pub trait ObservationSource {
    /// Next observation, or `None` once the sequence is exhausted.
    fn next_observation(&mut self) -> Option<Observation>;
}

impl<I> ObservationSource for I
where
    I: Iterator<Item = Observation>,
{
    fn next_observation(&mut self) -> Option<Observation> {
        self.next()
    }
}
