use thiserror::Error;

use crate::constants::Seconds;

#[derive(Error, Debug)]
pub enum ServeTrackError {
    #[error("Degenerate court geometry: {0}")]
    DegenerateGeometry(String),

    #[error(
        "Observation #{index} at t={time}s is earlier than the last stored point (t={last_time}s)"
    )]
    OrderingViolation {
        index: usize,
        time: Seconds,
        last_time: Seconds,
    },

    #[error("Invalid observation #{index}: {reason}")]
    InvalidObservation { index: usize, reason: String },

    #[error("Invalid analysis parameter: {0}")]
    InvalidAnalysisParameter(String),

    #[error("Invalid zone label: {0}")]
    InvalidZoneLabel(String),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),
}

impl PartialEq for ServeTrackError {
    fn eq(&self, other: &Self) -> bool {
        use ServeTrackError::*;
        match (self, other) {
            (DegenerateGeometry(a), DegenerateGeometry(b)) => a == b,
            (
                OrderingViolation {
                    index: ia,
                    time: ta,
                    last_time: la,
                },
                OrderingViolation {
                    index: ib,
                    time: tb,
                    last_time: lb,
                },
            ) => ia == ib && ta == tb && la == lb,
            (
                InvalidObservation {
                    index: ia,
                    reason: ra,
                },
                InvalidObservation {
                    index: ib,
                    reason: rb,
                },
            ) => ia == ib && ra == rb,
            (InvalidAnalysisParameter(a), InvalidAnalysisParameter(b)) => a == b,
            (InvalidZoneLabel(a), InvalidZoneLabel(b)) => a == b,

            // Foreign errors are not comparable: same variant is enough
            (CsvError(_), CsvError(_)) => true,
            (IoError(_), IoError(_)) => true,

            _ => false,
        }
    }
}

impl ServeTrackError {
    /// `true` for errors that only reject a single observation and leave the run usable.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ServeTrackError::OrderingViolation { .. } | ServeTrackError::InvalidObservation { .. }
        )
    }
}
