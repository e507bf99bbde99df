//! Read observation tables from CSV.
//!
//! Expected header: `time,x,y,confidence`. An empty `x` or `y` cell marks a frame where the
//! detector found nothing; such rows become [`Observation::missed`]. Surrounding whitespace
//! is ignored. Rows are returned in file order; time ordering is enforced later by the
//! trajectory store, not here.
//!
//! ```text
//! time,x,y,confidence
//! 0.000,450.0,100.0,0.91
//! 0.100,,,0.0
//! 0.200,452.5,180.2,0.88
//! ```
use std::fs::File;
use std::io;

use camino::Utf8Path;
use serde::Deserialize;

use crate::constants::{Confidence, Pixel, Seconds};
use crate::court::Point2D;
use crate::serve_errors::ServeTrackError;

use super::Observation;

#[derive(Debug, Deserialize)]
struct ObservationRecord {
    time: Seconds,
    x: Option<Pixel>,
    y: Option<Pixel>,
    confidence: Option<Confidence>,
}

impl From<ObservationRecord> for Observation {
    fn from(rec: ObservationRecord) -> Self {
        match (rec.x, rec.y) {
            (Some(x), Some(y)) => Observation {
                time: rec.time,
                pixel: Some(Point2D::new(x, y)),
                confidence: rec.confidence.unwrap_or(0.0),
            },
            _ => Observation::missed(rec.time),
        }
    }
}

/// Read every observation from a CSV stream.
///
/// Errors
/// ----------
/// * [`ServeTrackError::CsvError`] on malformed rows or unreadable input.
pub fn read_observations<R: io::Read>(reader: R) -> Result<Vec<Observation>, ServeTrackError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    rdr.deserialize::<ObservationRecord>()
        .map(|rec| rec.map(Observation::from).map_err(ServeTrackError::from))
        .collect()
}

/// Read every observation from a CSV file.
///
/// Errors
/// ----------
/// * [`ServeTrackError::IoError`] if the file cannot be opened.
/// * [`ServeTrackError::CsvError`] on malformed rows.
pub fn read_observations_file(path: &Utf8Path) -> Result<Vec<Observation>, ServeTrackError> {
    let file = File::open(path)?;
    read_observations(file)
}
