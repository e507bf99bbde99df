//! CSV serialization of a [`Report`].
//!
//! The header row is followed by one record per report row, in trajectory order. Cells are
//! the pre-rounded strings of [`ReportRow::cells`](super::ReportRow::cells), so writing the
//! same report twice always gives the same bytes.
use std::fs::File;
use std::io;

use camino::Utf8Path;

use crate::serve_errors::ServeTrackError;

use super::Report;

impl Report {
    /// Write the table as CSV into any writer.
    ///
    /// Errors
    /// ----------
    /// * [`ServeTrackError::CsvError`] if a record cannot be written.
    /// * [`ServeTrackError::IoError`] if the final flush fails.
    pub fn write_csv<W: io::Write>(&self, writer: W) -> Result<(), ServeTrackError> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(self.headers())?;
        for row in self.rows() {
            wtr.write_record(row.cells())?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// Render the table as an in-memory CSV string.
    pub fn to_csv_string(&self) -> Result<String, ServeTrackError> {
        let mut buf = Vec::new();
        self.write_csv(&mut buf)?;
        String::from_utf8(buf).map_err(|e| {
            ServeTrackError::IoError(io::Error::new(io::ErrorKind::InvalidData, e))
        })
    }

    /// Write the table as CSV to `path`, replacing any existing file.
    pub fn save_csv(&self, path: &Utf8Path) -> Result<(), ServeTrackError> {
        let file = File::create(path)?;
        self.write_csv(io::BufWriter::new(file))
    }
}
