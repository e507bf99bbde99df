//! Human-readable rendering of a [`Report`].
//!
//! `{}` prints the row table (via `comfy-table`) followed by the one-line summary;
//! `{:#}` replaces the one-line summary with the detailed block.
use std::fmt;

use comfy_table::{
    presets::UTF8_FULL, Attribute, Cell, CellAlignment, ContentArrangement, Row, Table,
};

use super::{EventKind, Report};

impl Report {
    /// Render the rows as a `comfy-table` table.
    pub fn render_table(&self) -> String {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);

        table.set_header(self.headers().iter().map(|h| Cell::new(*h)).collect::<Vec<_>>());

        for row in self.rows() {
            let [time, x, y, event, zone] = row.cells();
            let mut event_cell = Cell::new(event);
            if row.event == EventKind::Landing {
                event_cell = event_cell.add_attribute(Attribute::Bold);
            }
            table.add_row(Row::from(vec![
                Cell::new(time).set_alignment(CellAlignment::Right),
                Cell::new(x).set_alignment(CellAlignment::Right),
                Cell::new(y).set_alignment(CellAlignment::Right),
                event_cell,
                Cell::new(zone).set_alignment(CellAlignment::Center),
            ]));
        }

        table.to_string()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.render_table())?;
        if f.alternate() {
            write!(f, "{:#}", self.summary())
        } else {
            writeln!(f, "{}", self.summary())
        }
    }
}
