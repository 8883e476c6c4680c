//! CSV ingestion and export.

use crate::dataset::cell::{Cell, NULL_MARKER};
use crate::dataset::{Dataset, Row};
use crate::error::{Error, Result};
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;
use tracing::{debug, info, warn};

/// Summary of one ingestion pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    /// Rows appended to the dataset.
    pub rows: usize,
    /// Non-empty fields that failed to parse and were stored as the type's
    /// zero value.
    pub coercion_failures: usize,
}

impl Dataset {
    /// Appends every record of `reader` as a row.
    ///
    /// Fields are mapped positionally: each registered column reads the field
    /// at its index. Empty fields and the `<null>` marker become
    /// [`Cell::Empty`]. Fields that fail to parse are stored as the column
    /// type's zero value, logged, and counted in the returned report.
    ///
    /// # Errors
    ///
    /// - [`Error::NoSchema`] when no column is registered.
    /// - [`Error::Csv`] on malformed input (unequal field counts, bad quoting).
    /// - [`Error::MissingField`] when a record has no field at a column's index.
    ///
    /// On error, rows appended before the failing record are kept but the
    /// dataset is not marked as loaded.
    pub fn load_csv<R: Read>(&mut self, reader: R, skip_header: bool) -> Result<IngestReport> {
        if self.columns.is_empty() {
            return Err(Error::NoSchema);
        }
        self.loaded = false;

        let mut rdr = ReaderBuilder::new()
            .has_headers(skip_header)
            .flexible(false)
            .from_reader(reader);

        let mut report = IngestReport::default();
        let mut record = StringRecord::new();
        while rdr.read_record(&mut record)? {
            let line = record.position().map_or(report.rows + 1, |p| p.line() as usize);
            report.coercion_failures += self.push_record(&record, line)?;
            report.rows += 1;
        }

        self.loaded = true;
        info!(
            rows = report.rows,
            total_rows = self.rows.len(),
            coercion_failures = report.coercion_failures,
            "CSV ingestion complete"
        );
        Ok(report)
    }

    /// Opens `path` and ingests it with [`Dataset::load_csv`].
    pub fn load_csv_path<P: AsRef<Path>>(&mut self, path: P, skip_header: bool) -> Result<IngestReport> {
        let path = path.as_ref();
        debug!(path = %path.display(), "opening CSV source");
        let file = File::open(path)?;
        self.load_csv(BufReader::new(file), skip_header)
    }

    /// Builds one row from a record; returns the number of coercion failures.
    fn push_record(&mut self, record: &StringRecord, line: usize) -> Result<usize> {
        let positions: Vec<usize> = self.columns_by_index.values().copied().collect();
        if let Some(&pos) = positions
            .iter()
            .find(|&&pos| record.get(self.columns[pos].index).is_none())
        {
            return Err(Error::MissingField {
                row: line,
                index: self.columns[pos].index,
            });
        }

        let row = self.rows.len();
        self.rows.push(Row::default());
        let mut failures = 0;
        for pos in positions {
            let cell = {
                let column = &self.columns[pos];
                let field = record.get(column.index).unwrap_or_default();
                if field.is_empty() || field == NULL_MARKER {
                    Cell::Empty
                } else {
                    column.coerce(field).unwrap_or_else(|| {
                        warn!(
                            line,
                            column = column.name(),
                            field,
                            "field does not parse as {}, storing zero value",
                            column.column_type()
                        );
                        failures += 1;
                        column.zero()
                    })
                }
            };
            let slot = self.push_cell(cell);
            self.bind(row, pos, slot);
        }
        Ok(failures)
    }

    /// Writes the dataset as CSV: a header of column names in index order,
    /// then one record per row. Missing cells render as `<null>`.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut wtr = WriterBuilder::new().from_writer(writer);
        wtr.write_record(self.columns().map(|c| c.name()))?;

        for row in &self.rows {
            let record = self.columns().map(|column| {
                row.by_index
                    .get(&column.index)
                    .map(|&slot| column.render(&self.cells[slot]))
                    .unwrap_or_else(|| NULL_MARKER.to_string())
            });
            wtr.write_record(record)?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// CSV rendering of the whole dataset as a string.
    pub fn to_csv_string(&self) -> Result<String> {
        let mut buf = Vec::new();
        self.write_csv(&mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}
