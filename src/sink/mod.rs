//! Tabular row sinks.
//!
//! The flattener emits rows through the [`RowSink`] trait: one header write
//! per table, then one data-row write per record, fields in header order.
//! [`CsvSink`] is the production implementation over the `csv` crate; tests
//! swap in an in-memory buffer through the same trait.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::SinkResult;

/// A generic append-only table writer.
pub trait RowSink {
    /// Write the header row. Called exactly once, before any data row.
    fn write_header(&mut self, columns: &[&str]) -> SinkResult<()>;

    /// Write one data row, fields in the same order as the header.
    fn write_row(&mut self, fields: &[String]) -> SinkResult<()>;

    /// Flush buffered rows to the underlying writer.
    fn flush(&mut self) -> SinkResult<()>;
}

/// CSV implementation of [`RowSink`].
pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
}

impl CsvSink<File> {
    /// Create (truncating) a CSV file at `path`.
    pub fn create(path: &Path) -> SinkResult<Self> {
        Ok(Self {
            writer: csv::Writer::from_path(path)?,
        })
    }
}

impl<W: Write> CsvSink<W> {
    /// Wrap an arbitrary writer.
    pub fn from_writer(writer: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(writer),
        }
    }

    /// Unwrap the inner writer, flushing first.
    pub fn into_inner(self) -> SinkResult<W> {
        self.writer
            .into_inner()
            .map_err(|e| csv::Error::from(std::io::Error::other(e.to_string())).into())
    }
}

impl<W: Write> RowSink for CsvSink<W> {
    fn write_header(&mut self, columns: &[&str]) -> SinkResult<()> {
        self.writer.write_record(columns)?;
        Ok(())
    }

    fn write_row(&mut self, fields: &[String]) -> SinkResult<()> {
        self.writer.write_record(fields)?;
        Ok(())
    }

    fn flush(&mut self) -> SinkResult<()> {
        self.writer.flush()?;
        Ok(())
    }
}
