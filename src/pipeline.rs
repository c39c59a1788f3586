//! Orchestration: directory of match files to the two output tables.
//!
//! Processing is strictly sequential. The match-identifier counter is a
//! local of the run loop, threaded explicitly into each flattening call;
//! ids start at 1 and increase in discovery order. Any failure aborts the
//! whole run, possibly leaving partially written tables behind.

use std::path::Path;

use crate::error::RunResult;
use crate::flatten::flatten_record;
use crate::models::{DELIVERY_COLUMNS, MATCH_COLUMNS};
use crate::sink::{CsvSink, RowSink};
use crate::source::{decode_file, discover};

/// Fixed output file name for the match table.
pub const MATCHES_FILE: &str = "matches.csv";
/// Fixed output file name for the delivery table.
pub const DELIVERIES_FILE: &str = "deliveries.csv";

/// Counts reported after a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Match rows written (one per source file).
    pub matches: usize,
    /// Delivery rows written across all matches.
    pub deliveries: usize,
}

/// Flatten every match file under `dir` into CSV sinks at the given paths.
pub fn run(dir: &Path, matches_path: &Path, deliveries_path: &Path) -> RunResult<RunSummary> {
    let mut matches_sink = CsvSink::create(matches_path)?;
    let mut deliveries_sink = CsvSink::create(deliveries_path)?;
    let summary = run_with_sinks(dir, &mut matches_sink, &mut deliveries_sink)?;
    matches_sink.flush()?;
    deliveries_sink.flush()?;
    Ok(summary)
}

/// Sink-generic run loop; [`run`] wires it to CSV files.
pub fn run_with_sinks(
    dir: &Path,
    matches_sink: &mut dyn RowSink,
    deliveries_sink: &mut dyn RowSink,
) -> RunResult<RunSummary> {
    matches_sink.write_header(&MATCH_COLUMNS)?;
    deliveries_sink.write_header(&DELIVERY_COLUMNS)?;

    let paths = discover(dir)?;
    eprintln!("📄 Found {} match file(s) in {}", paths.len(), dir.display());

    let mut summary = RunSummary { matches: 0, deliveries: 0 };
    for (index, path) in paths.iter().enumerate() {
        let id = (index + 1) as u32;
        eprintln!("   [{id}] {}", path.display());

        let record = decode_file(path)?;
        let (match_row, delivery_rows) = flatten_record(&record, id)?;

        matches_sink.write_row(&match_row.values())?;
        for delivery in &delivery_rows {
            deliveries_sink.write_row(&delivery.values())?;
        }

        summary.matches += 1;
        summary.deliveries += delivery_rows.len();
    }

    Ok(summary)
}
