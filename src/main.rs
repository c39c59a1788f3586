//! cricflat CLI - Flatten Cricsheet YAML scorecards into CSV tables
//!
//! ```bash
//! cricflat <matches-dir>    # writes matches.csv and deliveries.csv
//! ```
//!
//! Output file names are fixed; both land in the current working directory.
//! Invocation without the directory argument prints usage and exits nonzero
//! before touching any I/O.

use clap::Parser;
use cricflat::pipeline::{run, DELIVERIES_FILE, MATCHES_FILE};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cricflat")]
#[command(about = "Flatten Cricsheet YAML match files into matches.csv and deliveries.csv", long_about = None)]
struct Cli {
    /// Directory containing per-match YAML files (Cricsheet data version 0.7)
    matches_dir: PathBuf,
}

fn main() {
    let cli = Cli::parse();

    let matches_path = PathBuf::from(MATCHES_FILE);
    let deliveries_path = PathBuf::from(DELIVERIES_FILE);

    match run(&cli.matches_dir, &matches_path, &deliveries_path) {
        Ok(summary) => {
            eprintln!(
                "✅ Wrote {} match row(s) to {} and {} delivery row(s) to {}",
                summary.matches, MATCHES_FILE, summary.deliveries, DELIVERIES_FILE
            );
        }
        Err(e) => {
            eprintln!("❌ Error: {e}");
            std::process::exit(1);
        }
    }
}
