//! # cricflat - Cricsheet match scorecards to flat CSV tables
//!
//! cricflat converts a directory of per-match cricket scorecards (Cricsheet
//! YAML, data version 0.7) into two analytics-ready tables: one row per
//! match and one row per delivery bowled.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌──────────────┐
//! │ YAML files  │────▶│   Source    │────▶│  Flattener  │────▶│  CSV sinks   │
//! │ (one/match) │     │  (decode)   │     │ (normalize) │     │ (two tables) │
//! └─────────────┘     └─────────────┘     └─────────────┘     └──────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cricflat::pipeline::{run, MATCHES_FILE, DELIVERIES_FILE};
//! use std::path::Path;
//!
//! fn main() {
//!     let summary = run(
//!         Path::new("matches/"),
//!         Path::new(MATCHES_FILE),
//!         Path::new(DELIVERIES_FILE),
//!     )
//!     .unwrap();
//!     println!("{} matches, {} deliveries", summary.matches, summary.deliveries);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`models`] - Row types (MatchRow, DeliveryRow) and column orders
//! - [`source`] - Match-file discovery and YAML decoding
//! - [`flatten`] - The field-mapping and normalization core
//! - [`sink`] - Tabular row sinks
//! - [`pipeline`] - Sequential orchestration with explicit id assignment

// Core modules
pub mod error;
pub mod models;

// Input
pub mod source;

// Flattening
pub mod flatten;

// Output
pub mod sink;

// Orchestration
pub mod pipeline;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{FlattenError, RunError, SinkError, SourceError};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{DeliveryRow, MatchRow, DELIVERY_COLUMNS, MATCH_COLUMNS};

// =============================================================================
// Re-exports - Flattener
// =============================================================================

pub use flatten::{
    check_version, derive_delivery_rows, derive_match_row, flatten_record, SUPPORTED_VERSION,
};

// =============================================================================
// Re-exports - Sinks
// =============================================================================

pub use sink::{CsvSink, RowSink};

// =============================================================================
// Re-exports - Pipeline
// =============================================================================

pub use pipeline::{run, run_with_sinks, RunSummary, DELIVERIES_FILE, MATCHES_FILE};
