//! Error types for the cricflat flattening pipeline.
//!
//! This module defines a hierarchy of error types:
//!
//! - [`SourceError`] - Source file discovery and YAML decoding errors
//! - [`FlattenError`] - Record flattening errors (the fatal taxonomy)
//! - [`SinkError`] - CSV row-sink errors
//! - [`RunError`] - Top-level orchestration errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries. Every error is fatal:
//! the pipeline has no per-record isolation or retry semantics, so any
//! failure surfaces all the way to process exit.

use thiserror::Error;

// =============================================================================
// Source Errors
// =============================================================================

/// Errors while discovering or decoding source match files.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Failed to list or read a file.
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Source file was not valid YAML.
    #[error("Failed to decode '{path}': {source}")]
    Yaml {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
}

// =============================================================================
// Flattening Errors
// =============================================================================

/// Errors while flattening one decoded match record.
///
/// The first three variants are the documented fatal taxonomy; the rest
/// are descriptive shape diagnostics for records the flattener does not
/// understand. None of them is recoverable.
#[derive(Debug, Error)]
pub enum FlattenError {
    /// Declared data version differs from the supported literal.
    #[error("Unsupported data version: {found} (expected {expected})")]
    UnsupportedVersion { found: String, expected: String },

    /// More than four innings entries in one record.
    #[error("Unexpected innings count: {count} (at most 4 supported, including two super overs)")]
    TooManyInnings { count: usize },

    /// Normal-result outcome carrying neither a runs nor a wickets margin.
    #[error("Outcome has a winner but no runs/wickets margin under 'info.outcome.by'")]
    MissingWinMargin,

    /// A required key was absent.
    #[error("Missing required field: {path}")]
    MissingField { path: String },

    /// A node that had to be a mapping was something else.
    #[error("Expected a mapping at {path}")]
    ExpectedMapping { path: String },

    /// A node that had to be a sequence was something else.
    #[error("Expected a sequence at {path}")]
    ExpectedSequence { path: String },

    /// An innings or delivery wrapper was not a single-entry mapping.
    #[error("Expected a single-entry mapping at {path}")]
    ExpectedSingleEntry { path: String },

    /// A field that had to be a string was something else.
    #[error("Expected a string at {path}")]
    ExpectedString { path: String },

    /// A field that had to be a non-negative integer was something else.
    #[error("Expected a non-negative integer at {path}")]
    ExpectedInteger { path: String },

    /// A delivery key that did not look like "over.ball".
    #[error("Malformed delivery key '{key}' (expected \"over.ball\")")]
    BadDeliveryKey { key: String },

    /// A match date that did not parse as a calendar date.
    #[error("Malformed match date '{date}' (expected YYYY-MM-DD)")]
    BadDate { date: String },
}

// =============================================================================
// Sink Errors
// =============================================================================

/// Errors while writing tabular output rows.
#[derive(Debug, Error)]
pub enum SinkError {
    /// Failed to create or flush an output file.
    #[error("Output IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialization failed.
    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),
}

// =============================================================================
// Run Errors (top-level)
// =============================================================================

/// Top-level orchestration errors.
///
/// This is the main error type returned by [`crate::pipeline::run`].
/// It wraps all lower-level errors; any of them aborts the whole run.
#[derive(Debug, Error)]
pub enum RunError {
    /// Source discovery/decoding error.
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// Flattening error.
    #[error("Flatten error: {0}")]
    Flatten(#[from] FlattenError),

    /// Row-sink error.
    #[error("Sink error: {0}")]
    Sink(#[from] SinkError),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for source operations.
pub type SourceResult<T> = Result<T, SourceError>;

/// Result type for flattening operations.
pub type FlattenResult<T> = Result<T, FlattenError>;

/// Result type for sink operations.
pub type SinkResult<T> = Result<T, SinkError>;

/// Result type for pipeline operations.
pub type RunResult<T> = Result<T, RunError>;
