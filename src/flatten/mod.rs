//! The record flattener: nested match records to flat table rows.
//!
//! This is the core of the crate. One decoded match record plus a
//! caller-assigned identifier becomes exactly one [`MatchRow`] and an
//! ordered sequence of [`DeliveryRow`]s:
//!
//! - [`check_version`] - the single fatal format-version gate
//! - [`derive_match_row`] - match-summary derivation
//! - [`derive_delivery_rows`] - per-ball derivation
//! - [`flatten_record`] - the three above, in order
//!
//! The match row is always derived first: delivery rows need `team1`/`team2`
//! resolved to compute the bowling team by elimination.

mod access;
mod deliveries;
mod match_row;

use serde_yaml::Value;

pub use deliveries::derive_delivery_rows;
pub use match_row::derive_match_row;

use crate::error::{FlattenError, FlattenResult};
use crate::models::{DeliveryRow, MatchRow};

/// The one supported Cricsheet data version.
pub const SUPPORTED_VERSION: f64 = 0.7;

/// Verify the record's declared format version.
///
/// Runs before any row derivation; a mismatch aborts the entire run, not
/// just this record.
pub fn check_version(record: &Value) -> FlattenResult<()> {
    let meta = access::required(record, "meta", "")?;
    let declared = access::required(meta, "data_version", "meta")?;
    if declared.as_f64() == Some(SUPPORTED_VERSION) {
        return Ok(());
    }
    Err(FlattenError::UnsupportedVersion {
        found: access::scalar_to_string(declared).unwrap_or_else(|| format!("{declared:?}")),
        expected: SUPPORTED_VERSION.to_string(),
    })
}

/// Flatten one decoded record: version check, then the match row, then its
/// deliveries.
pub fn flatten_record(record: &Value, id: u32) -> FlattenResult<(MatchRow, Vec<DeliveryRow>)> {
    check_version(record)?;
    let match_row = derive_match_row(record, id)?;
    let deliveries = derive_delivery_rows(record, &match_row)?;
    Ok((match_row, deliveries))
}
