//! Match-summary derivation: one decoded record to one [`MatchRow`].

use chrono::{Datelike, NaiveDate};
use serde_yaml::Value;

use super::access::{required, required_sequence, required_str, single_entry, str_or_empty};
use crate::error::{FlattenError, FlattenResult};
use crate::models::MatchRow;

/// The one venue whose records sometimes omit the city. A single documented
/// exception carried over from the historical tables, not a venue-to-city
/// lookup; do not extend it.
const SHARJAH_VENUE: &str = "Sharjah Cricket Stadium";
const SHARJAH_CITY: &str = "Sharjah";

/// Method tag marking a Duckworth-Lewis decision.
const DL_METHOD: &str = "D/L";

/// Derive the match-summary row from a decoded record.
///
/// The caller assigns `id`; ids must be unique per run (the pipeline assigns
/// them strictly increasing in discovery order). `team1` resolves to the side
/// batting first, which the delivery derivation relies on for bowling-team
/// exclusion, so this row is always built before any delivery rows.
pub fn derive_match_row(record: &Value, id: u32) -> FlattenResult<MatchRow> {
    let info = required(record, "info", "")?;

    // team1 is the side batting first, NOT necessarily info.teams[0].
    let innings = required_sequence(record, "innings", "")?;
    let first_innings = innings.first().ok_or_else(|| FlattenError::MissingField {
        path: "innings[0]".to_string(),
    })?;
    let (_, first_body) = single_entry(first_innings, "innings[0]")?;
    let team1 = required_str(first_body, "team", "innings[0]")?.to_string();

    let teams = required_sequence(info, "teams", "info")?;
    let listed_first = teams
        .first()
        .and_then(Value::as_str)
        .ok_or_else(|| FlattenError::ExpectedString {
            path: "info.teams[0]".to_string(),
        })?;
    let listed_second = teams
        .get(1)
        .and_then(Value::as_str)
        .ok_or_else(|| FlattenError::ExpectedString {
            path: "info.teams[1]".to_string(),
        })?;
    let team2 = if listed_first == team1 {
        listed_second.to_string()
    } else {
        listed_first.to_string()
    };

    let date = first_date(info)?;
    let season = parse_season(&date)?;
    let city = derive_city(info);

    let outcome = required(info, "outcome", "info")?;
    let winner = derive_winner(outcome);
    let dl_applied = outcome.get("method").and_then(Value::as_str) == Some(DL_METHOD);
    let (result, win_by_runs, win_by_wickets) = derive_result(outcome)?;

    let player_of_match = info
        .get("player_of_match")
        .and_then(Value::as_sequence)
        .and_then(|seq| seq.first())
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let toss = required(info, "toss", "info")?;
    let (umpire1, umpire2, umpire3) = derive_umpires(info);

    Ok(MatchRow {
        id,
        season,
        city,
        date,
        team1,
        team2,
        toss_winner: required_str(toss, "winner", "info.toss")?.to_string(),
        toss_decision: required_str(toss, "decision", "info.toss")?.to_string(),
        result,
        dl_applied,
        winner,
        win_by_runs,
        win_by_wickets,
        player_of_match,
        venue: required_str(info, "venue", "info")?.to_string(),
        umpire1,
        umpire2,
        umpire3,
    })
}

/// Explicit city when present, else the Sharjah exception, else empty.
fn derive_city(info: &Value) -> String {
    match info.get("city").and_then(Value::as_str) {
        Some(city) => city.to_string(),
        None if info.get("venue").and_then(Value::as_str) == Some(SHARJAH_VENUE) => {
            SHARJAH_CITY.to_string()
        }
        None => String::new(),
    }
}

/// First listed date, verbatim. Multi-day matches keep only their start date.
fn first_date(info: &Value) -> FlattenResult<String> {
    let dates = required_sequence(info, "dates", "info")?;
    dates
        .first()
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| FlattenError::ExpectedString {
            path: "info.dates[0]".to_string(),
        })
}

fn parse_season(date: &str) -> FlattenResult<i32> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|d| d.year())
        .map_err(|_| FlattenError::BadDate { date: date.to_string() })
}

/// Explicit winner, else the eliminator (super-over shootout) winner, else
/// empty for abandoned / no-result matches.
fn derive_winner(outcome: &Value) -> String {
    let explicit = str_or_empty(outcome, "winner");
    if explicit.is_empty() {
        str_or_empty(outcome, "eliminator")
    } else {
        explicit
    }
}

/// Result kind plus win margins.
///
/// A non-normal tag ("tie", "no result") is stored verbatim with both margins
/// zero. A normal decision must carry exactly one margin under `outcome.by`;
/// a normal outcome with neither margin is a record the flattener does not
/// understand, and aborts the run.
fn derive_result(outcome: &Value) -> FlattenResult<(String, u32, u32)> {
    if let Some(tag) = outcome.get("result").and_then(Value::as_str) {
        return Ok((tag.to_string(), 0, 0));
    }

    let by = outcome.get("by").ok_or(FlattenError::MissingWinMargin)?;
    if let Some(runs) = by.get("runs").and_then(Value::as_u64) {
        Ok(("normal".to_string(), runs as u32, 0))
    } else if let Some(wickets) = by.get("wickets").and_then(Value::as_u64) {
        Ok(("normal".to_string(), 0, wickets as u32))
    } else {
        Err(FlattenError::MissingWinMargin)
    }
}

/// Up to three umpires; missing entries stay empty, including records that
/// list no umpires at all.
fn derive_umpires(info: &Value) -> (String, String, String) {
    let pick = |idx: usize| -> String {
        info.get("umpires")
            .and_then(Value::as_sequence)
            .and_then(|seq| seq.get(idx))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };
    (pick(0), pick(1), pick(2))
}
