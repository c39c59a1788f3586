//! Domain models for the cricflat flattening pipeline.
//!
//! This module contains the two denormalized row types the pipeline emits:
//!
//! - [`MatchRow`] - One row per match (summary table)
//! - [`DeliveryRow`] - One row per ball bowled (delivery table)
//!
//! Both are transient: built from one decoded source record, written to the
//! sink immediately, never mutated afterward. Column-name constants and
//! `values()` keep the header order and the field order in one place.

use serde::Serialize;

// =============================================================================
// Match Row
// =============================================================================

/// Column headers for the match table, in output order.
pub const MATCH_COLUMNS: [&str; 18] = [
    "id",
    "season",
    "city",
    "date",
    "team1",
    "team2",
    "toss_winner",
    "toss_decision",
    "result",
    "dl_applied",
    "winner",
    "win_by_runs",
    "win_by_wickets",
    "player_of_match",
    "venue",
    "umpire1",
    "umpire2",
    "umpire3",
];

/// Summary of one cricket match.
///
/// `team1` is always the side that batted first; `team2` is the other
/// listed team. When a winner exists and the result is a normal decision,
/// exactly one of `win_by_runs` / `win_by_wickets` is nonzero.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MatchRow {
    /// Identifier assigned by the pipeline, strictly increasing from 1.
    pub id: u32,
    /// Calendar year of the match date.
    pub season: i32,
    /// Host city; empty when the source omits it.
    pub city: String,
    /// Match date as listed (YYYY-MM-DD). Multi-day matches keep only
    /// their first date.
    pub date: String,
    /// The side that batted first.
    pub team1: String,
    /// The other side.
    pub team2: String,
    pub toss_winner: String,
    /// "bat" or "field".
    pub toss_decision: String,
    /// "normal" unless the source carries an explicit tag ("tie",
    /// "no result", ...).
    pub result: String,
    /// Whether the Duckworth-Lewis method decided the match.
    pub dl_applied: bool,
    /// Winning side; empty for abandoned / no-result matches.
    pub winner: String,
    pub win_by_runs: u32,
    pub win_by_wickets: u32,
    /// First named player of the match; empty when none listed.
    pub player_of_match: String,
    pub venue: String,
    pub umpire1: String,
    pub umpire2: String,
    /// Third umpire; most records list only two.
    pub umpire3: String,
}

impl MatchRow {
    /// Field values in [`MATCH_COLUMNS`] order, as CSV cells.
    pub fn values(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.season.to_string(),
            self.city.clone(),
            self.date.clone(),
            self.team1.clone(),
            self.team2.clone(),
            self.toss_winner.clone(),
            self.toss_decision.clone(),
            self.result.clone(),
            flag(self.dl_applied),
            self.winner.clone(),
            self.win_by_runs.to_string(),
            self.win_by_wickets.to_string(),
            self.player_of_match.clone(),
            self.venue.clone(),
            self.umpire1.clone(),
            self.umpire2.clone(),
            self.umpire3.clone(),
        ]
    }
}

// =============================================================================
// Delivery Row
// =============================================================================

/// Column headers for the delivery table, in output order.
pub const DELIVERY_COLUMNS: [&str; 21] = [
    "match_id",
    "inning",
    "batting_team",
    "bowling_team",
    "over",
    "ball",
    "batsman",
    "non_striker",
    "bowler",
    "is_super_over",
    "wide_runs",
    "bye_runs",
    "legbye_runs",
    "noball_runs",
    "penalty_runs",
    "batsman_runs",
    "extra_runs",
    "total_runs",
    "player_dismissed",
    "dismissal_kind",
    "fielder",
];

/// One ball bowled.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DeliveryRow {
    /// Owning match identifier (foreign key to [`MatchRow::id`]).
    pub match_id: u32,
    /// 1-4; 3 and 4 are the two super-over innings.
    pub inning: u8,
    pub batting_team: String,
    /// Whichever of the match's two teams is not batting.
    pub bowling_team: String,
    /// 1-indexed over number (source overs are 0-indexed).
    pub over: u32,
    /// Ball number within the over.
    pub ball: u32,
    pub batsman: String,
    pub non_striker: String,
    pub bowler: String,
    /// True iff `inning` is 3 or 4.
    pub is_super_over: bool,
    pub wide_runs: u32,
    pub bye_runs: u32,
    pub legbye_runs: u32,
    pub noball_runs: u32,
    pub penalty_runs: u32,
    pub batsman_runs: u32,
    pub extra_runs: u32,
    pub total_runs: u32,
    /// Dismissed player; empty when no wicket fell on this ball.
    pub player_dismissed: String,
    pub dismissal_kind: String,
    /// First credited fielder only, even for relay catches.
    pub fielder: String,
}

impl DeliveryRow {
    /// Field values in [`DELIVERY_COLUMNS`] order, as CSV cells.
    pub fn values(&self) -> Vec<String> {
        vec![
            self.match_id.to_string(),
            self.inning.to_string(),
            self.batting_team.clone(),
            self.bowling_team.clone(),
            self.over.to_string(),
            self.ball.to_string(),
            self.batsman.clone(),
            self.non_striker.clone(),
            self.bowler.clone(),
            flag(self.is_super_over),
            self.wide_runs.to_string(),
            self.bye_runs.to_string(),
            self.legbye_runs.to_string(),
            self.noball_runs.to_string(),
            self.penalty_runs.to_string(),
            self.batsman_runs.to_string(),
            self.extra_runs.to_string(),
            self.total_runs.to_string(),
            self.player_dismissed.clone(),
            self.dismissal_kind.clone(),
            self.fielder.clone(),
        ]
    }

    /// Human-readable label for an inning number ("Inning 1", "Super Over 2").
    pub fn inning_label(inning: u8) -> String {
        match inning {
            1 | 2 => format!("Inning {inning}"),
            n => format!("Super Over {}", n - 2),
        }
    }
}

/// Flags serialize as 0/1 cells, matching the historical table format.
fn flag(b: bool) -> String {
    if b { "1".to_string() } else { "0".to_string() }
}

// =============================================================================
// Tests
// =============================================================================
