//! Per-ball derivation: one decoded record to its ordered [`DeliveryRow`]s.
//!
//! Deliveries are emitted strictly in source order: innings order, then the
//! listed delivery order within each innings. The source order is assumed,
//! not verified, to be chronological by over and ball.

use serde_yaml::Value;

use super::access::{
    required, required_sequence, required_str, required_u32, scalar_to_string, single_entry,
    str_or_empty, u32_or_zero,
};
use crate::error::{FlattenError, FlattenResult};
use crate::models::{DeliveryRow, MatchRow};

/// The format supports at most four innings: two regular plus two super overs.
const MAX_INNINGS: usize = 4;

/// Derive every delivery row for a match, across all innings including
/// super overs.
///
/// Requires the already-derived [`MatchRow`]: the bowling team is computed by
/// binary exclusion against `team1`/`team2`, so those must be resolved first.
pub fn derive_delivery_rows(record: &Value, match_row: &MatchRow) -> FlattenResult<Vec<DeliveryRow>> {
    let innings = required_sequence(record, "innings", "")?;
    if innings.len() > MAX_INNINGS {
        return Err(FlattenError::TooManyInnings { count: innings.len() });
    }

    let mut rows = Vec::new();
    for (idx, entry) in innings.iter().enumerate() {
        let inning = (idx + 1) as u8;
        let path = format!("innings[{idx}]");
        let (_, body) = single_entry(entry, &path)?;

        let batting_team = required_str(body, "team", &path)?.to_string();
        let bowling_team = if match_row.team1 == batting_team {
            match_row.team2.clone()
        } else {
            match_row.team1.clone()
        };

        let deliveries = required_sequence(body, "deliveries", &path)?;
        rows.reserve(deliveries.len());
        for (d_idx, d_entry) in deliveries.iter().enumerate() {
            let d_path = format!("{path}.deliveries[{d_idx}]");
            let (key, detail) = single_entry(d_entry, &d_path)?;
            let (over, ball) = parse_over_ball(key)?;
            rows.push(derive_delivery(
                detail,
                &d_path,
                match_row.id,
                inning,
                &batting_team,
                &bowling_team,
                over,
                ball,
            )?);
        }
    }

    Ok(rows)
}

/// Split an "over.ball" key into its 1-indexed over and its ball number.
///
/// The decoder hands the key back as a float (`0.1`) or a string; either way
/// it is rendered to text and split on the dot. Source overs are 0-indexed,
/// so the integer part gains one.
fn parse_over_ball(key: &Value) -> FlattenResult<(u32, u32)> {
    let text = scalar_to_string(key).ok_or_else(|| bad_key(key))?;
    let (over_part, ball_part) = text.split_once('.').ok_or_else(|| bad_key(key))?;
    let over: u32 = over_part.parse().map_err(|_| bad_key(key))?;
    let ball: u32 = ball_part.parse().map_err(|_| bad_key(key))?;
    Ok((over + 1, ball))
}

fn bad_key(key: &Value) -> FlattenError {
    FlattenError::BadDeliveryKey {
        key: scalar_to_string(key).unwrap_or_else(|| format!("{key:?}")),
    }
}

#[allow(clippy::too_many_arguments)]
fn derive_delivery(
    detail: &Value,
    path: &str,
    match_id: u32,
    inning: u8,
    batting_team: &str,
    bowling_team: &str,
    over: u32,
    ball: u32,
) -> FlattenResult<DeliveryRow> {
    let runs = required(detail, "runs", path)?;
    let runs_path = format!("{path}.runs");

    // Both sub-structures are optional; every lookup under them defaults.
    let extras = detail.get("extras");
    let wicket = detail.get("wicket");
    let fielder = wicket
        .and_then(|w| w.get("fielders"))
        .and_then(Value::as_sequence)
        .and_then(|seq| seq.first())
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    Ok(DeliveryRow {
        match_id,
        inning,
        batting_team: batting_team.to_string(),
        bowling_team: bowling_team.to_string(),
        over,
        ball,
        batsman: required_str(detail, "batsman", path)?.to_string(),
        non_striker: required_str(detail, "non_striker", path)?.to_string(),
        bowler: required_str(detail, "bowler", path)?.to_string(),
        is_super_over: inning > 2,
        wide_runs: u32_or_zero(extras, "wides"),
        bye_runs: u32_or_zero(extras, "byes"),
        legbye_runs: u32_or_zero(extras, "legbyes"),
        noball_runs: u32_or_zero(extras, "noballs"),
        penalty_runs: u32_or_zero(extras, "penalty"),
        batsman_runs: required_u32(runs, "batsman", &runs_path)?,
        extra_runs: required_u32(runs, "extras", &runs_path)?,
        total_runs: required_u32(runs, "total", &runs_path)?,
        player_dismissed: wicket.map(|w| str_or_empty(w, "player_out")).unwrap_or_default(),
        dismissal_kind: wicket.map(|w| str_or_empty(w, "kind")).unwrap_or_default(),
        fielder,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(yaml: &str) -> Value {
        serde_yaml::from_str(yaml).unwrap()
    }

    fn match_row() -> MatchRow {
        MatchRow {
            id: 3,
            season: 2008,
            city: "Bangalore".into(),
            date: "2008-04-18".into(),
            team1: "Kolkata Knight Riders".into(),
            team2: "Royal Challengers Bangalore".into(),
            toss_winner: "Royal Challengers Bangalore".into(),
            toss_decision: "field".into(),
            result: "normal".into(),
            dl_applied: false,
            winner: "Kolkata Knight Riders".into(),
            win_by_runs: 140,
            win_by_wickets: 0,
            player_of_match: "BB McCullum".into(),
            venue: "M Chinnaswamy Stadium".into(),
            umpire1: "Asad Rauf".into(),
            umpire2: "RE Koertzen".into(),
            umpire3: String::new(),
        }
    }

    fn two_innings_record() -> Value {
        record(
            r#"
innings:
  - 1st innings:
      team: "Kolkata Knight Riders"
      deliveries:
        - 0.1:
            batsman: "SC Ganguly"
            non_striker: "BB McCullum"
            bowler: "P Kumar"
            runs: {batsman: 0, extras: 1, total: 1}
            extras: {legbyes: 1}
        - 0.2:
            batsman: "BB McCullum"
            non_striker: "SC Ganguly"
            bowler: "P Kumar"
            runs: {batsman: 0, extras: 0, total: 0}
  - 2nd innings:
      team: "Royal Challengers Bangalore"
      deliveries:
        - 0.1:
            batsman: "R Dravid"
            non_striker: "W Jaffer"
            bowler: "AB Dinda"
            runs: {batsman: 0, extras: 0, total: 0}
            wicket:
              player_out: "R Dravid"
              kind: caught
              fielders: ["BB McCullum", "SC Ganguly"]
"#,
        )
    }

    #[test]
    fn test_plain_delivery_defaults() {
        let rows = derive_delivery_rows(&two_innings_record(), &match_row()).unwrap();
        let row = &rows[1];
        assert_eq!(row.over, 1);
        assert_eq!(row.ball, 2);
        assert_eq!(row.wide_runs, 0);
        assert_eq!(row.bye_runs, 0);
        assert_eq!(row.legbye_runs, 0);
        assert_eq!(row.noball_runs, 0);
        assert_eq!(row.penalty_runs, 0);
        assert_eq!(row.player_dismissed, "");
        assert_eq!(row.dismissal_kind, "");
        assert_eq!(row.fielder, "");
    }

    #[test]
    fn test_extras_subfields() {
        let rows = derive_delivery_rows(&two_innings_record(), &match_row()).unwrap();
        assert_eq!(rows[0].legbye_runs, 1);
        assert_eq!(rows[0].extra_runs, 1);
        assert_eq!(rows[0].total_runs, 1);
        assert_eq!(rows[0].batsman_runs, 0);
    }

    #[test]
    fn test_wicket_keeps_first_fielder_only() {
        let rows = derive_delivery_rows(&two_innings_record(), &match_row()).unwrap();
        let row = rows.last().unwrap();
        assert_eq!(row.player_dismissed, "R Dravid");
        assert_eq!(row.dismissal_kind, "caught");
        assert_eq!(row.fielder, "BB McCullum");
    }

    #[test]
    fn test_bowling_team_by_exclusion() {
        let rows = derive_delivery_rows(&two_innings_record(), &match_row()).unwrap();
        for row in &rows {
            assert_ne!(row.batting_team, row.bowling_team);
            assert!(row.bowling_team == "Kolkata Knight Riders"
                || row.bowling_team == "Royal Challengers Bangalore");
        }
        assert_eq!(rows[0].batting_team, "Kolkata Knight Riders");
        assert_eq!(rows[0].bowling_team, "Royal Challengers Bangalore");
        let last = rows.last().unwrap();
        assert_eq!(last.batting_team, "Royal Challengers Bangalore");
        assert_eq!(last.bowling_team, "Kolkata Knight Riders");
    }

    #[test]
    fn test_inning_numbering_and_super_over_flag() {
        let mut rec = two_innings_record();
        let third = record(
            r#"
3rd innings:
  team: "Kolkata Knight Riders"
  deliveries:
    - 0.1:
        batsman: "BB McCullum"
        non_striker: "SC Ganguly"
        bowler: "P Kumar"
        runs: {batsman: 4, extras: 0, total: 4}
"#,
        );
        rec["innings"].as_sequence_mut().unwrap().push(third);

        let rows = derive_delivery_rows(&rec, &match_row()).unwrap();
        let innings: Vec<u8> = rows.iter().map(|r| r.inning).collect();
        assert_eq!(innings, vec![1, 1, 2, 3]);
        for row in &rows {
            assert_eq!(row.is_super_over, row.inning >= 3);
        }
    }

    #[test]
    fn test_fifth_innings_is_fatal() {
        let mut rec = two_innings_record();
        let filler = record(
            r#"{extra innings: {team: "Kolkata Knight Riders", deliveries: []}}"#,
        );
        for _ in 0..3 {
            rec["innings"].as_sequence_mut().unwrap().push(filler.clone());
        }
        assert!(matches!(
            derive_delivery_rows(&rec, &match_row()),
            Err(FlattenError::TooManyInnings { count: 5 })
        ));
    }

    #[test]
    fn test_source_order_preserved() {
        let rec = record(
            r#"
innings:
  - 1st innings:
      team: "Kolkata Knight Riders"
      deliveries:
        - 0.1: {batsman: a, non_striker: b, bowler: c, runs: {batsman: 0, extras: 0, total: 0}}
        - 0.2: {batsman: a, non_striker: b, bowler: c, runs: {batsman: 1, extras: 0, total: 1}}
        - 0.3: {batsman: b, non_striker: a, bowler: c, runs: {batsman: 0, extras: 0, total: 0}}
        - 1.1: {batsman: a, non_striker: b, bowler: d, runs: {batsman: 0, extras: 0, total: 0}}
        - 1.2: {batsman: a, non_striker: b, bowler: d, runs: {batsman: 6, extras: 0, total: 6}}
"#,
        );
        let rows = derive_delivery_rows(&rec, &match_row()).unwrap();
        let order: Vec<(u32, u32)> = rows.iter().map(|r| (r.over, r.ball)).collect();
        assert_eq!(order, vec![(1, 1), (1, 2), (1, 3), (2, 1), (2, 2)]);
        let mut sorted = order.clone();
        sorted.sort();
        assert_eq!(order, sorted);
    }

    #[test]
    fn test_string_delivery_key() {
        // A quoted key ("0.10", ball ten of a long over) must not collapse.
        let rec = record(
            r#"
innings:
  - 1st innings:
      team: "Kolkata Knight Riders"
      deliveries:
        - "0.10": {batsman: a, non_striker: b, bowler: c, runs: {batsman: 0, extras: 0, total: 0}}
"#,
        );
        let rows = derive_delivery_rows(&rec, &match_row()).unwrap();
        assert_eq!((rows[0].over, rows[0].ball), (1, 10));
    }

    #[test]
    fn test_malformed_delivery_key_is_diagnosed() {
        let rec = record(
            r#"
innings:
  - 1st innings:
      team: "Kolkata Knight Riders"
      deliveries:
        - "third ball": {batsman: a, non_striker: b, bowler: c, runs: {batsman: 0, extras: 0, total: 0}}
"#,
        );
        let err = derive_delivery_rows(&rec, &match_row()).unwrap_err();
        assert!(matches!(err, FlattenError::BadDeliveryKey { .. }));
        assert!(err.to_string().contains("third ball"));
    }

    #[test]
    fn test_missing_runs_names_the_path() {
        let rec = record(
            r#"
innings:
  - 1st innings:
      team: "Kolkata Knight Riders"
      deliveries:
        - 0.1: {batsman: a, non_striker: b, bowler: c}
"#,
        );
        let err = derive_delivery_rows(&rec, &match_row()).unwrap_err();
        assert!(err.to_string().contains("deliveries[0].runs"));
    }
}
