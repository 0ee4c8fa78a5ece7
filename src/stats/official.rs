//! Aggregation of per-event ranking rows from the official results service.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Season totals for one team, summed across the events it ranked at.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfficialSummary {
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub matches: u32,
    pub win_rate: Option<f64>,
    pub ranking_points: Option<f64>,
    pub auto_points: Option<f64>,
    pub teleop_points: Option<f64>,
    pub endgame_points: Option<f64>,
    pub total_points: Option<f64>,
}

/// Read the first present key as a number. Strings are parsed; anything else is absent.
fn number_at(row: &Value, keys: &[&str]) -> Option<f64> {
    let value = keys.iter().find_map(|k| row.get(*k).filter(|v| !v.is_null()))?;
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

fn count(row: &Value, keys: &[&str]) -> u32 {
    number_at(row, keys)
        .filter(|v| *v >= 0.0)
        .map(|v| v.round() as u32)
        .unwrap_or(0)
}

/// Fold ranking rows into one summary.
///
/// Match counts treat a missing or non-numeric entry as zero. Score proxies are
/// averaged only over rows that carry at least one of them.
pub fn aggregate_rankings(rows: &[Value]) -> OfficialSummary {
    let mut summary = OfficialSummary::default();
    let mut ranking_points = 0.0;
    let (mut auto, mut teleop, mut endgame) = (0.0, 0.0, 0.0);
    let mut scored_rows = 0u32;

    for row in rows {
        let wins = count(row, &["wins", "qualWins"]);
        let losses = count(row, &["losses", "qualLosses"]);
        let ties = count(row, &["ties", "qualTies"]);
        summary.wins = summary.wins.saturating_add(wins);
        summary.losses = summary.losses.saturating_add(losses);
        summary.ties = summary.ties.saturating_add(ties);
        summary.matches = summary
            .matches
            .saturating_add(wins.saturating_add(losses).saturating_add(ties));

        ranking_points += number_at(row, &["sortOrder1", "rp", "rankingPoints"]).unwrap_or(0.0);

        let a = number_at(row, &["sortOrder2", "autoPoints", "auto"]);
        let t = number_at(row, &["sortOrder3", "teleopPoints", "teleop"]);
        let e = number_at(row, &["sortOrder4", "endgamePoints", "endgame"]);
        if a.is_some() || t.is_some() || e.is_some() {
            scored_rows += 1;
            auto += a.unwrap_or(0.0);
            teleop += t.unwrap_or(0.0);
            endgame += e.unwrap_or(0.0);
        }
    }

    if scored_rows > 0 {
        let n = f64::from(scored_rows);
        summary.auto_points = Some(auto / n);
        summary.teleop_points = Some(teleop / n);
        summary.endgame_points = Some(endgame / n);
    }

    if summary.matches > 0 {
        summary.win_rate = Some(f64::from(summary.wins) / f64::from(summary.matches));
    }

    let total = summary.auto_points.unwrap_or(0.0)
        + summary.teleop_points.unwrap_or(0.0)
        + summary.endgame_points.unwrap_or(0.0);
    summary.total_points = (total != 0.0).then_some(total);
    summary.ranking_points = (ranking_points != 0.0).then_some(ranking_points);

    summary
}
