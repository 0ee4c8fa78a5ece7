//! End-to-end tests of the reconciliation engine: roster entry, leaderboard
//! rows and quick stats folded into one team.

use action_scout::stats::{
    classify_raw, merge, normalize, reconcile, scrape, sort_by_metric, League, SortMetric, StatPatch, Team,
};
use serde_json::json;

const LEADERBOARD: &str = r#"
<table>
  <tr><th>#</th><th>Team</th><th>NP OPR</th><th>Auto OPR</th><th>Record (W-L-T)</th></tr>
  <tr><td>1</td><td><a href="/teams/19448">19448 Action Robotics</a></td><td>88.5</td><td>30.1</td><td>10-2-1</td></tr>
  <tr><td>2</td><td>23250 Gear Heads</td><td>64.0</td><td>n/a</td><td>8-4-0</td></tr>
  <tr><th>#</th><th>Team</th><th>NP OPR</th><th>Auto OPR</th><th>Record (W-L-T)</th></tr>
  <tr><td>9</td><td>19448 Action Robotics</td><td>70.0</td><td>22.0</td><td>3-3-0</td></tr>
</table>
"#;

fn roster_team() -> Team {
    Team::from_roster(&json!({
        "number": 19448,
        "name": "Action Robotics",
        "city": "Overland Park",
        "state": "KS",
        "country": "USA"
    }))
    .unwrap()
}

#[test]
fn test_roster_entry_classification() {
    let team = roster_team();
    assert_eq!(team.league, League::KcWest);
    assert_eq!(team.city, "Overland Park");
    assert!(!team.stats_loaded);
    assert_eq!(team.fit_score, None);
}

#[test]
fn test_leaderboard_then_quick_stats() {
    let rows = reconcile(scrape(LEADERBOARD));
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[&23250].auto_opr, None);

    let team = merge(&roster_team(), &StatPatch::from(&rows[&19448]));
    assert_eq!(team.opr, Some(88.5));
    assert_eq!(team.auto_points, Some(30.1));
    assert_eq!(team.matches, Some(13));
    assert_eq!(team.win_rate, Some(10.0 / 13.0));
    assert!(team.fit_score.is_some());
    assert!(team.stats_loaded);

    let record = normalize(&json!({
        "quick_stats": {
            "np_avg": 70.0,
            "auto_avg": 35.0,
            "teleop_avg": 25.0,
            "std_total": 5.0,
            "penalties_per_match": 0.5
        }
    }));
    let team = merge(&team, &StatPatch::from(&record));

    // Leaderboard values survive a payload that does not mention them.
    assert_eq!(team.opr, Some(88.5));
    assert_eq!(team.wins, Some(10));
    assert_eq!(team.win_rate, Some(10.0 / 13.0));

    assert_eq!(team.epa, Some(70.0));
    assert_eq!(team.endgame_points, Some(10.0));
    assert!(team.consistency.is_some_and(|c| c > 82.0 && c < 84.0));
    assert_eq!(team.tags, vec!["Auto Specialist", "Stable Driver", "Low Penalty"]);
    assert!(team.fit_score.is_some_and(|f| (0.0..=100.0).contains(&f)));
}

#[test]
fn test_merged_team_serializes_camel_case() {
    let rows = reconcile(scrape(LEADERBOARD));
    let team = merge(&roster_team(), &StatPatch::from(&rows[&19448]));
    let value = serde_json::to_value(&team).unwrap();

    assert_eq!(value["teamNumber"], 19448);
    assert_eq!(value["league"], "KC West");
    assert_eq!(value["opr"], 88.5);
    assert!(value.get("statsLoaded").is_some());
    assert!(value.get("fitScore").is_some());
}

#[test]
fn test_sorting_merged_teams() {
    let rows = reconcile(scrape(LEADERBOARD));
    let mut teams: Vec<Team> = rows
        .values()
        .map(|row| merge(&Team::new(row.team_number, row.name.clone()), &StatPatch::from(row)))
        .collect();
    teams.push(Team::new(1, "No Stats"));

    sort_by_metric(&mut teams, SortMetric::Opr);
    let order: Vec<u32> = teams.iter().map(|t| t.number).collect();
    assert_eq!(order, vec![19448, 23250, 1]);
}

#[test]
fn test_league_labels_take_priority_over_location() {
    let raw = json!({ "league": "STL Mid", "city": "Joplin", "state": "MO" });
    assert_eq!(classify_raw(&raw), League::StlMid);

    let raw = json!({ "city": "Joplin", "state": "MO" });
    assert_eq!(classify_raw(&raw), League::Southwest);
}
