//! Folding statistics from several sources into one [`Team`].
//!
//! Every source is first turned into a [`StatPatch`]; [`merge`] is the only place a
//! team's statistics change. Merges are pure and never drop a statistic already known.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{
    flatten::parse_finite,
    league::{classify_raw, League},
    normalize::derive_endgame,
    official::OfficialSummary,
    types::{clamp, CanonicalStatRecord, ScrapedRow},
};


pub const AUTO_SPECIALIST_MIN: f64 = 32.0;
pub const STABLE_DRIVER_MIN: f64 = 82.0;
pub const LOW_PENALTY_MAX: f64 = 0.85;
pub const STRONG_ENDGAME_MIN: f64 = 12.0;
pub const RELIABLE_CLIMB_MIN: f64 = 0.55;

/// One competition team: identity from the roster plus everything merged into it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: String,
    #[serde(rename = "teamNumber")]
    pub number: u32,
    pub name: String,
    pub country: String,
    pub region: String,
    pub city: String,
    pub league: League,
    pub matches: Option<u32>,
    pub wins: Option<u32>,
    pub losses: Option<u32>,
    pub ties: Option<u32>,
    pub win_rate: Option<f64>,
    /// Average non-penalty points per match.
    pub epa: Option<f64>,
    pub opr: Option<f64>,
    pub ranking_points: Option<f64>,
    pub auto_points: Option<f64>,
    pub teleop_points: Option<f64>,
    pub endgame_points: Option<f64>,
    pub max_auto: Option<f64>,
    pub max_teleop: Option<f64>,
    pub max_total: Option<f64>,
    pub std_dev_total: Option<f64>,
    pub penalties_per_match: Option<f64>,
    pub double_park_rate: Option<f64>,
    pub single_park_rate: Option<f64>,
    pub climb_rate: Option<f64>,
    pub cycle_time: Option<f64>,
    pub consistency: Option<f64>,
    pub shooting_zone: Option<String>,
    pub fit_score: Option<f64>,
    pub auto_specialist: bool,
    pub low_penalty: bool,
    pub tags: Vec<String>,
    pub stats_loaded: bool,
}

const NUMBER_KEYS: [&str; 4] = ["team_number", "number", "teamNumber", "team"];
const NAME_KEYS: [&str; 3] = ["name", "team_name", "teamName"];
const COUNTRY_KEYS: [&str; 2] = ["country", "country_code"];
const REGION_KEYS: [&str; 3] = ["region", "state_prov", "state"];
const CITY_KEYS: [&str; 2] = ["city", "town"];
const CYCLE_TIME_KEYS: [&str; 2] = ["cycle_time", "avg_cycle_time"];

fn first_text(raw: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|k| match raw.get(*k)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    })
}

fn first_number(raw: &Value, keys: &[&str]) -> Option<f64> {
    keys.iter().find_map(|k| match raw.get(*k)? {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => parse_finite(s),
        _ => None,
    })
}

/// Team number from a roster entry, as a number or a numeric string.
pub fn team_number_of(raw: &Value) -> Option<u32> {
    NUMBER_KEYS.iter().find_map(|k| {
        let n = match raw.get(*k)? {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.trim().parse::<u64>().ok(),
            _ => None,
        }?;
        u32::try_from(n).ok().filter(|n| *n > 0)
    })
}

impl Team {
    /// Identity-only team with no statistics loaded.
    pub fn new(number: u32, name: impl Into<String>) -> Self {
        Self {
            id: number.to_string(),
            number,
            name: name.into(),
            country: "Unknown".to_string(),
            region: "Unknown Region".to_string(),
            city: String::new(),
            league: League::default(),
            matches: None,
            wins: None,
            losses: None,
            ties: None,
            win_rate: None,
            epa: None,
            opr: None,
            ranking_points: None,
            auto_points: None,
            teleop_points: None,
            endgame_points: None,
            max_auto: None,
            max_teleop: None,
            max_total: None,
            std_dev_total: None,
            penalties_per_match: None,
            double_park_rate: None,
            single_park_rate: None,
            climb_rate: None,
            cycle_time: None,
            consistency: None,
            shooting_zone: None,
            fit_score: None,
            auto_specialist: false,
            low_penalty: false,
            tags: Vec::new(),
            stats_loaded: false,
        }
    }

    /// Build a team from a roster listing entry. `None` when the entry has no usable number.
    pub fn from_roster(raw: &Value) -> Option<Self> {
        let number = team_number_of(raw)?;
        let mut team = Team::new(
            number,
            first_text(raw, &NAME_KEYS).unwrap_or_else(|| format!("FTC Team {number}")),
        );
        if let Some(country) = first_text(raw, &COUNTRY_KEYS) {
            team.country = country;
        }
        if let Some(region) = first_text(raw, &REGION_KEYS) {
            team.region = region;
        }
        team.city = first_text(raw, &CITY_KEYS).unwrap_or_default();
        team.league = classify_raw(raw);
        team.cycle_time = first_number(raw, &CYCLE_TIME_KEYS);
        Some(team)
    }
}

/// Which rule set derives fitScore and the final tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DerivationPath {
    /// Averages resolved from a statistics payload.
    Resolved,
    /// Win/loss record and OPR from a leaderboard row.
    MatchRecord,
}

/// A partial update to a team. `None` means the source said nothing about the field.
#[derive(Debug, Clone, PartialEq)]
pub struct StatPatch {
    pub path: DerivationPath,
    pub name: Option<String>,
    pub wins: Option<u32>,
    pub losses: Option<u32>,
    pub ties: Option<u32>,
    pub win_rate: Option<f64>,
    pub epa: Option<f64>,
    pub opr: Option<f64>,
    pub ranking_points: Option<f64>,
    pub auto_points: Option<f64>,
    pub teleop_points: Option<f64>,
    pub endgame_points: Option<f64>,
    pub max_auto: Option<f64>,
    pub max_teleop: Option<f64>,
    pub max_total: Option<f64>,
    pub std_dev_total: Option<f64>,
    pub consistency: Option<f64>,
    pub penalties_per_match: Option<f64>,
    pub double_park_rate: Option<f64>,
    pub single_park_rate: Option<f64>,
    pub climb_rate: Option<f64>,
    pub cycle_time: Option<f64>,
    pub shooting_zone: Option<String>,
}

impl StatPatch {
    pub fn empty(path: DerivationPath) -> Self {
        Self {
            path,
            name: None,
            wins: None,
            losses: None,
            ties: None,
            win_rate: None,
            epa: None,
            opr: None,
            ranking_points: None,
            auto_points: None,
            teleop_points: None,
            endgame_points: None,
            max_auto: None,
            max_teleop: None,
            max_total: None,
            std_dev_total: None,
            consistency: None,
            penalties_per_match: None,
            double_park_rate: None,
            single_park_rate: None,
            climb_rate: None,
            cycle_time: None,
            shooting_zone: None,
        }
    }

    /// True when the patch carries any scoring statistic.
    pub fn has_scoring(&self) -> bool {
        self.auto_points.is_some()
            || self.teleop_points.is_some()
            || self.endgame_points.is_some()
            || self.opr.is_some()
            || self.epa.is_some()
    }
}

/// Driver consistency on a 35..=99 scale from the spread of match totals.
pub fn consistency_from_std(std_dev: f64) -> f64 {
    clamp(95.0 - std_dev * 2.3, 35.0, 99.0)
}

impl From<&CanonicalStatRecord> for StatPatch {
    fn from(record: &CanonicalStatRecord) -> Self {
        Self {
            wins: record.wins,
            losses: record.losses,
            ties: record.ties,
            win_rate: record.win_rate,
            epa: record.total_points,
            opr: record.total_opr,
            auto_points: record.auto_points,
            teleop_points: record.teleop_points,
            endgame_points: record.endgame_points,
            max_auto: record.max_auto,
            max_teleop: record.max_teleop,
            max_total: record.max_total,
            std_dev_total: record.std_dev_total,
            consistency: record.std_dev_total.map(consistency_from_std),
            penalties_per_match: record.penalties_per_match,
            double_park_rate: record.double_park_rate,
            single_park_rate: record.single_park_rate,
            climb_rate: record.climb_rate,
            shooting_zone: record.shooting_zone.clone(),
            ..StatPatch::empty(DerivationPath::Resolved)
        }
    }
}

impl From<&ScrapedRow> for StatPatch {
    fn from(row: &ScrapedRow) -> Self {
        Self {
            name: Some(row.name.trim().to_string()).filter(|n| !n.is_empty()),
            wins: row.wins,
            losses: row.losses,
            ties: row.ties,
            epa: row.total_avg,
            opr: row.total_opr,
            auto_points: row.auto_opr,
            teleop_points: row.teleop_opr,
            endgame_points: row.endgame_opr,
            ..StatPatch::empty(DerivationPath::MatchRecord)
        }
    }
}

impl From<&OfficialSummary> for StatPatch {
    fn from(summary: &OfficialSummary) -> Self {
        let counted = summary.matches > 0;
        Self {
            wins: counted.then_some(summary.wins),
            losses: counted.then_some(summary.losses),
            ties: counted.then_some(summary.ties),
            win_rate: summary.win_rate,
            epa: summary.total_points,
            ranking_points: summary.ranking_points,
            auto_points: summary.auto_points,
            teleop_points: summary.teleop_points,
            endgame_points: summary.endgame_points,
            ..StatPatch::empty(DerivationPath::Resolved)
        }
    }
}

/// Apply `patch` on top of `team`, then recompute every derived field.
pub fn merge(team: &Team, patch: &StatPatch) -> Team {
    let mut next = team.clone();

    if let Some(name) = &patch.name {
        next.name = name.clone();
    }

    next.wins = patch.wins.or(team.wins);
    next.losses = patch.losses.or(team.losses);
    next.ties = patch.ties.or(team.ties);
    next.epa = patch.epa.or(team.epa);
    next.opr = patch.opr.or(team.opr);
    next.ranking_points = patch.ranking_points.or(team.ranking_points);
    next.auto_points = patch.auto_points.or(team.auto_points);
    next.teleop_points = patch.teleop_points.or(team.teleop_points);
    next.max_auto = patch.max_auto.or(team.max_auto);
    next.max_teleop = patch.max_teleop.or(team.max_teleop);
    next.max_total = patch.max_total.or(team.max_total);
    next.std_dev_total = patch.std_dev_total.or(team.std_dev_total);
    next.consistency = patch.consistency.or(team.consistency);
    next.penalties_per_match = patch.penalties_per_match.or(team.penalties_per_match);
    next.double_park_rate = patch.double_park_rate.or(team.double_park_rate);
    next.single_park_rate = patch.single_park_rate.or(team.single_park_rate);
    next.climb_rate = patch.climb_rate.or(team.climb_rate);
    next.cycle_time = patch.cycle_time.or(team.cycle_time);
    next.shooting_zone = patch.shooting_zone.clone().or_else(|| team.shooting_zone.clone());

    next.endgame_points = patch
        .endgame_points
        .or_else(|| derive_endgame(next.opr.or(next.epa), next.auto_points, next.teleop_points))
        .or(team.endgame_points);

    if let (Some(w), Some(l), Some(t)) = (next.wins, next.losses, next.ties) {
        next.matches = Some(w.saturating_add(l).saturating_add(t));
    }

    next.win_rate = patch.win_rate.or_else(|| match (patch.path, next.wins, next.matches) {
        (DerivationPath::MatchRecord, Some(w), Some(m)) if m > 0 => {
            Some(f64::from(w) / f64::from(m))
        }
        _ => None,
    });
    next.win_rate = next.win_rate.or(team.win_rate);

    next.auto_specialist = next.auto_points.is_some_and(|v| v >= AUTO_SPECIALIST_MIN);
    next.low_penalty = next.penalties_per_match.is_some_and(|v| v <= LOW_PENALTY_MAX);
    next.fit_score = match patch.path {
        DerivationPath::Resolved => fit_score(&next, patch.path),
        DerivationPath::MatchRecord => fit_score(&next, patch.path).or(team.fit_score),
    };
    next.tags = tags_for(&next, patch.path);
    next.stats_loaded = team.stats_loaded || patch.has_scoring();

    next
}

/// Alliance fit on a 0..=100 scale, or `None` when the path's inputs are incomplete.
pub fn fit_score(team: &Team, path: DerivationPath) -> Option<f64> {
    match path {
        DerivationPath::Resolved => {
            let epa = team.epa?;
            let consistency = team.consistency?;
            let win_rate = team.win_rate?;
            let penalties = team.penalties_per_match?;
            Some(clamp(
                epa * 0.62 + consistency * 0.32 + win_rate * 34.0 - penalties * 5.0,
                0.0,
                100.0,
            ))
        }
        DerivationPath::MatchRecord => {
            let opr = team.opr?;
            let win_rate = team.win_rate?;
            Some(clamp(
                opr * 0.55 + win_rate * 35.0 + team.consistency.unwrap_or(60.0) * 0.18,
                0.0,
                100.0,
            ))
        }
    }
}

/// Short labels summarising a team's strengths, in display order.
pub fn tags_for(team: &Team, path: DerivationPath) -> Vec<String> {
    let last = match path {
        DerivationPath::Resolved => team
            .endgame_points
            .is_some_and(|v| v >= STRONG_ENDGAME_MIN)
            .then_some("Strong Endgame"),
        DerivationPath::MatchRecord => team
            .climb_rate
            .is_some_and(|v| v >= RELIABLE_CLIMB_MIN)
            .then_some("Reliable Climb"),
    };

    [
        team.auto_specialist.then_some("Auto Specialist"),
        team.consistency
            .is_some_and(|v| v >= STABLE_DRIVER_MIN)
            .then_some("Stable Driver"),
        team.low_penalty.then_some("Low Penalty"),
        last,
    ]
    .into_iter()
    .flatten()
    .map(str::to_string)
    .collect()
}
