//! Alliance-partner ranking against a user's own team profile.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use super::{merge::Team, types::clamp};
use crate::error::ScoutError;

/// The user's own team, entered by hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MyTeamProfile {
    pub name: String,
    pub auto: f64,
    pub teleop: f64,
    pub endgame: f64,
    pub consistency: f64,
    pub penalties: f64,
}

impl MyTeamProfile {
    pub fn total(&self) -> f64 {
        self.auto + self.teleop + self.endgame
    }
}

/// How well `team` complements `profile`, 0..=100. Missing target values count as 0.
pub fn compatibility_score(profile: &MyTeamProfile, team: &Team) -> f64 {
    let target_total = team.auto_points.unwrap_or(0.0)
        + team.teleop_points.unwrap_or(0.0)
        + team.endgame_points.unwrap_or(0.0);
    let total_gap = (profile.total() - target_total).abs();
    let consistency_gap = (profile.consistency - team.consistency.unwrap_or(0.0)).abs();
    let penalty_gap = (profile.penalties - team.penalties_per_match.unwrap_or(0.0)).abs();

    clamp(
        100.0 - total_gap * 0.55 - consistency_gap * 0.3 - penalty_gap * 14.0,
        0.0,
        100.0,
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompatTier {
    Excellent,
    Good,
    Situational,
    Low,
}

impl CompatTier {
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            CompatTier::Excellent
        } else if score >= 65.0 {
            CompatTier::Good
        } else if score >= 50.0 {
            CompatTier::Situational
        } else {
            CompatTier::Low
        }
    }
}

impl fmt::Display for CompatTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CompatTier::Excellent => "Excellent Alliance Fit",
            CompatTier::Good => "Good Alliance Fit",
            CompatTier::Situational => "Situational Fit",
            CompatTier::Low => "Low Fit",
        };
        f.write_str(label)
    }
}

/// Team metrics that lists can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMetric {
    #[default]
    FitScore,
    Epa,
    Opr,
    WinRate,
    Auto,
    Teleop,
    Endgame,
    Consistency,
    RankingPoints,
}

impl SortMetric {
    pub fn value(&self, team: &Team) -> Option<f64> {
        match self {
            SortMetric::FitScore => team.fit_score,
            SortMetric::Epa => team.epa,
            SortMetric::Opr => team.opr,
            SortMetric::WinRate => team.win_rate,
            SortMetric::Auto => team.auto_points,
            SortMetric::Teleop => team.teleop_points,
            SortMetric::Endgame => team.endgame_points,
            SortMetric::Consistency => team.consistency,
            SortMetric::RankingPoints => team.ranking_points,
        }
    }
}

impl FromStr for SortMetric {
    type Err = ScoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', '_'], "").as_str() {
            "fit" | "fitscore" => Ok(SortMetric::FitScore),
            "epa" => Ok(SortMetric::Epa),
            "opr" => Ok(SortMetric::Opr),
            "winrate" => Ok(SortMetric::WinRate),
            "auto" => Ok(SortMetric::Auto),
            "teleop" => Ok(SortMetric::Teleop),
            "endgame" => Ok(SortMetric::Endgame),
            "consistency" => Ok(SortMetric::Consistency),
            "rp" | "rankingpoints" => Ok(SortMetric::RankingPoints),
            _ => Err(ScoutError::InvalidMetric {
                metric: s.to_string(),
            }),
        }
    }
}

/// Sort descending by `metric`; teams without the metric go last, in their original order.
pub fn sort_by_metric(teams: &mut [Team], metric: SortMetric) {
    teams.sort_by(|a, b| match (metric.value(a), metric.value(b)) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}
