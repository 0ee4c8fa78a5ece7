//! Canonical record shapes shared by the normalizer, scraper and merger.

use serde::{Deserialize, Serialize};

/// One statistics record in canonical shape, whatever source it came from.
///
/// Absent data is `None`; present numbers are always finite.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalStatRecord {
    pub wins: Option<u32>,
    pub losses: Option<u32>,
    pub ties: Option<u32>,
    pub win_rate: Option<f64>,
    pub auto_points: Option<f64>,
    pub teleop_points: Option<f64>,
    pub endgame_points: Option<f64>,
    /// Average total (non-penalty) points per match.
    pub total_points: Option<f64>,
    pub total_opr: Option<f64>,
    pub max_auto: Option<f64>,
    pub max_teleop: Option<f64>,
    pub max_total: Option<f64>,
    pub std_dev_total: Option<f64>,
    pub penalties_per_match: Option<f64>,
    pub double_park_rate: Option<f64>,
    pub single_park_rate: Option<f64>,
    pub climb_rate: Option<f64>,
    pub shooting_zone: Option<String>,
}

impl CanonicalStatRecord {
    /// Store a resolved value into the slot for `field`.
    pub fn set(&mut self, field: StatField, value: f64) {
        match field {
            StatField::Wins => self.wins = count_from(value),
            StatField::Losses => self.losses = count_from(value),
            StatField::Ties => self.ties = count_from(value),
            StatField::WinRate => self.win_rate = Some(value),
            StatField::AutoPoints => self.auto_points = Some(value),
            StatField::TeleopPoints => self.teleop_points = Some(value),
            StatField::EndgamePoints => self.endgame_points = Some(value),
            StatField::TotalPoints => self.total_points = Some(value),
            StatField::TotalOpr => self.total_opr = Some(value),
            StatField::MaxAuto => self.max_auto = Some(value),
            StatField::MaxTeleop => self.max_teleop = Some(value),
            StatField::MaxTotal => self.max_total = Some(value),
            StatField::StdDevTotal => self.std_dev_total = Some(value),
            StatField::PenaltiesPerMatch => self.penalties_per_match = Some(value),
            StatField::DoubleParkRate => self.double_park_rate = Some(value),
            StatField::SingleParkRate => self.single_park_rate = Some(value),
            StatField::ClimbRate => self.climb_rate = Some(value),
        }
    }

    /// True when every numeric slot is empty.
    pub fn is_empty(&self) -> bool {
        self.wins.is_none()
            && self.losses.is_none()
            && self.ties.is_none()
            && self.win_rate.is_none()
            && self.auto_points.is_none()
            && self.teleop_points.is_none()
            && self.endgame_points.is_none()
            && self.total_points.is_none()
            && self.total_opr.is_none()
            && self.max_auto.is_none()
            && self.max_teleop.is_none()
            && self.max_total.is_none()
            && self.std_dev_total.is_none()
            && self.penalties_per_match.is_none()
            && self.double_park_rate.is_none()
            && self.single_park_rate.is_none()
            && self.climb_rate.is_none()
    }
}

/// Numeric canonical fields, in resolution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatField {
    Wins,
    Losses,
    Ties,
    WinRate,
    AutoPoints,
    TeleopPoints,
    EndgamePoints,
    TotalPoints,
    TotalOpr,
    MaxAuto,
    MaxTeleop,
    MaxTotal,
    StdDevTotal,
    PenaltiesPerMatch,
    DoubleParkRate,
    SingleParkRate,
    ClimbRate,
}

/// One row of the season-record leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapedRow {
    pub team_number: u32,
    pub name: String,
    pub total_opr: Option<f64>,
    pub auto_opr: Option<f64>,
    pub teleop_opr: Option<f64>,
    pub endgame_opr: Option<f64>,
    pub total_avg: Option<f64>,
    pub wins: Option<u32>,
    pub losses: Option<u32>,
    pub ties: Option<u32>,
}

impl ScrapedRow {
    pub fn new(team_number: u32, name: impl Into<String>) -> Self {
        Self {
            team_number,
            name: name.into(),
            total_opr: None,
            auto_opr: None,
            teleop_opr: None,
            endgame_opr: None,
            total_avg: None,
            wins: None,
            losses: None,
            ties: None,
        }
    }
}

/// Convert a resolved number into a match count. Negative or non-finite input is
/// treated as absent; fractional input is rounded.
pub fn count_from(value: f64) -> Option<u32> {
    if (0.0..=u32::MAX as f64).contains(&value) {
        Some(value.round() as u32)
    } else {
        None
    }
}

/// Clamp helper used by derived metrics.
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}
