//! Normalization of heterogeneous quick-stat payloads into [`CanonicalStatRecord`].
//!
//! Field resolution is driven by [`FIELD_RULES`], one row per canonical field. Adding a
//! field or a new naming variant is a change to that table only.

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

use super::{
    flatten::flatten,
    resolve::resolve,
    types::{CanonicalStatRecord, StatField},
};


/// Candidate keys and fallback patterns for one canonical field.
pub struct FieldRule {
    pub field: StatField,
    pub exact: &'static [&'static str],
    pub fallback: Vec<Regex>,
}

fn rule(field: StatField, exact: &'static [&'static str], fallback: &[&str]) -> FieldRule {
    FieldRule {
        field,
        exact,
        fallback: fallback
            .iter()
            .map(|p| Regex::new(p).expect("field rule pattern"))
            .collect(),
    }
}

/// The resolution table. The last exact candidate of each row is the canonical
/// camelCase name lowercased, so a serialized record normalizes back to itself.
pub static FIELD_RULES: LazyLock<Vec<FieldRule>> = LazyLock::new(|| {
    use StatField::*;
    vec![
        rule(Wins, &["wins", "record_wins"], &[r"(^|_)wins$"]),
        rule(Losses, &["losses", "record_losses"], &[r"(^|_)loss(es)?$"]),
        rule(Ties, &["ties", "record_ties"], &[r"(^|_)ties$"]),
        rule(
            WinRate,
            &["win_rate", "win_pct", "record_win_pct", "winrate"],
            &[r"win.*pct", r"win.*rate"],
        ),
        rule(
            AutoPoints,
            &[
                "auto_avg",
                "avg_auto",
                "auto_points_avg",
                "autoopr",
                "auto_point_avg",
                "auto_value",
                "autopoints",
            ],
            &[r"auto.*avg", r"auto.*opr", r"^auto_value$"],
        ),
        rule(
            TeleopPoints,
            &[
                "teleop_avg",
                "avg_teleop",
                "teleop_points_avg",
                "teleopopr",
                "driver_avg",
                "dc_value",
                "driver_controlled_value",
                "teleoppoints",
            ],
            &[
                r"teleop.*avg",
                r"teleop.*opr",
                r"driver.*avg",
                r"^dc_value$",
                r"driver.*controlled.*value",
            ],
        ),
        rule(
            EndgamePoints,
            &[
                "endgame_avg",
                "end_game_avg",
                "avg_endgame",
                "endgame_points_avg",
                "end_game_points_avg",
                "endgameopr",
                "end_game_opr",
                "eg_value",
                "endgamepoints",
            ],
            &[r"end.?game.*avg", r"end.?game.*opr", r"^eg_value$"],
        ),
        rule(
            TotalPoints,
            &["total_avg", "avg_total", "np_avg", "avg_np", "tot_value", "totalpoints"],
            &[r"total.*avg", r"np.*avg", r"^tot_value$"],
        ),
        rule(
            TotalOpr,
            &["np_opr", "opr", "total_opr", "tot_value", "totalopr"],
            &[r"np.*opr", r"(^|_)opr$", r"^tot_value$"],
        ),
        rule(MaxAuto, &["auto_max", "max_auto", "maxauto"], &[r"auto.*max"]),
        rule(
            MaxTeleop,
            &["teleop_max", "max_teleop", "maxteleop"],
            &[r"teleop.*max"],
        ),
        rule(
            MaxTotal,
            &["total_max", "max_total", "np_max", "maxtotal"],
            &[r"total.*max", r"np.*max"],
        ),
        rule(
            StdDevTotal,
            &["std_total", "stddev_total", "stddevtotal"],
            &[r"std.*total", r"stdev.*total"],
        ),
        rule(
            PenaltiesPerMatch,
            &["penalties_per_match", "avg_penalties", "penaltiespermatch"],
            &[r"penalt.*avg", r"penalt.*match"],
        ),
        rule(
            DoubleParkRate,
            &["double_park_rate", "doubleparkrate"],
            &[r"double.*park"],
        ),
        rule(
            SingleParkRate,
            &["single_park_rate", "singleparkrate"],
            &[r"single.*park"],
        ),
        rule(
            ClimbRate,
            &["climb_rate", "hang_rate", "ascent_rate", "climbrate"],
            &[r"climb.*rate", r"hang.*rate", r"ascent.*rate"],
        ),
    ]
});

/// Shape of an incoming quick-stat payload, decided once on entry.
#[derive(Debug, Clone, Copy)]
pub enum RawPayload<'a> {
    /// Statistics live under a `quick_stats` / `quickStats` object.
    Nested(&'a Value),
    /// The payload itself is the statistics object.
    Flat(&'a Value),
}

impl<'a> RawPayload<'a> {
    pub fn classify(payload: &'a Value) -> Self {
        ["quick_stats", "quickStats"]
            .iter()
            .find_map(|key| payload.get(*key).filter(|v| v.is_object()))
            .map(RawPayload::Nested)
            .unwrap_or(RawPayload::Flat(payload))
    }

    /// The object that actually holds the numbers.
    pub fn container(&self) -> &'a Value {
        match self {
            RawPayload::Nested(inner) => inner,
            RawPayload::Flat(payload) => payload,
        }
    }
}

/// Build a canonical record from one raw payload. Never fails: misses become `None`.
pub fn normalize(payload: &Value) -> CanonicalStatRecord {
    let container = RawPayload::classify(payload).container();
    let flat = flatten(container);

    let mut record = CanonicalStatRecord::default();
    for rule in FIELD_RULES.iter() {
        if let Some(value) = resolve(&flat, rule.exact, &rule.fallback) {
            record.set(rule.field, value);
        }
    }

    record.win_rate = record.win_rate.map(win_rate_fraction);

    if record.endgame_points.is_none() {
        record.endgame_points = derive_endgame(
            record.total_points,
            record.auto_points,
            record.teleop_points,
        );
    }

    record.shooting_zone = ["shooting_zone", "shootingZone"]
        .iter()
        .filter_map(|key| container.get(*key).and_then(Value::as_str))
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string);

    record
}

/// Values above 1 are read as percentages.
///
/// This is a heuristic: a malformed fraction above 1 is indistinguishable from a
/// percentage and gets divided as well.
pub fn win_rate_fraction(raw: f64) -> f64 {
    if raw > 1.0 {
        raw / 100.0
    } else {
        raw
    }
}

/// `max(0, total - auto - teleop)` when all three are known.
pub fn derive_endgame(total: Option<f64>, auto: Option<f64>, teleop: Option<f64>) -> Option<f64> {
    match (total, auto, teleop) {
        (Some(t), Some(a), Some(d)) => Some((t - a - d).max(0.0)),
        _ => None,
    }
}
