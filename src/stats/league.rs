//! League assignment from direct labels or location text.

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::error::ScoutError;

/// The eight leagues teams are grouped into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum League {
    #[serde(rename = "STL North")]
    StlNorth,
    #[serde(rename = "STL Mid")]
    StlMid,
    #[serde(rename = "STL South")]
    StlSouth,
    #[serde(rename = "SE")]
    Southeast,
    #[serde(rename = "SW")]
    Southwest,
    #[serde(rename = "Central")]
    Central,
    #[serde(rename = "KC East")]
    KcEast,
    #[serde(rename = "KC West")]
    KcWest,
}

impl League {
    pub const ALL: [League; 8] = [
        League::StlNorth,
        League::StlMid,
        League::StlSouth,
        League::Southeast,
        League::Southwest,
        League::Central,
        League::KcEast,
        League::KcWest,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            League::StlNorth => "STL North",
            League::StlMid => "STL Mid",
            League::StlSouth => "STL South",
            League::Southeast => "SE",
            League::Southwest => "SW",
            League::Central => "Central",
            League::KcEast => "KC East",
            League::KcWest => "KC West",
        }
    }
}

impl Default for League {
    fn default() -> Self {
        League::Central
    }
}

impl fmt::Display for League {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for League {
    type Err = ScoutError;

    /// Accepts the display label or any alias the label matcher recognises.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        League::ALL
            .iter()
            .find(|l| l.label().eq_ignore_ascii_case(s.trim()))
            .copied()
            .or_else(|| league_from_label(s))
            .ok_or_else(|| ScoutError::InvalidLeague {
                league: s.to_string(),
            })
    }
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("league pattern")
}

static LABEL_RULES: LazyLock<Vec<(League, Regex)>> = LazyLock::new(|| {
    vec![
        (
            League::StlNorth,
            compile(r"stl[\s_-]*(north|n\b)|st\.?\s*louis[\s_-]*north"),
        ),
        (
            League::StlMid,
            compile(r"stl[\s_-]*(mid|mi\b)|st\.?\s*louis[\s_-]*(mid|mi\b)"),
        ),
        (
            League::StlSouth,
            compile(r"stl[\s_-]*(south|s\b)|st\.?\s*louis[\s_-]*south"),
        ),
        (
            League::KcEast,
            compile(r"kc[\s_-]*east|kce\b|kansas city[\s_-]*east"),
        ),
        (
            League::KcWest,
            compile(r"kc[\s_-]*west|kcw\b|kansas city[\s_-]*west"),
        ),
        (League::Southeast, compile(r"(^|\W)se(\W|$)|south[\s_-]*east")),
        (League::Southwest, compile(r"(^|\W)sw(\W|$)|south[\s_-]*west")),
        (League::Central, compile(r"central|cen\b")),
    ]
});

/// Kansas-side suburbs that play in the western Kansas City league.
static KS_WEST_CITIES: LazyLock<Regex> = LazyLock::new(|| {
    compile(
        r"overland park|olathe|lenexa|shawnee|prairie village|roeland park|mission|leawood|stilwell|gardner|spring hill|kansas city",
    )
});

/// City lists checked in priority order once labels and the state rule miss.
static CITY_RULES: LazyLock<Vec<(League, Regex)>> = LazyLock::new(|| {
    vec![
        (
            League::KcEast,
            compile(r"kansas city|independence|lees summit|raytown|belton|liberty|blue springs|kearney|grain valley|harrisonville"),
        ),
        (
            League::StlNorth,
            compile(r"florissant|hazelwood|maryland heights|bridgeton|creve coeur"),
        ),
        (
            League::StlMid,
            compile(r"st\.?\s*louis|saint louis|st louis|ballwin|chesterfield|wildwood|kirkwood|webster groves|town and country|grover"),
        ),
        (
            League::StlSouth,
            compile(r"arnold|imperial|de soto|festus|hillsboro|o'?fallon|st charles|saint charles|wentzville|warrenton"),
        ),
        (
            League::Southeast,
            compile(r"cape girardeau|sikeston|poplar bluff|chaffee|jackson|kennett|hayti|perryville|scott city"),
        ),
        (
            League::Southwest,
            compile(r"springfield|joplin|monett|neosho|ozark|branson|hollister|wheaton|pierce city|bakersfield"),
        ),
    ]
});

const LABEL_KEYS: [&str; 5] = ["league", "league_name", "leagueName", "league_code", "district"];
const STATE_KEYS: [&str; 3] = ["state", "state_prov", "stateProv"];
const CITY_KEYS: [&str; 2] = ["city", "town"];

/// Location and label text pulled out of a raw roster entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeagueSignals {
    pub labels: Vec<String>,
    pub state: Option<String>,
    pub city: Option<String>,
}

impl LeagueSignals {
    pub fn from_raw(raw: &Value) -> Self {
        Self {
            labels: LABEL_KEYS
                .iter()
                .filter_map(|k| text_field(raw, k))
                .collect(),
            state: STATE_KEYS.iter().find_map(|k| text_field(raw, k)),
            city: CITY_KEYS.iter().find_map(|k| text_field(raw, k)),
        }
    }
}

fn text_field(raw: &Value, key: &str) -> Option<String> {
    match raw.get(key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Match a free-form league label against the known aliases.
pub fn league_from_label(label: &str) -> Option<League> {
    let normalized = label.trim().to_lowercase();
    if normalized.is_empty() {
        return None;
    }
    LABEL_RULES
        .iter()
        .find(|(_, re)| re.is_match(&normalized))
        .map(|(league, _)| *league)
}

/// Assign a league. Always returns one of the eight leagues.
pub fn classify(signals: &LeagueSignals) -> League {
    if let Some(league) = signals.labels.iter().find_map(|l| league_from_label(l)) {
        return league;
    }

    let state = signals
        .state
        .as_deref()
        .map(|s| s.trim().to_uppercase())
        .unwrap_or_default();
    let city = signals
        .city
        .as_deref()
        .map(|c| c.trim().to_lowercase())
        .unwrap_or_default();

    if state == "KS" || state == "KANSAS" {
        return if KS_WEST_CITIES.is_match(&city) {
            League::KcWest
        } else {
            League::Central
        };
    }

    if city.is_empty() {
        return League::Central;
    }

    CITY_RULES
        .iter()
        .find(|(_, re)| re.is_match(&city))
        .map(|(league, _)| *league)
        .unwrap_or(League::Central)
}

/// Convenience wrapper over [`classify`] for a raw roster entry.
pub fn classify_raw(raw: &Value) -> League {
    classify(&LeagueSignals::from_raw(raw))
}
