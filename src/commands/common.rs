//! Common utilities and helper functions shared across commands.
//!
//! The team pipeline lives here: roster listing, home-region scope, leaderboard
//! merge and quick-stat enrichment, applied in that order.

use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    core::ScoutConfig,
    sources::{roster::scope_to_home_region, ScoutClient, SeasonRecords},
    stats::{merge, sort_by_metric, League, SortMetric, StatPatch, Team},
    Result, Season,
};

/// What to load on top of the roster.
#[derive(Debug, Clone, Copy)]
pub struct LoadOptions {
    pub season: Season,
    /// Restrict to Missouri/Kansas teams, falling back to everyone when none match.
    pub home_region: bool,
    pub include_records: bool,
    pub enrich: bool,
}

/// Context containing common resources needed by most commands
pub struct CommandContext {
    pub client: ScoutClient,
    pub season: Season,
}

impl CommandContext {
    /// Environment configuration, with the season overridden when given on the command line.
    pub fn new(season: Option<Season>) -> Result<Self> {
        let mut config = ScoutConfig::from_env();
        if let Some(season) = season {
            config = config.with_season(season);
        }
        let season = config.season;
        Ok(Self {
            client: ScoutClient::new(config)?,
            season,
        })
    }
}

/// Fold every leaderboard row onto its team.
pub fn apply_season_records(teams: &mut [Team], records: &SeasonRecords) {
    for team in teams.iter_mut() {
        if let Some(row) = records.get(&team.number) {
            *team = merge(team, &StatPatch::from(row));
        }
    }
}

/// Build the team list for a season.
///
/// Leaderboard and quick-stat failures are logged and skipped; only an empty
/// roster is an error.
pub async fn load_teams(client: &ScoutClient, opts: LoadOptions) -> Result<Vec<Team>> {
    let roster = client.fetch_roster().await?;
    let roster: Vec<Value> = if opts.home_region {
        let (scoped, applied) = scope_to_home_region(roster);
        if !applied {
            warn!("no Missouri/Kansas teams in roster, using all teams");
        }
        scoped
    } else {
        roster
    };

    let mut teams: Vec<Team> = roster.iter().filter_map(Team::from_roster).collect();
    debug!("{} teams built from roster", teams.len());

    if opts.include_records {
        match client.fetch_season_records(opts.season).await {
            Ok(records) => apply_season_records(&mut teams, &records),
            Err(e) => warn!("season records unavailable: {e}"),
        }
    }

    if opts.enrich {
        let cap = client.config().quick_stat_cap;
        let numbers: Vec<u32> = teams.iter().take(cap).map(|t| t.number).collect();
        let stats = client.fetch_quick_stats_batch(&numbers, opts.season).await;
        for team in teams.iter_mut() {
            if let Some(record) = stats.get(&team.number) {
                *team = merge(team, &StatPatch::from(record));
            }
        }
    }

    sort_by_metric(&mut teams, SortMetric::FitScore);
    Ok(teams)
}

/// Keep teams in `league` (when given) whose EPA is at least `min_epa` (when given).
pub fn filter_teams(teams: Vec<Team>, league: Option<League>, min_epa: Option<f64>) -> Vec<Team> {
    teams
        .into_iter()
        .filter(|t| league.map_or(true, |l| t.league == l))
        .filter(|t| min_epa.map_or(true, |min| t.epa.is_some_and(|epa| epa >= min)))
        .collect()
}

/// Format an optional number for display, `-` when missing.
pub fn fmt_opt(value: Option<f64>, decimals: usize) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.decimals$}"))
}

/// Format a fraction in 0..=1 as a percentage.
pub fn fmt_pct(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.0}%", v * 100.0))
}

/// One-line summary used by list output.
pub fn team_line(team: &Team) -> String {
    let record = match (team.wins, team.losses, team.ties) {
        (Some(w), Some(l), Some(t)) => format!("{w}-{l}-{t}"),
        _ => "-".to_string(),
    };
    let tags = if team.tags.is_empty() {
        String::new()
    } else {
        format!("  [{}]", team.tags.join(", "))
    };
    format!(
        "{:>6}  {:<28} {:<10} fit {:>5}  epa {:>6}  opr {:>6}  {:>8}  win {:>4}{}",
        team.number,
        truncate(&team.name, 28),
        team.league.label(),
        fmt_opt(team.fit_score, 1),
        fmt_opt(team.epa, 1),
        fmt_opt(team.opr, 1),
        record,
        fmt_pct(team.win_rate),
        tags
    )
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}
