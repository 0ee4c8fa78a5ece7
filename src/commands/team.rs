//! Single-team report command implementation

use serde::Serialize;
use tracing::warn;

use crate::{
    cli::types::TeamNumber,
    sources::official::Award,
    stats::{merge, OfficialSummary, StatPatch, Team},
    Result, ScoutError, Season,
};

use super::common::{fmt_opt, fmt_pct, CommandContext};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TeamReport {
    season: Season,
    team: Team,
    official: Option<OfficialSummary>,
    awards: Vec<Award>,
}

/// Handle the team command
pub async fn handle_team(number: TeamNumber, season: Option<Season>, as_json: bool) -> Result<()> {
    let ctx = CommandContext::new(season)?;
    let client = &ctx.client;
    let number = number.as_u32();

    // tarpaulin::skip - HTTP calls, tested via integration tests
    let raw = client.fetch_team(number).await?;
    let mut team = Team::from_roster(&raw).ok_or(ScoutError::TeamNotFound { number })?;

    match client.fetch_season_records(ctx.season).await {
        Ok(records) => {
            if let Some(row) = records.get(&number) {
                team = merge(&team, &StatPatch::from(row));
            }
        }
        Err(e) => warn!("season records unavailable: {e}"),
    }

    match client.fetch_quick_stats(number, ctx.season).await {
        Ok(record) => team = merge(&team, &StatPatch::from(&record)),
        Err(e) => warn!("quick stats unavailable for team {number}: {e}"),
    }

    let mut official = None;
    let mut awards = Vec::new();
    if client.has_official_credentials() {
        match client.fetch_official_summary(ctx.season, number).await {
            Ok(Some(summary)) => {
                team = merge(&team, &StatPatch::from(&summary));
                official = Some(summary);
            }
            Ok(None) => {}
            Err(e) => warn!("official results unavailable: {e}"),
        }
        match client.fetch_awards(ctx.season, number).await {
            Ok(list) => awards = list,
            Err(e) => warn!("awards unavailable: {e}"),
        }
    }

    let report = TeamReport {
        season: ctx.season,
        team,
        official,
        awards,
    };

    if as_json {
        println!("{}", serde_json::to_string_pretty(&report)?); // tarpaulin::skip
        return Ok(());
    }

    print_report(&report);
    Ok(())
}

fn print_report(report: &TeamReport) {
    let t = &report.team;
    println!("Team {} - {} ({})", t.number, t.name, report.season);
    println!("  {} / {} / {}  league {}", t.city, t.region, t.country, t.league);
    match (t.wins, t.losses, t.ties, t.matches) {
        (Some(w), Some(l), Some(ti), Some(m)) => {
            println!("  Record {w}-{l}-{ti} in {m} matches, win rate {}", fmt_pct(t.win_rate))
        }
        _ => println!("  Record unavailable"),
    }
    println!(
        "  EPA {}  OPR {}  RP {}",
        fmt_opt(t.epa, 1),
        fmt_opt(t.opr, 1),
        fmt_opt(t.ranking_points, 1)
    );
    println!(
        "  Auto {}  Teleop {}  Endgame {}",
        fmt_opt(t.auto_points, 1),
        fmt_opt(t.teleop_points, 1),
        fmt_opt(t.endgame_points, 1)
    );
    println!(
        "  Max auto {}  Max teleop {}  Max total {}",
        fmt_opt(t.max_auto, 1),
        fmt_opt(t.max_teleop, 1),
        fmt_opt(t.max_total, 1)
    );
    println!(
        "  Consistency {}  Penalties/match {}  Climb {}  Double park {}",
        fmt_opt(t.consistency, 0),
        fmt_opt(t.penalties_per_match, 2),
        fmt_pct(t.climb_rate),
        fmt_pct(t.double_park_rate)
    );
    if let Some(zone) = &t.shooting_zone {
        println!("  Shooting zone: {zone}");
    }
    println!("  Fit score {}", fmt_opt(t.fit_score, 1));
    if !t.tags.is_empty() {
        println!("  Tags: {}", t.tags.join(", "));
    }
    if !t.stats_loaded {
        println!("  (no live stats found)");
    }

    if let Some(summary) = &report.official {
        println!(
            "Official results: {}-{}-{} over {} matches",
            summary.wins, summary.losses, summary.ties, summary.matches
        );
    }
    for award in &report.awards {
        if award.event_name.is_empty() {
            println!("  🏆 {}", award.name);
        } else {
            println!("  🏆 {} at {}", award.name, award.event_name);
        }
    }
}
