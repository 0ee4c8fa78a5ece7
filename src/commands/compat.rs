//! Alliance compatibility command implementation

use serde::Serialize;

use crate::{
    cli::types::TeamNumber,
    stats::{compatibility_score, CompatTier, MyTeamProfile, Team},
    Result, ScoutError, Season,
};

use super::common::{fmt_opt, load_teams, CommandContext, LoadOptions};

/// Parameters for the compat command
#[derive(Debug, Clone)]
pub struct CompatParams {
    pub profile: MyTeamProfile,
    pub season: Option<Season>,
    pub target: Option<TeamNumber>,
    pub top: usize,
    pub as_json: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompatEntry {
    pub team_number: u32,
    pub name: String,
    pub score: f64,
    pub tier: String,
}

/// Reject profiles with non-finite or negative numbers.
pub fn validate_profile(profile: &MyTeamProfile) -> Result<()> {
    let fields = [
        ("auto", profile.auto),
        ("teleop", profile.teleop),
        ("endgame", profile.endgame),
        ("consistency", profile.consistency),
        ("penalties", profile.penalties),
    ];
    for (name, value) in fields {
        if !value.is_finite() || value < 0.0 {
            return Err(ScoutError::InvalidProfile {
                message: format!("{name} must be a non-negative number, got {value}"),
            });
        }
    }
    Ok(())
}

/// Score every team against the profile, best first. Teams without any stats are skipped.
pub fn rank_partners(profile: &MyTeamProfile, teams: &[Team]) -> Vec<CompatEntry> {
    let mut entries: Vec<CompatEntry> = teams
        .iter()
        .filter(|t| t.stats_loaded)
        .map(|t| {
            let score = compatibility_score(profile, t);
            CompatEntry {
                team_number: t.number,
                name: t.name.clone(),
                score,
                tier: CompatTier::from_score(score).to_string(),
            }
        })
        .collect();
    entries.sort_by(|a, b| b.score.total_cmp(&a.score));
    entries
}

/// Handle the compat command
pub async fn handle_compat(params: CompatParams) -> Result<()> {
    validate_profile(&params.profile)?;
    let ctx = CommandContext::new(params.season)?;

    if !params.as_json {
        println!(
            "Scoring partners for {} (total {:.1}, consistency {:.0}, penalties {:.2})...",
            params.profile.name,
            params.profile.total(),
            params.profile.consistency,
            params.profile.penalties
        );
    }

    // tarpaulin::skip - HTTP call, tested via integration tests
    let teams = load_teams(
        &ctx.client,
        LoadOptions {
            season: ctx.season,
            home_region: true,
            include_records: true,
            enrich: true,
        },
    )
    .await?;

    let mut entries = rank_partners(&params.profile, &teams);
    match params.target {
        Some(target) => {
            let number = target.as_u32();
            entries.retain(|e| e.team_number == number);
            if entries.is_empty() {
                return Err(ScoutError::TeamNotFound { number });
            }
        }
        None => entries.truncate(params.top),
    }

    if params.as_json {
        println!("{}", serde_json::to_string_pretty(&entries)?); // tarpaulin::skip
        return Ok(());
    }

    for entry in &entries {
        println!(
            "{:>6}  {:<28} {:>5}  {}",
            entry.team_number,
            entry.name,
            fmt_opt(Some(entry.score), 1),
            entry.tier
        );
    }
    Ok(())
}
