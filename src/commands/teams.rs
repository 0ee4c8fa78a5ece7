//! Team list command implementation

use crate::{
    stats::{sort_by_metric, League, SortMetric},
    Result, Season,
};

use super::common::{filter_teams, load_teams, team_line, CommandContext, LoadOptions};

/// Parameters for the teams command
#[derive(Debug, Clone)]
pub struct TeamsParams {
    pub season: Option<Season>,
    pub league: Option<League>,
    pub min_epa: Option<f64>,
    pub sort: SortMetric,
    pub limit: Option<usize>,
    pub include_records: bool,
    pub enrich: bool,
    pub all_regions: bool,
    pub as_json: bool,
}

/// Handle the teams command
pub async fn handle_teams(params: TeamsParams) -> Result<()> {
    let ctx = CommandContext::new(params.season)?;

    if !params.as_json {
        println!("Loading teams for season {}...", ctx.season);
    }

    // tarpaulin::skip - HTTP call, tested via integration tests
    let teams = load_teams(
        &ctx.client,
        LoadOptions {
            season: ctx.season,
            home_region: !params.all_regions,
            include_records: params.include_records,
            enrich: params.enrich,
        },
    )
    .await?;

    let mut teams = filter_teams(teams, params.league, params.min_epa);
    sort_by_metric(&mut teams, params.sort);
    if let Some(limit) = params.limit {
        teams.truncate(limit);
    }

    if params.as_json {
        println!("{}", serde_json::to_string_pretty(&teams)?); // tarpaulin::skip
    } else {
        let loaded = teams.iter().filter(|t| t.stats_loaded).count();
        println!("✓ {} teams ({} with live stats)", teams.len(), loaded);
        for team in &teams {
            println!("{}", team_line(team));
        }
    }

    Ok(())
}
