//! Entry point: parse CLI and dispatch to command handlers.

use action_scout::{
    cli::{ActionScout, Commands, WatchlistCmd},
    commands::{
        compat::{handle_compat, CompatParams},
        records::handle_records,
        team::handle_team,
        teams::{handle_teams, TeamsParams},
        watchlist::{handle_watchlist, WatchlistAction},
    },
    Result,
};
use clap::Parser;

/// Log to stderr so JSON on stdout stays clean. `RUST_LOG` overrides the default level.
fn init_tracing() {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("action_scout=warn,warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}

/// Run the CLI.
#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let app = ActionScout::parse();

    match app.command {
        Commands::Teams {
            filters,
            sort,
            limit,
            records,
            no_stats,
            all_regions,
            json,
        } => {
            handle_teams(TeamsParams {
                season: filters.season,
                league: filters.league,
                min_epa: filters.min_epa,
                sort,
                limit,
                include_records: records,
                enrich: !no_stats,
                all_regions,
                as_json: json,
            })
            .await?
        }

        Commands::Team { team, season, json } => handle_team(team, season, json).await?,

        Commands::Records { season, limit, json } => handle_records(season, limit, json).await?,

        Commands::Watchlist { cmd } => {
            let action = match cmd {
                WatchlistCmd::Add { team } => WatchlistAction::Add(team),
                WatchlistCmd::Remove { team } => WatchlistAction::Remove(team),
                WatchlistCmd::List { json } => WatchlistAction::List { as_json: json },
            };
            handle_watchlist(action)?
        }

        Commands::Compat {
            profile,
            target,
            season,
            top,
            json,
        } => {
            handle_compat(CompatParams {
                profile: profile.into(),
                season,
                target,
                top,
                as_json: json,
            })
            .await?
        }
    }

    Ok(())
}
