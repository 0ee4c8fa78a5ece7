//! CLI argument definitions and parsing.

pub mod types;

use clap::{Args, Parser, Subcommand};
use types::{Season, TeamNumber};

use crate::stats::{League, MyTeamProfile, SortMetric};

/// Scouting and alliance-selection tool for robotics competition teams.
#[derive(Debug, Parser)]
#[clap(name = "action-scout", version)]
pub struct ActionScout {
    #[clap(subcommand)]
    pub command: Commands,
}

/// Filters for team listings
#[derive(Debug, Args)]
pub struct TeamFilters {
    /// Season year (or set `ACTION_SCOUT_SEASON`).
    #[clap(long, short)]
    pub season: Option<Season>,

    /// Only teams in this league, e.g. "KC West" or "stl-mid".
    #[clap(long, short)]
    pub league: Option<League>,

    /// Only teams with at least this average match score.
    #[clap(long)]
    pub min_epa: Option<f64>,
}

/// The user's own team, used as the baseline for partner scoring
#[derive(Debug, Args)]
pub struct ProfileArgs {
    /// Name shown in the report.
    #[clap(long, default_value = "My Team")]
    pub name: String,

    /// Average autonomous points.
    #[clap(long)]
    pub auto: f64,

    /// Average driver-controlled points.
    #[clap(long)]
    pub teleop: f64,

    /// Average endgame points.
    #[clap(long)]
    pub endgame: f64,

    /// Driver consistency, 35-99.
    #[clap(long, default_value_t = 75.0)]
    pub consistency: f64,

    /// Average penalty points conceded per match.
    #[clap(long, default_value_t = 1.0)]
    pub penalties: f64,
}

impl From<ProfileArgs> for MyTeamProfile {
    fn from(args: ProfileArgs) -> Self {
        Self {
            name: args.name,
            auto: args.auto,
            teleop: args.teleop,
            endgame: args.endgame,
            consistency: args.consistency,
            penalties: args.penalties,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List teams with merged statistics, best fit first.
    ///
    /// Loads the roster (Missouri/Kansas unless `--all-regions`), optionally folds in
    /// the season leaderboard, then enriches with per-team quick stats.
    Teams {
        #[clap(flatten)]
        filters: TeamFilters,

        /// Sort by fit, epa, opr, win-rate, auto, teleop, endgame, consistency or rp.
        #[clap(long, default_value = "fit")]
        sort: SortMetric,

        /// Show at most this many teams.
        #[clap(long, short = 'n')]
        limit: Option<usize>,

        /// Merge the season leaderboard (win/loss record and OPR).
        #[clap(long)]
        records: bool,

        /// Skip per-team quick-stat lookups.
        #[clap(long)]
        no_stats: bool,

        /// Do not restrict the roster to Missouri and Kansas.
        #[clap(long)]
        all_regions: bool,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// Full report for one team, including official results when credentials are set.
    Team {
        /// Team number.
        team: TeamNumber,

        /// Season year (or set `ACTION_SCOUT_SEASON`).
        #[clap(long, short)]
        season: Option<Season>,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// Season leaderboard, one best row per team.
    Records {
        /// Season year (or set `ACTION_SCOUT_SEASON`).
        #[clap(long, short)]
        season: Option<Season>,

        /// Show at most this many rows.
        #[clap(long, short = 'n')]
        limit: Option<usize>,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// Manage the local list of tracked teams.
    Watchlist {
        #[clap(subcommand)]
        cmd: WatchlistCmd,
    },

    /// Rank alliance partners by how well they complement your team.
    Compat {
        #[clap(flatten)]
        profile: ProfileArgs,

        /// Report on this team only.
        #[clap(long, short)]
        target: Option<TeamNumber>,

        /// Season year (or set `ACTION_SCOUT_SEASON`).
        #[clap(long, short)]
        season: Option<Season>,

        /// Number of partners to show.
        #[clap(long, default_value_t = 10)]
        top: usize,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum WatchlistCmd {
    /// Start tracking a team.
    Add { team: TeamNumber },
    /// Stop tracking a team.
    Remove { team: TeamNumber },
    /// Show tracked teams.
    List {
        #[clap(long)]
        json: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_teams_command() {
        let app = ActionScout::try_parse_from([
            "action-scout",
            "teams",
            "--league",
            "KC West",
            "--min-epa",
            "40",
            "--sort",
            "opr",
            "--records",
            "-s",
            "2024",
        ])
        .unwrap();

        match app.command {
            Commands::Teams {
                filters,
                sort,
                records,
                no_stats,
                ..
            } => {
                assert_eq!(filters.league, Some(League::KcWest));
                assert_eq!(filters.min_epa, Some(40.0));
                assert_eq!(filters.season, Some(Season::new(2024)));
                assert_eq!(sort, SortMetric::Opr);
                assert!(records);
                assert!(!no_stats);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_watchlist_add() {
        let app = ActionScout::try_parse_from(["action-scout", "watchlist", "add", "19448"]).unwrap();
        match app.command {
            Commands::Watchlist {
                cmd: WatchlistCmd::Add { team },
            } => assert_eq!(team, TeamNumber::new(19448)),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_compat_profile() {
        let app = ActionScout::try_parse_from([
            "action-scout",
            "compat",
            "--auto",
            "20",
            "--teleop",
            "45",
            "--endgame",
            "12",
            "--target",
            "23250",
        ])
        .unwrap();

        match app.command {
            Commands::Compat { profile, target, top, .. } => {
                let profile = MyTeamProfile::from(profile);
                assert_eq!(profile.name, "My Team");
                assert_eq!(profile.total(), 77.0);
                assert_eq!(profile.consistency, 75.0);
                assert_eq!(target, Some(TeamNumber::new(23250)));
                assert_eq!(top, 10);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_invalid_league_rejected() {
        let result = ActionScout::try_parse_from(["action-scout", "teams", "--league", "Atlantis"]);
        assert!(result.is_err());
    }
}
