//! Watchlist command implementation

use crate::{cli::types::TeamNumber, storage::WatchlistDb, Result};

/// What to do with the watchlist
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchlistAction {
    Add(TeamNumber),
    Remove(TeamNumber),
    List { as_json: bool },
}

/// Handle the watchlist command against the default database
pub fn handle_watchlist(action: WatchlistAction) -> Result<()> {
    let mut db = WatchlistDb::new()?;
    run_watchlist(&mut db, action)
}

/// Apply `action` to `db` and print the outcome
pub fn run_watchlist(db: &mut WatchlistDb, action: WatchlistAction) -> Result<()> {
    match action {
        WatchlistAction::Add(team) => {
            if db.add(team)? {
                println!("✓ Added team {team} to watchlist");
            } else {
                println!("Team {team} is already on the watchlist");
            }
        }
        WatchlistAction::Remove(team) => {
            if db.remove(team)? {
                println!("✓ Removed team {team} from watchlist");
            } else {
                println!("Team {team} was not on the watchlist");
            }
        }
        WatchlistAction::List { as_json } => {
            let entries = db.list()?;
            if as_json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else if entries.is_empty() {
                println!("Watchlist is empty");
            } else {
                for entry in entries {
                    println!("{}", entry.team_number);
                }
            }
        }
    }
    Ok(())
}
