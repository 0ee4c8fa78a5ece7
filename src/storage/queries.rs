//! Watchlist query operations

use super::{models::WatchlistEntry, schema::WatchlistDb};
use crate::cli::types::TeamNumber;
use anyhow::Result;
use rusqlite::{params, OptionalExtension, Row};
use std::time::{SystemTime, UNIX_EPOCH};

fn entry_from_row(row: &Row) -> rusqlite::Result<WatchlistEntry> {
    Ok(WatchlistEntry {
        team_number: TeamNumber::new(row.get(0)?),
        added_at: row.get::<_, i64>(1)?.max(0) as u64,
    })
}

impl WatchlistDb {
    /// Start tracking a team. Re-adding keeps the original timestamp.
    ///
    /// Returns true when the team was not already tracked.
    pub fn add(&mut self, team: TeamNumber) -> Result<bool> {
        let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
        let inserted = self.conn.execute(
            "INSERT OR IGNORE INTO watchlist (team_number, added_at) VALUES (?, ?)",
            params![team.as_u32(), now as i64],
        )?;
        Ok(inserted > 0)
    }

    /// Stop tracking a team. Returns true when it was tracked.
    pub fn remove(&mut self, team: TeamNumber) -> Result<bool> {
        let removed = self.conn.execute(
            "DELETE FROM watchlist WHERE team_number = ?",
            params![team.as_u32()],
        )?;
        Ok(removed > 0)
    }

    pub fn contains(&self, team: TeamNumber) -> Result<bool> {
        let found = self
            .conn
            .query_row(
                "SELECT 1 FROM watchlist WHERE team_number = ?",
                params![team.as_u32()],
                |_| Ok(()),
            )
            .optional()?;
        Ok(found.is_some())
    }

    /// All tracked teams, lowest number first
    pub fn list(&self) -> Result<Vec<WatchlistEntry>> {
        let mut stmt = self
            .conn
            .prepare("SELECT team_number, added_at FROM watchlist ORDER BY team_number ASC")?;
        let entries = stmt
            .query_map([], entry_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(entries)
    }
}
