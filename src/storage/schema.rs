//! Database schema and connection management

use crate::core::app_cache_dir;
use anyhow::Result;
use rusqlite::Connection;
use std::path::{Path, PathBuf};

/// Database connection manager for the watchlist
pub struct WatchlistDb {
    pub(crate) conn: Connection,
}

impl WatchlistDb {
    /// Open the watchlist in the user's cache directory and ensure tables exist
    pub fn new() -> Result<Self> {
        Self::open(&Self::database_path())
    }

    /// Open (or create) a watchlist database at `path`
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        let mut db = Self { conn };
        db.initialize_schema()?;
        Ok(db)
    }

    /// In-memory database for tests
    pub fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let mut db = Self { conn };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Get the path to the database file
    pub fn database_path() -> PathBuf {
        app_cache_dir().join("watchlist.db")
    }

    /// Initialize the database schema
    pub(crate) fn initialize_schema(&mut self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS watchlist (
                team_number INTEGER PRIMARY KEY,
                added_at INTEGER NOT NULL
            )",
            [],
        )?;
        Ok(())
    }
}
