//! Action Scout Library
//!
//! Scouting and alliance-selection tooling for FIRST Tech Challenge teams. Team
//! statistics arrive from several public sources in inconsistent shapes; this crate
//! normalizes them into one canonical record per team and merges them into a team
//! profile without ever losing a value a source failed to report.
//!
//! ## Features
//!
//! - **Normalization**: Flatten arbitrary stat payloads and resolve canonical fields
//! - **Leaderboard Scraping**: Parse season record pages and keep the best row per team
//! - **Merging**: Monotone merge of partial stat patches with derived fit score and tags
//! - **League Classification**: Map location data onto the Missouri/Kansas leagues
//! - **Official Results**: Aggregate event rankings and awards when API credentials are set
//! - **Watchlist Storage**: Track teams locally in SQLite
//!
//! ## Quick Start
//!
//! ```rust
//! use action_scout::stats::{merge, normalize, StatPatch, Team};
//! use serde_json::json;
//!
//! let record = normalize(&json!({
//!     "total_avg": 88.0,
//!     "auto_avg": 24.0
//! }));
//! let team = Team::new(19448, "Example Robotics");
//! let merged = merge(&team, &StatPatch::from(&record));
//! assert_eq!(merged.epa, Some(88.0));
//! assert!(merged.stats_loaded);
//! ```
//!
//! ## Environment Configuration
//!
//! ```bash
//! export ACTION_SCOUT_SEASON=2025
//! export FTC_API_USER=me FTC_API_KEY=secret   # or FTC_API_TOKEN
//! ```

pub mod cli;
pub mod commands;
pub mod core;
pub mod error;
pub mod sources;
pub mod stats;
pub mod storage;

// Re-export commonly used types
pub use cli::types::{Season, TeamNumber};
pub use error::{Result, ScoutError};
pub use stats::{CanonicalStatRecord, League, ScrapedRow, Team};
