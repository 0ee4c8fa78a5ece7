//! Error types for the Action Scout CLI

use thiserror::Error;


pub type Result<T> = std::result::Result<T, ScoutError>;

#[derive(Error, Debug)]
pub enum ScoutError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Failed to parse number: {0}")]
    InvalidNumber(#[from] std::num::ParseIntError),

    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("Request to {url} timed out after {secs}s")]
    Timeout { url: String, secs: u64 },

    #[error("Cache error: {message}")]
    Cache { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Roster source returned no teams")]
    NoTeams,

    #[error("Season {season} records returned no rows")]
    NoSeasonRecords { season: u16 },

    #[error("Team not found: {number}")]
    TeamNotFound { number: u32 },

    #[error("No quick stats available for team {number}")]
    NoQuickStats { number: u32 },

    #[error("Official API credentials not set ({hint})")]
    MissingCredentials { hint: String },

    #[error("Invalid league: {league}")]
    InvalidLeague { league: String },

    #[error("Invalid sort metric: {metric}")]
    InvalidMetric { metric: String },

    #[error("Invalid team profile: {message}")]
    InvalidProfile { message: String },
}

impl From<anyhow::Error> for ScoutError {
    fn from(err: anyhow::Error) -> Self {
        ScoutError::Storage {
            message: err.to_string(),
        }
    }
}
