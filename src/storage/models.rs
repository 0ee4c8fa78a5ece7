//! Data models for the storage layer

use crate::cli::types::TeamNumber;
use serde::{Deserialize, Serialize};

/// A team the user is tracking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchlistEntry {
    pub team_number: TeamNumber,
    /// Unix seconds when the team was first added
    pub added_at: u64,
}
