//! Runtime configuration for the scouting client.

use std::time::Duration;

use crate::cli::types::Season;

pub const SCOUT_API_BASE: &str = "https://api.ftcscout.org/rest/v1";
pub const RECORDS_BASE: &str = "https://ftcscout.j5155.page";
pub const OFFICIAL_API_BASE: &str = "https://ftc-api.firstinspires.org/v2.0";
pub const USER_AGENT: &str = "ActionScout/1.0";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(12);
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(10 * 60);
pub const DEFAULT_BATCH_SIZE: usize = 6;
pub const MAX_RECORD_PAGES: u32 = 40;
pub const MAX_OFFICIAL_EVENTS: usize = 40;
pub const TEAM_SEARCH_LIMIT: u32 = 1000;
pub const QUICK_STAT_TEAM_CAP: usize = 60;
pub const REQUIRED_TEAM_NUMBERS: [u32; 3] = [19448, 23250, 25779];

pub const SEASON_ENV_VAR: &str = "ACTION_SCOUT_SEASON";
pub const TIMEOUT_ENV_VAR: &str = "ACTION_SCOUT_TIMEOUT_SECS";
pub const BATCH_ENV_VAR: &str = "ACTION_SCOUT_BATCH";
pub const OFFICIAL_USER_ENV_VAR: &str = "FTC_API_USER";
pub const OFFICIAL_KEY_ENV_VAR: &str = "FTC_API_KEY";
pub const OFFICIAL_TOKEN_ENV_VAR: &str = "FTC_API_TOKEN";

/// Credentials for the official results service, forwarded as HTTP basic auth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OfficialCredentials {
    /// A pre-encoded basic-auth token.
    Token(String),
    UserKey { user: String, key: String },
}

impl OfficialCredentials {
    /// Read credentials from the environment. A token takes precedence over a user/key pair.
    pub fn from_env() -> Option<Self> {
        let var = |name: &str| {
            std::env::var(name)
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some(token) = var(OFFICIAL_TOKEN_ENV_VAR) {
            return Some(Self::Token(token));
        }
        match (var(OFFICIAL_USER_ENV_VAR), var(OFFICIAL_KEY_ENV_VAR)) {
            (Some(user), Some(key)) => Some(Self::UserKey { user, key }),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScoutConfig {
    pub season: Season,
    pub scout_base: String,
    pub records_base: String,
    pub official_base: String,
    pub timeout: Duration,
    pub cache_ttl: Duration,
    pub batch_size: usize,
    pub max_record_pages: u32,
    pub max_official_events: usize,
    pub team_search_limit: u32,
    pub quick_stat_cap: usize,
    pub required_teams: Vec<u32>,
    pub credentials: Option<OfficialCredentials>,
}

impl Default for ScoutConfig {
    fn default() -> Self {
        Self {
            season: Season::default(),
            scout_base: SCOUT_API_BASE.to_string(),
            records_base: RECORDS_BASE.to_string(),
            official_base: OFFICIAL_API_BASE.to_string(),
            timeout: DEFAULT_TIMEOUT,
            cache_ttl: DEFAULT_CACHE_TTL,
            batch_size: DEFAULT_BATCH_SIZE,
            max_record_pages: MAX_RECORD_PAGES,
            max_official_events: MAX_OFFICIAL_EVENTS,
            team_search_limit: TEAM_SEARCH_LIMIT,
            quick_stat_cap: QUICK_STAT_TEAM_CAP,
            required_teams: REQUIRED_TEAM_NUMBERS.to_vec(),
            credentials: None,
        }
    }
}

impl ScoutConfig {
    /// Defaults overridden by whatever the environment sets. Unparseable values are
    /// ignored with a warning.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(season) = env_parse::<Season>(SEASON_ENV_VAR) {
            config.season = season;
        }
        if let Some(secs) = env_parse::<u64>(TIMEOUT_ENV_VAR).filter(|s| *s > 0) {
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(batch) = env_parse::<usize>(BATCH_ENV_VAR).filter(|b| *b > 0) {
            config.batch_size = batch;
        }
        config.credentials = OfficialCredentials::from_env();

        config
    }

    pub fn with_season(mut self, season: Season) -> Self {
        self.season = season;
        self
    }

    /// Point every base URL at one server. Used by tests against a local mock.
    pub fn with_base_url(mut self, base: &str) -> Self {
        let base = base.trim_end_matches('/').to_string();
        self.scout_base = base.clone();
        self.records_base = base.clone();
        self.official_base = base;
        self
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(var = name, value = %raw, "ignoring unparseable environment value");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ScoutConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(12));
        assert_eq!(config.cache_ttl, Duration::from_secs(600));
        assert_eq!(config.batch_size, 6);
        assert_eq!(config.max_record_pages, 40);
        assert_eq!(config.required_teams, vec![19448, 23250, 25779]);
        assert!(config.credentials.is_none());
    }

    #[test]
    fn test_with_base_url_trims_slash() {
        let config = ScoutConfig::default().with_base_url("http://127.0.0.1:9000/");
        assert_eq!(config.scout_base, "http://127.0.0.1:9000");
        assert_eq!(config.records_base, "http://127.0.0.1:9000");
        assert_eq!(config.official_base, "http://127.0.0.1:9000");
    }

    #[test]
    fn test_from_env_overrides() {
        std::env::set_var(SEASON_ENV_VAR, "2023");
        std::env::set_var(TIMEOUT_ENV_VAR, "3");
        std::env::set_var(BATCH_ENV_VAR, "not-a-number");
        std::env::set_var(OFFICIAL_TOKEN_ENV_VAR, "abc123");

        let config = ScoutConfig::from_env();
        assert_eq!(config.season, Season::new(2023));
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.batch_size, DEFAULT_BATCH_SIZE);
        assert_eq!(
            config.credentials,
            Some(OfficialCredentials::Token("abc123".to_string()))
        );

        std::env::remove_var(SEASON_ENV_VAR);
        std::env::remove_var(TIMEOUT_ENV_VAR);
        std::env::remove_var(BATCH_ENV_VAR);
        std::env::remove_var(OFFICIAL_TOKEN_ENV_VAR);
    }
}
