//! Team roster listing and single-team lookup.

use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{debug, info};

use super::ScoutClient;
use crate::error::{Result, ScoutError};
use crate::stats::merge::team_number_of;

/// Pull the entity list out of a listing payload: a bare array, or one wrapped
/// under `data`, `teams` or `results`.
pub fn extract_array(payload: &Value) -> Vec<Value> {
    if let Some(items) = payload.as_array() {
        return items.clone();
    }
    ["data", "teams", "results"]
        .iter()
        .find_map(|key| payload.get(*key).and_then(Value::as_array))
        .cloned()
        .unwrap_or_default()
}

fn upper_text(raw: &Value, keys: &[&str]) -> String {
    keys.iter()
        .find_map(|k| raw.get(*k).and_then(Value::as_str))
        .map(|s| s.trim().to_uppercase())
        .unwrap_or_default()
}

/// True for US teams based in Missouri or Kansas.
pub fn in_home_region(raw: &Value) -> bool {
    let country = upper_text(raw, &["country", "country_name", "countryName"]);
    if !country.is_empty() && !matches!(country.as_str(), "USA" | "US" | "UNITED STATES") {
        return false;
    }

    let is_home = |s: &str| matches!(s, "MO" | "MISSOURI" | "KS" | "KANSAS");

    let state = upper_text(raw, &["state", "state_prov", "stateProv"]);
    let region_code = upper_text(raw, &["region_code", "regionCode"]);
    let region = upper_text(raw, &["region"]);

    is_home(&state) || matches!(region_code.as_str(), "USMO" | "USKS") || is_home(&region)
}

/// Keep home-region teams, or everything when none of them are.
pub fn scope_to_home_region(roster: Vec<Value>) -> (Vec<Value>, bool) {
    let scoped: Vec<Value> = roster.iter().filter(|t| in_home_region(t)).cloned().collect();
    if scoped.is_empty() {
        (roster, false)
    } else {
        (scoped, true)
    }
}

impl ScoutClient {
    async fn search_teams(&self, query: &str, limit: u32) -> Result<Vec<Value>> {
        let url = format!("{}/teams/search", self.config.scout_base);
        let mut params = vec![("limit", limit.to_string())];
        if !query.is_empty() {
            params.push(("searchText", query.to_string()));
        }
        let payload = self
            .request_json(self.http.get(&url).query(&params), &url)
            .await?;
        Ok(extract_array(&payload))
    }

    async fn fetch_team_direct(&self, number: u32) -> Result<Option<Value>> {
        let url = format!("{}/teams/{number}", self.config.scout_base);
        let payload = self.get_json(&url).await?;
        let entry = match payload {
            Value::Array(mut items) if !items.is_empty() => items.swap_remove(0),
            other => other,
        };
        Ok((team_number_of(&entry) == Some(number)).then_some(entry))
    }

    /// Every team the search endpoint knows about, sorted by team number.
    ///
    /// The search caps results per query, so it is swept with an empty query and
    /// then each letter and digit. Required teams missing from the sweep are
    /// fetched one by one.
    pub async fn fetch_roster(&self) -> Result<Vec<Value>> {
        if let Some(cached) = self.roster_cache.get(&())? {
            debug!("roster cache hit ({} teams)", cached.len());
            return Ok(cached);
        }

        let queries = std::iter::once(String::new())
            .chain(('a'..='z').chain('0'..='9').map(String::from));

        let mut merged: BTreeMap<u32, Value> = BTreeMap::new();
        let mut had_success = false;
        let mut last_error = None;

        for query in queries {
            match self.search_teams(&query, self.config.team_search_limit).await {
                Ok(teams) => {
                    had_success = true;
                    for team in teams {
                        if let Some(number) = team_number_of(&team) {
                            merged.insert(number, team);
                        }
                    }
                }
                Err(e) => {
                    debug!("team search '{query}' failed: {e}");
                    last_error = Some(e);
                }
            }
        }

        for &number in &self.config.required_teams {
            if merged.contains_key(&number) {
                continue;
            }
            match self.fetch_team_direct(number).await {
                Ok(Some(team)) => {
                    merged.insert(number, team);
                }
                Ok(None) => debug!("required team {number} not returned"),
                Err(e) => debug!("required team {number} lookup failed: {e}"),
            }
        }

        if merged.is_empty() {
            return Err(match last_error {
                Some(e) if !had_success => e,
                _ => ScoutError::NoTeams,
            });
        }

        let teams: Vec<Value> = merged.into_values().collect();
        info!("roster loaded: {} teams", teams.len());
        self.roster_cache.put((), teams.clone())?;
        Ok(teams)
    }

    /// Look one team up directly, falling back to a search by number.
    pub async fn fetch_team(&self, number: u32) -> Result<Value> {
        match self.fetch_team_direct(number).await {
            Ok(Some(team)) => return Ok(team),
            Ok(None) => {}
            Err(e) => debug!("direct lookup for team {number} failed: {e}"),
        }

        match self.search_teams(&number.to_string(), 5).await {
            Ok(rows) => {
                if let Some(team) = rows.into_iter().find(|t| team_number_of(t) == Some(number)) {
                    return Ok(team);
                }
            }
            Err(e) => debug!("search for team {number} failed: {e}"),
        }

        Err(ScoutError::TeamNotFound { number })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_array_shapes() {
        assert_eq!(extract_array(&json!([1, 2])).len(), 2);
        assert_eq!(extract_array(&json!({ "data": [1] })).len(), 1);
        assert_eq!(extract_array(&json!({ "teams": [1, 2, 3] })).len(), 3);
        assert_eq!(extract_array(&json!({ "results": [] })).len(), 0);
        assert!(extract_array(&json!({ "team": { "number": 1 } })).is_empty());
        assert!(extract_array(&json!("nope")).is_empty());
    }

    #[test]
    fn test_home_region_by_state() {
        assert!(in_home_region(&json!({ "country": "USA", "state": "MO" })));
        assert!(in_home_region(&json!({ "stateProv": "Kansas" })));
        assert!(!in_home_region(&json!({ "country": "USA", "state": "IL" })));
    }

    #[test]
    fn test_home_region_by_region_code() {
        assert!(in_home_region(&json!({ "regionCode": "USKS" })));
        assert!(in_home_region(&json!({ "region": "missouri" })));
        assert!(!in_home_region(&json!({ "region_code": "USTX" })));
    }

    #[test]
    fn test_foreign_teams_excluded() {
        assert!(!in_home_region(&json!({ "country": "Canada", "state": "MO" })));
        assert!(in_home_region(&json!({ "country": "United States", "state": "MO" })));
    }

    #[test]
    fn test_scope_falls_back_to_full_roster() {
        let roster = vec![json!({ "state": "TX" }), json!({ "state": "CA" })];
        let (teams, scoped) = scope_to_home_region(roster);
        assert_eq!(teams.len(), 2);
        assert!(!scoped);

        let roster = vec![json!({ "state": "TX" }), json!({ "state": "MO" })];
        let (teams, scoped) = scope_to_home_region(roster);
        assert_eq!(teams.len(), 1);
        assert!(scoped);
    }
}
