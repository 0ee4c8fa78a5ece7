//! Official results service: per-event rankings and awards.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::ScoutClient;
use crate::cli::types::Season;
use crate::core::{with_official_auth, OfficialCredentials};
use crate::error::{Result, ScoutError};
use crate::stats::{aggregate_rankings, OfficialSummary};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Award {
    pub name: String,
    pub event_code: String,
    pub event_name: String,
    pub person: String,
}

fn text(raw: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|k| match raw.get(*k)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    })
}

impl Award {
    pub fn from_raw(raw: &Value) -> Self {
        let event = raw.get("event");
        let event_text = |key: &str| event.and_then(|e| text(e, &[key]));

        let name = text(raw, &["name", "awardName", "award"]).unwrap_or_else(|| {
            match raw.get("awardId").filter(|v| !v.is_null()) {
                Some(Value::String(id)) => format!("Award {id}"),
                Some(id) => format!("Award {id}"),
                None => "Award".to_string(),
            }
        });

        Self {
            name,
            event_code: text(raw, &["eventCode"])
                .or_else(|| event_text("code"))
                .unwrap_or_default(),
            event_name: text(raw, &["eventName"])
                .or_else(|| event_text("name"))
                .unwrap_or_default(),
            person: text(raw, &["person"]).unwrap_or_default(),
        }
    }
}

/// Array under `key`, or nothing.
fn array_at(payload: &Value, key: &str) -> Vec<Value> {
    payload
        .get(key)
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default()
}

impl ScoutClient {
    fn credentials(&self) -> Result<&OfficialCredentials> {
        self.config
            .credentials
            .as_ref()
            .ok_or_else(|| ScoutError::MissingCredentials {
                hint: "set FTC_API_USER and FTC_API_KEY, or FTC_API_TOKEN".to_string(),
            })
    }

    pub fn has_official_credentials(&self) -> bool {
        self.config.credentials.is_some()
    }

    async fn official_json(&self, path: &str, query: &[(&str, String)]) -> Result<Value> {
        let url = format!("{}{path}", self.config.official_base);
        let request = with_official_auth(self.http.get(&url).query(query), self.credentials()?)?;
        self.request_json(request, &url).await
    }

    /// Season totals from the team's event rankings. `None` when the team has no
    /// ranked events. Events whose rankings fail to load are skipped.
    pub async fn fetch_official_summary(
        &self,
        season: Season,
        number: u32,
    ) -> Result<Option<OfficialSummary>> {
        let team = [("teamNumber", number.to_string())];
        let events = self.official_json(&format!("/{season}/events"), &team).await?;

        let codes: Vec<String> = array_at(&events, "events")
            .iter()
            .filter_map(|e| text(e, &["code", "eventCode"]))
            .take(self.config.max_official_events)
            .collect();
        if codes.is_empty() {
            return Ok(None);
        }

        let mut rows = Vec::new();
        for code in &codes {
            match self
                .official_json(&format!("/{season}/rankings/{code}"), &team)
                .await
            {
                Ok(payload) => rows.extend(array_at(&payload, "rankings")),
                Err(e) => debug!("rankings for {code} unavailable: {e}"),
            }
        }

        if rows.is_empty() {
            return Ok(None);
        }
        Ok(Some(aggregate_rankings(&rows)))
    }

    pub async fn fetch_awards(&self, season: Season, number: u32) -> Result<Vec<Award>> {
        let payload = self
            .official_json(&format!("/{season}/awards/{number}"), &[])
            .await?;
        Ok(array_at(&payload, "awards").iter().map(Award::from_raw).collect())
    }
}
