//! Per-team quick statistics, with an event-average fallback.

use futures_util::future::join_all;
use serde_json::{Map, Number, Value};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, info, warn};

use super::{extract_array, ScoutClient};
use crate::cli::types::Season;
use crate::error::{Result, ScoutError};
use crate::stats::flatten::parse_finite;
use crate::stats::{normalize, CanonicalStatRecord, RawPayload};

const QUICK_STAT_ROUTES: [&str; 3] = ["teams/{n}/quick-stats", "teams/{n}/quickstats", "team/{n}/quick-stats"];

/// True when the payload's statistics container holds anything at all.
fn has_content(payload: &Value) -> bool {
    match RawPayload::classify(payload).container() {
        Value::Object(map) => !map.is_empty(),
        Value::Array(items) => !items.is_empty(),
        _ => false,
    }
}

fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => parse_finite(s),
        _ => None,
    }
}

/// Average every numeric key across per-event rows, keeping first-seen key order.
///
/// Each row's numbers are read from its `stats`, `quick_stats` or `quickStats`
/// object when present, otherwise from the row itself.
pub fn average_event_stats(rows: &[Value]) -> Value {
    let mut order: Vec<String> = Vec::new();
    let mut sums: HashMap<String, (f64, u32)> = HashMap::new();

    for row in rows {
        let source = ["stats", "quick_stats", "quickStats"]
            .iter()
            .find_map(|k| row.get(*k).filter(|v| v.is_object()))
            .unwrap_or(row);
        let Some(fields) = source.as_object() else {
            continue;
        };
        for (key, value) in fields {
            let Some(n) = numeric(value) else {
                continue;
            };
            let slot = sums.entry(key.clone()).or_insert_with(|| {
                order.push(key.clone());
                (0.0, 0)
            });
            slot.0 += n;
            slot.1 += 1;
        }
    }

    let mut averaged = Map::new();
    for key in order {
        if let Some((sum, count)) = sums.get(&key) {
            if let Some(n) = Number::from_f64(sum / f64::from((*count).max(1))) {
                averaged.insert(key, Value::Number(n));
            }
        }
    }
    Value::Object(averaged)
}

impl ScoutClient {
    /// Candidate quick-stat URLs, most likely first.
    pub fn quick_stat_urls(&self, number: u32, season: Season) -> Vec<String> {
        let base = &self.config.scout_base;
        let route = |r: &str| format!("{base}/{}", r.replace("{n}", &number.to_string()));

        let mut urls: Vec<String> = season
            .lookup_candidates()
            .into_iter()
            .flat_map(|s| QUICK_STAT_ROUTES.iter().map(move |r| (s, *r)))
            .map(|(s, r)| format!("{}?season={s}", route(r)))
            .collect();
        urls.extend(QUICK_STAT_ROUTES.iter().map(|r| route(r)));
        urls
    }

    /// Normalized quick statistics for one team.
    ///
    /// Tries each quick-stat route until one returns a non-empty payload, then falls
    /// back to averaging the team's per-event stats for the season.
    pub async fn fetch_quick_stats(&self, number: u32, season: Season) -> Result<CanonicalStatRecord> {
        let mut last_error = None;

        for url in self.quick_stat_urls(number, season) {
            match self.get_json(&url).await {
                Ok(payload) if has_content(&payload) => return Ok(normalize(&payload)),
                Ok(_) => debug!("empty quick stats at {url}"),
                Err(e) => {
                    debug!("quick stats attempt failed: {e}");
                    last_error = Some(e);
                }
            }
        }

        let url = format!("{}/teams/{number}/events/{season}", self.config.scout_base);
        match self.get_json(&url).await {
            Ok(payload) => {
                let rows = extract_array(&payload);
                if !rows.is_empty() {
                    debug!("team {number}: averaging {} event rows", rows.len());
                    return Ok(normalize(&average_event_stats(&rows)));
                }
            }
            Err(e) => last_error = Some(e),
        }

        Err(last_error.unwrap_or(ScoutError::NoQuickStats { number }))
    }

    /// Quick stats for many teams, `batch_size` requests at a time.
    ///
    /// Teams whose lookups fail are logged and left out of the result.
    pub async fn fetch_quick_stats_batch(
        &self,
        numbers: &[u32],
        season: Season,
    ) -> BTreeMap<u32, CanonicalStatRecord> {
        let mut stats = BTreeMap::new();

        for chunk in numbers.chunks(self.config.batch_size.max(1)) {
            let lookups = chunk.iter().map(|&number| async move {
                (number, self.fetch_quick_stats(number, season).await)
            });
            for (number, result) in join_all(lookups).await {
                match result {
                    Ok(record) => {
                        stats.insert(number, record);
                    }
                    Err(e) => warn!("quick stats unavailable for team {number}: {e}"),
                }
            }
        }

        info!("quick stats loaded for {}/{} teams", stats.len(), numbers.len());
        stats
    }
}
