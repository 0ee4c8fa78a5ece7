//! Network access to the roster, statistics, leaderboard and official results services.
//!
//! [`ScoutClient`] owns the HTTP client and the TTL caches. Every request is bounded by
//! the configured timeout and non-success statuses become [`ScoutError::Status`].

pub mod official;
pub mod quick_stats;
pub mod records;
pub mod roster;

use reqwest::{Client, RequestBuilder, Response};
use serde_json::Value;
use std::collections::BTreeMap;
use std::future::Future;
use tracing::debug;

use crate::cli::types::Season;
use crate::core::{build_client, ScoutConfig, TtlCache};
use crate::error::{Result, ScoutError};
use crate::stats::ScrapedRow;

pub use roster::{extract_array, in_home_region};

/// Reconciled leaderboard for one season, keyed by team number.
pub type SeasonRecords = BTreeMap<u32, ScrapedRow>;

#[derive(Clone)]
pub struct ScoutClient {
    http: Client,
    config: ScoutConfig,
    roster_cache: TtlCache<(), Vec<Value>>,
    records_cache: TtlCache<Season, SeasonRecords>,
}

impl ScoutClient {
    pub fn new(config: ScoutConfig) -> Result<Self> {
        Ok(Self {
            http: build_client()?,
            roster_cache: TtlCache::new(1, config.cache_ttl),
            records_cache: TtlCache::new(8, config.cache_ttl),
            config,
        })
    }

    pub fn config(&self) -> &ScoutConfig {
        &self.config
    }

    /// Run `fut` under the request timeout.
    async fn bounded<T, F>(&self, url: &str, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        tokio::time::timeout(self.config.timeout, fut)
            .await
            .map_err(|_| ScoutError::Timeout {
                url: url.to_string(),
                secs: self.config.timeout.as_secs(),
            })?
    }

    async fn send(&self, request: RequestBuilder, url: &str) -> Result<Response> {
        debug!("GET {url}");
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ScoutError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response)
    }

    pub(crate) async fn request_json(&self, request: RequestBuilder, url: &str) -> Result<Value> {
        self.bounded(url, async {
            let response = self.send(request, url).await?;
            Ok(response.json::<Value>().await?)
        })
        .await
    }

    pub(crate) async fn request_text(&self, request: RequestBuilder, url: &str) -> Result<String> {
        self.bounded(url, async {
            let response = self.send(request, url).await?;
            Ok(response.text().await?)
        })
        .await
    }

    pub(crate) async fn get_json(&self, url: &str) -> Result<Value> {
        self.request_json(self.http.get(url), url).await
    }
}
