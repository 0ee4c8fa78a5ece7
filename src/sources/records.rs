//! Paginated season leaderboard.

use reqwest::header::ACCEPT;
use tracing::{debug, info};

use super::{ScoutClient, SeasonRecords};
use crate::cli::types::Season;
use crate::error::{Result, ScoutError};
use crate::stats::{reconcile, scrape};

impl ScoutClient {
    pub fn records_page_url(&self, season: Season, page: u32) -> String {
        format!("{}/records/{season}/teams?page={page}", self.config.records_base)
    }

    /// The season leaderboard, one best row per team.
    ///
    /// Pages are read in order until one fails or yields no rows.
    pub async fn fetch_season_records(&self, season: Season) -> Result<SeasonRecords> {
        if let Some(cached) = self.records_cache.get(&season)? {
            debug!("season {season} records cache hit");
            return Ok(cached);
        }

        let mut rows = Vec::new();
        for page in 1..=self.config.max_record_pages {
            let url = self.records_page_url(season, page);
            let request = self.http.get(&url).header(ACCEPT, "text/html");
            let markup = match self.request_text(request, &url).await {
                Ok(markup) => markup,
                Err(e) => {
                    debug!("stopping at page {page}: {e}");
                    break;
                }
            };
            let page_rows = scrape(&markup);
            if page_rows.is_empty() {
                debug!("page {page} had no rows");
                break;
            }
            rows.extend(page_rows);
        }

        let best = reconcile(rows);
        if best.is_empty() {
            return Err(ScoutError::NoSeasonRecords {
                season: season.as_u16(),
            });
        }

        info!("season {season}: {} teams on the leaderboard", best.len());
        self.records_cache.put(season, best.clone())?;
        Ok(best)
    }
}
