//! Statistics engine: normalization, leaderboard scraping, reconciliation and merging.
//!
//! Everything in here is pure and synchronous. Network access lives in
//! [`crate::sources`].

pub mod compat;
pub mod flatten;
pub mod league;
pub mod merge;
pub mod normalize;
pub mod official;
pub mod reconcile;
pub mod resolve;
pub mod scrape;
pub mod types;

pub use compat::{compatibility_score, sort_by_metric, CompatTier, MyTeamProfile, SortMetric};
pub use flatten::{flatten, FlatMap};
pub use league::{classify, classify_raw, League, LeagueSignals};
pub use merge::{merge, DerivationPath, StatPatch, Team};
pub use normalize::{normalize, RawPayload};
pub use official::{aggregate_rankings, OfficialSummary};
pub use reconcile::reconcile;
pub use resolve::resolve;
pub use scrape::scrape;
pub use types::{CanonicalStatRecord, ScrapedRow, StatField};
