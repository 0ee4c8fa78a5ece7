//! Deduplication of leaderboard rows that describe the same team.

use std::collections::BTreeMap;

use super::types::ScrapedRow;

/// Keep one row per team number: the one with the highest total OPR.
///
/// A missing OPR ranks below any finite value. On an exact tie the row seen first
/// is kept, so overlapping pages never flip a choice already made.
pub fn reconcile<I>(rows: I) -> BTreeMap<u32, ScrapedRow>
where
    I: IntoIterator<Item = ScrapedRow>,
{
    let mut best: BTreeMap<u32, ScrapedRow> = BTreeMap::new();

    for row in rows {
        match best.get(&row.team_number) {
            Some(prev) if score(&row) <= score(prev) => {}
            _ => {
                best.insert(row.team_number, row);
            }
        }
    }

    best
}

fn score(row: &ScrapedRow) -> f64 {
    row.total_opr
        .filter(|v| v.is_finite())
        .unwrap_or(f64::NEG_INFINITY)
}
