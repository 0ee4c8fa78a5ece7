//! Season leaderboard command implementation

use crate::{stats::ScrapedRow, Result, Season};

use super::common::{fmt_opt, CommandContext};

/// Handle the records command
pub async fn handle_records(season: Option<Season>, limit: Option<usize>, as_json: bool) -> Result<()> {
    let ctx = CommandContext::new(season)?;

    if !as_json {
        println!("Loading season {} leaderboard...", ctx.season);
    }

    // tarpaulin::skip - HTTP call, tested via integration tests
    let records = ctx.client.fetch_season_records(ctx.season).await?;

    let mut rows: Vec<&ScrapedRow> = records.values().collect();
    rows.sort_by(|a, b| {
        let key = |r: &ScrapedRow| r.total_opr.unwrap_or(f64::NEG_INFINITY);
        key(b).total_cmp(&key(a))
    });
    if let Some(limit) = limit {
        rows.truncate(limit);
    }

    if as_json {
        println!("{}", serde_json::to_string_pretty(&rows)?); // tarpaulin::skip
        return Ok(());
    }

    println!("✓ {} teams", records.len());
    for row in rows {
        let record = match (row.wins, row.losses, row.ties) {
            (Some(w), Some(l), Some(t)) => format!("{w}-{l}-{t}"),
            _ => "-".to_string(),
        };
        println!(
            "{:>6}  {:<28} opr {:>6}  auto {:>5}  teleop {:>6}  endgame {:>5}  {:>8}",
            row.team_number,
            row.name,
            fmt_opt(row.total_opr, 1),
            fmt_opt(row.auto_opr, 1),
            fmt_opt(row.teleop_opr, 1),
            fmt_opt(row.endgame_opr, 1),
            record
        );
    }

    Ok(())
}
