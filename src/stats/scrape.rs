//! Season-record leaderboard scraping.
//!
//! The leaderboard markup reorders and renames columns between seasons, so columns
//! are located by matching header text rather than by position. Header rows may
//! repeat mid-table; each one replaces the active header set.

use regex::Regex;
use std::sync::LazyLock;
use tracing::trace;

use super::{flatten::parse_finite, types::ScrapedRow};

static ROW_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<tr\b.*?</tr>").expect("row pattern"));
static TH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<th\b[^>]*>(.*?)</th>").expect("th pattern"));
static TD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<td\b[^>]*>(.*?)</td>").expect("td pattern"));
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag pattern"));
static TEAM_CELL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d{1,6})\s+(.+?)\s*$").expect("team cell pattern"));
static RECORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*-\s*(\d+)\s*-\s*(\d+)").expect("record pattern"));

/// Columns the scraper knows how to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Team,
    TotalOpr,
    AutoOpr,
    TeleopOpr,
    EndgameOpr,
    TotalAvg,
    Record,
}

static COLUMN_RULES: LazyLock<Vec<(Column, Vec<Regex>)>> = LazyLock::new(|| {
    let rules: [(Column, &[&str]); 7] = [
        (Column::Team, &["team", "number"]),
        (Column::TotalOpr, &[r"np.*opr", r"total.*np", r"total.*opr"]),
        (Column::AutoOpr, &[r"^auto", r"auto.*opr", r"auto.*avg"]),
        (Column::TeleopOpr, &["teleop", r"driver.*controlled"]),
        (Column::EndgameOpr, &["endgame", r"end.*game"]),
        (Column::TotalAvg, &[r"np.*avg", r"total.*avg"]),
        (Column::Record, &["record", r"w-?l-?t"]),
    ];
    rules
        .into_iter()
        .map(|(column, patterns)| {
            let compiled = patterns
                .iter()
                .map(|p| Regex::new(p).expect("column pattern"))
                .collect();
            (column, compiled)
        })
        .collect()
});

/// Column positions resolved from one header row.
#[derive(Debug, Clone, Default, PartialEq)]
struct ColumnMap {
    team: Option<usize>,
    total_opr: Option<usize>,
    auto_opr: Option<usize>,
    teleop_opr: Option<usize>,
    endgame_opr: Option<usize>,
    total_avg: Option<usize>,
    record: Option<usize>,
}

impl ColumnMap {
    fn from_headers(headers: &[String]) -> Self {
        let mut map = ColumnMap::default();
        for (column, patterns) in COLUMN_RULES.iter() {
            let idx = headers
                .iter()
                .position(|h| patterns.iter().any(|p| p.is_match(h)));
            match column {
                Column::Team => map.team = idx,
                Column::TotalOpr => map.total_opr = idx,
                Column::AutoOpr => map.auto_opr = idx,
                Column::TeleopOpr => map.teleop_opr = idx,
                Column::EndgameOpr => map.endgame_opr = idx,
                Column::TotalAvg => map.total_avg = idx,
                Column::Record => map.record = idx,
            }
        }
        map
    }
}

/// Scrape every data row of a leaderboard page.
pub fn scrape(markup: &str) -> Vec<ScrapedRow> {
    let mut rows = Vec::new();
    let mut columns: Option<ColumnMap> = None;

    for row_match in ROW_RE.find_iter(markup) {
        let row_html = row_match.as_str();

        let headers = cell_texts(&TH_RE, row_html);
        if !headers.is_empty() {
            let lowered: Vec<String> = headers.iter().map(|h| h.to_lowercase()).collect();
            columns = Some(ColumnMap::from_headers(&lowered));
            continue;
        }

        let cells = cell_texts(&TD_RE, row_html);
        let Some(map) = columns.as_ref() else {
            continue;
        };
        if cells.is_empty() {
            continue;
        }

        match parse_row(map, &cells) {
            Some(row) => rows.push(row),
            None => trace!(cells = ?cells, "skipping non-data leaderboard row"),
        }
    }

    rows
}

fn cell_texts(re: &Regex, row_html: &str) -> Vec<String> {
    re.captures_iter(row_html)
        .map(|c| strip_tags(c.get(1).map_or("", |m| m.as_str())))
        .collect()
}

fn parse_row(map: &ColumnMap, cells: &[String]) -> Option<ScrapedRow> {
    let team_cell = cells.get(map.team.unwrap_or(1))?;
    let caps = TEAM_CELL_RE.captures(team_cell)?;
    let team_number: u32 = caps[1].parse().ok().filter(|n| *n > 0)?;

    let mut row = ScrapedRow::new(team_number, caps[2].trim());
    row.total_opr = numeric_cell(cells, map.total_opr);
    row.auto_opr = numeric_cell(cells, map.auto_opr);
    row.teleop_opr = numeric_cell(cells, map.teleop_opr);
    row.endgame_opr = numeric_cell(cells, map.endgame_opr);
    row.total_avg = numeric_cell(cells, map.total_avg);

    let record_idx = map.record.unwrap_or(cells.len().saturating_sub(1));
    if let Some((w, l, t)) = cells.get(record_idx).and_then(|c| parse_record(c)) {
        row.wins = Some(w);
        row.losses = Some(l);
        row.ties = Some(t);
    }

    Some(row)
}

fn numeric_cell(cells: &[String], idx: Option<usize>) -> Option<f64> {
    idx.and_then(|i| cells.get(i)).and_then(|c| parse_number(c))
}

/// Keep digits, `.` and `-`, then parse. Anything unparseable is `None`.
pub fn parse_number(text: &str) -> Option<f64> {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    parse_finite(&cleaned)
}

/// Parse a `W-L-T` triplet.
pub fn parse_record(text: &str) -> Option<(u32, u32, u32)> {
    let caps = RECORD_RE.captures(text)?;
    Some((
        caps[1].parse().ok()?,
        caps[2].parse().ok()?,
        caps[3].parse().ok()?,
    ))
}

/// Strip tags, decode the two entities the leaderboard uses and collapse whitespace.
pub fn strip_tags(html: &str) -> String {
    let text = TAG_RE.replace_all(html, " ");
    let text = text.replace("&nbsp;", " ").replace("&amp;", "&");
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
