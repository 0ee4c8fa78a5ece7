//! Season year type.

use crate::error::{Result, ScoutError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Type-safe wrapper for competition season years.
///
/// A season is named by the calendar year it starts in, so the 2025-26 game is `2025`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Season(pub u16);

impl Season {
    pub fn new(year: u16) -> Self {
        Self(year)
    }

    pub fn as_u16(&self) -> u16 {
        self.0
    }

    /// Seasons worth probing for stats when the requested one has none yet:
    /// this one, the two before it, then the next. Years up to 2010 are skipped.
    pub fn lookup_candidates(&self) -> Vec<Season> {
        let year = i32::from(self.0);
        let mut out: Vec<Season> = Vec::with_capacity(4);
        for candidate in [year, year - 1, year - 2, year + 1] {
            if candidate <= 2010 {
                continue;
            }
            let Ok(candidate) = u16::try_from(candidate) else {
                continue;
            };
            if !out.iter().any(|s| s.0 == candidate) {
                out.push(Season(candidate));
            }
        }
        out
    }
}

impl Default for Season {
    fn default() -> Self {
        Self(2025)
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Season {
    type Err = ScoutError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self(s.trim().parse()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_season_parse_and_display() {
        let season: Season = "2024".parse().unwrap();
        assert_eq!(season.as_u16(), 2024);
        assert_eq!(season.to_string(), "2024");
        assert!("twenty".parse::<Season>().is_err());
    }

    #[test]
    fn test_lookup_candidates_order() {
        let years: Vec<u16> = Season::new(2025)
            .lookup_candidates()
            .iter()
            .map(Season::as_u16)
            .collect();
        assert_eq!(years, vec![2025, 2024, 2023, 2026]);
    }

    #[test]
    fn test_lookup_candidates_skip_old_years() {
        let years: Vec<u16> = Season::new(2012)
            .lookup_candidates()
            .iter()
            .map(Season::as_u16)
            .collect();
        assert_eq!(years, vec![2012, 2011, 2013]);
    }
}
