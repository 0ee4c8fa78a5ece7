//! Team identifier type.

use crate::error::{Result, ScoutError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Type-safe wrapper for competition team numbers.
///
/// # Examples
///
/// ```rust
/// use action_scout::TeamNumber;
///
/// let team: TeamNumber = "19448".parse().unwrap();
/// assert_eq!(team.as_u32(), 19448);
/// assert_eq!(team.to_string(), "19448");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TeamNumber(pub u32);

impl TeamNumber {
    pub fn new(number: u32) -> Self {
        Self(number)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for TeamNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TeamNumber {
    type Err = ScoutError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self(s.trim().parse()?))
    }
}
