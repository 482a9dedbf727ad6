use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::LineupError;

/// Admissible formation shapes for the classic 1+10 lineup.
///
/// The set is closed: a shape outside it cannot be represented, so only the
/// textual boundaries (JSON facade, CLI, config files) can ever see an
/// unknown code.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
pub enum Formation {
    #[serde(rename = "3-4-3")]
    F343,
    #[serde(rename = "3-5-2")]
    F352,
    #[serde(rename = "4-3-3")]
    F433,
    #[serde(rename = "4-4-2")]
    F442,
    #[serde(rename = "4-5-1")]
    F451,
    #[serde(rename = "5-3-2")]
    F532,
    #[serde(rename = "5-4-1")]
    F541,
}

impl Formation {
    pub const ALL: [Formation; 7] = [
        Formation::F343,
        Formation::F352,
        Formation::F433,
        Formation::F442,
        Formation::F451,
        Formation::F532,
        Formation::F541,
    ];

    /// Returns (defenders, midfielders, forwards). Goalkeeper count is
    /// always exactly 1 and is not part of the shape.
    pub fn counts(&self) -> (u8, u8, u8) {
        match self {
            Formation::F343 => (3, 4, 3),
            Formation::F352 => (3, 5, 2),
            Formation::F433 => (4, 3, 3),
            Formation::F442 => (4, 4, 2),
            Formation::F451 => (4, 5, 1),
            Formation::F532 => (5, 3, 2),
            Formation::F541 => (5, 4, 1),
        }
    }

    pub fn defenders(&self) -> usize {
        self.counts().0 as usize
    }

    pub fn midfielders(&self) -> usize {
        self.counts().1 as usize
    }

    pub fn forwards(&self) -> usize {
        self.counts().2 as usize
    }

    /// Canonical formation code string (e.g., "4-3-3").
    pub fn code(&self) -> &'static str {
        match self {
            Formation::F343 => "3-4-3",
            Formation::F352 => "3-5-2",
            Formation::F433 => "4-3-3",
            Formation::F442 => "4-4-2",
            Formation::F451 => "4-5-1",
            Formation::F532 => "5-3-2",
            Formation::F541 => "5-4-1",
        }
    }
}

impl Default for Formation {
    fn default() -> Self {
        Formation::F433
    }
}

impl fmt::Display for Formation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Formation {
    type Err = LineupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Formation::ALL
            .iter()
            .find(|shape| shape.code() == s)
            .copied()
            .ok_or_else(|| LineupError::InvalidFormation { code: s.to_string() })
    }
}
