use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roster-unique player identifier.
///
/// Assigned by the league backend; opaque to the engine. The lineup stores
/// ids, never player copies, so a player can appear in at most one slot.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct PlayerId(pub u32);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Positional role in the classic fantacalcio scheme.
///
/// Wire codes are the single letters used by league exports:
/// P (portiere), D (difensore), C (centrocampista), A (attaccante).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
pub enum Role {
    #[serde(rename = "P")]
    Goalkeeper,
    #[serde(rename = "D")]
    Defender,
    #[serde(rename = "C")]
    Midfielder,
    #[serde(rename = "A")]
    Forward,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Goalkeeper, Role::Defender, Role::Midfielder, Role::Forward];

    pub fn is_goalkeeper(&self) -> bool {
        matches!(self, Role::Goalkeeper)
    }

    pub fn is_defender(&self) -> bool {
        matches!(self, Role::Defender)
    }

    pub fn is_midfielder(&self) -> bool {
        matches!(self, Role::Midfielder)
    }

    pub fn is_forward(&self) -> bool {
        matches!(self, Role::Forward)
    }

    /// Canonical ordering used everywhere lists are sorted by role:
    /// goalkeepers first, forwards last.
    pub fn sort_order(&self) -> u8 {
        match self {
            Role::Goalkeeper => 0,
            Role::Defender => 1,
            Role::Midfielder => 2,
            Role::Forward => 3,
        }
    }

    /// Get role display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            Role::Goalkeeper => "Goalkeeper",
            Role::Defender => "Defender",
            Role::Midfielder => "Midfielder",
            Role::Forward => "Forward",
        }
    }

    /// Get role abbreviation for compact display (the wire code)
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Role::Goalkeeper => "P",
            Role::Defender => "D",
            Role::Midfielder => "C",
            Role::Forward => "A",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "P" | "GOALKEEPER" => Ok(Role::Goalkeeper),
            "D" | "DEFENDER" => Ok(Role::Defender),
            "C" | "MIDFIELDER" => Ok(Role::Midfielder),
            "A" | "FORWARD" => Ok(Role::Forward),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }
}

/// One roster entry.
///
/// Immutable once loaded. `quotation` and `fvm` (fantasy market value) are
/// display/sort attributes only; the engine never derives rules from them.
/// The serde aliases accept the column names of classic league exports.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub role: Role,
    #[serde(alias = "team")]
    pub club: String,
    #[serde(default, alias = "quotazione_attuale_classico")]
    pub quotation: u32,
    #[serde(default, alias = "fvm_classico")]
    pub fvm: u32,
}

impl Player {
    /// Case-insensitive substring match on display name or club label,
    /// the filter behind the pick-list search box.
    pub fn matches_query(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        let q = query.to_lowercase();
        self.name.to_lowercase().contains(&q) || self.club.to_lowercase().contains(&q)
    }
}
