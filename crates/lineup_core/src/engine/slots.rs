use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::player::Role;

/// Category of addressable slots in the lineup arena.
///
/// The goalkeeper is a category like any other (a length-1 array), so every
/// operation addresses slots uniformly as (kind, index).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
#[serde(rename_all = "snake_case")]
pub enum SlotKind {
    Goalkeeper,
    Defenders,
    Midfielders,
    Forwards,
    Bench,
}

impl SlotKind {
    pub const ALL: [SlotKind; 5] = [
        SlotKind::Goalkeeper,
        SlotKind::Defenders,
        SlotKind::Midfielders,
        SlotKind::Forwards,
        SlotKind::Bench,
    ];

    /// The compatibility matrix: which roles a slot of this kind may hold.
    /// Starter categories demand an exact role; the bench takes anyone
    /// (capacity is enforced separately).
    pub fn accepts(&self, role: Role) -> bool {
        match self {
            SlotKind::Goalkeeper => role.is_goalkeeper(),
            SlotKind::Defenders => role.is_defender(),
            SlotKind::Midfielders => role.is_midfielder(),
            SlotKind::Forwards => role.is_forward(),
            SlotKind::Bench => true,
        }
    }

    /// The role a starter slot of this kind requires; `None` for the bench.
    pub fn required_role(&self) -> Option<Role> {
        match self {
            SlotKind::Goalkeeper => Some(Role::Goalkeeper),
            SlotKind::Defenders => Some(Role::Defender),
            SlotKind::Midfielders => Some(Role::Midfielder),
            SlotKind::Forwards => Some(Role::Forward),
            SlotKind::Bench => None,
        }
    }

    /// The starter category a player of the given role belongs to.
    pub fn for_role(role: Role) -> SlotKind {
        match role {
            Role::Goalkeeper => SlotKind::Goalkeeper,
            Role::Defender => SlotKind::Defenders,
            Role::Midfielder => SlotKind::Midfielders,
            Role::Forward => SlotKind::Forwards,
        }
    }

    pub fn is_bench(&self) -> bool {
        matches!(self, SlotKind::Bench)
    }

    pub fn is_starter(&self) -> bool {
        !self.is_bench()
    }

    /// Get slot kind code for compact display and CLI addressing
    pub fn code(&self) -> &'static str {
        match self {
            SlotKind::Goalkeeper => "GK",
            SlotKind::Defenders => "D",
            SlotKind::Midfielders => "C",
            SlotKind::Forwards => "A",
            SlotKind::Bench => "B",
        }
    }
}

impl FromStr for SlotKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "GK" | "P" | "GOALKEEPER" => Ok(SlotKind::Goalkeeper),
            "D" | "DEFENDERS" => Ok(SlotKind::Defenders),
            "C" | "MIDFIELDERS" => Ok(SlotKind::Midfielders),
            "A" | "FORWARDS" => Ok(SlotKind::Forwards),
            "B" | "BENCH" => Ok(SlotKind::Bench),
            _ => Err(format!("Invalid slot kind: {}", s)),
        }
    }
}

/// Address of one slot: category plus zero-based index within it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct SlotRef {
    pub kind: SlotKind,
    pub index: usize,
}

impl SlotRef {
    pub fn new(kind: SlotKind, index: usize) -> Self {
        Self { kind, index }
    }

    pub fn goalkeeper() -> Self {
        Self { kind: SlotKind::Goalkeeper, index: 0 }
    }

    pub fn bench(index: usize) -> Self {
        Self { kind: SlotKind::Bench, index }
    }
}

impl fmt::Display for SlotRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind.code(), self.index)
    }
}

impl FromStr for SlotRef {
    type Err = String;

    /// Parses the CLI form `KIND[:INDEX]`, e.g. `D:2`, `B:0`, or bare `GK`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((kind, index)) => {
                let kind = kind.parse::<SlotKind>()?;
                let index = index
                    .parse::<usize>()
                    .map_err(|_| format!("Invalid slot index: {}", index))?;
                Ok(SlotRef::new(kind, index))
            }
            None => Ok(SlotRef::new(s.parse::<SlotKind>()?, 0)),
        }
    }
}
