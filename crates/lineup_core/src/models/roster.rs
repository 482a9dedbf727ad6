use fxhash::FxHashMap;

use super::player::{Player, PlayerId};
use crate::error::{LineupError, Result};

/// The fixed, ordered collection of players available to one manager.
///
/// Supplied once per editing session and read-only afterwards. Supply order
/// is meaningful: every sorted listing in the engine breaks ties by it.
#[derive(Debug, Clone)]
pub struct Roster {
    players: Vec<Player>,
    by_id: FxHashMap<PlayerId, usize>,
}

impl Roster {
    /// Builds the roster, rejecting duplicate identifiers up front so the
    /// one-slot-per-player invariant cannot be broken by the input itself.
    pub fn new(players: Vec<Player>) -> Result<Self> {
        let mut by_id = FxHashMap::default();
        for (index, player) in players.iter().enumerate() {
            if by_id.insert(player.id, index).is_some() {
                return Err(LineupError::InvalidRoster {
                    reason: format!("duplicate player id {}", player.id),
                });
            }
        }
        Ok(Self { players, by_id })
    }

    pub fn get(&self, id: PlayerId) -> Option<&Player> {
        self.by_id.get(&id).map(|&index| &self.players[index])
    }

    pub fn contains(&self, id: PlayerId) -> bool {
        self.by_id.contains_key(&id)
    }

    /// Players in supply order.
    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}
