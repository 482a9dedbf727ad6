use serde::{Deserialize, Serialize};

use super::slots::{SlotKind, SlotRef};
use crate::error::{LineupError, Result};
use crate::models::formation::Formation;
use crate::models::player::{PlayerId, Role};
use crate::models::roster::Roster;
use crate::models::rules::BenchRules;

/// The mutable lineup arena: one fixed-size array of optional player ids per
/// slot category, goalkeeper included as a length-1 array.
///
/// Array lengths are structural: outfield lengths always equal the current
/// formation counts, the bench length always equals the sum of the bench
/// capacities. Hosts read the arena freely but mutate it only through
/// `LineupEngine`.
///
/// Invariant: a player id appears in at most one slot across all five
/// arrays.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Lineup {
    formation: Formation,
    goalkeeper: Vec<Option<PlayerId>>,
    defenders: Vec<Option<PlayerId>>,
    midfielders: Vec<Option<PlayerId>>,
    forwards: Vec<Option<PlayerId>>,
    bench: Vec<Option<PlayerId>>,
}

impl Lineup {
    /// Empty arena sized for the given shape and bench rules.
    pub fn new(formation: Formation, rules: &BenchRules) -> Self {
        Self {
            formation,
            goalkeeper: vec![None],
            defenders: vec![None; formation.defenders()],
            midfielders: vec![None; formation.midfielders()],
            forwards: vec![None; formation.forwards()],
            bench: vec![None; rules.bench_len()],
        }
    }

    pub fn formation(&self) -> Formation {
        self.formation
    }

    /// Read view of one category's slots.
    pub fn slots(&self, kind: SlotKind) -> &[Option<PlayerId>] {
        match kind {
            SlotKind::Goalkeeper => &self.goalkeeper,
            SlotKind::Defenders => &self.defenders,
            SlotKind::Midfielders => &self.midfielders,
            SlotKind::Forwards => &self.forwards,
            SlotKind::Bench => &self.bench,
        }
    }

    fn slots_mut(&mut self, kind: SlotKind) -> &mut Vec<Option<PlayerId>> {
        match kind {
            SlotKind::Goalkeeper => &mut self.goalkeeper,
            SlotKind::Defenders => &mut self.defenders,
            SlotKind::Midfielders => &mut self.midfielders,
            SlotKind::Forwards => &mut self.forwards,
            SlotKind::Bench => &mut self.bench,
        }
    }

    pub fn len_of(&self, kind: SlotKind) -> usize {
        self.slots(kind).len()
    }

    pub fn contains_slot(&self, slot: SlotRef) -> bool {
        slot.index < self.len_of(slot.kind)
    }

    /// Occupant of a slot; `None` for an empty slot or an address outside
    /// the arena (callers that must distinguish check `contains_slot`).
    pub fn occupant(&self, slot: SlotRef) -> Option<PlayerId> {
        self.slots(slot.kind).get(slot.index).copied().flatten()
    }

    /// Where a player currently sits, if anywhere.
    pub fn slot_of(&self, id: PlayerId) -> Option<SlotRef> {
        for kind in SlotKind::ALL {
            if let Some(index) = self.slots(kind).iter().position(|s| *s == Some(id)) {
                return Some(SlotRef::new(kind, index));
            }
        }
        None
    }

    pub fn contains_player(&self, id: PlayerId) -> bool {
        self.slot_of(id).is_some()
    }

    /// All occupied slots in arena order (goalkeeper, defenders,
    /// midfielders, forwards, bench; index ascending).
    pub fn occupied(&self) -> Vec<(SlotRef, PlayerId)> {
        let mut out = Vec::new();
        for kind in SlotKind::ALL {
            for (index, slot) in self.slots(kind).iter().enumerate() {
                if let Some(id) = slot {
                    out.push((SlotRef::new(kind, index), *id));
                }
            }
        }
        out
    }

    pub fn assigned_count(&self) -> usize {
        SlotKind::ALL
            .iter()
            .map(|&kind| self.slots(kind).iter().filter(|s| s.is_some()).count())
            .sum()
    }

    /// Occupants of bench slots holding the given role.
    pub fn bench_role_count(&self, roster: &Roster, role: Role) -> usize {
        self.bench
            .iter()
            .flatten()
            .filter_map(|id| roster.get(*id))
            .filter(|p| p.role == role)
            .count()
    }

    /// In-range write; returns the previous occupant. Callers validate the
    /// address first.
    pub(crate) fn set(&mut self, slot: SlotRef, occupant: Option<PlayerId>) -> Option<PlayerId> {
        std::mem::replace(&mut self.slots_mut(slot.kind)[slot.index], occupant)
    }

    /// Clears a slot if the address names one; returns the evicted occupant.
    pub(crate) fn clear(&mut self, slot: SlotRef) -> Option<PlayerId> {
        match self.slots_mut(slot.kind).get_mut(slot.index) {
            Some(entry) => entry.take(),
            None => None,
        }
    }

    /// Applies a new formation shape: each outfield array is truncated or
    /// grown to its new length, goalkeeper and bench untouched. Returns the
    /// occupants evicted by truncation, in arena order.
    pub(crate) fn resize_outfield(&mut self, formation: Formation) -> Vec<PlayerId> {
        let mut evicted = Vec::new();
        let targets = [
            (SlotKind::Defenders, formation.defenders()),
            (SlotKind::Midfielders, formation.midfielders()),
            (SlotKind::Forwards, formation.forwards()),
        ];
        for (kind, new_len) in targets {
            let slots = self.slots_mut(kind);
            if new_len < slots.len() {
                evicted.extend(slots.drain(new_len..).flatten());
            } else {
                slots.resize(new_len, None);
            }
        }
        self.formation = formation;
        evicted
    }

    /// Structural and referential checks for rehydrated lineups: array
    /// lengths must match the declared shape and bench rules, every id must
    /// exist in the roster, and no id may appear twice.
    pub fn check_integrity(&self, roster: &Roster, rules: &BenchRules) -> Result<()> {
        let expected = [
            (SlotKind::Goalkeeper, 1),
            (SlotKind::Defenders, self.formation.defenders()),
            (SlotKind::Midfielders, self.formation.midfielders()),
            (SlotKind::Forwards, self.formation.forwards()),
            (SlotKind::Bench, rules.bench_len()),
        ];
        for (kind, len) in expected {
            if self.len_of(kind) != len {
                return Err(LineupError::InvalidSnapshot {
                    reason: format!(
                        "{:?} has {} slots, expected {} for {}",
                        kind,
                        self.len_of(kind),
                        len,
                        self.formation.code()
                    ),
                });
            }
        }

        let mut seen = Vec::new();
        for (slot, id) in self.occupied() {
            let player = roster.get(id).ok_or_else(|| LineupError::InvalidSnapshot {
                reason: format!("player {} at {} is not in the roster", id, slot),
            })?;
            if !slot.kind.accepts(player.role) {
                return Err(LineupError::InvalidSnapshot {
                    reason: format!("{} player {} cannot occupy {}", player.role, id, slot),
                });
            }
            if seen.contains(&id) {
                return Err(LineupError::InvalidSnapshot {
                    reason: format!("player {} occupies more than one slot", id),
                });
            }
            seen.push(id);
        }
        Ok(())
    }
}

// ============================================================================//
// Tests
// ============================================================================//
#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::player::Player;

    fn make_player(id: u32, role: Role) -> Player {
        Player {
            id: PlayerId(id),
            name: format!("Player {}", id),
            role,
            club: "Test FC".to_string(),
            quotation: 1,
            fvm: 1,
        }
    }

    fn small_roster() -> Roster {
        Roster::new(vec![
            make_player(1, Role::Goalkeeper),
            make_player(2, Role::Defender),
            make_player(3, Role::Defender),
            make_player(4, Role::Midfielder),
            make_player(5, Role::Forward),
        ])
        .unwrap()
    }

    #[test]
    fn new_arena_is_sized_by_shape_and_rules() {
        let lineup = Lineup::new(Formation::F433, &BenchRules::default());
        assert_eq!(lineup.len_of(SlotKind::Goalkeeper), 1);
        assert_eq!(lineup.len_of(SlotKind::Defenders), 4);
        assert_eq!(lineup.len_of(SlotKind::Midfielders), 3);
        assert_eq!(lineup.len_of(SlotKind::Forwards), 3);
        assert_eq!(lineup.len_of(SlotKind::Bench), 10);
        assert_eq!(lineup.assigned_count(), 0);
    }

    #[test]
    fn set_clear_and_slot_of() {
        let mut lineup = Lineup::new(Formation::F433, &BenchRules::default());
        let slot = SlotRef::new(SlotKind::Defenders, 2);

        assert_eq!(lineup.set(slot, Some(PlayerId(2))), None);
        assert_eq!(lineup.occupant(slot), Some(PlayerId(2)));
        assert_eq!(lineup.slot_of(PlayerId(2)), Some(slot));
        assert!(lineup.contains_player(PlayerId(2)));

        assert_eq!(lineup.clear(slot), Some(PlayerId(2)));
        assert_eq!(lineup.occupant(slot), None);
        assert_eq!(lineup.slot_of(PlayerId(2)), None);
    }

    #[test]
    fn clear_out_of_range_is_a_noop() {
        let mut lineup = Lineup::new(Formation::F433, &BenchRules::default());
        assert_eq!(lineup.clear(SlotRef::new(SlotKind::Defenders, 99)), None);
    }

    #[test]
    fn resize_preserves_low_indexes_and_reports_evictions() {
        let mut lineup = Lineup::new(Formation::F433, &BenchRules::default());
        for i in 0..4 {
            lineup.set(SlotRef::new(SlotKind::Defenders, i), Some(PlayerId(10 + i as u32)));
        }

        let evicted = lineup.resize_outfield(Formation::F343);
        assert_eq!(evicted, vec![PlayerId(13)]);
        assert_eq!(lineup.formation(), Formation::F343);
        assert_eq!(lineup.len_of(SlotKind::Defenders), 3);
        assert_eq!(lineup.len_of(SlotKind::Midfielders), 4);
        assert_eq!(lineup.occupant(SlotRef::new(SlotKind::Defenders, 0)), Some(PlayerId(10)));
        assert_eq!(lineup.occupant(SlotRef::new(SlotKind::Midfielders, 3)), None);
    }

    #[test]
    fn bench_role_count_reads_roster_roles() {
        let roster = small_roster();
        let mut lineup = Lineup::new(Formation::F433, &BenchRules::default());
        lineup.set(SlotRef::bench(0), Some(PlayerId(2)));
        lineup.set(SlotRef::bench(1), Some(PlayerId(3)));
        lineup.set(SlotRef::bench(2), Some(PlayerId(4)));

        assert_eq!(lineup.bench_role_count(&roster, Role::Defender), 2);
        assert_eq!(lineup.bench_role_count(&roster, Role::Midfielder), 1);
        assert_eq!(lineup.bench_role_count(&roster, Role::Goalkeeper), 0);
    }

    #[test]
    fn snapshot_serde_shape() {
        let mut lineup = Lineup::new(Formation::F442, &BenchRules::new(1, 1, 1, 1));
        lineup.set(SlotRef::goalkeeper(), Some(PlayerId(1)));
        let json = serde_json::to_string(&lineup).unwrap();
        assert!(json.contains(r#""formation":"4-4-2""#));
        assert!(json.contains(r#""goalkeeper":[1]"#));

        let restored: Lineup = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, lineup);
    }

    #[test]
    fn integrity_rejects_duplicates_unknowns_and_bad_lengths() {
        let roster = small_roster();
        let rules = BenchRules::default();

        let mut lineup = Lineup::new(Formation::F433, &rules);
        lineup.set(SlotRef::new(SlotKind::Defenders, 0), Some(PlayerId(2)));
        lineup.set(SlotRef::bench(0), Some(PlayerId(2)));
        let err = lineup.check_integrity(&roster, &rules).unwrap_err();
        assert_eq!(err.code(), "INVALID_SNAPSHOT");

        let mut lineup = Lineup::new(Formation::F433, &rules);
        lineup.set(SlotRef::goalkeeper(), Some(PlayerId(99)));
        assert!(lineup.check_integrity(&roster, &rules).is_err());

        let lineup = Lineup::new(Formation::F433, &BenchRules::new(0, 0, 0, 0));
        assert!(lineup.check_integrity(&roster, &rules).is_err());

        let mut lineup = Lineup::new(Formation::F433, &rules);
        lineup.set(SlotRef::new(SlotKind::Defenders, 1), Some(PlayerId(3)));
        assert!(lineup.check_integrity(&roster, &rules).is_ok());
    }
}
