use serde::{Deserialize, Serialize};

use super::candidates::{candidate_groups, swap_groups, CandidateGroup, SwapGroup};
use super::lineup::Lineup;
use super::slots::SlotRef;
use super::validate::{LineupReport, LineupValidator};
use crate::error::{LineupError, Result};
use crate::models::formation::Formation;
use crate::models::player::{Player, PlayerId, Role};
use crate::models::roster::Roster;
use crate::models::rules::BenchRules;

/// Per-role bench occupancy against its capacity, for bench headers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct BenchRoleCount {
    pub role: Role,
    pub used: u8,
    pub limit: u8,
}

/// The lineup editing engine: sole owner and mutator of one session's
/// lineup state.
///
/// Two states drive the operation set: Idle, and SelectionActive while a
/// pick list is open for one slot. `begin_selection` arms the target,
/// `place_player`/`cancel_selection` disarm it; `swap`, `remove_player` and
/// `set_formation` refuse to run mid-selection.
///
/// Every mutating operation either returns the updated lineup or a
/// [`LineupError`] with the lineup untouched.
#[derive(Debug, Clone)]
pub struct LineupEngine {
    roster: Roster,
    rules: BenchRules,
    lineup: Lineup,
    selection: Option<SlotRef>,
}

impl LineupEngine {
    /// Fresh session: empty lineup in the default 4-3-3, no selection.
    pub fn new(roster: Roster, rules: BenchRules) -> Self {
        let lineup = Lineup::new(Formation::default(), &rules);
        Self { roster, rules, lineup, selection: None }
    }

    /// Replaces the initial (still empty) shape. Builder-style, for hosts
    /// that open the editor on a remembered formation.
    pub fn with_formation(mut self, formation: Formation) -> Self {
        self.lineup = Lineup::new(formation, &self.rules);
        self
    }

    /// Restores a session from a lineup the host kept in memory. The
    /// snapshot must be structurally consistent with the roster and rules.
    pub fn from_snapshot(roster: Roster, rules: BenchRules, lineup: Lineup) -> Result<Self> {
        lineup.check_integrity(&roster, &rules)?;
        Ok(Self { roster, rules, lineup, selection: None })
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn rules(&self) -> &BenchRules {
        &self.rules
    }

    pub fn lineup(&self) -> &Lineup {
        &self.lineup
    }

    pub fn formation(&self) -> Formation {
        self.lineup.formation()
    }

    /// The slot currently armed for a placement, if any.
    pub fn selection(&self) -> Option<SlotRef> {
        self.selection
    }

    // ------------------------------------------------------------------
    // Guards
    // ------------------------------------------------------------------

    fn ensure_idle(&self) -> Result<()> {
        match self.selection {
            Some(slot) => Err(LineupError::PendingSelection { slot }),
            None => Ok(()),
        }
    }

    fn ensure_slot(&self, slot: SlotRef) -> Result<()> {
        if self.lineup.contains_slot(slot) {
            Ok(())
        } else {
            Err(LineupError::SlotOutOfRange { slot, len: self.lineup.len_of(slot.kind) })
        }
    }

    // ------------------------------------------------------------------
    // Operations
    // ------------------------------------------------------------------

    /// Switches the formation shape, resizing the outfield arrays.
    /// Occupants whose index survives stay put; occupants beyond the new
    /// length are evicted to unassigned, never auto-benched.
    pub fn set_formation(&mut self, formation: Formation) -> Result<&Lineup> {
        self.ensure_idle()?;
        if formation == self.lineup.formation() {
            return Ok(&self.lineup);
        }
        let evicted = self.lineup.resize_outfield(formation);
        log::info!("formation set to {} ({} evicted)", formation.code(), evicted.len());
        for id in &evicted {
            log::debug!("player {} evicted to unassigned", id);
        }
        Ok(&self.lineup)
    }

    /// Arms `slot` as the placement target and returns its pick list.
    /// Calling again before placing simply retargets.
    pub fn begin_selection(&mut self, slot: SlotRef) -> Result<Vec<CandidateGroup>> {
        self.ensure_slot(slot)?;
        self.selection = Some(slot);
        log::debug!("selection armed for {}", slot);
        Ok(candidate_groups(&self.roster, &self.lineup, slot.kind, ""))
    }

    /// Disarms any active selection. Safe to call in any state.
    pub fn cancel_selection(&mut self) {
        if let Some(slot) = self.selection.take() {
            log::debug!("selection for {} cancelled", slot);
        }
    }

    /// Pick list for a slot: free agents compatible with it, grouped by
    /// role, best fvm first. Pure query.
    pub fn list_candidates(&self, slot: SlotRef) -> Result<Vec<CandidateGroup>> {
        self.ensure_slot(slot)?;
        Ok(candidate_groups(&self.roster, &self.lineup, slot.kind, ""))
    }

    /// Pick list narrowed by a case-insensitive name/club query.
    pub fn search_candidates(&self, slot: SlotRef, query: &str) -> Result<Vec<CandidateGroup>> {
        self.ensure_slot(slot)?;
        Ok(candidate_groups(&self.roster, &self.lineup, slot.kind, query))
    }

    /// Places a free agent into the armed slot, displacing any previous
    /// occupant to unassigned, then disarms the selection.
    pub fn place_player(&mut self, id: PlayerId) -> Result<&Lineup> {
        let slot = self.selection.ok_or(LineupError::NoActiveSelection)?;
        let player = self.roster.get(id).ok_or(LineupError::UnknownPlayer { id })?;
        let role = player.role;

        if let Some(at) = self.lineup.slot_of(id) {
            return Err(LineupError::PlayerAlreadyPlaced { id, at });
        }
        if !slot.kind.accepts(role) {
            return Err(LineupError::IncompatibleRole { role, slot });
        }
        if slot.kind.is_bench() {
            // Judge the count as it would be after the write: replacing a
            // same-role occupant does not change it.
            let mut count = self.lineup.bench_role_count(&self.roster, role);
            if let Some(prev) = self.lineup.occupant(slot) {
                if self.roster.get(prev).map(|p| p.role) == Some(role) {
                    count -= 1;
                }
            }
            let limit = self.rules.limit_for(role);
            if count + 1 > limit as usize {
                return Err(LineupError::BenchRoleLimitExceeded { role, limit });
            }
        }

        // The armed slot was range-checked by begin_selection and the shape
        // cannot change mid-selection, so the write is in range.
        let displaced = self.lineup.set(slot, Some(id));
        self.selection = None;
        log::info!("player {} placed at {}", id, slot);
        if let Some(out) = displaced {
            log::debug!("player {} displaced to unassigned", out);
        }
        Ok(&self.lineup)
    }

    /// Clears a slot. Clearing an empty slot, or an address outside the
    /// arena, is a no-op.
    pub fn remove_player(&mut self, slot: SlotRef) -> Result<&Lineup> {
        self.ensure_idle()?;
        if let Some(id) = self.lineup.clear(slot) {
            log::info!("player {} removed from {}", id, slot);
        }
        Ok(&self.lineup)
    }

    /// Exchanges the occupants of two slots (either may be empty, making
    /// the swap a move). Both directions must be role-legal, and the bench
    /// must stay within capacity as judged on the post-swap arena. The new
    /// state is computed in full before anything is committed.
    pub fn swap(&mut self, a: SlotRef, b: SlotRef) -> Result<&Lineup> {
        self.ensure_idle()?;
        self.ensure_slot(a)?;
        self.ensure_slot(b)?;
        if a == b {
            return Ok(&self.lineup);
        }

        let player_a = self.lineup.occupant(a);
        let player_b = self.lineup.occupant(b);

        if let Some(id) = player_a {
            if !b.kind.accepts(self.role_of(id)) {
                return Err(LineupError::IncompatibleSwap { a, b });
            }
        }
        if let Some(id) = player_b {
            if !a.kind.accepts(self.role_of(id)) {
                return Err(LineupError::IncompatibleSwap { a, b });
            }
        }

        let mut preview = self.lineup.clone();
        preview.set(a, player_b);
        preview.set(b, player_a);

        for role in Role::ALL {
            let limit = self.rules.limit_for(role);
            if preview.bench_role_count(&self.roster, role) > limit as usize {
                return Err(LineupError::BenchRoleLimitExceeded { role, limit });
            }
        }

        self.lineup = preview;
        log::info!("swapped {} and {}", a, b);
        Ok(&self.lineup)
    }

    /// Swap pick list for a slot, partitioned by where candidates sit now.
    /// Pure query.
    pub fn list_swap_candidates(&self, slot: SlotRef) -> Result<Vec<SwapGroup>> {
        self.ensure_slot(slot)?;
        Ok(swap_groups(&self.roster, &self.lineup, slot, ""))
    }

    /// Swap pick list narrowed by a case-insensitive name/club query.
    pub fn search_swap_candidates(&self, slot: SlotRef, query: &str) -> Result<Vec<SwapGroup>> {
        self.ensure_slot(slot)?;
        Ok(swap_groups(&self.roster, &self.lineup, slot, query))
    }

    /// The submission gate. Never fails; the report lists what is broken.
    pub fn validate_for_submission(&self) -> LineupReport {
        LineupValidator::validate(&self.lineup, &self.roster, &self.rules)
    }

    // ------------------------------------------------------------------
    // Derived views
    // ------------------------------------------------------------------

    /// Per-role bench occupancy with limits, in canonical role order.
    pub fn bench_role_counts(&self) -> Vec<BenchRoleCount> {
        Role::ALL
            .iter()
            .map(|&role| BenchRoleCount {
                role,
                used: self.lineup.bench_role_count(&self.roster, role) as u8,
                limit: self.rules.limit_for(role),
            })
            .collect()
    }

    /// Roster players occupying no slot, in supply order.
    pub fn free_agents(&self) -> Vec<&Player> {
        self.roster.iter().filter(|p| !self.lineup.contains_player(p.id)).collect()
    }

    fn role_of(&self, id: PlayerId) -> Role {
        // Only ids already inside the lineup reach here, and the lineup
        // holds roster ids exclusively.
        match self.roster.get(id) {
            Some(player) => player.role,
            None => unreachable!("lineup holds id {} foreign to the roster", id),
        }
    }
}
