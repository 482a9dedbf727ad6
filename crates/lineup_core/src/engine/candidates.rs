use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

use super::lineup::Lineup;
use super::slots::{SlotKind, SlotRef};
use crate::models::player::{Player, Role};
use crate::models::roster::Roster;

/// One role section of a pick list: free agents compatible with the target
/// slot, highest fantasy market value first.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CandidateGroup {
    pub role: Role,
    pub players: Vec<Player>,
}

/// Where a swap candidate currently sits.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SwapSource {
    Starters,
    Bench,
    Unassigned,
}

/// One section of a swap pick list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SwapGroup {
    pub source: SwapSource,
    pub players: Vec<Player>,
}

/// Free agents eligible for a slot of `kind`, grouped by role in canonical
/// role order, each group sorted by descending fvm (ties keep roster
/// order). Empty groups are omitted; `query` filters by name/club first.
pub fn candidate_groups(
    roster: &Roster,
    lineup: &Lineup,
    kind: SlotKind,
    query: &str,
) -> Vec<CandidateGroup> {
    let mut groups = Vec::new();
    for role in Role::ALL {
        if !kind.accepts(role) {
            continue;
        }
        let mut players: Vec<Player> = roster
            .iter()
            .filter(|p| p.role == role)
            .filter(|p| !lineup.contains_player(p.id))
            .filter(|p| p.matches_query(query))
            .cloned()
            .collect();
        if players.is_empty() {
            continue;
        }
        // Stable sort: equal fvm keeps roster supply order.
        players.sort_by_key(|p| Reverse(p.fvm));
        groups.push(CandidateGroup { role, players });
    }
    groups
}

/// Players that could legally trade places with `slot`, partitioned by
/// where they sit now.
///
/// A candidate must fit the target slot, and, when the target is occupied,
/// the target's occupant must in turn fit the candidate's current slot
/// (unassigned candidates impose no reverse constraint: the displaced
/// occupant simply leaves the lineup). Bench capacity is not judged here;
/// it is arbitrated when the swap executes.
///
/// Group order follows the target: an empty bench slot leads with
/// unassigned players, an empty starter slot leads with the bench, an
/// occupied slot leads with the starters. Empty groups are omitted.
pub fn swap_groups(
    roster: &Roster,
    lineup: &Lineup,
    slot: SlotRef,
    query: &str,
) -> Vec<SwapGroup> {
    let occupant = lineup.occupant(slot);
    let occupant_role = occupant.and_then(|id| roster.get(id)).map(|p| p.role);

    let mut starters = Vec::new();
    let mut bench = Vec::new();
    let mut unassigned = Vec::new();

    for player in roster.iter() {
        if Some(player.id) == occupant {
            continue;
        }
        if !player.matches_query(query) {
            continue;
        }
        if !slot.kind.accepts(player.role) {
            continue;
        }
        let current = lineup.slot_of(player.id);
        if let (Some(role), Some(current_slot)) = (occupant_role, current) {
            if !current_slot.kind.accepts(role) {
                continue;
            }
        }
        match current {
            Some(s) if s.kind.is_bench() => bench.push(player.clone()),
            Some(_) => starters.push(player.clone()),
            None => unassigned.push(player.clone()),
        }
    }

    for list in [&mut starters, &mut bench, &mut unassigned] {
        list.sort_by_key(|p| (p.role.sort_order(), Reverse(p.fvm)));
    }

    let ordered = if occupant.is_some() {
        [
            (SwapSource::Starters, starters),
            (SwapSource::Bench, bench),
            (SwapSource::Unassigned, unassigned),
        ]
    } else if slot.kind.is_bench() {
        [
            (SwapSource::Unassigned, unassigned),
            (SwapSource::Bench, bench),
            (SwapSource::Starters, starters),
        ]
    } else {
        [
            (SwapSource::Bench, bench),
            (SwapSource::Unassigned, unassigned),
            (SwapSource::Starters, starters),
        ]
    };

    ordered
        .into_iter()
        .filter(|(_, players)| !players.is_empty())
        .map(|(source, players)| SwapGroup { source, players })
        .collect()
}

// ============================================================================//
// Tests
// ============================================================================//
#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::player::PlayerId;
    use crate::models::formation::Formation;
    use crate::models::rules::BenchRules;

    fn make_player(id: u32, name: &str, role: Role, club: &str, fvm: u32) -> Player {
        Player {
            id: PlayerId(id),
            name: name.to_string(),
            role,
            club: club.to_string(),
            quotation: 10,
            fvm,
        }
    }

    fn build_roster() -> Roster {
        Roster::new(vec![
            make_player(1, "Keeper One", Role::Goalkeeper, "Milan", 100),
            make_player(2, "Keeper Two", Role::Goalkeeper, "Inter", 80),
            make_player(3, "Back One", Role::Defender, "Milan", 60),
            make_player(4, "Back Two", Role::Defender, "Roma", 90),
            make_player(5, "Back Three", Role::Defender, "Lazio", 90),
            make_player(6, "Mid One", Role::Midfielder, "Napoli", 120),
            make_player(7, "Wing One", Role::Forward, "Roma", 200),
        ])
        .unwrap()
    }

    fn empty_lineup() -> Lineup {
        Lineup::new(Formation::F433, &BenchRules::default())
    }

    #[test]
    fn defender_slot_lists_only_free_defenders() {
        let roster = build_roster();
        let mut lineup = empty_lineup();
        lineup.set(SlotRef::new(SlotKind::Defenders, 0), Some(PlayerId(4)));

        let groups = candidate_groups(&roster, &lineup, SlotKind::Defenders, "");
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].role, Role::Defender);
        let ids: Vec<PlayerId> = groups[0].players.iter().map(|p| p.id).collect();
        // Placed Back Two is excluded; equal-fvm Back Three precedes lower-fvm Back One.
        assert_eq!(ids, vec![PlayerId(5), PlayerId(3)]);
    }

    #[test]
    fn bench_slot_groups_all_roles_in_canonical_order() {
        let roster = build_roster();
        let lineup = empty_lineup();

        let groups = candidate_groups(&roster, &lineup, SlotKind::Bench, "");
        let roles: Vec<Role> = groups.iter().map(|g| g.role).collect();
        assert_eq!(roles, vec![Role::Goalkeeper, Role::Defender, Role::Midfielder, Role::Forward]);
    }

    #[test]
    fn fvm_sorts_descending_with_stable_ties() {
        let roster = build_roster();
        let lineup = empty_lineup();

        let groups = candidate_groups(&roster, &lineup, SlotKind::Defenders, "");
        let ids: Vec<PlayerId> = groups[0].players.iter().map(|p| p.id).collect();
        // Back Two (90) supplied before Back Three (90); Back One (60) last.
        assert_eq!(ids, vec![PlayerId(4), PlayerId(5), PlayerId(3)]);
    }

    #[test]
    fn search_filters_by_name_or_club_and_drops_empty_groups() {
        let roster = build_roster();
        let lineup = empty_lineup();

        let groups = candidate_groups(&roster, &lineup, SlotKind::Bench, "roma");
        let roles: Vec<Role> = groups.iter().map(|g| g.role).collect();
        assert_eq!(roles, vec![Role::Defender, Role::Forward]);
        assert_eq!(groups[0].players[0].name, "Back Two");
    }

    #[test]
    fn empty_bench_slot_leads_with_unassigned() {
        let roster = build_roster();
        let mut lineup = empty_lineup();
        lineup.set(SlotRef::new(SlotKind::Defenders, 0), Some(PlayerId(3)));
        lineup.set(SlotRef::bench(0), Some(PlayerId(4)));

        let groups = swap_groups(&roster, &lineup, SlotRef::bench(1), "");
        let sources: Vec<SwapSource> = groups.iter().map(|g| g.source).collect();
        assert_eq!(sources, vec![SwapSource::Unassigned, SwapSource::Bench, SwapSource::Starters]);
    }

    #[test]
    fn empty_starter_slot_leads_with_bench() {
        let roster = build_roster();
        let mut lineup = empty_lineup();
        lineup.set(SlotRef::bench(0), Some(PlayerId(4)));

        let groups = swap_groups(&roster, &lineup, SlotRef::new(SlotKind::Defenders, 1), "");
        let sources: Vec<SwapSource> = groups.iter().map(|g| g.source).collect();
        assert_eq!(sources, vec![SwapSource::Bench, SwapSource::Unassigned]);
        assert_eq!(groups[0].players[0].id, PlayerId(4));
    }

    #[test]
    fn occupied_slot_leads_with_starters() {
        let roster = build_roster();
        let mut lineup = empty_lineup();
        lineup.set(SlotRef::new(SlotKind::Defenders, 0), Some(PlayerId(3)));
        lineup.set(SlotRef::new(SlotKind::Defenders, 1), Some(PlayerId(4)));
        lineup.set(SlotRef::bench(0), Some(PlayerId(5)));

        let groups = swap_groups(&roster, &lineup, SlotRef::new(SlotKind::Defenders, 0), "");
        let sources: Vec<SwapSource> = groups.iter().map(|g| g.source).collect();
        assert_eq!(sources, vec![SwapSource::Starters, SwapSource::Bench]);
        // The target's own occupant is never its own candidate.
        assert_eq!(groups[0].players.len(), 1);
        assert_eq!(groups[0].players[0].id, PlayerId(4));
    }

    #[test]
    fn occupied_bench_slot_only_offers_starters_that_fit_the_occupant() {
        let roster = build_roster();
        let mut lineup = empty_lineup();
        // Midfielder benched; defender and forward starting.
        lineup.set(SlotRef::bench(0), Some(PlayerId(6)));
        lineup.set(SlotRef::new(SlotKind::Defenders, 0), Some(PlayerId(3)));
        lineup.set(SlotRef::new(SlotKind::Forwards, 0), Some(PlayerId(7)));

        let groups = swap_groups(&roster, &lineup, SlotRef::bench(0), "");
        let starters: Vec<&SwapGroup> =
            groups.iter().filter(|g| g.source == SwapSource::Starters).collect();
        // No starter slot can take the benched midfielder back, so no
        // starter may come to this bench slot.
        assert!(starters.is_empty());
    }

    #[test]
    fn unassigned_candidates_skip_the_reverse_check() {
        let roster = build_roster();
        let mut lineup = empty_lineup();
        lineup.set(SlotRef::new(SlotKind::Defenders, 0), Some(PlayerId(3)));

        let groups = swap_groups(&roster, &lineup, SlotRef::new(SlotKind::Defenders, 0), "");
        let unassigned = groups
            .iter()
            .find(|g| g.source == SwapSource::Unassigned)
            .expect("unassigned group");
        let ids: Vec<PlayerId> = unassigned.players.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![PlayerId(4), PlayerId(5)]);
    }
}
