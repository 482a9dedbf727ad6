use serde::{Deserialize, Serialize};

use super::lineup::Lineup;
use super::slots::SlotKind;
use crate::models::player::Role;
use crate::models::roster::Roster;
use crate::models::rules::BenchRules;

/// One rule broken by the current lineup, with the counts a host needs to
/// word its message. Carries no presentation text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum RuleViolation {
    MissingGoalkeeper,
    IncompleteOutfield { role: Role, required: u8, found: u8 },
    BenchLimitExceeded { role: Role, limit: u8, found: u8 },
}

impl RuleViolation {
    /// Plain-text rendering for logs and the CLI.
    pub fn describe(&self) -> String {
        match self {
            RuleViolation::MissingGoalkeeper => "goalkeeper slot is empty".to_string(),
            RuleViolation::IncompleteOutfield { role, required, found } => {
                format!("{}: {} of {} placed", role, found, required)
            }
            RuleViolation::BenchLimitExceeded { role, limit, found } => {
                format!("bench holds {} {} players (limit {})", found, role, limit)
            }
        }
    }
}

/// Result of the submission gate. Never an error: the caller reads
/// `is_valid` to enable submission and the violations to explain why not.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LineupReport {
    pub violations: Vec<RuleViolation>,
}

impl LineupReport {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }
}

pub struct LineupValidator;

impl LineupValidator {
    /// Checks in fixed order: goalkeeper presence, outfield completeness
    /// per category, bench capacity per role.
    pub fn validate(lineup: &Lineup, roster: &Roster, rules: &BenchRules) -> LineupReport {
        let mut violations = Vec::new();

        // Rule 1: the goalkeeper slot must be filled.
        if lineup.slots(SlotKind::Goalkeeper).iter().all(|s| s.is_none()) {
            violations.push(RuleViolation::MissingGoalkeeper);
        }

        // Rule 2: every outfield slot implied by the shape must be filled.
        let outfield = [
            (SlotKind::Defenders, Role::Defender),
            (SlotKind::Midfielders, Role::Midfielder),
            (SlotKind::Forwards, Role::Forward),
        ];
        for (kind, role) in outfield {
            let slots = lineup.slots(kind);
            let found = slots.iter().filter(|s| s.is_some()).count();
            if found < slots.len() {
                violations.push(RuleViolation::IncompleteOutfield {
                    role,
                    required: slots.len() as u8,
                    found: found as u8,
                });
            }
        }

        // Rule 3: per-role bench occupancy within the configured capacity.
        for role in Role::ALL {
            let found = lineup.bench_role_count(roster, role);
            let limit = rules.limit_for(role);
            if found > limit as usize {
                violations.push(RuleViolation::BenchLimitExceeded {
                    role,
                    limit,
                    found: found as u8,
                });
            }
        }

        LineupReport { violations }
    }
}

// ============================================================================//
// Tests
// ============================================================================//
#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::slots::SlotRef;
    use crate::models::formation::Formation;
    use crate::models::player::{Player, PlayerId};

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

    fn build_roster() -> Roster {
        let mut players = vec![make_player(1, Role::Goalkeeper)];
        players.extend((2..=7).map(|id| make_player(id, Role::Defender)));
        players.extend((8..=13).map(|id| make_player(id, Role::Midfielder)));
        players.extend((14..=17).map(|id| make_player(id, Role::Forward)));
        Roster::new(players).unwrap()
    }

    fn full_lineup(rules: &BenchRules) -> Lineup {
        let mut lineup = Lineup::new(Formation::F433, rules);
        lineup.set(SlotRef::goalkeeper(), Some(PlayerId(1)));
        for i in 0..4 {
            lineup.set(SlotRef::new(SlotKind::Defenders, i), Some(PlayerId(2 + i as u32)));
        }
        for i in 0..3 {
            lineup.set(SlotRef::new(SlotKind::Midfielders, i), Some(PlayerId(8 + i as u32)));
        }
        for i in 0..3 {
            lineup.set(SlotRef::new(SlotKind::Forwards, i), Some(PlayerId(14 + i as u32)));
        }
        lineup
    }

    #[test]
    fn complete_lineup_is_valid() {
        let roster = build_roster();
        let rules = BenchRules::default();
        let lineup = full_lineup(&rules);
        let report = LineupValidator::validate(&lineup, &roster, &rules);
        assert!(report.is_valid());
        assert!(report.violations.is_empty());
    }

    #[test]
    fn missing_goalkeeper_reported_even_when_outfield_complete() {
        let roster = build_roster();
        let rules = BenchRules::default();
        let mut lineup = full_lineup(&rules);
        lineup.clear(SlotRef::goalkeeper());

        let report = LineupValidator::validate(&lineup, &roster, &rules);
        assert_eq!(report.violations, vec![RuleViolation::MissingGoalkeeper]);
    }

    #[test]
    fn partial_outfield_names_short_categories_with_counts() {
        let roster = build_roster();
        let rules = BenchRules::default();
        let mut lineup = full_lineup(&rules);
        lineup.clear(SlotRef::new(SlotKind::Defenders, 3));
        lineup.clear(SlotRef::new(SlotKind::Forwards, 0));

        let report = LineupValidator::validate(&lineup, &roster, &rules);
        assert_eq!(
            report.violations,
            vec![
                RuleViolation::IncompleteOutfield { role: Role::Defender, required: 4, found: 3 },
                RuleViolation::IncompleteOutfield { role: Role::Forward, required: 3, found: 2 },
            ]
        );
    }

    #[test]
    fn bench_over_capacity_names_offending_roles() {
        let roster = build_roster();
        // Bench sized by default rules, then judged against tighter ones.
        let mut lineup = full_lineup(&BenchRules::default());
        lineup.set(SlotRef::bench(0), Some(PlayerId(6)));
        lineup.set(SlotRef::bench(1), Some(PlayerId(7)));

        let tight = BenchRules::new(1, 1, 3, 3);
        let report = LineupValidator::validate(&lineup, &roster, &tight);
        assert_eq!(
            report.violations,
            vec![RuleViolation::BenchLimitExceeded { role: Role::Defender, limit: 1, found: 2 }]
        );
    }

    #[test]
    fn violations_serialize_with_rule_tags() {
        let violation = RuleViolation::IncompleteOutfield {
            role: Role::Midfielder,
            required: 5,
            found: 2,
        };
        let json = serde_json::to_string(&violation).unwrap();
        assert_eq!(json, r#"{"rule":"incomplete_outfield","role":"C","required":5,"found":2}"#);
    }
}
