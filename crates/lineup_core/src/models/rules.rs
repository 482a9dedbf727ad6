use serde::{Deserialize, Serialize};

use super::player::Role;

fn default_goalkeeper_limit() -> u8 {
    1
}

fn default_outfield_limit() -> u8 {
    3
}

/// League-defined bench capacity, one maximum per role.
///
/// Immutable for the whole editing session. The sum of the four limits fixes
/// the number of bench slots. Wire keys are the role letters, matching the
/// league configuration payload (`{"P":1,"D":3,"C":3,"A":3}`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct BenchRules {
    #[serde(rename = "P", default = "default_goalkeeper_limit")]
    pub goalkeepers: u8,
    #[serde(rename = "D", default = "default_outfield_limit")]
    pub defenders: u8,
    #[serde(rename = "C", default = "default_outfield_limit")]
    pub midfielders: u8,
    #[serde(rename = "A", default = "default_outfield_limit")]
    pub forwards: u8,
}

impl Default for BenchRules {
    fn default() -> Self {
        Self { goalkeepers: 1, defenders: 3, midfielders: 3, forwards: 3 }
    }
}

impl BenchRules {
    pub fn new(goalkeepers: u8, defenders: u8, midfielders: u8, forwards: u8) -> Self {
        Self { goalkeepers, defenders, midfielders, forwards }
    }

    pub fn limit_for(&self, role: Role) -> u8 {
        match role {
            Role::Goalkeeper => self.goalkeepers,
            Role::Defender => self.defenders,
            Role::Midfielder => self.midfielders,
            Role::Forward => self.forwards,
        }
    }

    /// Number of bench slots (sum of all per-role limits).
    pub fn bench_len(&self) -> usize {
        self.goalkeepers as usize
            + self.defenders as usize
            + self.midfielders as usize
            + self.forwards as usize
    }
}
