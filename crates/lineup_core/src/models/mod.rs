pub mod formation;
pub mod player;
pub mod roster;
pub mod rules;

pub use formation::Formation;
pub use player::{Player, PlayerId, Role};
pub use roster::Roster;
pub use rules::BenchRules;
