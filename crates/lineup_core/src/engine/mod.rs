//! The lineup engine: slot arena, editing operations, candidate
//! projections and the submission gate.

pub mod candidates;
pub mod editor;
pub mod lineup;
pub mod slots;
pub mod validate;

pub use candidates::{CandidateGroup, SwapGroup, SwapSource};
pub use editor::{BenchRoleCount, LineupEngine};
pub use lineup::Lineup;
pub use slots::{SlotKind, SlotRef};
pub use validate::{LineupReport, LineupValidator, RuleViolation};
