//! # lineup_core - Fantasy Football Lineup Engine
//!
//! This library assembles and edits a fantasy-football starting lineup from
//! a league roster: formation-shaped starter slots, a role-capped bench,
//! grouped candidate listings, rule-checked placement and swaps, and matchday
//! validation, with a JSON API for easy integration with non-Rust hosts.
//!
//! ## Features
//! - Fully deterministic: identical call sequences yield identical lineups
//! - Typed, recoverable errors; a refused operation never mutates the lineup
//! - Formation changes keep every starter the new shape can still hold
//! - JSON session facade for easy integration

pub mod api;
pub mod engine;
pub mod error;
pub mod models;

// Re-export main API functions
pub use api::{
    lineup_begin_selection_json, lineup_candidates_json, lineup_cancel_selection_json,
    lineup_close_session_json, lineup_open_session_json, lineup_place_player_json,
    lineup_remove_player_json, lineup_resolve_pick_json, lineup_set_formation_json,
    lineup_state_json, lineup_swap_candidates_json, lineup_swap_json, lineup_validate_json,
    ApiError, ApiResponse, API_VERSION,
};

// Re-export engine types
pub use engine::{
    BenchRoleCount, CandidateGroup, Lineup, LineupEngine, LineupReport, LineupValidator,
    RuleViolation, SlotKind, SlotRef, SwapGroup, SwapSource,
};

// Re-export model types
pub use models::{BenchRules, Formation, Player, PlayerId, Role, Roster};

pub use error::{LineupError, Result};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const SCHEMA_VERSION: u8 = 1;
