use thiserror::Error;

use crate::engine::slots::SlotRef;
use crate::models::player::{PlayerId, Role};

/// Failures raised by lineup operations.
///
/// Every variant is recoverable: the lineup is left exactly as it was before
/// the failing call, and the caller may retry with different arguments.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LineupError {
    #[error("Unknown formation code: {code}")]
    InvalidFormation { code: String },

    #[error("Slot {slot} is out of range (len {len})")]
    SlotOutOfRange { slot: SlotRef, len: usize },

    #[error("No selection is active")]
    NoActiveSelection,

    #[error("A selection is still active for {slot}")]
    PendingSelection { slot: SlotRef },

    #[error("Player {id} is not in the roster")]
    UnknownPlayer { id: PlayerId },

    #[error("Player {id} already occupies {at}")]
    PlayerAlreadyPlaced { id: PlayerId, at: SlotRef },

    #[error("Role {role} cannot occupy {slot}")]
    IncompatibleRole { role: Role, slot: SlotRef },

    #[error("Bench already holds {limit} {role} players")]
    BenchRoleLimitExceeded { role: Role, limit: u8 },

    #[error("Slots {a} and {b} cannot be swapped")]
    IncompatibleSwap { a: SlotRef, b: SlotRef },

    #[error("Invalid roster: {reason}")]
    InvalidRoster { reason: String },

    #[error("Invalid lineup snapshot: {reason}")]
    InvalidSnapshot { reason: String },
}

impl LineupError {
    /// Stable machine-readable code, used by the JSON facade and host UIs.
    pub fn code(&self) -> &'static str {
        match self {
            LineupError::InvalidFormation { .. } => "INVALID_FORMATION",
            LineupError::SlotOutOfRange { .. } => "SLOT_OUT_OF_RANGE",
            LineupError::NoActiveSelection => "NO_ACTIVE_SELECTION",
            LineupError::PendingSelection { .. } => "PENDING_SELECTION",
            LineupError::UnknownPlayer { .. } => "UNKNOWN_PLAYER",
            LineupError::PlayerAlreadyPlaced { .. } => "PLAYER_ALREADY_PLACED",
            LineupError::IncompatibleRole { .. } => "INCOMPATIBLE_ROLE",
            LineupError::BenchRoleLimitExceeded { .. } => "BENCH_ROLE_LIMIT_EXCEEDED",
            LineupError::IncompatibleSwap { .. } => "INCOMPATIBLE_SWAP",
            LineupError::InvalidRoster { .. } => "INVALID_ROSTER",
            LineupError::InvalidSnapshot { .. } => "INVALID_SNAPSHOT",
        }
    }
}

pub type Result<T> = std::result::Result<T, LineupError>;
