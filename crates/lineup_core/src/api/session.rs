//! Process-wide lineup session state.
//!
//! Host frontends talk to the engine through one session at a time: opening a
//! session binds a roster and bench rules, and every subsequent facade call
//! operates on that session until it is closed or replaced.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use std::sync::Mutex;
use uuid::Uuid;

use crate::engine::LineupEngine;

/// A live lineup editing session bound to one roster.
#[derive(Debug)]
pub struct LineupSession {
    pub session_id: Uuid,
    pub opened_at: DateTime<Utc>,
    pub engine: LineupEngine,
}

impl LineupSession {
    pub fn new(engine: LineupEngine) -> Self {
        Self { session_id: Uuid::new_v4(), opened_at: Utc::now(), engine }
    }
}

// ========== Global State Management ==========

static LINEUP_SESSION: Lazy<Mutex<Option<LineupSession>>> =
    Lazy::new(|| Mutex::new(None));

/// Replace the current session with a fresh one built around `engine`.
///
/// Returns the new session id and opening timestamp so callers can echo them
/// back to the host.
pub fn open(engine: LineupEngine) -> (Uuid, DateTime<Utc>) {
    let mut slot = LINEUP_SESSION.lock().expect("LINEUP_SESSION lock poisoned");
    let session = LineupSession::new(engine);
    let handle = (session.session_id, session.opened_at);
    *slot = Some(session);
    handle
}

/// Run `f` against the open session, or return `None` when nothing is open.
pub fn with_open<T>(f: impl FnOnce(&mut LineupSession) -> T) -> Option<T> {
    let mut slot = LINEUP_SESSION.lock().expect("LINEUP_SESSION lock poisoned");
    slot.as_mut().map(f)
}

/// Drop the current session. Returns `true` when a session was actually open.
pub fn close() -> bool {
    let mut slot = LINEUP_SESSION.lock().expect("LINEUP_SESSION lock poisoned");
    slot.take().is_some()
}
