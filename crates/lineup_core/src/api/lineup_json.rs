//! JSON API for lineup session operations
//!
//! Free functions in the `fn(&str) -> String` shape so non-Rust hosts can
//! drive the lineup engine without bindings: every call takes a JSON request
//! string and returns a JSON response envelope. State lives in the
//! process-wide session (see [`super::session`]); opening a session replaces
//! any previous one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::api::session::{self, LineupSession};
use crate::engine::{BenchRoleCount, CandidateGroup, Lineup, LineupEngine, SlotRef, SwapGroup};
use crate::engine::RuleViolation;
use crate::error::LineupError;
use crate::models::{BenchRules, Formation, Player, PlayerId, Roster};

/// API version for schema compatibility
pub const API_VERSION: &str = "v1";

/// Standard API response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ApiError>,
    pub schema_version: String,
    pub timestamp: DateTime<Utc>,
}

/// Structured API error with stable codes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

/// Session opening request: the roster plus optional shape overrides.
///
/// When `lineup` carries a previously saved snapshot it takes precedence over
/// `formation`; the snapshot already fixes the formation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenSessionRequest {
    pub schema_version: Option<String>,
    pub players: Vec<Player>,
    pub bench_limits: Option<BenchRules>,
    pub formation: Option<String>,
    pub lineup: Option<Lineup>,
}

/// Formation change request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetFormationRequest {
    pub schema_version: Option<String>,
    pub formation: String,
}

/// Request addressing a single slot, written as `KIND[:INDEX]` (e.g. `D:2`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotRequest {
    pub schema_version: Option<String>,
    pub slot: String,
}

/// Candidate listing request with an optional name/club search string
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateQueryRequest {
    pub schema_version: Option<String>,
    pub slot: String,
    pub query: Option<String>,
}

/// Placement request for the armed slot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacePlayerRequest {
    pub schema_version: Option<String>,
    pub player_id: PlayerId,
}

/// Swap request between two slots
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwapRequest {
    pub schema_version: Option<String>,
    pub slot_a: String,
    pub slot_b: String,
}

/// Pick resolution request: a target slot and the player chosen for it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvePickRequest {
    pub schema_version: Option<String>,
    pub slot: String,
    pub player_id: PlayerId,
}

/// Empty-bodied request accepted by the no-argument endpoints
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmptyRequest {
    pub schema_version: Option<String>,
}

/// Snapshot of the open session, returned by every mutating endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineupStateResponse {
    pub session_id: Uuid,
    pub opened_at: DateTime<Utc>,
    pub formation: String,
    pub lineup: Lineup,
    pub selection: Option<String>,
    pub bench_counts: Vec<BenchRoleCount>,
    pub assigned: usize,
    pub free_agents: usize,
}

/// Formation change response: who fell off the pitch, plus the new state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetFormationResponse {
    pub evicted: Vec<PlayerId>,
    pub state: LineupStateResponse,
}

/// Placement candidates for one slot, grouped by role
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateGroupsResponse {
    pub slot: String,
    pub groups: Vec<CandidateGroup>,
    pub total: usize,
}

/// Swap candidates for one slot, grouped by where they currently sit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwapGroupsResponse {
    pub slot: String,
    pub groups: Vec<SwapGroup>,
    pub total: usize,
}

/// How a pick was resolved: the chosen player either swapped out of the slot
/// it already occupied, or was placed from the free pool.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PickAction {
    Swapped,
    Placed,
}

/// Pick resolution response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvePickResponse {
    pub action: PickAction,
    pub state: LineupStateResponse,
}

/// Matchday validation response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResponse {
    pub valid: bool,
    pub violations: Vec<RuleViolation>,
}

/// Cancel response; `cancelled` is false when nothing was armed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelSelectionResponse {
    pub cancelled: bool,
}

/// Close response; `closed` is false when no session was open
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloseSessionResponse {
    pub closed: bool,
}

impl ApiError {
    pub fn new(code: &str, message: &str) -> Self {
        Self { code: code.to_string(), message: message.to_string() }
    }

    pub fn from_lineup_error(error: &LineupError) -> Self {
        Self::new(error.code(), &error.to_string())
    }
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            schema_version: API_VERSION.to_string(),
            timestamp: Utc::now(),
        }
    }

    pub fn error(error: ApiError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
            schema_version: API_VERSION.to_string(),
            timestamp: Utc::now(),
        }
    }
}

fn to_json<T: Serialize>(response: &ApiResponse<T>) -> String {
    serde_json::to_string(response).unwrap_or_else(|_| "{}".to_string())
}

fn invalid_json<T: Serialize>(context: &str, err: serde_json::Error) -> String {
    error!("Failed to parse {}: {}", context, err);
    let response: ApiResponse<T> =
        ApiResponse::error(ApiError::new("INVALID_JSON", &format!("Invalid JSON format: {}", err)));
    to_json(&response)
}

fn invalid_slot<T: Serialize>(message: &str) -> String {
    let response: ApiResponse<T> = ApiResponse::error(ApiError::new("INVALID_SLOT", message));
    to_json(&response)
}

fn no_session<T: Serialize>() -> String {
    let response: ApiResponse<T> =
        ApiResponse::error(ApiError::new("NO_OPEN_SESSION", "No lineup session is open"));
    to_json(&response)
}

fn engine_error<T: Serialize>(error: &LineupError) -> String {
    warn!("Lineup operation refused: {}", error);
    let response: ApiResponse<T> = ApiResponse::error(ApiError::from_lineup_error(error));
    to_json(&response)
}

/// Accepts an empty string as well as `{}` for endpoints that need no payload.
fn parse_empty(request_json: &str) -> Result<EmptyRequest, serde_json::Error> {
    if request_json.trim().is_empty() {
        return Ok(EmptyRequest::default());
    }
    serde_json::from_str(request_json)
}

fn state_of(session: &LineupSession) -> LineupStateResponse {
    let engine = &session.engine;
    LineupStateResponse {
        session_id: session.session_id,
        opened_at: session.opened_at,
        formation: engine.formation().code().to_string(),
        lineup: engine.lineup().clone(),
        selection: engine.selection().map(|slot| slot.to_string()),
        bench_counts: engine.bench_role_counts(),
        assigned: engine.lineup().assigned_count(),
        free_agents: engine.free_agents().len(),
    }
}

/// Open an editing session from JSON request string
///
/// # Arguments
/// * `request_json` - JSON string containing OpenSessionRequest
///
/// Replaces any session that was already open.
pub fn lineup_open_session_json(request_json: &str) -> String {
    info!("Processing open-session request");

    let request: OpenSessionRequest = match serde_json::from_str(request_json) {
        Ok(req) => req,
        Err(e) => return invalid_json::<LineupStateResponse>("OpenSessionRequest", e),
    };

    let roster = match Roster::new(request.players) {
        Ok(roster) => roster,
        Err(err) => return engine_error::<LineupStateResponse>(&err),
    };
    let rules = request.bench_limits.unwrap_or_default();

    let engine = if let Some(snapshot) = request.lineup {
        match LineupEngine::from_snapshot(roster, rules, snapshot) {
            Ok(engine) => engine,
            Err(err) => return engine_error::<LineupStateResponse>(&err),
        }
    } else {
        let mut engine = LineupEngine::new(roster, rules);
        if let Some(code) = request.formation {
            let formation = match code.parse::<Formation>() {
                Ok(formation) => formation,
                Err(err) => return engine_error::<LineupStateResponse>(&err),
            };
            engine = engine.with_formation(formation);
        }
        engine
    };

    session::open(engine);
    match session::with_open(|session| state_of(session)) {
        Some(state) => {
            info!("Opened lineup session {}", state.session_id);
            to_json(&ApiResponse::success(state))
        }
        None => no_session::<LineupStateResponse>(),
    }
}

/// Change the open session's formation; evicted starters return to the pool
pub fn lineup_set_formation_json(request_json: &str) -> String {
    info!("Processing set-formation request");

    let request: SetFormationRequest = match serde_json::from_str(request_json) {
        Ok(req) => req,
        Err(e) => return invalid_json::<SetFormationResponse>("SetFormationRequest", e),
    };

    let formation = match request.formation.parse::<Formation>() {
        Ok(formation) => formation,
        Err(err) => return engine_error::<SetFormationResponse>(&err),
    };

    let outcome = session::with_open(|session| {
        let before: Vec<PlayerId> =
            session.engine.lineup().occupied().into_iter().map(|(_, id)| id).collect();
        let result = session.engine.set_formation(formation).map(|_| ());
        result.map(|_| {
            let evicted = before
                .into_iter()
                .filter(|id| !session.engine.lineup().contains_player(*id))
                .collect();
            SetFormationResponse { evicted, state: state_of(session) }
        })
    });

    match outcome {
        None => no_session::<SetFormationResponse>(),
        Some(Err(err)) => engine_error::<SetFormationResponse>(&err),
        Some(Ok(data)) => to_json(&ApiResponse::success(data)),
    }
}

/// Arm a selection for a slot and return its placement candidates
pub fn lineup_begin_selection_json(request_json: &str) -> String {
    debug!("Processing begin-selection request");

    let request: SlotRequest = match serde_json::from_str(request_json) {
        Ok(req) => req,
        Err(e) => return invalid_json::<CandidateGroupsResponse>("SlotRequest", e),
    };

    let slot = match request.slot.parse::<SlotRef>() {
        Ok(slot) => slot,
        Err(message) => return invalid_slot::<CandidateGroupsResponse>(&message),
    };

    let outcome = session::with_open(|session| session.engine.begin_selection(slot));
    match outcome {
        None => no_session::<CandidateGroupsResponse>(),
        Some(Err(err)) => engine_error::<CandidateGroupsResponse>(&err),
        Some(Ok(groups)) => {
            let total = groups.iter().map(|group| group.players.len()).sum();
            let data = CandidateGroupsResponse { slot: slot.to_string(), groups, total };
            to_json(&ApiResponse::success(data))
        }
    }
}

/// Disarm the active selection, if any
pub fn lineup_cancel_selection_json(request_json: &str) -> String {
    debug!("Processing cancel-selection request");

    if let Err(e) = parse_empty(request_json) {
        return invalid_json::<CancelSelectionResponse>("EmptyRequest", e);
    }

    let outcome = session::with_open(|session| {
        let was_active = session.engine.selection().is_some();
        session.engine.cancel_selection();
        CancelSelectionResponse { cancelled: was_active }
    });

    match outcome {
        None => no_session::<CancelSelectionResponse>(),
        Some(data) => to_json(&ApiResponse::success(data)),
    }
}

/// List placement candidates for a slot without arming a selection
pub fn lineup_candidates_json(request_json: &str) -> String {
    debug!("Processing candidate listing request");

    let request: CandidateQueryRequest = match serde_json::from_str(request_json) {
        Ok(req) => req,
        Err(e) => return invalid_json::<CandidateGroupsResponse>("CandidateQueryRequest", e),
    };

    let slot = match request.slot.parse::<SlotRef>() {
        Ok(slot) => slot,
        Err(message) => return invalid_slot::<CandidateGroupsResponse>(&message),
    };

    let outcome = session::with_open(|session| match request.query.as_deref() {
        Some(query) => session.engine.search_candidates(slot, query),
        None => session.engine.list_candidates(slot),
    });

    match outcome {
        None => no_session::<CandidateGroupsResponse>(),
        Some(Err(err)) => engine_error::<CandidateGroupsResponse>(&err),
        Some(Ok(groups)) => {
            let total = groups.iter().map(|group| group.players.len()).sum();
            let data = CandidateGroupsResponse { slot: slot.to_string(), groups, total };
            to_json(&ApiResponse::success(data))
        }
    }
}

/// Place a player into the armed slot from JSON request string
pub fn lineup_place_player_json(request_json: &str) -> String {
    info!("Processing place-player request");

    let request: PlacePlayerRequest = match serde_json::from_str(request_json) {
        Ok(req) => req,
        Err(e) => return invalid_json::<LineupStateResponse>("PlacePlayerRequest", e),
    };

    let outcome = session::with_open(|session| {
        let result = session.engine.place_player(request.player_id).map(|_| ());
        result.map(|_| state_of(session))
    });

    match outcome {
        None => no_session::<LineupStateResponse>(),
        Some(Err(err)) => engine_error::<LineupStateResponse>(&err),
        Some(Ok(state)) => to_json(&ApiResponse::success(state)),
    }
}

/// Empty a slot; absent occupants and out-of-range indexes are no-ops
pub fn lineup_remove_player_json(request_json: &str) -> String {
    info!("Processing remove-player request");

    let request: SlotRequest = match serde_json::from_str(request_json) {
        Ok(req) => req,
        Err(e) => return invalid_json::<LineupStateResponse>("SlotRequest", e),
    };

    let slot = match request.slot.parse::<SlotRef>() {
        Ok(slot) => slot,
        Err(message) => return invalid_slot::<LineupStateResponse>(&message),
    };

    let outcome = session::with_open(|session| {
        let result = session.engine.remove_player(slot).map(|_| ());
        result.map(|_| state_of(session))
    });

    match outcome {
        None => no_session::<LineupStateResponse>(),
        Some(Err(err)) => engine_error::<LineupStateResponse>(&err),
        Some(Ok(state)) => to_json(&ApiResponse::success(state)),
    }
}

/// Swap the occupants of two slots from JSON request string
pub fn lineup_swap_json(request_json: &str) -> String {
    info!("Processing swap request");

    let request: SwapRequest = match serde_json::from_str(request_json) {
        Ok(req) => req,
        Err(e) => return invalid_json::<LineupStateResponse>("SwapRequest", e),
    };

    let slot_a = match request.slot_a.parse::<SlotRef>() {
        Ok(slot) => slot,
        Err(message) => return invalid_slot::<LineupStateResponse>(&message),
    };
    let slot_b = match request.slot_b.parse::<SlotRef>() {
        Ok(slot) => slot,
        Err(message) => return invalid_slot::<LineupStateResponse>(&message),
    };

    let outcome = session::with_open(|session| {
        let result = session.engine.swap(slot_a, slot_b).map(|_| ());
        result.map(|_| state_of(session))
    });

    match outcome {
        None => no_session::<LineupStateResponse>(),
        Some(Err(err)) => engine_error::<LineupStateResponse>(&err),
        Some(Ok(state)) => to_json(&ApiResponse::success(state)),
    }
}

/// List swap candidates for a slot, grouped by their current placement
pub fn lineup_swap_candidates_json(request_json: &str) -> String {
    debug!("Processing swap-candidate listing request");

    let request: CandidateQueryRequest = match serde_json::from_str(request_json) {
        Ok(req) => req,
        Err(e) => return invalid_json::<SwapGroupsResponse>("CandidateQueryRequest", e),
    };

    let slot = match request.slot.parse::<SlotRef>() {
        Ok(slot) => slot,
        Err(message) => return invalid_slot::<SwapGroupsResponse>(&message),
    };

    let outcome = session::with_open(|session| match request.query.as_deref() {
        Some(query) => session.engine.search_swap_candidates(slot, query),
        None => session.engine.list_swap_candidates(slot),
    });

    match outcome {
        None => no_session::<SwapGroupsResponse>(),
        Some(Err(err)) => engine_error::<SwapGroupsResponse>(&err),
        Some(Ok(groups)) => {
            let total = groups.iter().map(|group| group.players.len()).sum();
            let data = SwapGroupsResponse { slot: slot.to_string(), groups, total };
            to_json(&ApiResponse::success(data))
        }
    }
}

/// Resolve a picked player against a target slot from JSON request string
///
/// # Arguments
/// * `request_json` - JSON string containing ResolvePickRequest
///
/// Routes to a swap when the picked player already occupies a slot, and to a
/// placement when the player is unassigned, under the same rule enforcement
/// either way. Any armed selection is superseded by the pick.
pub fn lineup_resolve_pick_json(request_json: &str) -> String {
    info!("Processing resolve-pick request");

    let request: ResolvePickRequest = match serde_json::from_str(request_json) {
        Ok(req) => req,
        Err(e) => return invalid_json::<ResolvePickResponse>("ResolvePickRequest", e),
    };

    let slot = match request.slot.parse::<SlotRef>() {
        Ok(slot) => slot,
        Err(message) => return invalid_slot::<ResolvePickResponse>(&message),
    };

    let outcome = session::with_open(|session| {
        let engine = &mut session.engine;
        if !engine.roster().contains(request.player_id) {
            return Err(LineupError::UnknownPlayer { id: request.player_id });
        }
        engine.cancel_selection();
        let action = match engine.lineup().slot_of(request.player_id) {
            Some(source) => {
                engine.swap(slot, source).map(|_| ())?;
                PickAction::Swapped
            }
            None => {
                engine.begin_selection(slot).map(|_| ())?;
                if let Err(err) = engine.place_player(request.player_id).map(|_| ()) {
                    engine.cancel_selection();
                    return Err(err);
                }
                PickAction::Placed
            }
        };
        Ok(ResolvePickResponse { action, state: state_of(session) })
    });

    match outcome {
        None => no_session::<ResolvePickResponse>(),
        Some(Err(err)) => engine_error::<ResolvePickResponse>(&err),
        Some(Ok(data)) => to_json(&ApiResponse::success(data)),
    }
}

/// Check the open lineup against matchday submission rules
pub fn lineup_validate_json(request_json: &str) -> String {
    debug!("Processing validation request");

    if let Err(e) = parse_empty(request_json) {
        return invalid_json::<ValidationResponse>("EmptyRequest", e);
    }

    let outcome = session::with_open(|session| {
        let report = session.engine.validate_for_submission();
        ValidationResponse { valid: report.is_valid(), violations: report.violations }
    });

    match outcome {
        None => no_session::<ValidationResponse>(),
        Some(data) => to_json(&ApiResponse::success(data)),
    }
}

/// Snapshot the open session without mutating it
pub fn lineup_state_json(request_json: &str) -> String {
    debug!("Processing state request");

    if let Err(e) = parse_empty(request_json) {
        return invalid_json::<LineupStateResponse>("EmptyRequest", e);
    }

    match session::with_open(|session| state_of(session)) {
        None => no_session::<LineupStateResponse>(),
        Some(state) => to_json(&ApiResponse::success(state)),
    }
}

/// Close the open session, dropping its lineup state
pub fn lineup_close_session_json(request_json: &str) -> String {
    info!("Processing close-session request");

    if let Err(e) = parse_empty(request_json) {
        return invalid_json::<CloseSessionResponse>("EmptyRequest", e);
    }

    let closed = session::close();
    if closed {
        info!("Closed lineup session");
    } else {
        debug!("Close requested with no open session");
    }
    to_json(&ApiResponse::success(CloseSessionResponse { closed }))
}
