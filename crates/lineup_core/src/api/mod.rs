pub mod lineup_json;
pub mod session;

pub use lineup_json::{
    lineup_begin_selection_json, lineup_candidates_json, lineup_cancel_selection_json,
    lineup_close_session_json, lineup_open_session_json, lineup_place_player_json,
    lineup_remove_player_json, lineup_resolve_pick_json, lineup_set_formation_json,
    lineup_state_json, lineup_swap_candidates_json, lineup_swap_json, lineup_validate_json,
    ApiError, ApiResponse, API_VERSION,
};
pub use session::LineupSession;
