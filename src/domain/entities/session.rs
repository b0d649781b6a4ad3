//! Game session - Mutable per-run tracking state
//!
//! A session is owned by the session store; the mapping engine receives a
//! mutable reference, applies one write, and hands it back for persistence.
//! An exit with no entry in `exit_to_entrance_map` is unassigned.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{GameId, LocationId, OptionId, SessionId};

/// Option id controlling whether two-way connections are kept in lockstep
pub const DECOUPLE_TRANSITIONS_OPTION: &str = "decouple-transitions";
/// Value of [`DECOUPLE_TRANSITIONS_OPTION`] that treats each direction as an
/// independent one-way link
pub const DECOUPLED_VALUE: &str = "true";

/// Option id letting the user hide the map panel regardless of game defaults
pub const SHOW_MAP_OPTION: &str = "show-map";
/// Value of [`SHOW_MAP_OPTION`] that hides the map
pub const SHOW_MAP_OFF_VALUE: &str = "off";

/// One tracked randomizer run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSession {
    pub id: SessionId,
    pub game_id: GameId,
    pub name: String,
    /// optionId → selected value id
    #[serde(default)]
    pub selected_options: HashMap<OptionId, String>,
    /// exitId → destination location id (the specific exit this exit leads to)
    #[serde(default)]
    pub exit_to_entrance_map: HashMap<LocationId, LocationId>,
    /// Snapshot captured at creation, used by reset
    #[serde(default)]
    pub default_exit_to_entrance_map: HashMap<LocationId, LocationId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl GameSession {
    pub fn new(game_id: impl Into<GameId>, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: SessionId::new(),
            game_id: game_id.into(),
            name: name.into(),
            selected_options: HashMap::new(),
            exit_to_entrance_map: HashMap::new(),
            default_exit_to_entrance_map: HashMap::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Current value of an option, if one has been selected
    pub fn selected_option(&self, option_id: &OptionId) -> Option<&str> {
        self.selected_options.get(option_id).map(String::as_str)
    }

    /// Whether bidirectional pairing is disabled for this session
    pub fn decoupled_transitions(&self) -> bool {
        self.selected_options
            .get(&OptionId::new(DECOUPLE_TRANSITIONS_OPTION))
            .is_some_and(|v| v == DECOUPLED_VALUE)
    }

    /// Current destination for an exit, if assigned
    pub fn destination_of(&self, exit_id: &LocationId) -> Option<&LocationId> {
        self.exit_to_entrance_map.get(exit_id)
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
