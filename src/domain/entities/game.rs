//! Game entity - Immutable definition of one randomizer target
//!
//! Games are constructed once at process start from static content modules
//! and never mutated afterwards. Everything the engine derives (legal
//! destinations, visible exits, graph text) is a pure projection of a `Game`
//! plus one `GameSession`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::entities::{EntranceRestriction, GameOption, LocationReference, OptionAction};
use crate::domain::value_objects::{GameId, LocationId, OptionId};

/// Per-game behavior flags read by multiple components
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GameConfig {
    /// Whether the map panel is shown by default
    pub show_map: bool,
    /// Fresh sessions start with every slot unassigned
    pub start_unselected: bool,
    /// Selecting an already-taken destination swaps the two assignments
    /// instead of the UI disabling the choice
    pub allow_swap_on_duplicate: bool,
    /// Hide disabled dropdown choices entirely instead of greying them out
    pub hide_disabled_options: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            show_map: true,
            start_unselected: false,
            allow_swap_on_duplicate: false,
            hide_disabled_options: false,
        }
    }
}

/// Immutable definition of one randomizer target
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Always-existing area nodes (drawn by the static graph fragment)
    #[serde(default)]
    pub nodes: Vec<LocationReference>,
    pub exits: Vec<LocationReference>,
    /// Destinations an exit can be wired to; may equal or overlap `exits`
    pub entrances: Vec<LocationReference>,
    /// Static graph-description fragment prepended to every composed graph
    pub static_graph: String,
    pub restrictions: Vec<EntranceRestriction>,
    pub options: Vec<GameOption>,
    #[serde(default)]
    pub option_actions: Vec<OptionAction>,
    /// Explicit UI ordering of exit ids; declaration order when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_order: Option<Vec<LocationId>>,
    /// Default unshuffled assignment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vanilla_map: Option<HashMap<LocationId, LocationId>>,
    pub config: GameConfig,
}

impl Game {
    pub fn new(id: impl Into<GameId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            nodes: Vec::new(),
            exits: Vec::new(),
            entrances: Vec::new(),
            static_graph: String::new(),
            restrictions: Vec::new(),
            options: Vec::new(),
            option_actions: Vec::new(),
            display_order: None,
            vanilla_map: None,
            config: GameConfig::default(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_nodes(mut self, nodes: Vec<LocationReference>) -> Self {
        self.nodes = nodes;
        self
    }

    pub fn with_exits(mut self, exits: Vec<LocationReference>) -> Self {
        self.exits = exits;
        self
    }

    pub fn with_entrances(mut self, entrances: Vec<LocationReference>) -> Self {
        self.entrances = entrances;
        self
    }

    pub fn with_static_graph(mut self, fragment: impl Into<String>) -> Self {
        self.static_graph = fragment.into();
        self
    }

    pub fn with_restrictions(mut self, restrictions: Vec<EntranceRestriction>) -> Self {
        self.restrictions = restrictions;
        self
    }

    pub fn with_options(mut self, options: Vec<GameOption>) -> Self {
        self.options = options;
        self
    }

    pub fn with_option_actions(mut self, actions: Vec<OptionAction>) -> Self {
        self.option_actions = actions;
        self
    }

    pub fn with_display_order<I, S>(mut self, order: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<LocationId>,
    {
        self.display_order = Some(order.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_vanilla_map(mut self, map: HashMap<LocationId, LocationId>) -> Self {
        self.vanilla_map = Some(map);
        self
    }

    pub fn with_config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    /// Look up an exit record by id
    pub fn exit(&self, id: &LocationId) -> Option<&LocationReference> {
        self.exits.iter().find(|e| &e.id == id)
    }

    /// Look up an entrance record by id
    pub fn entrance(&self, id: &LocationId) -> Option<&LocationReference> {
        self.entrances.iter().find(|e| &e.id == id)
    }

    /// Look up a location by id, preferring the entrance record (destinations
    /// carry their presentation flags on the entrance side)
    pub fn location(&self, id: &LocationId) -> Option<&LocationReference> {
        self.entrance(id)
            .or_else(|| self.exit(id))
            .or_else(|| self.nodes.iter().find(|n| &n.id == id))
    }

    pub fn option(&self, id: &OptionId) -> Option<&GameOption> {
        self.options.iter().find(|o| &o.id == id)
    }
}
