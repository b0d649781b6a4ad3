//! Game options - User-configurable shuffle settings and their effects

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{LocationId, OptionId};

/// One selectable value of a game option
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameOptionValue {
    pub id: String,
    pub description: String,
}

/// A user-configurable shuffle setting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameOption {
    pub id: OptionId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub values: Vec<GameOptionValue>,
    /// Falls back to the first declared value when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

impl GameOption {
    pub fn new(id: impl Into<OptionId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            values: Vec::new(),
            default_value: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn value(mut self, id: impl Into<String>, description: impl Into<String>) -> Self {
        self.values.push(GameOptionValue {
            id: id.into(),
            description: description.into(),
        });
        self
    }

    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// The value a fresh session starts with
    pub fn default_selection(&self) -> Option<&str> {
        self.default_value
            .as_deref()
            .or_else(|| self.values.first().map(|v| v.id.as_str()))
    }
}

/// Predicate on the current option selections
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionCondition {
    pub option_id: OptionId,
    pub value: String,
}

impl OptionCondition {
    pub fn new(option_id: impl Into<OptionId>, value: impl Into<String>) -> Self {
        Self {
            option_id: option_id.into(),
            value: value.into(),
        }
    }
}

/// A raw from→to edge injected into the graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphPath {
    pub from: LocationId,
    pub to: LocationId,
}

impl GraphPath {
    pub fn new(from: impl Into<LocationId>, to: impl Into<LocationId>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// Declarative side effects applied while a condition holds
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OptionEffect {
    /// Exit ids removed from the selection UI
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hide_exits: Vec<LocationId>,
    /// Fixed paths drawn in place of shuffled connections
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub add_paths: Vec<GraphPath>,
    /// Overrides the game's default map visibility
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_map: Option<bool>,
}

/// Effects triggered when an option equals a given value
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionAction {
    pub condition: OptionCondition,
    pub effect: OptionEffect,
}

impl OptionAction {
    pub fn when(option_id: impl Into<OptionId>, value: impl Into<String>) -> Self {
        Self {
            condition: OptionCondition::new(option_id, value),
            effect: OptionEffect::default(),
        }
    }

    pub fn hide_exits<I, S>(mut self, exits: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<LocationId>,
    {
        self.effect
            .hide_exits
            .extend(exits.into_iter().map(Into::into));
        self
    }

    pub fn add_paths<I>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = GraphPath>,
    {
        self.effect.add_paths.extend(paths);
        self
    }

    pub fn show_map(mut self, visible: bool) -> Self {
        self.effect.show_map = Some(visible);
        self
    }
}
