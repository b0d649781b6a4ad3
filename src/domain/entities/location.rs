//! Location references - Exits and entrances in a game's map
//!
//! A `LocationReference` is one endpoint of a shuffleable connection. The same
//! id may appear in a game's exit list and entrance list with different
//! presentation flags (e.g. drawable on one side only), which is why lookups
//! go through `Game::exit` / `Game::entrance` rather than a single index.

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::LocationId;

/// Arrow direction drawn for a connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ArrowType {
    #[default]
    Forward,
    Backward,
    Bidirectional,
}

impl ArrowType {
    /// Glyph used in the graph description mini-language
    pub fn glyph(&self) -> &'static str {
        match self {
            ArrowType::Forward => "-->",
            ArrowType::Backward => "<--",
            ArrowType::Bidirectional => "<-->",
        }
    }
}

/// An exit or entrance node in a game's map
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationReference {
    pub id: LocationId,
    pub name: String,
    /// Free-form category used by restriction tables (e.g. "star", "west")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// If set, this location is rendered as a labeled edge from the named
    /// area node instead of as its own graph node
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_node_id: Option<LocationId>,
    #[serde(default)]
    pub arrow_type: ArrowType,
    /// Id of the reciprocal location representing the other direction of the
    /// same physical connection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bidirectional_pair: Option<LocationId>,
    /// Label used to cluster locations in the selection UI
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ui_group: Option<String>,
    /// Search keywords
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Excluded from the rendered graph when false, even when mapped
    #[serde(default = "default_drawable")]
    pub drawable: bool,
}

fn default_drawable() -> bool {
    true
}

impl LocationReference {
    pub fn new(id: impl Into<LocationId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: None,
            parent_node_id: None,
            arrow_type: ArrowType::Forward,
            bidirectional_pair: None,
            ui_group: None,
            tags: Vec::new(),
            drawable: true,
        }
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn with_parent_node(mut self, parent: impl Into<LocationId>) -> Self {
        self.parent_node_id = Some(parent.into());
        self
    }

    pub fn with_arrow(mut self, arrow_type: ArrowType) -> Self {
        self.arrow_type = arrow_type;
        self
    }

    /// Mark this location as one direction of a two-way connection
    pub fn paired_with(mut self, other: impl Into<LocationId>) -> Self {
        self.bidirectional_pair = Some(other.into());
        self.arrow_type = ArrowType::Bidirectional;
        self
    }

    pub fn with_ui_group(mut self, group: impl Into<String>) -> Self {
        self.ui_group = Some(group.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn not_drawable(mut self) -> Self {
        self.drawable = false;
        self
    }
}
