//! Entrance restrictions - Legality rules for exit destinations

use serde::{Deserialize, Serialize};

use crate::domain::entities::OptionCondition;
use crate::domain::value_objects::{GameId, LocationId, OptionId};

/// Limits which destinations are legal for one exit, optionally only while an
/// option condition holds. Multiple restrictions may exist for the same exit
/// (conditional variants plus an unconditional fallback); resolution order is
/// defined by the restriction resolver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntranceRestriction {
    pub game_id: GameId,
    pub exit_id: LocationId,
    /// Applies unconditionally when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<OptionCondition>,
    pub allowed_entrance_ids: Vec<LocationId>,
}

impl EntranceRestriction {
    pub fn new<I, S>(game_id: impl Into<GameId>, exit_id: impl Into<LocationId>, allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<LocationId>,
    {
        Self {
            game_id: game_id.into(),
            exit_id: exit_id.into(),
            condition: None,
            allowed_entrance_ids: allowed.into_iter().map(Into::into).collect(),
        }
    }

    /// Restrict only while `option_id` equals `value`
    pub fn when(mut self, option_id: impl Into<OptionId>, value: impl Into<String>) -> Self {
        self.condition = Some(OptionCondition::new(option_id, value));
        self
    }
}
