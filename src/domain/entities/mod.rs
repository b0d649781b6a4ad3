//! Domain entities - Core business objects

mod game;
mod game_option;
mod location;
mod restriction;
mod session;

pub use game::{Game, GameConfig};
pub use game_option::{
    GameOption, GameOptionValue, GraphPath, OptionAction, OptionCondition, OptionEffect,
};
pub use location::{ArrowType, LocationReference};
pub use restriction::EntranceRestriction;
pub use session::{
    GameSession, DECOUPLED_VALUE, DECOUPLE_TRANSITIONS_OPTION, SHOW_MAP_OFF_VALUE, SHOW_MAP_OPTION,
};
