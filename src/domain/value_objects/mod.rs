//! Value objects - Identifiers and small immutable types

mod ids;

pub use ids::{GameId, LocationId, OptionId, SessionId};
