//! Restriction resolver - Legal destination computation
//!
//! Pure function of (game, exit, current options). Tables are small (at most
//! a few hundred rows for the largest game), so a sequential scan is fine.

use std::collections::HashMap;

use crate::domain::entities::Game;
use crate::domain::value_objects::{LocationId, OptionId};

/// Destinations the given exit may legally be wired to.
///
/// Resolution order: the first restriction whose condition matches the
/// current option selections wins; otherwise the first unconditional
/// restriction for the exit; otherwise every entrance is allowed.
///
/// The result is advisory. The mapping engine does not re-check legality on
/// write; the selection UI is expected to only offer ids from this list.
pub fn valid_destinations(
    game: &Game,
    exit_id: &LocationId,
    selected_options: &HashMap<OptionId, String>,
) -> Vec<LocationId> {
    for restriction in &game.restrictions {
        if &restriction.exit_id != exit_id {
            continue;
        }
        let Some(condition) = &restriction.condition else {
            continue;
        };
        if selected_options.get(&condition.option_id) == Some(&condition.value) {
            return restriction.allowed_entrance_ids.clone();
        }
    }

    if let Some(restriction) = game
        .restrictions
        .iter()
        .find(|r| &r.exit_id == exit_id && r.condition.is_none())
    {
        return restriction.allowed_entrance_ids.clone();
    }

    game.entrances.iter().map(|e| e.id.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{EntranceRestriction, GameOption, LocationReference};

    fn star_game() -> Game {
        Game::new("stars", "Star Game")
            .with_exits(vec![
                LocationReference::new("star-1", "Star 1"),
                LocationReference::new("pipe-9", "Pipe 9"),
            ])
            .with_entrances(vec![
                LocationReference::new("star-2", "Star 2"),
                LocationReference::new("star-3", "Star 3"),
                LocationReference::new("pipe-9", "Pipe 9"),
            ])
            .with_options(vec![GameOption::new("mix", "Pool Mixing")
                .value("off", "Separate pools")
                .value("on", "Mixed pools")])
            .with_restrictions(vec![
                EntranceRestriction::new("stars", "star-1", ["star-2", "star-3", "pipe-9"])
                    .when("mix", "on"),
                EntranceRestriction::new("stars", "star-1", ["star-2", "star-3"]),
            ])
    }

    fn ids(raw: &[&str]) -> Vec<LocationId> {
        raw.iter().map(|&s| LocationId::new(s)).collect()
    }

    #[test]
    fn unconditional_restriction_applies_by_default() {
        let game = star_game();
        let destinations = valid_destinations(&game, &"star-1".into(), &HashMap::new());
        assert_eq!(destinations, ids(&["star-2", "star-3"]));
    }

    #[test]
    fn matching_conditional_beats_unconditional() {
        let game = star_game();
        let options = HashMap::from([(OptionId::new("mix"), "on".to_string())]);
        let destinations = valid_destinations(&game, &"star-1".into(), &options);
        assert_eq!(destinations, ids(&["star-2", "star-3", "pipe-9"]));
    }

    #[test]
    fn non_matching_condition_falls_back_to_unconditional() {
        let game = star_game();
        let options = HashMap::from([(OptionId::new("mix"), "off".to_string())]);
        let destinations = valid_destinations(&game, &"star-1".into(), &options);
        assert_eq!(destinations, ids(&["star-2", "star-3"]));
    }

    #[test]
    fn unrestricted_exit_gets_every_entrance() {
        let game = star_game();
        let destinations = valid_destinations(&game, &"pipe-9".into(), &HashMap::new());
        assert_eq!(destinations, ids(&["star-2", "star-3", "pipe-9"]));
    }
}
