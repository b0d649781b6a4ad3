//! Visibility rules - Which exits the UI offers, and whether the map shows
//!
//! Pure projections of (game, session). Option actions whose condition
//! matches the session's current selections can hide exits, inject fixed
//! paths, and override map visibility.

use crate::domain::entities::{
    Game, GameSession, GraphPath, LocationReference, OptionEffect, SHOW_MAP_OFF_VALUE,
    SHOW_MAP_OPTION,
};
use crate::domain::value_objects::LocationId;

/// Effects of every option action whose condition currently holds,
/// in declaration order
fn active_effects<'a>(game: &'a Game, session: &GameSession) -> Vec<&'a OptionEffect> {
    game.option_actions
        .iter()
        .filter(|action| {
            session.selected_option(&action.condition.option_id)
                == Some(action.condition.value.as_str())
        })
        .map(|action| &action.effect)
        .collect()
}

/// Exits in display order: the explicit `display_order` when present, with
/// any exits missing from it appended at the end rather than dropped;
/// declaration order otherwise.
pub fn ordered_exits(game: &Game) -> Vec<&LocationReference> {
    let Some(order) = &game.display_order else {
        return game.exits.iter().collect();
    };

    let mut ordered: Vec<&LocationReference> =
        order.iter().filter_map(|id| game.exit(id)).collect();
    for exit in &game.exits {
        if !order.contains(&exit.id) {
            ordered.push(exit);
        }
    }
    ordered
}

/// Display-ordered exits minus everything hidden by active option actions
pub fn visible_exits<'a>(game: &'a Game, session: &GameSession) -> Vec<&'a LocationReference> {
    let mut exits = ordered_exits(game);
    for effect in active_effects(game, session) {
        exits.retain(|exit| !effect.hide_exits.contains(&exit.id));
    }
    exits
}

/// Fixed paths injected by active option actions, in declaration order.
/// Duplicates are kept; the last writer wins visually in the renderer.
pub fn option_paths(game: &Game, session: &GameSession) -> Vec<GraphPath> {
    active_effects(game, session)
        .into_iter()
        .flat_map(|effect| effect.add_paths.iter().cloned())
        .collect()
}

/// Whether the map panel should be shown: the game default, overridden by the
/// first active option action that cares, gated by the user-level show-map
/// option.
pub fn map_visibility(game: &Game, session: &GameSession) -> bool {
    let mut visible = game.config.show_map;
    for effect in active_effects(game, session) {
        if let Some(overridden) = effect.show_map {
            visible = overridden;
            break;
        }
    }
    let user_enabled =
        session.selected_option(&SHOW_MAP_OPTION.into()) != Some(SHOW_MAP_OFF_VALUE);
    visible && user_enabled
}

/// Destinations already taken by other exits, used by the UI to disable or
/// hide duplicate choices for games without swap-on-duplicate.
pub fn taken_destinations(session: &GameSession, exit_id: &LocationId) -> Vec<LocationId> {
    session
        .exit_to_entrance_map
        .iter()
        .filter(|(slot, _)| *slot != exit_id)
        .map(|(_, destination)| destination.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{GameConfig, GameOption, LocationReference, OptionAction};
    use crate::domain::services::mapping;
    use crate::domain::value_objects::OptionId;

    fn game_with_hidden_exit() -> Game {
        Game::new("g", "Game")
            .with_exits(vec![
                LocationReference::new("x", "X"),
                LocationReference::new("y", "Y"),
                LocationReference::new("z", "Z"),
            ])
            .with_entrances(vec![
                LocationReference::new("x", "X"),
                LocationReference::new("y", "Y"),
                LocationReference::new("z", "Z"),
            ])
            .with_options(vec![GameOption::new("shuffle", "Shuffle")
                .value("on", "Shuffled")
                .value("off", "Vanilla")
                .with_default("on")])
            .with_option_actions(vec![OptionAction::when("shuffle", "off").hide_exits(["x"])])
    }

    fn session_for(game: &Game) -> GameSession {
        let mut session = GameSession::new(game.id.clone(), "run");
        session.selected_options = mapping::initial_options(game);
        session
    }

    fn visible_ids(game: &Game, session: &GameSession) -> Vec<String> {
        visible_exits(game, session)
            .iter()
            .map(|e| e.id.to_string())
            .collect()
    }

    #[test]
    fn all_exits_visible_without_matching_action() {
        let game = game_with_hidden_exit();
        let session = session_for(&game);
        assert_eq!(visible_ids(&game, &session), ["x", "y", "z"]);
    }

    #[test]
    fn hidden_exit_never_appears_even_when_assigned() {
        let game = game_with_hidden_exit();
        let mut session = session_for(&game);
        session
            .selected_options
            .insert(OptionId::new("shuffle"), "off".to_string());
        mapping::apply_mapping(&game, &mut session, &"x".into(), Some(&"y".into()));

        assert_eq!(visible_ids(&game, &session), ["y", "z"]);
    }

    #[test]
    fn display_order_wins_and_stragglers_are_appended() {
        let mut game = game_with_hidden_exit();
        game.display_order = Some(vec!["z".into(), "x".into()]);
        let ordered: Vec<&str> = ordered_exits(&game).iter().map(|e| e.id.as_str()).collect();
        // y is missing from the explicit order but must not be dropped
        assert_eq!(ordered, ["z", "x", "y"]);
    }

    #[test]
    fn option_paths_union_in_declaration_order() {
        let mut game = game_with_hidden_exit();
        game.option_actions = vec![
            OptionAction::when("shuffle", "off").add_paths([
                GraphPath::new("a", "b"),
                GraphPath::new("c", "d"),
            ]),
            OptionAction::when("shuffle", "off").add_paths([GraphPath::new("a", "b")]),
        ];
        let mut session = session_for(&game);
        session
            .selected_options
            .insert(OptionId::new("shuffle"), "off".to_string());

        let paths = option_paths(&game, &session);
        assert_eq!(
            paths,
            vec![
                GraphPath::new("a", "b"),
                GraphPath::new("c", "d"),
                GraphPath::new("a", "b"),
            ]
        );
    }

    #[test]
    fn map_visibility_overridden_by_first_matching_action() {
        let mut game = game_with_hidden_exit();
        game.config = GameConfig {
            show_map: false,
            ..GameConfig::default()
        };
        game.option_actions = vec![OptionAction::when("shuffle", "off").show_map(true)];
        let mut session = session_for(&game);

        assert!(!map_visibility(&game, &session));
        session
            .selected_options
            .insert(OptionId::new("shuffle"), "off".to_string());
        assert!(map_visibility(&game, &session));
    }

    #[test]
    fn user_show_map_option_forces_the_map_off() {
        let game = game_with_hidden_exit();
        let mut session = session_for(&game);
        assert!(map_visibility(&game, &session));
        session
            .selected_options
            .insert(SHOW_MAP_OPTION.into(), SHOW_MAP_OFF_VALUE.to_string());
        assert!(!map_visibility(&game, &session));
    }

    #[test]
    fn taken_destinations_exclude_own_slot() {
        let game = game_with_hidden_exit();
        let mut session = session_for(&game);
        mapping::apply_mapping(&game, &mut session, &"x".into(), Some(&"z".into()));
        mapping::apply_mapping(&game, &mut session, &"y".into(), Some(&"x".into()));

        let mut taken = taken_destinations(&session, &"x".into());
        taken.sort();
        assert_eq!(taken, vec![LocationId::new("x")]);
    }
}
