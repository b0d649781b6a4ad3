//! Mapping engine - Pure mutation rules for a session's assignment
//!
//! These functions own the exit→destination write semantics: single-slot
//! writes, swap-vs-overwrite conflict resolution, bidirectional-pair
//! propagation, and reset. Persistence is layered on top by the application
//! services; everything here is a synchronous in-memory computation.

use std::collections::HashMap;

use crate::domain::entities::{Game, GameSession};
use crate::domain::services::visibility;
use crate::domain::value_objects::{LocationId, OptionId};

/// The assignment a fresh session starts with.
///
/// Start-unselected games begin with every slot empty; otherwise the vanilla
/// map is copied verbatim; otherwise exits and entrances are paired by index
/// (only meaningful for games whose two lists are order-aligned).
pub fn initial_mapping(game: &Game) -> HashMap<LocationId, LocationId> {
    if game.config.start_unselected {
        return HashMap::new();
    }
    if let Some(vanilla) = &game.vanilla_map {
        return vanilla.clone();
    }
    game.exits
        .iter()
        .zip(game.entrances.iter())
        .map(|(exit, entrance)| (exit.id.clone(), entrance.id.clone()))
        .collect()
}

/// Option selections a fresh session starts with
pub fn initial_options(game: &Game) -> HashMap<OptionId, String> {
    game.options
        .iter()
        .filter_map(|option| {
            option
                .default_selection()
                .map(|value| (option.id.clone(), value.to_string()))
        })
        .collect()
}

/// Apply one assignment write. Returns whether the session changed.
///
/// `destination = None` clears the slot (and, while pairing is active, the
/// slot of the exit's bidirectional pair).
///
/// When another exit already holds the destination, the two assignments are
/// swapped only if this exit previously held one itself; filling a
/// previously-empty slot overwrites without disturbing the other exit, so
/// duplicate destinations are allowed transiently while populating an empty
/// grid. A conflict with the exit's own bidirectional counterpart skips the
/// swap logic entirely; the reciprocal step rewires the counterpart instead.
pub fn apply_mapping(
    game: &Game,
    session: &mut GameSession,
    exit_id: &LocationId,
    destination: Option<&LocationId>,
) -> bool {
    let pairing = !session.decoupled_transitions();
    let exit_pair = game
        .exit(exit_id)
        .and_then(|e| e.bidirectional_pair.clone());

    let Some(destination) = destination else {
        if session.destination_of(exit_id).is_none() {
            return false;
        }
        session.exit_to_entrance_map.remove(exit_id);
        if pairing {
            if let Some(pair) = &exit_pair {
                session.exit_to_entrance_map.remove(pair);
            }
        }
        return true;
    };

    if session.destination_of(exit_id) == Some(destination) {
        return false;
    }
    let previous = session.destination_of(exit_id).cloned();

    let conflicting = session
        .exit_to_entrance_map
        .iter()
        .find(|(slot, wired)| *slot != exit_id && *wired == destination)
        .map(|(slot, _)| slot.clone());

    session
        .exit_to_entrance_map
        .insert(exit_id.clone(), destination.clone());

    if let Some(conflicting) = conflicting {
        let is_counterpart = pairing
            && (exit_pair.as_ref() == Some(&conflicting)
                || game
                    .exit(&conflicting)
                    .and_then(|e| e.bidirectional_pair.as_ref())
                    == Some(exit_id));
        if !is_counterpart {
            if let Some(previous) = previous {
                // both slots were occupied: the conflicting exit takes over
                // the old destination
                session.exit_to_entrance_map.insert(conflicting, previous);
            }
        }
    }

    if pairing {
        if let (Some(exit_pair), Some(destination_pair)) = (
            exit_pair,
            game.location(destination)
                .and_then(|d| d.bidirectional_pair.clone()),
        ) {
            // A↔A' wired to B (reverse side B') forces B'→A'
            session
                .exit_to_entrance_map
                .insert(destination_pair, exit_pair);
        }
    }

    true
}

/// Restore the default assignment, then overlay the fixed paths injected by
/// currently-active option actions so a reset respects the player's current
/// option selections rather than stale defaults.
pub fn reset(game: &Game, session: &mut GameSession) {
    let mut mapping = session.default_exit_to_entrance_map.clone();
    for path in visibility::option_paths(game, session) {
        mapping.insert(path.from, path.to);
    }
    session.exit_to_entrance_map = mapping;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{
        GameConfig, GameOption, GraphPath, LocationReference, OptionAction,
        DECOUPLE_TRANSITIONS_OPTION,
    };

    fn loc(id: &str) -> LocationReference {
        LocationReference::new(id, id.to_uppercase())
    }

    /// Four unpaired exits, unrestricted
    fn unpaired_game() -> Game {
        let locations = vec![loc("e1"), loc("e2"), loc("d1"), loc("d2")];
        Game::new("plain", "Plain")
            .with_exits(locations.clone())
            .with_entrances(locations)
    }

    /// Two bidirectional pairs: a↔a2 and b↔b2
    fn paired_game() -> Game {
        let locations = vec![
            loc("a").paired_with("a2"),
            loc("a2").paired_with("a"),
            loc("b").paired_with("b2"),
            loc("b2").paired_with("b"),
        ];
        Game::new("paired", "Paired")
            .with_exits(locations.clone())
            .with_entrances(locations)
            .with_options(vec![GameOption::new(DECOUPLE_TRANSITIONS_OPTION, "Decouple")
                .value("false", "No (Two-Way)")
                .value("true", "Yes (One-Way)")])
    }

    fn session_for(game: &Game) -> GameSession {
        let mut session = GameSession::new(game.id.clone(), "test run");
        session.selected_options = initial_options(game);
        session
    }

    fn assigned(session: &GameSession, exit: &str) -> Option<String> {
        session
            .destination_of(&exit.into())
            .map(|d| d.as_str().to_string())
    }

    #[test]
    fn write_and_noop() {
        let game = unpaired_game();
        let mut session = session_for(&game);
        assert!(apply_mapping(&game, &mut session, &"e1".into(), Some(&"d1".into())));
        assert!(!apply_mapping(&game, &mut session, &"e1".into(), Some(&"d1".into())));
        assert_eq!(assigned(&session, "e1").as_deref(), Some("d1"));
    }

    #[test]
    fn swap_when_both_slots_occupied_and_is_its_own_inverse() {
        let game = unpaired_game();
        let mut session = session_for(&game);
        apply_mapping(&game, &mut session, &"e1".into(), Some(&"d1".into()));
        apply_mapping(&game, &mut session, &"e2".into(), Some(&"d2".into()));

        apply_mapping(&game, &mut session, &"e1".into(), Some(&"d2".into()));
        assert_eq!(assigned(&session, "e1").as_deref(), Some("d2"));
        assert_eq!(assigned(&session, "e2").as_deref(), Some("d1"));

        apply_mapping(&game, &mut session, &"e1".into(), Some(&"d1".into()));
        assert_eq!(assigned(&session, "e1").as_deref(), Some("d1"));
        assert_eq!(assigned(&session, "e2").as_deref(), Some("d2"));
    }

    #[test]
    fn filling_an_empty_slot_does_not_steal_from_another_exit() {
        let game = unpaired_game();
        let mut session = session_for(&game);
        apply_mapping(&game, &mut session, &"e2".into(), Some(&"d1".into()));

        apply_mapping(&game, &mut session, &"e1".into(), Some(&"d1".into()));
        assert_eq!(assigned(&session, "e1").as_deref(), Some("d1"));
        // duplicate destinations are allowed transiently when filling
        assert_eq!(assigned(&session, "e2").as_deref(), Some("d1"));
    }

    #[test]
    fn two_exit_ring() {
        let game = unpaired_game();
        let mut session = session_for(&game);
        apply_mapping(&game, &mut session, &"e1".into(), Some(&"e2".into()));
        apply_mapping(&game, &mut session, &"e2".into(), Some(&"e1".into()));
        assert_eq!(assigned(&session, "e1").as_deref(), Some("e2"));
        assert_eq!(assigned(&session, "e2").as_deref(), Some("e1"));
        assert_eq!(session.exit_to_entrance_map.len(), 2);
    }

    #[test]
    fn bidirectional_pairing_propagates_to_the_reverse_side() {
        let game = paired_game();
        let mut session = session_for(&game);
        apply_mapping(&game, &mut session, &"a".into(), Some(&"b".into()));
        assert_eq!(assigned(&session, "a").as_deref(), Some("b"));
        assert_eq!(assigned(&session, "b2").as_deref(), Some("a2"));
    }

    #[test]
    fn decoupled_transitions_touch_only_the_written_slot() {
        let game = paired_game();
        let mut session = session_for(&game);
        session
            .selected_options
            .insert(DECOUPLE_TRANSITIONS_OPTION.into(), "true".to_string());

        apply_mapping(&game, &mut session, &"a".into(), Some(&"b".into()));
        assert_eq!(assigned(&session, "a").as_deref(), Some("b"));
        assert_eq!(session.exit_to_entrance_map.len(), 1);
    }

    #[test]
    fn conflict_with_own_counterpart_skips_the_swap() {
        let game = paired_game();
        let mut session = session_for(&game);
        // a2 currently wired to b; writing a→b conflicts with a's own
        // counterpart, so no swap happens and the reciprocal step rewires b2
        apply_mapping(&game, &mut session, &"a2".into(), Some(&"b".into()));
        apply_mapping(&game, &mut session, &"a".into(), Some(&"b".into()));
        assert_eq!(assigned(&session, "a").as_deref(), Some("b"));
        assert_eq!(assigned(&session, "b2").as_deref(), Some("a2"));
    }

    #[test]
    fn clearing_a_slot_clears_the_pair_too() {
        let game = paired_game();
        let mut session = session_for(&game);
        apply_mapping(&game, &mut session, &"a".into(), Some(&"b".into()));
        assert!(apply_mapping(&game, &mut session, &"a".into(), None));
        assert_eq!(assigned(&session, "a"), None);
        // a's pair slot (a2) is cleared alongside; b2 keeps its wiring
        assert_eq!(assigned(&session, "a2"), None);
        assert!(!apply_mapping(&game, &mut session, &"a".into(), None));
    }

    #[test]
    fn clearing_while_decoupled_leaves_the_pair_alone() {
        let game = paired_game();
        let mut session = session_for(&game);
        apply_mapping(&game, &mut session, &"a".into(), Some(&"b".into()));
        apply_mapping(&game, &mut session, &"a2".into(), Some(&"b2".into()));
        session
            .selected_options
            .insert(DECOUPLE_TRANSITIONS_OPTION.into(), "true".to_string());

        apply_mapping(&game, &mut session, &"a".into(), None);
        assert_eq!(assigned(&session, "a"), None);
        assert_eq!(assigned(&session, "a2").as_deref(), Some("b2"));
    }

    /// Restrictions are advisory: the UI declines to offer illegal choices,
    /// but the write path itself never blocks one. This pins the current
    /// contract rather than flagging a bug.
    #[test]
    fn writes_outside_the_advisory_restrictions_are_not_blocked() {
        use crate::domain::entities::EntranceRestriction;
        use crate::domain::services::resolver;

        let mut game = unpaired_game();
        game.restrictions = vec![EntranceRestriction::new("plain", "e1", ["d1", "d2"])];
        let mut session = session_for(&game);

        let legal = resolver::valid_destinations(&game, &"e1".into(), &session.selected_options);
        assert!(!legal.contains(&"e2".into()));

        assert!(apply_mapping(&game, &mut session, &"e1".into(), Some(&"e2".into())));
        assert_eq!(assigned(&session, "e1").as_deref(), Some("e2"));
    }

    #[test]
    fn start_unselected_games_begin_empty() {
        let mut game = unpaired_game();
        game.config = GameConfig {
            start_unselected: true,
            ..GameConfig::default()
        };
        assert!(initial_mapping(&game).is_empty());
    }

    #[test]
    fn vanilla_map_copied_verbatim() {
        let game = unpaired_game().with_vanilla_map(HashMap::from([(
            LocationId::new("e1"),
            LocationId::new("d1"),
        )]));
        let mapping = initial_mapping(&game);
        assert_eq!(mapping.len(), 1);
        assert_eq!(mapping.get(&"e1".into()), Some(&"d1".into()));
    }

    #[test]
    fn positional_fallback_pairs_by_index() {
        let game = unpaired_game();
        let mapping = initial_mapping(&game);
        assert_eq!(mapping.get(&"e1".into()), Some(&"e1".into()));
        assert_eq!(mapping.len(), game.exits.len());
    }

    #[test]
    fn reset_restores_defaults_and_is_idempotent() {
        let game = unpaired_game();
        let mut session = session_for(&game);
        session.default_exit_to_entrance_map =
            HashMap::from([(LocationId::new("e1"), LocationId::new("d1"))]);
        apply_mapping(&game, &mut session, &"e1".into(), Some(&"d2".into()));
        apply_mapping(&game, &mut session, &"e2".into(), Some(&"d1".into()));

        reset(&game, &mut session);
        let first = session.exit_to_entrance_map.clone();
        reset(&game, &mut session);
        assert_eq!(session.exit_to_entrance_map, first);
        assert_eq!(first, session.default_exit_to_entrance_map);
    }

    #[test]
    fn reset_overlays_active_option_paths() {
        let mut game = unpaired_game();
        game.options = vec![GameOption::new("shuffle", "Shuffle")
            .value("on", "Shuffled")
            .value("off", "Vanilla")
            .with_default("on")];
        game.option_actions = vec![OptionAction::when("shuffle", "off")
            .add_paths([GraphPath::new("e1", "d2")])];

        let mut session = session_for(&game);
        session.default_exit_to_entrance_map =
            HashMap::from([(LocationId::new("e1"), LocationId::new("d1"))]);

        session
            .selected_options
            .insert(OptionId::new("shuffle"), "off".to_string());
        reset(&game, &mut session);
        assert_eq!(
            session.destination_of(&"e1".into()),
            Some(&LocationId::new("d2"))
        );

        session
            .selected_options
            .insert(OptionId::new("shuffle"), "on".to_string());
        reset(&game, &mut session);
        assert_eq!(
            session.destination_of(&"e1".into()),
            Some(&LocationId::new("d1"))
        );
    }
}
