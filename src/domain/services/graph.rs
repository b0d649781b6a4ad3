//! Graph composer - Projects a session onto the renderer's mini-language
//!
//! The output grammar is a declarative directed-graph text format:
//! `node["label"];`, `a-->b;`, `a-->|label|b;`, `a<-->b;`, `%% comment`.
//! The composer is stateless; the string is opaque to everything downstream
//! of the rendering collaborator.

use crate::domain::entities::{ArrowType, Game, GameSession};
use crate::domain::services::visibility;

/// Characters with syntactic meaning in the graph grammar are escaped in
/// edge labels; `#` introduces an entity reference.
fn escape_label(name: &str) -> String {
    name.replace('#', "#35;")
}

/// Compose the full graph description for a session: the game's static
/// fragment, one edge per drawn assignment, then raw edges for active
/// option-injected paths.
///
/// Drawing is independent of UI visibility: an exit hidden from the dropdown
/// grid may still carry a drawable vanilla connection. Self-loops (an exit
/// whose destination resolves back into its own area node) are suppressed;
/// they add no information to the graph.
pub fn compose_graph(game: &Game, session: &GameSession) -> String {
    let decoupled = session.decoupled_transitions();
    let mut graph = game.static_graph.trim_end().to_string();

    for exit in visibility::ordered_exits(game) {
        if !exit.drawable {
            continue;
        }
        let Some(destination_id) = session.destination_of(&exit.id) else {
            continue;
        };
        let destination = game.location(destination_id);
        if destination.is_some_and(|d| !d.drawable) {
            continue;
        }

        let source_node = exit.parent_node_id.as_ref().unwrap_or(&exit.id);
        let destination_node = destination
            .and_then(|d| d.parent_node_id.as_ref())
            .unwrap_or(destination_id);
        if source_node == destination_node {
            continue;
        }

        let arrow = if decoupled && exit.arrow_type == ArrowType::Bidirectional {
            ArrowType::Forward
        } else {
            exit.arrow_type
        };

        graph.push('\n');
        if exit.parent_node_id.is_some() {
            graph.push_str(&format!(
                "{}{}|{}|{};",
                source_node,
                arrow.glyph(),
                escape_label(&exit.name),
                destination_node
            ));
        } else {
            graph.push_str(&format!("{}{}{};", exit.id, arrow.glyph(), destination_node));
        }
    }

    for path in visibility::option_paths(game, session) {
        graph.push('\n');
        graph.push_str(&format!("{}-->{};", path.from, path.to));
    }

    graph
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{GameOption, GraphPath, LocationReference, OptionAction};
    use crate::domain::services::mapping;
    use crate::domain::value_objects::OptionId;

    fn base_game() -> Game {
        Game::new("g", "Game")
            .with_static_graph("graph TD;\narea-1[\"Area One\"];\narea-2[\"Area Two\"];\n")
            .with_exits(vec![
                LocationReference::new("door-1", "Area One Door").with_parent_node("area-1"),
                LocationReference::new("warp-1", "Warp One"),
            ])
            .with_entrances(vec![
                LocationReference::new("door-2", "Area Two Door").with_parent_node("area-2"),
                LocationReference::new("warp-2", "Warp Two"),
            ])
    }

    fn session_for(game: &Game) -> GameSession {
        let mut session = GameSession::new(game.id.clone(), "run");
        session.selected_options = mapping::initial_options(game);
        session
    }

    fn lines(graph: &str) -> Vec<&str> {
        graph.lines().collect()
    }

    #[test]
    fn unassigned_exits_draw_nothing_beyond_the_static_fragment() {
        let game = base_game();
        let session = session_for(&game);
        let graph = compose_graph(&game, &session);
        assert_eq!(
            lines(&graph),
            ["graph TD;", "area-1[\"Area One\"];", "area-2[\"Area Two\"];"]
        );
    }

    #[test]
    fn parented_exit_draws_a_labeled_edge_between_area_nodes() {
        let game = base_game();
        let mut session = session_for(&game);
        mapping::apply_mapping(&game, &mut session, &"door-1".into(), Some(&"door-2".into()));

        let graph = compose_graph(&game, &session);
        assert!(graph.ends_with("area-1-->|Area One Door|area-2;"));
    }

    #[test]
    fn unparented_exit_draws_a_node_chain_line() {
        let game = base_game();
        let mut session = session_for(&game);
        mapping::apply_mapping(&game, &mut session, &"warp-1".into(), Some(&"warp-2".into()));

        let graph = compose_graph(&game, &session);
        assert!(graph.ends_with("warp-1-->warp-2;"));
    }

    #[test]
    fn self_loops_are_suppressed() {
        let mut game = base_game();
        game.entrances
            .push(LocationReference::new("door-back", "Back Door").with_parent_node("area-1"));
        let mut session = session_for(&game);
        // door-1 lives in area-1; door-back resolves to area-1 as well
        mapping::apply_mapping(&game, &mut session, &"door-1".into(), Some(&"door-back".into()));

        let graph = compose_graph(&game, &session);
        assert_eq!(lines(&graph).len(), 3);
    }

    #[test]
    fn non_drawable_endpoints_are_skipped() {
        let mut game = base_game();
        game.exits[1] = game.exits[1].clone().not_drawable();
        game.entrances
            .push(LocationReference::new("hidden", "Hidden").not_drawable());
        let mut session = session_for(&game);
        mapping::apply_mapping(&game, &mut session, &"warp-1".into(), Some(&"warp-2".into()));
        mapping::apply_mapping(&game, &mut session, &"door-1".into(), Some(&"hidden".into()));

        let graph = compose_graph(&game, &session);
        assert_eq!(lines(&graph).len(), 3);
    }

    #[test]
    fn label_hash_is_escaped() {
        let mut game = base_game();
        game.exits[0].name = "Door #1".to_string();
        let mut session = session_for(&game);
        mapping::apply_mapping(&game, &mut session, &"door-1".into(), Some(&"door-2".into()));

        let graph = compose_graph(&game, &session);
        assert!(graph.contains("|Door #35;1|"));
    }

    #[test]
    fn decoupling_downgrades_bidirectional_arrows() {
        let mut game = base_game();
        game.exits[0] = LocationReference::new("door-1", "Area One Door")
            .with_parent_node("area-1")
            .paired_with("door-2");
        game.entrances[0] = LocationReference::new("door-2", "Area Two Door")
            .with_parent_node("area-2")
            .paired_with("door-1");
        game.options = vec![GameOption::new("decouple-transitions", "Decouple")
            .value("false", "No")
            .value("true", "Yes")];

        let mut session = session_for(&game);
        mapping::apply_mapping(&game, &mut session, &"door-1".into(), Some(&"door-2".into()));
        assert!(compose_graph(&game, &session).contains("area-1<-->|Area One Door|area-2;"));

        session
            .selected_options
            .insert(OptionId::new("decouple-transitions"), "true".to_string());
        assert!(compose_graph(&game, &session).contains("area-1-->|Area One Door|area-2;"));
    }

    #[test]
    fn option_paths_are_appended_as_raw_edges() {
        let mut game = base_game();
        game.options = vec![GameOption::new("shuffle", "Shuffle")
            .value("off", "Vanilla")
            .value("on", "Shuffled")
            .with_default("off")];
        game.option_actions =
            vec![OptionAction::when("shuffle", "off").add_paths([GraphPath::new("area-1", "area-2")])];
        let session = session_for(&game);

        let graph = compose_graph(&game, &session);
        assert!(graph.ends_with("area-1-->area-2;"));
    }
}
