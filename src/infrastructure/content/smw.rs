//! Super Mario World - Overworld warp randomizer definition
//!
//! Three pools of exits (overworld transitions, pipes, stars). The teleport
//! shuffle option decides which pools are shuffled and whether pipes and
//! stars may mix; unshuffled pools are hidden from the UI and drawn as fixed
//! vanilla paths instead.

use std::collections::HashMap;

use crate::domain::entities::{
    EntranceRestriction, Game, GameConfig, GameOption, GraphPath, LocationReference, OptionAction,
};
use crate::domain::value_objects::LocationId;

const TRANSITION: &str = "transition";
const PIPE: &str = "pipe";
const STAR: &str = "star";

fn exits() -> Vec<LocationReference> {
    vec![
        // Overworld path transitions, rendered as edge labels off their area
        LocationReference::new("yi-w", "Yoshi's Island West")
            .with_kind(TRANSITION)
            .with_parent_node("yi-s"),
        LocationReference::new("yi-e", "Yoshi's Island East")
            .with_kind(TRANSITION)
            .with_parent_node("yi-s"),
        LocationReference::new("dp-d", "Donut Plains Door")
            .with_kind(TRANSITION)
            .with_parent_node("dp-n"),
        LocationReference::new("tb-f", "Twin Bridges Forest")
            .with_kind(TRANSITION)
            .with_parent_node("tb-e"),
        LocationReference::new("fi-w", "Forest of Illusion West")
            .with_kind(TRANSITION)
            .with_parent_node("fi-n"),
        LocationReference::new("fi-s", "Forest of Illusion South")
            .with_kind(TRANSITION)
            .with_parent_node("fi-n"),
        LocationReference::new("ch-s", "Chocolate Island Beyond Ship")
            .with_kind(TRANSITION)
            .with_parent_node("ch-w"),
        // Pipes
        LocationReference::new("dp-p", "Donut Plains West Pipe")
            .with_kind(PIPE)
            .with_parent_node("dp-g"),
        LocationReference::new("vb-n", "Valley of Bowser North Pipe")
            .with_kind(PIPE)
            .with_parent_node("vb-w"),
        LocationReference::new("vd-w", "Vanilla Dome West Pipe")
            .with_kind(PIPE)
            .with_parent_node("vd-b"),
        LocationReference::new("vd-e", "Vanilla Dome East Pipe")
            .with_kind(PIPE)
            .with_parent_node("vd-b"),
        LocationReference::new("ch-e", "Chocolate Island East Pipe")
            .with_kind(PIPE)
            .with_parent_node("ch-m"),
        LocationReference::new("vb-s", "Valley of Bowser Southwest Pipe")
            .with_kind(PIPE)
            .with_parent_node("vb-e"),
        // Stars
        LocationReference::new("dp-s", "Donut Plains Star")
            .with_kind(STAR)
            .with_parent_node("dp-g"),
        LocationReference::new("vd-s", "Vanilla Dome Star")
            .with_kind(STAR)
            .with_parent_node("vd-b"),
        LocationReference::new("tb-s", "Twin Bridges Star")
            .with_kind(STAR)
            .with_parent_node("tb-b"),
        LocationReference::new("fi-t", "Forest of Illusion Star")
            .with_kind(STAR)
            .with_parent_node("fi-o"),
        LocationReference::new("vb-t", "Valley of Bowser Star").with_kind(STAR),
        LocationReference::new("sr-1", "Star Road 1").with_kind(STAR),
        LocationReference::new("sr-2", "Star Road 2").with_kind(STAR),
        LocationReference::new("sr-3", "Star Road 3").with_kind(STAR),
        LocationReference::new("sr-4", "Star Road 4").with_kind(STAR),
        LocationReference::new("sr-5", "Star Road 5").with_kind(STAR),
        LocationReference::new("sr-x", "Star Road Center")
            .with_kind(STAR)
            .with_parent_node("sr-5"),
        LocationReference::new("sz-e", "Special Zone End")
            .with_kind(STAR)
            .with_parent_node("sz-b"),
    ]
}

fn entrances() -> Vec<LocationReference> {
    vec![
        LocationReference::new("yi-y", "Yellow Switch Palace").with_kind(TRANSITION),
        LocationReference::new("dp-o", "Donut Plains South").with_kind(TRANSITION),
        LocationReference::new("vd-b", "Vanilla Dome Start").with_kind(TRANSITION),
        LocationReference::new("fi-n", "Forest of Illusion North").with_kind(TRANSITION),
        LocationReference::new("fi-o", "Forest of Illusion West").with_kind(TRANSITION),
        LocationReference::new("ch-m", "Chocolate Island Main Path").with_kind(TRANSITION),
        LocationReference::new("vb-b", "Valley of Bowser Entrance").with_kind(TRANSITION),
        LocationReference::new("dp-e", "Donut Plains East Pipe").with_kind(PIPE),
        LocationReference::new("vb-w", "Valley of Bowser West Pipe").with_kind(PIPE),
        LocationReference::new("vb-e", "Valley of Bowser Southeast Pipe").with_kind(PIPE),
        LocationReference::new("ch-p", "Chocolate Island West Pipe").with_kind(PIPE),
        LocationReference::new("tb-n", "Twin Bridges North").with_kind(PIPE),
        LocationReference::new("tb-b", "Twin Bridges South").with_kind(PIPE),
        LocationReference::new("sr-1", "Star Road 1").with_kind(STAR),
        LocationReference::new("sr-2", "Star Road 2").with_kind(STAR),
        LocationReference::new("sr-3", "Star Road 3").with_kind(STAR),
        LocationReference::new("sr-4", "Star Road 4").with_kind(STAR),
        LocationReference::new("sr-5", "Star Road 5").with_kind(STAR),
        LocationReference::new("dp-s", "Donut Plains Star")
            .with_kind(STAR)
            .not_drawable(),
        LocationReference::new("vd-s", "Vanilla Dome Star")
            .with_kind(STAR)
            .not_drawable(),
        LocationReference::new("tb-s", "Twin Bridges Star")
            .with_kind(STAR)
            .not_drawable(),
        LocationReference::new("fi-t", "Forest of Illusion Star")
            .with_kind(STAR)
            .not_drawable(),
        LocationReference::new("vb-t", "Valley of Bowser Star").with_kind(STAR),
        LocationReference::new("sz-b", "Special Zone Start").with_kind(STAR),
        LocationReference::new("yi-s", "Yoshi's Island Start").with_kind(STAR),
    ]
}

/// Vanilla overworld path connections, shared by several option actions
fn vanilla_transition_paths() -> Vec<GraphPath> {
    vec![
        GraphPath::new("yi-s", "yi-y"),
        GraphPath::new("yi-s", "dp-o"),
        GraphPath::new("dp-o", "vd-b"),
        GraphPath::new("tb-e", "fi-n"),
        GraphPath::new("fi-n", "fi-o"),
        GraphPath::new("fi-n", "ch-m"),
        GraphPath::new("ch-m", "vb-b"),
    ]
}

fn vanilla_pipe_paths() -> Vec<GraphPath> {
    vec![
        GraphPath::new("dp-o", "vb-w"),
        GraphPath::new("vb-w", "dp-e"),
        GraphPath::new("vd-b", "tb-n"),
        GraphPath::new("vd-b", "tb-b"),
        GraphPath::new("ch-m", "vb-e"),
        GraphPath::new("vb-e", "ch-p"),
    ]
}

fn vanilla_star_paths() -> Vec<GraphPath> {
    vec![
        GraphPath::new("dp-o", "sr-1"),
        GraphPath::new("sr-1", "dp-o"),
        GraphPath::new("vd-b", "sr-2"),
        GraphPath::new("sr-2", "vd-b"),
        GraphPath::new("tb-b", "sr-3"),
        GraphPath::new("sr-3", "tb-b"),
        GraphPath::new("fi-o", "sr-4"),
        GraphPath::new("sr-4", "fi-o"),
        GraphPath::new("vb-t", "sr-5"),
        GraphPath::new("sr-5", "vb-t"),
        GraphPath::new("sr-5", "sz-b"),
        GraphPath::new("sz-b", "yi-s"),
    ]
}

fn entrance_ids_of(entrances: &[LocationReference], kinds: &[&str]) -> Vec<LocationId> {
    entrances
        .iter()
        .filter(|e| e.kind.as_deref().is_some_and(|k| kinds.contains(&k)))
        .map(|e| e.id.clone())
        .collect()
}

/// Each pool of exits may only reach matching entrances; the mixed-pool
/// teleport setting additionally lets stars and pipes cross over.
fn restrictions(exits: &[LocationReference], entrances: &[LocationReference]) -> Vec<EntranceRestriction> {
    let mut rules = Vec::new();

    for (kind, allowed) in [
        (STAR, entrance_ids_of(entrances, &[STAR])),
        (PIPE, entrance_ids_of(entrances, &[PIPE])),
        (TRANSITION, entrance_ids_of(entrances, &[TRANSITION])),
    ] {
        for exit in exits.iter().filter(|e| e.kind.as_deref() == Some(kind)) {
            rules.push(EntranceRestriction::new(
                "smw",
                exit.id.clone(),
                allowed.clone(),
            ));
        }
    }

    for (kind, allowed) in [
        (STAR, entrance_ids_of(entrances, &[STAR, PIPE])),
        (PIPE, entrance_ids_of(entrances, &[PIPE, STAR])),
    ] {
        for exit in exits.iter().filter(|e| e.kind.as_deref() == Some(kind)) {
            rules.push(
                EntranceRestriction::new("smw", exit.id.clone(), allowed.clone())
                    .when("map-teleport-shuffle", "on_both_mix"),
            );
        }
    }

    rules
}

fn option_actions() -> Vec<OptionAction> {
    let teleport_exits = [
        "dp-p", "vb-n", "vd-w", "vd-e", "ch-e", "vb-s", "dp-s", "vd-s", "tb-s", "fi-t", "vb-t",
        "sr-1", "sr-2", "sr-3", "sr-4", "sr-5", "sr-x", "sz-e",
    ];
    let star_exits = [
        "dp-s", "vd-s", "tb-s", "fi-t", "vb-t", "sr-1", "sr-2", "sr-3", "sr-4", "sr-5", "sr-x",
        "sz-e",
    ];
    let pipe_exits = ["dp-p", "vb-n", "vd-w", "vd-e", "ch-e", "vb-s"];

    vec![
        OptionAction::when("map-transition-shuffle", "off")
            .hide_exits(["yi-w", "yi-e", "dp-d", "tb-f", "fi-w", "fi-s", "ch-s"])
            .add_paths(vanilla_transition_paths()),
        OptionAction::when("map-teleport-shuffle", "off")
            .hide_exits(teleport_exits)
            .add_paths(vanilla_pipe_paths())
            .add_paths(vanilla_star_paths()),
        OptionAction::when("map-teleport-shuffle", "on_only_pipes")
            .hide_exits(star_exits)
            .add_paths(vanilla_pipe_paths()),
        OptionAction::when("map-teleport-shuffle", "on_only_stars")
            .hide_exits(pipe_exits)
            .add_paths(vanilla_star_paths()),
        OptionAction::when("map-teleport-shuffle", "on_both_same_type")
            .add_paths(vanilla_pipe_paths())
            .add_paths(vanilla_star_paths()),
    ]
}

const STATIC_GRAPH: &str = r#"graph TD;
linkStyle default stroke:#aaa,stroke-width:3px;
__START__["Start"]
yi-s["Yoshi's Island"];
__START__-->yi-s
style __START__ display:none,opacity:0;
yi-y["YI Yellow Switch"];
dp-o["Donut Plains"];
dp-o-->dp-n["DP Northeast"];
dp-e["DP East Pipe"]-->dp-n;
dp-o-->dp-g["DP Ghost House"];
vd-b["Vanilla Dome"];
tb-n["Twin Bridges North"];
tb-b["Twin Bridges South"];
tb-e["Twin Bridges Exit"];
tb-n-->tb-e;
tb-b-->tb-e;
fi-n["Forest of Illusion"];
fi-o["To Forest Star"];
ch-m["Chocolate Island"];
ch-m-->ch-w["CI Ship"];
ch-p["CI West Pipe"]-->ch-w;
vb-w["VB Donut Cliff"];
vb-e["VB Chocolate Cliff"];
vb-b["Valley of Bowser"];
vb-b-->vb-z["VB Back Door"];
vb-b-->vb-y["VB Front Door"];
vb-z-->vb-end["Victory!"];
vb-y-->vb-end;
vb-b-->vb-t["VB Star Warp"];
vb-t-->vb-y;
sr-1["Star Road 1"];
sr-2["Star Road 2"];
sr-3["Star Road 3"];
sr-4["Star Road 4"];
sr-5["Star Road 5"];
sr-1-->sr-2;
sr-2-->sr-3;
sr-3-->sr-4;
sr-4-->sr-5;
sr-5-->sr-1;
sz-b["Special Zone Start"];
"#;

pub fn game() -> Game {
    let exits = exits();
    let entrances = entrances();
    let restrictions = restrictions(&exits, &entrances);

    let vanilla_map: HashMap<LocationId, LocationId> = vanilla_transition_paths()
        .into_iter()
        .chain(vanilla_pipe_paths())
        .chain(vanilla_star_paths())
        .map(|p| (p.from, p.to))
        .collect();

    Game::new("smw", "Super Mario World")
        .with_description("Classic Super Mario World entrance randomizer")
        .with_exits(exits)
        .with_entrances(entrances)
        .with_restrictions(restrictions)
        .with_option_actions(option_actions())
        .with_static_graph(STATIC_GRAPH)
        .with_display_order([
            "yi-w", "yi-e", "dp-s", "dp-p", "dp-d", "vd-s", "vd-w", "vd-e", "tb-s", "tb-f",
            "fi-w", "fi-s", "fi-t", "ch-e", "ch-s", "vb-t", "vb-n", "vb-s", "sr-1", "sr-2",
            "sr-3", "sr-4", "sr-5", "sr-x", "sz-e",
        ])
        .with_vanilla_map(vanilla_map)
        .with_options(vec![
            GameOption::new("map-teleport-shuffle", "Map Teleport Shuffle")
                .with_description("Do the stars and pipes take you to different places?")
                .value("off", "Vanilla pipes/stars.")
                .value("on_only_stars", "Stars shuffled, pipes not.")
                .value("on_only_pipes", "Pipes shuffled, stars not.")
                .value("on_both_same_type", "Pipes & stars shuffled, no pool mixing.")
                .value("on_both_mix", "Pipes & stars shuffled, mixed pool.")
                .with_default("on_both_mix"),
            GameOption::new("map-transition-shuffle", "Map Transition Shuffle")
                .with_description("Do the overworld path connections take you to different places?")
                .value("off", "Vanilla Paths")
                .value("on", "Shuffled Paths")
                .with_default("on"),
        ])
        .with_config(GameConfig {
            show_map: true,
            start_unselected: true,
            allow_swap_on_duplicate: true,
            hide_disabled_options: false,
        })
}
