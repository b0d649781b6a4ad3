//! Castlevania: Harmony of Dissonance - Area randomizer definition
//!
//! Two mirrored castles whose area transitions are all bidirectional pairs.
//! Castle B is generated from Castle A by id/name substitution, and the
//! restriction tables are derived from the exit data: directional opposition
//! (a west door never leads to another west door), vanilla-forcing when area
//! shuffle is off, and castle separation when pools are kept apart.

use std::collections::HashMap;

use crate::domain::entities::{
    EntranceRestriction, Game, GameConfig, GameOption, GraphPath, LocationReference, OptionAction,
};
use crate::domain::value_objects::LocationId;

const ENTRANCE_TAGS: &[&str] = &["entrance"];
const MARBLE_TAGS: &[&str] = &["marble"];
const WAILING_TAGS: &[&str] = &["wailing", "approach"];
const SHRINE_TAGS: &[&str] = &["shrine", "apostate", "grave"];
const ILLUSION_TAGS: &[&str] = &["illusion"];
const TREASURY_TAGS: &[&str] = &["treasury"];
const SKELETON_TAGS: &[&str] = &["skeleton"];
const LUMINOUS_TAGS: &[&str] = &["luminous", "cave", "moss"];
const SKY_TAGS: &[&str] = &["sky", "cooridor"];
const CHAPEL_TAGS: &[&str] = &["chapel", "dissonance"];
const CLOCK_TAGS: &[&str] = &["clock"];
const AQUEDUCT_TAGS: &[&str] = &["aqua", "aqueduct", "dragon", "waterway"];
const TOP_TAGS: &[&str] = &["top", "tower"];

fn tags(a: &[&str], b: &[&str]) -> Vec<String> {
    a.iter().chain(b).map(|t| t.to_string()).collect()
}

fn door(
    id: &str,
    name: &str,
    direction: &str,
    ui_group: &str,
    pair: &str,
) -> LocationReference {
    LocationReference::new(id, name)
        .with_kind(direction)
        .with_ui_group(ui_group)
        .paired_with(pair)
}

fn castle_a_exits() -> Vec<LocationReference> {
    vec![
        // Entrance A
        door("entrance-a-n", "Entrance A → Marble A", "east", "Entrance A", "marble-a-w")
            .with_parent_node("entrance-a")
            .with_tags(tags(ENTRANCE_TAGS, MARBLE_TAGS)),
        door("entrance-a-e", "Entrance A → Shrine A", "east", "Entrance A", "shrine-a-w")
            .with_parent_node("entrance-a")
            .with_tags(tags(ENTRANCE_TAGS, SHRINE_TAGS)),
        door("entrance-a-s", "Entrance A → Skeleton A", "south", "Entrance A", "skeleton-a-w")
            .with_parent_node("entrance-a")
            .with_tags(tags(ENTRANCE_TAGS, SKELETON_TAGS)),
        // Marble Corridor A
        door("marble-a-w", "Marble A → Entrance A", "west", "Marble A", "entrance-a-n")
            .with_parent_node("marble-a")
            .with_tags(tags(MARBLE_TAGS, ENTRANCE_TAGS)),
        door("marble-a-ssw", "Marble A → Illusion A West", "west", "Marble A", "illusion-a-w")
            .with_parent_node("marble-a")
            .with_tags(tags(MARBLE_TAGS, ILLUSION_TAGS)),
        door("marble-a-sse", "Marble A → Illusion A East", "east", "Marble A", "illusion-a-e")
            .with_parent_node("marble-a")
            .with_tags(tags(MARBLE_TAGS, ILLUSION_TAGS)),
        door("marble-a-se", "Marble A → Wailing A", "east", "Marble A", "wailing-a-w")
            .with_parent_node("marble-a")
            .with_tags(tags(MARBLE_TAGS, WAILING_TAGS)),
        door("marble-a-e", "Marble A → Top A", "east", "Marble A", "top-a-w")
            .with_parent_node("marble-a")
            .with_tags(tags(MARBLE_TAGS, TOP_TAGS)),
        // The Wailing Way A
        door("wailing-a-w", "Wailing A → Marble A", "west", "Wailing A", "marble-a-se")
            .with_parent_node("wailing-a")
            .with_tags(tags(WAILING_TAGS, MARBLE_TAGS)),
        door("wailing-a-e", "Wailing A → Treasury A", "east", "Wailing A", "treasury-a-w")
            .with_parent_node("wailing-a")
            .with_tags(tags(WAILING_TAGS, TREASURY_TAGS)),
        door("wailing-a-s", "Wailing A → Shrine A", "east", "Wailing A", "shrine-a-n")
            .with_parent_node("wailing-a")
            .with_tags(tags(WAILING_TAGS, SHRINE_TAGS)),
        // Shrine of the Apostates A
        door("shrine-a-w", "Shrine A → Entrance A", "west", "Shrine A", "entrance-a-e")
            .with_parent_node("shrine-a")
            .with_tags(tags(SHRINE_TAGS, ENTRANCE_TAGS)),
        door("shrine-a-n", "Shrine A → Wailing A", "west", "Shrine A", "wailing-a-s")
            .with_parent_node("shrine-a")
            .with_tags(tags(SHRINE_TAGS, WAILING_TAGS)),
        // Room of Illusion A splits into its own west and east nodes,
        // so these two carry no parent node
        door("illusion-a-w", "Illusion A West → Marble A", "east", "Illusion A", "marble-a-ssw")
            .with_tags(tags(ILLUSION_TAGS, MARBLE_TAGS)),
        door("illusion-a-e", "Illusion A East → Marble A", "west", "Illusion A", "marble-a-sse")
            .with_tags(tags(ILLUSION_TAGS, MARBLE_TAGS)),
        // Castle Treasury A
        door("treasury-a-w", "Treasury A → Wailing A", "west", "Treasury A", "wailing-a-e")
            .with_parent_node("treasury-a")
            .with_tags(tags(TREASURY_TAGS, WAILING_TAGS)),
        door("treasury-a-n", "Treasury A → Skeleton A", "west", "Treasury A", "skeleton-a-e")
            .with_parent_node("treasury-a")
            .with_tags(tags(TREASURY_TAGS, SKELETON_TAGS)),
        door("treasury-a-e", "Treasury A → Luminous A", "east", "Treasury A", "luminous-a-w")
            .with_parent_node("treasury-a")
            .with_tags(tags(TREASURY_TAGS, LUMINOUS_TAGS)),
        door("treasury-a-s", "Treasury A → Top A", "north", "Treasury A", "top-a-n")
            .with_parent_node("treasury-a")
            .with_tags(tags(TREASURY_TAGS, TOP_TAGS)),
        // Skeleton Cave A
        door("skeleton-a-w", "Skeleton A → Entrance A", "north", "Skeleton A", "entrance-a-s")
            .with_parent_node("skeleton-a")
            .with_tags(tags(SKELETON_TAGS, ENTRANCE_TAGS)),
        door("skeleton-a-e", "Skeleton A → Treasury A", "east", "Skeleton A", "treasury-a-n")
            .with_parent_node("skeleton-a")
            .with_tags(tags(SKELETON_TAGS, TREASURY_TAGS)),
        // Luminous Cavern A
        door("luminous-a-w", "Luminous A → Treasury A", "west", "Luminous A", "treasury-a-e")
            .with_parent_node("luminous-a")
            .with_tags(tags(LUMINOUS_TAGS, TREASURY_TAGS)),
        door("luminous-a-n", "Luminous A → Aqueduct A", "east", "Luminous A", "aqueduct-a-s")
            .with_parent_node("luminous-a")
            .with_tags(tags(LUMINOUS_TAGS, AQUEDUCT_TAGS)),
        // Sky Walkway A
        door("sky-a-n", "Sky A → Chapel A", "west", "Sky A", "chapel-a-s")
            .with_parent_node("sky-a")
            .with_tags(tags(SKY_TAGS, CHAPEL_TAGS)),
        door("sky-a-e", "Sky A → Clock Tower A", "east", "Sky A", "clock-a-w")
            .with_parent_node("sky-a")
            .with_tags(tags(SKY_TAGS, CLOCK_TAGS)),
        door("sky-a-s", "Sky A → Aqueduct A", "west", "Sky A", "aqueduct-a-n")
            .with_parent_node("sky-a")
            .with_tags(tags(SKY_TAGS, AQUEDUCT_TAGS)),
        // Chapel of Dissonance A
        door("chapel-a-s", "Chapel A → Sky A", "east", "Chapel A", "sky-a-n")
            .with_parent_node("chapel-a")
            .with_tags(tags(CHAPEL_TAGS, SKY_TAGS)),
        door("chapel-a-e", "Chapel A → Top A", "west", "Chapel A", "top-a-e")
            .with_parent_node("chapel-a")
            .with_tags(tags(CHAPEL_TAGS, TOP_TAGS)),
        // Clock Tower A
        door("clock-a-w", "Clock Tower A → Sky A", "west", "Clock A", "sky-a-e")
            .with_parent_node("clock-a")
            .with_tags(tags(CLOCK_TAGS, SKY_TAGS)),
        door("clock-a-s", "Clock Tower A → Aqueduct A", "west", "Clock A", "aqueduct-a-e")
            .with_parent_node("clock-a")
            .with_tags(tags(CLOCK_TAGS, AQUEDUCT_TAGS)),
        // Aqueduct of Dragons A
        door("aqueduct-a-s", "Aqueduct A → Luminous A", "west", "Aqueduct A", "luminous-a-n")
            .with_parent_node("aqueduct-a")
            .with_tags(tags(AQUEDUCT_TAGS, LUMINOUS_TAGS)),
        door("aqueduct-a-n", "Aqueduct A → Sky A", "east", "Aqueduct A", "sky-a-s")
            .with_parent_node("aqueduct-a")
            .with_tags(tags(AQUEDUCT_TAGS, SKY_TAGS)),
        door("aqueduct-a-e", "Aqueduct A → Clock Tower A", "east", "Aqueduct A", "clock-a-s")
            .with_parent_node("aqueduct-a")
            .with_tags(tags(AQUEDUCT_TAGS, CLOCK_TAGS)),
        // Castle Top Floor A
        door("top-a-w", "Top A → Marble A", "west", "Top A", "marble-a-e")
            .with_parent_node("top-a")
            .with_tags(tags(TOP_TAGS, MARBLE_TAGS)),
        door("top-a-e", "Top A → Chapel A", "east", "Top A", "chapel-a-e")
            .with_parent_node("top-a")
            .with_tags(tags(TOP_TAGS, CHAPEL_TAGS)),
        door("top-a-n", "Top A → Treasury A", "south", "Top A", "treasury-a-s")
            .with_parent_node("top-a")
            .with_tags(tags(TOP_TAGS, TREASURY_TAGS)),
    ]
}

/// Replace the standalone word "A" so "Illusion A West → Marble A" becomes
/// "Illusion B West → Marble B"
fn mirror_name(name: &str) -> String {
    name.split(' ')
        .map(|word| if word == "A" { "B" } else { word })
        .collect::<Vec<_>>()
        .join(" ")
}

fn mirror_node(id: &str) -> String {
    if id.contains("-a-") {
        id.replace("-a-", "-b-")
    } else if let Some(stripped) = id.strip_suffix("-a") {
        format!("{stripped}-b")
    } else {
        id.to_string()
    }
}

/// Castle B is a mirrored copy of Castle A
fn mirror_castle(exits: &[LocationReference]) -> Vec<LocationReference> {
    exits
        .iter()
        .map(|exit| {
            let mut mirrored = exit.clone();
            mirrored.id = LocationId::new(exit.id.as_str().replace("-a-", "-b-"));
            mirrored.name = mirror_name(&exit.name);
            if let Some(pair) = &exit.bidirectional_pair {
                mirrored.bidirectional_pair =
                    Some(LocationId::new(pair.as_str().replace("-a-", "-b-")));
            }
            if let Some(parent) = &exit.parent_node_id {
                mirrored.parent_node_id = Some(LocationId::new(mirror_node(parent.as_str())));
            }
            if let Some(group) = &exit.ui_group {
                mirrored.ui_group = Some(mirror_name(group));
            }
            mirrored
        })
        .collect()
}

fn opposite(direction: &str) -> Option<&'static str> {
    match direction {
        "west" => Some("east"),
        "east" => Some("west"),
        "north" => Some("south"),
        "south" => Some("north"),
        _ => None,
    }
}

/// A door never leads into another door facing the same way: each exit is
/// restricted to connections that do not carry the opposite direction.
fn directional_restrictions(exits: &[LocationReference]) -> Vec<EntranceRestriction> {
    let mut rules = Vec::new();
    for exit in exits {
        let Some(blocked) = exit.kind.as_deref().and_then(opposite) else {
            continue;
        };
        let allowed: Vec<LocationId> = exits
            .iter()
            .filter(|c| c.kind.as_deref() != Some(blocked))
            .map(|c| c.id.clone())
            .collect();
        if allowed.len() < exits.len() {
            rules.push(EntranceRestriction::new("hod", exit.id.clone(), allowed));
        }
    }
    rules
}

/// With area shuffle off, each exit is forced onto the doors of its vanilla
/// destination area (the area its reverse side lives in).
fn vanilla_forcing_restrictions(exits: &[LocationReference]) -> Vec<EntranceRestriction> {
    let mut rules = Vec::new();
    for exit in exits {
        let Some(pair_id) = &exit.bidirectional_pair else {
            continue;
        };
        let Some(destination) = exits.iter().find(|c| &c.id == pair_id) else {
            continue;
        };
        let allowed: Vec<LocationId> = exits
            .iter()
            .filter(|c| c.parent_node_id == destination.parent_node_id)
            .map(|c| c.id.clone())
            .collect();
        if !allowed.is_empty() {
            rules.push(
                EntranceRestriction::new("hod", exit.id.clone(), allowed)
                    .when("area-shuffle", "none"),
            );
        }
    }
    rules
}

fn castle_of(exit: &LocationReference) -> char {
    let key = exit
        .parent_node_id
        .as_ref()
        .map(|p| p.as_str())
        .unwrap_or(exit.id.as_str());
    if key.contains("-b") {
        'b'
    } else {
        'a'
    }
}

/// With separate castle pools, doors only reach doors of their own castle
fn separate_castle_restrictions(exits: &[LocationReference]) -> Vec<EntranceRestriction> {
    let mut rules = Vec::new();
    for exit in exits {
        let castle = castle_of(exit);
        let allowed: Vec<LocationId> = exits
            .iter()
            .filter(|c| castle_of(c) == castle)
            .map(|c| c.id.clone())
            .collect();
        if allowed.len() < exits.len() {
            rules.push(
                EntranceRestriction::new("hod", exit.id.clone(), allowed)
                    .when("area-shuffle", "separate"),
            );
        }
    }
    rules
}

fn nodes() -> Vec<LocationReference> {
    let castle_a = vec![
        LocationReference::new("entrance-a", "Entrance A"),
        LocationReference::new("marble-a", "Marble Corridor A"),
        LocationReference::new("shrine-a", "Shrine of the Apostates A"),
        LocationReference::new("skeleton-a", "Skeleton Cave A"),
        LocationReference::new("wailing-a", "The Wailing Way A"),
        LocationReference::new("illusion-a-w", "Room of Illusion A West"),
        LocationReference::new("illusion-a-e", "Room of Illusion A East"),
        LocationReference::new("treasury-a", "Castle Treasury A"),
        LocationReference::new("luminous-a", "Luminous Cavern A"),
        LocationReference::new("sky-a", "Sky Walkway A"),
        LocationReference::new("chapel-a", "Chapel of Dissonance A"),
        LocationReference::new("clock-a", "Clock Tower A"),
        LocationReference::new("aqueduct-a", "Aqueduct of Dragons A"),
        LocationReference::new("top-a", "Castle Top Floor A"),
    ];
    let castle_b = castle_a.iter().map(|node| {
        LocationReference::new(mirror_node(node.id.as_str()), mirror_name(&node.name))
    });
    castle_a.iter().cloned().chain(castle_b).collect()
}

/// Area-level vanilla connections drawn when area shuffle is off
fn vanilla_area_paths() -> Vec<GraphPath> {
    let castle_a = [
        ("entrance-a", "marble-a"),
        ("entrance-a", "shrine-a"),
        ("entrance-a", "skeleton-a"),
        ("marble-a", "illusion-a-w"),
        ("marble-a", "illusion-a-e"),
        ("marble-a", "wailing-a"),
        ("marble-a", "top-a"),
        ("wailing-a", "treasury-a"),
        ("wailing-a", "shrine-a"),
        ("shrine-a", "wailing-a"),
        ("skeleton-a", "treasury-a"),
        ("treasury-a", "luminous-a"),
        ("treasury-a", "top-a"),
        ("luminous-a", "aqueduct-a"),
        ("sky-a", "chapel-a"),
        ("sky-a", "clock-a"),
        ("sky-a", "aqueduct-a"),
        ("chapel-a", "top-a"),
        ("clock-a", "aqueduct-a"),
        ("top-a", "marble-a"),
        ("top-a", "treasury-a"),
    ];
    castle_a
        .iter()
        .map(|(from, to)| GraphPath::new(*from, *to))
        .chain(
            castle_a
                .iter()
                .map(|(from, to)| GraphPath::new(mirror_node(from), mirror_node(to))),
        )
        .collect()
}

const STATIC_GRAPH: &str = r#"graph TD;
entrance-a["Entrance A"];
marble-a["Marble Corridor A"];
wailing-a["Wailing Way A"];
shrine-a["Shrine of the Apostates A"];
treasury-a["Castle Treasury A"];
skeleton-a["Skeleton Cave A"];
illusion-a-w["Room of Illusion A West"];
illusion-a-e["Room of Illusion A East"];
luminous-a["Luminous Cavern A"];
sky-a["Sky Walkway A"];
chapel-a["Chapel of Dissonance A"];
clock-a["Clock Tower A"];
aqueduct-a["Aqueduct of Dragons A"];
top-a["Castle Top Floor A"];
entrance-b["Entrance B"];
marble-b["Marble Corridor B"];
wailing-b["Wailing Way B"];
shrine-b["Shrine of the Apostates B"];
treasury-b["Castle Treasury B"];
skeleton-b["Skeleton Cave B"];
illusion-b-w["Room of Illusion B West"];
illusion-b-e["Room of Illusion B East"];
luminous-b["Luminous Cavern B"];
sky-b["Sky Walkway B"];
chapel-b["Chapel of Dissonance B"];
clock-b["Clock Tower B"];
aqueduct-b["Aqueduct of Dragons B"];
top-b["Castle Top Floor B"];
illusion-a-e <-->|cross| treasury-b;
luminous-b <-->|cross| sky-a;
clock-a <-->|warp room| clock-b;
entrance-a <-->|warp room| entrance-b;
treasury-a <-->|lure key warp room| treasury-b;
top-a <-->|chapel warp room| top-b;
luminous-a <-->|crushing warp room| luminous-b;
"#;

pub fn game() -> Game {
    let castle_a = castle_a_exits();
    let mut exits = castle_a.clone();
    exits.extend(mirror_castle(&castle_a));

    let mut restrictions = directional_restrictions(&exits);
    restrictions.extend(vanilla_forcing_restrictions(&exits));
    restrictions.extend(separate_castle_restrictions(&exits));

    // every transition is two-way, so the vanilla assignment of each exit is
    // its own reverse side
    let vanilla_map: HashMap<LocationId, LocationId> = exits
        .iter()
        .filter_map(|e| {
            e.bidirectional_pair
                .clone()
                .map(|pair| (e.id.clone(), pair))
        })
        .collect();

    let display_order: Vec<LocationId> = exits.iter().map(|e| e.id.clone()).collect();

    Game::new("hod", "Castlevania: Harmony of Dissonance")
        .with_description("Metroidvania entrance randomizer")
        .with_nodes(nodes())
        .with_entrances(exits.clone())
        .with_exits(exits)
        .with_restrictions(restrictions)
        .with_option_actions(vec![
            OptionAction::when("area-shuffle", "none")
                .hide_exits(display_order.clone())
                .add_paths(vanilla_area_paths())
                .show_map(true),
            OptionAction::when("area-shuffle", "separate").show_map(false),
            OptionAction::when("area-shuffle", "combined").show_map(false),
        ])
        .with_display_order(display_order)
        .with_vanilla_map(vanilla_map)
        .with_static_graph(STATIC_GRAPH)
        .with_options(vec![
            GameOption::new("area-shuffle", "Area Shuffle")
                .with_description("Randomize which areas connect to which?")
                .value("none", "Vanilla layout")
                .value("separate", "Shuffled, separate castle pools")
                .value("combined", "Shuffled, both castle pools mixed")
                .with_default("combined"),
            GameOption::new("decouple-transitions", "Decouple Transitions")
                .with_description("Have the transitions work in different directions?")
                .value("false", "No (Two-Way)")
                .value("true", "Yes (One-Way)")
                .with_default("false"),
        ])
        .with_config(GameConfig {
            show_map: false,
            start_unselected: true,
            allow_swap_on_duplicate: false,
            hide_disabled_options: false,
        })
}
