//! Static game content - Definitions registered at startup
//!
//! Pure data tables, built once and handed to the catalog for validation.
//! Authoring a new game means adding a module here and listing it in
//! [`games`].

mod hod;
mod smw;

use crate::domain::entities::Game;

/// Every game definition shipped with the tracker, in registration order.
/// The first entry is the game a fresh install starts on.
pub fn games() -> Vec<Game> {
    vec![smw::game(), hod::game()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::GameCatalog;
    use crate::domain::services::resolver;
    use std::collections::HashMap;

    #[test]
    fn shipped_content_passes_catalog_validation() {
        let catalog = GameCatalog::new(games()).expect("shipped game content must validate");
        assert_eq!(catalog.default_game_id().as_str(), "smw");
        assert!(catalog.get(&"hod".into()).is_some());
    }

    #[test]
    fn smw_star_exits_stay_in_the_star_pool_by_default() {
        let catalog = GameCatalog::new(games()).unwrap();
        let smw = catalog.get(&"smw".into()).unwrap();

        let destinations = resolver::valid_destinations(smw, &"sr-1".into(), &HashMap::new());
        assert!(destinations.contains(&"sz-b".into()));
        assert!(!destinations.contains(&"dp-e".into()));
    }

    #[test]
    fn smw_mixed_pool_lets_stars_reach_pipes() {
        let catalog = GameCatalog::new(games()).unwrap();
        let smw = catalog.get(&"smw".into()).unwrap();

        let options = HashMap::from([("map-teleport-shuffle".into(), "on_both_mix".to_string())]);
        let destinations = resolver::valid_destinations(smw, &"sr-1".into(), &options);
        assert!(destinations.contains(&"dp-e".into()));
        assert!(!destinations.contains(&"yi-y".into()));
    }

    #[test]
    fn hod_mirrors_castle_b_from_castle_a() {
        let catalog = GameCatalog::new(games()).unwrap();
        let hod = catalog.get(&"hod".into()).unwrap();

        let mirrored = hod.exit(&"marble-b-se".into()).expect("castle B exit exists");
        assert_eq!(mirrored.name, "Marble B → Wailing B");
        assert_eq!(mirrored.bidirectional_pair, Some("wailing-b-w".into()));
        assert_eq!(mirrored.parent_node_id, Some("marble-b".into()));
        assert_eq!(mirrored.ui_group.as_deref(), Some("Marble B"));
    }

    #[test]
    fn hod_west_doors_never_reach_east_doors() {
        let catalog = GameCatalog::new(games()).unwrap();
        let hod = catalog.get(&"hod".into()).unwrap();

        // marble-a-w faces west, so east-facing doors are excluded while
        // other west-facing doors remain legal
        let destinations = resolver::valid_destinations(hod, &"marble-a-w".into(), &HashMap::new());
        assert!(!destinations.contains(&"sky-a-e".into()));
        assert!(destinations.contains(&"wailing-a-w".into()));
    }

    #[test]
    fn hod_vanilla_assignment_is_the_reverse_side() {
        let catalog = GameCatalog::new(games()).unwrap();
        let hod = catalog.get(&"hod".into()).unwrap();

        let vanilla = hod.vanilla_map.as_ref().unwrap();
        assert_eq!(vanilla.get(&"entrance-a-n".into()), Some(&"marble-a-w".into()));
        assert_eq!(vanilla.get(&"top-b-n".into()), Some(&"treasury-b-s".into()));
    }
}
