//! Game catalog - Static registry of game definitions
//!
//! Content is authored by hand, so the catalog runs a validation pass at
//! construction and the process refuses to start on malformed definitions:
//! duplicate ids, dangling or asymmetric bidirectional pairs, restrictions or
//! option actions referencing unknown exits/options. Runtime lookups after
//! that point treat missing entries as silent no-ops.

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::domain::entities::{Game, LocationReference, OptionCondition};
use crate::domain::value_objects::GameId;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog is empty")]
    Empty,
    #[error("duplicate game id '{0}'")]
    DuplicateGame(GameId),
    #[error("game '{game}': duplicate {list} id '{id}'")]
    DuplicateLocation {
        game: GameId,
        list: &'static str,
        id: String,
    },
    #[error("game '{game}': '{exit}' names bidirectional pair '{pair}' which does not exist")]
    DanglingPair {
        game: GameId,
        exit: String,
        pair: String,
    },
    #[error("game '{game}': bidirectional pair '{exit}' <-> '{pair}' is not reciprocal")]
    AsymmetricPair {
        game: GameId,
        exit: String,
        pair: String,
    },
    #[error("game '{game}': restriction references unknown exit '{exit}'")]
    UnknownRestrictionExit { game: GameId, exit: String },
    #[error("game '{game}': restriction for '{exit}' carries foreign game id '{other}'")]
    ForeignRestriction {
        game: GameId,
        exit: String,
        other: GameId,
    },
    #[error("game '{game}': condition references unknown option '{option}'")]
    UnknownOption { game: GameId, option: String },
    #[error("game '{game}': option '{option}' has no value '{value}'")]
    UnknownOptionValue {
        game: GameId,
        option: String,
        value: String,
    },
    #[error("game '{game}': display order references unknown exit '{exit}'")]
    UnknownDisplayExit { game: GameId, exit: String },
}

/// Read-only registry of validated game definitions
pub struct GameCatalog {
    games: Vec<Game>,
    index: HashMap<GameId, usize>,
}

impl GameCatalog {
    /// Build and validate the catalog, failing fast on malformed content
    pub fn new(games: Vec<Game>) -> Result<Self, CatalogError> {
        if games.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut index = HashMap::new();
        for (i, game) in games.iter().enumerate() {
            if index.insert(game.id.clone(), i).is_some() {
                return Err(CatalogError::DuplicateGame(game.id.clone()));
            }
            validate_game(game)?;
        }

        Ok(Self { games, index })
    }

    pub fn get(&self, id: &GameId) -> Option<&Game> {
        self.index.get(id).map(|&i| &self.games[i])
    }

    /// Games in registration order
    pub fn games(&self) -> &[Game] {
        &self.games
    }

    /// The game a fresh install starts on
    pub fn default_game_id(&self) -> &GameId {
        &self.games[0].id
    }
}

fn validate_game(game: &Game) -> Result<(), CatalogError> {
    let exit_ids = unique_ids(game, "exit", &game.exits)?;
    unique_ids(game, "entrance", &game.entrances)?;
    unique_ids(game, "node", &game.nodes)?;

    validate_pairs(game, &game.exits)?;
    validate_pairs(game, &game.entrances)?;

    for restriction in &game.restrictions {
        if restriction.game_id != game.id {
            return Err(CatalogError::ForeignRestriction {
                game: game.id.clone(),
                exit: restriction.exit_id.to_string(),
                other: restriction.game_id.clone(),
            });
        }
        if !exit_ids.contains(restriction.exit_id.as_str()) {
            return Err(CatalogError::UnknownRestrictionExit {
                game: game.id.clone(),
                exit: restriction.exit_id.to_string(),
            });
        }
        if let Some(condition) = &restriction.condition {
            validate_condition(game, condition)?;
        }
    }

    for action in &game.option_actions {
        validate_condition(game, &action.condition)?;
        for hidden in &action.effect.hide_exits {
            if !exit_ids.contains(hidden.as_str()) {
                return Err(CatalogError::UnknownRestrictionExit {
                    game: game.id.clone(),
                    exit: hidden.to_string(),
                });
            }
        }
    }

    if let Some(order) = &game.display_order {
        for id in order {
            if !exit_ids.contains(id.as_str()) {
                return Err(CatalogError::UnknownDisplayExit {
                    game: game.id.clone(),
                    exit: id.to_string(),
                });
            }
        }
    }

    Ok(())
}

fn unique_ids<'a>(
    game: &Game,
    list: &'static str,
    locations: &'a [LocationReference],
) -> Result<HashSet<&'a str>, CatalogError> {
    let mut seen = HashSet::new();
    for location in locations {
        if !seen.insert(location.id.as_str()) {
            return Err(CatalogError::DuplicateLocation {
                game: game.id.clone(),
                list,
                id: location.id.to_string(),
            });
        }
    }
    Ok(seen)
}

/// Pair integrity within one location list: targets exist and reciprocate.
/// The type system cannot express this relation, so it is checked once here.
fn validate_pairs(game: &Game, locations: &[LocationReference]) -> Result<(), CatalogError> {
    let by_id: HashMap<&str, &LocationReference> =
        locations.iter().map(|l| (l.id.as_str(), l)).collect();

    for location in locations {
        let Some(pair_id) = &location.bidirectional_pair else {
            continue;
        };
        let Some(pair) = by_id.get(pair_id.as_str()) else {
            return Err(CatalogError::DanglingPair {
                game: game.id.clone(),
                exit: location.id.to_string(),
                pair: pair_id.to_string(),
            });
        };
        if pair.bidirectional_pair.as_ref() != Some(&location.id) {
            return Err(CatalogError::AsymmetricPair {
                game: game.id.clone(),
                exit: location.id.to_string(),
                pair: pair_id.to_string(),
            });
        }
    }
    Ok(())
}

fn validate_condition(game: &Game, condition: &OptionCondition) -> Result<(), CatalogError> {
    let Some(option) = game.option(&condition.option_id) else {
        return Err(CatalogError::UnknownOption {
            game: game.id.clone(),
            option: condition.option_id.to_string(),
        });
    };
    if !option.values.iter().any(|v| v.id == condition.value) {
        return Err(CatalogError::UnknownOptionValue {
            game: game.id.clone(),
            option: condition.option_id.to_string(),
            value: condition.value.clone(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{EntranceRestriction, GameOption, LocationReference};

    fn two_exit_game() -> Game {
        Game::new("test", "Test Game")
            .with_exits(vec![
                LocationReference::new("a", "A"),
                LocationReference::new("b", "B"),
            ])
            .with_entrances(vec![
                LocationReference::new("a", "A"),
                LocationReference::new("b", "B"),
            ])
    }

    #[test]
    fn valid_game_passes() {
        let catalog = GameCatalog::new(vec![two_exit_game()]).unwrap();
        assert_eq!(catalog.default_game_id().as_str(), "test");
        assert!(catalog.get(&"test".into()).is_some());
        assert!(catalog.get(&"missing".into()).is_none());
    }

    #[test]
    fn empty_catalog_rejected() {
        assert!(matches!(GameCatalog::new(vec![]), Err(CatalogError::Empty)));
    }

    #[test]
    fn duplicate_exit_id_rejected() {
        let game = Game::new("test", "Test").with_exits(vec![
            LocationReference::new("a", "A"),
            LocationReference::new("a", "A again"),
        ]);
        assert!(matches!(
            GameCatalog::new(vec![game]),
            Err(CatalogError::DuplicateLocation { .. })
        ));
    }

    #[test]
    fn dangling_pair_rejected() {
        let game = Game::new("test", "Test")
            .with_exits(vec![LocationReference::new("a", "A").paired_with("ghost")]);
        assert!(matches!(
            GameCatalog::new(vec![game]),
            Err(CatalogError::DanglingPair { .. })
        ));
    }

    #[test]
    fn asymmetric_pair_rejected() {
        // a points at b, but b points at itself
        let game = Game::new("test", "Test").with_exits(vec![
            LocationReference::new("a", "A").paired_with("b"),
            LocationReference::new("b", "B").paired_with("b"),
        ]);
        assert!(matches!(
            GameCatalog::new(vec![game]),
            Err(CatalogError::AsymmetricPair { .. })
        ));
    }

    #[test]
    fn symmetric_pair_accepted() {
        let game = Game::new("test", "Test").with_exits(vec![
            LocationReference::new("a", "A").paired_with("b"),
            LocationReference::new("b", "B").paired_with("a"),
        ]);
        assert!(GameCatalog::new(vec![game]).is_ok());
    }

    #[test]
    fn restriction_on_unknown_exit_rejected() {
        let game = two_exit_game()
            .with_restrictions(vec![EntranceRestriction::new("test", "ghost", ["a"])]);
        assert!(matches!(
            GameCatalog::new(vec![game]),
            Err(CatalogError::UnknownRestrictionExit { .. })
        ));
    }

    #[test]
    fn condition_on_undeclared_option_rejected() {
        let game = two_exit_game().with_restrictions(vec![
            EntranceRestriction::new("test", "a", ["b"]).when("shuffle", "on"),
        ]);
        assert!(matches!(
            GameCatalog::new(vec![game]),
            Err(CatalogError::UnknownOption { .. })
        ));
    }

    #[test]
    fn condition_on_undeclared_value_rejected() {
        let game = two_exit_game()
            .with_options(vec![GameOption::new("shuffle", "Shuffle")
                .value("on", "On")
                .value("off", "Off")])
            .with_restrictions(vec![
                EntranceRestriction::new("test", "a", ["b"]).when("shuffle", "sideways"),
            ]);
        assert!(matches!(
            GameCatalog::new(vec![game]),
            Err(CatalogError::UnknownOptionValue { .. })
        ));
    }
}
