//! The rule engine.
//!
//! Rule groups run in a fixed order and every group walks its entities in
//! author order, so the issue list is stable for identical input:
//!
//! 1. spawns
//! 2. exit tile
//! 3. spiders
//! 4. snails
//! 5. food
//! 6. tripwires
//! 7. map quality
//! 8. unknown tile ids
//!
//! Inside groups 1-7 an unknown tile id counts as solid.

use std::collections::HashSet;

use tracing::debug;

use crate::config::EngineConfig;
use crate::error::LevelResult;
use crate::level::{EntityKind, LevelData};
use crate::tile::{Point, TileId, TileRegistry};
use crate::validate::{IssueCategory, IssueSummary, ValidationIssue};

/// Static checker for [`LevelData`].
///
/// Holds only borrowed, read-only context; one validator can check any
/// number of levels, from any number of threads.
#[derive(Debug, Clone, Copy)]
pub struct LevelValidator<'a> {
    registry: &'a TileRegistry,
    config: &'a EngineConfig,
}

impl<'a> LevelValidator<'a> {
    /// Create a validator.
    ///
    /// # Errors
    ///
    /// Returns [`crate::LevelError::InvalidConfig`] if `config` fails
    /// [`EngineConfig::validate`].
    pub fn new(registry: &'a TileRegistry, config: &'a EngineConfig) -> LevelResult<Self> {
        config.validate()?;
        Ok(Self { registry, config })
    }

    /// Check `level`, returning every finding in rule order.
    ///
    /// Never fails: every defect becomes a [`ValidationIssue`].
    #[must_use]
    pub fn validate(&self, level: &LevelData) -> Vec<ValidationIssue> {
        let mut pass = Pass {
            registry: self.registry,
            config: self.config,
            level,
            issues: Vec::new(),
        };

        pass.check_spawns();
        pass.check_exit_tile();
        pass.check_spiders();
        pass.check_snails();
        pass.check_food();
        pass.check_tripwires();
        pass.check_map_quality();
        pass.check_unknown_tiles();

        let summary = IssueSummary::from_issues(&pass.issues);
        debug!(
            level = level.display_name(),
            errors = summary.errors,
            warnings = summary.warnings,
            infos = summary.infos,
            "validated level"
        );
        pass.issues
    }
}

/// State of one `validate` call.
struct Pass<'a> {
    registry: &'a TileRegistry,
    config: &'a EngineConfig,
    level: &'a LevelData,
    issues: Vec<ValidationIssue>,
}

impl Pass<'_> {
    fn push(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    fn in_bounds(&self, tile: Point) -> bool {
        self.level.grid.in_bounds(tile.x, tile.y)
    }

    /// Solid or unknown id at an in-bounds tile.
    fn is_solid(&self, tile: Point) -> bool {
        self.level
            .grid
            .get(tile.x, tile.y)
            .is_none_or(|id| self.registry.is_solid_or_unknown(id))
    }

    fn to_tile(&self, pixel: Point) -> Point {
        pixel.to_tile(self.config.tile_size)
    }

    fn check_spawns(&mut self) {
        use IssueCategory::Spawn;

        match self.level.player_spawn {
            None => self.push(ValidationIssue::error(Spawn, "Player spawn is missing")),
            Some(pixel) => {
                let tile = self.to_tile(pixel);
                if !self.in_bounds(tile) {
                    self.push(
                        ValidationIssue::error(
                            Spawn,
                            format!("Player spawn at pixel ({},{}) is outside the map", pixel.x, pixel.y),
                        )
                        .at_tile(tile)
                        .for_entity(EntityKind::PlayerSpawn, 0),
                    );
                } else if self.is_solid(tile) {
                    self.push(
                        ValidationIssue::error(Spawn, "Player spawn is inside a solid tile")
                            .at_tile(tile)
                            .for_entity(EntityKind::PlayerSpawn, 0),
                    );
                }
            }
        }

        // Toy spawns only get a bounds check, never a solidity check.
        match self.level.toy_spawn {
            None if self.level.mechanics.toy_enabled => {
                self.push(ValidationIssue::error(
                    Spawn,
                    "Toy is enabled but the toy spawn is missing",
                ));
            }
            None => {}
            Some(pixel) => {
                let tile = self.to_tile(pixel);
                if !self.in_bounds(tile) {
                    self.push(
                        ValidationIssue::error(
                            Spawn,
                            format!("Toy spawn at pixel ({},{}) is outside the map", pixel.x, pixel.y),
                        )
                        .at_tile(tile)
                        .for_entity(EntityKind::ToySpawn, 0),
                    );
                }
            }
        }
    }

    fn check_exit_tile(&mut self) {
        let exit = self.config.level_complete_tile;
        if !self.level.grid.cells().contains(&exit) {
            self.push(ValidationIssue::error(
                IssueCategory::ExitTile,
                format!("No exit tile (id {exit}) found"),
            ));
        }
    }

    fn check_spiders(&mut self) {
        use IssueCategory::Spider;

        let level = self.level;
        for (i, spider) in level.spiders.iter().enumerate() {
            match spider.waypoints.len() {
                0 => self.push(
                    ValidationIssue::error(Spider, "Spider has no waypoints")
                        .for_entity(EntityKind::Spider, i),
                ),
                1 => self.push(
                    ValidationIssue::warning(
                        Spider,
                        "Spider has only 1 waypoint and will not patrol",
                    )
                    .for_entity(EntityKind::Spider, i),
                ),
                _ => {}
            }

            // Waypoints are already tile coordinates.
            for (j, &waypoint) in spider.waypoints.iter().enumerate() {
                if !self.in_bounds(waypoint) {
                    self.push(
                        ValidationIssue::error(
                            Spider,
                            format!("Waypoint {j} is outside the map"),
                        )
                        .at_tile(waypoint)
                        .for_entity(EntityKind::Spider, i),
                    );
                } else if self.is_solid(waypoint) {
                    self.push(
                        ValidationIssue::warning(
                            Spider,
                            format!("Waypoint {j} is on a solid tile"),
                        )
                        .at_tile(waypoint)
                        .for_entity(EntityKind::Spider, i),
                    );
                }
            }
        }
    }

    fn check_snails(&mut self) {
        use IssueCategory::Snail;

        let level = self.level;
        for (i, snail) in level.snails.iter().enumerate() {
            let tile = self.to_tile(snail.position);
            if !self.in_bounds(tile) {
                self.push(
                    ValidationIssue::error(Snail, "Snail is outside the map")
                        .at_tile(tile)
                        .for_entity(EntityKind::Snail, i),
                );
            }
            if !snail.has_dialogue() {
                self.push(
                    ValidationIssue::warning(Snail, "Snail has no dialogue")
                        .for_entity(EntityKind::Snail, i),
                );
            }
        }
    }

    fn check_food(&mut self) {
        use IssueCategory::Food;

        let level = self.level;
        // Food positions are tile space, unlike snails and tripwires.
        for (i, food) in level.food.iter().enumerate() {
            let tile = food.position;
            if !self.in_bounds(tile) {
                self.push(
                    ValidationIssue::error(Food, format!("{} food is outside the map", food.kind))
                        .at_tile(tile)
                        .for_entity(EntityKind::Food, i),
                );
            } else if self.is_solid(tile) {
                self.push(
                    ValidationIssue::warning(
                        Food,
                        format!("{} food is on a solid tile and unreachable", food.kind),
                    )
                    .at_tile(tile)
                    .for_entity(EntityKind::Food, i),
                );
            }
        }

        if !level.mechanics.speed_boost_food_enabled && level.food.iter().any(|f| f.is_energy_seed())
        {
            self.push(ValidationIssue::warning(
                Food,
                "Energy seeds are placed but the speed boost mechanic is disabled",
            ));
        }
    }

    fn check_tripwires(&mut self) {
        use IssueCategory::Tripwire;

        let level = self.level;
        if !level.tripwires.is_empty() && !level.mechanics.trip_wires_enabled {
            self.push(ValidationIssue::warning(
                Tripwire,
                "Tripwires are placed but the tripwire mechanic is disabled",
            ));
        }

        // Pixel space; bounds only, tripwires lie on the ground line.
        for (i, tripwire) in level.tripwires.iter().enumerate() {
            let tile = self.to_tile(tripwire.position);
            if !self.in_bounds(tile) {
                self.push(
                    ValidationIssue::error(Tripwire, "Tripwire is outside the map")
                        .at_tile(tile)
                        .for_entity(EntityKind::Tripwire, i),
                );
            }
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn check_map_quality(&mut self) {
        use IssueCategory::Quality;

        let level = self.level;
        let grid = &level.grid;
        let thresholds = self.config.quality;

        let solid = grid.count_where(|id| self.registry.is_solid_or_unknown(id));
        let ratio = solid as f64 / grid.len() as f64;
        let percent = ratio * 100.0;
        if ratio > thresholds.cramped_ratio {
            self.push(ValidationIssue::info(
                Quality,
                format!("Map is cramped ({percent:.0}% solid tiles)"),
            ));
        }
        if ratio < thresholds.open_ratio {
            self.push(ValidationIssue::info(
                Quality,
                format!("Map is very open ({percent:.0}% solid tiles)"),
            ));
        }

        if grid.width() < thresholds.min_width || grid.height() < thresholds.min_height {
            self.push(ValidationIssue::info(
                Quality,
                format!(
                    "Map is {}x{}, smaller than {}x{}",
                    grid.width(),
                    grid.height(),
                    thresholds.min_width,
                    thresholds.min_height
                ),
            ));
        }

        if let Some(gap) = grid.border().find(|&p| !self.is_solid(p)) {
            self.push(
                ValidationIssue::warning(
                    Quality,
                    "Map border is not fully solid; player may walk off map",
                )
                .at_tile(gap),
            );
        }
    }

    fn check_unknown_tiles(&mut self) {
        let mut seen: HashSet<TileId> = HashSet::new();
        let mut found = Vec::new();
        for (tile, id) in self.level.grid.iter() {
            if !self.registry.is_known(id) && seen.insert(id) {
                found.push((tile, id));
            }
        }
        for (tile, id) in found {
            self.push(
                ValidationIssue::error(
                    IssueCategory::UnknownTile,
                    format!("Tile id {id} is not a known tile type"),
                )
                .at_tile(tile),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::{Food, Snail, Spider, Tripwire};
    use crate::tile::{TileGrid, parse_grid};
    use crate::validate::{Severity, has_errors};

    /// 12x12 walled room with an exit at (10,10) and the player at tile (1,1).
    fn clean_level() -> LevelData {
        let mut grid = TileGrid::filled(12, 12, 0).unwrap();
        for i in 0..12 {
            grid.set(i, 0, 1).unwrap();
            grid.set(i, 11, 1).unwrap();
            grid.set(0, i, 1).unwrap();
            grid.set(11, i, 1).unwrap();
        }
        grid.set(10, 10, 37).unwrap();
        let mut level = LevelData::with_grid(grid);
        level.player_spawn = Some(Point::new(96, 96));
        level
    }

    fn run(level: &LevelData) -> Vec<ValidationIssue> {
        let registry = TileRegistry::standard();
        let config = EngineConfig::default();
        LevelValidator::new(&registry, &config).unwrap().validate(level)
    }

    fn of(issues: &[ValidationIssue], category: IssueCategory) -> Vec<&ValidationIssue> {
        issues.iter().filter(|i| i.category() == category).collect()
    }

    #[test]
    fn test_clean_level_has_no_issues() {
        let issues = run(&clean_level());
        assert!(issues.is_empty(), "unexpected issues: {issues:?}");
    }

    #[test]
    fn test_missing_player_spawn() {
        let mut level = clean_level();
        level.player_spawn = None;
        let issues = run(&level);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity(), Severity::Error);
        assert_eq!(issues[0].category(), IssueCategory::Spawn);
        assert!(issues[0].entity().is_none());
    }

    #[test]
    fn test_player_spawn_bounds_beats_solidity() {
        let mut level = clean_level();
        level.player_spawn = Some(Point::new(-10, 96));
        let issues = run(&level);
        let spawn = of(&issues, IssueCategory::Spawn);
        assert_eq!(spawn.len(), 1);
        assert!(spawn[0].message().contains("outside"));
        assert_eq!(spawn[0].tile(), Some(Point::new(-1, 1)));

        level.player_spawn = Some(Point::new(10, 10));
        let issues = run(&level);
        let spawn = of(&issues, IssueCategory::Spawn);
        assert_eq!(spawn.len(), 1);
        assert!(spawn[0].message().contains("solid"));
        assert_eq!(spawn[0].tile(), Some(Point::new(0, 0)));
    }

    #[test]
    fn test_toy_spawn_rules() {
        let mut level = clean_level();
        level.mechanics.toy_enabled = true;
        let issues = run(&level);
        assert_eq!(of(&issues, IssueCategory::Spawn).len(), 1);

        // Inside a wall is fine for the toy: only bounds are checked.
        level.toy_spawn = Some(Point::new(10, 10));
        assert!(run(&level).is_empty());

        level.toy_spawn = Some(Point::new(5000, 10));
        let issues = run(&level);
        assert_eq!(issues.len(), 1);
        assert_eq!(
            issues[0].entity().map(|e| e.kind),
            Some(EntityKind::ToySpawn)
        );

        level.mechanics.toy_enabled = false;
        level.toy_spawn = None;
        assert!(run(&level).is_empty());
    }

    #[test]
    fn test_exit_tile_uses_configured_id() {
        let level = clean_level();
        let registry = TileRegistry::standard();
        let config = EngineConfig {
            level_complete_tile: 38,
            ..EngineConfig::default()
        };
        let issues = LevelValidator::new(&registry, &config).unwrap().validate(&level);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].category(), IssueCategory::ExitTile);
        assert!(issues[0].message().contains("38"));
    }

    #[test]
    fn test_spider_rules() {
        let mut level = clean_level();
        level.spiders = vec![
            Spider::new(vec![]),
            Spider::new(vec![Point::new(2, 2)]),
            Spider::new(vec![Point::new(2, 2), Point::new(0, 5), Point::new(40, 5)]),
        ];
        let issues = run(&level);
        let spider = of(&issues, IssueCategory::Spider);
        assert_eq!(spider.len(), 4);

        assert_eq!(spider[0].severity(), Severity::Error);
        assert_eq!(spider[0].entity().map(|e| e.index), Some(0));

        assert_eq!(spider[1].severity(), Severity::Warning);
        assert!(spider[1].message().contains("only 1 waypoint"));

        assert_eq!(spider[2].severity(), Severity::Warning);
        assert_eq!(spider[2].tile(), Some(Point::new(0, 5)));

        assert_eq!(spider[3].severity(), Severity::Error);
        assert_eq!(spider[3].tile(), Some(Point::new(40, 5)));
        assert_eq!(spider[3].entity().map(|e| e.index), Some(2));
    }

    #[test]
    fn test_snail_rules() {
        let mut level = clean_level();
        level.snails = vec![
            Snail::new(Point::new(200, 200), Some("Slow down!")),
            Snail::new(Point::new(200, 200), None),
            Snail::new(Point::new(200, 9000), Some("")),
        ];
        let issues = run(&level);
        let snail = of(&issues, IssueCategory::Snail);
        assert_eq!(snail.len(), 3);
        assert_eq!(snail[0].severity(), Severity::Warning);
        assert_eq!(snail[0].entity().map(|e| e.index), Some(1));
        // out of bounds first, then dialogue, for the same snail
        assert_eq!(snail[1].severity(), Severity::Error);
        assert_eq!(snail[2].severity(), Severity::Warning);
        assert_eq!(snail[2].entity().map(|e| e.index), Some(2));
    }

    #[test]
    fn test_food_rules() {
        let mut level = clean_level();
        level.food = vec![
            Food::new(Point::new(3, 3), "CRUMB"),
            Food::new(Point::new(0, 3), "CRUMB"),
            Food::new(Point::new(12, 3), "ENERGY_SEED"),
            Food::new(Point::new(4, 4), "ENERGY_SEED"),
        ];
        let issues = run(&level);
        let food = of(&issues, IssueCategory::Food);
        assert_eq!(food.len(), 3);
        assert_eq!(food[0].severity(), Severity::Warning);
        assert!(food[0].message().contains("unreachable"));
        assert_eq!(food[1].severity(), Severity::Error);
        assert!(food[2].message().contains("speed boost"));
        assert!(food[2].entity().is_none());

        level.mechanics.speed_boost_food_enabled = true;
        assert_eq!(of(&run(&level), IssueCategory::Food).len(), 2);
    }

    #[test]
    fn test_tripwire_rules() {
        let mut level = clean_level();
        level.tripwires = vec![
            Tripwire::new(Point::new(100, 100)),
            Tripwire::new(Point::new(10, 10)),
            Tripwire::new(Point::new(100, -1)),
        ];
        let issues = run(&level);
        let trip = of(&issues, IssueCategory::Tripwire);
        assert_eq!(trip.len(), 2);
        assert_eq!(trip[0].severity(), Severity::Warning);
        assert!(trip[0].entity().is_none());
        assert_eq!(trip[1].severity(), Severity::Error);
        assert_eq!(trip[1].entity().map(|e| e.index), Some(2));

        level.mechanics.trip_wires_enabled = true;
        assert_eq!(of(&run(&level), IssueCategory::Tripwire).len(), 1);
    }

    #[test]
    fn test_quality_cramped_small_and_open_border() {
        // 4x3, all wall except exit and one floor on the border
        let grid = parse_grid("1 1 1 1\n0 37 1 1\n1 1 1 1\n").unwrap();
        let mut level = LevelData::with_grid(grid);
        level.player_spawn = Some(Point::new(96, 96));
        let issues = run(&level);
        let quality = of(&issues, IssueCategory::Quality);
        assert_eq!(quality.len(), 3);
        assert!(quality[0].message().contains("cramped"));
        assert!(quality[1].message().contains("smaller"));
        assert_eq!(quality[2].severity(), Severity::Warning);
        assert_eq!(quality[2].tile(), Some(Point::new(0, 1)));
        assert!(!has_errors(&issues));
    }

    #[test]
    fn test_quality_very_open() {
        let mut grid = TileGrid::filled(12, 12, 0).unwrap();
        grid.set(5, 5, 37).unwrap();
        let mut level = LevelData::with_grid(grid);
        level.player_spawn = Some(Point::new(96, 96));
        let issues = run(&level);
        let quality = of(&issues, IssueCategory::Quality);
        assert_eq!(quality.len(), 2);
        assert!(quality[0].message().contains("very open"));
        assert_eq!(quality[1].tile(), Some(Point::new(0, 0)));
    }

    #[test]
    fn test_unknown_tiles_reported_once_each() {
        let mut level = clean_level();
        level.grid.set(3, 3, 99).unwrap();
        level.grid.set(4, 3, 99).unwrap();
        level.grid.set(2, 5, 10).unwrap();
        let issues = run(&level);
        let unknown = of(&issues, IssueCategory::UnknownTile);
        assert_eq!(unknown.len(), 2);
        assert_eq!(unknown[0].tile(), Some(Point::new(3, 3)));
        assert_eq!(unknown[1].tile(), Some(Point::new(2, 5)));
        assert!(has_errors(&issues));
        assert_eq!(issues.last().map(ValidationIssue::category), Some(IssueCategory::UnknownTile));
    }

    #[test]
    fn test_unknown_tile_counts_as_solid_for_spawn() {
        let mut level = clean_level();
        level.grid.set(1, 1, 200).unwrap();
        let issues = run(&level);
        assert_eq!(issues[0].category(), IssueCategory::Spawn);
        assert!(issues[0].message().contains("solid"));
    }

    #[test]
    fn test_many_unknown_ids_keep_first_appearance_order() {
        let ids: Vec<TileId> = (0..10_000u16).map(|i| 1000 + i % 500).collect();
        let mut level = LevelData::with_grid(TileGrid::new(100, 100, ids).unwrap());
        level.player_spawn = Some(Point::new(0, 0));
        let issues = run(&level);
        let unknown = of(&issues, IssueCategory::UnknownTile);
        assert_eq!(unknown.len(), 500);
        assert_eq!(unknown[0].tile(), Some(Point::new(0, 0)));
        assert_eq!(unknown[499].tile(), Some(Point::new(99, 4)));
        assert!(unknown[1].message().contains("1001"));
    }

    #[test]
    fn test_rejects_zero_tile_size() {
        let registry = TileRegistry::standard();
        let config = EngineConfig {
            tile_size: 0,
            ..EngineConfig::default()
        };
        assert!(matches!(
            LevelValidator::new(&registry, &config),
            Err(crate::LevelError::InvalidConfig(_))
        ));
    }
}
