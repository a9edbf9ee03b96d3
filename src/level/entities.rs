//! Entity placements.
//!
//! Coordinate spaces differ per kind and are stored exactly as the editor
//! writes them:
//! - pixel space: player spawn, toy spawn, snails, tripwires
//! - tile space: spider waypoints, food
//!
//! Food and tripwires are both ground items, yet only food is stored in tile
//! space. Whether that split is deliberate has not been settled with the level
//! designers, so both conventions are kept as-is.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::tile::Point;

/// Food type tag with special meaning: it needs the speed boost mechanic.
pub const ENERGY_SEED: &str = "ENERGY_SEED";

/// A patrolling spider.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Spider {
    /// Patrol waypoints in tile space, in patrol order.
    #[serde(default)]
    pub waypoints: Vec<Point>,
}

impl Spider {
    /// Create a spider patrolling `waypoints`.
    #[must_use]
    pub fn new(waypoints: Vec<Point>) -> Self {
        Self { waypoints }
    }
}

/// A snail NPC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snail {
    /// Position in pixel space.
    pub position: Point,
    /// What the snail says when talked to.
    #[serde(default)]
    pub dialogue: Option<String>,
}

impl Snail {
    /// Create a snail.
    #[must_use]
    pub fn new(position: Point, dialogue: Option<&str>) -> Self {
        Self {
            position,
            dialogue: dialogue.map(str::to_owned),
        }
    }

    /// Whether the snail has something non-empty to say.
    #[must_use]
    pub fn has_dialogue(&self) -> bool {
        self.dialogue.as_deref().is_some_and(|d| !d.trim().is_empty())
    }
}

/// A food pickup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Food {
    /// Position in tile space.
    pub position: Point,
    /// Free-form type tag.
    #[serde(rename = "type")]
    pub kind: String,
}

impl Food {
    /// Create a food item.
    #[must_use]
    pub fn new(position: Point, kind: &str) -> Self {
        Self {
            position,
            kind: kind.to_owned(),
        }
    }

    /// Whether this is an energy seed.
    #[must_use]
    pub fn is_energy_seed(&self) -> bool {
        self.kind == ENERGY_SEED
    }
}

/// A tripwire trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tripwire {
    /// Position in pixel space.
    pub position: Point,
}

impl Tripwire {
    /// Create a tripwire.
    #[must_use]
    pub const fn new(position: Point) -> Self {
        Self { position }
    }
}

/// Kind of placed entity, used to point issues at their source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EntityKind {
    /// The player start.
    PlayerSpawn,
    /// The toy start.
    ToySpawn,
    /// A spider.
    Spider,
    /// A snail.
    Snail,
    /// A food item.
    Food,
    /// A tripwire.
    Tripwire,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::PlayerSpawn => "PlayerSpawn",
            EntityKind::ToySpawn => "ToySpawn",
            EntityKind::Spider => "Spider",
            EntityKind::Snail => "Snail",
            EntityKind::Food => "Food",
            EntityKind::Tripwire => "Tripwire",
        };
        f.write_str(name)
    }
}
