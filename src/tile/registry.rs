//! Tile type registry.

use std::fmt;

use serde::Serialize;

use crate::error::{LevelError, LevelResult};
use crate::tile::TileId;

/// Semantic properties of a tile type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TileProperties {
    /// Blocks movement.
    pub solid: bool,
    /// Slows movement across it.
    pub slow: bool,
    /// Casts or sits in shadow.
    pub shadow: bool,
}

impl TileProperties {
    /// Walkable tile with no special behavior.
    pub const FLOOR: Self = Self::new(false, false, false);
    /// Solid tile that casts shadow.
    pub const WALL: Self = Self::new(true, false, true);
    /// Solid tile without shadow.
    pub const BLOCK: Self = Self::new(true, false, false);
    /// Walkable tile that slows movement.
    pub const STICKY: Self = Self::new(false, true, false);
    /// Walkable tile in shadow.
    pub const SHADED: Self = Self::new(false, false, true);

    /// Create a property set.
    #[must_use]
    pub const fn new(solid: bool, slow: bool, shadow: bool) -> Self {
        Self {
            solid,
            slow,
            shadow,
        }
    }
}

/// Family a tile id belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TileCategory {
    /// Floors, walls and crates (ids 0-5).
    Basic,
    /// Floor stains (ids 6-9).
    Stain,
    /// Sack props (ids 11-14).
    Sack,
    /// Wooden planks (ids 31-34).
    Plank,
    /// Ladders (ids 35-38).
    Ladder,
    /// Intro level tiles (ids 41-46).
    Intro,
    /// Registered by a tool or test outside the standard table.
    Custom,
}

impl fmt::Display for TileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TileCategory::Basic => "basic",
            TileCategory::Stain => "stain",
            TileCategory::Sack => "sack",
            TileCategory::Plank => "plank",
            TileCategory::Ladder => "ladder",
            TileCategory::Intro => "intro",
            TileCategory::Custom => "custom",
        };
        f.write_str(name)
    }
}

/// One registered tile type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TileEntry {
    name: &'static str,
    category: TileCategory,
    properties: TileProperties,
}

/// Standard tile table: `(id, name, category, properties)`.
const STANDARD_TILES: &[(TileId, &str, TileCategory, TileProperties)] = &[
    (0, "floor", TileCategory::Basic, TileProperties::FLOOR),
    (1, "wall", TileCategory::Basic, TileProperties::WALL),
    (2, "sticky floor", TileCategory::Basic, TileProperties::STICKY),
    (3, "dark wall", TileCategory::Basic, TileProperties::WALL),
    (4, "shadowed floor", TileCategory::Basic, TileProperties::SHADED),
    (5, "crate", TileCategory::Basic, TileProperties::BLOCK),
    (6, "stain 1", TileCategory::Stain, TileProperties::STICKY),
    (7, "stain 2", TileCategory::Stain, TileProperties::STICKY),
    (8, "stain 3", TileCategory::Stain, TileProperties::STICKY),
    (9, "stain 4", TileCategory::Stain, TileProperties::STICKY),
    (11, "sack top left", TileCategory::Sack, TileProperties::WALL),
    (12, "sack top right", TileCategory::Sack, TileProperties::WALL),
    (13, "sack bottom left", TileCategory::Sack, TileProperties::WALL),
    (14, "sack bottom right", TileCategory::Sack, TileProperties::WALL),
    (31, "plank 1", TileCategory::Plank, TileProperties::FLOOR),
    (32, "plank 2", TileCategory::Plank, TileProperties::FLOOR),
    (33, "plank 3", TileCategory::Plank, TileProperties::FLOOR),
    (34, "plank 4", TileCategory::Plank, TileProperties::FLOOR),
    (35, "ladder 1", TileCategory::Ladder, TileProperties::FLOOR),
    (36, "ladder 2", TileCategory::Ladder, TileProperties::FLOOR),
    (37, "ladder 3", TileCategory::Ladder, TileProperties::FLOOR),
    (38, "ladder 4", TileCategory::Ladder, TileProperties::FLOOR),
    (41, "intro floor 1", TileCategory::Intro, TileProperties::FLOOR),
    (42, "intro floor 2", TileCategory::Intro, TileProperties::FLOOR),
    (43, "intro floor 3", TileCategory::Intro, TileProperties::FLOOR),
    (44, "intro wall 1", TileCategory::Intro, TileProperties::WALL),
    (45, "intro wall 2", TileCategory::Intro, TileProperties::WALL),
    (46, "intro wall 3", TileCategory::Intro, TileProperties::WALL),
];

/// Lookup table from tile id to [`TileProperties`].
///
/// Level independent and read-only once built. The composition root builds
/// one (usually [`TileRegistry::standard`]) and shares it, typically behind an
/// `Arc`, with the collision world and the validator.
#[derive(Debug, Clone, Default)]
pub struct TileRegistry {
    /// Indexed by tile id; `None` for unregistered ids.
    entries: Vec<Option<TileEntry>>,
}

impl TileRegistry {
    /// Create a registry with no tiles.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create the registry holding the standard tile table.
    #[must_use]
    pub fn standard() -> Self {
        let mut registry = Self::empty();
        for &(id, name, category, properties) in STANDARD_TILES {
            registry.insert(
                id,
                TileEntry {
                    name,
                    category,
                    properties,
                },
            );
        }
        registry
    }

    /// Register (or replace) a custom tile type.
    pub fn register(&mut self, id: TileId, properties: TileProperties) {
        self.insert(
            id,
            TileEntry {
                name: "custom",
                category: TileCategory::Custom,
                properties,
            },
        );
    }

    fn insert(&mut self, id: TileId, entry: TileEntry) {
        let idx = usize::from(id);
        if idx >= self.entries.len() {
            self.entries.resize(idx + 1, None);
        }
        self.entries[idx] = Some(entry);
    }

    fn entry(&self, id: TileId) -> Option<&TileEntry> {
        self.entries.get(usize::from(id)).and_then(Option::as_ref)
    }

    /// Get the properties of a tile type.
    ///
    /// # Errors
    ///
    /// Returns [`LevelError::UnknownTileType`] if `id` is not registered.
    pub fn properties(&self, id: TileId) -> LevelResult<TileProperties> {
        self.entry(id)
            .map(|e| e.properties)
            .ok_or(LevelError::UnknownTileType(id))
    }

    /// Check whether `id` is registered.
    #[must_use]
    pub fn is_known(&self, id: TileId) -> bool {
        self.entry(id).is_some()
    }

    /// Solidity of `id`, treating unknown ids as solid.
    #[must_use]
    #[inline]
    pub fn is_solid_or_unknown(&self, id: TileId) -> bool {
        self.entry(id).is_none_or(|e| e.properties.solid)
    }

    /// Display name of a registered tile.
    #[must_use]
    pub fn name(&self, id: TileId) -> Option<&'static str> {
        self.entry(id).map(|e| e.name)
    }

    /// Category of a registered tile.
    #[must_use]
    pub fn category(&self, id: TileId) -> Option<TileCategory> {
        self.entry(id).map(|e| e.category)
    }

    /// Number of registered tile types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.iter().flatten().count()
    }

    /// Whether no tile types are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over registered ids and their properties in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (TileId, TileProperties)> + '_ {
        self.ids().filter_map(|id| self.entry(id).map(|e| (id, e.properties)))
    }

    /// Iterate over registered ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = TileId> + '_ {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.is_some())
            .filter_map(|(idx, _)| TileId::try_from(idx).ok())
    }

    /// Resolve an image handle for every registered tile.
    ///
    /// The registry never owns image data; the returned atlas holds whatever
    /// handles the provider hands out.
    pub fn bind_images<P: TileImageProvider>(&self, provider: &P) -> TileAtlas<P::Handle> {
        let mut handles = Vec::with_capacity(self.entries.len());
        handles.resize_with(self.entries.len(), || None);
        let mut missing = Vec::new();

        for id in self.ids() {
            match provider.image(id) {
                Some(handle) => handles[usize::from(id)] = Some(handle),
                None => missing.push(id),
            }
        }

        TileAtlas { handles, missing }
    }
}

/// Source of renderable images for tile ids.
pub trait TileImageProvider {
    /// Opaque handle to a loaded image.
    type Handle;

    /// Image for `id`, or `None` if the provider has none.
    fn image(&self, id: TileId) -> Option<Self::Handle>;
}

/// Image handles resolved for a registry.
#[derive(Debug, Clone)]
pub struct TileAtlas<H> {
    handles: Vec<Option<H>>,
    missing: Vec<TileId>,
}

impl<H> TileAtlas<H> {
    /// Handle for `id`, if one was resolved.
    #[must_use]
    pub fn get(&self, id: TileId) -> Option<&H> {
        self.handles.get(usize::from(id)).and_then(Option::as_ref)
    }

    /// Registered ids the provider had no image for, in ascending order.
    #[must_use]
    pub fn missing(&self) -> &[TileId] {
        &self.missing
    }
}
