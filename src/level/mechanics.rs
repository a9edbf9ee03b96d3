//! Per-level mechanic switches.

use serde::{Deserialize, Serialize};

/// Which gameplay systems a level turns on.
///
/// Every flag defaults to off when absent from the level document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools)]
pub struct Mechanics {
    /// The toy companion is present; a toy spawn is required.
    pub toy_enabled: bool,
    /// Energy seeds grant a speed boost.
    pub speed_boost_food_enabled: bool,
    /// Tripwires trigger traps.
    pub trip_wires_enabled: bool,
    /// Spiders patrol. Read by gameplay only.
    pub spiders_enabled: bool,
    /// Snails can be talked to. Read by gameplay only.
    pub snails_enabled: bool,
}
