// Allow unwrap in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
//! Tilecheck: tile-grid collision and static level validation.
//!
//! This crate provides the level core of a tile-based game:
//! - A tile registry mapping tile ids to semantic properties
//! - A row-major tile grid with point and box collision queries
//! - The level description produced by the editor
//! - A rule engine reporting design defects before a level ever runs
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────┐      ┌──────────────────────┐
//! │  LevelData (editor)  │ ───▶ │    LevelValidator    │ ───▶ issues
//! └──────────────────────┘      └──────────────────────┘
//!            │                             │
//!            ▼                             ▼
//! ┌──────────────────────┐      ┌──────────────────────┐
//! │  World (collision)   │ ───▶ │     TileRegistry     │
//! └──────────────────────┘      └──────────────────────┘
//! ```
//!
//! Registries and configuration are built once by the caller and passed in;
//! nothing here is global.

pub mod config;
pub mod error;
pub mod level;
pub mod tile;
pub mod validate;

pub use config::{EngineConfig, LEVEL_COMPLETE_TILE, QualityThresholds, TILE_SIZE};
pub use error::{LevelError, LevelResult};

// Re-export key types at crate root for convenience
pub use level::{EntityKind, LevelData, Mechanics};
pub use tile::{Point, TileGrid, TileId, TileProperties, TileRegistry, World};
pub use validate::{LevelValidator, Severity, ValidationIssue, has_errors};
