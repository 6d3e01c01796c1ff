//! Multi-layer rule tiles for tilestack.
//!
//! A [`RuleTile`] picks which variant to show at a cell by testing its
//! [`TilingRule`]s against the neighbors of that cell. Neighbors are looked up
//! across every layer of a [`RegistrySnapshot`](tilestack_core::RegistrySnapshot),
//! and each rule may also be tried rotated or mirrored.
//!
//! The main entry points are [`match_rule`] for one rule, [`RuleTile::select`]
//! and [`RuleTile::resolve`] for a whole rule list, and [`autotile_cells`] for a
//! pass over many cells.
//!
//! # Example
//!
//! ```rust,ignore
//! use tilestack_core::{Cell, Layer, LayerRegistry, TileId};
//! use tilestack_ruletile::{KindPalette, NeighborKind, RuleTile, TilingRule, TransformPolicy};
//!
//! let mut registry = LayerRegistry::new();
//! registry.register(Layer::new("Base"));
//! registry.register(Layer::new("Cliffs").with_tile((0, 1), TileId(12)));
//!
//! let tile = RuleTile::new("Ground", TileId(1), TileId(1))
//!     .with_palette(KindPalette::new().with_elevated_ground(TileId(12)))
//!     .with_rule(
//!         TilingRule::new("ledge", TileId(3))
//!             .with_neighbor((1, 0), NeighborKind::ElevatedGround(0))
//!             .with_policy(TransformPolicy::Rotated),
//!     );
//! tile.validate()?;
//!
//! let found = tile.select(&registry.snapshot(), Cell::ZERO);
//! ```
//!
//! This crate has no engine dependency. It operates on plain data from `tilestack_core`.

mod config;
mod kind;
mod matcher;
mod rule;
mod select;
mod transform;

pub use config::{
    load_rule_tile, parse_rule_tile_json, parse_rule_tile_toml, rule_tile_to_json,
    validate_rule_tile, RuleTileError,
};
pub use kind::{KindClassifier, KindPalette, NeighborKind};
pub use matcher::{match_rule, RuleMatcher};
pub use rule::{LookupMode, RuleNeighbor, RuleTile, TilingRule};
pub use select::{autotile_cells, cells_of, CellResolution, Resolution, RuleMatch};
pub use transform::{Transform, TransformPolicy};

// Re-export tilestack_core
pub use tilestack_core;
