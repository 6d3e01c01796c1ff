//! Core data structures for tilestack
//!
//! This crate provides the grid side of multi-layer rule tiles:
//! - `Cell` / `TileId` - Integer grid coordinates and opaque tile identities
//! - `Layer` - A named sparse grid of tiles
//! - `LayerRegistry` - The active, ordered layer set, handed out as immutable snapshots
//! - `RegistrySnapshot` lookups - Single-layer, first-hit and all-layer tile queries
//!
//! This crate has no engine dependency.

mod cell;
mod layer;
mod lookup;
mod registry;

pub use cell::{Cell, TileId};
pub use layer::{Layer, LayerId};
pub use lookup::TileSet;
pub use registry::{LayerRegistry, RegistrySnapshot};
