//! Neighbor kinds and the classifier that tests tiles against them.
//!
//! A rule does not name concrete tiles for its neighbors. It names a
//! [`NeighborKind`], and the [`KindClassifier`] decides whether the tiles found
//! at a neighbor cell satisfy that kind, using the owning rule tile's identity
//! and its [`KindPalette`].

use serde::{Deserialize, Serialize};
use tilestack_core::{TileId, TileSet};

/// What a rule expects to find at a neighbor cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NeighborKind {
    /// The cell holds this rule tile.
    This,
    /// The cell does not hold this rule tile on any layer. Empty cells match.
    NotThis,
    /// The cell holds the palette's stair tile.
    Stair,
    /// The cell holds the palette's flat ground tile.
    FlatGround,
    /// The cell holds the palette's elevated ground tile for this tier.
    ElevatedGround(u8),
    /// The cell holds the palette's cliff tile.
    Cliff,
    /// The cell is empty on every layer.
    Water,
    /// Always matches.
    Any,
}

impl NeighborKind {
    /// Kinds that are tested against a palette entry
    pub fn needs_palette(self) -> bool {
        matches!(
            self,
            NeighborKind::Stair
                | NeighborKind::FlatGround
                | NeighborKind::ElevatedGround(_)
                | NeighborKind::Cliff
        )
    }
}

/// The concrete tiles that stand for each structural kind.
///
/// A kind with no entry never matches; rule tile validation rejects rules
/// that test such a kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindPalette {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stair: Option<TileId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flat_ground: Option<TileId>,
    /// Elevated ground tiles indexed by tier (tier 0 first)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub elevated_ground: Vec<TileId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cliff: Option<TileId>,
}

impl KindPalette {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stair(mut self, tile: TileId) -> Self {
        self.stair = Some(tile);
        self
    }

    pub fn with_flat_ground(mut self, tile: TileId) -> Self {
        self.flat_ground = Some(tile);
        self
    }

    /// Append the tile for the next elevated tier
    pub fn with_elevated_ground(mut self, tile: TileId) -> Self {
        self.elevated_ground.push(tile);
        self
    }

    pub fn with_cliff(mut self, tile: TileId) -> Self {
        self.cliff = Some(tile);
        self
    }

    /// The configured tile for a structural kind
    pub fn tile_for(&self, kind: NeighborKind) -> Option<TileId> {
        match kind {
            NeighborKind::Stair => self.stair,
            NeighborKind::FlatGround => self.flat_ground,
            NeighborKind::ElevatedGround(tier) => self.elevated_ground.get(tier as usize).copied(),
            NeighborKind::Cliff => self.cliff,
            _ => None,
        }
    }
}

/// Tests tiles against neighbor kinds on behalf of one rule tile.
#[derive(Debug, Clone, Copy)]
pub struct KindClassifier<'a> {
    self_tile: TileId,
    palette: &'a KindPalette,
}

impl<'a> KindClassifier<'a> {
    pub fn new(self_tile: TileId, palette: &'a KindPalette) -> Self {
        Self { self_tile, palette }
    }

    /// Test a single (possibly absent) tile against `kind`.
    pub fn classify(&self, tile: Option<TileId>, kind: NeighborKind) -> bool {
        match kind {
            NeighborKind::This => tile == Some(self.self_tile),
            NeighborKind::NotThis => tile != Some(self.self_tile),
            NeighborKind::Water => tile.is_none(),
            NeighborKind::Any => true,
            structural => match (tile, self.palette.tile_for(structural)) {
                (Some(tile), Some(expected)) => tile == expected,
                _ => false,
            },
        }
    }

    /// Test every tile found at one cell against `kind`.
    ///
    /// Positive kinds match if any tile matches. `NotThis` matches only if no
    /// tile is this rule tile, and `Water` only if there are no tiles at all.
    pub fn combine(&self, kind: NeighborKind, tiles: &TileSet) -> bool {
        match kind {
            NeighborKind::NotThis => !tiles.contains(self.self_tile),
            NeighborKind::Water => tiles.is_empty(),
            NeighborKind::Any => true,
            positive => tiles.iter().any(|tile| self.classify(Some(tile), positive)),
        }
    }
}
