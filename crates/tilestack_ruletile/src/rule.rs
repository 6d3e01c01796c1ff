//! Rule tile data types.
//!
//! A [`RuleTile`] owns an ordered list of [`TilingRule`]s. Each rule is a list
//! of neighbor conditions plus a [`TransformPolicy`]; the first rule that
//! matches at a cell decides which tile variant is placed there.

use serde::{Deserialize, Serialize};
use tilestack_core::{Cell, LayerId, TileId};
use uuid::Uuid;

use crate::kind::{KindPalette, NeighborKind};
use crate::transform::TransformPolicy;

// ─── RuleTile ────────────────────────────────────────────────────────────────

/// A tile whose placed variant depends on its neighbors across layers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleTile {
    /// Stable identifier for this rule tile.
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub name: String,
    /// The identity this tile has when placed. `This`/`NotThis` compare against it.
    pub self_tile: TileId,
    /// Variant used when no rule matches.
    pub default_output: TileId,
    #[serde(default)]
    pub palette: KindPalette,
    #[serde(default)]
    pub lookup: LookupMode,
    /// Tried in order; the first match wins.
    #[serde(default)]
    pub rules: Vec<TilingRule>,
}

impl RuleTile {
    /// Create a rule tile with no rules and an empty palette
    pub fn new(name: impl Into<String>, self_tile: TileId, default_output: TileId) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            self_tile,
            default_output,
            palette: KindPalette::default(),
            lookup: LookupMode::default(),
            rules: Vec::new(),
        }
    }

    pub fn with_palette(mut self, palette: KindPalette) -> Self {
        self.palette = palette;
        self
    }

    pub fn with_lookup(mut self, lookup: LookupMode) -> Self {
        self.lookup = lookup;
        self
    }

    /// Append a rule at the lowest priority
    pub fn with_rule(mut self, rule: TilingRule) -> Self {
        self.rules.push(rule);
        self
    }
}

/// How the tiles at a neighbor cell are gathered before classification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LookupMode {
    /// Every distinct tile at the cell, across all registered layers.
    #[default]
    AllLayers,
    /// At most one tile: the one on `home` if present, otherwise the first
    /// tile found on the remaining layers in registry order.
    FirstHit { home: LayerId },
}

// ─── TilingRule ──────────────────────────────────────────────────────────────

/// One neighbor condition of a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleNeighbor {
    /// Position relative to the anchor cell
    pub offset: Cell,
    pub kind: NeighborKind,
}

/// An ordered list of neighbor conditions and the variant placed when they hold.
///
/// All conditions must hold under the same transform for the rule to match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TilingRule {
    /// Stable identifier for this rule.
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub neighbors: Vec<RuleNeighbor>,
    #[serde(default)]
    pub policy: TransformPolicy,
    /// Variant placed when this rule matches.
    pub output: TileId,
}

impl TilingRule {
    pub fn new(name: impl Into<String>, output: TileId) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            neighbors: Vec::new(),
            policy: TransformPolicy::default(),
            output,
        }
    }

    pub fn with_neighbor(mut self, offset: impl Into<Cell>, kind: NeighborKind) -> Self {
        self.neighbors.push(RuleNeighbor {
            offset: offset.into(),
            kind,
        });
        self
    }

    pub fn with_policy(mut self, policy: TransformPolicy) -> Self {
        self.policy = policy;
        self
    }
}
