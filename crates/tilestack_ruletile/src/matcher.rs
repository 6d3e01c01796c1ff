//! The rule matcher: decides whether a [`TilingRule`] holds at an anchor cell.
//!
//! Matching is a pure read of a [`RegistrySnapshot`]. The snapshot is passed in
//! on every call; nothing is cached between calls.

use tilestack_core::{Cell, RegistrySnapshot, TileSet};
use tracing::trace;

use crate::kind::KindClassifier;
use crate::rule::{LookupMode, RuleTile, TilingRule};
use crate::transform::Transform;

/// Matches the rules of one [`RuleTile`] against one registry snapshot.
#[derive(Debug, Clone, Copy)]
pub struct RuleMatcher<'a> {
    snapshot: &'a RegistrySnapshot,
    classifier: KindClassifier<'a>,
    lookup: &'a LookupMode,
}

impl<'a> RuleMatcher<'a> {
    pub fn new(tile: &'a RuleTile, snapshot: &'a RegistrySnapshot) -> Self {
        Self {
            snapshot,
            classifier: KindClassifier::new(tile.self_tile, &tile.palette),
            lookup: &tile.lookup,
        }
    }

    /// The tiles a neighbor condition at `cell` is tested against
    pub fn tiles_at(&self, cell: Cell) -> TileSet {
        match self.lookup {
            LookupMode::AllLayers => self.snapshot.all_tiles_at(cell),
            LookupMode::FirstHit { home } => self
                .snapshot
                .tile_in_layer(home, cell)
                .or_else(|| self.snapshot.first_tile_at(cell, Some(home)))
                .into(),
        }
    }

    /// Whether every condition of `rule` holds at `anchor` under `transform`.
    ///
    /// A neighbor cell that falls outside the `i32` grid is treated as empty.
    pub fn matches_with(&self, rule: &TilingRule, anchor: Cell, transform: Transform) -> bool {
        rule.neighbors.iter().all(|neighbor| {
            let tiles = transform
                .apply(neighbor.offset)
                .and_then(|offset| anchor.checked_add(offset))
                .map(|cell| self.tiles_at(cell))
                .unwrap_or_default();
            self.classifier.combine(neighbor.kind, &tiles)
        })
    }

    /// The first transform allowed by the rule's policy under which the rule
    /// holds at `anchor`, or `None`.
    pub fn match_rule(&self, rule: &TilingRule, anchor: Cell) -> Option<Transform> {
        let found = rule
            .policy
            .candidates()
            .iter()
            .copied()
            .find(|&transform| self.matches_with(rule, anchor, transform));
        trace!(rule = %rule.name, %anchor, ?found, "rule evaluated");
        found
    }
}

/// Match a single rule of `tile` at `anchor`.
pub fn match_rule(
    tile: &RuleTile,
    rule: &TilingRule,
    snapshot: &RegistrySnapshot,
    anchor: Cell,
) -> Option<Transform> {
    RuleMatcher::new(tile, snapshot).match_rule(rule, anchor)
}
