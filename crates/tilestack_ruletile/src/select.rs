//! Rule selection: picks the variant a [`RuleTile`] shows at a cell.

use tilestack_core::{Cell, LayerId, RegistrySnapshot, TileId};
use tracing::debug;
use uuid::Uuid;

use crate::matcher::RuleMatcher;
use crate::rule::RuleTile;
use crate::transform::Transform;

/// The rule that matched at a cell and how it was oriented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleMatch {
    /// Index into [`RuleTile::rules`]
    pub rule_index: usize,
    pub rule_id: Uuid,
    pub output: TileId,
    pub transform: Transform,
}

/// The variant placed at a cell: a matched rule's output, or the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub output: TileId,
    pub transform: Transform,
    /// `None` when no rule matched and the default output was used
    pub matched: Option<RuleMatch>,
}

/// The resolution for one anchor cell of a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellResolution {
    pub cell: Cell,
    pub resolution: Resolution,
}

impl RuleTile {
    /// The first rule, in order, that matches at `anchor`.
    pub fn select(&self, snapshot: &RegistrySnapshot, anchor: Cell) -> Option<RuleMatch> {
        let matcher = RuleMatcher::new(self, snapshot);
        self.rules.iter().enumerate().find_map(|(rule_index, rule)| {
            matcher.match_rule(rule, anchor).map(|transform| RuleMatch {
                rule_index,
                rule_id: rule.id,
                output: rule.output,
                transform,
            })
        })
    }

    /// The variant to place at `anchor`, falling back to
    /// [`default_output`](RuleTile::default_output) unrotated.
    pub fn resolve(&self, snapshot: &RegistrySnapshot, anchor: Cell) -> Resolution {
        match self.select(snapshot, anchor) {
            Some(found) => Resolution {
                output: found.output,
                transform: found.transform,
                matched: Some(found),
            },
            None => Resolution {
                output: self.default_output,
                transform: Transform::Identity,
                matched: None,
            },
        }
    }
}

/// Resolve `tile` at every cell in `cells`, in order, against one snapshot.
pub fn autotile_cells(
    tile: &RuleTile,
    snapshot: &RegistrySnapshot,
    cells: impl IntoIterator<Item = Cell>,
) -> Vec<CellResolution> {
    let results: Vec<CellResolution> = cells
        .into_iter()
        .map(|cell| CellResolution {
            cell,
            resolution: tile.resolve(snapshot, cell),
        })
        .collect();

    let matched = results
        .iter()
        .filter(|r| r.resolution.matched.is_some())
        .count();
    debug!(
        tile = %tile.name,
        cells = results.len(),
        matched,
        "autotile pass finished"
    );
    results
}

/// Every cell of `layer` that holds `tile`'s own identity. A convenient input
/// for [`autotile_cells`] when re-tiling a whole layer.
pub fn cells_of(tile: &RuleTile, snapshot: &RegistrySnapshot, layer: &LayerId) -> Vec<Cell> {
    let Some(layer) = snapshot.layer(layer) else {
        return Vec::new();
    };
    let mut cells: Vec<Cell> = layer
        .iter()
        .filter(|(_, placed)| *placed == tile.self_tile)
        .map(|(cell, _)| cell)
        .collect();
    cells.sort();
    cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::{KindPalette, NeighborKind};
    use crate::rule::TilingRule;
    use crate::transform::TransformPolicy;
    use tilestack_core::{Layer, LayerRegistry};

    const SELF: TileId = TileId(1);
    const FLAT: TileId = TileId(11);
    const CENTER: TileId = TileId(20);
    const EDGE: TileId = TileId(21);
    const LONE: TileId = TileId(22);

    /// Center when surrounded left and right, edge when one side is open.
    fn ground_tile() -> RuleTile {
        RuleTile::new("Ground", SELF, LONE)
            .with_palette(KindPalette::new().with_flat_ground(FLAT))
            .with_rule(
                TilingRule::new("center", CENTER)
                    .with_neighbor((-1, 0), NeighborKind::This)
                    .with_neighbor((1, 0), NeighborKind::This),
            )
            .with_rule(
                TilingRule::new("edge", EDGE)
                    .with_neighbor((-1, 0), NeighborKind::This)
                    .with_neighbor((1, 0), NeighborKind::NotThis)
                    .with_policy(TransformPolicy::MirrorX),
            )
    }

    fn row_registry() -> LayerRegistry {
        let mut registry = LayerRegistry::new();
        registry.register(Layer::new("Base").with_tile((5, 5), FLAT));
        registry.register(
            Layer::new("Ground")
                .with_tile((0, 0), SELF)
                .with_tile((1, 0), SELF)
                .with_tile((2, 0), SELF)
                .with_tile((5, 5), SELF),
        );
        registry
    }

    #[test]
    fn select_returns_first_matching_rule() {
        let tile = ground_tile();
        let snapshot = row_registry().snapshot();

        let center = tile.select(&snapshot, Cell::new(1, 0)).unwrap();
        assert_eq!(center.rule_index, 0);
        assert_eq!(center.output, CENTER);
        assert_eq!(center.rule_id, tile.rules[0].id);

        let right = tile.select(&snapshot, Cell::new(2, 0)).unwrap();
        assert_eq!((right.rule_index, right.transform), (1, Transform::Identity));

        let left = tile.select(&snapshot, Cell::new(0, 0)).unwrap();
        assert_eq!((left.rule_index, left.transform), (1, Transform::MirrorX));

        assert_eq!(tile.select(&snapshot, Cell::new(5, 5)), None);
    }

    #[test]
    fn resolve_falls_back_to_default_output() {
        let tile = ground_tile();
        let snapshot = row_registry().snapshot();

        let lone = tile.resolve(&snapshot, Cell::new(5, 5));
        assert_eq!(lone.output, LONE);
        assert_eq!(lone.transform, Transform::Identity);
        assert!(lone.matched.is_none());
    }

    #[test]
    fn autotile_pass_over_a_layer() {
        let tile = ground_tile();
        let snapshot = row_registry().snapshot();
        let cells = cells_of(&tile, &snapshot, &"Ground".into());
        assert_eq!(
            cells,
            vec![Cell::new(0, 0), Cell::new(1, 0), Cell::new(2, 0), Cell::new(5, 5)]
        );

        let outputs: Vec<(TileId, Transform)> = autotile_cells(&tile, &snapshot, cells)
            .into_iter()
            .map(|r| (r.resolution.output, r.resolution.transform))
            .collect();
        assert_eq!(
            outputs,
            vec![
                (EDGE, Transform::MirrorX),
                (CENTER, Transform::Identity),
                (EDGE, Transform::Identity),
                (LONE, Transform::Identity),
            ]
        );
    }

    #[test]
    fn cells_of_unknown_layer_is_empty() {
        let tile = ground_tile();
        let snapshot = row_registry().snapshot();
        assert!(cells_of(&tile, &snapshot, &"Nope".into()).is_empty());
    }

    #[test]
    fn pass_sees_a_stable_snapshot() {
        let tile = ground_tile();
        let mut registry = row_registry();
        let snapshot = registry.snapshot();

        // Editing the registry mid-pass does not leak into the held snapshot.
        registry.set_tile(&"Ground".into(), Cell::new(3, 0), Some(SELF));
        let before = tile.resolve(&snapshot, Cell::new(2, 0));
        let after = tile.resolve(&registry.snapshot(), Cell::new(2, 0));

        assert_eq!(before.output, EDGE);
        assert_eq!(after.output, CENTER);
    }
}
