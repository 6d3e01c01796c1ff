//! Tile lookup across registered layers
//!
//! All lookups are pure reads on a [`RegistrySnapshot`]. An unknown layer or an
//! empty cell is reported as "no tile", never as an error.

use crate::cell::{Cell, TileId};
use crate::layer::LayerId;
use crate::registry::RegistrySnapshot;

/// The distinct tiles found at one cell.
///
/// Tiles are kept in first-occurrence order of the registry scan, with
/// duplicates collapsed. Cells are rarely covered by more than a handful of
/// layers, so this is a plain vector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TileSet {
    tiles: Vec<TileId>,
}

impl TileSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tile unless it is already present. Returns `true` if added.
    pub fn insert(&mut self, tile: TileId) -> bool {
        if self.tiles.contains(&tile) {
            return false;
        }
        self.tiles.push(tile);
        true
    }

    pub fn contains(&self, tile: TileId) -> bool {
        self.tiles.contains(&tile)
    }

    /// The first tile in scan order
    pub fn first(&self) -> Option<TileId> {
        self.tiles.first().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = TileId> + '_ {
        self.tiles.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn as_slice(&self) -> &[TileId] {
        &self.tiles
    }
}

impl From<Option<TileId>> for TileSet {
    fn from(tile: Option<TileId>) -> Self {
        Self {
            tiles: tile.into_iter().collect(),
        }
    }
}

impl FromIterator<TileId> for TileSet {
    fn from_iter<I: IntoIterator<Item = TileId>>(iter: I) -> Self {
        let mut set = TileSet::new();
        for tile in iter {
            set.insert(tile);
        }
        set
    }
}

impl RegistrySnapshot {
    /// Tile at `cell` in one layer. `None` if the layer is unknown or the cell
    /// is empty.
    pub fn tile_in_layer(&self, layer: &LayerId, cell: Cell) -> Option<TileId> {
        self.layer(layer)?.get_tile(cell)
    }

    /// First non-empty tile at `cell`, scanning layers in registry order and
    /// skipping `exclude` if given.
    pub fn first_tile_at(&self, cell: Cell, exclude: Option<&LayerId>) -> Option<TileId> {
        self.layers()
            .filter(|layer| Some(&layer.id) != exclude)
            .find_map(|layer| layer.get_tile(cell))
    }

    /// Every distinct tile at `cell` across all registered layers.
    pub fn all_tiles_at(&self, cell: Cell) -> TileSet {
        self.layers().filter_map(|layer| layer.get_tile(cell)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::Layer;
    use rand::rngs::SmallRng;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;
    use std::collections::BTreeSet;

    fn sample_layers() -> Vec<Layer> {
        vec![
            Layer::new("Base").with_tile((0, 0), TileId(1)).with_tile((1, 0), TileId(1)),
            Layer::new("Cliffs").with_tile((0, 0), TileId(2)),
            Layer::new("Decor")
                .with_tile((0, 0), TileId(1))
                .with_tile((2, 0), TileId(3)),
        ]
    }

    #[test]
    fn test_tile_in_layer() {
        let snapshot = RegistrySnapshot::from_layers(sample_layers());

        assert_eq!(snapshot.tile_in_layer(&"Cliffs".into(), Cell::ZERO), Some(TileId(2)));
        assert_eq!(snapshot.tile_in_layer(&"Cliffs".into(), Cell::new(1, 0)), None);
        assert_eq!(snapshot.tile_in_layer(&"Missing".into(), Cell::ZERO), None);
    }

    #[test]
    fn test_first_tile_at_scans_in_order() {
        let snapshot = RegistrySnapshot::from_layers(sample_layers());

        assert_eq!(snapshot.first_tile_at(Cell::ZERO, None), Some(TileId(1)));
        assert_eq!(snapshot.first_tile_at(Cell::ZERO, Some(&"Base".into())), Some(TileId(2)));
        assert_eq!(snapshot.first_tile_at(Cell::new(2, 0), None), Some(TileId(3)));
        assert_eq!(snapshot.first_tile_at(Cell::new(2, 0), Some(&"Decor".into())), None);
        assert_eq!(snapshot.first_tile_at(Cell::new(9, 9), None), None);
    }

    #[test]
    fn test_all_tiles_at_collapses_duplicates() {
        let snapshot = RegistrySnapshot::from_layers(sample_layers());

        let tiles = snapshot.all_tiles_at(Cell::ZERO);
        assert_eq!(tiles.as_slice(), &[TileId(1), TileId(2)]);
        assert_eq!(tiles.first(), Some(TileId(1)));

        assert!(snapshot.all_tiles_at(Cell::new(-4, 4)).is_empty());
        assert!(RegistrySnapshot::default().all_tiles_at(Cell::ZERO).is_empty());
    }

    #[test]
    fn test_all_tiles_at_is_order_independent() {
        let reference = RegistrySnapshot::from_layers(sample_layers());
        let cells = [Cell::new(0, 0), Cell::new(1, 0), Cell::new(2, 0), Cell::new(3, 0)];
        let mut rng = SmallRng::seed_from_u64(7);

        for _ in 0..16 {
            let mut layers = sample_layers();
            layers.shuffle(&mut rng);
            let shuffled = RegistrySnapshot::from_layers(layers);

            for cell in cells {
                let expected: BTreeSet<_> = reference.all_tiles_at(cell).iter().collect();
                let actual: BTreeSet<_> = shuffled.all_tiles_at(cell).iter().collect();
                assert_eq!(expected, actual, "tile set differs at {cell}");
            }
        }
    }

    #[test]
    fn test_tile_set_from_option() {
        assert!(TileSet::from(None).is_empty());
        let set = TileSet::from(Some(TileId(4)));
        assert_eq!(set.len(), 1);
        assert!(set.contains(TileId(4)));
    }
}
