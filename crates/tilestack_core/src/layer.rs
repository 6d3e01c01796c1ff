//! Sparse tile layers

use crate::cell::{Cell, TileId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Name that identifies a layer within a registry
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerId(pub String);

impl LayerId {
    pub fn new(name: impl Into<String>) -> Self {
        LayerId(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for LayerId {
    fn from(name: &str) -> Self {
        LayerId(name.to_string())
    }
}

impl From<String> for LayerId {
    fn from(name: String) -> Self {
        LayerId(name)
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A named sparse grid of tiles.
///
/// Cells that were never set, or were cleared, are empty. There are no bounds:
/// any `Cell` can be queried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layer {
    pub id: LayerId,
    tiles: HashMap<Cell, TileId>,
}

impl Layer {
    /// Create an empty layer
    pub fn new(id: impl Into<LayerId>) -> Self {
        Self {
            id: id.into(),
            tiles: HashMap::new(),
        }
    }

    /// Builder-style tile placement
    pub fn with_tile(mut self, cell: impl Into<Cell>, tile: TileId) -> Self {
        self.set_tile(cell.into(), Some(tile));
        self
    }

    /// Get the tile at `cell`, or `None` if the cell is empty
    pub fn get_tile(&self, cell: Cell) -> Option<TileId> {
        self.tiles.get(&cell).copied()
    }

    /// Set or clear a cell. Returns the previous tile.
    pub fn set_tile(&mut self, cell: Cell, tile: Option<TileId>) -> Option<TileId> {
        match tile {
            Some(tile) => self.tiles.insert(cell, tile),
            None => self.tiles.remove(&cell),
        }
    }

    /// Number of non-empty cells
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Iterate over non-empty cells in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (Cell, TileId)> + '_ {
        self.tiles.iter().map(|(cell, tile)| (*cell, *tile))
    }
}

impl Extend<(Cell, TileId)> for Layer {
    fn extend<T: IntoIterator<Item = (Cell, TileId)>>(&mut self, iter: T) {
        self.tiles.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_layer_is_empty() {
        let layer = Layer::new("Ground");

        assert_eq!(layer.id.as_str(), "Ground");
        assert!(layer.is_empty());
        assert_eq!(layer.get_tile(Cell::new(0, 0)), None);
        assert_eq!(layer.get_tile(Cell::new(-500, 9000)), None);
    }

    #[test]
    fn test_set_and_clear_tile() {
        let mut layer = Layer::new("Ground");
        let cell = Cell::new(2, -3);

        assert_eq!(layer.set_tile(cell, Some(TileId(7))), None);
        assert_eq!(layer.get_tile(cell), Some(TileId(7)));
        assert_eq!(layer.set_tile(cell, Some(TileId(8))), Some(TileId(7)));
        assert_eq!(layer.len(), 1);

        assert_eq!(layer.set_tile(cell, None), Some(TileId(8)));
        assert!(layer.is_empty());
    }

    #[test]
    fn test_with_tile_and_extend() {
        let mut layer = Layer::new("Decor").with_tile((0, 0), TileId(1));
        layer.extend([(Cell::new(1, 0), TileId(2)), (Cell::new(0, 1), TileId(3))]);

        assert_eq!(layer.len(), 3);
        let mut cells: Vec<_> = layer.iter().collect();
        cells.sort();
        assert_eq!(
            cells,
            vec![
                (Cell::new(0, 0), TileId(1)),
                (Cell::new(0, 1), TileId(3)),
                (Cell::new(1, 0), TileId(2)),
            ]
        );
    }
}
