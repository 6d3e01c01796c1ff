//! Registry of the layers that take part in cross-layer lookups
//!
//! The registry hands out immutable [`RegistrySnapshot`]s. Every mutation builds
//! a new snapshot (copy-on-write), so a snapshot taken before a matching pass
//! stays valid and unchanged for the whole pass, on any number of threads.

use crate::cell::{Cell, TileId};
use crate::layer::{Layer, LayerId};
use std::sync::Arc;
use tracing::debug;

/// An immutable, ordered view of the registered layers.
///
/// Layer ids are unique within a snapshot. Order is registration order and is
/// the scan order used by the lookup methods.
#[derive(Debug, Clone, Default)]
pub struct RegistrySnapshot {
    layers: Vec<Arc<Layer>>,
    base: Option<LayerId>,
}

impl RegistrySnapshot {
    /// Build a snapshot from layers in order. A later layer with an id that is
    /// already present replaces the earlier one in place.
    pub fn from_layers(layers: impl IntoIterator<Item = Layer>) -> Self {
        let mut snapshot = Self::default();
        for layer in layers {
            snapshot.insert(Arc::new(layer));
        }
        snapshot
    }

    /// Designate a base/background layer. An id that is not in the snapshot
    /// is ignored.
    pub fn with_base_layer(mut self, base: impl Into<LayerId>) -> Self {
        let base = base.into();
        if self.position(&base).is_some() {
            self.base = Some(base);
        }
        self
    }

    fn insert(&mut self, layer: Arc<Layer>) {
        match self.position(&layer.id) {
            Some(idx) => self.layers[idx] = layer,
            None => self.layers.push(layer),
        }
    }

    fn position(&self, id: &LayerId) -> Option<usize> {
        self.layers.iter().position(|l| &l.id == id)
    }

    /// Get a layer by id
    pub fn layer(&self, id: &LayerId) -> Option<&Layer> {
        self.layers.iter().find(|l| &l.id == id).map(|l| l.as_ref())
    }

    /// Iterate over layers in registry order
    pub fn layers(&self) -> impl Iterator<Item = &Layer> {
        self.layers.iter().map(|l| l.as_ref())
    }

    /// Ids of all layers in registry order
    pub fn layer_ids(&self) -> Vec<LayerId> {
        self.layers.iter().map(|l| l.id.clone()).collect()
    }

    /// The designated base/background layer, if any
    pub fn base_layer(&self) -> Option<&LayerId> {
        self.base.as_ref()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

/// Owner of the active layer set.
///
/// Readers call [`snapshot`](LayerRegistry::snapshot) once per pass and query
/// the snapshot; the registry itself does no tile math.
#[derive(Debug, Clone, Default)]
pub struct LayerRegistry {
    current: Arc<RegistrySnapshot>,
}

impl LayerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a layer at the end of the scan order. If a layer with the same
    /// id is already registered it is replaced at its current position.
    pub fn register(&mut self, layer: Layer) {
        debug!(layer = %layer.id, tiles = layer.len(), "registering layer");
        Arc::make_mut(&mut self.current).insert(Arc::new(layer));
    }

    /// Remove a layer. Returns it if it was registered.
    pub fn unregister(&mut self, id: &LayerId) -> Option<Layer> {
        let idx = self.current.position(id)?;
        let snapshot = Arc::make_mut(&mut self.current);
        let layer = snapshot.layers.remove(idx);
        if snapshot.base.as_ref() == Some(id) {
            snapshot.base = None;
        }
        debug!(layer = %id, "unregistered layer");
        Some(Arc::unwrap_or_clone(layer))
    }

    /// Replace the whole layer set at once. Readers holding the previous
    /// snapshot keep seeing it unchanged; the base designation is kept if the
    /// base layer is still present.
    pub fn clear_and_repopulate(&mut self, layers: impl IntoIterator<Item = Layer>) {
        let mut snapshot = RegistrySnapshot::from_layers(layers);
        snapshot.base = self
            .current
            .base
            .clone()
            .filter(|base| snapshot.position(base).is_some());
        debug!(layers = snapshot.len(), "registry repopulated");
        self.current = Arc::new(snapshot);
    }

    /// Designate (or clear) the base/background layer. Returns `false`, and
    /// leaves the designation unchanged, if `base` is not registered.
    pub fn set_base_layer(&mut self, base: Option<LayerId>) -> bool {
        if let Some(id) = &base {
            if self.current.position(id).is_none() {
                return false;
            }
        }
        Arc::make_mut(&mut self.current).base = base;
        true
    }

    /// Set or clear a single cell of a registered layer. Returns `false` if
    /// the layer is not registered.
    pub fn set_tile(&mut self, id: &LayerId, cell: Cell, tile: Option<TileId>) -> bool {
        let Some(idx) = self.current.position(id) else {
            return false;
        };
        let snapshot = Arc::make_mut(&mut self.current);
        Arc::make_mut(&mut snapshot.layers[idx]).set_tile(cell, tile);
        true
    }

    /// The current snapshot
    pub fn snapshot(&self) -> Arc<RegistrySnapshot> {
        Arc::clone(&self.current)
    }
}
