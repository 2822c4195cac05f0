use std::{
    collections::HashMap,
    hash::{Hash, Hasher},
};

use larix_macro_tools::Fields;
use log::trace;
use slab::Slab;

use crate::scene::store::{ShapeHandle, ShapeStore};

pub type PairId = usize;

/// Order independent identity of two shapes, the smaller handle comes first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PairKey(ShapeHandle, ShapeHandle);

impl PairKey {
    #[inline]
    pub fn new(a: ShapeHandle, b: ShapeHandle) -> Self {
        if a < b {
            Self(a, b)
        } else {
            Self(b, a)
        }
    }

    #[inline]
    pub fn get(&self) -> (ShapeHandle, ShapeHandle) {
        (self.0, self.1)
    }
}

/// Two distinct shapes that may collide. `(a, b)` and `(b, a)` are the same pair.
#[derive(Clone, Copy, Debug, Fields)]
#[r]
pub struct ShapePair {
    first: ShapeHandle,
    second: ShapeHandle,
}

impl PartialEq for ShapePair {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for ShapePair {}

impl Hash for ShapePair {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state)
    }
}

impl ShapePair {
    pub fn new(first: ShapeHandle, second: ShapeHandle) -> Self {
        Self { first, second }
    }

    #[inline]
    pub fn key(&self) -> PairKey {
        PairKey::new(self.first, self.second)
    }

    #[inline]
    pub fn contains(&self, shape: ShapeHandle) -> bool {
        self.first == shape || self.second == shape
    }

    /// the other member of the pair, `None` if `shape` isn't part of it
    pub fn other(&self, shape: ShapeHandle) -> Option<ShapeHandle> {
        if self.first == shape {
            Some(self.second)
        } else if self.second == shape {
            Some(self.first)
        } else {
            None
        }
    }
}

/// Every pair of registered shapes that is eligible for collision testing.
///
/// Pairs live in a slab. Each registered shape keeps the list of its pairs in a vector indexed
/// by handle, and a map keyed by [`PairKey`] finds the pair of two shapes. Pairs of two static
/// shapes are never created.
#[derive(Debug, Default)]
pub struct ShapePairManager {
    pairs: Slab<ShapePair>,
    shape_pairs: Vec<Option<Vec<PairId>>>,
    pair_map: HashMap<PairKey, PairId>,
}

impl ShapePairManager {
    pub fn new() -> Self {
        Self::default()
    }

    fn registered_pairs(&self, shape: ShapeHandle) -> Option<&Vec<PairId>> {
        self.shape_pairs.get(shape.index())?.as_ref()
    }

    /// Register `shape` and pair it with every shape registered before.
    ///
    /// Nothing happens when `shape` is already registered or missing from `shapes`.
    pub fn add_shape(&mut self, shape: ShapeHandle, shapes: &ShapeStore) {
        if self.contains_shape(shape) {
            return;
        }
        let Some(new_shape) = shapes.get(shape) else {
            return;
        };

        let registered: Vec<ShapeHandle> = self
            .shape_pairs
            .iter()
            .enumerate()
            .filter(|(_, ids)| ids.is_some())
            .map(|(index, _)| ShapeHandle::from(index))
            .collect();

        let mut own_pairs = Vec::new();

        for other in registered {
            let Some(other_shape) = shapes.get(other) else {
                continue;
            };

            if new_shape.is_static() && other_shape.is_static() {
                continue;
            }

            let pair = ShapePair::new(shape, other);
            let id = self.pairs.insert(pair);

            own_pairs.push(id);
            self.pair_map.insert(pair.key(), id);
            if let Some(Some(other_pairs)) = self.shape_pairs.get_mut(other.index()) {
                other_pairs.push(id);
            }

            trace!("add pair {} between {:?} and {:?}", id, shape, other);
        }

        let index = shape.index();
        if self.shape_pairs.len() <= index {
            self.shape_pairs.resize(index + 1, None);
        }
        self.shape_pairs[index] = Some(own_pairs);
    }

    /// Drop `shape` and every pair that references it. Unknown shapes are ignored.
    pub fn remove_shape(&mut self, shape: ShapeHandle) {
        let Some(ids) = self
            .shape_pairs
            .get_mut(shape.index())
            .and_then(|ids| ids.take())
        else {
            return;
        };

        for id in ids {
            let Some(pair) = self.pairs.try_remove(id) else {
                continue;
            };
            self.pair_map.remove(&pair.key());
            let Some(other) = pair.other(shape) else {
                continue;
            };

            if let Some(Some(other_pairs)) = self.shape_pairs.get_mut(other.index()) {
                other_pairs.retain(|&other_id| other_id != id);
            }

            trace!("remove pair {} between {:?} and {:?}", id, shape, other);
        }
    }

    pub fn contains_shape(&self, shape: ShapeHandle) -> bool {
        self.registered_pairs(shape).is_some()
    }

    pub fn pair(&self, a: ShapeHandle, b: ShapeHandle) -> Option<&ShapePair> {
        let id = self.pair_map.get(&PairKey::new(a, b))?;
        self.pairs.get(*id)
    }

    pub fn pairs_of(&self, shape: ShapeHandle) -> Option<impl Iterator<Item = &ShapePair> + '_> {
        let ids = self.registered_pairs(shape)?;
        Some(ids.iter().filter_map(|&id| self.pairs.get(id)))
    }

    pub fn pairs(&self) -> impl Iterator<Item = &ShapePair> + '_ {
        self.pairs.iter().map(|(_, pair)| pair)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn clear(&mut self) {
        self.pairs.clear();
        self.shape_pairs.clear();
        self.pair_map.clear();
    }
}
