use std::ops::{Index, IndexMut};

use slab::Slab;

use crate::shape::Shape;

/// Key of a shape inside a [`ShapeStore`]. Keys of removed shapes are reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShapeHandle(usize);

impl ShapeHandle {
    #[inline]
    pub fn index(&self) -> usize {
        self.0
    }
}

impl From<usize> for ShapeHandle {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

/**
 * ShapeStore owns every shape of a scene, addressed by handle
 */
#[derive(Clone, Debug, Default)]
pub struct ShapeStore {
    shapes: Slab<Shape<'static>>,
}

impl Index<ShapeHandle> for ShapeStore {
    type Output = Shape<'static>;
    fn index(&self, handle: ShapeHandle) -> &Self::Output {
        &self.shapes[handle.0]
    }
}

impl IndexMut<ShapeHandle> for ShapeStore {
    fn index_mut(&mut self, handle: ShapeHandle) -> &mut Self::Output {
        &mut self.shapes[handle.0]
    }
}

impl ShapeStore {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            shapes: Slab::with_capacity(capacity),
        }
    }

    pub fn insert(&mut self, shape: Shape<'static>) -> ShapeHandle {
        ShapeHandle(self.shapes.insert(shape))
    }

    pub fn remove(&mut self, handle: ShapeHandle) -> Option<Shape<'static>> {
        self.shapes.try_remove(handle.0)
    }

    #[inline]
    pub fn contains(&self, handle: ShapeHandle) -> bool {
        self.shapes.contains(handle.0)
    }

    #[inline]
    pub fn get(&self, handle: ShapeHandle) -> Option<&Shape<'static>> {
        self.shapes.get(handle.0)
    }

    #[inline]
    pub fn get_mut(&mut self, handle: ShapeHandle) -> Option<&mut Shape<'static>> {
        self.shapes.get_mut(handle.0)
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn handles(&self) -> impl Iterator<Item = ShapeHandle> + '_ {
        self.shapes.iter().map(|(key, _)| ShapeHandle(key))
    }

    pub fn iter(&self) -> impl Iterator<Item = (ShapeHandle, &Shape<'static>)> {
        self.shapes.iter().map(|(key, shape)| (ShapeHandle(key), shape))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (ShapeHandle, &mut Shape<'static>)> {
        self.shapes
            .iter_mut()
            .map(|(key, shape)| (ShapeHandle(key), shape))
    }

    pub fn clear(&mut self) {
        self.shapes.clear();
    }
}
