use crate::math::{point::Point, vector::Vector};

use super::Shape;

/// One boundary segment of a shape, from vertex `index` to vertex `index + 1`.
///
/// The world end points are derived on demand through the owning shape, `cache_world` stores
/// them and `clear` drops the stored values after the shape moved.
#[derive(Clone, Debug)]
pub struct Edge<'s> {
    shape: &'s Shape<'s>,
    index: usize,
    start: Point,
    end: Point,
    world_start: Option<Point>,
    world_end: Option<Point>,
}

impl<'s> Edge<'s> {
    pub(crate) fn new(shape: &'s Shape<'s>, index: usize, start: Point, end: Point) -> Self {
        Self {
            shape,
            index,
            start,
            end,
            world_start: None,
            world_end: None,
        }
    }

    #[inline]
    pub fn shape(&self) -> &'s Shape<'s> {
        self.shape
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn start(&self) -> Point {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Point {
        self.end
    }

    #[inline]
    pub fn vector(&self) -> Vector {
        self.end - self.start
    }

    // outward for a counterclockwise boundary
    pub fn normal(&self) -> Vector {
        (!self.vector()).try_normalize().unwrap_or_default()
    }

    pub fn world_start(&self) -> Point {
        self.world_start
            .unwrap_or_else(|| self.shape.to_world(&self.start))
    }

    pub fn world_end(&self) -> Point {
        self.world_end
            .unwrap_or_else(|| self.shape.to_world(&self.end))
    }

    pub fn world_vector(&self) -> Vector {
        self.world_end() - self.world_start()
    }

    pub fn cache_world(&mut self) {
        self.world_start = Some(self.world_start());
        self.world_end = Some(self.world_end());
    }

    pub fn is_cached(&self) -> bool {
        self.world_start.is_some() && self.world_end.is_some()
    }

    pub fn clear(&mut self) {
        self.world_start = None;
        self.world_end = None;
    }
}
