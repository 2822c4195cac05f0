use larix_macro_tools::Fields;

use crate::{
    math::{point::Point, vector::Vector, FloatNum},
    shape::Shape,
};

/// Result of a support query on one shape.
///
/// An empty value (no shape, no point) stands for a failed query. The world point and the world
/// direction are derived from the owning shape unless they were stored explicitly; `clear`
/// drops the stored values so they follow the shape again after it moved.
#[derive(Clone, Debug, Default, Fields)]
#[r(copy)]
pub struct SupportPoint<'s> {
    shape: Option<&'s Shape<'s>>,
    local_point: Option<Point>,
    #[r(skip)]
    world_point: Option<Point>,
    direction: Vector,
    #[r(skip)]
    world_direction: Option<Vector>,
    index: Option<usize>,
    distance: FloatNum,
}

impl<'s> SupportPoint<'s> {
    #[inline]
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(
        shape: &'s Shape<'s>,
        local_point: Point,
        direction: Vector,
        index: Option<usize>,
    ) -> Self {
        Self {
            shape: Some(shape),
            local_point: Some(local_point),
            world_point: None,
            direction,
            world_direction: None,
            index,
            distance: local_point.to_vector() * direction,
        }
    }

    // a point without owning shape, local and world space coincide
    pub(crate) fn from_world(point: Point, direction: Vector) -> Self {
        Self {
            shape: None,
            local_point: Some(point),
            world_point: Some(point),
            direction,
            world_direction: Some(direction),
            index: None,
            distance: point.to_vector() * direction,
        }
    }

    pub fn with_world_direction(mut self, world_direction: Vector) -> Self {
        self.world_direction = Some(world_direction);
        self
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.shape.is_some() && self.local_point.is_some()
    }

    pub fn world_point(&self) -> Option<Point> {
        self.world_point.or_else(|| {
            let shape = self.shape?;
            self.local_point.map(|p| shape.to_world(&p))
        })
    }

    pub fn world_direction(&self) -> Option<Vector> {
        self.world_direction
            .or_else(|| self.shape.map(|shape| shape.to_world_vector(&self.direction)))
    }

    pub fn cache_world_point(&mut self) -> Option<Point> {
        self.world_point = self.world_point();
        self.world_point
    }

    pub fn is_cached(&self) -> bool {
        self.world_point.is_some()
    }

    pub fn clear(&mut self) {
        self.world_point = None;
        self.world_direction = None;
    }
}
