use larix_macro_tools::{Deref, Fields};
use log::debug;
use thiserror::Error;

use crate::{
    math::{point::Point, vector::Vector},
    scene::store::ShapeStore,
    shape::Shape,
};

use super::{pair::ShapePair, support::SupportPoint};

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MinkowskiError {
    #[error("first shape has no support point along the direction")]
    FirstShape,
    #[error("second shape has no support point along the direction")]
    SecondShape,
}

/// One vertex of the Minkowski difference (or sum) of two shapes.
///
/// Derefs to the combined support point, whose point is in world space and whose direction is
/// the queried world direction.
#[derive(Clone, Debug, Deref, Fields)]
pub struct MinkowskiPoint<'s> {
    #[deref]
    support: SupportPoint<'s>,
    #[r]
    support_a: SupportPoint<'s>,
    #[r]
    support_b: SupportPoint<'s>,
    #[r]
    is_sum: bool,
}

impl<'s> MinkowskiPoint<'s> {
    #[inline]
    pub fn shape_a(&self) -> Option<&'s Shape<'s>> {
        self.support_a.shape()
    }

    #[inline]
    pub fn shape_b(&self) -> Option<&'s Shape<'s>> {
        self.support_b.shape()
    }

    #[inline]
    pub fn index_a(&self) -> Option<usize> {
        self.support_a.index()
    }

    #[inline]
    pub fn index_b(&self) -> Option<usize> {
        self.support_b.index()
    }

    /// Local point on the first shape, looked up again from its vertex index when there is one.
    pub fn point_a(&self) -> Option<Point> {
        Self::lookup_point(&self.support_a)
    }

    pub fn point_b(&self) -> Option<Point> {
        Self::lookup_point(&self.support_b)
    }

    fn lookup_point(support: &SupportPoint<'s>) -> Option<Point> {
        match (support.shape(), support.index()) {
            (Some(shape), Some(index)) => Some(shape.vertex(index)),
            _ => support.local_point(),
        }
    }

    pub fn world_point_a(&self) -> Option<Point> {
        self.support_a.world_point()
    }

    pub fn world_point_b(&self) -> Option<Point> {
        self.support_b.world_point()
    }

    /// `a - b`, or `a + b` for a sum, recomputed from both supports.
    pub fn world_point(&self) -> Option<Point> {
        let a = self.world_point_a()?;
        let b = self.world_point_b()?;
        Some(combine(a, b, self.is_sum))
    }

    pub fn is_valid(&self) -> bool {
        self.support_a.is_valid()
            && self.support_b.is_valid()
            && self.world_point().is_some_and(|p| p.is_finite())
    }
}

#[inline]
fn combine(a: Point, b: Point, is_sum: bool) -> Point {
    if is_sum {
        a + b.to_vector()
    } else {
        (a - b).to_point()
    }
}

/// Support composition for two shapes.
pub struct Minkowski;

impl Minkowski {
    /// Support point of `first - second` (or `first + second`) along a world `direction`.
    ///
    /// The first shape is queried along `direction`, the second along `-direction` for a
    /// difference and along `direction` for a sum. Each shape is the reference of the other, so
    /// a plane on either side is resolved against its partner.
    pub fn point<'s>(
        first: &'s Shape<'s>,
        second: &'s Shape<'s>,
        direction: &Vector,
        is_sum: bool,
    ) -> Result<MinkowskiPoint<'s>, MinkowskiError> {
        let direction_a = *direction;
        let direction_b = if is_sum { *direction } else { -*direction };

        let mut support_a = first
            .support_relative_to(&first.to_local_vector(&direction_a), Some(second))
            .with_world_direction(direction_a);
        let Some(world_a) = support_a.cache_world_point() else {
            debug!(
                "{:?} shape has no support point along {}",
                first.kind(),
                direction_a
            );
            return Err(MinkowskiError::FirstShape);
        };

        let mut support_b = second
            .support_relative_to(&second.to_local_vector(&direction_b), Some(first))
            .with_world_direction(direction_b);
        let Some(world_b) = support_b.cache_world_point() else {
            debug!(
                "{:?} shape has no support point along {}",
                second.kind(),
                direction_b
            );
            return Err(MinkowskiError::SecondShape);
        };

        let world_point = combine(world_a, world_b, is_sum);

        Ok(MinkowskiPoint {
            support: SupportPoint::from_world(world_point, direction_a),
            support_a,
            support_b,
            is_sum,
        })
    }

    #[inline]
    pub fn difference<'s>(
        first: &'s Shape<'s>,
        second: &'s Shape<'s>,
        direction: &Vector,
    ) -> Result<MinkowskiPoint<'s>, MinkowskiError> {
        Self::point(first, second, direction, false)
    }

    #[inline]
    pub fn sum<'s>(
        first: &'s Shape<'s>,
        second: &'s Shape<'s>,
        direction: &Vector,
    ) -> Result<MinkowskiPoint<'s>, MinkowskiError> {
        Self::point(first, second, direction, true)
    }

    /// Difference point for a stored pair, `None` when a shape of the pair is gone.
    pub fn pair_point<'s>(
        shapes: &'s ShapeStore,
        pair: &ShapePair,
        direction: &Vector,
    ) -> Option<Result<MinkowskiPoint<'s>, MinkowskiError>> {
        let first = shapes.get(pair.first())?;
        let second = shapes.get(pair.second())?;
        Some(Self::difference(first, second, direction))
    }
}
