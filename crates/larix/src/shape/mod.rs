use std::rc::Rc;

use larix_macro_tools::Fields;
use thiserror::Error;

use crate::{
    collision::{minkowski::Minkowski as MinkowskiQuery, support::SupportPoint},
    math::{axis::AxisDirection, point::Point, vector::Vector, FloatNum},
    meta::{Meta, Transform},
};

pub mod circle;
pub mod edge;
pub mod plane;
pub mod polygon;

pub use circle::{Circle, CircleSegmentInfo};
pub use edge::Edge;
pub use plane::Plane;
pub use polygon::Polygon;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ShapeKind {
    Plane,
    Circle,
    Polygon,
    Aabb,
    Triangle,
    Minkowski,
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ShapeError {
    #[error("polygon needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),
    #[error("edge {0} of polygon has zero length")]
    DegenerateEdge(usize),
    #[error("polygon vertices must be in counterclockwise order")]
    ClockwiseWinding,
    #[error("polygon is not convex at vertex {0}")]
    NotConvex(usize),
}

/// Two shapes combined into their Minkowski difference, or sum when `is_sum` is set.
///
/// It only exists to compose support queries and lives in world space.
#[derive(Clone, Copy, Debug)]
pub struct MinkowskiShape<'a> {
    pub first: &'a Shape<'a>,
    pub second: &'a Shape<'a>,
    pub is_sum: bool,
}

#[derive(Clone, Debug)]
pub enum ShapeGeometry<'a> {
    Plane(Plane),
    Circle(Circle),
    Polygon(Polygon),
    Aabb(Polygon),
    Triangle(Polygon),
    Minkowski(MinkowskiShape<'a>),
}

/// World space axis aligned bounds.
#[derive(Clone, Copy, Debug, PartialEq, Fields)]
#[r(copy)]
pub struct BoundingBox {
    min: Point,
    max: Point,
}

impl BoundingBox {
    pub fn new(min: impl Into<Point>, max: impl Into<Point>) -> Self {
        Self {
            min: min.into(),
            max: max.into(),
        }
    }

    // touching boxes overlap
    pub fn overlaps(&self, other: &BoundingBox) -> bool {
        self.min.x() <= other.max.x()
            && other.min.x() <= self.max.x()
            && self.min.y() <= other.max.y()
            && other.min.y() <= self.max.y()
    }

    pub fn contains(&self, point: &Point) -> bool {
        (self.min.x()..=self.max.x()).contains(&point.x())
            && (self.min.y()..=self.max.y()).contains(&point.y())
    }
}

/// A convex shape attached to a rigid body.
///
/// Geometry is stored in local space, [`Meta`] carries the body transform and mass written by
/// the integrator. Support queries take local directions and return local points, the world
/// point of a [`SupportPoint`] is derived through this shape.
#[derive(Clone, Debug, Fields)]
#[r]
pub struct Shape<'a> {
    #[w]
    meta: Meta,
    #[w]
    geometry: ShapeGeometry<'a>,
}

impl<'a> Shape<'a> {
    pub fn new(geometry: ShapeGeometry<'a>) -> Self {
        Self {
            meta: Meta::default(),
            geometry,
        }
    }

    pub fn with_meta(mut self, meta: impl Into<Meta>) -> Self {
        self.meta = meta.into();
        self
    }

    pub fn circle(
        center: impl Into<Point>,
        radius: FloatNum,
        segments: Rc<CircleSegmentInfo>,
    ) -> Self {
        Self::new(ShapeGeometry::Circle(Circle::new(center, radius, segments)))
    }

    pub fn polygon(vertices: impl Into<Vec<Point>>) -> Self {
        Self::new(ShapeGeometry::Polygon(Polygon::new(vertices)))
    }

    pub fn try_polygon(
        vertices: impl Into<Vec<Point>>,
        epsilon: FloatNum,
    ) -> Result<Self, ShapeError> {
        Ok(Self::new(ShapeGeometry::Polygon(Polygon::try_new(
            vertices, epsilon,
        )?)))
    }

    pub fn aabb(half_extents: impl Into<Vector>) -> Self {
        let half_extents = half_extents.into();
        Self::new(ShapeGeometry::Aabb(Polygon::aabb(
            half_extents.x(),
            half_extents.y(),
        )))
    }

    pub fn rect(width: FloatNum, height: FloatNum) -> Self {
        Self::new(ShapeGeometry::Aabb(Polygon::rect(width, height)))
    }

    pub fn triangle(a: impl Into<Point>, b: impl Into<Point>, c: impl Into<Point>) -> Self {
        Self::new(ShapeGeometry::Triangle(Polygon::triangle(a, b, c)))
    }

    pub fn regular_polygon(edge_count: usize, radius: FloatNum) -> Self {
        Self::new(ShapeGeometry::Polygon(Polygon::regular(edge_count, radius)))
    }

    pub fn plane(normal: impl Into<Vector>, distance: FloatNum) -> Self {
        Self::new(ShapeGeometry::Plane(Plane::new(normal, distance)))
    }

    pub fn minkowski(first: &'a Shape<'a>, second: &'a Shape<'a>, is_sum: bool) -> Self {
        Self::new(ShapeGeometry::Minkowski(MinkowskiShape {
            first,
            second,
            is_sum,
        }))
    }

    pub fn kind(&self) -> ShapeKind {
        use ShapeGeometry::*;
        match &self.geometry {
            Plane(_) => ShapeKind::Plane,
            Circle(_) => ShapeKind::Circle,
            Polygon(_) => ShapeKind::Polygon,
            Aabb(_) => ShapeKind::Aabb,
            Triangle(_) => ShapeKind::Triangle,
            Minkowski(_) => ShapeKind::Minkowski,
        }
    }

    /// Minkowski shapes already live in world space, their transform is the identity.
    #[inline]
    pub fn is_world(&self) -> bool {
        matches!(self.geometry, ShapeGeometry::Minkowski(_))
    }

    #[inline]
    pub fn transform(&self) -> &Transform {
        self.meta.transform()
    }

    #[inline]
    pub fn inv_mass(&self) -> FloatNum {
        self.meta.inv_mass()
    }

    #[inline]
    pub fn is_static(&self) -> bool {
        self.meta.is_static()
    }

    pub fn to_world(&self, local_point: &Point) -> Point {
        if self.is_world() {
            *local_point
        } else {
            self.transform().to_world(local_point)
        }
    }

    pub fn to_local(&self, world_point: &Point) -> Point {
        if self.is_world() {
            *world_point
        } else {
            self.transform().to_local(world_point)
        }
    }

    pub fn to_world_vector(&self, local_vector: &Vector) -> Vector {
        if self.is_world() {
            *local_vector
        } else {
            self.transform().to_world_vector(local_vector)
        }
    }

    pub fn to_local_vector(&self, world_vector: &Vector) -> Vector {
        if self.is_world() {
            *world_vector
        } else {
            self.transform().to_local_vector(world_vector)
        }
    }

    /// Number of boundary vertices, a circle reports its segment count.
    ///
    /// # Panics
    ///
    /// Planes and Minkowski shapes have no vertex list.
    pub fn vertex_count(&self) -> usize {
        use ShapeGeometry::*;
        match &self.geometry {
            Circle(circle) => circle.segment_count(),
            Polygon(polygon) | Aabb(polygon) | Triangle(polygon) => polygon.len(),
            Plane(_) => panic!("can't iterate the vertices of a plane"),
            Minkowski(_) => panic!("can't iterate the vertices of a minkowski shape"),
        }
    }

    /// Local vertex, the index wraps around.
    pub fn vertex(&self, index: usize) -> Point {
        use ShapeGeometry::*;
        match &self.geometry {
            Circle(circle) => circle.vertex(index),
            Polygon(polygon) | Aabb(polygon) | Triangle(polygon) => polygon.vertex(index),
            Plane(_) => panic!("can't iterate the vertices of a plane"),
            Minkowski(_) => panic!("can't iterate the vertices of a minkowski shape"),
        }
    }

    pub fn edge(&self, index: usize) -> Edge<'_> {
        use ShapeGeometry::*;
        let (start, end) = match &self.geometry {
            Circle(circle) => {
                let start = circle.vertex(index);
                (start, start + circle.edge_vector(index))
            }
            Polygon(polygon) | Aabb(polygon) | Triangle(polygon) => {
                (polygon.vertex(index), polygon.vertex(index + 1))
            }
            Plane(_) => panic!("can't iterate the edges of a plane"),
            Minkowski(_) => panic!("can't iterate the edges of a minkowski shape"),
        };
        Edge::new(self, index % self.vertex_count(), start, end)
    }

    pub fn edges<'s>(&'s self) -> impl Iterator<Item = Edge<'s>> + 's {
        let shape: &'s Shape<'s> = self;
        (0..shape.vertex_count()).map(move |i| shape.edge(i))
    }

    #[inline]
    pub fn support(&self, direction: &Vector) -> SupportPoint<'_> {
        self.support_relative_to(direction, None)
    }

    /// Support point along a local `direction`.
    ///
    /// `reference` is only read by planes: the point of `reference` reaching deepest against
    /// the plane is projected onto it. A plane without reference returns the empty support point.
    pub fn support_relative_to(
        &self,
        direction: &Vector,
        reference: Option<&Shape<'_>>,
    ) -> SupportPoint<'_> {
        if !direction.is_finite() {
            return SupportPoint::empty();
        }

        use ShapeGeometry::*;
        match &self.geometry {
            Circle(circle) => {
                let (index, point) = circle.support(direction);
                SupportPoint::new(self, point, *direction, Some(index))
            }
            Polygon(polygon) | Aabb(polygon) | Triangle(polygon) => {
                match polygon.support(direction) {
                    Some((index, point)) => SupportPoint::new(self, point, *direction, Some(index)),
                    None => SupportPoint::empty(),
                }
            }
            Plane(plane) => {
                let Some(reference) = reference else {
                    return SupportPoint::empty();
                };
                let world_normal = self.to_world_vector(&plane.normal());
                let Some(deepest) = reference.world_support(&-world_normal).world_point() else {
                    return SupportPoint::empty();
                };
                let point = plane.project(&self.to_local(&deepest));
                SupportPoint::new(self, point, *direction, None)
            }
            Minkowski(minkowski) => {
                let point = MinkowskiQuery::point(
                    minkowski.first,
                    minkowski.second,
                    direction,
                    minkowski.is_sum,
                )
                .ok()
                .and_then(|point| point.world_point());
                match point {
                    Some(point) => SupportPoint::new(self, point, *direction, None),
                    None => SupportPoint::empty(),
                }
            }
        }
    }

    /// Same as [`Shape::support`], writing into a caller owned result.
    pub fn support_into<'s>(&'s self, direction: &Vector, result: &mut SupportPoint<'s>) {
        *result = self.support(direction);
    }

    /// Support point along a world direction.
    pub fn world_support(&self, world_direction: &Vector) -> SupportPoint<'_> {
        self.support(&self.to_local_vector(world_direction))
            .with_world_direction(*world_direction)
    }

    /// World interval covered along `axis`, `None` for unbounded shapes.
    pub fn projection_on_axis(&self, axis: AxisDirection) -> Option<(FloatNum, FloatNum)> {
        use AxisDirection::*;
        let pick = |p: Point| match axis {
            X => p.x(),
            Y => p.y(),
        };

        match &self.geometry {
            ShapeGeometry::Plane(_) => None,
            ShapeGeometry::Circle(circle) => {
                let center = pick(self.to_world(&circle.center()));
                Some((center - circle.radius(), center + circle.radius()))
            }
            _ => {
                let axis_vector: Vector = axis.into();
                let max = self.world_support(&axis_vector).world_point()?;
                let min = self.world_support(&-axis_vector).world_point()?;
                Some((pick(min), pick(max)))
            }
        }
    }

    pub fn world_aabb(&self) -> Option<BoundingBox> {
        let (min_x, max_x) = self.projection_on_axis(AxisDirection::X)?;
        let (min_y, max_y) = self.projection_on_axis(AxisDirection::Y)?;
        Some(BoundingBox::new((min_x, min_y), (max_x, max_y)))
    }
}
