use larix_macro_tools::Fields;
use log::warn;

use crate::math::{point::Point, vector::Vector, FloatNum};

/// Unbounded half plane boundary: every point `p` on it satisfies `normal * p == distance`.
#[derive(Clone, Debug, Fields)]
#[r(copy)]
pub struct Plane {
    normal: Vector,
    distance: FloatNum,
}

impl Plane {
    pub fn new(normal: impl Into<Vector>, distance: FloatNum) -> Self {
        let normal: Vector = normal.into();
        let normal = normal.try_normalize().unwrap_or_else(|| {
            warn!("plane normal {} can't be normalized, fall back to +y", normal);
            Vector::new(0., 1.)
        });
        Self { normal, distance }
    }

    #[inline]
    pub fn signed_distance(&self, point: &Point) -> FloatNum {
        point.to_vector() * self.normal - self.distance
    }

    #[inline]
    pub fn project(&self, point: &Point) -> Point {
        *point - self.normal * self.signed_distance(point)
    }
}
