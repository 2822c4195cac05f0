use larix_macro_tools::{Builder, Deref, Fields};

use crate::math::{point::Point, vector::Vector, FloatNum};

pub type Mass = FloatNum;

/// Body placement written by the integrator, read by shapes.
///
/// A local point `p` maps to world space as `rotate(p) + translation`.
#[derive(Clone, Debug, Fields)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[r]
pub struct Transform {
    translation: Vector,
    rotation: FloatNum,
    #[r(skip)]
    cos: FloatNum,
    #[r(skip)]
    sin: FloatNum,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl From<(Vector, FloatNum)> for Transform {
    fn from((translation, rotation): (Vector, FloatNum)) -> Self {
        Self::new(translation, rotation)
    }
}

impl PartialEq for Transform {
    fn eq(&self, other: &Self) -> bool {
        self.translation == other.translation
            && (self.rotation - other.rotation).abs() < FloatNum::EPSILON
    }
}

impl Transform {
    pub fn new(translation: impl Into<Vector>, rotation: FloatNum) -> Self {
        let (sin, cos) = rotation.sin_cos();
        Self {
            translation: translation.into(),
            rotation,
            cos,
            sin,
        }
    }

    pub const fn identity() -> Self {
        Self {
            translation: Vector::new(0., 0.),
            rotation: 0.,
            cos: 1.,
            sin: 0.,
        }
    }

    pub fn is_identity(&self) -> bool {
        self.translation.is_zero() && self.rotation == 0.
    }

    /// the body position, the world location of the local origin
    #[inline]
    pub fn position(&self) -> Point {
        self.translation.to_point()
    }

    pub fn set_translation(&mut self, reducer: impl FnOnce(Vector) -> Vector) -> &mut Self {
        self.translation = reducer(self.translation);
        self
    }

    pub fn set_rotation(&mut self, reducer: impl FnOnce(FloatNum) -> FloatNum) -> &mut Self {
        self.rotation = reducer(self.rotation);
        (self.sin, self.cos) = self.rotation.sin_cos();
        self
    }

    #[inline]
    pub fn to_world(&self, local_point: &Point) -> Point {
        self.to_world_vector(&local_point.to_vector()).to_point() + self.translation
    }

    #[inline]
    pub fn to_local(&self, world_point: &Point) -> Point {
        self.to_local_vector(&(*world_point - self.translation).to_vector())
            .to_point()
    }

    // directions only rotate
    #[inline]
    pub fn to_world_vector(&self, local_vector: &Vector) -> Vector {
        local_vector.rotate_by(self.cos, self.sin)
    }

    #[inline]
    pub fn to_local_vector(&self, world_vector: &Vector) -> Vector {
        world_vector.rotate_by(self.cos, -self.sin)
    }
}

#[derive(Deref, Clone, Debug, Fields)]
struct ValueWithInv {
    #[deref]
    value: FloatNum,
    #[r]
    inv: FloatNum,
}

impl Default for ValueWithInv {
    fn default() -> Self {
        Self::new(1.)
    }
}

impl ValueWithInv {
    // a zero or infinite mass both mean immovable
    fn new(value: FloatNum) -> Self {
        let inv = if value == 0. || value.is_infinite() {
            0.
        } else {
            value.recip()
        };
        Self { value, inv }
    }

    fn from_inv(inv: FloatNum) -> Self {
        let value = if inv == 0. {
            FloatNum::INFINITY
        } else {
            inv.recip()
        };
        Self { value, inv }
    }

    fn set_value(&mut self, new_value: FloatNum) {
        *self = Self::new(new_value);
    }

    fn set_inv(&mut self, new_inv: FloatNum) {
        *self = Self::from_inv(new_inv);
    }
}

/// Rigid body state a shape reads from the integrator.
///
/// An inverse mass of zero marks the body as immovable.
#[derive(Clone, Debug, Fields, Builder)]
#[r]
pub struct Meta {
    #[w]
    transform: Transform,
    #[r(skip)]
    #[builder(skip)]
    mass: ValueWithInv,
}

impl Meta {
    pub fn mass(&self) -> Mass {
        *self.mass
    }

    pub fn inv_mass(&self) -> Mass {
        self.mass.inv()
    }

    pub fn set_mass(&mut self, mass: Mass) -> &mut Self {
        self.mass.set_value(mass);
        self
    }

    pub fn set_inv_mass(&mut self, inv_mass: Mass) -> &mut Self {
        self.mass.set_inv(inv_mass);
        self
    }

    pub fn is_static(&self) -> bool {
        self.inv_mass() == 0.
    }
}

impl MetaBuilder {
    pub fn mass(mut self, mass: Mass) -> Self {
        self.mass = ValueWithInv::new(mass);
        self
    }

    pub fn inv_mass(mut self, inv_mass: Mass) -> Self {
        self.mass = ValueWithInv::from_inv(inv_mass);
        self
    }

    pub fn fixed(self) -> Self {
        self.inv_mass(0.)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::pi;

    fn assert_point_eq(a: Point, b: Point) {
        assert!(
            (a.x() - b.x()).abs() < 1e-3 && (a.y() - b.y()).abs() < 1e-3,
            "{} != {}",
            a,
            b
        );
    }

    #[test]
    fn test_transform_to_world() {
        let transform = Transform::new((10., 0.), pi() * 0.5);
        assert_point_eq(transform.to_world(&(1., 0.).into()), (10., 1.).into());
        assert_point_eq(transform.to_local(&(10., 1.).into()), (1., 0.).into());
    }

    #[test]
    fn test_transform_round_trip() {
        let mut transform = Transform::new((-3., 7.5), 0.3);
        transform.set_rotation(|r| r + 1.1);
        transform.set_translation(|t| t + Vector::new(0.5, 0.5));

        for p in [(0., 0.), (1., 2.), (-4., 0.25), (100., -30.)] {
            let p: Point = p.into();
            assert_point_eq(transform.to_local(&transform.to_world(&p)), p);
        }
    }

    #[test]
    fn test_direction_ignore_translation() {
        let transform = Transform::new((100., 100.), 0.);
        let v = Vector::new(1., 2.);
        assert_eq!(transform.to_world_vector(&v), v);
    }

    #[test]
    fn test_meta_mass() {
        let meta: Meta = MetaBuilder::new().mass(4.).into();
        assert_eq!(meta.inv_mass(), 0.25);
        assert!(!meta.is_static());

        let meta = MetaBuilder::new().fixed().build();
        assert!(meta.is_static());
        assert!(meta.mass().is_infinite());

        let mut meta = Meta::default();
        assert_eq!(meta.mass(), 1.);
        meta.set_mass(FloatNum::INFINITY);
        assert!(meta.is_static());
    }
}
