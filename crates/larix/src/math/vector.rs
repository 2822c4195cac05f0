use super::{point::Point, FloatNum};
use std::{
    cmp::Ordering,
    fmt::Display,
    ops::{Add, AddAssign, BitXor, Div, Mul, MulAssign, Neg, Not, Sub, SubAssign},
};

/// A direction (w = 0). Directions are not moved by translation,
/// see [`Point`] for the position counterpart.
#[derive(Clone, Debug, Copy, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vector {
    pub(crate) x: FloatNum,
    pub(crate) y: FloatNum,
}

impl Display for Vector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&format!("{{ x: {}, y: {} }}", self.x, self.y))
    }
}

impl PartialEq for Vector {
    fn eq(&self, other: &Self) -> bool {
        (self.x - other.x).abs() < FloatNum::EPSILON && (self.y - other.y).abs() < FloatNum::EPSILON
    }
}

impl Vector {
    #[inline]
    pub const fn new(x: FloatNum, y: FloatNum) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn x(&self) -> FloatNum {
        self.x
    }

    #[inline]
    pub fn y(&self) -> FloatNum {
        self.y
    }

    #[inline]
    pub fn set_x(&mut self, reducer: impl FnOnce(FloatNum) -> FloatNum) {
        self.x = reducer(self.x);
    }

    #[inline]
    pub fn set_y(&mut self, reducer: impl FnOnce(FloatNum) -> FloatNum) {
        self.y = reducer(self.y);
    }

    #[inline]
    pub fn to_point(&self) -> Point {
        (self.x, self.y).into()
    }

    #[inline]
    pub fn abs(&self) -> FloatNum {
        self.x.hypot(self.y)
    }

    #[inline]
    pub fn abs_squared(&self) -> FloatNum {
        *self * *self
    }

    /// the length of the result is one, a zero vector produces NaN
    #[inline]
    pub fn normalize(&self) -> Vector {
        let shrink = self.abs().recip();
        (self.x * shrink, self.y * shrink).into()
    }

    pub fn try_normalize(&self) -> Option<Vector> {
        let len = self.abs();
        if len <= FloatNum::EPSILON || !len.is_finite() {
            return None;
        }
        Some(*self / len)
    }

    /// rotate counterclockwise by `rad`
    #[inline]
    pub fn rotate(&self, rad: FloatNum) -> Vector {
        let (s, c) = rad.sin_cos();
        self.rotate_by(c, s)
    }

    /// rotate counterclockwise using a precomputed cosine and sine
    #[inline]
    pub fn rotate_by(&self, cos: FloatNum, sin: FloatNum) -> Vector {
        let new_x = self.x * cos - self.y * sin;
        let new_y = self.x * sin + self.y * cos;
        (new_x, new_y).into()
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.x == 0. && self.y == 0.
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    #[inline]
    pub fn set_zero(&mut self) {
        self.x = 0.;
        self.y = 0.;
    }

    // 0 for angles in [0, PI), 1 for [PI, TAU)
    #[inline]
    fn half_plane(&self) -> u8 {
        if self.y > 0. || (self.y == 0. && self.x >= 0.) {
            0
        } else {
            1
        }
    }

    /// Order two directions by their polar angle in `[0, TAU)` without calling `atan2`.
    ///
    /// Directions are first split by half plane, then ordered by the sign of their cross product.
    pub fn cmp_angle(&self, other: &Vector) -> Ordering {
        self.half_plane().cmp(&other.half_plane()).then_with(|| {
            let cross = *self ^ *other;
            if cross > 0. {
                Ordering::Less
            } else if cross < 0. {
                Ordering::Greater
            } else {
                Ordering::Equal
            }
        })
    }
}

impl From<(FloatNum, FloatNum)> for Vector {
    fn from((x, y): (FloatNum, FloatNum)) -> Self {
        Self { x, y }
    }
}

impl From<[FloatNum; 2]> for Vector {
    fn from([x, y]: [FloatNum; 2]) -> Self {
        Self { x, y }
    }
}

// vector from p1 to p2
impl From<(Point, Point)> for Vector {
    fn from((p1, p2): (Point, Point)) -> Self {
        p2 - p1
    }
}

impl From<(&Point, &Point)> for Vector {
    fn from((p1, p2): (&Point, &Point)) -> Self {
        *p2 - *p1
    }
}

impl From<Vector> for (FloatNum, FloatNum) {
    fn from(value: Vector) -> Self {
        (value.x, value.y)
    }
}

impl Add for Vector {
    type Output = Self;
    fn add(self, rhs: Vector) -> Self::Output {
        (self.x + rhs.x, self.y + rhs.y).into()
    }
}

impl Add<&Vector> for Vector {
    type Output = Self;
    fn add(self, rhs: &Vector) -> Self::Output {
        self + *rhs
    }
}

impl AddAssign for Vector {
    fn add_assign(&mut self, rhs: Vector) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vector {
    type Output = Self;
    fn sub(self, rhs: Vector) -> Self::Output {
        (self.x - rhs.x, self.y - rhs.y).into()
    }
}

impl Sub<&Vector> for Vector {
    type Output = Self;
    fn sub(self, rhs: &Vector) -> Self::Output {
        self - *rhs
    }
}

impl SubAssign for Vector {
    fn sub_assign(&mut self, rhs: Vector) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

// dot product
impl Mul for Vector {
    type Output = FloatNum;
    fn mul(self, rhs: Vector) -> Self::Output {
        (self.x * rhs.x) + (self.y * rhs.y)
    }
}

impl Mul<FloatNum> for Vector {
    type Output = Vector;
    fn mul(self, rhs: FloatNum) -> Self::Output {
        (self.x * rhs, self.y * rhs).into()
    }
}

impl MulAssign<FloatNum> for Vector {
    fn mul_assign(&mut self, rhs: FloatNum) {
        self.x *= rhs;
        self.y *= rhs;
    }
}

impl Div<FloatNum> for Vector {
    type Output = Vector;
    fn div(self, rhs: FloatNum) -> Self::Output {
        (self.x / rhs, self.y / rhs).into()
    }
}

impl Neg for Vector {
    type Output = Self;
    fn neg(self) -> Self::Output {
        (-self.x, -self.y).into()
    }
}

// right perpendicular, the outward normal direction of a counterclockwise edge
impl Not for Vector {
    type Output = Self;
    fn not(self) -> Self::Output {
        Self {
            x: self.y,
            y: -self.x,
        }
    }
}

// z of the cross product
impl BitXor for Vector {
    type Output = FloatNum;
    fn bitxor(self, rhs: Self) -> Self::Output {
        self.x * rhs.y - self.y * rhs.x
    }
}
