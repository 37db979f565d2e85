use std::{
    fmt::Display,
    ops::{Add, AddAssign, BitXor, Div, DivAssign, Mul, MulAssign, Neg, Not, Sub, SubAssign},
};

use super::{point::Point, FloatNum};

/// 2D vector.
///
/// Operators follow the usual conventions of this crate:
/// * `a * b` between two vectors is the dot product,
/// * `a ^ b` is the scalar 2D cross product `a.x * b.y - a.y * b.x`,
/// * `!a` is the perpendicular `(a.y, -a.x)`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vector {
    x: FloatNum,
    y: FloatNum,
}

impl Display for Vector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{ x: {}, y: {} }}", self.x, self.y)
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

    /// magnitude
    #[inline]
    pub fn abs(&self) -> FloatNum {
        self.x.hypot(self.y)
    }

    /// unit vector with the same direction, `None` for the zero vector
    pub fn normalize(&self) -> Option<Vector> {
        let length = self.abs();
        if length == 0. || !length.is_finite() {
            return None;
        }
        let shrink = length.recip();
        Some((self.x * shrink, self.y * shrink).into())
    }

    /// counter clockwise rotation by `rad`
    #[inline]
    pub fn rotate(&self, rad: FloatNum) -> Vector {
        let (s, c) = rad.sin_cos();
        (self.x * c - self.y * s, self.x * s + self.y * c).into()
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
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

impl From<Vector> for (FloatNum, FloatNum) {
    fn from(value: Vector) -> Self {
        (value.x, value.y)
    }
}

// vector pointing from the first point to the second one
impl From<(Point, Point)> for Vector {
    fn from((p1, p2): (Point, Point)) -> Self {
        (p2.x() - p1.x(), p2.y() - p1.y()).into()
    }
}

impl From<(&Point, &Point)> for Vector {
    fn from((p1, p2): (&Point, &Point)) -> Self {
        (*p1, *p2).into()
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

impl AddAssign<&Vector> for Vector {
    fn add_assign(&mut self, rhs: &Vector) {
        *self += *rhs;
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

impl Neg for Vector {
    type Output = Self;
    fn neg(self) -> Self::Output {
        (-self.x, -self.y).into()
    }
}

// dot product
impl Mul for Vector {
    type Output = FloatNum;
    fn mul(self, rhs: Vector) -> Self::Output {
        self.x * rhs.x + self.y * rhs.y
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

impl DivAssign<FloatNum> for Vector {
    fn div_assign(&mut self, rhs: FloatNum) {
        self.x /= rhs;
        self.y /= rhs;
    }
}

impl Not for Vector {
    type Output = Self;
    fn not(self) -> Self::Output {
        Self {
            x: self.y,
            y: -self.x,
        }
    }
}

// only the z component of the 3d cross product survives in the plane
impl BitXor for Vector {
    type Output = FloatNum;
    fn bitxor(self, rhs: Self) -> Self::Output {
        let lhs: Vector3 = self.into();
        (lhs ^ rhs.into()).z()
    }
}

/// Lifts plane vectors into 3D so that `ω × r` can be written as a real cross
/// product with `ω = (0, 0, angle_velocity)`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vector3 {
    x: FloatNum,
    y: FloatNum,
    z: FloatNum,
}

impl Vector3 {
    pub fn x(&self) -> FloatNum {
        self.x
    }

    pub fn y(&self) -> FloatNum {
        self.y
    }

    pub fn z(&self) -> FloatNum {
        self.z
    }
}

impl From<Vector> for Vector3 {
    fn from(value: Vector) -> Self {
        Self {
            x: value.x,
            y: value.y,
            z: 0.,
        }
    }
}

impl From<(FloatNum, FloatNum, FloatNum)> for Vector3 {
    fn from((x, y, z): (FloatNum, FloatNum, FloatNum)) -> Self {
        Self { x, y, z }
    }
}

impl From<Vector3> for Vector {
    fn from(value: Vector3) -> Self {
        Self {
            x: value.x,
            y: value.y,
        }
    }
}

impl BitXor for Vector3 {
    type Output = Self;
    fn bitxor(self, rhs: Self) -> Self::Output {
        let Self {
            x: x1,
            y: y1,
            z: z1,
        } = self;

        let Self {
            x: x2,
            y: y2,
            z: z2,
        } = rhs;

        Self {
            x: y1 * z2 - z1 * y2,
            y: z1 * x2 - x1 * z2,
            z: x1 * y2 - y1 * x2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Vector, Vector3};
    use crate::math::FloatNum;

    const TOLERANCE: FloatNum = 1e-5;

    fn assert_close(actual: Vector, expected: (FloatNum, FloatNum)) {
        assert!(
            (actual.x() - expected.0).abs() < TOLERANCE && (actual.y() - expected.1).abs() < TOLERANCE,
            "{actual} != {expected:?}"
        );
    }

    #[test]
    fn test_dot_and_cross() {
        let a: Vector = (3., 4.).into();
        let b: Vector = (-2., 1.).into();
        assert_eq!(a * b, -2.);
        assert_eq!(a ^ b, 3. * 1. - 4. * -2.);
        assert_eq!(b ^ a, -(a ^ b));
    }

    #[test]
    fn test_perpendicular_is_orthogonal() {
        let edge: Vector = (5., -7.).into();
        assert_eq!(edge * !edge, 0.);
        assert_eq!((!edge).abs(), edge.abs());
    }

    #[test]
    fn test_normalize() {
        let v: Vector = (3., 4.).into();
        let unit = v.normalize().unwrap();
        assert_close(unit, (0.6, 0.8));
        assert!(Vector::default().normalize().is_none());
    }

    #[test]
    fn test_rotate_counter_clockwise() {
        let v: Vector = (1., 0.).into();
        assert_close(v.rotate(std::f32::consts::FRAC_PI_2), (0., 1.));
        assert_close(v.rotate(std::f32::consts::PI), (-1., 0.));
    }

    #[test]
    fn test_angular_cross_matches_scalar_convention() {
        // ω × r = (-ω r.y, ω r.x)
        let angle_velocity = 0.5;
        let r: Vector = (2., 3.).into();
        let w: Vector3 = (0., 0., angle_velocity).into();
        let v: Vector = (w ^ r.into()).into();
        assert_close(v, (-angle_velocity * 3., angle_velocity * 2.));
    }
}
