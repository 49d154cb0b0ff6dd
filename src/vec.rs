//! 2D vector algebra for planar rigid-body physics.

use crate::float::Float;
use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use serde::{Deserialize, Serialize};

/// 2D vector in screen coordinates (x right, y down).
///
/// A plain value type: every operation returns a new vector except the
/// compound-assignment operators.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2<F: Float> {
    pub x: F,
    pub y: F,
}

impl<F: Float> Vec2<F> {
    /// Create a new 2D vector.
    pub fn new(x: F, y: F) -> Self { Vec2 { x, y } }

    /// Zero vector.
    pub fn zero() -> Self { Vec2 { x: F::zero(), y: F::zero() } }

    /// Dot product.
    pub fn dot(self, other: Self) -> F {
        self.x * other.x + self.y * other.y
    }

    /// 2D cross product (z-component of the 3D cross with z = 0).
    pub fn cross(self, other: Self) -> F {
        self.x * other.y - self.y * other.x
    }

    /// Squared length (avoids sqrt).
    pub fn magnitude_squared(self) -> F {
        self.dot(self)
    }

    /// Length.
    pub fn magnitude(self) -> F {
        self.magnitude_squared().sqrt()
    }

    /// Unit vector in the same direction.
    ///
    /// Not guarded: a (near-)zero vector yields infinities or NaN. Callers
    /// check `magnitude_squared()` against a threshold first.
    pub fn normalize(self) -> Self {
        self / self.magnitude()
    }

    /// Rotate by `angle` radians using the standard rotation matrix.
    pub fn rotate(self, angle: F) -> Self {
        let (sa, ca) = (angle.sin(), angle.cos());
        Vec2 {
            x: self.x * ca - self.y * sa,
            y: self.x * sa + self.y * ca,
        }
    }

    /// Rotate by `angle` degrees.
    pub fn rotate_deg(self, angle: F) -> Self {
        self.rotate(angle.to_radians())
    }

    /// Perpendicular vector, `(-y, x)`.
    pub fn perp(self) -> Self {
        Vec2 { x: -self.y, y: self.x }
    }

    /// Distance between two points.
    pub fn distance(self, other: Self) -> F {
        (self - other).magnitude()
    }

    /// Scale all components by a scalar.
    pub fn scale(self, s: F) -> Self {
        Vec2 { x: self.x * s, y: self.y * s }
    }

    /// Linear interpolation between self and other.
    pub fn lerp(self, other: Self, t: F) -> Self {
        self + (other - self).scale(t)
    }
}

impl<F: Float> Add for Vec2<F> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self { Vec2 { x: self.x + rhs.x, y: self.y + rhs.y } }
}

impl<F: Float> Sub for Vec2<F> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self { Vec2 { x: self.x - rhs.x, y: self.y - rhs.y } }
}

impl<F: Float> Neg for Vec2<F> {
    type Output = Self;
    fn neg(self) -> Self { Vec2 { x: -self.x, y: -self.y } }
}

impl<F: Float> Mul<F> for Vec2<F> {
    type Output = Self;
    fn mul(self, rhs: F) -> Self { self.scale(rhs) }
}

impl<F: Float> Div<F> for Vec2<F> {
    type Output = Self;
    fn div(self, rhs: F) -> Self { Vec2 { x: self.x / rhs, y: self.y / rhs } }
}

impl<F: Float> AddAssign for Vec2<F> {
    fn add_assign(&mut self, rhs: Self) { *self = *self + rhs; }
}

impl<F: Float> SubAssign for Vec2<F> {
    fn sub_assign(&mut self, rhs: Self) { *self = *self - rhs; }
}

impl<F: Float> MulAssign<F> for Vec2<F> {
    fn mul_assign(&mut self, rhs: F) { *self = *self * rhs; }
}

impl<F: Float> DivAssign<F> for Vec2<F> {
    fn div_assign(&mut self, rhs: F) { *self = *self / rhs; }
}

impl Mul<Vec2<f32>> for f32 {
    type Output = Vec2<f32>;
    fn mul(self, rhs: Vec2<f32>) -> Vec2<f32> { rhs.scale(self) }
}

impl Mul<Vec2<f64>> for f64 {
    type Output = Vec2<f64>;
    fn mul(self, rhs: Vec2<f64>) -> Vec2<f64> { rhs.scale(self) }
}
