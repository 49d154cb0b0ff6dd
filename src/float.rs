//! Scalar type the physics core is generic over.

use core::ops::{Add, Div, Mul, Neg, Sub};

/// Floating-point scalar used by every body, force and config.
///
/// Implemented for `f32` and `f64`. Transcendentals go through `libm` so a
/// simulation replays bit-identically on every target, `no_std` included.
pub trait Float:
    Copy
    + PartialOrd
    + Default
    + core::fmt::Debug
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
{
    /// Additive identity.
    fn zero() -> Self;
    /// Multiplicative identity.
    fn one() -> Self;
    /// 0.5.
    fn half() -> Self;
    /// 2.0.
    fn two() -> Self;
    /// π.
    fn pi() -> Self;

    /// Lossy for `f32`; every tuning constant in the crate is written as `f64`.
    fn from_f64(v: f64) -> Self;
    /// Widen for logging and integer conversion.
    fn to_f64(self) -> f64;

    /// Square root.
    fn sqrt(self) -> Self;
    /// Sine of an angle in radians.
    fn sin(self) -> Self;
    /// Cosine of an angle in radians.
    fn cos(self) -> Self;
    /// Absolute value.
    fn abs(self) -> Self;
    /// Largest integer value not above `self`.
    fn floor(self) -> Self;
    /// C-style remainder: the result has the sign of `self`.
    fn fmod(self, modulus: Self) -> Self;
    /// Neither infinite nor NaN.
    fn is_finite(self) -> bool;

    /// Smaller of two values.
    fn min(self, other: Self) -> Self {
        if self < other { self } else { other }
    }

    /// Larger of two values.
    fn max(self, other: Self) -> Self {
        if self > other { self } else { other }
    }

    /// Clamp into `[lo, hi]`.
    fn clamp(self, lo: Self, hi: Self) -> Self {
        self.max(lo).min(hi)
    }

    /// `self` at `t = 0`, `other` at `t = 1`.
    fn lerp(self, other: Self, t: Self) -> Self {
        self + (other - self) * t
    }

    /// Degrees to radians.
    fn to_radians(self) -> Self {
        self * Self::pi() / Self::from_f64(180.0)
    }
}

macro_rules! impl_float {
    ($t:ident, $pi:expr, $sqrt:path, $sin:path, $cos:path, $fabs:path, $floor:path, $fmod:path) => {
        impl Float for $t {
            fn zero() -> Self { 0.0 }
            fn one() -> Self { 1.0 }
            fn half() -> Self { 0.5 }
            fn two() -> Self { 2.0 }
            fn pi() -> Self { $pi }
            fn from_f64(v: f64) -> Self { v as $t }
            fn to_f64(self) -> f64 { self as f64 }
            fn sqrt(self) -> Self { $sqrt(self) }
            fn sin(self) -> Self { $sin(self) }
            fn cos(self) -> Self { $cos(self) }
            fn abs(self) -> Self { $fabs(self) }
            fn floor(self) -> Self { $floor(self) }
            fn fmod(self, modulus: Self) -> Self { $fmod(self, modulus) }
            fn is_finite(self) -> bool { $t::is_finite(self) }
        }
    };
}

impl_float!(f32, core::f32::consts::PI, libm::sqrtf, libm::sinf, libm::cosf, libm::fabsf, libm::floorf, libm::fmodf);
impl_float!(f64, core::f64::consts::PI, libm::sqrt, libm::sin, libm::cos, libm::fabs, libm::floor, libm::fmod);

/// Wrap an angle in radians into `(-π, π]`.
///
/// Angles already in range come back bit-identical. Others go through
/// `((angle + π) mod 2π) − π` with the remainder forced non-negative, since
/// `fmod` keeps the sign of a negative dividend.
pub fn wrap_angle<F: Float>(angle: F) -> F {
    let pi = F::pi();
    if angle > -pi && angle <= pi {
        return angle;
    }
    let two_pi = F::two() * pi;
    let mut rem = (angle + pi).fmod(two_pi);
    if rem < F::zero() {
        rem = rem + two_pi;
    }
    let wrapped = rem - pi;
    if wrapped <= -pi { wrapped + two_pi } else { wrapped }
}
