//! Periodic terrain elevation field used by the ground-contact model.

use crate::float::Float;
use crate::vec::Vec2;
use serde::{Deserialize, Serialize};

/// How the terrain reports its surface normal.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum NormalMode {
    /// Normal from the analytic slope of the elevation curve.
    #[default]
    Gradient,
    /// Always straight up, `(0, -1)`. Less accurate on slopes, but steep
    /// slope transitions can no longer kick bodies sideways.
    Vertical,
}

/// Stateless terrain: `elevation(x) = base_height + amplitude * sin(frequency * x)`.
///
/// Y grows downward, so a point is underground when `point.y > elevation(point.x)`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Terrain<F: Float> {
    pub base_height: F,
    pub amplitude: F,
    pub frequency: F,
    pub spring_constant: F,
    pub damping_coefficient: F,
    pub friction_coefficient: F,
    pub normal_mode: NormalMode,
}

impl<F: Float> Terrain<F> {
    pub fn new() -> Self {
        Terrain {
            base_height: F::from_f64(650.0),
            amplitude: F::from_f64(20.0),
            frequency: F::from_f64(0.01),
            spring_constant: F::from_f64(700.0),
            damping_coefficient: F::from_f64(350.0),
            friction_coefficient: F::from_f64(100.0),
            normal_mode: NormalMode::Gradient,
        }
    }

    /// Flat ground at `height`.
    pub fn flat(height: F) -> Self {
        Terrain {
            base_height: height,
            amplitude: F::zero(),
            ..Self::new()
        }
    }

    pub fn with_normal_mode(mut self, mode: NormalMode) -> Self {
        self.normal_mode = mode;
        self
    }

    pub fn with_contact_constants(mut self, spring_constant: F, damping_coefficient: F) -> Self {
        self.spring_constant = spring_constant;
        self.damping_coefficient = damping_coefficient;
        self
    }

    pub fn elevation_at_x(&self, x: F) -> F {
        self.base_height + self.amplitude * (self.frequency * x).sin()
    }

    /// Unit surface normal pointing out of the ground (negative Y is up).
    pub fn surface_normal_at_x(&self, x: F) -> Vec2<F> {
        match self.normal_mode {
            NormalMode::Gradient => Vec2::new(
                self.amplitude * self.frequency * (self.frequency * x).cos(),
                -F::one(),
            )
            .normalize(),
            NormalMode::Vertical => Vec2::new(F::zero(), -F::one()),
        }
    }

    pub fn spring_constant(&self) -> F { self.spring_constant }
    pub fn damping_coefficient(&self) -> F { self.damping_coefficient }
    pub fn friction_coefficient(&self) -> F { self.friction_coefficient }
}

impl<F: Float> Default for Terrain<F> {
    fn default() -> Self {
        Self::new()
    }
}
