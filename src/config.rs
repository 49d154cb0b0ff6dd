//! Configuration for the simulation driver.

use crate::error::PhysicsError;
use crate::float::Float;
use crate::vec::Vec2;
use serde::{Deserialize, Serialize};

/// Configuration for the fixed-sub-step world driver.
///
/// # Builder Pattern
/// ```
/// use gondola::config::WorldConfig;
/// use gondola::vec::Vec2;
///
/// let config: WorldConfig<f64> = WorldConfig::new()
///     .with_sub_step(1.0 / 240.0)
///     .with_gravity(Vec2::new(0.0, 9.81))
///     .with_max_sub_steps(64);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig<F: Float> {
    /// Fixed integration interval in seconds. Default: 1e-4.
    pub sub_step: F,
    /// Gravity acceleration (Y grows downward). Default: (0, 10).
    pub gravity: Vec2<F>,
    /// Upper bound on sub-steps run for a single frame. Default: 10 000.
    pub max_sub_steps: usize,
}

impl<F: Float> WorldConfig<F> {
    /// Create a new config with default values.
    pub fn new() -> Self {
        WorldConfig {
            sub_step: F::from_f64(1e-4),
            gravity: Vec2::new(F::zero(), F::from_f64(10.0)),
            max_sub_steps: 10_000,
        }
    }

    /// Set the fixed sub-step.
    pub fn with_sub_step(mut self, sub_step: F) -> Self {
        self.sub_step = sub_step;
        self
    }

    /// Set the gravity vector.
    pub fn with_gravity(mut self, gravity: Vec2<F>) -> Self {
        self.gravity = gravity;
        self
    }

    /// Set the per-frame sub-step cap.
    pub fn with_max_sub_steps(mut self, max_sub_steps: usize) -> Self {
        self.max_sub_steps = max_sub_steps.max(1);
        self
    }

    pub fn validate(&self) -> Result<(), PhysicsError> {
        if !(self.sub_step.is_finite() && self.sub_step > F::zero()) {
            return Err(PhysicsError::InvalidTimeStep);
        }
        Ok(())
    }

    /// Number of whole sub-steps that fit in `frame_dt`, capped.
    ///
    /// Any remainder of the frame is dropped.
    pub fn sub_steps_for(&self, frame_dt: F) -> usize {
        if !(frame_dt > F::zero()) {
            return 0;
        }
        let steps = (frame_dt / self.sub_step).floor().to_f64();
        (steps as usize).min(self.max_sub_steps)
    }
}

impl<F: Float> Default for WorldConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}
