//! Quadratic aerodynamic drag applied to rigid bodies.

use crate::body::RigidBody;
use crate::float::Float;
use serde::{Deserialize, Serialize};

/// Speeds (squared, or absolute for spin) at or below this produce no drag.
pub const DRAG_THRESHOLD: f64 = 1e-6;

/// Drag model with separate translational and rotational coefficients.
///
/// Drag magnitude scales with speed squared; the sign always opposes the
/// current motion (`v * |v|`, never `v²`).
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AeroDrag<F: Float> {
    pub cd_translation: F,
    pub cd_rotation: F,
}

impl<F: Float> AeroDrag<F> {
    pub fn new(cd_translation: F, cd_rotation: F) -> Self {
        AeroDrag { cd_translation, cd_rotation }
    }

    /// One coefficient shared by both terms.
    pub fn uniform(cd: F) -> Self {
        AeroDrag { cd_translation: cd, cd_rotation: cd }
    }

    /// Accumulate drag force and moment on `body` for the current sub-step.
    pub fn apply(&self, body: &mut RigidBody<F>) {
        let threshold = F::from_f64(DRAG_THRESHOLD);

        let velocity = body.velocity();
        let speed_sq = velocity.magnitude_squared();
        if speed_sq.abs() > threshold {
            let drag = velocity.normalize() * (-F::half() * self.cd_translation * speed_sq);
            body.add_force(drag);
        }

        let omega = body.rotational_velocity();
        if omega.abs() > threshold {
            body.add_moment(-F::half() * self.cd_rotation * omega * omega.abs());
        }
    }
}
