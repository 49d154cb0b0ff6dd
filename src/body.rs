//! Rigid bodies with force/moment accumulators and a semi-implicit Euler integrator.

use crate::error::PhysicsError;
use crate::float::{wrap_angle, Float};
use crate::vec::Vec2;
use serde::{Deserialize, Serialize};

/// Index of a body inside an assembly's body arena.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BodyHandle(pub usize);

impl BodyHandle {
    pub fn index(self) -> usize { self.0 }
}

/// Planar rigid body.
///
/// Forces and moments added during a sub-step are accumulated and consumed
/// by [`RigidBody::integrate`], which leaves both accumulators at zero.
#[derive(Clone, Debug, PartialEq)]
pub struct RigidBody<F: Float> {
    position: Vec2<F>,
    velocity: Vec2<F>,
    rotation: F,
    rotational_velocity: F,
    mass: F,
    moment_of_inertia: F,
    force: Vec2<F>,
    moment: F,
    moment_limit: Option<F>,
}

impl<F: Float> RigidBody<F> {
    /// Create a body at rest at the origin.
    ///
    /// Mass and inertia are fixed for the body's lifetime and must be
    /// strictly positive.
    pub fn new(mass: F, moment_of_inertia: F) -> Result<Self, PhysicsError> {
        if !(mass.is_finite() && mass > F::zero()) {
            return Err(PhysicsError::InvalidMass);
        }
        if !(moment_of_inertia.is_finite() && moment_of_inertia > F::zero()) {
            return Err(PhysicsError::InvalidInertia);
        }
        Ok(RigidBody {
            position: Vec2::zero(),
            velocity: Vec2::zero(),
            rotation: F::zero(),
            rotational_velocity: F::zero(),
            mass,
            moment_of_inertia,
            force: Vec2::zero(),
            moment: F::zero(),
            moment_limit: None,
        })
    }

    /// Set the starting position.
    pub fn with_position(mut self, position: Vec2<F>) -> Self {
        self.position = position;
        self
    }

    /// Clamp the accumulated moment to `±limit` before every integration.
    pub fn with_moment_limit(mut self, limit: F) -> Self {
        self.moment_limit = Some(limit.abs());
        self
    }

    /// Force given in the body frame, applied at an offset from the center of mass.
    ///
    /// The force is rotated by `+rotation` into the world frame; the offset is
    /// rotated by `-rotation`, matching the convention the rig geometry was
    /// tuned against.
    pub fn add_force_at_body_offset(&mut self, force: Vec2<F>, offset: Vec2<F>) {
        self.add_force_at_world_offset(
            force.rotate(self.rotation),
            offset.rotate(-self.rotation),
        );
    }

    /// Body-frame force through the center of mass.
    pub fn add_force_relative(&mut self, force: Vec2<F>) {
        self.add_force_at_body_offset(force, Vec2::zero());
    }

    /// World-frame force at a world-frame offset from the center of mass.
    pub fn add_force_at_world_offset(&mut self, force: Vec2<F>, offset: Vec2<F>) {
        self.force += force;
        self.moment = self.moment + offset.cross(force);
    }

    /// World-frame force through the center of mass (no torque).
    pub fn add_force(&mut self, force: Vec2<F>) {
        self.force += force;
    }

    /// Add a pure moment (torque) about the center of mass.
    pub fn add_moment(&mut self, moment: F) {
        self.moment = self.moment + moment;
    }

    /// Advance the body by `dt` using semi-implicit Euler, then clear the accumulators.
    pub fn integrate(&mut self, dt: F, gravity: Vec2<F>) {
        if let Some(limit) = self.moment_limit {
            self.moment = self.moment.clamp(-limit, limit);
        }

        self.velocity += self.force / self.mass * dt + gravity * dt;
        self.position += self.velocity * dt;

        self.rotational_velocity = self.rotational_velocity
            + self.moment / self.moment_of_inertia * dt;
        self.rotation = wrap_angle(self.rotation + self.rotational_velocity * dt);

        self.clear_accumulators();
    }

    /// Zero the force and moment accumulators.
    pub fn clear_accumulators(&mut self) {
        self.force = Vec2::zero();
        self.moment = F::zero();
    }

    /// Velocity of the material point currently at `point` (world frame).
    pub fn velocity_at_world_point(&self, point: Vec2<F>) -> Vec2<F> {
        self.velocity + (point - self.position).perp() * self.rotational_velocity
    }

    /// Map a body-frame point into the world frame.
    pub fn local_to_world(&self, local: Vec2<F>) -> Vec2<F> {
        self.position + local.rotate(self.rotation)
    }

    /// Center of mass, world frame.
    pub fn position(&self) -> Vec2<F> { self.position }
    /// Linear velocity of the center of mass.
    pub fn velocity(&self) -> Vec2<F> { self.velocity }
    /// Orientation in radians, within `(-π, π]`.
    pub fn rotation(&self) -> F { self.rotation }
    /// Angular velocity in radians per second.
    pub fn rotational_velocity(&self) -> F { self.rotational_velocity }
    /// Mass, fixed at construction.
    pub fn mass(&self) -> F { self.mass }
    /// Moment of inertia, fixed at construction.
    pub fn moment_of_inertia(&self) -> F { self.moment_of_inertia }
    /// Force accumulated since the last integration.
    pub fn force(&self) -> Vec2<F> { self.force }
    /// Moment accumulated since the last integration.
    pub fn moment(&self) -> F { self.moment }
    /// Magnitude the moment is clamped to before integrating, if any.
    pub fn moment_limit(&self) -> Option<F> { self.moment_limit }

    /// Teleport the center of mass. Velocity is kept.
    pub fn set_position(&mut self, position: Vec2<F>) {
        self.position = position;
    }

    /// Overwrite the linear velocity.
    pub fn set_velocity(&mut self, velocity: Vec2<F>) {
        self.velocity = velocity;
    }

    /// Set the orientation; the value is wrapped into `(-π, π]`.
    pub fn set_rotation(&mut self, rotation: F) {
        self.rotation = wrap_angle(rotation);
    }

    /// Overwrite the angular velocity.
    pub fn set_rotational_velocity(&mut self, rotational_velocity: F) {
        self.rotational_velocity = rotational_velocity;
    }
}

impl<F: Float> AsRef<RigidBody<F>> for RigidBody<F> {
    fn as_ref(&self) -> &RigidBody<F> { self }
}

impl<F: Float> AsMut<RigidBody<F>> for RigidBody<F> {
    fn as_mut(&mut self) -> &mut RigidBody<F> { self }
}
