//! Spring-damper ground contact with two-regime friction.
//!
//! Each body carries a [`ContactShape`] that yields a fixed set of contact
//! points. Every point below the terrain surface gets its own normal and
//! friction force, applied at the point's offset from the center of mass, so
//! a tilted body picks up a restoring torque without a contact manifold.

use crate::body::RigidBody;
use crate::float::Float;
use crate::terrain::Terrain;
use crate::vec::Vec2;
use serde::{Deserialize, Serialize};

/// Friction parameters shared by all contacts.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig<F: Float> {
    /// Coefficient used while the point slides faster than the threshold.
    pub kinetic_friction: F,
    /// Coefficient used at or below the threshold.
    pub static_friction: F,
    /// Along-surface point speed separating the two regimes.
    pub kinetic_speed_threshold: F,
}

impl<F: Float> ContactConfig<F> {
    pub fn new() -> Self {
        ContactConfig {
            kinetic_friction: F::from_f64(0.15),
            static_friction: F::from_f64(0.25),
            kinetic_speed_threshold: F::one(),
        }
    }

    /// Friction coefficient for an along-surface speed.
    pub fn friction_for_speed(&self, slide_speed: F) -> F {
        if slide_speed.abs() > self.kinetic_speed_threshold {
            self.kinetic_friction
        } else {
            self.static_friction
        }
    }
}

impl<F: Float> Default for ContactConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// Forces produced by one penetrating contact point.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ContactResponse<F: Float> {
    pub point: Vec2<F>,
    pub depth: F,
    pub normal_force: Vec2<F>,
    pub friction_force: Vec2<F>,
}

/// Aggregate of every contact point that touched the ground this sub-step.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ContactSummary<F: Float> {
    pub contacts: usize,
    pub normal_force: Vec2<F>,
    pub friction_force: Vec2<F>,
}

impl<F: Float> ContactSummary<F> {
    fn record(&mut self, response: &ContactResponse<F>) {
        self.contacts += 1;
        self.normal_force += response.normal_force;
        self.friction_force += response.friction_force;
    }
}

/// Contact geometry of a body.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ContactShape<F: Float> {
    /// Axis-aligned box in the body frame, touching at its four corners.
    Box { width: F, height: F },
    /// Circle touching at the single point closest to the ground. Frictionless.
    Circle { radius: F },
}

impl<F: Float> ContactShape<F> {
    /// Corners of a box shape in world coordinates, or `None` for circles.
    pub fn corners(&self, body: &RigidBody<F>) -> Option<[Vec2<F>; 4]> {
        match *self {
            ContactShape::Box { width, height } => Some(box_corners(body, width, height)),
            ContactShape::Circle { .. } => None,
        }
    }

    /// Evaluate every contact point against the terrain and apply the resulting forces.
    pub fn resolve(
        &self,
        body: &mut RigidBody<F>,
        terrain: &Terrain<F>,
        config: &ContactConfig<F>,
    ) -> ContactSummary<F> {
        let mut summary = ContactSummary::default();

        match *self {
            ContactShape::Box { width, height } => {
                for point in box_corners(body, width, height) {
                    let depth = point.y - terrain.elevation_at_x(point.x);
                    let normal = terrain.surface_normal_at_x(point.x);
                    if let Some(response) = resolve_contact_point(body, point, depth, normal, terrain, config) {
                        summary.record(&response);
                    }
                }
            }
            ContactShape::Circle { radius } => {
                let center = body.position();
                let normal = terrain.surface_normal_at_x(center.x);
                let surface = Vec2::new(center.x, terrain.elevation_at_x(center.x));
                let touch = center - normal * radius;
                let depth = -(touch - surface).dot(normal);
                if let Some(response) = resolve_center_contact(body, touch, depth, normal, terrain) {
                    summary.record(&response);
                }
            }
        }

        summary
    }
}

/// World-space corners of a `width` x `height` box centered on the body.
///
/// Order: top-left, top-right, bottom-left, bottom-right.
pub fn box_corners<F: Float>(body: &RigidBody<F>, width: F, height: F) -> [Vec2<F>; 4] {
    let (hw, hh) = (width * F::half(), height * F::half());
    [
        body.local_to_world(Vec2::new(-hw, -hh)),
        body.local_to_world(Vec2::new(hw, -hh)),
        body.local_to_world(Vec2::new(-hw, hh)),
        body.local_to_world(Vec2::new(hw, hh)),
    ]
}

/// Spring force along `normal` for `depth`, plus damping of the approach
/// speed only, so the ground never pulls a body down.
fn contact_normal_force<F: Float>(depth: F, normal: Vec2<F>, velocity: Vec2<F>, terrain: &Terrain<F>) -> Vec2<F> {
    let mut force = normal * (depth * terrain.spring_constant());
    let approach = normal.dot(velocity);
    if approach < F::zero() {
        force += normal * (-approach * terrain.damping_coefficient());
    }
    force
}

/// Apply normal and friction forces for a single contact point.
///
/// `depth` is the penetration (positive when underground) and `normal` the
/// outward unit surface normal. Returns `None` when the point is at or above
/// the surface. Both forces act at the point's offset from the center of
/// mass, using the velocity of the material point at the contact.
pub fn resolve_contact_point<F: Float>(
    body: &mut RigidBody<F>,
    point: Vec2<F>,
    depth: F,
    normal: Vec2<F>,
    terrain: &Terrain<F>,
    config: &ContactConfig<F>,
) -> Option<ContactResponse<F>> {
    if depth <= F::zero() {
        return None;
    }

    let offset = point - body.position();
    let point_velocity = body.velocity_at_world_point(point);
    let normal_force = contact_normal_force(depth, normal, point_velocity, terrain);

    let tangent = normal.perp();
    let slide = point_velocity.dot(tangent);
    let mu = config.friction_for_speed(slide);
    let friction_force = tangent * (-(mu * normal_force.magnitude() * slide));

    body.add_force_at_world_offset(normal_force, offset);
    body.add_force_at_world_offset(friction_force, offset);

    Some(ContactResponse { point, depth, normal_force, friction_force })
}

/// Normal force only, through the center of mass.
///
/// Used for round bodies: friction at the rim of a light disc acts as a
/// spin damper far too stiff for an explicit integrator.
pub fn resolve_center_contact<F: Float>(
    body: &mut RigidBody<F>,
    point: Vec2<F>,
    depth: F,
    normal: Vec2<F>,
    terrain: &Terrain<F>,
) -> Option<ContactResponse<F>> {
    if depth <= F::zero() {
        return None;
    }

    let normal_force = contact_normal_force(depth, normal, body.velocity(), terrain);
    body.add_force(normal_force);

    Some(ContactResponse { point, depth, normal_force, friction_force: Vec2::zero() })
}
