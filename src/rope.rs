//! One-sided spring tethers between two bodies, with break/reattach.

use crate::body::{BodyHandle, RigidBody};
use crate::error::PhysicsError;
use crate::float::Float;
use crate::vec::Vec2;
use serde::{Deserialize, Serialize};

/// Attachment state of a rope.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RopeState {
    #[default]
    Attached,
    Broken,
}

/// A rope between two bodies in an arena.
///
/// The rope only resists stretching: tension is
/// `spring_constant * max(length - rest_length, 0)`. The rest length is not
/// chosen up front; it latches to the anchor distance seen on the first
/// attached pre-step, so an assembly can lay out its bodies first.
///
/// Anchor points are world-space positions pushed in by the owning assembly
/// each sub-step; the rope never derives them from body geometry itself.
#[derive(Clone, Debug, PartialEq)]
pub struct Rope<F: Float> {
    body_a: BodyHandle,
    body_b: BodyHandle,
    point_a: Vec2<F>,
    point_b: Vec2<F>,
    rest_length: Option<F>,
    spring_constant: F,
    break_force: Option<F>,
    state: RopeState,
    tension: F,
}

impl<F: Float> Rope<F> {
    pub fn new(body_a: BodyHandle, body_b: BodyHandle, spring_constant: F) -> Result<Self, PhysicsError> {
        if body_a == body_b {
            return Err(PhysicsError::SelfTether { index: body_a.0 });
        }
        if !(spring_constant.is_finite() && spring_constant >= F::zero()) {
            return Err(PhysicsError::InvalidSpringConstant);
        }
        Ok(Rope {
            body_a,
            body_b,
            point_a: Vec2::zero(),
            point_b: Vec2::zero(),
            rest_length: None,
            spring_constant,
            break_force: None,
            state: RopeState::Attached,
            tension: F::zero(),
        })
    }

    /// Snap the rope when its tension exceeds `limit`.
    pub fn with_break_force(mut self, limit: F) -> Self {
        self.break_force = Some(limit);
        self
    }

    /// Re-tie the rope to a new pair of bodies. Forgets the captured rest length.
    pub fn set_bodies(&mut self, body_a: BodyHandle, body_b: BodyHandle) -> Result<(), PhysicsError> {
        if body_a == body_b {
            return Err(PhysicsError::SelfTether { index: body_a.0 });
        }
        self.body_a = body_a;
        self.body_b = body_b;
        self.rest_length = None;
        Ok(())
    }

    /// Forget the captured rest length; the next attached pre-step latches it again.
    pub fn reset_rest_length(&mut self) {
        self.rest_length = None;
    }

    /// World-space anchor on body A.
    pub fn set_point_a(&mut self, point: Vec2<F>) {
        self.point_a = point;
    }

    /// World-space anchor on body B.
    pub fn set_point_b(&mut self, point: Vec2<F>) {
        self.point_b = point;
    }

    /// Both world-space anchors at once, as the owning assembly does each pre-step.
    pub fn set_anchor_points(&mut self, point_a: Vec2<F>, point_b: Vec2<F>) {
        self.point_a = point_a;
        self.point_b = point_b;
    }

    /// Current anchor-to-anchor distance.
    pub fn length(&self) -> F {
        self.point_a.distance(self.point_b)
    }

    /// Detach the rope. It applies no force until reattached.
    pub fn break_rope(&mut self) {
        if self.state == RopeState::Attached {
            tracing::debug!(body_a = self.body_a.0, body_b = self.body_b.0, "rope broken");
        }
        self.state = RopeState::Broken;
        self.tension = F::zero();
    }

    /// Reattach a broken rope if it is slack enough not to snap taut.
    ///
    /// Succeeds when the anchors are closer than the captured rest length (or
    /// no rest length has been captured yet). Returns whether the rope is
    /// attached afterwards.
    pub fn try_reattach(&mut self) -> bool {
        if self.state == RopeState::Attached {
            return true;
        }
        let slack = match self.rest_length {
            Some(rest) => self.length() < rest,
            None => true,
        };
        if slack {
            self.state = RopeState::Attached;
            tracing::debug!(body_a = self.body_a.0, body_b = self.body_b.0, "rope reattached");
        } else {
            tracing::debug!(
                body_a = self.body_a.0,
                body_b = self.body_b.0,
                length = self.length().to_f64(),
                "rope too taut to reattach"
            );
        }
        slack
    }

    /// Accumulate rope tension on both endpoint bodies.
    ///
    /// Forces are equal and opposite along the anchor line, applied at each
    /// anchor's offset from its body's center of mass.
    pub fn apply<B: AsMut<RigidBody<F>>>(&mut self, bodies: &mut [B]) -> Result<(), PhysicsError> {
        let (a, b) = pair_mut(bodies, self.body_a.0, self.body_b.0)?;

        if self.state == RopeState::Broken {
            self.tension = F::zero();
            return Ok(());
        }

        let length = self.length();
        let rest = *self.rest_length.get_or_insert(length);
        let force = self.spring_constant * (length - rest).max(F::zero());

        if let Some(limit) = self.break_force {
            if force > limit {
                tracing::info!(
                    body_a = self.body_a.0,
                    body_b = self.body_b.0,
                    tension = force.to_f64(),
                    "rope snapped over its force limit"
                );
                self.state = RopeState::Broken;
                self.tension = F::zero();
                return Ok(());
            }
        }

        self.tension = force;
        if force <= F::zero() {
            return Ok(());
        }

        let direction = (self.point_b - self.point_a).normalize();
        let (a, b) = (a.as_mut(), b.as_mut());
        let offset_a = self.point_a - a.position();
        let offset_b = self.point_b - b.position();
        a.add_force_at_world_offset(direction * force, offset_a);
        b.add_force_at_world_offset(direction * -force, offset_b);
        Ok(())
    }

    /// Arena handle of the first endpoint.
    pub fn body_a(&self) -> BodyHandle { self.body_a }
    /// Arena handle of the second endpoint.
    pub fn body_b(&self) -> BodyHandle { self.body_b }
    pub fn point_a(&self) -> Vec2<F> { self.point_a }
    pub fn point_b(&self) -> Vec2<F> { self.point_b }
    /// Latched rest length; `None` until the first attached pre-step.
    pub fn rest_length(&self) -> Option<F> { self.rest_length }
    pub fn spring_constant(&self) -> F { self.spring_constant }
    pub fn break_force(&self) -> Option<F> { self.break_force }
    pub fn state(&self) -> RopeState { self.state }
    pub fn is_broken(&self) -> bool { self.state == RopeState::Broken }
    /// Tension applied on the most recent [`Rope::apply`].
    pub fn tension(&self) -> F { self.tension }
}

/// Borrow two distinct elements of a slice mutably.
pub(crate) fn pair_mut<T>(items: &mut [T], a: usize, b: usize) -> Result<(&mut T, &mut T), PhysicsError> {
    let count = items.len();
    for index in [a, b] {
        if index >= count {
            return Err(PhysicsError::BodyOutOfBounds { index, count });
        }
    }
    if a == b {
        return Err(PhysicsError::SelfTether { index: a });
    }
    if a < b {
        let (lo, hi) = items.split_at_mut(b);
        Ok((&mut lo[a], &mut hi[0]))
    } else {
        let (lo, hi) = items.split_at_mut(a);
        Ok((&mut hi[0], &mut lo[b]))
    }
}
