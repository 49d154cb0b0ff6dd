//! A rigid body with optional drag and ground-contact behaviors attached.

use crate::aero::AeroDrag;
use crate::body::RigidBody;
use crate::contact::{ContactConfig, ContactShape, ContactSummary};
use crate::error::PhysicsError;
use crate::float::Float;
use crate::terrain::Terrain;
use crate::vec::Vec2;
use crate::world::{StepContext, Steppable};

/// Physics state plus the force behaviors that act on it every sub-step.
#[derive(Clone, Debug, PartialEq)]
pub struct PhysicsEntity<F: Float> {
    pub body: RigidBody<F>,
    pub drag: Option<AeroDrag<F>>,
    pub contact: Option<ContactShape<F>>,
}

impl<F: Float> PhysicsEntity<F> {
    pub fn new(body: RigidBody<F>) -> Self {
        PhysicsEntity { body, drag: None, contact: None }
    }

    pub fn with_drag(mut self, drag: AeroDrag<F>) -> Self {
        self.drag = Some(drag);
        self
    }

    pub fn with_contact(mut self, shape: ContactShape<F>) -> Self {
        self.contact = Some(shape);
        self
    }

    /// Drag first, then ground contact.
    pub fn accumulate_forces(
        &mut self,
        terrain: &Terrain<F>,
        contact: &ContactConfig<F>,
    ) -> ContactSummary<F> {
        if let Some(drag) = &self.drag {
            drag.apply(&mut self.body);
        }
        match &self.contact {
            Some(shape) => shape.resolve(&mut self.body, terrain, contact),
            None => ContactSummary::default(),
        }
    }

    pub fn integrate(&mut self, dt: F, gravity: Vec2<F>) {
        self.body.integrate(dt, gravity);
    }
}

impl<F: Float> AsRef<RigidBody<F>> for PhysicsEntity<F> {
    fn as_ref(&self) -> &RigidBody<F> { &self.body }
}

impl<F: Float> AsMut<RigidBody<F>> for PhysicsEntity<F> {
    fn as_mut(&mut self) -> &mut RigidBody<F> { &mut self.body }
}

impl<F: Float> Steppable<F> for PhysicsEntity<F> {
    fn pre_step(&mut self, ctx: &StepContext<'_, F>) -> Result<(), PhysicsError> {
        self.accumulate_forces(ctx.terrain, ctx.contact);
        Ok(())
    }

    fn step(&mut self, ctx: &StepContext<'_, F>) -> Result<(), PhysicsError> {
        self.integrate(ctx.dt, ctx.gravity);
        Ok(())
    }
}
