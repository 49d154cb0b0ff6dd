//! Fixed-sub-step simulation driver.
//!
//! Every sub-step sweeps the object list three times, in insertion order:
//! `pre_step` (geometry refresh and force accumulation), `step` (integration)
//! and `post_step` (cleanup). No body integrates before every object has
//! finished accumulating forces, so objects that depend on each other's
//! geometry see a consistent snapshot within a sub-step.

use crate::config::WorldConfig;
use crate::contact::ContactConfig;
use crate::error::PhysicsError;
use crate::float::Float;
use crate::input::ControlInput;
use crate::observer::StepObserver;
use crate::terrain::Terrain;
use crate::vec::Vec2;
use alloc::boxed::Box;
use alloc::vec::Vec as AllocVec;

/// Read-only state shared with every object during one sub-step.
#[derive(Copy, Clone, Debug)]
pub struct StepContext<'a, F: Float> {
    pub dt: F,
    pub gravity: Vec2<F>,
    pub terrain: &'a Terrain<F>,
    pub contact: &'a ContactConfig<F>,
    pub input: ControlInput,
}

/// An object driven by the three-phase sweep. All phases default to no-ops.
pub trait Steppable<F: Float> {
    fn pre_step(&mut self, _ctx: &StepContext<'_, F>) -> Result<(), PhysicsError> {
        Ok(())
    }

    fn step(&mut self, _ctx: &StepContext<'_, F>) -> Result<(), PhysicsError> {
        Ok(())
    }

    fn post_step(&mut self, _ctx: &StepContext<'_, F>) -> Result<(), PhysicsError> {
        Ok(())
    }
}

impl<F: Float, S: Steppable<F> + ?Sized> Steppable<F> for Box<S> {
    fn pre_step(&mut self, ctx: &StepContext<'_, F>) -> Result<(), PhysicsError> {
        (**self).pre_step(ctx)
    }

    fn step(&mut self, ctx: &StepContext<'_, F>) -> Result<(), PhysicsError> {
        (**self).step(ctx)
    }

    fn post_step(&mut self, ctx: &StepContext<'_, F>) -> Result<(), PhysicsError> {
        (**self).post_step(ctx)
    }
}

/// Owns the terrain, the driver config and an ordered list of objects.
pub struct World<F: Float, S: Steppable<F>> {
    config: WorldConfig<F>,
    terrain: Terrain<F>,
    contact: ContactConfig<F>,
    objects: AllocVec<S>,
    pending_edges: ControlInput,
}

impl<F: Float, S: Steppable<F>> World<F, S> {
    pub fn new(config: WorldConfig<F>, terrain: Terrain<F>) -> Result<Self, PhysicsError> {
        config.validate()?;
        Ok(World {
            config,
            terrain,
            contact: ContactConfig::new(),
            objects: AllocVec::new(),
            pending_edges: ControlInput::default(),
        })
    }

    pub fn with_contact_config(mut self, contact: ContactConfig<F>) -> Self {
        self.contact = contact;
        self
    }

    /// Append an object; it steps after everything added before it.
    pub fn add_object(&mut self, object: S) -> usize {
        let idx = self.objects.len();
        self.objects.push(object);
        idx
    }

    /// Run as many whole sub-steps as fit in `frame_dt`; returns how many ran.
    ///
    /// Edge-triggered controls reach only the first sub-step. If the frame is
    /// too short for any sub-step, they are held for the next frame.
    pub fn advance<O: StepObserver>(
        &mut self,
        frame_dt: F,
        input: ControlInput,
        observer: &mut O,
    ) -> Result<usize, PhysicsError> {
        let sub_steps = self.config.sub_steps_for(frame_dt);
        let input = input.merge_edges(self.pending_edges);
        tracing::trace!(sub_steps, frame_dt = frame_dt.to_f64(), "advancing world");

        if sub_steps == 0 {
            self.pending_edges = input;
            observer.on_step_complete(0);
            return Ok(0);
        }
        self.pending_edges = ControlInput::default();

        for sub_step in 0..sub_steps {
            let input = if sub_step == 0 { input } else { input.without_edges() };
            self.sub_step(sub_step, input, observer)?;
        }

        observer.on_step_complete(sub_steps);
        Ok(sub_steps)
    }

    fn sub_step<O: StepObserver>(
        &mut self,
        sub_step: usize,
        input: ControlInput,
        observer: &mut O,
    ) -> Result<(), PhysicsError> {
        let ctx = StepContext {
            dt: self.config.sub_step,
            gravity: self.config.gravity,
            terrain: &self.terrain,
            contact: &self.contact,
            input,
        };

        for object in self.objects.iter_mut() {
            object.pre_step(&ctx)?;
        }
        observer.on_pre_step(sub_step);

        for object in self.objects.iter_mut() {
            object.step(&ctx)?;
        }
        observer.on_integrate(sub_step);

        for object in self.objects.iter_mut() {
            object.post_step(&ctx)?;
        }
        Ok(())
    }

    pub fn config(&self) -> &WorldConfig<F> { &self.config }
    pub fn terrain(&self) -> &Terrain<F> { &self.terrain }
    pub fn contact_config(&self) -> &ContactConfig<F> { &self.contact }
    pub fn objects(&self) -> &[S] { &self.objects }
    pub fn object(&self, index: usize) -> &S { &self.objects[index] }
    pub fn object_mut(&mut self, index: usize) -> &mut S { &mut self.objects[index] }
    pub fn object_count(&self) -> usize { self.objects.len() }
}

/// A world of heterogeneous objects, stepped through dynamic dispatch.
pub type DynWorld<F> = World<F, Box<dyn Steppable<F>>>;
