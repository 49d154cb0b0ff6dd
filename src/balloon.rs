//! The balloon rig: envelope, gondola and two hanging weights tied by ropes.
//!
//! Bodies live in a fixed arena addressed by [`BodyHandle`]s. Each pre-step
//! the rig recomputes every rope anchor from current body geometry, then
//! accumulates drag, control, contact and rope forces. Integration happens
//! only in `step`, after all of that.

use crate::aero::AeroDrag;
use crate::body::{BodyHandle, RigidBody};
use crate::contact::{box_corners, ContactConfig, ContactShape};
use crate::entity::PhysicsEntity;
use crate::error::PhysicsError;
use crate::float::Float;
use crate::input::ControlInput;
use crate::rope::Rope;
use crate::terrain::Terrain;
use crate::vec::Vec2;
use crate::world::{StepContext, Steppable};
use alloc::vec::Vec as AllocVec;
use serde::{Deserialize, Serialize};

pub const ENVELOPE: BodyHandle = BodyHandle(0);
pub const GONDOLA: BodyHandle = BodyHandle(1);
pub const WEIGHT_LEFT: BodyHandle = BodyHandle(2);
pub const WEIGHT_RIGHT: BodyHandle = BodyHandle(3);

pub const ROPE_ENVELOPE_LEFT: usize = 0;
pub const ROPE_ENVELOPE_RIGHT: usize = 1;
pub const ROPE_WEIGHT_LEFT: usize = 2;
pub const ROPE_WEIGHT_RIGHT: usize = 3;

/// Hot-air envelope parameters. Interpolated values go from the `_min` end
/// at temperature ratio 0 to the `_max` end at 1.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvelopeConfig<F: Float> {
    pub mass: F,
    pub inertia: F,
    pub radius_min: F,
    pub radius_max: F,
    pub cd_min: F,
    pub cd_max: F,
    pub lift_min: F,
    pub lift_max: F,
    pub lateral_force: F,
    /// Temperature ratio change per second while the burner or valve is held.
    pub heat_rate: F,
    /// Proportional cooling per second when `decay` is on.
    pub decay_rate: F,
    pub decay: bool,
    pub initial_temperature: F,
    /// Anchors sit this many degrees below horizontal on the rim.
    pub anchor_angle_deg: F,
}

impl<F: Float> Default for EnvelopeConfig<F> {
    fn default() -> Self {
        EnvelopeConfig {
            mass: F::from_f64(10.0),
            inertia: F::from_f64(5.0),
            radius_min: F::from_f64(60.0),
            radius_max: F::from_f64(100.0),
            cd_min: F::from_f64(0.4),
            cd_max: F::from_f64(0.8),
            lift_min: F::from_f64(300.0),
            lift_max: F::from_f64(1500.0),
            lateral_force: F::from_f64(200.0),
            heat_rate: F::from_f64(0.1),
            decay_rate: F::from_f64(0.02),
            decay: false,
            initial_temperature: F::half(),
            anchor_angle_deg: F::from_f64(30.0),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GondolaConfig<F: Float> {
    pub mass: F,
    pub inertia: F,
    pub width: F,
    pub height: F,
    pub cd: F,
    pub moment_limit: F,
}

impl<F: Float> Default for GondolaConfig<F> {
    fn default() -> Self {
        GondolaConfig {
            mass: F::from_f64(50.0),
            inertia: F::from_f64(3.0),
            width: F::from_f64(40.0),
            height: F::from_f64(30.0),
            cd: F::from_f64(0.1),
            moment_limit: F::from_f64(2000.0),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightConfig<F: Float> {
    pub mass: F,
    pub inertia: F,
    pub radius: F,
    pub cd: F,
    /// Initial drop below the gondola's bottom corners.
    pub hang_distance: F,
}

impl<F: Float> Default for WeightConfig<F> {
    fn default() -> Self {
        WeightConfig {
            mass: F::from_f64(25.0),
            inertia: F::one(),
            radius: F::from_f64(10.0),
            cd: F::from_f64(0.1),
            hang_distance: F::from_f64(30.0),
        }
    }
}

/// Everything needed to build a [`Balloon`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BalloonConfig<F: Float> {
    pub envelope: EnvelopeConfig<F>,
    pub gondola: GondolaConfig<F>,
    pub weight: WeightConfig<F>,
    pub rope_spring_constant: F,
    /// Ropes snap above this tension. `None` keeps them unbreakable by load.
    pub rope_break_force: Option<F>,
}

impl<F: Float> Default for BalloonConfig<F> {
    fn default() -> Self {
        BalloonConfig {
            envelope: EnvelopeConfig::default(),
            gondola: GondolaConfig::default(),
            weight: WeightConfig::default(),
            rope_spring_constant: F::from_f64(100.0),
            rope_break_force: None,
        }
    }
}

/// Thermal state of the envelope.
#[derive(Clone, Debug, PartialEq)]
pub struct Envelope<F: Float> {
    config: EnvelopeConfig<F>,
    temperature: F,
    burner_on: bool,
    valve_open: bool,
}

impl<F: Float> Envelope<F> {
    pub fn new(config: EnvelopeConfig<F>) -> Self {
        let temperature = config.initial_temperature.clamp(F::zero(), F::one());
        Envelope { config, temperature, burner_on: false, valve_open: false }
    }

    /// Advance the temperature ratio by `dt` under the given controls.
    pub fn update(&mut self, input: &ControlInput, dt: F) {
        let c = &self.config;
        self.burner_on = input.up;
        self.valve_open = input.down;

        let mut temperature = self.temperature;
        if self.burner_on {
            temperature = temperature + c.heat_rate * dt;
        }
        if self.valve_open {
            temperature = temperature - c.heat_rate * dt;
        }
        if c.decay {
            temperature = temperature - c.decay_rate * temperature * dt;
        }
        self.temperature = temperature.clamp(F::zero(), F::one());
    }

    fn interpolate(&self, min_val: F, max_val: F) -> F {
        min_val.lerp(max_val, self.temperature)
    }

    pub fn radius(&self) -> F {
        self.interpolate(self.config.radius_min, self.config.radius_max)
    }

    pub fn drag_coefficient(&self) -> F {
        self.interpolate(self.config.cd_min, self.config.cd_max)
    }

    /// Upward lift magnitude; never negative.
    pub fn lift(&self) -> F {
        self.interpolate(self.config.lift_min, self.config.lift_max).max(F::zero())
    }

    /// Lift plus lateral steering, world frame.
    pub fn control_force(&self, input: &ControlInput) -> Vec2<F> {
        let mut force = Vec2::new(F::zero(), -self.lift());
        if input.left {
            force.x = force.x - self.config.lateral_force;
        }
        if input.right {
            force.x = force.x + self.config.lateral_force;
        }
        force
    }

    pub fn anchor_left(&self, body: &RigidBody<F>) -> Vec2<F> {
        body.position()
            + Vec2::new(-self.radius(), F::zero())
                .rotate_deg(-self.config.anchor_angle_deg)
                .rotate(body.rotation())
    }

    pub fn anchor_right(&self, body: &RigidBody<F>) -> Vec2<F> {
        body.position()
            + Vec2::new(self.radius(), F::zero())
                .rotate_deg(self.config.anchor_angle_deg)
                .rotate(body.rotation())
    }

    pub fn temperature(&self) -> F { self.temperature }
    pub fn burner_on(&self) -> bool { self.burner_on }
    pub fn valve_open(&self) -> bool { self.valve_open }
    pub fn config(&self) -> &EnvelopeConfig<F> { &self.config }

    pub fn set_temperature(&mut self, temperature: F) {
        self.temperature = temperature.clamp(F::zero(), F::one());
    }
}

/// Pose of one body, for renderers.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BodyPose<F: Float> {
    pub position: Vec2<F>,
    pub rotation: F,
}

/// One rope segment, for renderers. Broken ropes are not drawn.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RopeSegment<F: Float> {
    pub start: Vec2<F>,
    pub end: Vec2<F>,
    pub broken: bool,
}

/// Read-only view of the rig after a frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BalloonSnapshot<F: Float> {
    pub envelope: BodyPose<F>,
    pub envelope_radius: F,
    pub gondola: BodyPose<F>,
    pub gondola_corners: [Vec2<F>; 4],
    pub weights: [BodyPose<F>; 2],
    pub weight_radius: F,
    pub ropes: AllocVec<RopeSegment<F>>,
    pub temperature: F,
    pub burner_on: bool,
    pub valve_open: bool,
}

/// The assembled balloon.
#[derive(Clone, Debug)]
pub struct Balloon<F: Float> {
    config: BalloonConfig<F>,
    entities: AllocVec<PhysicsEntity<F>>,
    ropes: [Rope<F>; 4],
    envelope: Envelope<F>,
}

impl<F: Float> Balloon<F> {
    pub fn new(config: BalloonConfig<F>) -> Result<Self, PhysicsError> {
        let env = &config.envelope;
        let gon = &config.gondola;
        let wgt = &config.weight;
        let envelope = Envelope::new(env.clone());

        let envelope_entity = PhysicsEntity::new(RigidBody::new(env.mass, env.inertia)?)
            .with_drag(AeroDrag::new(envelope.drag_coefficient(), env.cd_min));
        let gondola_entity = PhysicsEntity::new(
            RigidBody::new(gon.mass, gon.inertia)?.with_moment_limit(gon.moment_limit),
        )
        .with_drag(AeroDrag::uniform(gon.cd))
        .with_contact(ContactShape::Box { width: gon.width, height: gon.height });
        let weight_entity = PhysicsEntity::new(RigidBody::new(wgt.mass, wgt.inertia)?)
            .with_drag(AeroDrag::uniform(wgt.cd))
            .with_contact(ContactShape::Circle { radius: wgt.radius });

        let mut entities = AllocVec::with_capacity(4);
        entities.push(envelope_entity);
        entities.push(gondola_entity);
        entities.push(weight_entity.clone());
        entities.push(weight_entity);

        let k = config.rope_spring_constant;
        let mut ropes = [
            Rope::new(ENVELOPE, GONDOLA, k)?,
            Rope::new(ENVELOPE, GONDOLA, k)?,
            Rope::new(GONDOLA, WEIGHT_LEFT, k)?,
            Rope::new(GONDOLA, WEIGHT_RIGHT, k)?,
        ];
        if let Some(limit) = config.rope_break_force {
            ropes = ropes.map(|rope| rope.with_break_force(limit));
        }

        tracing::debug!(bodies = entities.len(), ropes = ropes.len(), "balloon assembled");

        let mut balloon = Balloon { config, entities, ropes, envelope };
        balloon.set_position(Vec2::zero());
        Ok(balloon)
    }

    /// Lay the rig out with the gondola centered on `position`.
    ///
    /// Rope rest lengths are forgotten and re-latch on the next pre-step.
    pub fn set_position(&mut self, position: Vec2<F>) {
        let radius = self.envelope.radius();
        let hang = Vec2::new(F::zero(), self.config.weight.hang_distance);

        self.entities[GONDOLA.0].body.set_position(position);
        self.entities[ENVELOPE.0]
            .body
            .set_position(position - Vec2::new(F::zero(), F::two() * radius));

        let [_, _, bottom_left, bottom_right] = self.gondola_corners();
        self.entities[WEIGHT_LEFT.0].body.set_position(bottom_left + hang);
        self.entities[WEIGHT_RIGHT.0].body.set_position(bottom_right + hang);

        for rope in self.ropes.iter_mut() {
            rope.reset_rest_length();
        }
        self.update_anchors();
    }

    /// Gondola corners: top-left, top-right, bottom-left, bottom-right.
    pub fn gondola_corners(&self) -> [Vec2<F>; 4] {
        let gon = &self.config.gondola;
        box_corners(&self.entities[GONDOLA.0].body, gon.width, gon.height)
    }

    /// Push current body geometry into every rope's anchor points.
    pub fn update_anchors(&mut self) {
        let [top_left, top_right, bottom_left, bottom_right] = self.gondola_corners();
        let envelope_body = &self.entities[ENVELOPE.0].body;
        let anchor_left = self.envelope.anchor_left(envelope_body);
        let anchor_right = self.envelope.anchor_right(envelope_body);
        let weight_left = self.entities[WEIGHT_LEFT.0].body.position();
        let weight_right = self.entities[WEIGHT_RIGHT.0].body.position();

        self.ropes[ROPE_ENVELOPE_LEFT].set_anchor_points(anchor_left, top_left);
        self.ropes[ROPE_ENVELOPE_RIGHT].set_anchor_points(anchor_right, top_right);
        self.ropes[ROPE_WEIGHT_LEFT].set_anchor_points(bottom_left, weight_left);
        self.ropes[ROPE_WEIGHT_RIGHT].set_anchor_points(bottom_right, weight_right);
    }

    /// Break an attached rope, or try to reattach a broken one.
    ///
    /// Returns whether the rope is attached afterwards.
    pub fn toggle_rope(&mut self, slot: usize) -> bool {
        let rope = &mut self.ropes[slot];
        if rope.is_broken() {
            rope.try_reattach()
        } else {
            rope.break_rope();
            false
        }
    }

    /// Accumulate every force acting on the rig for one sub-step.
    pub fn accumulate_forces(
        &mut self,
        input: &ControlInput,
        dt: F,
        terrain: &Terrain<F>,
        contact: &ContactConfig<F>,
    ) -> Result<(), PhysicsError> {
        self.envelope.update(input, dt);
        self.update_anchors();

        if input.toggle_left_weight {
            self.toggle_rope(ROPE_WEIGHT_LEFT);
        }
        if input.toggle_right_weight {
            self.toggle_rope(ROPE_WEIGHT_RIGHT);
        }

        if let Some(drag) = self.entities[ENVELOPE.0].drag.as_mut() {
            drag.cd_translation = self.envelope.drag_coefficient();
        }

        for entity in self.entities.iter_mut() {
            entity.accumulate_forces(terrain, contact);
        }
        let control = self.envelope.control_force(input);
        self.entities[ENVELOPE.0].body.add_force(control);

        for rope in self.ropes.iter_mut() {
            rope.apply(&mut self.entities)?;
        }
        Ok(())
    }

    pub fn integrate(&mut self, dt: F, gravity: Vec2<F>) {
        for entity in self.entities.iter_mut() {
            entity.integrate(dt, gravity);
        }
    }

    /// Vertical clearance of the gondola center above the terrain.
    pub fn height_above_ground(&self, terrain: &Terrain<F>) -> F {
        let p = self.entities[GONDOLA.0].body.position();
        terrain.elevation_at_x(p.x) - p.y
    }

    pub fn snapshot(&self) -> BalloonSnapshot<F> {
        let pose = |handle: BodyHandle| {
            let body = &self.entities[handle.0].body;
            BodyPose { position: body.position(), rotation: body.rotation() }
        };
        BalloonSnapshot {
            envelope: pose(ENVELOPE),
            envelope_radius: self.envelope.radius(),
            gondola: pose(GONDOLA),
            gondola_corners: self.gondola_corners(),
            weights: [pose(WEIGHT_LEFT), pose(WEIGHT_RIGHT)],
            weight_radius: self.config.weight.radius,
            ropes: self
                .ropes
                .iter()
                .map(|r| RopeSegment { start: r.point_a(), end: r.point_b(), broken: r.is_broken() })
                .collect(),
            temperature: self.envelope.temperature(),
            burner_on: self.envelope.burner_on(),
            valve_open: self.envelope.valve_open(),
        }
    }

    pub fn config(&self) -> &BalloonConfig<F> { &self.config }
    pub fn envelope(&self) -> &Envelope<F> { &self.envelope }
    pub fn envelope_mut(&mut self) -> &mut Envelope<F> { &mut self.envelope }
    pub fn entities(&self) -> &[PhysicsEntity<F>] { &self.entities }
    pub fn body(&self, handle: BodyHandle) -> &RigidBody<F> { &self.entities[handle.0].body }
    pub fn body_mut(&mut self, handle: BodyHandle) -> &mut RigidBody<F> { &mut self.entities[handle.0].body }
    pub fn rope(&self, slot: usize) -> &Rope<F> { &self.ropes[slot] }
    pub fn ropes(&self) -> &[Rope<F>] { &self.ropes }

    /// Total mass of every body in the rig.
    pub fn total_mass(&self) -> F {
        self.entities.iter().fold(F::zero(), |acc, e| acc + e.body.mass())
    }
}

impl<F: Float> Steppable<F> for Balloon<F> {
    fn pre_step(&mut self, ctx: &StepContext<'_, F>) -> Result<(), PhysicsError> {
        self.accumulate_forces(&ctx.input, ctx.dt, ctx.terrain, ctx.contact)
    }

    fn step(&mut self, ctx: &StepContext<'_, F>) -> Result<(), PhysicsError> {
        self.integrate(ctx.dt, ctx.gravity);
        Ok(())
    }
}
