use approx::assert_relative_eq;
use gondola::balloon::{
    ENVELOPE, GONDOLA, ROPE_ENVELOPE_LEFT, ROPE_WEIGHT_LEFT, ROPE_WEIGHT_RIGHT, WEIGHT_LEFT,
};
use gondola::{
    Autopilot, AutopilotConfig, Balloon, BalloonConfig, ContactConfig, ControlInput,
    NoOpStepObserver, Terrain, TracingStepObserver, Vec2, World, WorldConfig,
};

const SUB_STEP: f64 = 1.0 / 4096.0;
const FRAME: f64 = 1.0 / 32.0;

fn world_with_balloon(config: BalloonConfig<f64>) -> World<f64, Balloon<f64>> {
    world_with_balloon_at(config, 300.0)
}

fn world_with_balloon_at(config: BalloonConfig<f64>, y: f64) -> World<f64, Balloon<f64>> {
    let mut balloon = Balloon::new(config).unwrap();
    balloon.set_position(Vec2::new(0.0, y));
    let mut world = World::new(WorldConfig::new().with_sub_step(SUB_STEP), Terrain::new()).unwrap();
    world.add_object(balloon);
    world
}

fn all_finite(balloon: &Balloon<f64>) -> bool {
    balloon.entities().iter().all(|e| {
        let b = &e.body;
        b.position().x.is_finite()
            && b.position().y.is_finite()
            && b.velocity().x.is_finite()
            && b.velocity().y.is_finite()
            && b.rotation().is_finite()
    })
}

#[test]
fn first_pre_step_latches_as_built_rope_lengths() {
    let mut balloon: Balloon<f64> = Balloon::new(BalloonConfig::default()).unwrap();
    balloon.set_position(Vec2::new(0.0, 300.0));
    assert!(balloon.ropes().iter().all(|r| r.rest_length().is_none()));

    let built = balloon.rope(ROPE_WEIGHT_LEFT).length();
    balloon
        .accumulate_forces(&ControlInput::default(), SUB_STEP, &Terrain::new(), &ContactConfig::new())
        .unwrap();
    assert_relative_eq!(balloon.rope(ROPE_WEIGHT_LEFT).rest_length().unwrap(), built);
    assert_relative_eq!(built, 30.0);
    assert!(balloon.ropes().iter().all(|r| r.rest_length().is_some()));
}

#[test]
fn weights_hang_on_taut_ropes() {
    let mut world = world_with_balloon(BalloonConfig::default());
    for _ in 0..8 {
        world.advance(FRAME, ControlInput::default(), &mut NoOpStepObserver).unwrap();
    }
    let balloon = world.object(0);
    assert!(all_finite(balloon));
    assert!(balloon.rope(ROPE_WEIGHT_LEFT).tension() > 0.0);
    assert!(balloon.rope(ROPE_ENVELOPE_LEFT).tension() > 0.0);
}

#[test]
fn burner_heats_and_valve_cools_the_envelope() {
    let mut world = world_with_balloon(BalloonConfig::default());
    let up = ControlInput { up: true, ..ControlInput::default() };
    world.advance(1.0, up, &mut NoOpStepObserver).unwrap();
    let hot = world.object(0).envelope().temperature();
    assert_relative_eq!(hot, 0.6, epsilon = 1e-9);
    assert!(world.object(0).envelope().burner_on());

    let down = ControlInput { down: true, ..ControlInput::default() };
    world.advance(1.0, down, &mut NoOpStepObserver).unwrap();
    assert_relative_eq!(world.object(0).envelope().temperature(), 0.5, epsilon = 1e-9);
}

#[test]
fn hot_envelope_outclimbs_a_cold_one() {
    let mut hot_cfg = BalloonConfig::default();
    hot_cfg.envelope.initial_temperature = 1.0;
    let mut cold_cfg = BalloonConfig::default();
    cold_cfg.envelope.initial_temperature = 0.0;

    let mut hot = world_with_balloon(hot_cfg);
    let mut cold = world_with_balloon(cold_cfg);
    for _ in 0..16 {
        hot.advance(FRAME, ControlInput::default(), &mut NoOpStepObserver).unwrap();
        cold.advance(FRAME, ControlInput::default(), &mut NoOpStepObserver).unwrap();
    }
    let hot_y = hot.object(0).body(ENVELOPE).position().y;
    let cold_y = cold.object(0).body(ENVELOPE).position().y;
    // Up is -y.
    assert!(hot_y < cold_y);
}

#[test]
fn steering_pushes_the_envelope_sideways() {
    let mut world = world_with_balloon(BalloonConfig::default());
    let right = ControlInput { right: true, ..ControlInput::default() };
    for _ in 0..8 {
        world.advance(FRAME, right, &mut NoOpStepObserver).unwrap();
    }
    assert!(world.object(0).body(ENVELOPE).velocity().x > 0.0);
}

#[test]
fn key_one_drops_the_left_weight_once() {
    let mut world = world_with_balloon(BalloonConfig::default());
    let toggle = ControlInput { toggle_left_weight: true, ..ControlInput::default() };
    world.advance(FRAME, toggle, &mut TracingStepObserver).unwrap();
    assert!(world.object(0).rope(ROPE_WEIGHT_LEFT).is_broken());
    assert!(!world.object(0).rope(ROPE_WEIGHT_RIGHT).is_broken());

    // The dropped weight is no longer carried along.
    for _ in 0..8 {
        world.advance(FRAME, ControlInput::default(), &mut NoOpStepObserver).unwrap();
    }
    let balloon = world.object(0);
    assert!(balloon.rope(ROPE_WEIGHT_LEFT).is_broken());
    assert_eq!(balloon.rope(ROPE_WEIGHT_LEFT).tension(), 0.0);
    let snapshot = balloon.snapshot();
    assert!(snapshot.ropes[ROPE_WEIGHT_LEFT].broken);
    assert!(!snapshot.ropes[ROPE_WEIGHT_RIGHT].broken);
}

#[test]
fn toggle_reattaches_only_when_slack() {
    let mut balloon: Balloon<f64> = Balloon::new(BalloonConfig::default()).unwrap();
    balloon.set_position(Vec2::new(0.0, 300.0));
    balloon
        .accumulate_forces(&ControlInput::default(), SUB_STEP, &Terrain::new(), &ContactConfig::new())
        .unwrap();

    assert!(!balloon.toggle_rope(ROPE_WEIGHT_LEFT));
    assert!(balloon.rope(ROPE_WEIGHT_LEFT).is_broken());

    // Weight dragged further away: too taut.
    let far = balloon.body(WEIGHT_LEFT).position() + Vec2::new(0.0, 20.0);
    balloon.body_mut(WEIGHT_LEFT).set_position(far);
    balloon.update_anchors();
    assert!(!balloon.toggle_rope(ROPE_WEIGHT_LEFT));

    // Weight lifted closer to the gondola: slack, so it reattaches.
    let near = balloon.body(WEIGHT_LEFT).position() - Vec2::new(0.0, 30.0);
    balloon.body_mut(WEIGHT_LEFT).set_position(near);
    balloon.update_anchors();
    assert!(balloon.toggle_rope(ROPE_WEIGHT_LEFT));
    assert!(!balloon.rope(ROPE_WEIGHT_LEFT).is_broken());
}

#[test]
fn gondola_lands_and_stays_above_ground() {
    let mut cfg = BalloonConfig::default();
    cfg.envelope.initial_temperature = 0.0;
    let mut world = world_with_balloon(cfg);
    let valve = ControlInput { down: true, ..ControlInput::default() };
    for _ in 0..640 {
        world.advance(FRAME, valve, &mut NoOpStepObserver).unwrap();
    }
    let terrain = world.terrain().clone();
    let balloon = world.object(0);
    assert!(all_finite(balloon));
    // Resting on the contact springs: a shallow penetration at most.
    let height = balloon.height_above_ground(&terrain);
    assert!(height > 0.0, "gondola center sank below ground: {height}");
    assert!(height < 30.0, "gondola should have landed: {height}");
}

#[test]
fn gondola_moment_limit_is_configured() {
    let balloon: Balloon<f64> = Balloon::new(BalloonConfig::default()).unwrap();
    assert_eq!(balloon.body(GONDOLA).moment_limit(), Some(2000.0));
    assert_relative_eq!(balloon.total_mass(), 110.0);
}

#[test]
fn autopilot_burns_when_below_the_band() {
    // Gondola 100 units above the ground at x = 0.
    let mut world = world_with_balloon_at(BalloonConfig::default(), 550.0);
    let mut pilot: Autopilot<f64> = Autopilot::new(AutopilotConfig::default());
    let terrain = world.terrain().clone();
    for _ in 0..32 {
        let input = pilot.fly(world.object(0), &terrain);
        world.advance(FRAME, input, &mut NoOpStepObserver).unwrap();
    }
    let balloon = world.object(0);
    assert!(all_finite(balloon));
    assert!(balloon.envelope().burner_on());
    assert!(!balloon.envelope().valve_open());
    assert!(balloon.envelope().temperature() > 0.55);
}

#[test]
fn relayout_relatches_ropes_to_the_new_geometry() {
    let mut balloon: Balloon<f64> = Balloon::new(BalloonConfig::default()).unwrap();
    balloon.set_position(Vec2::new(0.0, 300.0));
    let terrain = Terrain::new();
    let contact = ContactConfig::new();
    balloon.accumulate_forces(&ControlInput::default(), SUB_STEP, &terrain, &contact).unwrap();
    let cool_rest = balloon.rope(ROPE_ENVELOPE_LEFT).rest_length().unwrap();

    // A hotter envelope is larger, so the laid-out rig has longer envelope ropes.
    balloon.envelope_mut().set_temperature(1.0);
    balloon.set_position(Vec2::new(0.0, 300.0));
    assert!(balloon.ropes().iter().all(|r| r.rest_length().is_none()));

    let built = balloon.rope(ROPE_ENVELOPE_LEFT).length();
    balloon.accumulate_forces(&ControlInput::default(), SUB_STEP, &terrain, &contact).unwrap();
    let hot_rest = balloon.rope(ROPE_ENVELOPE_LEFT).rest_length().unwrap();
    assert_relative_eq!(hot_rest, built);
    assert!(hot_rest > cool_rest);
    assert_eq!(balloon.rope(ROPE_ENVELOPE_LEFT).tension(), 0.0);
}
