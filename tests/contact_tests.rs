use approx::assert_relative_eq;
use gondola::contact::resolve_contact_point;
use gondola::{ContactConfig, ContactShape, NormalMode, RigidBody, Terrain, Vec2};

fn flat_ground() -> Terrain<f64> {
    Terrain::flat(100.0)
}

#[test]
fn contact_point_at_surface_generates_nothing() {
    let terrain = flat_ground();
    let mut body = RigidBody::new(1.0, 1.0).unwrap().with_position(Vec2::new(0.0, 90.0));
    let point = Vec2::new(3.0, 100.0);
    let depth = point.y - terrain.elevation_at_x(point.x);
    let normal = terrain.surface_normal_at_x(point.x);
    let response = resolve_contact_point(&mut body, point, depth, normal, &terrain, &ContactConfig::new());
    assert!(response.is_none());
    assert_eq!(body.force(), Vec2::zero());
}

#[test]
fn contact_point_one_unit_deep_pushes_out_with_spring_constant() {
    let terrain = flat_ground();
    let mut body = RigidBody::new(1.0, 1.0).unwrap().with_position(Vec2::new(0.0, 101.0));
    let point = body.position();
    let depth = point.y - terrain.elevation_at_x(point.x);
    let normal = terrain.surface_normal_at_x(point.x);
    let response = resolve_contact_point(&mut body, point, depth, normal, &terrain, &ContactConfig::new())
        .expect("point is underground");

    assert_relative_eq!(response.depth, 1.0);
    assert_relative_eq!(response.normal_force.y, -terrain.spring_constant());
    assert_relative_eq!(response.normal_force.x, 0.0);
    assert_eq!(response.friction_force, Vec2::zero());
    assert_relative_eq!(body.force().y, -700.0);
}

#[test]
fn damping_only_resists_approach() {
    let terrain = flat_ground();
    let config = ContactConfig::new();

    // Moving into the ground: spring plus damping.
    let mut sinking = RigidBody::new(1.0, 1.0).unwrap().with_position(Vec2::new(0.0, 101.0));
    sinking.set_velocity(Vec2::new(0.0, 2.0));
    let point = sinking.position();
    let n = terrain.surface_normal_at_x(0.0);
    let r = resolve_contact_point(&mut sinking, point, 1.0, n, &terrain, &config).unwrap();
    assert_relative_eq!(r.normal_force.y, -(700.0 + 2.0 * 350.0));

    // Moving out: spring only, never a pull.
    let mut rising = RigidBody::new(1.0, 1.0).unwrap().with_position(Vec2::new(0.0, 101.0));
    rising.set_velocity(Vec2::new(0.0, -2.0));
    let point = rising.position();
    let r = resolve_contact_point(&mut rising, point, 1.0, n, &terrain, &config).unwrap();
    assert_relative_eq!(r.normal_force.y, -700.0);
}

#[test]
fn friction_opposes_sliding_with_regime_switch() {
    let terrain = flat_ground();
    let config = ContactConfig::new();
    let n = terrain.surface_normal_at_x(0.0);

    let mut slow = RigidBody::new(1.0, 1.0).unwrap().with_position(Vec2::new(0.0, 101.0));
    slow.set_velocity(Vec2::new(0.5, 0.0));
    let p = slow.position();
    let r = resolve_contact_point(&mut slow, p, 1.0, n, &terrain, &config).unwrap();
    assert!(r.friction_force.x < 0.0);
    assert_relative_eq!(r.friction_force.x, -0.25 * 700.0 * 0.5);

    let mut fast = RigidBody::new(1.0, 1.0).unwrap().with_position(Vec2::new(0.0, 101.0));
    fast.set_velocity(Vec2::new(-4.0, 0.0));
    let p = fast.position();
    let r = resolve_contact_point(&mut fast, p, 1.0, n, &terrain, &config).unwrap();
    assert!(r.friction_force.x > 0.0);
    assert_relative_eq!(r.friction_force.x, 0.15 * 700.0 * 4.0);
}

#[test]
fn resting_box_gets_two_corner_contacts() {
    let terrain = flat_ground().with_normal_mode(NormalMode::Vertical);
    let mut body = RigidBody::new(50.0, 3.0).unwrap().with_position(Vec2::new(0.0, 86.0));
    let shape = ContactShape::Box { width: 40.0, height: 30.0 };
    let summary = shape.resolve(&mut body, &terrain, &ContactConfig::new());
    assert_eq!(summary.contacts, 2);
    assert_relative_eq!(summary.normal_force.y, -2.0 * 700.0);
    // Symmetric corners cancel their torque.
    assert_relative_eq!(body.moment(), 0.0, epsilon = 1e-9);
}

#[test]
fn tilted_box_gets_restoring_torque() {
    let terrain = flat_ground().with_normal_mode(NormalMode::Vertical);
    let mut body = RigidBody::new(50.0, 3.0).unwrap().with_position(Vec2::new(0.0, 86.0));
    body.set_rotation(0.2);
    let shape = ContactShape::Box { width: 40.0, height: 30.0 };
    let summary = shape.resolve(&mut body, &terrain, &ContactConfig::new());
    assert!(summary.contacts >= 1);
    // Positive tilt drops the bottom-right corner; the push-back turns it the other way.
    assert!(body.moment() < 0.0);
}

#[test]
fn airborne_circle_is_untouched() {
    let terrain: Terrain<f64> = Terrain::new();
    let mut body = RigidBody::new(25.0, 1.0).unwrap().with_position(Vec2::new(0.0, 100.0));
    let summary = ContactShape::Circle { radius: 10.0 }.resolve(&mut body, &terrain, &ContactConfig::new());
    assert_eq!(summary.contacts, 0);
    assert_eq!(body.force(), Vec2::zero());
}

#[test]
fn sloped_contact_pushes_along_gradient_normal() {
    let terrain: Terrain<f64> = Terrain::new();
    let x = 0.0;
    let surface = terrain.elevation_at_x(x);
    let mut body = RigidBody::new(25.0, 1.0).unwrap().with_position(Vec2::new(x, surface - 8.0));
    let summary = ContactShape::Circle { radius: 10.0 }.resolve(&mut body, &terrain, &ContactConfig::new());
    assert_eq!(summary.contacts, 1);
    let n = terrain.surface_normal_at_x(x);
    let dir = summary.normal_force.normalize();
    assert_relative_eq!(dir.x, n.x, epsilon = 1e-12);
    assert_relative_eq!(dir.y, n.y, epsilon = 1e-12);
}

#[test]
fn heavy_disc_dropped_fast_settles_on_the_ground() {
    let terrain: Terrain<f64> = Terrain::flat(650.0);
    let shape = ContactShape::Circle { radius: 10.0 };
    let config = ContactConfig::new();
    let gravity = Vec2::new(0.0, 10.0);
    let mut body = RigidBody::new(25.0, 1.0).unwrap().with_position(Vec2::new(0.0, 630.0));
    body.set_velocity(Vec2::new(6.0, 45.0));
    body.set_rotational_velocity(3.0);

    for _ in 0..(8 * 4096) {
        shape.resolve(&mut body, &terrain, &config);
        body.integrate(1.0 / 4096.0, gravity);
        assert!(body.position().y.is_finite() && body.rotational_velocity().is_finite());
    }

    // Resting on the spring: weight / k of penetration.
    let rest_y = 650.0 - 10.0 + 250.0 / 700.0;
    assert_relative_eq!(body.position().y, rest_y, epsilon = 0.05);
    assert_relative_eq!(body.velocity().y, 0.0, epsilon = 0.05);
    // No rim friction: spin and sideways drift are untouched.
    assert_eq!(body.rotational_velocity(), 3.0);
    assert_eq!(body.velocity().x, 6.0);
}

#[test]
fn disc_landing_on_a_slope_stays_finite() {
    let terrain: Terrain<f64> = Terrain::new();
    let shape = ContactShape::Circle { radius: 10.0 };
    let config = ContactConfig::new();
    let x = 0.0;
    let mut body = RigidBody::new(25.0, 1.0)
        .unwrap()
        .with_position(Vec2::new(x, terrain.elevation_at_x(x) - 20.0));
    body.set_velocity(Vec2::new(0.0, 60.0));

    for _ in 0..4096 {
        shape.resolve(&mut body, &terrain, &config);
        body.integrate(1.0e-4, Vec2::new(0.0, 10.0));
    }
    let p = body.position();
    assert!(p.x.is_finite() && p.y.is_finite());
    assert!(p.y < terrain.elevation_at_x(p.x), "disc center went underground");
}
