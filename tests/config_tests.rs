use gondola::{
    AutopilotConfig, BalloonConfig, BalloonSnapshot, Balloon, ContactConfig, NormalMode, Terrain,
    Vec2, WorldConfig,
};

#[test]
fn empty_documents_deserialize_to_defaults() {
    let world: WorldConfig<f64> = serde_json::from_str("{}").unwrap();
    assert_eq!(world, WorldConfig::new());

    let terrain: Terrain<f64> = serde_json::from_str("{}").unwrap();
    assert_eq!(terrain, Terrain::new());

    let contact: ContactConfig<f64> = serde_json::from_str("{}").unwrap();
    assert_eq!(contact, ContactConfig::new());

    let balloon: BalloonConfig<f64> = serde_json::from_str("{}").unwrap();
    assert_eq!(balloon, BalloonConfig::default());

    let pilot: AutopilotConfig<f64> = serde_json::from_str("{}").unwrap();
    assert_eq!(pilot, AutopilotConfig::default());
}

#[test]
fn partial_documents_override_only_named_fields() {
    let json = r#"{
        "rope_break_force": 1500.0,
        "gondola": { "mass": 60.0 },
        "envelope": { "decay": true }
    }"#;
    let cfg: BalloonConfig<f64> = serde_json::from_str(json).unwrap();
    assert_eq!(cfg.rope_break_force, Some(1500.0));
    assert_eq!(cfg.gondola.mass, 60.0);
    assert_eq!(cfg.gondola.width, 40.0);
    assert!(cfg.envelope.decay);
    assert_eq!(cfg.envelope.lift_max, 1500.0);
    assert_eq!(cfg.rope_spring_constant, 100.0);
}

#[test]
fn world_config_reads_gravity_and_sub_step() {
    let json = r#"{ "sub_step": 0.001, "gravity": { "x": 0.0, "y": 9.81 } }"#;
    let cfg: WorldConfig<f64> = serde_json::from_str(json).unwrap();
    assert_eq!(cfg.sub_step, 0.001);
    assert_eq!(cfg.gravity, Vec2::new(0.0, 9.81));
    assert_eq!(cfg.max_sub_steps, 10_000);
    assert!(cfg.validate().is_ok());
}

#[test]
fn terrain_normal_mode_is_configurable() {
    let terrain: Terrain<f64> = serde_json::from_str(r#"{ "normal_mode": "Vertical" }"#).unwrap();
    assert_eq!(terrain.normal_mode, NormalMode::Vertical);
    assert_eq!(terrain.surface_normal_at_x(12.0), Vec2::new(0.0, -1.0));
}

#[test]
fn snapshot_serializes_for_renderers() {
    let mut balloon: Balloon<f64> = Balloon::new(BalloonConfig::default()).unwrap();
    balloon.set_position(Vec2::new(10.0, 20.0));
    let snapshot = balloon.snapshot();
    assert_eq!(snapshot.ropes.len(), 4);
    assert_eq!(snapshot.gondola.position, Vec2::new(10.0, 20.0));

    let json = serde_json::to_string(&snapshot).unwrap();
    let back: BalloonSnapshot<f64> = serde_json::from_str(&json).unwrap();
    assert_eq!(back.temperature, snapshot.temperature);
    assert_eq!(back.ropes.len(), 4);
}
