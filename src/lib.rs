//! Rigid-body physics core for a 2D balloon-flight toy.
//!
//! `gondola` integrates a small set of rigid bodies tied together by spring
//! ropes, under gravity, quadratic drag, user-driven lift and spring-damper
//! ground contact against a periodic terrain. Screen coordinates are used
//! throughout: Y grows downwards, so gravity is `(0, +g)` and lift is `-y`.
//!
//! # Features
//!
//! - **Semi-implicit Euler**: velocity first, then position from the new velocity
//! - **Composable behaviors**: drag and contact are attached to a body, not inherited
//! - **Ropes**: one-sided springs with lazily latched rest length and break/reattach
//! - **Ground contact**: per-contact-point spring-damper normal force plus two-regime friction
//! - **Fixed sub-stepping**: a three-phase pre/step/post sweep per sub-step
//! - **Observable**: monitor the driver via the `StepObserver` trait
//! - **`no_std` compatible**: needs only `alloc`
//!
//! # Example
//!
//! ```
//! use gondola::{Balloon, BalloonConfig, ControlInput, NoOpStepObserver, Terrain, Vec2, World, WorldConfig};
//!
//! let mut balloon: Balloon<f64> = Balloon::new(BalloonConfig::default()).unwrap();
//! balloon.set_position(Vec2::new(0.0, 300.0));
//!
//! let config = WorldConfig::new().with_sub_step(1.0 / 1024.0);
//! let mut world: World<f64, Balloon<f64>> = World::new(config, Terrain::new()).unwrap();
//! world.add_object(balloon);
//!
//! let input = ControlInput { up: true, ..ControlInput::default() };
//! let ran = world.advance(1.0 / 32.0, input, &mut NoOpStepObserver).unwrap();
//! assert_eq!(ran, 32);
//! ```

#![no_std]

extern crate alloc;

pub mod float;
pub mod vec;
pub mod error;
pub mod body;
pub mod aero;
pub mod terrain;
pub mod contact;
pub mod rope;
pub mod input;
pub mod config;
pub mod observer;
pub mod world;
pub mod entity;
pub mod balloon;
pub mod autopilot;

// Re-export primary API
pub use float::{wrap_angle, Float};
pub use vec::Vec2;
pub use error::PhysicsError;
pub use body::{BodyHandle, RigidBody};
pub use aero::AeroDrag;
pub use terrain::{NormalMode, Terrain};
pub use contact::{ContactConfig, ContactResponse, ContactShape, ContactSummary};
pub use rope::{Rope, RopeState};
pub use input::{ControlInput, Key, KeyboardState};
pub use config::WorldConfig;
pub use observer::{NoOpStepObserver, StepObserver, TracingStepObserver};
pub use world::{DynWorld, StepContext, Steppable, World};
pub use entity::PhysicsEntity;
pub use balloon::{Balloon, BalloonConfig, BalloonSnapshot, Envelope, EnvelopeConfig, GondolaConfig, WeightConfig};
pub use autopilot::{Autopilot, AutopilotConfig};
