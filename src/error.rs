//! Error types for physics operations.

use thiserror::Error;

/// Errors that can occur while building or stepping the simulation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PhysicsError {
    /// Mass must be positive and finite.
    #[error("mass must be positive and finite")]
    InvalidMass,
    /// Moment of inertia must be positive and finite.
    #[error("moment of inertia must be positive and finite")]
    InvalidInertia,
    /// The fixed sub-step must be positive and finite.
    #[error("time step must be positive and finite")]
    InvalidTimeStep,
    /// Spring constants must be non-negative and finite.
    #[error("spring constant must be non-negative and finite")]
    InvalidSpringConstant,
    /// A body handle does not resolve in the arena it was used against.
    #[error("body index {index} out of bounds (count: {count})")]
    BodyOutOfBounds { index: usize, count: usize },
    /// A rope cannot tie a body to itself.
    #[error("rope endpoints must be distinct bodies (both are {index})")]
    SelfTether { index: usize },
}
