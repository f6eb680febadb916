//! Error types for the physics kernel.

use thiserror::Error;

use crate::objects::BodyHandle;
use crate::shapes::ShapeKind;

/// Errors raised by body creation, placement and parameter setters.
///
/// The per-tick pipeline never fails; these only surface from calls made by
/// the code driving the simulation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PhysicsError {
    /// Time step must be finite and strictly positive
    #[error("Invalid time step: {0} (must be finite and > 0)")]
    InvalidTimeStep(f64),

    /// Gravity must be finite
    #[error("Invalid gravity: {0}")]
    InvalidGravity(f64),

    /// Incline angle was NaN or infinite
    #[error("Invalid incline angle: {0}")]
    InvalidAngle(f64),

    /// World bounds with min >= max on some axis
    #[error("Invalid world bounds: min must be strictly below max on both axes")]
    InvalidBounds,

    /// Friction coefficients must be finite and non-negative
    #[error("Invalid friction coefficient: {0}")]
    InvalidFriction(f64),

    /// Shape dimensions that are non-finite or non-positive
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    /// Walls and slopes are immovable by construction
    #[error("{0:?} shapes can only be created as static bodies")]
    StaticOnlyShape(ShapeKind),

    /// Handle does not refer to a registered body
    #[error("Body not found: {0:?}")]
    BodyNotFound(BodyHandle),

    /// Placement along a slope was asked for a body that is not a slope
    #[error("Body {0:?} is not a slope")]
    NotASlope(BodyHandle),
}

/// Result type for physics operations
pub type Result<T> = std::result::Result<T, PhysicsError>;
