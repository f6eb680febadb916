//! Surface properties of bodies and of the ground.

use serde::{Deserialize, Serialize};

/// Restitution and friction coefficients of a surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Coefficient of restitution (bounciness). Range [0, 1].
    /// 0 = perfectly inelastic (no bounce), 1 = perfectly elastic.
    pub restitution: f64,
    /// Friction that must be overcome before a resting body starts sliding.
    pub static_friction: f64,
    /// Friction opposing a body that is already sliding.
    pub kinetic_friction: f64,
}

impl Material {
    /// Creates a material, clamping restitution into [0, 1] and friction to
    /// non-negative values.
    pub fn new(restitution: f64, static_friction: f64, kinetic_friction: f64) -> Self {
        Material {
            restitution: restitution.clamp(0.0, 1.0),
            static_friction: static_friction.max(0.0),
            kinetic_friction: kinetic_friction.max(0.0),
        }
    }

    /// Material with a single friction coefficient used for both regimes.
    pub fn with_friction(restitution: f64, friction: f64) -> Self {
        Self::new(restitution, friction, friction)
    }

    /// Combined static friction of two touching surfaces (arithmetic mean).
    pub fn combined_static_friction(&self, other: &Material) -> f64 {
        (self.static_friction + other.static_friction) * 0.5
    }

    /// Combined kinetic friction of two touching surfaces (arithmetic mean).
    pub fn combined_kinetic_friction(&self, other: &Material) -> f64 {
        (self.kinetic_friction + other.kinetic_friction) * 0.5
    }

    /// Restitution used for a collision: the less bouncy surface wins.
    pub fn combined_restitution(&self, other: &Material) -> f64 {
        self.restitution.min(other.restitution)
    }
}

impl Default for Material {
    fn default() -> Self {
        Material {
            restitution: 0.2,
            static_friction: 0.5,
            kinetic_friction: 0.4,
        }
    }
}
