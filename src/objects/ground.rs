use crate::common::Material;
use crate::error::{PhysicsError, Result};
use crate::objects::RigidBody;

/// Tolerance within which a body counts as touching a surface it rests on.
pub const SUPPORT_TOLERANCE: f64 = 1e-6;

/// Infinite horizontal plane every dynamic body can rest on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ground {
    pub y_level: f64,
    pub material: Material,
}

impl Ground {
    pub fn new(y_level: f64) -> Self {
        Self {
            y_level,
            material: Material::default(),
        }
    }

    /// Sets the ground's friction. Without an explicit static coefficient
    /// the kinetic one is used for both.
    pub fn set_friction(&mut self, kinetic: f64, static_friction: Option<f64>) -> Result<()> {
        let static_friction = static_friction.unwrap_or(kinetic);
        for value in [kinetic, static_friction] {
            if !value.is_finite() || value < 0.0 {
                return Err(PhysicsError::InvalidFriction(value));
            }
        }
        self.material.kinetic_friction = kinetic;
        self.material.static_friction = static_friction;
        Ok(())
    }

    /// True when the body's bottom is at or below the plane.
    pub fn is_touching(&self, body: &RigidBody) -> bool {
        body.bottom() <= self.y_level + SUPPORT_TOLERANCE
    }

    /// Moves the body up so its bottom sits on the plane, if it sank below.
    /// Returns whether a correction was made.
    pub fn lift_out(&self, body: &mut RigidBody) -> bool {
        let depth = self.y_level - body.bottom();
        if depth > 0.0 {
            body.position.y += depth;
            true
        } else {
            false
        }
    }
}

impl Default for Ground {
    fn default() -> Self {
        Self::new(0.0)
    }
}
