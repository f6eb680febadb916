//! Gravity, world incline and the optional world bounds.
//!
//! Tilting the world by θ splits gravity into a component pressing bodies
//! into the ground (`g·cos θ`) and a component along it (`g·sin θ`). A
//! positive angle makes the world descend towards −x.

use crate::collision::AABB;
use crate::config::DEFAULT_GRAVITY;
use crate::error::{PhysicsError, Result};
use crate::math::vec2::Vec2;

pub const MAX_INCLINE_DEGREES: f64 = 90.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Environment {
    gravity: f64,
    incline_angle_degrees: f64,
    vertical_gravity: f64,
    tangential_gravity: f64,
    bounds: Option<AABB>,
}

impl Environment {
    pub fn new(gravity: f64, incline_angle_degrees: f64) -> Result<Self> {
        let mut env = Self::default();
        env.set_gravity(gravity)?;
        env.set_incline_angle(incline_angle_degrees)?;
        Ok(env)
    }

    pub fn gravity(&self) -> f64 {
        self.gravity
    }

    pub fn incline_angle_degrees(&self) -> f64 {
        self.incline_angle_degrees
    }

    pub fn incline_angle_radians(&self) -> f64 {
        self.incline_angle_degrees.to_radians()
    }

    /// Gravity component perpendicular to the ground, `g·cos θ`.
    pub fn vertical_gravity(&self) -> f64 {
        self.vertical_gravity
    }

    /// Gravity component along the ground, `g·sin θ`.
    pub fn tangential_gravity(&self) -> f64 {
        self.tangential_gravity
    }

    /// Region dynamic bodies are kept inside, if any.
    pub fn bounds(&self) -> Option<&AABB> {
        self.bounds.as_ref()
    }

    pub fn set_bounds(&mut self, bounds: Option<AABB>) -> Result<()> {
        if let Some(region) = bounds {
            if !region.is_valid() {
                log::warn!("Rejected degenerate world bounds {:?}", region);
                return Err(PhysicsError::InvalidBounds);
            }
        }
        self.bounds = bounds;
        Ok(())
    }

    pub fn set_gravity(&mut self, gravity: f64) -> Result<()> {
        if !gravity.is_finite() {
            log::warn!("Rejected non-finite gravity {}", gravity);
            return Err(PhysicsError::InvalidGravity(gravity));
        }
        self.gravity = gravity;
        self.recompute();
        Ok(())
    }

    /// Sets the incline in degrees, clamping it to [-90, 90].
    pub fn set_incline_angle(&mut self, degrees: f64) -> Result<()> {
        if !degrees.is_finite() {
            log::warn!("Rejected non-finite incline angle {}", degrees);
            return Err(PhysicsError::InvalidAngle(degrees));
        }
        let clamped = degrees.clamp(-MAX_INCLINE_DEGREES, MAX_INCLINE_DEGREES);
        if clamped != degrees {
            log::warn!("Incline angle {}° clamped to {}°", degrees, clamped);
        }
        self.incline_angle_degrees = clamped;
        self.recompute();
        Ok(())
    }

    /// Gravity force on an airborne body of the given mass.
    pub fn gravity_force(&self, mass: f64) -> Vec2 {
        Vec2::new(-mass * self.tangential_gravity, -mass * self.vertical_gravity)
    }

    /// Horizontal force dragging a supported body along the inclined ground.
    pub fn incline_drive(&self, mass: f64) -> f64 {
        -mass * self.tangential_gravity
    }

    fn recompute(&mut self) {
        let (sin_a, cos_a) = self.incline_angle_radians().sin_cos();
        self.vertical_gravity = self.gravity * cos_a;
        self.tangential_gravity = self.gravity * sin_a;
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            gravity: DEFAULT_GRAVITY,
            incline_angle_degrees: 0.0,
            vertical_gravity: DEFAULT_GRAVITY,
            tangential_gravity: 0.0,
            bounds: None,
        }
    }
}
