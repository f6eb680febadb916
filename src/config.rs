//! Simulation configuration

use serde::{Deserialize, Serialize};

use crate::collision::AABB;

/// Default gravitational acceleration
pub const DEFAULT_GRAVITY: f64 = 9.8;

/// Default fixed time step (60 ticks per second)
pub const DEFAULT_TIME_STEP: f64 = 1.0 / 60.0;

/// Tuning of the support detection and collision response
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverSettings {
    /// Largest relative vertical speed at which one body can rest on another
    pub support_velocity_threshold: f64,

    /// Downward speed above which a supported body bounces instead of settling
    pub bounce_threshold: f64,

    /// Fraction of horizontal speed kept when bouncing off a wall
    pub wall_restitution: f64,

    /// Share of the penetration removed per pair resolution
    pub positional_correction_percent: f64,

    /// Penetration tolerated without positional correction
    pub positional_correction_slop: f64,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            support_velocity_threshold: 0.3,
            bounce_threshold: 1.0,
            wall_restitution: 0.8,
            positional_correction_percent: 0.8,
            positional_correction_slop: 0.01,
        }
    }
}

/// World configuration applied by `PhysicsWorld::from_config`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Gravitational acceleration (magnitude, acting downwards)
    pub gravity: f64,

    /// World tilt in degrees, clamped to [-90, 90]
    pub incline_angle_degrees: f64,

    /// Fixed timestep used by `PhysicsWorld::update`
    pub time_step: f64,

    /// Height of the ground plane
    pub ground_level: f64,

    pub ground_kinetic_friction: f64,

    pub ground_static_friction: f64,

    /// Optional region dynamic bodies are kept inside
    pub bounds: Option<AABB>,

    pub solver: SolverSettings,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            gravity: DEFAULT_GRAVITY,
            incline_angle_degrees: 0.0,
            time_step: DEFAULT_TIME_STEP,
            ground_level: 0.0,
            ground_kinetic_friction: 0.4,
            ground_static_friction: 0.5,
            bounds: None,
            solver: SolverSettings::default(),
        }
    }
}

impl SimulationConfig {
    pub fn with_gravity(mut self, gravity: f64) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_incline(mut self, degrees: f64) -> Self {
        self.incline_angle_degrees = degrees;
        self
    }

    pub fn with_time_step(mut self, time_step: f64) -> Self {
        self.time_step = time_step;
        self
    }

    pub fn with_ground_friction(mut self, kinetic: f64, static_friction: f64) -> Self {
        self.ground_kinetic_friction = kinetic;
        self.ground_static_friction = static_friction;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_config() {
        let config = SimulationConfig::default();
        assert_relative_eq!(config.gravity, 9.8);
        assert_relative_eq!(config.time_step, 1.0 / 60.0, epsilon = 1e-12);
        assert!(config.bounds.is_none());
        assert_relative_eq!(config.solver.wall_restitution, 0.8);
    }

    #[test]
    fn test_builders() {
        let config = SimulationConfig::default()
            .with_gravity(3.7)
            .with_incline(15.0)
            .with_time_step(0.01)
            .with_ground_friction(0.1, 0.2);
        assert_relative_eq!(config.gravity, 3.7);
        assert_relative_eq!(config.incline_angle_degrees, 15.0);
        assert_relative_eq!(config.time_step, 0.01);
        assert_relative_eq!(config.ground_kinetic_friction, 0.1);
        assert_relative_eq!(config.ground_static_friction, 0.2);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: SimulationConfig =
            serde_json::from_str(r#"{ "gravity": 1.6, "solver": { "wall_restitution": 0.5 } }"#).unwrap();
        assert_relative_eq!(config.gravity, 1.6);
        assert_relative_eq!(config.time_step, DEFAULT_TIME_STEP);
        assert_relative_eq!(config.solver.wall_restitution, 0.5);
        assert_relative_eq!(config.solver.bounce_threshold, 1.0);
    }

    #[test]
    fn test_json_round_trip() {
        let mut config = SimulationConfig::default().with_incline(-20.0);
        config.bounds = Some(AABB::new(
            crate::math::Vec2::new(-50.0, 0.0),
            crate::math::Vec2::new(50.0, 100.0),
        ));
        let json = serde_json::to_string(&config).unwrap();
        let parsed: SimulationConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }
}
