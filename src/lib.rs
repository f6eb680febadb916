//! A small 2D rigid-body kernel: circles, axis-aligned boxes, walls and
//! slopes resting on a ground plane, with a support graph, normal-force
//! propagation, friction, and impulse-based collision response.

pub mod collision;
pub mod common;
pub mod config;
pub mod dynamics;
pub mod error;
pub mod integration;
pub mod math;
pub mod objects;
pub mod shapes;
pub mod world;

// Re-export key types for easier use
pub use collision::AABB;
pub use common::Material;
pub use config::{SimulationConfig, SolverSettings};
pub use error::{PhysicsError, Result};
pub use math::vec2::Vec2;
pub use objects::{BodyHandle, BodyType, Ground, RigidBody, Support};
pub use shapes::{Shape, ShapeKind};
pub use world::{Environment, PhysicsWorld, SimulationState};
