pub mod environment;
pub mod physics_world;

pub use environment::Environment;
pub use physics_world::{PhysicsWorld, SimulationState};
