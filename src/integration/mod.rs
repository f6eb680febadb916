pub mod integrator;

pub use integrator::{integrate, Surface, FRICTION_EPSILON};
