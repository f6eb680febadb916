pub mod aabb;
pub mod detection;
pub mod manifold;
pub mod resolution;

// Re-export key types
pub use aabb::AABB;
pub use detection::{bodies_overlap, shapes_overlap};
pub use manifold::Contact;
pub use resolution::resolve_collisions;
