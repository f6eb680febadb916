pub mod ground;
pub mod rigid_body;

pub use ground::{Ground, SUPPORT_TOLERANCE};
pub use rigid_body::{BodyHandle, BodyType, KinematicState, RigidBody, Support};
