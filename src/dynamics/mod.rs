//! The per-tick pipeline over plain body slices.

pub mod normal_force;
pub mod support;

pub use normal_force::propagate_normal_forces;
pub use support::{detect_supports, reset_support_states, rests_on};

use crate::collision::resolution::resolve_collisions;
use crate::config::SolverSettings;
use crate::integration::integrator;
use crate::objects::{Ground, RigidBody};
use crate::world::Environment;

/// Advances the bodies by `dt` seconds.
///
/// The order is fixed: support detection, normal-force propagation,
/// integration, then collision resolution. Static bodies are never
/// modified. A non-finite or non-positive `dt` does nothing.
pub fn update(
    dynamic: &mut [RigidBody],
    statics: &[RigidBody],
    ground: &Ground,
    env: &Environment,
    settings: &SolverSettings,
    dt: f64,
) {
    if !dt.is_finite() || dt <= 0.0 {
        return;
    }

    detect_supports(dynamic, statics, ground, settings);
    propagate_normal_forces(dynamic, env.vertical_gravity());
    integrator::integrate(dynamic, statics, ground, env, settings, dt);
    let resolved = resolve_collisions(dynamic, statics, settings);
    log::trace!("Tick of {:.4}s resolved {} contacts", dt, resolved);
}
