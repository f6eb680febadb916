use crate::collision::AABB;
use crate::common::Material;
use crate::config::SolverSettings;
use crate::math::vec2::Vec2;
use crate::objects::{BodyHandle, Ground, RigidBody, Support};
use crate::world::Environment;

/// Relative speed below which a body on a surface counts as at rest for
/// static friction.
pub const FRICTION_EPSILON: f64 = 1e-3;

/// The surface a supported body rests on, captured before integration so
/// every body sees its supporter's velocity from the start of the tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    pub velocity: Vec2,
    pub material: Material,
}

impl Surface {
    fn fixed(material: Material) -> Self {
        Self {
            velocity: Vec2::ZERO,
            material,
        }
    }
}

/// Looks up what `body` rests on. `None` for airborne bodies.
pub fn surface_of(body: &RigidBody, dynamic: &[RigidBody], statics: &[RigidBody], ground: &Ground) -> Option<Surface> {
    match body.support() {
        Support::Airborne => None,
        Support::Ground => Some(Surface::fixed(ground.material)),
        Support::Body(BodyHandle::Dynamic(k)) => Some(dynamic.get(k).map_or(Surface::fixed(ground.material), |o| {
            Surface {
                velocity: o.velocity(),
                material: o.material,
            }
        })),
        Support::Body(BodyHandle::Static(k)) => Some(Surface::fixed(
            statics.get(k).map_or(ground.material, |o| o.material),
        )),
    }
}

/// Vertical velocity of a body that just got supported: hard landings
/// bounce, everything else settles.
pub fn settle_vertical(vy: f64, restitution: f64, bounce_threshold: f64) -> f64 {
    if vy < -bounce_threshold {
        -vy * restitution
    } else {
        0.0
    }
}

/// Horizontal friction for a body resting on `surface`.
///
/// Returns the new horizontal velocity and the horizontal force to apply.
/// The friction magnitude comes from the body's own weight, never from the
/// load stacked on it. A body at rest relative to the surface stays there
/// while the drive is within the static friction limit; otherwise kinetic
/// friction opposes the motion (or the drive, when starting from rest).
pub fn surface_friction(
    body: &RigidBody,
    vx: f64,
    surface: &Surface,
    drive: f64,
    vertical_gravity: f64,
    dt: f64,
) -> (f64, f64) {
    let normal = body.weight(vertical_gravity);
    let relative = vx - surface.velocity.x;
    let kinetic = body.material.combined_kinetic_friction(&surface.material) * normal;

    if relative.abs() <= FRICTION_EPSILON {
        let static_limit = body.material.combined_static_friction(&surface.material) * normal;
        if drive.abs() <= static_limit {
            return (surface.velocity.x, 0.0);
        }
        return (vx, drive - drive.signum() * kinetic);
    }

    // Friction never reverses the sliding direction within one tick
    let direction = relative.signum();
    let max_friction = (body.mass() * relative.abs() / dt + direction * drive).max(0.0);
    (vx, drive - direction * kinetic.min(max_friction))
}

/// Integrates one dynamic body with semi-implicit Euler.
pub fn integrate_body(body: &mut RigidBody, surface: Option<Surface>, env: &Environment, settings: &SolverSettings, dt: f64) {
    body.clear_force();
    let mut velocity = body.velocity();

    // --- Forces --- //
    match surface {
        Some(surface) => {
            velocity.y = settle_vertical(velocity.y, body.material.restitution, settings.bounce_threshold);
            if body.has_finite_mass() {
                let drive = env.incline_drive(body.mass());
                let (vx, fx) = surface_friction(body, velocity.x, &surface, drive, env.vertical_gravity(), dt);
                velocity.x = vx;
                body.apply_force(Vec2::new(fx, 0.0));
            }
        }
        None => {
            if body.has_finite_mass() {
                body.apply_force(env.gravity_force(body.mass()));
            }
        }
    }

    // --- Linear Motion --- //
    // v = v + (F / m) * dt, then p = p + v * dt
    velocity += body.force() * (body.inv_mass() * dt);
    body.set_velocity(velocity);
    body.position += velocity * dt;
}

/// Keeps a body above the ground and, if configured, inside the world
/// bounds. Velocity pointing out of the bounds is zeroed.
pub fn apply_boundaries(body: &mut RigidBody, ground: &Ground, bounds: Option<&AABB>) {
    ground.lift_out(body);

    let Some(region) = bounds else {
        return;
    };
    let half = body.shape().half_extents();
    let mut velocity = body.velocity();

    if body.left() < region.min.x {
        body.position.x = region.min.x + half.x;
        velocity.x = velocity.x.max(0.0);
    } else if body.right() > region.max.x {
        body.position.x = region.max.x - half.x;
        velocity.x = velocity.x.min(0.0);
    }
    if body.bottom() < region.min.y {
        body.position.y = region.min.y + half.y;
        velocity.y = velocity.y.max(0.0);
    } else if body.top() > region.max.y {
        body.position.y = region.max.y - half.y;
        velocity.y = velocity.y.min(0.0);
    }
    body.set_velocity(velocity);
}

/// Force pipeline and integration for every dynamic body.
pub fn integrate(
    dynamic: &mut [RigidBody],
    statics: &[RigidBody],
    ground: &Ground,
    env: &Environment,
    settings: &SolverSettings,
    dt: f64,
) {
    let surfaces: Vec<Option<Surface>> = {
        let bodies: &[RigidBody] = dynamic;
        bodies
            .iter()
            .map(|body| surface_of(body, bodies, statics, ground))
            .collect()
    };

    for (body, surface) in dynamic.iter_mut().zip(surfaces) {
        integrate_body(body, surface, env, settings, dt);
        apply_boundaries(body, ground, env.bounds());
    }
}
