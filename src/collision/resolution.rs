//! Impulse-based collision response.
//!
//! Every overlapping pair is resolved once per tick: dynamic pairs first in
//! list order, then each dynamic body against each static body. Walls and
//! slopes have dedicated resolvers; other statics use the pair resolver
//! with an infinite mass.

use crate::collision::detection::bodies_overlap;
use crate::collision::manifold::{self, Contact};
use crate::config::SolverSettings;
use crate::objects::{BodyHandle, RigidBody};
use crate::shapes::Shape;

/// Gap left between a body and the wall face it was pushed out of.
pub const WALL_SEPARATION: f64 = 1e-6;

/// Normal speed on a slope below which the body settles instead of bouncing.
pub const SLOPE_SETTLE_SPEED: f64 = 0.5;

/// Share of the kinetic friction coefficient removed from the tangential
/// speed on every slope contact.
pub const SLOPE_FRICTION_DECAY: f64 = 0.01;

/// Slopes push penetrating bodies slightly past the surface.
pub const SLOPE_PUSH_MARGIN: f64 = 1.01;

/// Returns two distinct mutable bodies of the slice. Requires `i < j`.
fn pair_mut(bodies: &mut [RigidBody], i: usize, j: usize) -> (&mut RigidBody, &mut RigidBody) {
    debug_assert!(i < j, "pair indices must be ordered");
    let (head, tail) = bodies.split_at_mut(j);
    (&mut head[i], &mut tail[0])
}

/// Share of the penetration to remove along the contact normal.
fn correction_amount(depth: f64, settings: &SolverSettings) -> f64 {
    (depth - settings.positional_correction_slop).max(0.0) * settings.positional_correction_percent
}

/// Resolves a contact between two dynamic bodies, `contact.normal` pointing
/// from `a` to `b`.
///
/// `pinned` names a body that only takes the velocity impulse and is not
/// moved by the positional correction (the supporter of the other body).
/// Returns false when the bodies are already separating.
pub fn resolve_pair(
    a: &mut RigidBody,
    b: &mut RigidBody,
    contact: &Contact,
    settings: &SolverSettings,
    pinned: Option<Pinned>,
) -> bool {
    let normal = contact.normal;
    let relative_velocity_normal = (b.velocity() - a.velocity()).dot(normal);
    if relative_velocity_normal > 0.0 {
        return false;
    }

    let inv_mass_sum = a.inv_mass() + b.inv_mass();
    if inv_mass_sum <= 0.0 {
        return false;
    }

    let e = a.material.combined_restitution(&b.material);
    let j = -(1.0 + e) * relative_velocity_normal / inv_mass_sum;
    let impulse = normal * j;
    a.set_velocity(a.velocity() - impulse * a.inv_mass());
    b.set_velocity(b.velocity() + impulse * b.inv_mass());

    let (weight_a, weight_b) = match pinned {
        Some(Pinned::A) => (0.0, b.inv_mass()),
        Some(Pinned::B) => (a.inv_mass(), 0.0),
        None => (a.inv_mass(), b.inv_mass()),
    };
    let total = weight_a + weight_b;
    let amount = correction_amount(contact.depth, settings);
    if amount > 1e-9 && total > 1e-9 {
        let correction = normal * (amount / total);
        a.position -= correction * weight_a;
        b.position += correction * weight_b;
    }

    log::trace!(
        "Resolved {} / {}: j={:.4}, depth={:.4}",
        a.name(),
        b.name(),
        j,
        contact.depth
    );
    true
}

/// Which side of a pair is held in place by the positional correction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pinned {
    A,
    B,
}

/// Resolves a dynamic body against an immovable circle or box.
/// `contact.normal` points from the body towards the obstacle.
pub fn resolve_static_contact(
    body: &mut RigidBody,
    obstacle: &RigidBody,
    contact: &Contact,
    settings: &SolverSettings,
) -> bool {
    let normal = contact.normal;
    let approach = body.velocity().dot(normal);
    if approach < 0.0 {
        return false;
    }

    let e = body.material.combined_restitution(&obstacle.material);
    body.set_velocity(body.velocity() - normal * ((1.0 + e) * approach));

    let amount = correction_amount(contact.depth, settings);
    if amount > 1e-9 {
        body.position -= normal * amount;
    }

    log::trace!("Resolved {} against {}", body.name(), obstacle.name());
    true
}

/// Resolves a dynamic body overlapping a wall along the axis of the
/// smaller overlap.
pub fn resolve_wall(body: &mut RigidBody, wall: &RigidBody, settings: &SolverSettings) -> bool {
    let bounds = body.aabb();
    let wall_bounds = wall.aabb();
    let overlap_x = bounds.max.x.min(wall_bounds.max.x) - bounds.min.x.max(wall_bounds.min.x);
    let overlap_y = bounds.max.y.min(wall_bounds.max.y) - bounds.min.y.max(wall_bounds.min.y);
    if overlap_x <= 0.0 || overlap_y <= 0.0 {
        return false;
    }

    let mut velocity = body.velocity();
    if overlap_x <= overlap_y {
        let from_left = body.position.x < wall.position.x;
        let moving_in = if from_left { velocity.x > 0.0 } else { velocity.x < 0.0 };
        if moving_in {
            velocity.x = -velocity.x * settings.wall_restitution;
        }
        if from_left {
            body.position.x -= bounds.max.x - wall_bounds.min.x + WALL_SEPARATION;
        } else {
            body.position.x += wall_bounds.max.x - bounds.min.x + WALL_SEPARATION;
        }
    } else if body.position.y >= wall.position.y {
        // Landed on top
        body.position.y += wall_bounds.max.y - bounds.min.y;
        if velocity.y < -settings.bounce_threshold {
            velocity.y = -velocity.y * body.material.restitution;
        } else if velocity.y < 0.0 {
            velocity.y = 0.0;
        }
    } else {
        body.position.y -= bounds.max.y - wall_bounds.min.y + WALL_SEPARATION;
        if velocity.y > 0.0 {
            velocity.y = -velocity.y * body.material.restitution;
        }
    }
    body.set_velocity(velocity);

    log::trace!("{} hit wall {}", body.name(), wall.name());
    true
}

/// Resolves a dynamic body penetrating a slope: the normal velocity is
/// reflected (or removed when slow), the tangential velocity decays with
/// friction, and the body is pushed out along the slope normal.
pub fn resolve_slope(body: &mut RigidBody, slope_body: &RigidBody) -> bool {
    let Shape::Slope(slope) = slope_body.shape() else {
        return false;
    };

    let relative = body.position - slope_body.position;
    let mut normal = slope.normal();
    if relative.dot(normal) < 0.0 {
        normal = -normal;
    }

    let penetration = relative.dot(normal) - body.shape().support_radius(normal);
    if penetration >= 0.0 {
        return false;
    }

    let velocity = body.velocity();
    let normal_speed = velocity.dot(normal);
    if normal_speed > 0.0 {
        return false;
    }

    let restitution = if normal_speed.abs() < SLOPE_SETTLE_SPEED {
        0.0
    } else {
        body.material.restitution
    };
    let friction = body.material.combined_kinetic_friction(&slope_body.material);
    let decay = (1.0 - friction * SLOPE_FRICTION_DECAY).max(0.0);

    let tangential = (velocity - normal * normal_speed) * decay;
    body.set_velocity(tangential + normal * (-normal_speed * restitution));
    body.position -= normal * (penetration * SLOPE_PUSH_MARGIN);

    log::trace!("{} on slope {}: penetration {:.4}", body.name(), slope_body.name(), -penetration);
    true
}

/// Runs one resolution pass over every overlapping pair. Returns the
/// number of pairs that were resolved.
pub fn resolve_collisions(dynamic: &mut [RigidBody], statics: &[RigidBody], settings: &SolverSettings) -> usize {
    let mut resolved = 0;

    for i in 0..dynamic.len() {
        for j in (i + 1)..dynamic.len() {
            let (a, b) = pair_mut(dynamic, i, j);
            if !a.aabb().overlaps(&b.aabb()) {
                continue;
            }
            let Some(contact) = manifold::contact(a, b) else {
                continue;
            };
            let pinned = if a.supporter() == Some(BodyHandle::Dynamic(j)) {
                Some(Pinned::B)
            } else if b.supporter() == Some(BodyHandle::Dynamic(i)) {
                Some(Pinned::A)
            } else {
                None
            };
            if resolve_pair(a, b, &contact, settings, pinned) {
                resolved += 1;
            }
        }
    }

    for body in dynamic.iter_mut() {
        for obstacle in statics {
            if !body.aabb().overlaps(&obstacle.aabb()) {
                continue;
            }
            let hit = match obstacle.shape() {
                Shape::Wall(_) => bodies_overlap(body, obstacle) && resolve_wall(body, obstacle, settings),
                Shape::Slope(_) => bodies_overlap(body, obstacle) && resolve_slope(body, obstacle),
                Shape::Circle(_) | Shape::Rect(_) => match manifold::contact(body, obstacle) {
                    Some(contact) => resolve_static_contact(body, obstacle, &contact, settings),
                    None => false,
                },
            };
            if hit {
                resolved += 1;
            }
        }
    }

    resolved
}
