//! Support graph: which surface every dynamic body rests on this tick.

use crate::collision::manifold::shape_contact;
use crate::config::SolverSettings;
use crate::math::vec2::Vec2;
use crate::objects::{BodyHandle, Ground, RigidBody, Support, SUPPORT_TOLERANCE};
use crate::shapes::Shape;

/// Smallest upward component of the contact normal for a contact to hold
/// a body up. Side contacts never count as support.
pub const MIN_SUPPORT_NORMAL_Y: f64 = 0.5;

/// Marks every dynamic body as airborne.
pub fn reset_support_states(dynamic: &mut [RigidBody]) {
    for body in dynamic.iter_mut() {
        body.set_support(Support::Airborne);
    }
}

/// True when `upper` rests on top of `lower`.
///
/// The upper body is lowered by [`SUPPORT_TOLERANCE`] first so exactly
/// touching bodies count. Slopes never support anything.
pub fn rests_on(upper: &RigidBody, lower: &RigidBody) -> bool {
    if matches!(lower.shape(), Shape::Slope(_)) {
        return false;
    }
    if upper.position.y <= lower.position.y {
        return false;
    }
    let lowered = upper.position - Vec2::new(0.0, SUPPORT_TOLERANCE);
    match shape_contact(lower.shape(), lower.position, upper.shape(), lowered) {
        Some(contact) => contact.normal.y >= MIN_SUPPORT_NORMAL_Y,
        None => false,
    }
}

/// Pairwise check between two dynamic bodies: `upper` must rest on
/// `lower` and move with it vertically.
pub fn is_supported_by(upper: &RigidBody, lower: &RigidBody, settings: &SolverSettings) -> bool {
    (upper.velocity().y - lower.velocity().y).abs() < settings.support_velocity_threshold && rests_on(upper, lower)
}

/// First matching support for the dynamic body at `index`: the ground,
/// then static bodies, then other dynamic bodies, each in list order.
fn find_support(
    index: usize,
    dynamic: &[RigidBody],
    statics: &[RigidBody],
    ground: &Ground,
    settings: &SolverSettings,
) -> Support {
    let body = &dynamic[index];

    if ground.is_touching(body) {
        return Support::Ground;
    }

    if let Some(k) = statics.iter().position(|fixed| rests_on(body, fixed)) {
        return Support::Body(BodyHandle::Static(k));
    }

    dynamic
        .iter()
        .enumerate()
        .find(|(k, other)| *k != index && is_supported_by(body, other, settings))
        .map_or(Support::Airborne, |(k, _)| Support::Body(BodyHandle::Dynamic(k)))
}

/// Rebuilds the support graph from scratch. Returns the number of
/// supported bodies.
pub fn detect_supports(
    dynamic: &mut [RigidBody],
    statics: &[RigidBody],
    ground: &Ground,
    settings: &SolverSettings,
) -> usize {
    reset_support_states(dynamic);

    let supports: Vec<Support> = {
        let bodies: &[RigidBody] = dynamic;
        (0..bodies.len())
            .map(|index| find_support(index, bodies, statics, ground, settings))
            .collect()
    };

    let mut supported = 0;
    for (body, support) in dynamic.iter_mut().zip(supports) {
        if support.is_supported() {
            supported += 1;
        }
        body.set_support(support);
    }
    supported
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(name: &str, x: f64, y: f64) -> RigidBody {
        RigidBody::dynamic(name, Shape::rect(1.0, 1.0), 1.0)
            .unwrap()
            .with_position(Vec2::new(x, y))
    }

    #[test]
    fn test_stack_support_chain() {
        let mut dynamic = vec![block("bottom", 0.0, 0.5), block("middle", 0.0, 1.5), block("top", 0.0, 2.5)];
        let supported = detect_supports(&mut dynamic, &[], &Ground::default(), &SolverSettings::default());

        assert_eq!(supported, 3);
        assert_eq!(dynamic[0].support(), Support::Ground);
        assert_eq!(dynamic[1].supporter(), Some(BodyHandle::Dynamic(0)));
        assert_eq!(dynamic[2].supporter(), Some(BodyHandle::Dynamic(1)));
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut dynamic = vec![block("a", 0.0, 0.5), block("b", 0.0, 1.5)];
        detect_supports(&mut dynamic, &[], &Ground::default(), &SolverSettings::default());

        reset_support_states(&mut dynamic);
        let once: Vec<Support> = dynamic.iter().map(|b| b.support()).collect();
        reset_support_states(&mut dynamic);
        let twice: Vec<Support> = dynamic.iter().map(|b| b.support()).collect();

        assert_eq!(once, twice);
        assert!(once.iter().all(|s| *s == Support::Airborne));
    }

    #[test]
    fn test_fast_relative_motion_breaks_support() {
        let lower = block("lower", 0.0, 5.0);
        let upper = block("upper", 0.0, 6.0).with_velocity(Vec2::new(0.0, -2.0));
        assert!(rests_on(&upper, &lower));
        assert!(!is_supported_by(&upper, &lower, &SolverSettings::default()));
    }

    #[test]
    fn test_side_contact_is_not_support() {
        let wall = RigidBody::fixed("wall", Shape::wall(1.0, 4.0))
            .unwrap()
            .with_position(Vec2::new(1.0, 3.0));
        let body = block("leaning", 0.0, 3.2);
        assert!(!rests_on(&body, &wall));
    }

    #[test]
    fn test_rests_on_static_box_and_wall_top() {
        let shelf = RigidBody::fixed("shelf", Shape::rect(4.0, 1.0))
            .unwrap()
            .with_position(Vec2::new(0.0, 2.0));
        let ledge = RigidBody::fixed("ledge", Shape::wall(4.0, 1.0))
            .unwrap()
            .with_position(Vec2::new(10.0, 2.0));
        let mut dynamic = vec![block("on shelf", 0.5, 3.0), block("on ledge", 10.0, 3.0)];
        detect_supports(&mut dynamic, &[shelf, ledge], &Ground::default(), &SolverSettings::default());

        assert_eq!(dynamic[0].supporter(), Some(BodyHandle::Static(0)));
        assert_eq!(dynamic[1].supporter(), Some(BodyHandle::Static(1)));
    }

    #[test]
    fn test_slope_never_supports() {
        let ramp = RigidBody::fixed("ramp", Shape::slope(10.0, 0.3))
            .unwrap()
            .with_position(Vec2::new(0.0, 5.0));
        let Shape::Slope(slope) = *ramp.shape() else { unreachable!() };
        let ball = RigidBody::dynamic("ball", Shape::circle(0.5), 1.0)
            .unwrap()
            .with_position(ramp.position + slope.normal() * 0.5);

        let mut dynamic = vec![ball];
        detect_supports(&mut dynamic, &[ramp], &Ground::default(), &SolverSettings::default());
        assert_eq!(dynamic[0].support(), Support::Airborne);
    }

    #[test]
    fn test_ground_wins_over_bodies() {
        let mut dynamic = vec![block("a", 0.0, 0.5), block("b", 0.5, 0.5)];
        detect_supports(&mut dynamic, &[], &Ground::default(), &SolverSettings::default());
        assert_eq!(dynamic[0].support(), Support::Ground);
        assert_eq!(dynamic[1].support(), Support::Ground);
    }
}
