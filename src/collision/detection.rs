//! Boolean overlap tests for every pair of shape kinds.
//!
//! Every test treats touching shapes as overlapping. Rect and Wall share
//! the same geometry and therefore the same tests.

use crate::math::vec2::Vec2;
use crate::objects::RigidBody;
use crate::shapes::{Shape, Slope};

/// Finds the point on a line segment closest to a given point.
/// Returns the closest point and the parameter `t` (0 <= t <= 1) along the segment.
pub(crate) fn closest_point_on_segment(segment_a: Vec2, segment_b: Vec2, point: Vec2) -> (Vec2, f64) {
    let segment_vec = segment_b - segment_a;
    let length_sq = segment_vec.magnitude_squared();
    if length_sq < 1e-12 {
        return (segment_a, 0.0);
    }

    let t = ((point - segment_a).dot(segment_vec) / length_sq).clamp(0.0, 1.0);
    (segment_a + segment_vec * t, t)
}

/// Intersection of two segments. Returns the intersection point and the
/// parameters (t, u) along each segment; collinear overlapping segments
/// report the first shared point.
pub(crate) fn intersect_line_segments(a1: Vec2, a2: Vec2, b1: Vec2, b2: Vec2) -> Option<(Vec2, f64, f64)> {
    let d1 = a2 - a1;
    let d2 = b2 - b1;
    let delta_start = b1 - a1;

    let denominator = d1.cross(d2);

    if denominator.abs() < 1e-10 {
        // Parallel: only collinear segments can share points
        if delta_start.cross(d1).abs() > 1e-10 {
            return None;
        }
        let length_sq = d1.magnitude_squared();
        if length_sq < 1e-12 {
            return None;
        }
        let t0 = delta_start.dot(d1) / length_sq;
        let t1 = (b2 - a1).dot(d1) / length_sq;
        let (lo, hi) = (t0.min(t1), t0.max(t1));
        if hi < 0.0 || lo > 1.0 {
            return None;
        }
        let t = lo.max(0.0);
        let point = a1 + d1 * t;
        let u = if d2.magnitude_squared() < 1e-12 {
            0.0
        } else {
            (point - b1).dot(d2) / d2.magnitude_squared()
        };
        return Some((point, t, u));
    }

    let t = delta_start.cross(d2) / denominator;
    let u = delta_start.cross(d1) / denominator;

    if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
        Some((a1 + d1 * t, t, u))
    } else {
        None
    }
}

/// Circle–circle: squared center distance against the squared radius sum.
pub fn circles_overlap(center_a: Vec2, radius_a: f64, center_b: Vec2, radius_b: f64) -> bool {
    let radii = radius_a + radius_b;
    center_a.distance_squared(center_b) <= radii * radii
}

/// Circle–box: clamp the circle center into the box and compare the
/// distance to that closest point with the radius.
pub fn circle_rect_overlap(center: Vec2, radius: f64, rect_center: Vec2, half_extents: Vec2) -> bool {
    let closest = center.clamp(rect_center - half_extents, rect_center + half_extents);
    center.distance_squared(closest) <= radius * radius
}

/// Box–box: no separating axis among x and y.
pub fn rects_overlap(center_a: Vec2, half_a: Vec2, center_b: Vec2, half_b: Vec2) -> bool {
    let d = center_b - center_a;
    d.x.abs() <= half_a.x + half_b.x && d.y.abs() <= half_a.y + half_b.y
}

/// Circle–slope, evaluated in the slope's local frame.
pub fn circle_slope_overlap(center: Vec2, radius: f64, slope_center: Vec2, slope: &Slope) -> bool {
    let local = (center - slope_center).rotate(-slope.angle);
    let half_length = slope.length * 0.5;
    let clamped = Vec2::new(local.x.clamp(-half_length, half_length), 0.0);
    local.distance_squared(clamped) <= radius * radius
}

/// Box–slope: separating-axis test of the box against the segment on the
/// x axis, the y axis and the slope normal.
pub fn rect_slope_overlap(rect_center: Vec2, half_extents: Vec2, slope_center: Vec2, slope: &Slope) -> bool {
    let (start, end) = slope.endpoints(slope_center);
    let rect_min = rect_center - half_extents;
    let rect_max = rect_center + half_extents;

    if start.x.max(end.x) < rect_min.x || start.x.min(end.x) > rect_max.x {
        return false;
    }
    if start.y.max(end.y) < rect_min.y || start.y.min(end.y) > rect_max.y {
        return false;
    }

    let normal = slope.normal();
    let distance = (start - rect_center).dot(normal);
    let projected_radius = half_extents.x * normal.x.abs() + half_extents.y * normal.y.abs();
    distance.abs() <= projected_radius
}

/// Slope–slope: the two segments share at least one point.
pub fn slopes_intersect(center_a: Vec2, slope_a: &Slope, center_b: Vec2, slope_b: &Slope) -> bool {
    let (a1, a2) = slope_a.endpoints(center_a);
    let (b1, b2) = slope_b.endpoints(center_b);
    intersect_line_segments(a1, a2, b1, b2).is_some()
}

/// Dispatches to the pair test for two shapes placed at the given centers.
pub fn shapes_overlap(shape_a: &Shape, center_a: Vec2, shape_b: &Shape, center_b: Vec2) -> bool {
    match (shape_a, shape_b) {
        (Shape::Circle(a), Shape::Circle(b)) => circles_overlap(center_a, a.radius, center_b, b.radius),
        (Shape::Circle(c), Shape::Rect(r) | Shape::Wall(r)) => {
            circle_rect_overlap(center_a, c.radius, center_b, r.half_extents())
        }
        (Shape::Rect(r) | Shape::Wall(r), Shape::Circle(c)) => {
            circle_rect_overlap(center_b, c.radius, center_a, r.half_extents())
        }
        (Shape::Rect(a) | Shape::Wall(a), Shape::Rect(b) | Shape::Wall(b)) => {
            rects_overlap(center_a, a.half_extents(), center_b, b.half_extents())
        }
        (Shape::Circle(c), Shape::Slope(s)) => circle_slope_overlap(center_a, c.radius, center_b, s),
        (Shape::Slope(s), Shape::Circle(c)) => circle_slope_overlap(center_b, c.radius, center_a, s),
        (Shape::Rect(r) | Shape::Wall(r), Shape::Slope(s)) => {
            rect_slope_overlap(center_a, r.half_extents(), center_b, s)
        }
        (Shape::Slope(s), Shape::Rect(r) | Shape::Wall(r)) => {
            rect_slope_overlap(center_b, r.half_extents(), center_a, s)
        }
        (Shape::Slope(a), Shape::Slope(b)) => slopes_intersect(center_a, a, center_b, b),
    }
}

/// Overlap test between two bodies at their current positions.
pub fn bodies_overlap(a: &RigidBody, b: &RigidBody) -> bool {
    shapes_overlap(a.shape(), a.position, b.shape(), b.position)
}
