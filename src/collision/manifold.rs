//! Contact normal and penetration depth, computed on demand for resolution.

use crate::collision::detection::{closest_point_on_segment, intersect_line_segments};
use crate::math::vec2::Vec2;
use crate::objects::RigidBody;
use crate::shapes::{Shape, Slope};

/// Stores information about a collision between two shapes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// The collision normal, pointing from shape A towards shape B.
    pub normal: Vec2,
    /// The amount of penetration between the shapes (0 when touching).
    pub depth: f64,
}

impl Contact {
    /// The same contact seen from the other shape.
    pub fn flipped(self) -> Self {
        Contact {
            normal: -self.normal,
            depth: self.depth,
        }
    }
}

const DEGENERATE_DISTANCE: f64 = 1e-10;

fn sign(value: f64) -> f64 {
    if value < 0.0 {
        -1.0
    } else {
        1.0
    }
}

/// Circle against circle. `None` when apart or when the centers coincide,
/// since no normal can be derived then.
pub fn circle_circle(center_a: Vec2, radius_a: f64, center_b: Vec2, radius_b: f64) -> Option<Contact> {
    let dist_vec = center_b - center_a;
    let radii_sum = radius_a + radius_b;
    let dist_sq = dist_vec.magnitude_squared();
    if dist_sq > radii_sum * radii_sum {
        return None;
    }
    let distance = dist_sq.sqrt();
    if distance < DEGENERATE_DISTANCE {
        return None;
    }
    Some(Contact {
        normal: dist_vec / distance,
        depth: radii_sum - distance,
    })
}

/// Circle (A) against an axis-aligned box (B).
pub fn circle_rect(center: Vec2, radius: f64, rect_center: Vec2, half_extents: Vec2) -> Option<Contact> {
    let min = rect_center - half_extents;
    let max = rect_center + half_extents;
    let closest = center.clamp(min, max);
    let to_closest = closest - center;
    let dist_sq = to_closest.magnitude_squared();

    if dist_sq > radius * radius {
        return None;
    }

    if dist_sq > DEGENERATE_DISTANCE * DEGENERATE_DISTANCE {
        let distance = dist_sq.sqrt();
        return Some(Contact {
            normal: to_closest / distance,
            depth: radius - distance,
        });
    }

    // Center inside the box: leave through the nearest face
    let faces = [
        (center.x - min.x, Vec2::new(1.0, 0.0)),
        (max.x - center.x, Vec2::new(-1.0, 0.0)),
        (center.y - min.y, Vec2::new(0.0, 1.0)),
        (max.y - center.y, Vec2::new(0.0, -1.0)),
    ];
    let (face_distance, normal) = faces
        .iter()
        .copied()
        .fold((f64::INFINITY, Vec2::ZERO), |best, face| if face.0 < best.0 { face } else { best });
    Some(Contact {
        normal,
        depth: radius + face_distance,
    })
}

/// Box against box, resolved along the axis of least penetration.
pub fn rect_rect(center_a: Vec2, half_a: Vec2, center_b: Vec2, half_b: Vec2) -> Option<Contact> {
    let d = center_b - center_a;
    let overlap_x = half_a.x + half_b.x - d.x.abs();
    let overlap_y = half_a.y + half_b.y - d.y.abs();
    if overlap_x < 0.0 || overlap_y < 0.0 {
        return None;
    }
    if overlap_x < overlap_y {
        Some(Contact {
            normal: Vec2::new(sign(d.x), 0.0),
            depth: overlap_x,
        })
    } else {
        Some(Contact {
            normal: Vec2::new(0.0, sign(d.y)),
            depth: overlap_y,
        })
    }
}

/// Circle (A) against a slope (B).
pub fn circle_slope(center: Vec2, radius: f64, slope_center: Vec2, slope: &Slope) -> Option<Contact> {
    let (start, end) = slope.endpoints(slope_center);
    let (closest, _) = closest_point_on_segment(start, end, center);
    let to_closest = closest - center;
    let dist_sq = to_closest.magnitude_squared();
    if dist_sq > radius * radius {
        return None;
    }
    let distance = dist_sq.sqrt();
    let normal = if distance > DEGENERATE_DISTANCE {
        to_closest / distance
    } else {
        // Center on the ramp: push out through the upper side
        -slope.normal()
    };
    Some(Contact {
        normal,
        depth: radius - distance,
    })
}

/// Box (A) against a slope (B): separating axes x, y and the slope normal,
/// keeping the one with the smallest overlap.
pub fn rect_slope(rect_center: Vec2, half_extents: Vec2, slope_center: Vec2, slope: &Slope) -> Option<Contact> {
    let (start, end) = slope.endpoints(slope_center);
    let rect_min = rect_center - half_extents;
    let rect_max = rect_center + half_extents;

    let axis_overlap = |seg_lo: f64, seg_hi: f64, lo: f64, hi: f64| seg_hi.min(hi) - seg_lo.max(lo);

    let seg_min = Vec2::new(start.x.min(end.x), start.y.min(end.y));
    let seg_max = Vec2::new(start.x.max(end.x), start.y.max(end.y));
    let overlap_x = axis_overlap(seg_min.x, seg_max.x, rect_min.x, rect_max.x);
    let overlap_y = axis_overlap(seg_min.y, seg_max.y, rect_min.y, rect_max.y);

    let slope_normal = slope.normal();
    let distance = (start - rect_center).dot(slope_normal);
    let projected_radius = half_extents.x * slope_normal.x.abs() + half_extents.y * slope_normal.y.abs();
    let overlap_n = projected_radius - distance.abs();

    if overlap_x < 0.0 || overlap_y < 0.0 || overlap_n < 0.0 {
        return None;
    }

    let segment_center = (seg_min + seg_max) * 0.5;
    let candidates = [
        (overlap_n, slope_normal * sign(distance)),
        (overlap_x, Vec2::new(sign(segment_center.x - rect_center.x), 0.0)),
        (overlap_y, Vec2::new(0.0, sign(segment_center.y - rect_center.y))),
    ];
    let (depth, normal) = candidates
        .iter()
        .copied()
        .fold((f64::INFINITY, Vec2::ZERO), |best, c| if c.0 < best.0 { c } else { best });
    Some(Contact { normal, depth })
}

/// Slope against slope: a crossing has no depth; the normal is B's.
pub fn slope_slope(center_a: Vec2, slope_a: &Slope, center_b: Vec2, slope_b: &Slope) -> Option<Contact> {
    let (a1, a2) = slope_a.endpoints(center_a);
    let (b1, b2) = slope_b.endpoints(center_b);
    intersect_line_segments(a1, a2, b1, b2).map(|_| Contact {
        normal: slope_b.normal(),
        depth: 0.0,
    })
}

/// Contact between two placed shapes, normal pointing from A to B.
pub fn shape_contact(shape_a: &Shape, center_a: Vec2, shape_b: &Shape, center_b: Vec2) -> Option<Contact> {
    match (shape_a, shape_b) {
        (Shape::Circle(a), Shape::Circle(b)) => circle_circle(center_a, a.radius, center_b, b.radius),
        (Shape::Circle(c), Shape::Rect(r) | Shape::Wall(r)) => {
            circle_rect(center_a, c.radius, center_b, r.half_extents())
        }
        (Shape::Rect(a) | Shape::Wall(a), Shape::Rect(b) | Shape::Wall(b)) => {
            rect_rect(center_a, a.half_extents(), center_b, b.half_extents())
        }
        (Shape::Circle(c), Shape::Slope(s)) => circle_slope(center_a, c.radius, center_b, s),
        (Shape::Rect(r) | Shape::Wall(r), Shape::Slope(s)) => {
            rect_slope(center_a, r.half_extents(), center_b, s)
        }
        (Shape::Slope(a), Shape::Slope(b)) => slope_slope(center_a, a, center_b, b),
        // Remaining combinations are mirrors of the ones above
        (Shape::Rect(_) | Shape::Wall(_) | Shape::Slope(_), _) => {
            shape_contact(shape_b, center_b, shape_a, center_a).map(Contact::flipped)
        }
    }
}

/// Contact between two bodies at their current positions.
pub fn contact(a: &RigidBody, b: &RigidBody) -> Option<Contact> {
    shape_contact(a.shape(), a.position, b.shape(), b.position)
}
