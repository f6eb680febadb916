pub mod circle;
pub mod rect;
pub mod slope;

pub use circle::Circle;
pub use rect::Rect;
pub use slope::Slope;

use serde::{Deserialize, Serialize};

use crate::error::{PhysicsError, Result};
use crate::math::vec2::Vec2;

/// Geometry of a body. Positions live on the body; shapes are centered on it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Circle(Circle),
    /// Axis-aligned box that may be dynamic or static.
    Rect(Rect),
    /// Immovable axis-aligned obstacle with its own collision response.
    Wall(Rect),
    /// Immovable zero-thickness ramp.
    Slope(Slope),
}

/// Type tag exposed to renderers and error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    Circle,
    Box,
    Wall,
    Slope,
}

impl Shape {
    pub fn circle(radius: f64) -> Self {
        Shape::Circle(Circle::new(radius))
    }

    pub fn rect(width: f64, height: f64) -> Self {
        Shape::Rect(Rect::new(width, height))
    }

    pub fn wall(width: f64, height: f64) -> Self {
        Shape::Wall(Rect::new(width, height))
    }

    /// Slope of the given length, `angle` radians above the horizontal.
    pub fn slope(length: f64, angle: f64) -> Self {
        Shape::Slope(Slope::new(length, angle))
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Circle(_) => ShapeKind::Circle,
            Shape::Rect(_) => ShapeKind::Box,
            Shape::Wall(_) => ShapeKind::Wall,
            Shape::Slope(_) => ShapeKind::Slope,
        }
    }

    /// Walls and slopes can never be moved by the integrator.
    pub fn is_static_only(&self) -> bool {
        matches!(self, Shape::Wall(_) | Shape::Slope(_))
    }

    /// Checks that every dimension is finite and strictly positive.
    pub fn validate(&self) -> Result<()> {
        let positive = |name: &str, value: f64| {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(PhysicsError::InvalidGeometry(format!(
                    "{name} must be finite and > 0, got {value}"
                )))
            }
        };
        match self {
            Shape::Circle(c) => positive("radius", c.radius),
            Shape::Rect(r) | Shape::Wall(r) => {
                positive("width", r.width)?;
                positive("height", r.height)
            }
            Shape::Slope(s) => {
                positive("length", s.length)?;
                if s.angle.is_finite() {
                    Ok(())
                } else {
                    Err(PhysicsError::InvalidGeometry(format!(
                        "slope angle must be finite, got {}",
                        s.angle
                    )))
                }
            }
        }
    }

    /// Half-size of the axis-aligned bounding box around the shape's center.
    pub fn half_extents(&self) -> Vec2 {
        match self {
            Shape::Circle(c) => Vec2::new(c.radius, c.radius),
            Shape::Rect(r) | Shape::Wall(r) => r.half_extents(),
            Shape::Slope(s) => {
                let half = s.direction() * (s.length * 0.5);
                Vec2::new(half.x.abs(), half.y.abs())
            }
        }
    }

    /// Distance from the center to the shape's boundary along the unit
    /// vector `direction`. For a box this is its projection radius.
    pub fn support_radius(&self, direction: Vec2) -> f64 {
        match self {
            Shape::Circle(c) => c.radius,
            Shape::Rect(r) | Shape::Wall(r) => {
                let half = r.half_extents();
                half.x * direction.x.abs() + half.y * direction.y.abs()
            }
            Shape::Slope(s) => s.length * 0.5 * s.direction().dot(direction).abs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_PI_4;

    #[test]
    fn test_shape_kind_tags() {
        assert_eq!(Shape::circle(1.0).kind(), ShapeKind::Circle);
        assert_eq!(Shape::rect(1.0, 2.0).kind(), ShapeKind::Box);
        assert_eq!(Shape::wall(1.0, 2.0).kind(), ShapeKind::Wall);
        assert_eq!(Shape::slope(4.0, 0.3).kind(), ShapeKind::Slope);
        assert!(Shape::wall(1.0, 1.0).is_static_only());
        assert!(!Shape::rect(1.0, 1.0).is_static_only());
    }

    #[test]
    fn test_shape_validate() {
        assert!(Shape::circle(0.5).validate().is_ok());
        assert!(matches!(
            Shape::circle(-1.0).validate(),
            Err(PhysicsError::InvalidGeometry(_))
        ));
        assert!(Shape::rect(1.0, 0.0).validate().is_err());
        assert!(Shape::wall(f64::NAN, 1.0).validate().is_err());
        assert!(Shape::slope(3.0, f64::INFINITY).validate().is_err());
    }

    #[test]
    fn test_half_extents_of_slope() {
        let half = Shape::slope(2.0, FRAC_PI_4).half_extents();
        let expected = FRAC_PI_4.cos();
        assert_abs_diff_eq!(half.x, expected, epsilon = 1e-12);
        assert_abs_diff_eq!(half.y, expected, epsilon = 1e-12);
    }

    #[test]
    fn test_support_radius_of_box() {
        let shape = Shape::rect(2.0, 4.0);
        assert_abs_diff_eq!(shape.support_radius(Vec2::UP), 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(shape.support_radius(Vec2::RIGHT), 1.0, epsilon = 1e-12);
        let diagonal = Vec2::new(1.0, 1.0).normalize();
        assert_abs_diff_eq!(
            shape.support_radius(diagonal),
            3.0 / 2.0f64.sqrt(),
            epsilon = 1e-12
        );
    }
}
