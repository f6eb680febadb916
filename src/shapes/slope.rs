use crate::math::vec2::Vec2;

/// A straight ramp of `length`, tilted `angle` radians from the horizontal
/// and centered on its body's position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slope {
    pub length: f64,
    pub angle: f64,
}

impl Slope {
    pub fn new(length: f64, angle: f64) -> Self {
        Self { length, angle }
    }

    /// Unit vector along the ramp, pointing from its start to its end.
    pub fn direction(&self) -> Vec2 {
        Vec2::from_angle(self.angle)
    }

    /// Unit normal on the upper side of the ramp, `(-sin θ, cos θ)`.
    pub fn normal(&self) -> Vec2 {
        self.direction().perpendicular()
    }

    /// World-space endpoints `(start, end)` for a ramp centered at `center`.
    /// For angles within (-90°, 90°) `start` is the end with the lower x.
    pub fn endpoints(&self, center: Vec2) -> (Vec2, Vec2) {
        let half = self.direction() * (self.length * 0.5);
        (center - half, center + half)
    }

    /// Point at `ratio` (0 = start, 1 = end) along the ramp.
    pub fn point_at(&self, center: Vec2, ratio: f64) -> Vec2 {
        let (start, _) = self.endpoints(center);
        start + self.direction() * (self.length * ratio.clamp(0.0, 1.0))
    }
}
