use crate::collision::AABB;
use crate::common::Material;
use crate::error::{PhysicsError, Result};
use crate::math::vec2::Vec2;
use crate::shapes::{Shape, ShapeKind};

/// Index of a body in one of the world's two lists.
///
/// Handles are positional: removing a body shifts the handles of the bodies
/// registered after it in the same list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyHandle {
    Dynamic(usize),
    Static(usize),
}

/// What a dynamic body is resting on during the current tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Support {
    #[default]
    Airborne,
    Ground,
    Body(BodyHandle),
}

impl Support {
    pub fn is_supported(&self) -> bool {
        !matches!(self, Support::Airborne)
    }

    /// The supporting body, `None` when airborne or resting on the ground.
    pub fn supporter(&self) -> Option<BodyHandle> {
        match self {
            Support::Body(handle) => Some(*handle),
            _ => None,
        }
    }
}

/// Whether the integrator may move a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyType {
    Dynamic,
    Static,
}

/// Kinematic state captured by snapshots.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KinematicState {
    pub position: Vec2,
    pub velocity: Vec2,
    pub support: Support,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RigidBody {
    pub name: String,
    pub material: Material,
    /// World position of the shape's center. Static bodies may be moved
    /// here directly by editors; the integrator never moves them.
    pub position: Vec2,

    shape: Shape,
    body_type: BodyType,
    velocity: Vec2,
    mass: f64,
    inv_mass: f64, // 0.0 for static bodies and degenerate masses

    // Per-tick state, rebuilt by the pipeline
    force: Vec2,
    normal_force: Vec2,
    support: Support,
}

impl RigidBody {
    /// Creates a dynamic body. Walls and slopes are rejected since they are
    /// immovable by construction.
    ///
    /// A non-positive or infinite `mass` is accepted but the body is then
    /// excluded from force integration.
    pub fn dynamic(name: impl Into<String>, shape: Shape, mass: f64) -> Result<Self> {
        shape.validate()?;
        if shape.is_static_only() {
            return Err(PhysicsError::StaticOnlyShape(shape.kind()));
        }
        let inv_mass = if mass.is_finite() && mass > 0.0 { 1.0 / mass } else { 0.0 };
        Ok(Self {
            name: name.into(),
            material: Material::default(),
            position: Vec2::ZERO,
            shape,
            body_type: BodyType::Dynamic,
            velocity: Vec2::ZERO,
            mass,
            inv_mass,
            force: Vec2::ZERO,
            normal_force: Vec2::ZERO,
            support: Support::Airborne,
        })
    }

    /// Creates a static body with infinite mass.
    pub fn fixed(name: impl Into<String>, shape: Shape) -> Result<Self> {
        shape.validate()?;
        Ok(Self {
            name: name.into(),
            material: Material::default(),
            position: Vec2::ZERO,
            shape,
            body_type: BodyType::Static,
            velocity: Vec2::ZERO,
            mass: f64::INFINITY,
            inv_mass: 0.0,
            force: Vec2::ZERO,
            normal_force: Vec2::ZERO,
            support: Support::Airborne,
        })
    }

    pub fn with_position(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    /// Ignored for static bodies.
    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.set_velocity(velocity);
        self
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn kind(&self) -> ShapeKind {
        self.shape.kind()
    }

    pub fn body_type(&self) -> BodyType {
        self.body_type
    }

    pub fn is_static(&self) -> bool {
        self.body_type == BodyType::Static
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn inv_mass(&self) -> f64 {
        self.inv_mass
    }

    /// True when forces can change this body's velocity.
    pub fn has_finite_mass(&self) -> bool {
        self.inv_mass > 0.0
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Sets the velocity of a dynamic body. No-op for static bodies.
    pub fn set_velocity(&mut self, velocity: Vec2) {
        if self.body_type == BodyType::Dynamic {
            self.velocity = velocity;
        }
    }

    /// Sets the mass of a dynamic body. No-op for static bodies, which keep
    /// their infinite mass.
    pub fn set_mass(&mut self, mass: f64) {
        if self.body_type == BodyType::Static {
            return;
        }
        self.mass = mass;
        self.inv_mass = if mass.is_finite() && mass > 0.0 { 1.0 / mass } else { 0.0 };
    }

    /// Rotates the velocity vector by `angle` radians. The body itself has
    /// no orientation.
    pub fn turn(&mut self, angle: f64) {
        let turned = self.velocity.rotate(angle);
        self.set_velocity(turned);
    }

    /// Weight under the given vertical gravity; zero for bodies excluded
    /// from force integration.
    pub fn weight(&self, vertical_gravity: f64) -> f64 {
        if self.has_finite_mass() {
            self.mass * vertical_gravity
        } else {
            0.0
        }
    }

    /// Force accumulated during the current tick.
    pub fn force(&self) -> Vec2 {
        self.force
    }

    pub fn apply_force(&mut self, force: Vec2) {
        self.force += force;
    }

    pub fn clear_force(&mut self) {
        self.force = Vec2::ZERO;
    }

    /// Downward force this body transmits, recomputed every tick.
    pub fn normal_force(&self) -> Vec2 {
        self.normal_force
    }

    pub(crate) fn set_normal_force(&mut self, normal_force: Vec2) {
        self.normal_force = normal_force;
    }

    pub fn support(&self) -> Support {
        self.support
    }

    pub fn is_supported(&self) -> bool {
        self.support.is_supported()
    }

    pub fn supporter(&self) -> Option<BodyHandle> {
        self.support.supporter()
    }

    pub(crate) fn set_support(&mut self, support: Support) {
        self.support = support;
    }

    pub fn bottom(&self) -> f64 {
        self.position.y - self.shape.half_extents().y
    }

    pub fn top(&self) -> f64 {
        self.position.y + self.shape.half_extents().y
    }

    pub fn left(&self) -> f64 {
        self.position.x - self.shape.half_extents().x
    }

    pub fn right(&self) -> f64 {
        self.position.x + self.shape.half_extents().x
    }

    /// Distance from the center down to the bottom extent.
    pub fn half_height(&self) -> f64 {
        self.shape.half_extents().y
    }

    /// World-space bounding box.
    pub fn aabb(&self) -> AABB {
        AABB::from_center(self.position, self.shape.half_extents())
    }

    pub fn kinematic_state(&self) -> KinematicState {
        KinematicState {
            position: self.position,
            velocity: self.velocity,
            support: self.support,
        }
    }

    pub fn restore_kinematic_state(&mut self, state: KinematicState) {
        self.position = state.position;
        self.set_velocity(state.velocity);
        self.support = state.support;
    }
}
