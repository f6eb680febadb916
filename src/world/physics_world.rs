use crate::collision::AABB;
use crate::config::{SimulationConfig, SolverSettings, DEFAULT_TIME_STEP};
use crate::dynamics;
use crate::error::{PhysicsError, Result};
use crate::math::vec2::Vec2;
use crate::objects::{BodyHandle, BodyType, Ground, KinematicState, RigidBody};
use crate::shapes::Shape;
use crate::world::Environment;

/// Lifecycle of a world. Only a running world advances on `update`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SimulationState {
    #[default]
    Stopped,
    Running,
    Paused,
}

/// Owns every body, the ground and the environment, and drives the
/// per-tick pipeline.
#[derive(Debug, Clone)]
pub struct PhysicsWorld {
    dynamic_bodies: Vec<RigidBody>,
    static_bodies: Vec<RigidBody>,
    ground: Ground,
    environment: Environment,
    settings: SolverSettings,
    time_step: f64,
    state: SimulationState,
    // Kinematic state of the dynamic bodies, indexed like `dynamic_bodies`
    snapshot: Option<Vec<KinematicState>>,
}

impl PhysicsWorld {
    /// Creates a new, empty, stopped world with default settings.
    pub fn new() -> Self {
        Self {
            dynamic_bodies: Vec::new(),
            static_bodies: Vec::new(),
            ground: Ground::default(),
            environment: Environment::default(),
            settings: SolverSettings::default(),
            time_step: DEFAULT_TIME_STEP,
            state: SimulationState::Stopped,
            snapshot: None,
        }
    }

    /// Creates a world from a configuration, validating it through the
    /// regular setters.
    pub fn from_config(config: &SimulationConfig) -> Result<Self> {
        let mut world = Self::new();
        world.set_gravity(config.gravity)?;
        world.set_incline_angle(config.incline_angle_degrees)?;
        world.set_time_step(config.time_step)?;
        world.set_ground_level(config.ground_level)?;
        world.set_ground_friction(config.ground_kinetic_friction, Some(config.ground_static_friction))?;
        world.set_bounds(config.bounds)?;
        world.set_settings(config.solver);
        Ok(world)
    }

    // --- Bodies --- //

    /// Registers a body in the dynamic or static list according to its
    /// body type and returns its handle.
    pub fn add_body(&mut self, body: RigidBody) -> BodyHandle {
        let handle = match body.body_type() {
            BodyType::Dynamic => {
                self.dynamic_bodies.push(body);
                BodyHandle::Dynamic(self.dynamic_bodies.len() - 1)
            }
            BodyType::Static => {
                self.static_bodies.push(body);
                BodyHandle::Static(self.static_bodies.len() - 1)
            }
        };
        log::debug!("Added {:?} ({})", handle, self.body(handle).map_or("", |b| b.name()));
        handle
    }

    /// Removes a body and returns it. Handles of later bodies in the same
    /// list shift down by one, so every support relation is reset.
    /// Removing a dynamic body discards the saved snapshot.
    pub fn remove_body(&mut self, handle: BodyHandle) -> Result<RigidBody> {
        let removed = match handle {
            BodyHandle::Dynamic(i) if i < self.dynamic_bodies.len() => {
                if self.snapshot.take().is_some() {
                    log::debug!("Snapshot discarded by removal of {:?}", handle);
                }
                self.dynamic_bodies.remove(i)
            }
            BodyHandle::Static(i) if i < self.static_bodies.len() => self.static_bodies.remove(i),
            _ => return Err(PhysicsError::BodyNotFound(handle)),
        };
        dynamics::reset_support_states(&mut self.dynamic_bodies);
        log::debug!("Removed {:?} ({})", handle, removed.name());
        Ok(removed)
    }

    pub fn body(&self, handle: BodyHandle) -> Option<&RigidBody> {
        match handle {
            BodyHandle::Dynamic(i) => self.dynamic_bodies.get(i),
            BodyHandle::Static(i) => self.static_bodies.get(i),
        }
    }

    pub fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut RigidBody> {
        match handle {
            BodyHandle::Dynamic(i) => self.dynamic_bodies.get_mut(i),
            BodyHandle::Static(i) => self.static_bodies.get_mut(i),
        }
    }

    fn require(&self, handle: BodyHandle) -> Result<&RigidBody> {
        self.body(handle).ok_or(PhysicsError::BodyNotFound(handle))
    }

    fn require_mut(&mut self, handle: BodyHandle) -> Result<&mut RigidBody> {
        self.body_mut(handle).ok_or(PhysicsError::BodyNotFound(handle))
    }

    pub fn dynamic_bodies(&self) -> &[RigidBody] {
        &self.dynamic_bodies
    }

    pub fn static_bodies(&self) -> &[RigidBody] {
        &self.static_bodies
    }

    pub fn ground(&self) -> &Ground {
        &self.ground
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn settings(&self) -> &SolverSettings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: SolverSettings) {
        self.settings = settings;
    }

    pub fn time_step(&self) -> f64 {
        self.time_step
    }

    pub fn state(&self) -> SimulationState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SimulationState::Running
    }

    pub fn has_snapshot(&self) -> bool {
        self.snapshot.is_some()
    }

    // --- Lifecycle --- //

    pub fn start(&mut self) {
        self.transition(SimulationState::Running);
    }

    /// Halts ticking. No-op when already paused.
    pub fn pause(&mut self) {
        if self.state != SimulationState::Paused {
            self.transition(SimulationState::Paused);
        }
    }

    /// Resumes a paused world. No-op in any other state.
    pub fn resume(&mut self) {
        if self.state == SimulationState::Paused {
            self.transition(SimulationState::Running);
        }
    }

    /// Same as [`PhysicsWorld::resume`].
    pub fn continue_(&mut self) {
        self.resume();
    }

    /// Stops the world and discards any saved snapshot.
    pub fn stop(&mut self) {
        self.snapshot = None;
        self.transition(SimulationState::Stopped);
    }

    fn transition(&mut self, next: SimulationState) {
        log::debug!("Simulation {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    /// Captures position, velocity and support state of every dynamic body.
    pub fn save_states(&mut self) {
        self.snapshot = Some(self.dynamic_bodies.iter().map(RigidBody::kinematic_state).collect());
        log::debug!("Saved state of {} bodies", self.dynamic_bodies.len());
    }

    /// Restores the last snapshot. Bodies added after it was taken keep
    /// their current state. Returns false when there is no snapshot.
    pub fn restore_states(&mut self) -> bool {
        let Some(snapshot) = &self.snapshot else {
            return false;
        };
        for (body, state) in self.dynamic_bodies.iter_mut().zip(snapshot) {
            body.restore_kinematic_state(*state);
        }
        log::debug!("Restored state of {} bodies", snapshot.len());
        true
    }

    // --- Stepping --- //

    /// Advances one configured time step if the world is running.
    pub fn update(&mut self) {
        self.update_with(self.time_step);
    }

    /// Advances by `dt` seconds if the world is running. A non-finite or
    /// non-positive `dt` does nothing.
    pub fn update_with(&mut self, dt: f64) {
        if !self.is_running() {
            return;
        }
        dynamics::update(
            &mut self.dynamic_bodies,
            &self.static_bodies,
            &self.ground,
            &self.environment,
            &self.settings,
            dt,
        );
    }

    // --- Setters --- //

    pub fn set_gravity(&mut self, gravity: f64) -> Result<()> {
        self.environment.set_gravity(gravity)
    }

    /// Sets the world incline in degrees, clamped to [-90, 90].
    pub fn set_incline_angle(&mut self, degrees: f64) -> Result<()> {
        self.environment.set_incline_angle(degrees)
    }

    pub fn set_time_step(&mut self, time_step: f64) -> Result<()> {
        if !time_step.is_finite() || time_step <= 0.0 {
            log::warn!("Rejected time step {}", time_step);
            return Err(PhysicsError::InvalidTimeStep(time_step));
        }
        self.time_step = time_step;
        Ok(())
    }

    pub fn set_bounds(&mut self, bounds: Option<AABB>) -> Result<()> {
        self.environment.set_bounds(bounds)
    }

    /// Sets the ground friction. Without a static coefficient the kinetic
    /// one is used for both.
    pub fn set_ground_friction(&mut self, kinetic: f64, static_friction: Option<f64>) -> Result<()> {
        self.ground.set_friction(kinetic, static_friction).map_err(|err| {
            log::warn!("Rejected ground friction: {}", err);
            err
        })
    }

    pub fn set_ground_level(&mut self, y_level: f64) -> Result<()> {
        if !y_level.is_finite() {
            return Err(PhysicsError::InvalidGeometry(format!("ground level must be finite, got {y_level}")));
        }
        self.ground.y_level = y_level;
        Ok(())
    }

    // --- Placement --- //

    /// Moves a body so its bottom rests on the ground.
    pub fn place_on_ground(&mut self, handle: BodyHandle) -> Result<()> {
        let y_level = self.ground.y_level;
        let body = self.require_mut(handle)?;
        body.position.y = y_level + body.half_height();
        Ok(())
    }

    /// Moves a body onto the top of `other`, shifted horizontally by
    /// `x_offset` from its center.
    pub fn place_on_top_of(&mut self, handle: BodyHandle, other: BodyHandle, x_offset: f64) -> Result<()> {
        let base = self.require(other)?;
        let (base_x, base_top) = (base.position.x, base.top());
        let body = self.require_mut(handle)?;
        body.position = Vec2::new(base_x + x_offset, base_top + body.half_height());
        Ok(())
    }

    /// Moves a body onto the upper side of a slope at `ratio` along it,
    /// measured from its lower-x end and clamped to [0, 1].
    pub fn place_on_slope(&mut self, handle: BodyHandle, slope: BodyHandle, ratio: f64) -> Result<()> {
        let ramp = self.require(slope)?;
        let Shape::Slope(geometry) = ramp.shape() else {
            return Err(PhysicsError::NotASlope(slope));
        };
        let point = geometry.point_at(ramp.position, ratio);
        let mut normal = geometry.normal();
        if normal.y < 0.0 {
            normal = -normal;
        }

        let body = self.require_mut(handle)?;
        body.position = point + normal * body.shape().support_radius(normal);
        Ok(())
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}
