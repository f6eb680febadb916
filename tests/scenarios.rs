use approx::{assert_abs_diff_eq, assert_relative_eq};
use physics_kernel::dynamics::reset_support_states;
use physics_kernel::{
    BodyHandle, Material, PhysicsWorld, RigidBody, Shape, SimulationState, Support, Vec2,
};

const DT: f64 = 1.0 / 60.0;

fn running_world() -> PhysicsWorld {
    let mut world = PhysicsWorld::new();
    world.start();
    world
}

/// World without gravity whose ground is far away.
fn weightless_world() -> PhysicsWorld {
    let mut world = running_world();
    world.set_gravity(0.0).unwrap();
    world.set_ground_level(-100.0).unwrap();
    world
}

fn unit_box(name: &str, mass: f64) -> RigidBody {
    RigidBody::dynamic(name, Shape::rect(1.0, 1.0), mass).unwrap()
}

#[test]
fn test_free_fall_touchdown_and_settling() {
    let mut world = running_world();
    let ball = world.add_body(
        RigidBody::dynamic("ball", Shape::circle(0.5), 1.0)
            .unwrap()
            .with_position(Vec2::new(0.0, 10.0)),
    );

    let mut ticks = 0;
    while world.body(ball).unwrap().bottom() > 1e-9 {
        world.update();
        ticks += 1;
        assert!(ticks < 1000, "ball never reached the ground");
    }
    let expected = (2.0 * 9.5 / 9.8_f64).sqrt();
    assert!((ticks as f64 * DT - expected).abs() <= 2.0 * DT);

    for _ in 0..300 {
        world.update();
    }
    let body = world.body(ball).unwrap();
    assert_eq!(body.support(), Support::Ground);
    assert_eq!(body.velocity().y, 0.0);
    assert_abs_diff_eq!(body.bottom(), 0.0, epsilon = 1e-6);
}

#[test]
fn test_box_slides_down_steep_incline() {
    let mut world = running_world();
    world.set_incline_angle(30.0).unwrap();
    world.set_ground_friction(0.2, Some(0.2)).unwrap();
    let crate_box = world.add_body(unit_box("crate", 2.0).with_material(Material::with_friction(0.0, 0.2)));
    world.place_on_ground(crate_box).unwrap();

    for _ in 0..60 {
        world.update();
    }

    let (sin_a, cos_a) = 30f64.to_radians().sin_cos();
    let acceleration = 9.8 * (sin_a - 0.2 * cos_a);
    let body = world.body(crate_box).unwrap();
    assert_relative_eq!(body.velocity().x, -acceleration, max_relative = 1e-9);
    assert_eq!(body.velocity().y, 0.0);
    assert_eq!(body.support(), Support::Ground);
}

#[test]
fn test_static_friction_holds_on_gentle_incline() {
    let mut world = running_world();
    world.set_incline_angle(10.0).unwrap();
    let crate_box = world.add_body(unit_box("crate", 1.0));
    world.place_on_ground(crate_box).unwrap();
    let start = world.body(crate_box).unwrap().position;

    for _ in 0..120 {
        world.update();
    }

    let body = world.body(crate_box).unwrap();
    assert_eq!(body.velocity(), Vec2::ZERO);
    assert_eq!(body.position, start);
}

#[test]
fn test_elastic_head_on_collision_exchanges_velocities() {
    let mut world = weightless_world();
    let elastic = Material::new(1.0, 0.0, 0.0);
    let left = world.add_body(
        RigidBody::dynamic("left", Shape::circle(0.5), 1.0)
            .unwrap()
            .with_material(elastic)
            .with_position(Vec2::new(-0.45, 0.0))
            .with_velocity(Vec2::new(2.0, 0.0)),
    );
    let right = world.add_body(
        RigidBody::dynamic("right", Shape::circle(0.5), 1.0)
            .unwrap()
            .with_material(elastic)
            .with_position(Vec2::new(0.45, 0.0))
            .with_velocity(Vec2::new(-2.0, 0.0)),
    );

    world.update();

    assert_abs_diff_eq!(world.body(left).unwrap().velocity().x, -2.0, epsilon = 1e-9);
    assert_abs_diff_eq!(world.body(right).unwrap().velocity().x, 2.0, epsilon = 1e-9);
}

#[test]
fn test_stack_transmits_weight_down_the_chain() {
    let mut world = running_world();
    let bottom = world.add_body(unit_box("bottom", 1.0));
    let middle = world.add_body(unit_box("middle", 2.0));
    let top = world.add_body(unit_box("top", 3.0));
    world.place_on_ground(bottom).unwrap();
    world.place_on_top_of(middle, bottom, 0.0).unwrap();
    world.place_on_top_of(top, middle, 0.0).unwrap();

    for _ in 0..120 {
        world.update();
    }

    assert_eq!(world.body(bottom).unwrap().support(), Support::Ground);
    assert_eq!(world.body(middle).unwrap().supporter(), Some(bottom));
    assert_eq!(world.body(top).unwrap().supporter(), Some(middle));

    let g = 9.8;
    assert_relative_eq!(world.body(bottom).unwrap().normal_force().y.abs(), 6.0 * g, epsilon = 1e-9);
    assert_relative_eq!(world.body(middle).unwrap().normal_force().y.abs(), 5.0 * g, epsilon = 1e-9);
    assert_relative_eq!(world.body(top).unwrap().normal_force().y.abs(), 3.0 * g, epsilon = 1e-9);

    assert_abs_diff_eq!(world.body(top).unwrap().bottom(), 2.0, epsilon = 1e-6);
}

#[test]
fn test_stack_slides_as_one_on_flat_ground() {
    let mut world = running_world();
    let bottom = world.add_body(unit_box("bottom", 1.0).with_velocity(Vec2::new(2.0, 0.0)));
    let top = world.add_body(unit_box("top", 1.0).with_velocity(Vec2::new(2.0, 0.0)));
    let lone = world.add_body(
        unit_box("lone", 1.0)
            .with_position(Vec2::new(5.0, 0.0))
            .with_velocity(Vec2::new(2.0, 0.0)),
    );
    world.place_on_ground(bottom).unwrap();
    world.place_on_top_of(top, bottom, 0.0).unwrap();
    world.place_on_ground(lone).unwrap();

    for _ in 0..60 {
        world.update();
    }

    let bottom_body = world.body(bottom).unwrap();
    let top_body = world.body(top).unwrap();
    let lone_body = world.body(lone).unwrap();

    // The carried box does not slow its supporter down
    assert_abs_diff_eq!(bottom_body.position.x, lone_body.position.x - 5.0, epsilon = 1e-9);
    assert!(bottom_body.position.x > 0.4);
    assert_eq!(bottom_body.velocity().x, 0.0);
    assert!((top_body.position.x - bottom_body.position.x).abs() < 0.05);
    assert_eq!(top_body.supporter(), Some(bottom));
}

#[test]
fn test_stack_slides_as_one_down_incline() {
    let mut world = running_world();
    world.set_incline_angle(30.0).unwrap();
    let bottom = world.add_body(unit_box("bottom", 1.0));
    let top = world.add_body(unit_box("top", 1.0));
    world.place_on_ground(bottom).unwrap();
    world.place_on_top_of(top, bottom, 0.0).unwrap();

    for _ in 0..60 {
        world.update();
    }

    let (sin_a, cos_a) = 30f64.to_radians().sin_cos();
    let acceleration = 9.8 * (sin_a - 0.4 * cos_a);
    let bottom_body = world.body(bottom).unwrap();
    let top_body = world.body(top).unwrap();

    assert_relative_eq!(bottom_body.velocity().x, -acceleration, max_relative = 1e-9);
    assert_abs_diff_eq!(top_body.velocity().x, bottom_body.velocity().x, epsilon = 1e-9);
    assert_abs_diff_eq!(top_body.position.x, bottom_body.position.x, epsilon = 1e-9);
    assert_eq!(top_body.supporter(), Some(bottom));
}

#[test]
fn test_wall_bounce_reverses_and_scales_velocity() {
    let mut world = weightless_world();
    let wall = world.add_body(
        RigidBody::fixed("wall", Shape::wall(0.5, 10.0))
            .unwrap()
            .with_position(Vec2::new(1.2, 5.0)),
    );
    let ball = world.add_body(
        RigidBody::dynamic("ball", Shape::circle(0.5), 1.0)
            .unwrap()
            .with_position(Vec2::new(0.0, 5.0))
            .with_velocity(Vec2::new(5.0, 0.0)),
    );

    let mut ticks = 0;
    while world.body(ball).unwrap().velocity().x > 0.0 {
        world.update();
        ticks += 1;
        assert!(ticks < 60, "ball never reached the wall");
    }

    let body = world.body(ball).unwrap();
    assert_abs_diff_eq!(body.velocity().x, -4.0, epsilon = 1e-9);
    assert!(body.right() <= world.body(wall).unwrap().left());
}

#[test]
fn test_circle_slides_down_slope() {
    let mut world = running_world();
    let angle = 30f64.to_radians();
    let ramp = world.add_body(
        RigidBody::fixed("ramp", Shape::slope(20.0, angle))
            .unwrap()
            .with_position(Vec2::new(0.0, 10.0)),
    );
    let ball = world.add_body(RigidBody::dynamic("ball", Shape::circle(0.5), 1.0).unwrap());
    world.place_on_slope(ball, ramp, 0.75).unwrap();

    for _ in 0..30 {
        world.update();
    }

    let body = world.body(ball).unwrap();
    let expected_speed = 9.8 * angle.sin() * 30.0 * DT;
    assert_relative_eq!(body.velocity().magnitude(), expected_speed, max_relative = 0.15);
    assert!(body.velocity().x < 0.0);
    assert!(body.velocity().y < 0.0);
    assert_eq!(body.support(), Support::Airborne);

    let ramp_body = world.body(ramp).unwrap();
    let Shape::Slope(slope) = *ramp_body.shape() else {
        panic!("ramp is not a slope");
    };
    let gap = (body.position - ramp_body.position).dot(slope.normal()) - 0.5;
    assert!(gap.abs() < 0.05, "ball left the slope surface (gap {gap})");
}

#[test]
fn test_support_reset_is_idempotent() {
    let mut world = running_world();
    let bottom = world.add_body(unit_box("bottom", 1.0));
    let top = world.add_body(unit_box("top", 1.0));
    world.place_on_ground(bottom).unwrap();
    world.place_on_top_of(top, bottom, 0.0).unwrap();
    world.update();

    let mut bodies = world.dynamic_bodies().to_vec();
    reset_support_states(&mut bodies);
    let once = bodies.clone();
    reset_support_states(&mut bodies);
    assert_eq!(bodies, once);
    assert!(bodies.iter().all(|b| !b.is_supported() && b.supporter().is_none()));
}

#[test]
fn test_pause_freezes_and_stop_discards_snapshot() {
    let mut world = running_world();
    let ball = world.add_body(
        RigidBody::dynamic("ball", Shape::circle(0.5), 1.0)
            .unwrap()
            .with_position(Vec2::new(0.0, 20.0)),
    );
    world.save_states();
    for _ in 0..10 {
        world.update();
    }

    world.pause();
    let frozen = world.body(ball).unwrap().clone();
    for _ in 0..10 {
        world.update();
    }
    assert_eq!(world.body(ball).unwrap(), &frozen);

    world.resume();
    world.update();
    assert!(world.body(ball).unwrap().position.y < frozen.position.y);

    assert!(world.restore_states());
    assert_eq!(world.body(ball).unwrap().position, Vec2::new(0.0, 20.0));

    world.stop();
    assert_eq!(world.state(), SimulationState::Stopped);
    assert!(!world.restore_states());
}

#[test]
fn test_removing_a_supporter_drops_the_stack_relation() {
    let mut world = running_world();
    let bottom = world.add_body(unit_box("bottom", 1.0));
    let top = world.add_body(unit_box("top", 1.0));
    world.place_on_ground(bottom).unwrap();
    world.place_on_top_of(top, bottom, 0.0).unwrap();
    world.update();
    assert_eq!(world.body(top).unwrap().supporter(), Some(bottom));

    world.remove_body(bottom).unwrap();
    let remaining = world.body(BodyHandle::Dynamic(0)).unwrap();
    assert_eq!(remaining.name(), "top");
    assert_eq!(remaining.supporter(), None);

    // Nothing holds it up any more
    world.update();
    assert!(world.body(BodyHandle::Dynamic(0)).unwrap().velocity().y < 0.0);
}
