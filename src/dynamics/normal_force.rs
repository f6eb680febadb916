//! Normal forces carried down the support graph.
//!
//! A body presses on its supporter with its own weight plus everything
//! stacked on top of it. Totals are memoized per tick.

use crate::math::vec2::Vec2;
use crate::objects::{BodyHandle, RigidBody};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    Unvisited,
    InProgress,
    Done,
}

struct Propagation<'a> {
    bodies: &'a [RigidBody],
    children: Vec<Vec<usize>>,
    visits: Vec<Visit>,
    totals: Vec<f64>,
    vertical_gravity: f64,
}

impl<'a> Propagation<'a> {
    fn new(bodies: &'a [RigidBody], vertical_gravity: f64) -> Self {
        let mut children = vec![Vec::new(); bodies.len()];
        for (index, body) in bodies.iter().enumerate() {
            if let Some(BodyHandle::Dynamic(parent)) = body.supporter() {
                if parent < bodies.len() && parent != index {
                    children[parent].push(index);
                }
            }
        }
        Self {
            bodies,
            children,
            visits: vec![Visit::Unvisited; bodies.len()],
            totals: vec![0.0; bodies.len()],
            vertical_gravity,
        }
    }

    /// Weight of the body at `index` plus the load of every body resting on it.
    fn total(&mut self, index: usize) -> f64 {
        match self.visits[index] {
            Visit::Done => return self.totals[index],
            Visit::InProgress => {
                log::warn!(
                    "Support cycle through {}; its load is counted once",
                    self.bodies[index].name()
                );
                return 0.0;
            }
            Visit::Unvisited => {}
        }

        self.visits[index] = Visit::InProgress;
        let mut total = self.bodies[index].weight(self.vertical_gravity);
        for k in 0..self.children[index].len() {
            let child = self.children[index][k];
            total += self.total(child).abs();
        }
        self.totals[index] = total;
        self.visits[index] = Visit::Done;
        total
    }
}

/// Recomputes the normal force of every dynamic body. The result points
/// down: `normal_force.y = -(weight + load carried)`.
pub fn propagate_normal_forces(dynamic: &mut [RigidBody], vertical_gravity: f64) {
    for body in dynamic.iter_mut() {
        body.set_normal_force(Vec2::ZERO);
    }

    let totals: Vec<f64> = {
        let bodies: &[RigidBody] = dynamic;
        let mut propagation = Propagation::new(bodies, vertical_gravity);
        (0..bodies.len()).map(|index| propagation.total(index)).collect()
    };

    for (body, total) in dynamic.iter_mut().zip(totals) {
        body.set_normal_force(Vec2::new(0.0, -total));
    }
}
