//! A 2D rigid-body physics core: convex shapes, SAT narrow-phase detection
//! with Sutherland–Hodgman clipping, a sequential-impulse Gauss–Seidel
//! constraint solver for contacts and distance joints, and semi-implicit
//! Euler integration.
//!
//! The crate performs no I/O, rendering, windowing, or scheduling. A host
//! owns its bodies, drives the step loop — either by hand through the
//! `body`/`integrator`/`collision`/`constraint`/`solver`/`resolver` modules
//! directly, or through the [`World`] convenience wrapper — and renders
//! the resulting state itself.

pub mod body;
pub mod collision;
pub mod constraint;
pub mod error;
pub mod forces;
pub mod integrator;
pub mod math;
pub mod resolver;
pub mod shape;
pub mod solver;

/// Re-exports the surface most hosts need to construct bodies and step a
/// simulation, without requiring a `use` line per module.
pub mod prelude {
    pub use crate::body::Body;
    pub use crate::collision::{detect_resolver, detect_solver, Contact, ResolverContact, SolverManifold};
    pub use crate::constraint::{JointConstraint, PenConstraint};
    pub use crate::forces::{self, GRAVITY, PIXELS_PER_METER};
    pub use crate::math::{Matrix, Vector2, Vector2Ext};
    pub use crate::resolver::resolve_impulse;
    pub use crate::shape::{Circle, Polygon, ShapeKind};
    pub use crate::solver::{solve_joint_constraints, solve_pen_constraints};
    pub use crate::World;
}

use std::collections::HashMap;

use tracing::instrument;

use body::Body;
use constraint::{JointConstraint, PenConstraint};

/// Convenience wrapper over the lower-level free functions: owns a body
/// list and a joint list, detects and solves penetration constraints
/// against every pair every tick, and warm-starts them across ticks by
/// index even though it rebuilds the constraint objects from scratch each
/// time. Every operation this performs is independently callable through
/// the lower-level modules; nothing here is load-bearing for correctness.
pub struct World {
    pub bodies: Vec<Body>,
    pub joints: Vec<JointConstraint>,
    pub joint_pairs: Vec<(usize, usize)>,
    pub gravity: f64,
    pub solver_iterations: usize,
    pub joint_iterations: usize,
    pen_lambdas: HashMap<(usize, usize), Vec<Vec<f64>>>,
}

impl Default for World {
    fn default() -> Self {
        World {
            bodies: Vec::new(),
            joints: Vec::new(),
            joint_pairs: Vec::new(),
            gravity: forces::GRAVITY,
            solver_iterations: 10,
            joint_iterations: 5,
            pen_lambdas: HashMap::new(),
        }
    }
}

impl World {
    pub fn new() -> Self {
        World::default()
    }

    /// Add a body and return the index other calls (e.g. [`World::add_joint`])
    /// use to refer to it.
    pub fn add_body(&mut self, body: Body) -> usize {
        self.bodies.push(body);
        self.bodies.len() - 1
    }

    pub fn add_joint(&mut self, joint: JointConstraint, a: usize, b: usize) {
        self.joints.push(joint);
        self.joint_pairs.push((a, b));
    }

    /// Advance every body by `dt`: apply weight, integrate, detect and
    /// solve penetration constraints between every pair, then solve joint
    /// constraints. Matches the mandated tick order: integration precedes
    /// detection, detection precedes pre-solve, pre-solve precedes the
    /// iterated sweep.
    #[instrument(level = "trace", skip_all)]
    pub fn step(&mut self, dt: f64) {
        for b in &mut self.bodies {
            if !b.is_static() {
                b.add_force(forces::weight(b.mass(), self.gravity));
            }
        }
        for b in &mut self.bodies {
            integrator::integrate(b, dt);
        }

        let n = self.bodies.len();
        let mut pairs = Vec::new();
        let mut pen_constraints = Vec::new();
        for i in 0..n {
            for j in (i + 1)..n {
                let manifold = collision::detect_solver(&self.bodies[i], &self.bodies[j]);
                for (k, contact) in manifold.contacts().iter().enumerate() {
                    let mut constraint = PenConstraint::new(contact, &self.bodies[i], &self.bodies[j]);
                    if let Some(previous) = self.pen_lambdas.get(&(i, j)).and_then(|v| v.get(k)) {
                        constraint.set_cached_lambda(previous);
                    }
                    pairs.push((i, j));
                    pen_constraints.push(constraint);
                }
            }
        }

        solver::solve_pen_constraints(
            &mut pen_constraints,
            &pairs,
            &mut self.bodies,
            self.solver_iterations,
            dt,
        );

        let mut next_lambdas: HashMap<(usize, usize), Vec<Vec<f64>>> = HashMap::new();
        for (constraint, &pair) in pen_constraints.iter().zip(&pairs) {
            next_lambdas
                .entry(pair)
                .or_default()
                .push(constraint.cached_lambda().to_vec());
        }
        self.pen_lambdas = next_lambdas;

        if !self.joints.is_empty() {
            solver::solve_joint_constraints(
                &mut self.joints,
                &self.joint_pairs,
                &mut self.bodies,
                self.joint_iterations,
                dt,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vector2;

    #[test]
    fn empty_world_steps_without_panicking() {
        let mut world = World::new();
        world.step(1.0 / 60.0);
    }

    #[test]
    fn a_box_falls_under_gravity_until_the_floor_stops_it() {
        let mut world = World::new();
        let box_id = world.add_body(Body::new_box(100.0, 0.0, 50.0, 50.0, 1.0, true));
        world.add_body(Body::new_box(100.0, 300.0, 500.0, 40.0, 0.0, false));

        for _ in 0..180 {
            world.step(1.0 / 60.0);
        }

        let y = world.bodies[box_id].position.y;
        assert!(y >= 274.0 && y <= 276.0, "box settled at y={y}");
        assert!(world.bodies[box_id].velocity.y.abs() < 1.0);
    }

    #[test]
    fn a_tethered_bob_stays_near_its_initial_distance() {
        let mut world = World::new();
        let anchor = world.add_body(Body::new_circle(200.0, 100.0, 10.0, 0.0, false));
        let bob_id = world.add_body(Body::new_box(80.0, 100.0, 120.0, 30.0, 5.0, false));
        world.bodies[bob_id].unstoppable = true;
        world.joint_iterations = 5;

        let joint = JointConstraint::new(&world.bodies[anchor], &world.bodies[bob_id]);
        let initial = (world.bodies[bob_id].position - world.bodies[anchor].position).length();
        world.add_joint(joint, anchor, bob_id);

        for _ in 0..60 {
            world.step(1.0 / 60.0);
        }

        let distance = (world.bodies[bob_id].position - world.bodies[anchor].position).length();
        assert!((distance - initial).abs() < 2.0, "distance drifted to {distance}");
    }

    #[test]
    fn gravity_constant_matches_forces_module() {
        let world = World::new();
        assert_eq!(world.gravity, forces::GRAVITY);
        let _ = Vector2::ZERO;
    }
}
