//! The iterated Gauss–Seidel sweep: pre-solve every constraint once, then
//! run `iterations` solve passes over the same constraint list. Mirrors the
//! external interface's `Solve(constraints, aBodies, bBodies, iterations,
//! dt)`, accepting the two shapes of constraint this engine has as two
//! distinct, statically-typed entry points rather than one function over a
//! tagged union.
//!
//! Constraints reference their two bodies by index into a shared `bodies`
//! slice rather than holding `&mut Body` directly, since two constraints
//! from the same contact manifold legitimately share a body (the
//! two-point box-on-box case) and Rust can't hand out two live `&mut`
//! borrows of the same element. [`two_distinct_mut`] borrows a disjoint
//! pair fresh for each pre-solve/solve call instead.

use tracing::{instrument, trace, trace_span};

use crate::body::Body;
use crate::constraint::{JointConstraint, PenConstraint};

/// Borrow two distinct elements of `slice` mutably at once. Panics if
/// `i == j`.
fn two_distinct_mut<T>(slice: &mut [T], i: usize, j: usize) -> (&mut T, &mut T) {
    assert_ne!(i, j, "a constraint cannot reference the same body as both ends");
    if i < j {
        let (left, right) = slice.split_at_mut(j);
        (&mut left[i], &mut right[0])
    } else {
        let (left, right) = slice.split_at_mut(i);
        (&mut right[0], &mut left[j])
    }
}

/// Solve a batch of penetration constraints. `pairs[i] = (index of A, index
/// of B)` into `bodies`, matching `constraints[i]`.
#[instrument(level = "trace", skip_all)]
pub fn solve_pen_constraints(
    constraints: &mut [PenConstraint],
    pairs: &[(usize, usize)],
    bodies: &mut [Body],
    iterations: usize,
    dt: f64,
) {
    assert_eq!(constraints.len(), pairs.len(), "constraint/index-pair count mismatch");

    for (c, &(ia, ib)) in constraints.iter_mut().zip(pairs) {
        let (a, b) = two_distinct_mut(bodies, ia, ib);
        c.pre_solve(a, b, dt);
    }

    for iter in 0..iterations {
        let span = trace_span!("pen_solve_iteration", iter);
        let _enter = span.enter();
        for (c, &(ia, ib)) in constraints.iter_mut().zip(pairs) {
            let (a, b) = two_distinct_mut(bodies, ia, ib);
            c.solve(a, b);
        }
        trace!(iter, "pen constraints swept");
    }
}

/// Solve a batch of distance-joint constraints, same calling convention as
/// [`solve_pen_constraints`].
#[instrument(level = "trace", skip_all)]
pub fn solve_joint_constraints(
    constraints: &mut [JointConstraint],
    pairs: &[(usize, usize)],
    bodies: &mut [Body],
    iterations: usize,
    dt: f64,
) {
    assert_eq!(constraints.len(), pairs.len(), "constraint/index-pair count mismatch");

    for (c, &(ia, ib)) in constraints.iter_mut().zip(pairs) {
        let (a, b) = two_distinct_mut(bodies, ia, ib);
        c.pre_solve(a, b, dt);
    }

    for iter in 0..iterations {
        let span = trace_span!("joint_solve_iteration", iter);
        let _enter = span.enter();
        for (c, &(ia, ib)) in constraints.iter_mut().zip(pairs) {
            let (a, b) = two_distinct_mut(bodies, ia, ib);
            c.solve(a, b);
        }
        trace!(iter, "joint constraints swept");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::detect_solver;

    #[test]
    fn a_resting_box_stack_settles_without_sinking() {
        let mut bodies = vec![
            Body::new_box(100.0, 0.0, 50.0, 50.0, 1.0, true),
            Body::new_box(100.0, 300.0, 500.0, 40.0, 0.0, false),
        ];
        for b in &mut bodies {
            b.refresh_vertices();
        }

        for _ in 0..180 {
            for b in &mut bodies {
                let w = crate::forces::weight(b.mass(), crate::forces::GRAVITY);
                b.add_force(w);
            }
            for b in &mut bodies {
                crate::integrator::integrate(b, 1.0 / 60.0);
            }

            let manifold = detect_solver(&bodies[0], &bodies[1]);
            if manifold.is_colliding() {
                let mut constraints: Vec<PenConstraint> = manifold
                    .contacts()
                    .iter()
                    .map(|c| PenConstraint::new(c, &bodies[0], &bodies[1]))
                    .collect();
                let pairs: Vec<(usize, usize)> = constraints.iter().map(|_| (0, 1)).collect();
                solve_pen_constraints(&mut constraints, &pairs, &mut bodies, 10, 1.0 / 60.0);
            }
        }

        assert!(bodies[0].position.y >= 274.0 && bodies[0].position.y <= 276.0);
        assert!(bodies[0].velocity.y.abs() < 1.0);
    }

    #[test]
    fn empty_constraint_batch_is_a_no_op() {
        let mut bodies = vec![
            Body::new_circle(0.0, 0.0, 5.0, 1.0, false),
            Body::new_circle(100.0, 0.0, 5.0, 1.0, false),
        ];
        let mut constraints: Vec<PenConstraint> = Vec::new();
        let pairs: Vec<(usize, usize)> = Vec::new();
        solve_pen_constraints(&mut constraints, &pairs, &mut bodies, 10, 1.0 / 60.0);
        assert_eq!(bodies[0].position, crate::math::Vector2::new(0.0, 0.0));
    }

    #[test]
    #[should_panic]
    fn a_constraint_cannot_reference_one_body_twice() {
        let mut bodies = vec![Body::new_circle(0.0, 0.0, 5.0, 1.0, false)];
        two_distinct_mut(&mut bodies, 0, 0);
    }
}
