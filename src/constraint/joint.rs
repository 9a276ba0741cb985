use tracing::trace;

use crate::body::Body;
use crate::math::{Matrix, Vector2};

use super::{apply_jacobian_impulse, mass_diagonal, solve_iteration, velocity_vector};

const BAUMGARTE_BETA: f64 = 0.1;

/// A distance joint anchoring two bodies at one local point each. The
/// anchors are frozen at construction; so is the target distance, captured
/// from the anchors' world positions at that moment.
///
/// The Jacobian is the gradient of the *squared*-distance constraint,
/// `2*(pa - pb)`/`2*(pb - pa)`, not a unit direction vector — the bias
/// below is likewise expressed in squared-distance units, and the two
/// must agree in scale for Gauss-Seidel to converge to the right impulse.
///
/// Two historically distinct formulations persist side by side, selected by
/// whether B can rotate at construction time: when it can't, the bias uses
/// the squared-distance error against the frozen target; when it can, the
/// bias uses the raw squared distance with no target subtracted. Both are
/// preserved as found rather than unified, since nothing in this system
/// draws on the discrepancy except the tether scenario, where either
/// formulation converges to the same resting distance.
pub struct JointConstraint {
    a_local_anchor: Vector2,
    b_local_anchor: Vector2,
    linear_only: bool,
    desired_distance_sq: f64,
    jacobian: Matrix,
    cached_lambda: Vec<f64>,
    bias: f64,
}

impl JointConstraint {
    /// Anchor both bodies at their own centres of mass (local origin).
    pub fn new(a: &Body, b: &Body) -> Self {
        Self::with_anchors(a, b, Vector2::ZERO, Vector2::ZERO)
    }

    pub fn with_anchors(a: &Body, b: &Body, a_local_anchor: Vector2, b_local_anchor: Vector2) -> Self {
        let pa = a.local_to_world(a_local_anchor);
        let pb = b.local_to_world(b_local_anchor);
        JointConstraint {
            a_local_anchor,
            b_local_anchor,
            linear_only: b.inverse_angular_mass() == 0.0,
            desired_distance_sq: (pb - pa).length_squared(),
            jacobian: Matrix::zeros(1, 6),
            cached_lambda: vec![0.0],
            bias: 0.0,
        }
    }

    pub fn pre_solve(&mut self, a: &mut Body, b: &mut Body, dt: f64) {
        let pa = a.local_to_world(self.a_local_anchor);
        let pb = b.local_to_world(self.b_local_anchor);
        let ra = pa - a.position;
        let rb = pb - b.position;
        let a_to_b = pa - pb;
        let b_to_a = pb - pa;
        let distance_sq = b_to_a.length_squared();

        let mut jacobian = Matrix::zeros(1, 6);
        jacobian.set(0, 0, 2.0 * a_to_b.x);
        jacobian.set(0, 1, 2.0 * a_to_b.y);
        jacobian.set(0, 3, 2.0 * b_to_a.x);
        jacobian.set(0, 4, 2.0 * b_to_a.y);
        if !self.linear_only {
            jacobian.set(0, 2, 2.0 * ra.perp_dot(a_to_b));
            jacobian.set(0, 5, 2.0 * rb.perp_dot(b_to_a));
        }
        self.jacobian = jacobian;

        self.bias = if self.linear_only {
            (BAUMGARTE_BETA / dt) * (distance_sq - self.desired_distance_sq)
        } else {
            (BAUMGARTE_BETA / dt) * distance_sq
        };

        let warm_start = self
            .jacobian
            .transpose()
            .multiply_by_slice(&self.cached_lambda)
            .expect("jacobian transpose columns always match cached lambda length");
        apply_jacobian_impulse(a, b, &warm_start, false);

        trace!(bias = self.bias, linear_only = self.linear_only, "joint constraint pre-solve");
    }

    /// Lambda accumulates without clamping — a distance joint is a bilateral
    /// equality constraint, not the one-sided non-tensile contact a
    /// penetration constraint enforces.
    pub fn solve(&mut self, a: &mut Body, b: &mut Body) {
        let mass_diag = mass_diagonal(a, b, false);
        let velocity = velocity_vector(a, b);
        let raw = solve_iteration(&self.jacobian, &mass_diag, &velocity, self.bias)
            .expect("jacobian/mass-diagonal dimensions are fixed at 1x6 and 6x6");

        self.cached_lambda[0] += raw[0];
        let impulses = self
            .jacobian
            .transpose()
            .multiply_by_slice(&raw)
            .expect("jacobian transpose columns always match raw lambda length");
        apply_jacobian_impulse(a, b, &impulses, false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_only_joint_pulls_bob_toward_target_distance() {
        let mut anchor = Body::new_circle(200.0, 100.0, 10.0, 0.0, false);
        let mut bob = Body::new_box(80.0, 100.0, 120.0, 30.0, 5.0, false);
        bob.refresh_vertices();
        let mut joint = JointConstraint::new(&anchor, &bob);
        assert!(joint.linear_only);

        for _ in 0..60 {
            bob.add_force(Vector2::new(0.0, 9.8 * 50.0 * bob.mass()));
            crate::integrator::integrate(&mut bob, 1.0 / 60.0);
            joint.pre_solve(&mut anchor, &mut bob, 1.0 / 60.0);
            for _ in 0..5 {
                joint.solve(&mut anchor, &mut bob);
            }
        }

        let distance = (bob.position - anchor.position).length();
        let initial = (joint.desired_distance_sq).sqrt();
        assert!((distance - initial).abs() < 2.0);
    }
}
