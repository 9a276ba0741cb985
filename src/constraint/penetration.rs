use tracing::trace;

use crate::body::{combined_elasticity, combined_friction, Body};
use crate::collision::Contact;
use crate::math::{Matrix, Vector2, Vector2Ext};

use super::{apply_jacobian_impulse, mass_diagonal, point_velocity, solve_iteration, velocity_vector};

/// Baumgarte stabilisation factor for penetration constraints.
const BAUMGARTE_BETA: f64 = 0.2;
/// Slop added to the positional error so resting contacts don't fight the
/// bias term back to exactly zero penetration.
const PENETRATION_SLOP: f64 = 0.01;

/// A penetration-plus-friction constraint seeded from one collision
/// [`Contact`]. The collision point and normal are captured in each body's
/// local frame at construction and re-expressed in world space every
/// `pre_solve`, since the bodies move between ticks.
pub struct PenConstraint {
    a_local_point: Vector2,
    b_local_point: Vector2,
    a_local_normal: Vector2,
    friction: f64,
    jacobian: Matrix,
    cached_lambda: Vec<f64>,
    bias: f64,
}

impl PenConstraint {
    /// `contact.end` lies on A, `contact.start` lies on B; the normal is
    /// stored relative to A's current rotation so it can be reapplied after
    /// A turns.
    pub fn new(contact: &Contact, a: &Body, b: &Body) -> Self {
        PenConstraint {
            a_local_point: a.world_to_local(contact.end),
            b_local_point: b.world_to_local(contact.start),
            a_local_normal: contact.normal.rotate_by(-a.rotation),
            friction: combined_friction(a, b),
            jacobian: Matrix::zeros(2, 6),
            cached_lambda: vec![0.0, 0.0],
            bias: 0.0,
        }
    }

    /// Build this tick's Jacobian and bias, then apply last tick's cached
    /// impulse (warm start) before any iteration runs.
    pub fn pre_solve(&mut self, a: &mut Body, b: &mut Body, dt: f64) {
        let pa = a.local_to_world(self.a_local_point);
        let pb = b.local_to_world(self.b_local_point);
        let ra = pa - a.position;
        let rb = pb - b.position;
        let n = self.a_local_normal.rotate_by(a.rotation);
        let neg_n = -n;

        let mut jacobian = Matrix::zeros(2, 6);
        jacobian.set(0, 0, neg_n.x);
        jacobian.set(0, 1, neg_n.y);
        jacobian.set(0, 2, -ra.perp_dot(n));
        jacobian.set(0, 3, n.x);
        jacobian.set(0, 4, n.y);
        jacobian.set(0, 5, rb.perp_dot(n));

        if self.friction > 0.0 {
            let t = n.perpendicular().norm();
            jacobian.set(1, 0, -t.x);
            jacobian.set(1, 1, -t.y);
            jacobian.set(1, 2, -ra.perp_dot(t));
            jacobian.set(1, 3, t.x);
            jacobian.set(1, 4, t.y);
            jacobian.set(1, 5, rb.perp_dot(t));
        }

        let position_error = f64::min(0.0, (pb - pa).dot(neg_n) + PENETRATION_SLOP);
        let rel_vel = point_velocity(a.velocity, a.angular_velocity, ra)
            - point_velocity(b.velocity, b.angular_velocity, rb);
        self.bias = (BAUMGARTE_BETA / dt) * position_error
            + combined_elasticity(a, b) * rel_vel.dot(n);
        self.jacobian = jacobian;

        let warm_start = self
            .jacobian
            .transpose()
            .multiply_by_slice(&self.cached_lambda)
            .expect("jacobian transpose columns always match cached lambda length");
        apply_jacobian_impulse(a, b, &warm_start, true);

        trace!(bias = self.bias, friction = self.friction, "pen constraint pre-solve");
    }

    /// One Gauss–Seidel sweep: solve for this iteration's raw impulse,
    /// accumulate and clamp the cached lambda, then apply only the delta
    /// against what was already applied by earlier iterations/warm start.
    pub fn solve(&mut self, a: &mut Body, b: &mut Body) {
        let mass_diag = mass_diagonal(a, b, true);
        let velocity = velocity_vector(a, b);
        let raw = solve_iteration(&self.jacobian, &mass_diag, &velocity, self.bias)
            .expect("jacobian/mass-diagonal dimensions are fixed at 2x6 and 6x6");

        let previous = self.cached_lambda.clone();
        self.cached_lambda[0] = (self.cached_lambda[0] + raw[0]).max(0.0);
        if self.friction > 0.0 {
            let max_friction = self.friction * self.cached_lambda[0];
            self.cached_lambda[1] =
                (self.cached_lambda[1] + raw[1]).clamp(-max_friction, max_friction);
        } else {
            self.cached_lambda[1] = 0.0;
        }

        let effective: Vec<f64> = self
            .cached_lambda
            .iter()
            .zip(&previous)
            .map(|(now, prev)| now - prev)
            .collect();
        let impulses = self
            .jacobian
            .transpose()
            .multiply_by_slice(&effective)
            .expect("jacobian transpose columns always match effective lambda length");
        apply_jacobian_impulse(a, b, &impulses, true);
    }

    pub fn cached_lambda(&self) -> &[f64] {
        &self.cached_lambda
    }

    /// Seed this tick's cached lambda from a previous tick's constraint for
    /// the same contact, so warm starting survives a host that rebuilds
    /// constraints from scratch every tick (see [`crate::World::step`]).
    /// A length mismatch (the contact count for this pair changed) leaves
    /// the cold-start zero lambda in place instead.
    pub fn set_cached_lambda(&mut self, lambda: &[f64]) {
        if lambda.len() == self.cached_lambda.len() {
            self.cached_lambda.copy_from_slice(lambda);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::Body;
    use crate::collision::Contact;

    fn resting_pair() -> (Body, Body, Contact) {
        let mut floor = Body::new_box(0.0, 0.0, 500.0, 40.0, 0.0, false);
        floor.refresh_vertices();
        let mut box_ = Body::new_box(0.0, -19.0, 50.0, 50.0, 1.0, true);
        box_.refresh_vertices();
        let contact = Contact::new(
            Vector2::new(0.0, -20.0),
            Vector2::new(0.0, -19.0),
            Vector2::new(0.0, 1.0),
        );
        (floor, box_, contact)
    }

    #[test]
    fn cached_normal_lambda_stays_nonnegative_after_iterations() {
        let (mut floor, mut box_, contact) = resting_pair();
        box_.velocity = Vector2::new(0.0, 5.0);
        let mut constraint = PenConstraint::new(&contact, &floor, &box_);
        constraint.pre_solve(&mut floor, &mut box_, 1.0 / 60.0);
        for _ in 0..10 {
            constraint.solve(&mut floor, &mut box_);
        }
        assert!(constraint.cached_lambda()[0] >= 0.0);
    }

    #[test]
    fn friction_lambda_stays_within_coulomb_cone() {
        let (mut floor, mut box_, contact) = resting_pair();
        box_.velocity = Vector2::new(20.0, 3.0);
        let mut constraint = PenConstraint::new(&contact, &floor, &box_);
        constraint.pre_solve(&mut floor, &mut box_, 1.0 / 60.0);
        for _ in 0..10 {
            constraint.solve(&mut floor, &mut box_);
        }
        let lambda = constraint.cached_lambda();
        assert!(lambda[1].abs() <= constraint.friction * lambda[0] + 1e-9);
    }
}
