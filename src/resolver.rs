//! One-shot impulse resolver: a non-iterative alternative to
//! [`crate::solver`]. Given a single resolver-kind contact, separate the
//! two bodies along the normal in proportion to inverse mass, then apply
//! one restitution-plus-friction impulse. No warm start, no iteration, no
//! friction-cone clamp.

use tracing::trace;

use crate::body::{combined_elasticity, combined_friction, Body};
use crate::collision::ResolverContact;
use crate::constraint::point_velocity;
use crate::math::Vector2Ext;

/// Friction impulse scale for this path, relative to the iterative
/// solver's unscaled Coulomb friction. Empirical; kept only to stay
/// visually comparable to the iterative path, not derived.
pub const RESOLVER_FRICTION_SCALE: f64 = 0.1;

/// Effective inverse mass for resolver purposes: static and unstoppable
/// bodies both contribute 0, since `unstoppable` means immune to collision
/// response specifically.
fn effective_inverse_mass(body: &Body) -> f64 {
    if body.unstoppable {
        0.0
    } else {
        body.inverse_mass()
    }
}

/// Push `a` and `b` apart along the contact normal in proportion to their
/// effective inverse mass. A no-op pair (both static or unstoppable) is
/// left untouched.
fn project_apart(a: &mut Body, b: &mut Body, contact: &ResolverContact) {
    let a_inv = effective_inverse_mass(a);
    let b_inv = effective_inverse_mass(b);
    let sum_inv = a_inv + b_inv;
    if sum_inv <= 0.0 {
        return;
    }
    let depth = contact.0.depth();
    let normal = contact.0.normal;
    a.position -= normal * (depth * a_inv / sum_inv);
    b.position += normal * (depth * b_inv / sum_inv);
    a.refresh_vertices();
    b.refresh_vertices();
}

/// Resolve one collision: positional projection followed by a single
/// restitution-plus-friction impulse. A pair with no effective inverse
/// mass between them (static vs. static, or either unstoppable against a
/// static partner) returns without mutating velocity either.
pub fn resolve_impulse(a: &mut Body, b: &mut Body, contact: &ResolverContact) {
    project_apart(a, b, contact);

    let normal = contact.0.normal;
    let ra = contact.0.end - a.position;
    let rb = contact.0.start - b.position;

    let a_inv = effective_inverse_mass(a);
    let b_inv = effective_inverse_mass(b);
    let normal_denom = a_inv
        + b_inv
        + ra.perp_dot(normal).powi(2) * a.inverse_angular_mass()
        + rb.perp_dot(normal).powi(2) * b.inverse_angular_mass();
    if normal_denom <= 0.0 {
        return;
    }

    let relative_velocity = |a: &Body, b: &Body| {
        point_velocity(b.velocity, b.angular_velocity, rb)
            - point_velocity(a.velocity, a.angular_velocity, ra)
    };

    let elasticity = combined_elasticity(a, b);
    let vrel_n = relative_velocity(a, b).dot(normal);
    let j_normal = -(1.0 + elasticity) * vrel_n / normal_denom;

    apply_resolver_impulse(a, b, normal, j_normal, ra, rb, a_inv, b_inv);

    let friction = combined_friction(a, b);
    if friction > 0.0 {
        let tangent = normal.perpendicular().norm();
        let tangent_denom = a_inv
            + b_inv
            + ra.perp_dot(tangent).powi(2) * a.inverse_angular_mass()
            + rb.perp_dot(tangent).powi(2) * b.inverse_angular_mass();
        if tangent_denom > 0.0 {
            let vrel_t = relative_velocity(a, b).dot(tangent);
            let j_tangent =
                -(1.0 + elasticity) * vrel_t / tangent_denom * friction * RESOLVER_FRICTION_SCALE;
            apply_resolver_impulse(a, b, tangent, j_tangent, ra, rb, a_inv, b_inv);
        }
    }

    trace!(j_normal, "resolved impulse");
}

#[allow(clippy::too_many_arguments)]
fn apply_resolver_impulse(
    a: &mut Body,
    b: &mut Body,
    axis: crate::math::Vector2,
    magnitude: f64,
    ra: crate::math::Vector2,
    rb: crate::math::Vector2,
    a_inv: f64,
    b_inv: f64,
) {
    let impulse = axis * magnitude;
    a.velocity -= impulse * a_inv;
    a.angular_velocity -= magnitude * ra.perp_dot(axis) * a.inverse_angular_mass();
    b.velocity += impulse * b_inv;
    b.angular_velocity += magnitude * rb.perp_dot(axis) * b.inverse_angular_mass();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::detect_resolver;
    use crate::math::Vector2;

    #[test]
    fn elastic_head_on_circles_swap_velocities() {
        let mut a = Body::new_circle(0.0, 0.0, 10.0, 1.0, false);
        a.velocity = Vector2::new(10.0, 0.0);
        a.elasticity = 1.0;
        a.friction = 0.0;
        let mut b = Body::new_circle(25.0, 0.0, 10.0, 1.0, false);
        b.velocity = Vector2::new(-10.0, 0.0);
        b.elasticity = 1.0;
        b.friction = 0.0;

        let contact = detect_resolver(&a, &b).expect("should collide");
        resolve_impulse(&mut a, &mut b, &contact);

        assert!((a.velocity.x + 10.0).abs() < 1e-6);
        assert!((b.velocity.x - 10.0).abs() < 1e-6);
    }

    #[test]
    fn static_vs_static_is_a_no_op() {
        let mut a = Body::new_circle(0.0, 0.0, 10.0, 0.0, false);
        let mut b = Body::new_circle(15.0, 0.0, 10.0, 0.0, false);
        let contact = detect_resolver(&a, &b).expect("should collide");
        let a_before = a.clone();
        let b_before = b.clone();
        resolve_impulse(&mut a, &mut b, &contact);
        assert_eq!(a, a_before);
        assert_eq!(b, b_before);
    }

    #[test]
    fn positional_projection_splits_by_inverse_mass() {
        let mut a = Body::new_circle(0.0, 0.0, 10.0, 1.0, false);
        let mut b = Body::new_circle(15.0, 0.0, 10.0, 0.0, false);
        let contact = detect_resolver(&a, &b).expect("should collide");
        let depth = contact.0.depth();
        resolve_impulse(&mut a, &mut b, &contact);
        // b is static: all positional correction falls on a.
        assert!((a.position.x + depth).abs() < 1e-9);
        assert_eq!(b.position.x, 15.0);
    }
}
