//! Semi-implicit Euler integration and the force/torque accumulator
//! contract: callers add forces every tick via [`crate::body::Body::add_force`]
//! / [`crate::body::Body::add_torque`]; [`integrate`] consumes and clears
//! them.

use tracing::trace;

use crate::body::Body;
use crate::math::Vector2;

/// Advance `body` by `dt` using semi-implicit ("symplectic") Euler: the
/// position update uses the just-updated velocity, not the velocity at the
/// start of the step. Static bodies (`inverse_mass == 0`) are skipped
/// entirely — forces/torques applied to them are silently discarded along
/// with everything else that gets cleared.
pub fn integrate(body: &mut Body, dt: f64) {
    if body.is_static() {
        body.clear_forces();
        body.clear_torque();
        return;
    }

    let acceleration = body.sum_forces() * body.inverse_mass();
    body.acceleration = acceleration;
    body.velocity += acceleration * dt;
    body.position += body.velocity * dt;
    body.clear_forces();

    let angular_acceleration = body.sum_torque() * body.inverse_angular_mass();
    body.angular_acceleration = angular_acceleration;
    body.angular_velocity += angular_acceleration * dt;
    body.rotation += body.angular_velocity * dt;
    body.clear_torque();

    trace!(
        position = ?body.position,
        velocity = ?body.velocity,
        rotation = body.rotation,
        "integrated body"
    );

    body.refresh_vertices();
}

/// `impulse` applied at the body's centre of mass: `velocity += impulse *
/// inverse_mass`. No-op for a static body.
pub fn apply_impulse_linear(body: &mut Body, impulse: Vector2) {
    if body.is_static() {
        return;
    }
    body.velocity += impulse * body.inverse_mass();
}

/// A scalar angular impulse: `angular_velocity += impulse *
/// inverse_angular_mass`.
pub fn apply_impulse_angular(body: &mut Body, impulse: f64) {
    if body.is_static() {
        return;
    }
    body.angular_velocity += impulse * body.inverse_angular_mass();
}

/// Apply a linear impulse at a point offset `r` from the centre of mass,
/// producing both a linear and an angular response: `angular_factor`
/// scales the angular component only (pass `1.0` for the usual case; a
/// negative value is how a solver applies the "other side" of an impulse
/// pair without negating the linear part too).
pub fn apply_impulse(body: &mut Body, impulse: Vector2, r: Vector2, angular_factor: f64) {
    apply_impulse_linear(body, impulse);
    apply_impulse_angular(body, angular_factor * r.perp_dot(impulse));
}
