//! Pure force builders: each returns a 2-vector meant to be passed to
//! [`crate::body::Body::add_force`]. None of these read or mutate a body's
//! force accumulator themselves.

use crate::body::Body;
use crate::math::{Vector2, Vector2Ext};

/// Pixels per simulated metre; positions, radii, and the force builders
/// below are expressed in pixels, not metres.
pub const PIXELS_PER_METER: f64 = 50.0;
/// Default gravitational acceleration, in metres per second squared.
pub const GRAVITY: f64 = 9.8;

/// `(0, mass * g * PIXELS_PER_METER)`, `g` defaulting to [`GRAVITY`].
pub fn weight(mass: f64, g: f64) -> Vector2 {
    Vector2::new(0.0, mass * g * PIXELS_PER_METER)
}

/// Quadratic drag: `-(|v|^2 * c) * v_hat`. Zero for a stationary body.
pub fn drag(velocity: Vector2, coefficient: f64) -> Vector2 {
    let speed_sq = velocity.length_squared();
    if speed_sq == 0.0 {
        return Vector2::ZERO;
    }
    -(speed_sq * coefficient) * velocity.norm()
}

/// Simple (non-quadratic) friction: `-c * v_hat`.
pub fn friction(velocity: Vector2, coefficient: f64) -> Vector2 {
    -coefficient * velocity.norm()
}

/// Inverse-square attraction, softened: `|delta|^2` is clamped into
/// `[min_dist * max_dist, max_dist^2]` before the inverse-square falloff is
/// applied, so the force never blows up as bodies approach each other.
pub fn attraction_soft(
    a: &Body,
    b: &Body,
    coefficient: f64,
    min_dist: f64,
    max_dist: f64,
) -> Vector2 {
    let delta = b.position - a.position;
    let distance_sq = delta
        .length_squared()
        .clamp(min_dist * max_dist, max_dist * max_dist);
    coefficient * a.mass() * b.mass() * delta.norm() / distance_sq
}

/// Inverse-square attraction, hard cutoff: zero outside
/// `[min_dist^2, max_dist^2]`, otherwise identical to
/// [`attraction_soft`]'s falloff.
pub fn attraction_hard(
    a: &Body,
    b: &Body,
    coefficient: f64,
    min_dist: f64,
    max_dist: f64,
) -> Vector2 {
    let delta = b.position - a.position;
    let distance_sq = delta.length_squared();
    if distance_sq < min_dist * min_dist || distance_sq > max_dist * max_dist {
        return Vector2::ZERO;
    }
    coefficient * a.mass() * b.mass() * delta.norm() / distance_sq
}

/// A linear spring pulling `body` toward `anchor`:
/// `-k * (|delta| - rest_length) * delta_hat`.
pub fn spring(body_position: Vector2, anchor: Vector2, stiffness: f64, rest_length: f64) -> Vector2 {
    let delta = body_position - anchor;
    let distance = delta.length();
    -stiffness * (distance - rest_length) * delta.norm()
}
