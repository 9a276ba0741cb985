//! Constraint data: the penetration+friction constraint seeded from a
//! collision contact, and the distance joint. Both hold non-owning access
//! to their two bodies only for the duration of a `pre_solve`/`solve` call
//! — never stashed — and carry a cached Lagrange multiplier across ticks
//! for warm starting.

mod joint;
mod penetration;

pub use joint::JointConstraint;
pub use penetration::PenConstraint;

use crate::body::Body;
use crate::math::{Matrix, MathError, Vector2};

/// The six-DoF mass matrix diagonal `(mA⁻¹, mA⁻¹, IA⁻¹, mB⁻¹, mB⁻¹, IB⁻¹)`
/// for a body pair. `zero_unstoppable_linear` overwrites an unstoppable
/// body's two linear entries with 0 — used by penetration constraints
/// only, since `unstoppable` means immune to collision impulses
/// specifically, not joint impulses.
pub(crate) fn mass_diagonal(a: &Body, b: &Body, zero_unstoppable_linear: bool) -> [f64; 6] {
    let a_inv_mass = if zero_unstoppable_linear && a.unstoppable {
        0.0
    } else {
        a.inverse_mass()
    };
    let b_inv_mass = if zero_unstoppable_linear && b.unstoppable {
        0.0
    } else {
        b.inverse_mass()
    };
    [
        a_inv_mass,
        a_inv_mass,
        a.inverse_angular_mass(),
        b_inv_mass,
        b_inv_mass,
        b.inverse_angular_mass(),
    ]
}

/// The six-DoF velocity vector `(vA.x, vA.y, ωA, vB.x, vB.y, ωB)`.
pub(crate) fn velocity_vector(a: &Body, b: &Body) -> [f64; 6] {
    [
        a.velocity.x,
        a.velocity.y,
        a.angular_velocity,
        b.velocity.x,
        b.velocity.y,
        b.angular_velocity,
    ]
}

/// Velocity of the material point at offset `r` from a body's centre of
/// mass: `v + ω × r`, with the 2D cross of a scalar and a vector taken as
/// `ω × r = (−ω·r.y, ω·r.x)`.
pub(crate) fn point_velocity(velocity: Vector2, angular_velocity: f64, r: Vector2) -> Vector2 {
    velocity + Vector2::new(-angular_velocity * r.y, angular_velocity * r.x)
}

/// Apply a 6-entry `Jᵀ·λ` impulse vector to a body pair. Linear impulses on
/// an unstoppable body are dropped when `zero_unstoppable_linear` is set
/// (penetration constraints only); angular impulses are never suppressed.
pub(crate) fn apply_jacobian_impulse(
    a: &mut Body,
    b: &mut Body,
    impulses: &[f64],
    zero_unstoppable_linear: bool,
) {
    if !(zero_unstoppable_linear && a.unstoppable) {
        crate::integrator::apply_impulse_linear(a, Vector2::new(impulses[0], impulses[1]));
    }
    crate::integrator::apply_impulse_angular(a, impulses[2]);

    if !(zero_unstoppable_linear && b.unstoppable) {
        crate::integrator::apply_impulse_linear(b, Vector2::new(impulses[3], impulses[4]));
    }
    crate::integrator::apply_impulse_angular(b, impulses[5]);
}

/// One Gauss–Seidel constraint-solve iteration: `λ = GaussSeidel(J·M⁻¹·Jᵀ,
/// −J·V − bias·e₀)`. `bias` is subtracted from row 0 only, matching every
/// constraint kind this engine has (the penetration row, or the joint's
/// single row).
pub(crate) fn solve_iteration(
    jacobian: &Matrix,
    mass_diag: &[f64; 6],
    velocity: &[f64; 6],
    bias: f64,
) -> Result<Vec<f64>, MathError> {
    let m_inv = Matrix::diagonal(mass_diag);
    let jt = jacobian.transpose();
    let lhs = jacobian.multiply(&m_inv)?.multiply(&jt)?;
    let jv = jacobian.multiply_by_slice(velocity)?;
    let mut rhs: Vec<f64> = jv.iter().map(|x| -x).collect();
    rhs[0] -= bias;
    Ok(lhs.solve_gauss_seidel(&rhs))
}
