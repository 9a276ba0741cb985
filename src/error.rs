//! Configuration-error family: recoverable mistakes a caller made while
//! building or mutating a [`crate::body::Body`]. Numeric operability
//! errors live next to the math they come from, in
//! [`crate::math::MathError`].

/// Raised by [`crate::body::Body::validate`] and
/// [`crate::body::Body::update_vertices`].
///
/// In practice `Body`'s shape slot is a tagged enum, so the "two shapes
/// configured" case this mirrors can't occur by construction; `validate`
/// is kept for API parity and always returns `Ok(())`. `NotAPolygon` is
/// the one case that can still happen, since `update_vertices` is
/// meaningless for a circle.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BodyError {
    #[error("body has more than one shape assigned")]
    MultipleShapes,
    #[error("update_vertices called on a body without a polygon shape")]
    NotAPolygon,
}
