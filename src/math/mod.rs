//! Vector algebra and dense small-matrix helpers shared by every other
//! module. Everything here is value-semantic: no method mutates its
//! receiver in place except where the type explicitly says "mutable".

mod matrix;
mod vector2;

pub use matrix::{Matrix, MathError};
pub use vector2::Vector2Ext;

/// The crate's 2D vector type. A thin alias over [`glam::DVec2`] rather than
/// a bespoke struct: this crate already threads `glam` vectors through
/// every API, and re-deriving dot/length/normalize would just shadow
/// what `glam` gives us for free. [`Vector2Ext`] adds the
/// handful of operations this engine needs that `glam` doesn't name the
/// same way (a clockwise `perpendicular`, rotation about an arbitrary
/// pivot).
pub type Vector2 = glam::DVec2;
