use glam::DMat2;

use super::Vector2;

/// Operations on [`Vector2`] that the engine needs by name but `glam`
/// either doesn't provide or defines with the opposite handedness.
pub trait Vector2Ext {
    /// `(x, y) -> (y, -x)`, a clockwise quarter turn. This is the opposite
    /// winding from `glam::DVec2::perp`, which turns counter-clockwise, so
    /// it's spelled out here rather than reused.
    fn perpendicular(self) -> Vector2;

    /// Rotate this vector about the origin by `angle` radians.
    fn rotate_by(self, angle: f64) -> Vector2;

    /// Rotate this vector about `pivot` by `angle` radians.
    fn rotate_around(self, angle: f64, pivot: Vector2) -> Vector2;

    /// Normalize, leaving a zero-length vector unchanged instead of
    /// producing NaNs.
    fn norm(self) -> Vector2;
}

impl Vector2Ext for Vector2 {
    fn perpendicular(self) -> Vector2 {
        Vector2::new(self.y, -self.x)
    }

    fn rotate_by(self, angle: f64) -> Vector2 {
        DMat2::from_angle(angle) * self
    }

    fn rotate_around(self, angle: f64, pivot: Vector2) -> Vector2 {
        (self - pivot).rotate_by(angle) + pivot
    }

    fn norm(self) -> Vector2 {
        self.normalize_or_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn perpendicular_is_clockwise() {
        let v = Vector2::new(1.0, 0.0);
        assert_eq!(v.perpendicular(), Vector2::new(0.0, -1.0));
    }

    #[test]
    fn rotate_by_quarter_turn() {
        let v = Vector2::new(1.0, 0.0);
        let rotated = v.rotate_by(FRAC_PI_2);
        assert!((rotated.x - 0.0).abs() < 1e-9);
        assert!((rotated.y - 1.0).abs() < 1e-9);
    }

    #[test]
    fn rotate_around_point() {
        let v = Vector2::new(2.0, 1.0);
        let pivot = Vector2::new(1.0, 1.0);
        let rotated = v.rotate_around(std::f64::consts::PI, pivot);
        assert!((rotated - Vector2::new(0.0, 1.0)).length() < 1e-9);
    }

    #[test]
    fn norm_leaves_zero_unchanged() {
        let v = Vector2::ZERO;
        assert_eq!(v.norm(), Vector2::ZERO);
    }

    #[test]
    fn norm_normalizes_nonzero() {
        let v = Vector2::new(3.0, 4.0);
        assert!((v.norm().length() - 1.0).abs() < 1e-9);
    }
}
