//! Rigid-body state: pose, momentum, material, and the one shape a body
//! carries.

use crate::error::BodyError;
use crate::math::{Vector2, Vector2Ext};
use crate::shape::{Circle, Polygon, ShapeKind};

/// Elasticity and friction defaults, keyed by shape, used by the
/// convenience constructors. Polygon's values apply to any
/// caller-supplied convex polygon that isn't a box.
mod defaults {
    pub const CIRCLE_ELASTICITY: f64 = 1.0;
    pub const CIRCLE_FRICTION: f64 = 0.5;
    pub const BOX_ELASTICITY: f64 = 0.5;
    pub const BOX_FRICTION: f64 = 0.030;
    pub const POLYGON_ELASTICITY: f64 = 0.3;
    pub const POLYGON_FRICTION: f64 = 0.4;
}

/// A single rigid body: translational and rotational state, material
/// coefficients, and exactly one [`ShapeKind`].
#[derive(Clone, Debug, PartialEq)]
pub struct Body {
    pub position: Vector2,
    pub velocity: Vector2,
    pub acceleration: Vector2,
    sum_forces: Vector2,
    inverse_mass: f64,

    pub rotation: f64,
    pub angular_velocity: f64,
    pub angular_acceleration: f64,
    sum_torque: f64,
    inverse_angular_mass: f64,

    pub elasticity: f64,
    pub friction: f64,

    shape: ShapeKind,

    /// Immune to collision impulses, but still responds to applied
    /// forces/torques. Used for kinematic platforms.
    pub unstoppable: bool,
}

impl Body {
    fn new(shape: ShapeKind, mass: f64, elasticity: f64, friction: f64, angular: bool) -> Self {
        let inverse_mass = if mass > 0.0 { 1.0 / mass } else { 0.0 };
        let unit_inertia = match &shape {
            ShapeKind::Circle(c) => c.unit_inertia(),
            ShapeKind::Polygon(p) => p.unit_inertia(),
        };
        let inverse_angular_mass = if angular && mass > 0.0 {
            1.0 / (unit_inertia * mass)
        } else {
            0.0
        };

        Body {
            position: Vector2::ZERO,
            velocity: Vector2::ZERO,
            acceleration: Vector2::ZERO,
            sum_forces: Vector2::ZERO,
            inverse_mass,
            rotation: 0.0,
            angular_velocity: 0.0,
            angular_acceleration: 0.0,
            sum_torque: 0.0,
            inverse_angular_mass,
            elasticity,
            friction,
            shape,
            unstoppable: false,
        }
    }

    pub fn new_circle(x: f64, y: f64, radius: f64, mass: f64, angular: bool) -> Self {
        let mut body = Body::new(
            ShapeKind::Circle(Circle::new(radius)),
            mass,
            defaults::CIRCLE_ELASTICITY,
            defaults::CIRCLE_FRICTION,
            angular,
        );
        body.position = Vector2::new(x, y);
        body
    }

    pub fn new_box(x: f64, y: f64, width: f64, height: f64, mass: f64, angular: bool) -> Self {
        let mut body = Body::new(
            ShapeKind::Polygon(Polygon::new_box(width, height)),
            mass,
            defaults::BOX_ELASTICITY,
            defaults::BOX_FRICTION,
            angular,
        );
        body.position = Vector2::new(x, y);
        body.refresh_vertices();
        body
    }

    pub fn new_polygon(x: f64, y: f64, mass: f64, local_vertices: Vec<Vector2>, angular: bool) -> Self {
        let mut body = Body::new(
            ShapeKind::Polygon(Polygon::new(local_vertices)),
            mass,
            defaults::POLYGON_ELASTICITY,
            defaults::POLYGON_FRICTION,
            angular,
        );
        body.position = Vector2::new(x, y);
        body.refresh_vertices();
        body
    }

    /// Build a polygon body from *world-space* vertices: the centroid is
    /// computed, the body is placed there, and the vertices are
    /// re-expressed relative to it so `local_vertices` stays
    /// centre-of-mass-relative like every other constructor produces.
    pub fn new_polygon_world(mass: f64, world_vertices: Vec<Vector2>, angular: bool) -> Self {
        let centroid = world_vertices.iter().fold(Vector2::ZERO, |acc, v| acc + *v)
            / world_vertices.len() as f64;
        let local_vertices: Vec<Vector2> =
            world_vertices.iter().map(|v| *v - centroid).collect();
        let mut body = Body::new(
            ShapeKind::Polygon(Polygon::new(local_vertices)),
            mass,
            defaults::POLYGON_ELASTICITY,
            defaults::POLYGON_FRICTION,
            angular,
        );
        body.position = centroid;
        body.refresh_vertices();
        body
    }

    pub fn shape(&self) -> &ShapeKind {
        &self.shape
    }

    pub fn inverse_mass(&self) -> f64 {
        self.inverse_mass
    }

    pub fn inverse_angular_mass(&self) -> f64 {
        self.inverse_angular_mass
    }

    /// True for a static body (infinite mass). Inverts `inverse_mass`,
    /// returning `0.0` (not infinity) for a static body.
    pub fn mass(&self) -> f64 {
        if self.inverse_mass == 0.0 {
            0.0
        } else {
            1.0 / self.inverse_mass
        }
    }

    pub fn is_static(&self) -> bool {
        self.inverse_mass == 0.0
    }

    pub fn set_mass(&mut self, mass: f64) {
        self.inverse_mass = if mass > 0.0 { 1.0 / mass } else { 0.0 };
    }

    pub fn set_angular_mass(&mut self, mass: f64, angular: bool) {
        let unit_inertia = match &self.shape {
            ShapeKind::Circle(c) => c.unit_inertia(),
            ShapeKind::Polygon(p) => p.unit_inertia(),
        };
        self.inverse_angular_mass = if angular && mass > 0.0 {
            1.0 / (unit_inertia * mass)
        } else {
            0.0
        };
    }

    /// Kept for API parity with callers that still check configuration
    /// validity explicitly. The shape slot is a tagged enum, so the "more
    /// than one shape" error this used to report is unreachable by
    /// construction.
    pub fn validate(&self) -> Result<(), BodyError> {
        Ok(())
    }

    pub fn add_force(&mut self, force: Vector2) {
        self.sum_forces += force;
    }

    pub fn clear_forces(&mut self) {
        self.sum_forces = Vector2::ZERO;
    }

    pub fn add_torque(&mut self, torque: f64) {
        self.sum_torque += torque;
    }

    pub fn clear_torque(&mut self) {
        self.sum_torque = 0.0;
    }

    pub(crate) fn sum_forces(&self) -> Vector2 {
        self.sum_forces
    }

    pub(crate) fn sum_torque(&self) -> f64 {
        self.sum_torque
    }

    /// `world = rotate(local, rotation) + position`.
    pub fn local_to_world(&self, local: Vector2) -> Vector2 {
        local.rotate_by(self.rotation) + self.position
    }

    /// `local = rotate(world - position, -rotation)`.
    pub fn world_to_local(&self, world: Vector2) -> Vector2 {
        (world - self.position).rotate_by(-self.rotation)
    }

    /// Refresh the polygon world-vertex cache from the current pose. A
    /// no-op for circle bodies. Returns [`BodyError::NotAPolygon`] if the
    /// caller expected a polygon and there isn't one.
    pub fn update_vertices(&mut self) -> Result<(), BodyError> {
        match &mut self.shape {
            ShapeKind::Polygon(p) => {
                p.update_vertices(self.position, self.rotation);
                Ok(())
            }
            ShapeKind::Circle(_) => Err(BodyError::NotAPolygon),
        }
    }

    /// Same as [`Body::update_vertices`] but silent for circles, since most
    /// callers just want "whatever cache this shape has, current" without
    /// caring whether that's a polygon.
    pub fn refresh_vertices(&mut self) {
        let _ = self.update_vertices();
    }

    /// Broadphase skin radius.
    pub fn bounding_radius(&self) -> f64 {
        self.shape.bounding_radius()
    }
}

/// Average a pair's elasticity/friction: a collision between two
/// differently-tuned materials uses the midpoint of each coefficient.
pub fn combined_elasticity(a: &Body, b: &Body) -> f64 {
    (a.elasticity + b.elasticity) / 2.0
}

pub fn combined_friction(a: &Body, b: &Body) -> f64 {
    (a.friction + b.friction) / 2.0
}
