//! Convex shapes a [`crate::body::Body`] can carry: a [`Circle`] or a
//! [`Polygon`]. Convexity and counter-clockwise winding of polygon vertices
//! are caller-guaranteed; nothing here validates them.

use crate::math::Vector2;

/// Unit-mass moment of inertia used when a polygon's true inertia can't be
/// computed (fewer than three vertices, or zero signed area). Not a
/// physically meaningful value; kept as a named constant rather than
/// inlined so it's easy to find.
pub const FALLBACK_POLYGON_INERTIA: f64 = 6000.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    pub radius: f64,
}

impl Circle {
    pub fn new(radius: f64) -> Self {
        Circle { radius }
    }

    /// Unit-mass moment of inertia of a uniform disc: `r^2 / 2`.
    pub fn unit_inertia(&self) -> f64 {
        0.5 * self.radius * self.radius
    }
}

/// A convex polygon: an immutable local-space vertex list (counter-clockwise
/// winding) plus a world-space cache refreshed by
/// [`Polygon::update_vertices`]. Optionally tagged with the `(width,
/// height)` it was constructed from when it's an axis-aligned box, purely
/// so callers can recover that metadata later.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    local_vertices: Vec<Vector2>,
    world_vertices: Vec<Vector2>,
    box_dims: Option<(f64, f64)>,
}

impl Polygon {
    pub fn new(local_vertices: Vec<Vector2>) -> Self {
        let world_vertices = local_vertices.clone();
        Polygon {
            local_vertices,
            world_vertices,
            box_dims: None,
        }
    }

    /// An axis-aligned box of size `width x height`, centred on the local
    /// origin, vertices wound counter-clockwise starting bottom-left.
    pub fn new_box(width: f64, height: f64) -> Self {
        let hw = width / 2.0;
        let hh = height / 2.0;
        let mut polygon = Polygon::new(vec![
            Vector2::new(-hw, -hh),
            Vector2::new(hw, -hh),
            Vector2::new(hw, hh),
            Vector2::new(-hw, hh),
        ]);
        polygon.box_dims = Some((width, height));
        polygon
    }

    pub fn local_vertices(&self) -> &[Vector2] {
        &self.local_vertices
    }

    pub fn world_vertices(&self) -> &[Vector2] {
        &self.world_vertices
    }

    pub fn box_dims(&self) -> Option<(f64, f64)> {
        self.box_dims
    }

    /// Refresh the world-vertex cache from a pose. Idempotent for an
    /// unchanged pose: calling it twice with the same `(position, rotation)`
    /// leaves `world_vertices` bit-identical.
    pub fn update_vertices(&mut self, position: Vector2, rotation: f64) {
        use crate::math::Vector2Ext;
        for (world, local) in self.world_vertices.iter_mut().zip(&self.local_vertices) {
            *world = local.rotate_by(rotation) + position;
        }
    }

    /// Radius of the bounding circle used as the broadphase skin: the
    /// farthest local vertex from the local origin.
    pub fn bounding_radius(&self) -> f64 {
        self.local_vertices
            .iter()
            .map(|v| v.length())
            .fold(0.0, f64::max)
    }

    /// True unit-mass moment of inertia, computed from the vertex list via
    /// the signed-triangle-fan decomposition (area and second moment of
    /// area about the first vertex, shifted to the centroid by the
    /// parallel-axis theorem). Falls back to [`FALLBACK_POLYGON_INERTIA`]
    /// for degenerate polygons.
    pub fn unit_inertia(&self) -> f64 {
        let verts = &self.local_vertices;
        if verts.len() < 3 {
            return FALLBACK_POLYGON_INERTIA;
        }

        let origin = verts[0];
        let mut area = 0.0;
        let mut second_moment = 0.0;
        let mut centroid = Vector2::ZERO;

        for i in 0..verts.len() {
            let e1 = verts[i] - origin;
            let e2 = verts[(i + 1) % verts.len()] - origin;
            let cross = e1.perp_dot(e2);
            let triangle_area = 0.5 * cross;
            area += triangle_area;
            centroid += (e1 + e2) * (cross / 6.0);

            let intx2 = e1.x * e1.x + e1.x * e2.x + e2.x * e2.x;
            let inty2 = e1.y * e1.y + e1.y * e2.y + e2.y * e2.y;
            second_moment += (cross / 12.0) * (intx2 + inty2);
        }

        if area.abs() < 1e-9 {
            return FALLBACK_POLYGON_INERTIA;
        }

        centroid /= area;
        let inertia_about_origin_per_unit_mass = second_moment / area;
        let inertia_about_centroid =
            inertia_about_origin_per_unit_mass - centroid.dot(centroid);
        inertia_about_centroid.max(0.0)
    }
}

/// The one shape a [`crate::body::Body`] carries. A tagged enum rather than
/// two optional fields: a "both shapes populated" configuration error is
/// eliminated by construction.
#[derive(Clone, Debug, PartialEq)]
pub enum ShapeKind {
    Circle(Circle),
    Polygon(Polygon),
}

impl ShapeKind {
    /// Broadphase skin radius: the circle's own radius, or a polygon's
    /// bounding-circle radius.
    pub fn bounding_radius(&self) -> f64 {
        match self {
            ShapeKind::Circle(c) => c.radius,
            ShapeKind::Polygon(p) => p.bounding_radius(),
        }
    }

    pub fn as_circle(&self) -> Option<&Circle> {
        match self {
            ShapeKind::Circle(c) => Some(c),
            ShapeKind::Polygon(_) => None,
        }
    }

    pub fn as_polygon(&self) -> Option<&Polygon> {
        match self {
            ShapeKind::Circle(_) => None,
            ShapeKind::Polygon(p) => Some(p),
        }
    }

    pub fn as_polygon_mut(&mut self) -> Option<&mut Polygon> {
        match self {
            ShapeKind::Circle(_) => None,
            ShapeKind::Polygon(p) => Some(p),
        }
    }
}
