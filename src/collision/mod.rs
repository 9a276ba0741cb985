//! Narrow-phase collision detection: per-pair dispatch on shape kind, SAT
//! for polygons, and a bounding-circle broadphase reject shared by every
//! pair.
//!
//! Two distinct entry points are exposed rather than one function returning
//! a tagged union, per the split called for in the design notes:
//! [`detect_resolver`] always returns at most one [`Contact`], meant for
//! the one-shot [`crate::resolver::resolve_impulse`] path; [`detect_solver`]
//! returns a [`SolverManifold`] of one or two clipped contacts, meant to
//! seed [`crate::constraint::PenConstraint`]s for the iterative solver.
//! Feeding a resolver-kind contact into the solver path (or vice versa)
//! is a type error, not a runtime tag check.

mod circle;
mod polygon;
mod polygon_circle;

use tracing::instrument;

use crate::body::Body;
use crate::math::Vector2;
use crate::shape::ShapeKind;

/// The geometric result of one collision test between two bodies A and B.
///
/// `normal` always points from A towards B along the separating axis;
/// `start` lies on B's surface, `end` lies on A's surface, and `depth =
/// |end - start|` is always non-negative.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Contact {
    pub start: Vector2,
    pub end: Vector2,
    pub normal: Vector2,
}

impl Contact {
    pub fn new(start: Vector2, end: Vector2, normal: Vector2) -> Self {
        Contact { start, end, normal }
    }

    pub fn depth(&self) -> f64 {
        (self.end - self.start).length()
    }
}

/// A resolver-kind manifold: exactly one contact, produced for the
/// non-iterative one-shot impulse resolver.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolverContact(pub Contact);

/// A solver-kind manifold: one or two clipped contacts, each meant to seed
/// a [`crate::constraint::PenConstraint`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SolverManifold {
    contacts: Vec<Contact>,
}

impl SolverManifold {
    fn from_contacts(contacts: Vec<Contact>) -> Self {
        debug_assert!(contacts.len() <= 2);
        SolverManifold { contacts }
    }

    pub fn is_colliding(&self) -> bool {
        !self.contacts.is_empty()
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }
}

/// Bounding-circle broadphase reject. Compares squared magnitudes to avoid
/// a `sqrt`. Returns `true` when the pair's skins overlap and narrow-phase
/// work is worth doing.
pub fn broadphase_overlap(a: &Body, b: &Body) -> bool {
    let combined = a.bounding_radius() + b.bounding_radius();
    (b.position - a.position).length_squared() <= combined * combined
}

/// Resolver-kind detection: single-contact manifold, or `None` if the
/// broadphase reject fires or the narrow-phase test finds no overlap.
#[instrument(level = "trace", skip_all)]
pub fn detect_resolver(a: &Body, b: &Body) -> Option<ResolverContact> {
    if !broadphase_overlap(a, b) {
        return None;
    }
    let contact = match (a.shape(), b.shape()) {
        (ShapeKind::Circle(_), ShapeKind::Circle(_)) => circle::circle_circle(a, b),
        (ShapeKind::Polygon(_), ShapeKind::Polygon(_)) => polygon::resolver_contact(a, b),
        (ShapeKind::Polygon(_), ShapeKind::Circle(_)) => polygon_circle::polygon_circle(a, b),
        (ShapeKind::Circle(_), ShapeKind::Polygon(_)) => {
            polygon_circle::polygon_circle(b, a).map(Contact::flipped)
        }
    };
    contact.map(ResolverContact)
}

/// Solver-kind detection: one- or two-contact clipped manifold, empty if
/// the broadphase reject fires or the pair isn't overlapping.
#[instrument(level = "trace", skip_all)]
pub fn detect_solver(a: &Body, b: &Body) -> SolverManifold {
    if !broadphase_overlap(a, b) {
        return SolverManifold::default();
    }
    let contacts = match (a.shape(), b.shape()) {
        (ShapeKind::Circle(_), ShapeKind::Circle(_)) => {
            circle::circle_circle(a, b).into_iter().collect()
        }
        (ShapeKind::Polygon(_), ShapeKind::Polygon(_)) => polygon::solver_contacts(a, b),
        (ShapeKind::Polygon(_), ShapeKind::Circle(_)) => {
            polygon_circle::polygon_circle(a, b).into_iter().collect()
        }
        (ShapeKind::Circle(_), ShapeKind::Polygon(_)) => polygon_circle::polygon_circle(b, a)
            .map(Contact::flipped)
            .into_iter()
            .collect(),
    };
    SolverManifold::from_contacts(contacts)
}

impl Contact {
    /// Negate the normal and swap start/end, used whenever a detector
    /// internally computed a contact for the opposite argument order.
    fn flipped(self) -> Contact {
        Contact {
            start: self.end,
            end: self.start,
            normal: -self.normal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::Body;

    #[test]
    fn broadphase_rejects_distant_bodies() {
        let a = Body::new_circle(0.0, 0.0, 1.0, 1.0, false);
        let b = Body::new_circle(1000.0, 0.0, 1.0, 1.0, false);
        assert!(!broadphase_overlap(&a, &b));
    }

    #[test]
    fn broadphase_accepts_overlapping_skins() {
        let a = Body::new_circle(0.0, 0.0, 10.0, 1.0, false);
        let b = Body::new_circle(5.0, 0.0, 10.0, 1.0, false);
        assert!(broadphase_overlap(&a, &b));
    }

    #[test]
    fn sat_rejects_separated_boxes() {
        let mut a = Body::new_box(0.0, 0.0, 10.0, 10.0, 1.0, false);
        let mut b = Body::new_box(11.0, 0.0, 10.0, 10.0, 1.0, false);
        a.refresh_vertices();
        b.refresh_vertices();
        let manifold = detect_solver(&a, &b);
        assert!(!manifold.is_colliding());
        assert!(manifold.contacts().is_empty());
    }
}
