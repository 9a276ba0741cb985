use crate::body::Body;
use crate::math::{Vector2, Vector2Ext};

use super::Contact;

/// Result of querying one polygon's edges as candidate separating axes
/// against another polygon's vertices: the edge achieving the maximum
/// (least-negative) minimum projection, that projection value, the edge's
/// outward normal, and which vertex of the other polygon realised it.
struct Separation {
    edge: usize,
    value: f64,
    normal: Vector2,
    deepest_vertex: Vector2,
}

/// For every edge of `reference`, project every vertex of `other` onto
/// that edge's outward normal and keep the minimum. Return the edge whose
/// minimum projection is largest — the best candidate separating axis.
fn find_max_separation(reference: &[Vector2], other: &[Vector2]) -> Separation {
    let n = reference.len();
    let mut best = Separation {
        edge: 0,
        value: f64::NEG_INFINITY,
        normal: Vector2::ZERO,
        deepest_vertex: Vector2::ZERO,
    };

    for i in 0..n {
        let v1 = reference[i];
        let v2 = reference[(i + 1) % n];
        let normal = (v2 - v1).perpendicular().norm();

        let mut min_proj = f64::INFINITY;
        let mut min_vertex = other[0];
        for &vertex in other {
            let proj = (vertex - v1).dot(normal);
            if proj < min_proj {
                min_proj = proj;
                min_vertex = vertex;
            }
        }

        if min_proj > best.value {
            best = Separation {
                edge: i,
                value: min_proj,
                normal,
                deepest_vertex: min_vertex,
            };
        }
    }

    best
}

/// Single-contact SAT query used by the one-shot resolver path. The body
/// whose separation is *more negative* (deeper penetration) supplies the
/// contact normal — see the design notes on why the resolver and solver
/// paths pick opposite reference bodies.
pub fn resolver_contact(a: &Body, b: &Body) -> Option<Contact> {
    let a_verts = a.shape().as_polygon().expect("expected polygon").world_vertices();
    let b_verts = b.shape().as_polygon().expect("expected polygon").world_vertices();

    let sep_a = find_max_separation(a_verts, b_verts);
    let sep_b = find_max_separation(b_verts, a_verts);

    if sep_a.value >= 0.0 || sep_b.value >= 0.0 {
        return None;
    }

    if sep_a.value < sep_b.value {
        // A is the deeper (reference) body; its normal already points A -> B.
        let depth = -sep_a.value;
        let normal = sep_a.normal;
        let start = sep_a.deepest_vertex; // on B
        let end = start + normal * depth; // on A
        Some(Contact::new(start, end, normal))
    } else {
        // B is the deeper (reference) body; flip its outward normal to point A -> B.
        let depth = -sep_b.value;
        let normal = -sep_b.normal;
        let end = sep_b.deepest_vertex; // on A
        let start = end - normal * depth; // on B
        Some(Contact::new(start, end, normal))
    }
}

/// Clip a 2-point segment against the half-plane defined by the direction
/// from `c0` to `c1`: endpoints with a non-positive projection (relative to
/// `c0`, along that direction) are kept, and a straddling segment is cut at
/// the intersection.
fn clip_half_plane(segment: &[Vector2; 2], origin: Vector2, keep_direction: Vector2) -> Vec<Vector2> {
    let d0 = keep_direction.dot(segment[0] - origin);
    let d1 = keep_direction.dot(segment[1] - origin);

    let mut out = Vec::with_capacity(2);
    if d0 >= 0.0 {
        out.push(segment[0]);
    }
    if d1 >= 0.0 {
        out.push(segment[1]);
    }
    if d0 * d1 < 0.0 {
        let t = d0 / (d0 - d1);
        out.push(segment[0] + t * (segment[1] - segment[0]));
    }
    out
}

/// Clip `segment` to the span of the reference edge `[ref_v1, ref_v2]`:
/// one half-plane test per endpoint, each keeping the side of the plane
/// that contains the rest of the edge.
fn clip_to_reference_span(segment: &[Vector2; 2], ref_v1: Vector2, ref_v2: Vector2) -> Vec<Vector2> {
    let tangent = (ref_v2 - ref_v1).norm();
    let at_v1 = clip_half_plane(segment, ref_v1, tangent);
    if at_v1.len() < 2 {
        return at_v1;
    }
    clip_half_plane(&[at_v1[0], at_v1[1]], ref_v2, -tangent)
}

/// Two-contact clipped SAT manifold used by the iterative solver path. The
/// body with the *larger* (less negative) min-separation is the reference
/// body — the opposite convention from [`resolver_contact`], preserved
/// because both pathways persist independently in the system this was
/// ported from.
pub fn solver_contacts(a: &Body, b: &Body) -> Vec<Contact> {
    let a_verts = a.shape().as_polygon().expect("expected polygon").world_vertices();
    let b_verts = b.shape().as_polygon().expect("expected polygon").world_vertices();

    let sep_a = find_max_separation(a_verts, b_verts);
    let sep_b = find_max_separation(b_verts, a_verts);

    if sep_a.value >= 0.0 || sep_b.value >= 0.0 {
        return Vec::new();
    }

    let (reference_verts, incident_verts, reference_normal, reference_edge, a_is_reference) =
        if sep_a.value > sep_b.value {
            (a_verts, b_verts, sep_a.normal, sep_a.edge, true)
        } else {
            (b_verts, a_verts, sep_b.normal, sep_b.edge, false)
        };

    let ref_v1 = reference_verts[reference_edge];
    let ref_v2 = reference_verts[(reference_edge + 1) % reference_verts.len()];

    // Incident edge: the one whose outward normal is most anti-parallel to
    // the reference normal.
    let n = incident_verts.len();
    let mut incident_edge = 0;
    let mut best_dot = f64::INFINITY;
    for i in 0..n {
        let v1 = incident_verts[i];
        let v2 = incident_verts[(i + 1) % n];
        let normal = (v2 - v1).perpendicular().norm();
        let dot = normal.dot(reference_normal);
        if dot < best_dot {
            best_dot = dot;
            incident_edge = i;
        }
    }
    let inc_v1 = incident_verts[incident_edge];
    let inc_v2 = incident_verts[(incident_edge + 1) % n];
    let segment = [inc_v1, inc_v2];

    let clipped = clip_to_reference_span(&segment, ref_v1, ref_v2);
    if clipped.len() < 2 {
        return Vec::new();
    }

    let mut contacts = Vec::with_capacity(2);
    for &point in &clipped {
        let separation = reference_normal.dot(point - ref_v1);
        if separation > 0.0 {
            continue;
        }
        let depth = -separation;
        if a_is_reference {
            let start = point; // on B
            let end = point + reference_normal * depth; // on A
            contacts.push(Contact::new(start, end, reference_normal));
        } else {
            let normal = -reference_normal; // flip to A -> B
            let end = point; // on A
            let start = end - normal * depth; // on B
            contacts.push(Contact::new(start, end, normal));
        }
    }
    contacts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn box_body(x: f64, y: f64, w: f64, h: f64) -> Body {
        let mut body = Body::new_box(x, y, w, h, 1.0, false);
        body.refresh_vertices();
        body
    }

    #[test]
    fn overlapping_edge_aligned_boxes_yield_two_contacts() {
        let a = box_body(0.0, 0.0, 100.0, 20.0);
        let b = box_body(0.0, -15.0, 100.0, 20.0);
        let contacts = solver_contacts(&a, &b);
        assert_eq!(contacts.len(), 2);
        for c in &contacts {
            assert!(c.depth() > 0.0);
        }
        let n0 = contacts[0].normal;
        let n1 = contacts[1].normal;
        assert!((n0 - n1).length() < 1e-9);
        for c in &contacts {
            let reconstructed = c.start + c.normal * c.depth();
            assert!((reconstructed - c.end).length() < 1e-6);
        }
    }

    #[test]
    fn separated_boxes_yield_no_solver_contacts() {
        let a = box_body(0.0, 0.0, 10.0, 10.0);
        let b = box_body(11.0, 0.0, 10.0, 10.0);
        assert!(solver_contacts(&a, &b).is_empty());
    }

    #[test]
    fn overlapping_boxes_yield_a_resolver_contact() {
        let a = box_body(0.0, 0.0, 100.0, 20.0);
        let b = box_body(0.0, -15.0, 100.0, 20.0);
        let contact = resolver_contact(&a, &b).expect("should collide");
        assert!(contact.depth() > 0.0);
    }
}
