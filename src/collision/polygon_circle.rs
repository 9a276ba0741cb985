use crate::body::Body;
use crate::math::{Vector2, Vector2Ext};

use super::Contact;

/// Polygon/circle test. `polygon_body` is treated as A, `circle_body` as B:
/// the returned contact's normal points from the polygon towards the
/// circle. Callers that were handed the arguments circle-first must flip
/// the result with [`super::Contact::flipped`].
pub fn polygon_circle(polygon_body: &Body, circle_body: &Body) -> Option<Contact> {
    let polygon = polygon_body.shape().as_polygon().expect("expected a polygon");
    let circle = circle_body.shape().as_circle().expect("expected a circle");
    let verts = polygon.world_vertices();
    let center = circle_body.position;
    let radius = circle.radius;
    let n = verts.len();

    let mut best_proj = f64::NEG_INFINITY;
    let mut best_edge = 0;
    for i in 0..n {
        let v1 = verts[i];
        let v2 = verts[(i + 1) % n];
        let normal = (v2 - v1).perpendicular().norm();
        let proj = (center - v1).dot(normal);
        if proj > best_proj {
            best_proj = proj;
            best_edge = i;
        }
        if proj > 0.0 {
            best_edge = i;
            best_proj = proj;
            break;
        }
    }

    let v1 = verts[best_edge];
    let v2 = verts[(best_edge + 1) % n];
    let edge = v2 - v1;

    let u1 = (center - v1).dot(edge);
    let u2 = (center - v2).dot(edge);

    if u1 <= 0.0 {
        let diff = center - v1;
        let distance = diff.length();
        if distance > radius {
            return None;
        }
        let normal = diff.norm();
        let start = center - normal * radius;
        let end = v1;
        return Some(Contact::new(start, end, normal));
    }

    if u2 >= 0.0 {
        let diff = center - v2;
        let distance = diff.length();
        if distance > radius {
            return None;
        }
        let normal = diff.norm();
        let start = center - normal * radius;
        let end = v2;
        return Some(Contact::new(start, end, normal));
    }

    let separation = best_proj;
    if separation > radius {
        return None;
    }
    let normal = (v2 - v1).perpendicular().norm();
    let end: Vector2 = center - normal * separation;
    let start = center - normal * radius;
    Some(Contact::new(start, end, normal))
}
