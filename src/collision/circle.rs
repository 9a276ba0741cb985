use crate::body::Body;
use crate::math::Vector2Ext;

use super::Contact;

/// Circle/circle: colliding iff `|posB - posA|^2 <= (rA + rB)^2`. The
/// normal points centre-to-centre, A towards B.
pub fn circle_circle(a: &Body, b: &Body) -> Option<Contact> {
    let ra = a.shape().as_circle().expect("a must be a circle").radius;
    let rb = b.shape().as_circle().expect("b must be a circle").radius;

    let diff = b.position - a.position;
    if diff.length_squared() > (ra + rb) * (ra + rb) {
        return None;
    }

    let normal = diff.norm();
    let start = b.position - normal * rb;
    let end = a.position + normal * ra;
    Some(Contact::new(start, end, normal))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlapping_circles_collide() {
        let a = Body::new_circle(0.0, 0.0, 10.0, 1.0, false);
        let b = Body::new_circle(15.0, 0.0, 10.0, 1.0, false);
        let contact = circle_circle(&a, &b).expect("should collide");
        assert!((contact.normal - crate::math::Vector2::new(1.0, 0.0)).length() < 1e-9);
        assert!((contact.depth() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn distant_circles_do_not_collide() {
        let a = Body::new_circle(0.0, 0.0, 10.0, 1.0, false);
        let b = Body::new_circle(100.0, 0.0, 10.0, 1.0, false);
        assert!(circle_circle(&a, &b).is_none());
    }
}
