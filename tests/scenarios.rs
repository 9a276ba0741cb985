use rigid2d::prelude::*;

#[test]
fn stacked_box_settles_on_a_static_floor_without_sinking() {
    let mut world = World::new();
    let falling = world.add_body(Body::new_box(100.0, 0.0, 50.0, 50.0, 1.0, true));
    world.add_body(Body::new_box(100.0, 300.0, 500.0, 40.0, 0.0, false));

    for _ in 0..180 {
        world.step(1.0 / 60.0);
    }

    let y = world.bodies[falling].position.y;
    assert!((274.0..=276.0).contains(&y), "box settled at y={y}, expected near 275.0");
    assert!(world.bodies[falling].velocity.y.abs() < 1.0);
}

#[test]
fn two_circles_head_on_with_full_elasticity_swap_velocities() {
    let mut a = Body::new_circle(0.0, 0.0, 10.0, 1.0, false);
    a.velocity = Vector2::new(10.0, 0.0);
    a.elasticity = 1.0;
    a.friction = 0.0;
    let mut b = Body::new_circle(25.0, 0.0, 10.0, 1.0, false);
    b.velocity = Vector2::new(-10.0, 0.0);
    b.elasticity = 1.0;
    b.friction = 0.0;

    let contact = detect_resolver(&a, &b).expect("overlapping circles should collide");
    resolve_impulse(&mut a, &mut b, &contact);

    assert!((a.velocity.x + 10.0).abs() < 1e-6);
    assert!((b.velocity.x - 10.0).abs() < 1e-6);
}

#[test]
fn static_bodies_never_move_when_resolved_against_each_other() {
    let mut a = Body::new_circle(0.0, 0.0, 10.0, 0.0, false);
    let mut b = Body::new_circle(15.0, 0.0, 10.0, 0.0, false);
    let contact = detect_resolver(&a, &b).expect("overlapping circles should collide");

    let a_position_before = a.position;
    let b_position_before = b.position;
    resolve_impulse(&mut a, &mut b, &contact);

    assert_eq!(a.position, a_position_before);
    assert_eq!(b.position, b_position_before);
    assert_eq!(a.velocity, Vector2::ZERO);
    assert_eq!(b.velocity, Vector2::ZERO);
}

#[test]
fn separated_boxes_report_no_collision() {
    let mut a = Body::new_box(0.0, 0.0, 10.0, 10.0, 1.0, false);
    let mut b = Body::new_box(50.0, 0.0, 10.0, 10.0, 1.0, false);
    a.refresh_vertices();
    b.refresh_vertices();

    assert!(detect_resolver(&a, &b).is_none());
    assert!(!detect_solver(&a, &b).is_colliding());
}

#[test]
fn two_flush_boxes_clip_to_a_two_point_manifold() {
    let mut floor = Body::new_box(0.0, 0.0, 100.0, 20.0, 0.0, false);
    let mut crate_box = Body::new_box(0.0, -15.0, 100.0, 20.0, 1.0, false);
    floor.refresh_vertices();
    crate_box.refresh_vertices();

    let manifold = detect_solver(&floor, &crate_box);
    assert!(manifold.is_colliding());
    assert_eq!(manifold.contacts().len(), 2, "flush overlap should clip to two contacts");
}

#[test]
fn a_distance_joint_keeps_a_bob_tethered_near_its_rest_distance() {
    let mut world = World::new();
    let anchor = world.add_body(Body::new_circle(200.0, 100.0, 10.0, 0.0, false));
    let bob = world.add_body(Body::new_box(80.0, 100.0, 120.0, 30.0, 5.0, false));
    world.bodies[bob].unstoppable = true;

    let joint = JointConstraint::new(&world.bodies[anchor], &world.bodies[bob]);
    let initial_distance = (world.bodies[bob].position - world.bodies[anchor].position).length();
    world.add_joint(joint, anchor, bob);

    for _ in 0..60 {
        world.step(1.0 / 60.0);
    }

    let distance = (world.bodies[bob].position - world.bodies[anchor].position).length();
    assert!(
        (distance - initial_distance).abs() < 2.0,
        "tether drifted from {initial_distance} to {distance}"
    );
}
