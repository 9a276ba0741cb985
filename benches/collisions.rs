use std::iter::repeat_with;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::Rng;
use rigid2d::prelude::*;

fn init_circle_world(num_bodies: usize) -> World {
    let mut world = World::new();
    let mut rng = rand::thread_rng();
    let pos_limit = 500.0;
    let vel_limit = 50.0;
    for mut body in repeat_with(|| {
        Body::new_circle(
            rng.gen_range(-pos_limit..pos_limit),
            rng.gen_range(-pos_limit..pos_limit),
            10.0,
            rng.gen_range(1.0..3.0),
            false,
        )
    })
    .take(num_bodies)
    {
        body.velocity = Vector2::new(
            rng.gen_range(-vel_limit..vel_limit),
            rng.gen_range(-vel_limit..vel_limit),
        );
        world.add_body(body);
    }
    world
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("step_many_circles");
    for num_bodies in [32, 64, 128, 256, 512] {
        let initial_world = init_circle_world(num_bodies);
        group.bench_with_input(
            BenchmarkId::new("world step", num_bodies),
            &num_bodies,
            |b, _num_bodies| {
                b.iter(|| {
                    let dt = 1.0 / 60.0;
                    let mut world = World {
                        bodies: initial_world.bodies.clone(),
                        ..World::new()
                    };
                    world.step(black_box(dt));
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
