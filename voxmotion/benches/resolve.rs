#![allow(missing_docs)]

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};

use voxmotion::math::{Aab, FreeVector, GridAab};
use voxmotion::physics::{Body, BodyId, MotionKind, collect, move_body, resolve};
use voxmotion::shape::CollisionVolume;
use voxmotion::time::Tick;
use voxmotion::world::{BlockState, MemoryWorld};

/// A floor with a wall of stairs running along it.
fn stairs_world() -> MemoryWorld {
    let mut world = MemoryWorld::new();
    world.fill(
        GridAab::from_lower_upper([-8, -1, -8], [8, 0, 8]),
        &BlockState::solid("stone"),
    );
    for x in -8..8 {
        world.set_block(
            [x, 0, 2],
            BlockState::with_shape(
                "stairs",
                vec![
                    Aab::new(0.0, 1.0, 0.0, 0.5, 0.0, 1.0),
                    Aab::new(0.0, 1.0, 0.5, 1.0, 0.5, 1.0),
                ],
            ),
        );
    }
    world
}

pub fn resolve_bench(c: &mut Criterion) {
    let world = stairs_world();
    let body = Body::new(BodyId(1), [0.5, 0.0, 0.5], 0.6, 1.8);
    let desired = FreeVector::new(0.3, -0.08, 1.5);

    c.bench_function("resolve: collect", |b| {
        let query = body.bounding_box().expand_towards(desired);
        b.iter(|| collect(&world, Some(&body), black_box(query), &[]));
    });

    c.bench_function("resolve: clip only", |b| {
        let query = body.bounding_box().expand_towards(desired);
        let volumes: Vec<CollisionVolume> = collect(&world, Some(&body), query, &[]);
        b.iter(|| resolve(black_box(desired), body.bounding_box(), &volumes));
    });

    c.bench_function("resolve: move_body into wall", |b| {
        b.iter_batched_ref(
            || body.clone(),
            |body| {
                move_body(
                    body,
                    &world,
                    &mut (),
                    MotionKind::SelfMotion,
                    black_box(desired),
                    Tick::ZERO,
                )
            },
            criterion::BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, resolve_bench);
criterion_main!(benches);
