#![allow(missing_docs)]

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};

use voxmotion::math::{Aab, FreeVector, GridAab};
use voxmotion::physics::{Body, BodyId, collect, resolve, try_step_up};
use voxmotion::world::{BlockState, MemoryWorld};

pub fn step_up_bench(c: &mut Criterion) {
    let mut world = MemoryWorld::new();
    world.fill(
        GridAab::from_lower_upper([-4, -1, -4], [4, 0, 4]),
        &BlockState::solid("stone"),
    );
    world.set_block(
        [1, 0, 0],
        BlockState::with_shape("slab", Aab::new(0.0, 1.0, 0.0, 0.5, 0.0, 1.0)),
    );
    let body = Body::new(BodyId(1), [0.5, 0.0, 0.5], 1.0, 1.8).with_max_step_height(0.6);

    for (name, desired) in [
        ("step_up: onto slab", FreeVector::new(0.5, -0.08, 0.0)),
        ("step_up: diagonal onto slab", FreeVector::new(0.5, -0.08, 0.25)),
    ] {
        let query = body.bounding_box().expand_towards(desired);
        let volumes = collect(&world, Some(&body), query, &[]);
        let resolved = resolve(desired, body.bounding_box(), &volumes);
        c.bench_function(name, |b| {
            b.iter(|| try_step_up(&world, &body, black_box(desired), resolved, &[]));
        });
    }
}

criterion_group!(benches, step_up_bench);
criterion_main!(benches);
