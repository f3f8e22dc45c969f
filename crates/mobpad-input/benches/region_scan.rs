//! Region scan benchmarks
//!
//! The scan runs once per render over every pixel, so it is measured on a
//! phone-sized surface. Pointer handling runs per touch event.

use std::hint::black_box;
use std::sync::Arc;

use criterion::{Criterion, criterion_group, criterion_main};
use mobpad_input::prelude::*;
use mobpad_test_helpers::prelude::*;

fn phone_surface() -> RgbaSurface {
    let mut builder = SurfaceBuilder::new(1080, 720);
    for (index, (colour, _)) in (0u32..).zip(standard::BUTTONS) {
        builder = builder.rect((600 + (index % 4) * 100, 100 + (index / 4) * 100, 60, 60), colour);
    }
    for (index, colour) in (0u32..).zip(standard::DPAD) {
        builder = builder.rect((100 + index * 60, 400, 60, 60), colour);
    }
    builder
        .rect((50, 20, 80, 200), standard::TRIGGERS[0].0)
        .rect((950, 20, 80, 200), standard::TRIGGERS[1].0)
        .rect((300, 500, 160, 160), standard::STICKS[0].0)
        .rect((650, 500, 160, 160), standard::STICKS[1].0)
        .build()
}

fn bench_single_region(c: &mut Criterion) {
    let surface = phone_surface();
    let key = CompositeKey::new(standard::DPAD);

    c.bench_function("derive_bounding_box_dpad", |b| {
        b.iter(|| RegionLocator::derive_bounding_box(black_box(&surface), black_box(&key)))
    });
}

fn bench_locate_all(c: &mut Criterion) {
    let surface = phone_surface();
    let registry = ColourRegistry::standard();

    c.bench_function("locate_all", |b| {
        b.iter(|| RegionLocator::locate_all(black_box(&surface), black_box(&registry)))
    });
}

fn bench_pointer_drag(c: &mut Criterion) {
    let mut pad = PadState::new(Arc::new(ColourRegistry::standard()), phone_surface());
    pad.on_pointer_down(PointerId(1), Point::new(380.0, 580.0));
    let mut step = 0.0f64;

    c.bench_function("stick_drag_and_flush", |b| {
        b.iter(|| {
            step = (step + 1.0) % 40.0;
            pad.on_pointer_move(PointerId(1), Point::new(360.0 + step, 580.0));
            black_box(pad.flush_state())
        })
    });
}

criterion_group!(benches, bench_single_region, bench_locate_all, bench_pointer_drag);
criterion_main!(benches);
