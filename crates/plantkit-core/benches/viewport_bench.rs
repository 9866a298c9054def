//! Benchmarks for the viewport transform hot path.
//!
//! Pointer-move and wheel events arrive at display refresh rate, so each
//! dispatch must stay well under a frame budget.
//!
//! Run with:
//! `cargo bench -p plantkit-core --bench viewport_bench`

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use plantkit_core::event::PointerButton;
use plantkit_core::geometry::{Point, Rect, Size};
use plantkit_core::viewer::{DiagramViewport, ViewTransform, ViewerAnchors, ViewerConfig};
use std::hint::black_box;

const MOVES: usize = 1_000;

fn mounted() -> DiagramViewport {
    let mut vp = DiagramViewport::new(
        ViewerConfig::default(),
        Size::new(1200.0, 600.0),
        Rect::new(0.0, 0.0, 800.0, 600.0),
        ViewerAnchors::ALL,
        Vec::new(),
    )
    .expect("default config");
    vp.mount();
    vp.drain_effects();
    vp
}

fn bench_transform_math(c: &mut Criterion) {
    let mut group = c.benchmark_group("viewport/transform");
    let diagram = Size::new(1200.0, 600.0);
    let viewport = Size::new(800.0, 600.0);
    let t = ViewTransform::new(1.4, -310.0, -45.0);

    group.bench_function("zoomed_at+clamped", |b| {
        b.iter(|| {
            black_box(t)
                .zoomed_at(black_box(1.54), Point::new(400.0, 300.0))
                .clamped(diagram, viewport, 90.0)
        });
    });
    group.bench_function("css", |b| b.iter(|| black_box(t).css()));
    group.finish();
}

fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("viewport/dispatch");
    group.throughput(Throughput::Elements(MOVES as u64));

    group.bench_function(BenchmarkId::new("pointer_move", MOVES), |b| {
        let mut vp = mounted();
        b.iter(|| {
            vp.pointer_down(1, PointerButton::Primary, Point::new(400.0, 300.0), false);
            for i in 0..MOVES {
                let d = (i % 200) as f64;
                vp.pointer_move(Point::new(400.0 + d, 300.0 - d));
            }
            vp.pointer_up();
            black_box(vp.drain_effects());
        });
    });

    group.bench_function(BenchmarkId::new("wheel", MOVES), |b| {
        let mut vp = mounted();
        b.iter(|| {
            for i in 0..MOVES {
                let delta = if i % 40 < 20 { -1.0 } else { 1.0 };
                vp.wheel(delta, Point::new(250.0, 180.0));
            }
            black_box(vp.drain_effects());
        });
    });

    group.finish();
}

criterion_group!(benches, bench_transform_math, bench_dispatch);
criterion_main!(benches);
