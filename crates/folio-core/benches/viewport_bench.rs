//! Benchmarks for intersection delivery in the simulated viewport.
//!
//! Run with: cargo bench -p folio-core --bench viewport_bench

use std::cell::Cell;
use std::hint::black_box;
use std::rc::Rc;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use folio_core::{
    ElementId, IntersectionEntry, IntersectionFacility, ObserveOptions, Rect, RootMargin,
    SimulatedViewport,
};

fn build(count: u64) -> (SimulatedViewport, Rc<Cell<usize>>) {
    let vp = SimulatedViewport::new(1280.0, 800.0);
    let hits = Rc::new(Cell::new(0));
    for i in 0..count {
        let el = ElementId::new(i);
        vp.place(el, Rect::new(0.0, i as f64 * 120.0, 1280.0, 100.0));
        let h = Rc::clone(&hits);
        vp.observe(
            el,
            ObserveOptions::new([0.0, 0.1, 0.5, 1.0], RootMargin::default()),
            Box::new(move |_: &IntersectionEntry| h.set(h.get() + 1)),
        );
    }
    vp.flush();
    (vp, hits)
}

fn bench_scroll_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("viewport/scroll_sweep");
    for count in [16u64, 128, 1024] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            let (vp, hits) = build(count);
            let mut y = 0.0;
            b.iter(|| {
                y = (y + 37.0) % (count as f64 * 120.0);
                black_box(vp.scroll_to(y));
            });
            black_box(hits.get());
        });
    }
    group.finish();
}

fn bench_ratio(c: &mut Criterion) {
    let root = RootMargin::default().apply(Rect::new(0.0, 0.0, 1280.0, 800.0));
    let target = Rect::new(10.0, 700.0, 400.0, 300.0);
    c.bench_function("geometry/intersection_ratio", |b| {
        b.iter(|| folio_core::intersection_ratio(black_box(&target), black_box(&root)));
    });
}

criterion_group!(benches, bench_scroll_sweep, bench_ratio);
criterion_main!(benches);
