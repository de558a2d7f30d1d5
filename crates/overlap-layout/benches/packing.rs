//! Criterion benchmarks for the packing sweep and the full layout pass.
//!
//! Run with:
//! ```bash
//! cargo bench --package overlap-layout --bench packing
//! ```

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use overlap_layout::{compute_layout, pack, DisplayWindow, Event, LayoutOptions, Rect};

const MINUTE: i64 = 60 * 1000;
const DAY: i64 = 24 * 60 * MINUTE;

/// `n` events staggered every 7 minutes, each 45 minutes long, so roughly six
/// overlap at any moment.
fn staggered_events(n: usize) -> Vec<Event> {
    (0..n as i64)
        .map(|i| {
            let start = (i * 7 * MINUTE) % (DAY - 45 * MINUTE);
            Event::new(start, start + 45 * MINUTE, format!("event-{i}"))
                .expect("staggered events are well-formed")
        })
        .collect()
}

fn bench_pack(c: &mut Criterion) {
    let window = DisplayWindow::new(0, DAY - 1).expect("valid window");
    let mut group = c.benchmark_group("pack");

    for n in [10usize, 100, 1000] {
        let events = staggered_events(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &events, |b, events| {
            b.iter(|| pack(black_box(events), black_box(&window)))
        });
    }
    group.finish();
}

fn bench_compute_layout(c: &mut Criterion) {
    let window = DisplayWindow::new(0, DAY - 1).expect("valid window");
    let container = Rect::from_size(1080.0, 1920.0);
    let options = LayoutOptions {
        padding: 8.0,
        ..LayoutOptions::default()
    };
    let mut group = c.benchmark_group("compute_layout");

    for n in [10usize, 100, 1000] {
        let events = staggered_events(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &events, |b, events| {
            b.iter(|| compute_layout(black_box(events), &window, &container, &options))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_pack, bench_compute_layout);
criterion_main!(benches);
