// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_scroll_estimate::{ListLayout, RangeCache, SizeEstimator, VisibleItem};

const VISIBLE: usize = 20;

fn window_at(first: usize, size: f64) -> Vec<VisibleItem<f64>> {
    (first..first + VISIBLE)
        .map(|i| VisibleItem::new(i, size, (i - first) as f64 * size))
        .collect()
}

/// Visible windows for a scroll that moves `step` items per frame and reverses
/// direction every `reversal` frames, so the cache keeps several disjoint
/// entries around.
fn frames(len: usize, step: usize, reversal: usize) -> Vec<Vec<VisibleItem<f64>>> {
    let mut out = Vec::new();
    let mut first = 0_usize;
    let mut down = true;
    for frame in 0..2_000 {
        if frame % reversal == 0 {
            down = !down;
            // Jump so that reversals leave holes behind.
            first = (first * 7 + 13) % (len - VISIBLE);
        }
        first = if down {
            (first + step).min(len - VISIBLE)
        } else {
            first.saturating_sub(step)
        };
        let size = 10.0 + (first % 17) as f64;
        out.push(window_at(first, size));
    }
    out
}

fn bench_reconcile(c: &mut Criterion) {
    let mut group = c.benchmark_group("range_cache/reconcile");

    for (step, reversal) in [(1_usize, 400_usize), (5, 50), (VISIBLE * 3, 10)] {
        let frames = frames(100_000, step, reversal);
        group.throughput(Throughput::Elements(frames.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("step_reversal", format!("{step}/{reversal}")),
            &frames,
            |b, frames| {
                b.iter(|| {
                    let mut cache = RangeCache::new();
                    for items in frames {
                        let layout = ListLayout::new(items, 0.0, 200.0, 100_000);
                        let window = layout.visible_window().unwrap();
                        cache.reconcile(&window);
                        let estimate = SizeEstimator::new(&layout, &cache).unwrap().estimate();
                        black_box(estimate);
                    }
                    black_box(cache.len());
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_reconcile);
criterion_main!(benches);
