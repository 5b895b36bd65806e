use std::sync::atomic::AtomicU64;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rookery::Board;

fn bench_search(c: &mut Criterion) {
    let b = Board::new();
    c.bench_function("search_depth_2_startpos_single", |ben| {
        ben.iter(|| {
            let counter = AtomicU64::new(0);
            black_box(black_box(&b).get_max(2, &(), false, &counter))
        })
    });
    c.bench_function("search_depth_2_startpos_threaded", |ben| {
        ben.iter(|| {
            let counter = AtomicU64::new(0);
            black_box(black_box(&b).get_max(2, &(), true, &counter))
        })
    });
}

criterion_group!(benches, bench_search);
criterion_main!(benches);
