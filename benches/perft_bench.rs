use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rookery::perft::{perft, perft_parallel};
use rookery::Board;

fn bench_perft(c: &mut Criterion) {
    let b = Board::new();
    c.bench_function("perft_3_startpos", |ben| ben.iter(|| black_box(perft(black_box(&b), 3))));
    c.bench_function("perft_3_startpos_parallel", |ben| ben.iter(|| black_box(perft_parallel(black_box(&b), 3))));
}

criterion_group!(benches, bench_perft);
criterion_main!(benches);
