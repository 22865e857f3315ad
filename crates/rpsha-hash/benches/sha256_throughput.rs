//! Engine throughput across message sizes, streamed and one-shot.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rpsha_hash::{sha256, Sha256};
use std::hint::black_box;

fn bench_one_shot(c: &mut Criterion) {
    let mut group = c.benchmark_group("sha256_one_shot");

    for size in [16usize, 64, 256, 1024, 8192] {
        let data = vec![b'x'; size];
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
            b.iter(|| black_box(sha256(black_box(data))));
        });
    }
    group.finish();
}

fn bench_streaming(c: &mut Criterion) {
    let mut group = c.benchmark_group("sha256_streaming_8k");
    let data = vec![b'x'; 8192];
    group.throughput(Throughput::Bytes(data.len() as u64));

    for chunk in [1usize, 7, 64, 1000] {
        group.bench_with_input(BenchmarkId::new("chunk", chunk), &chunk, |b, &chunk| {
            b.iter(|| {
                let mut hasher = Sha256::new();
                for piece in data.chunks(chunk) {
                    hasher.update(piece);
                }
                black_box(hasher.digest())
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_one_shot, bench_streaming);
criterion_main!(benches);
