// KMP against a naive window scan, on a text where the naive scan backtracks a lot.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use kmp_trace::{build_prefix_table, find_all, search};

fn naive_find_all(text: &[u8], pattern: &[u8]) -> Vec<usize> {
    text.windows(pattern.len())
        .enumerate()
        .filter(|(_, window)| *window == pattern)
        .map(|(i, _)| i)
        .collect()
}

fn compare_search(c: &mut Criterion) {
    let pattern = [b'a'; 32].iter().copied().chain([b'b']).collect::<Vec<u8>>();

    let mut group = c.benchmark_group("search");
    for size in [1_024usize, 16_384, 262_144] {
        let text = vec![b'a'; size];
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(BenchmarkId::new("kmp", size), &text, |b, text| {
            b.iter(|| find_all(black_box(text.as_slice()), black_box(pattern.as_slice())))
        });
        group.bench_with_input(BenchmarkId::new("naive", size), &text, |b, text| {
            b.iter(|| naive_find_all(black_box(text.as_slice()), black_box(pattern.as_slice())))
        });
    }
    group.finish();
}

fn traced_search(c: &mut Criterion) {
    let text = b"ABABDABACDABABCABAB".repeat(1_000);
    let pattern = b"ABABCABAB";
    let table = build_prefix_table(pattern);

    c.bench_function("search_with_trace", |b| {
        b.iter(|| search(black_box(text.as_slice()), black_box(&pattern[..]), &table))
    });
}

criterion_group!(benches, compare_search, traced_search);
criterion_main!(benches);
