//! Benchmarks for Range header parsing and resolution.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lexicon_playback::RangeRequest;

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("range_parse");

    for (name, header) in [
        ("open_ended", "bytes=500000-"),
        ("closed", "bytes=0-1048575"),
        ("padded", "  Bytes = 1024 - 2047 "),
        ("malformed", "bytes=abc-"),
    ] {
        group.bench_function(name, |b| {
            b.iter(|| black_box(RangeRequest::parse(black_box(header)).ok()))
        });
    }

    group.finish();
}

fn bench_resolve(c: &mut Criterion) {
    let request = RangeRequest::parse("bytes=999999-1000010").unwrap();

    c.bench_function("range_resolve_clamped", |b| {
        b.iter(|| black_box(request.resolve(black_box(1_000_000)).ok()))
    });
}

criterion_group!(benches, bench_parse, bench_resolve);
criterion_main!(benches);
