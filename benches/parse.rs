use acceptkit::parser::{parse, parse_tags};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

const HEADERS: &[(&str, &str)] = &[
    ("single", "en-US"),
    ("browser", "en-GB,en-US;q=0.9,en;q=0.8,da;q=0.7"),
    ("unsorted", "sk;q=0.1,da;q=0.5,de-CH-1996;q=0.9,fr,it;q=0.5,nl;q=0.3"),
    ("malformed", "x;q=bad,,;q=0.5,-_-;q=1e-3,*"),
];

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    for (name, header) in HEADERS {
        group.bench_with_input(BenchmarkId::from_parameter(name), header, |b, header| {
            b.iter(|| parse(std::hint::black_box(Some(*header))))
        });
    }
    group.finish();
}

fn bench_parse_tags_long_header(c: &mut Criterion) {
    let header: String = (0..64)
        .map(|i| format!("l{i}-R{i};q=0.{}", i % 10))
        .collect::<Vec<_>>()
        .join(",");
    c.bench_function("parse_tags_64_entries", |b| {
        b.iter(|| parse_tags(std::hint::black_box(&header)))
    });
}

criterion_group!(benches, bench_parse, bench_parse_tags_long_header);
criterion_main!(benches);
