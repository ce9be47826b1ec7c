use criterion::{black_box, criterion_group, criterion_main, Criterion};

use gradekey_core::compare::compare_answers;
use gradekey_core::inequality::{format_for_display, normalize_answer};

fn bench_compare(c: &mut Criterion) {
    let mut group = c.benchmark_group("compare_answers");

    group.bench_function("exact", |b| {
        b.iter(|| compare_answers(black_box("42"), black_box("42")))
    });

    group.bench_function("whitespace_case", |b| {
        b.iter(|| compare_answers(black_box(" Photo Synthesis "), black_box("photosynthesis")))
    });

    group.bench_function("compound_inequality", |b| {
        b.iter(|| {
            compare_answers(
                black_box("a > 2 또는 a < -3"),
                black_box("a<-3 또는 a>2"),
            )
        })
    });

    group.finish();
}

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");

    group.bench_function("range", |b| {
        b.iter(|| normalize_answer(black_box("-1 ≤ x < 3")))
    });

    group.bench_function("display", |b| {
        b.iter(|| format_for_display(black_box("x>=-1 그리고 x<3")))
    });

    group.finish();
}

criterion_group!(benches, bench_compare, bench_normalize);
criterion_main!(benches);
