use criterion::{black_box, criterion_group, criterion_main, Criterion};

use gradekey_core::batch::BatchKeyParser;
use gradekey_core::distractor::{generate_distractors_with, make_shuffled_options_with, seeded_rng};

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_distractors");

    for answer in ["7", "3.25", "-1/2", "ㄱ, ㄷ", "①, ③", "a<-3 또는 a>2", "광합성"] {
        group.bench_function(answer, |b| {
            let mut rng = seeded_rng(7);
            b.iter(|| generate_distractors_with(black_box(answer), &mut rng))
        });
    }

    group.finish();
}

fn bench_shuffle(c: &mut Criterion) {
    let distractors: Vec<String> = ["8", "6", "9", "5"].iter().map(|s| s.to_string()).collect();

    c.bench_function("make_shuffled_options", |b| {
        let mut rng = seeded_rng(7);
        b.iter(|| make_shuffled_options_with(black_box("7"), black_box(&distractors), &mut rng))
    });
}

fn bench_batch(c: &mut Criterion) {
    let batch = "a 3\nb 55\nb x>=2\n1 2 3 4 5\nb ㄱ, ㄴ\n".repeat(10);
    let parser = BatchKeyParser::default();

    c.bench_function("batch_50_questions", |b| {
        let mut rng = seeded_rng(7);
        b.iter(|| parser.parse_with(black_box(&batch), 0, &mut rng))
    });
}

criterion_group!(benches, bench_generate, bench_shuffle, bench_batch);
criterion_main!(benches);
