use criterion::{black_box, criterion_group, criterion_main, Criterion};

use quizmaster_core::loader::normalize_records;
use quizmaster_core::model::RawQuestionRecord;

fn generate_records(n: usize) -> Vec<RawQuestionRecord> {
    let json: String = (0..n)
        .map(|i| {
            if i % 2 == 0 {
                format!(
                    r#"{{"question":"Question {i}","A":"first","B":"second","C":"third","D":"fourth","answer":"B","explanation":"Because {i}."}}"#
                )
            } else {
                format!(
                    r#"{{"question":"Question {i}","options":["A. first","B. second","C. third","D. fourth"],"answer":"C"}}"#
                )
            }
        })
        .collect::<Vec<_>>()
        .join(",");
    serde_json::from_str(&format!("[{json}]")).unwrap()
}

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize_records");

    let small = generate_records(10);
    let medium = generate_records(100);
    let large = generate_records(450); // the full primary bank size

    group.bench_function("10_records", |b| {
        b.iter(|| normalize_records(black_box(&small)))
    });
    group.bench_function("100_records", |b| {
        b.iter(|| normalize_records(black_box(&medium)))
    });
    group.bench_function("450_records", |b| {
        b.iter(|| normalize_records(black_box(&large)))
    });

    group.finish();
}

criterion_group!(benches, bench_normalize);
criterion_main!(benches);
