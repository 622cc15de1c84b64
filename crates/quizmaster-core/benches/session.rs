use criterion::{black_box, criterion_group, criterion_main, Criterion};

use quizmaster_core::model::Question;
use quizmaster_core::session::QuizSession;

fn questions(n: usize) -> Vec<Question> {
    (0..n)
        .map(|i| Question {
            text: format!("Question {i}"),
            options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
            correct_index: i % 4,
            explanation: "Because.".into(),
        })
        .collect()
}

fn bench_full_playthrough(c: &mut Criterion) {
    let mut group = c.benchmark_group("session_playthrough");

    for n in [10usize, 100, 450] {
        let bank = questions(n);
        group.bench_function(format!("{n}_questions"), |b| {
            b.iter(|| {
                let mut session = QuizSession::new("bench", black_box(bank.clone()));
                for i in 0..n {
                    session.answer(i % 3); // mix of right and wrong answers
                    session.advance();
                }
                session.enter_review();
                while !session.is_terminal() {
                    session.advance();
                }
                black_box(session.score())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_full_playthrough);
criterion_main!(benches);
