//! Interactive quiz loop.

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};

use quizmaster_core::loader::{CategoryRegistry, QuestionBankLoader};
use quizmaster_core::model::Question;
use quizmaster_core::session::{AdvanceOutcome, AnswerOutcome, QuizSession, ReviewStart};
use quizmaster_core::store::{ProgressStore, StatsStore};
use quizmaster_core::traits::KeyValueStore;
use quizmaster_providers::load_config_from;
use quizmaster_storage::JsonFileStore;

pub fn execute(
    category: String,
    data_dir: Option<PathBuf>,
    state: Option<PathBuf>,
    fresh: bool,
    config: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config.as_deref())?;
    let data_dir = data_dir.unwrap_or(config.data_dir);
    let state_path = state.unwrap_or(config.state_file);

    let loader = QuestionBankLoader::new(CategoryRegistry::new(&data_dir));
    let questions = resolve_questions(&loader, &category)?;
    anyhow::ensure!(
        !questions.is_empty(),
        "'{category}' contains no usable questions"
    );

    let store: Arc<dyn KeyValueStore> = Arc::new(JsonFileStore::open(&state_path));
    let progress = ProgressStore::new(store.clone());
    let stats = StatsStore::new(store);

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    run_quiz(
        &category,
        questions,
        &progress,
        &stats,
        fresh,
        &mut stdin.lock(),
        &mut stdout.lock(),
    )
}

/// Map a category id to its question list. Declared categories load through
/// the fallback tier chain; `custom-<stem>` ids load `<stem>.json` from the
/// data directory and fail loudly when the file is missing or malformed.
fn resolve_questions(loader: &QuestionBankLoader, category: &str) -> Result<Vec<Question>> {
    if let Some(stem) = category.strip_prefix("custom-") {
        let filename = format!("{stem}.json");
        loader
            .load_custom(&filename)
            .with_context(|| format!("cannot load custom quiz '{category}'"))
    } else {
        Ok(loader.load(category))
    }
}

/// Drive a full session over the given streams. Split from [`execute`] so
/// tests can run it over in-memory buffers.
fn run_quiz(
    category: &str,
    questions: Vec<Question>,
    progress_store: &ProgressStore,
    stats_store: &StatsStore,
    fresh: bool,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<()> {
    let mut session = start_session(category, questions, progress_store, fresh, input, out)?;

    loop {
        if session.is_terminal() {
            if !offer_review(&mut session, input, out)? {
                break;
            }
            continue;
        }

        let index = session.current_index();
        let question = session
            .current_question()
            .cloned()
            .context("session left the question range")?;
        show_question(&session, &question, out)?;

        if let Some(record) = session.answer_for(index).copied() {
            // Already answered: review mode, or retreated onto it.
            show_verdict(&question, record.chosen_index, record.is_correct, out)?;
            write!(out, "[Enter] next, p previous, q quit: ")?;
            out.flush()?;
            let Some(line) = read_line(input)? else { break };
            match line.trim() {
                "p" => {
                    session.retreat();
                }
                "q" => break,
                _ => apply_advance(&mut session, progress_store, stats_store, out)?,
            }
        } else {
            write!(
                out,
                "Answer (1-{}), p previous, r restart, q quit: ",
                question.options.len()
            )?;
            out.flush()?;
            let Some(line) = read_line(input)? else { break };
            match line.trim() {
                "q" => break,
                "p" => {
                    session.retreat();
                }
                "r" => {
                    session.restart();
                    progress_store.clear();
                    writeln!(out, "Quiz restarted.")?;
                }
                choice => match choice.parse::<usize>() {
                    Ok(n) if (1..=question.options.len()).contains(&n) => {
                        if let AnswerOutcome::Recorded { is_correct } = session.answer(n - 1) {
                            show_verdict(&question, n - 1, is_correct, out)?;
                            writeln!(out, "{}", question.explanation)?;
                        }
                        apply_advance(&mut session, progress_store, stats_store, out)?;
                    }
                    _ => writeln!(
                        out,
                        "Please enter a number between 1 and {}.",
                        question.options.len()
                    )?,
                },
            }
        }
    }
    Ok(())
}

fn start_session(
    category: &str,
    questions: Vec<Question>,
    progress_store: &ProgressStore,
    fresh: bool,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<QuizSession> {
    if fresh {
        progress_store.clear();
        return Ok(QuizSession::new(category, questions));
    }

    let Some(saved) = progress_store.load() else {
        return Ok(QuizSession::new(category, questions));
    };

    writeln!(
        out,
        "Previous progress found (question {}, score {}).",
        saved.current_index + 1,
        saved.score
    )?;
    write!(out, "Continue? [Y/n] ")?;
    out.flush()?;
    let answer = read_line(input)?.unwrap_or_default();
    if answer.trim().eq_ignore_ascii_case("n") {
        progress_store.clear();
        Ok(QuizSession::new(category, questions))
    } else {
        Ok(QuizSession::resume(category, questions, saved))
    }
}

fn show_question(session: &QuizSession, question: &Question, out: &mut impl Write) -> Result<()> {
    writeln!(out)?;
    if let Some((position, len)) = session.review_position() {
        writeln!(out, "Review {}/{}", position + 1, len)?;
    } else {
        writeln!(
            out,
            "Question {}/{}",
            session.current_index() + 1,
            session.total_questions()
        )?;
    }
    writeln!(out, "{}", question.text)?;
    for (i, option) in question.options.iter().enumerate() {
        writeln!(out, "  {}. {}", i + 1, option)?;
    }
    Ok(())
}

fn show_verdict(
    question: &Question,
    chosen_index: usize,
    is_correct: bool,
    out: &mut impl Write,
) -> Result<()> {
    if is_correct {
        writeln!(out, "Your answer: {}. Correct!", chosen_index + 1)?;
    } else {
        writeln!(out, "Your answer: {}. Incorrect.", chosen_index + 1)?;
        if let Some(correct) = question.options.get(question.correct_index) {
            writeln!(
                out,
                "Correct answer: {}. {}",
                question.correct_index + 1,
                correct
            )?;
        }
    }
    Ok(())
}

fn apply_advance(
    session: &mut QuizSession,
    progress_store: &ProgressStore,
    stats_store: &StatsStore,
    out: &mut impl Write,
) -> Result<()> {
    match session.advance() {
        AdvanceOutcome::Moved => {
            if !session.in_review() {
                progress_store.save(&session.progress());
            }
        }
        AdvanceOutcome::Completed(record) => {
            stats_store.record_completion(&record);
            progress_store.clear();
        }
        AdvanceOutcome::ReviewFinished => {
            writeln!(out, "Review finished.")?;
        }
        AdvanceOutcome::Ignored => {}
    }
    Ok(())
}

/// Show the results screen and maybe enter review mode. Returns `true` when
/// the loop should continue (review started), `false` when play is over.
fn offer_review(
    session: &mut QuizSession,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<bool> {
    writeln!(out)?;
    writeln!(
        out,
        "Quiz complete! Score: {}/{} ({}%)",
        session.score(),
        session.total_questions(),
        session.percent_score()
    )?;
    write!(out, "Review incorrect answers? [y/N] ")?;
    out.flush()?;

    let answer = read_line(input)?.unwrap_or_default();
    if !answer.trim().eq_ignore_ascii_case("y") {
        return Ok(false);
    }

    match session.enter_review() {
        ReviewStart::Started => Ok(true),
        ReviewStart::NothingToReview => {
            writeln!(out, "Congratulations! All your answers were correct!")?;
            Ok(false)
        }
        ReviewStart::Ignored => Ok(false),
    }
}

/// Read one line; `None` means the input stream is closed.
fn read_line(input: &mut impl BufRead) -> Result<Option<String>> {
    let mut line = String::new();
    let n = input.read_line(&mut line).context("cannot read input")?;
    if n == 0 {
        Ok(None)
    } else {
        Ok(Some(line))
    }
}
