//! Question-bank validation.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use quizmaster_core::loader::normalize_records;
use quizmaster_core::model::RawQuestionRecord;

pub fn execute(bank: PathBuf) -> Result<()> {
    let files = collect_files(&bank)?;
    anyhow::ensure!(!files.is_empty(), "no .json files found in {}", bank.display());

    let mut failed = 0usize;
    for file in &files {
        if let Err(e) = validate_file(file) {
            println!("{}: {e:#}", file.display());
            failed += 1;
        }
    }

    if failed > 0 {
        anyhow::bail!("{failed} of {} file(s) failed validation", files.len());
    }
    println!("All question banks valid.");
    Ok(())
}

fn collect_files(bank: &Path) -> Result<Vec<PathBuf>> {
    if bank.is_file() {
        return Ok(vec![bank.to_path_buf()]);
    }

    let entries = std::fs::read_dir(bank)
        .with_context(|| format!("cannot read {}", bank.display()))?;
    let mut files: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();
    Ok(files)
}

fn validate_file(path: &Path) -> Result<()> {
    let content = std::fs::read_to_string(path).context("cannot read file")?;
    let records: Vec<RawQuestionRecord> =
        serde_json::from_str(&content).context("invalid JSON")?;

    let questions = normalize_records(&records);
    let dropped = records.len() - questions.len();
    let out_of_bounds = questions
        .iter()
        .filter(|q| q.correct_index >= q.options.len())
        .count();

    println!(
        "{}: {} question(s), {} record(s) dropped",
        path.display(),
        questions.len(),
        dropped
    );
    if out_of_bounds > 0 {
        println!(
            "  warning: {out_of_bounds} question(s) have an answer outside their option list"
        );
    }
    anyhow::ensure!(!questions.is_empty(), "no usable questions");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    const VALID_BANK: &str = r#"[
        {"question": "Q1?", "A": "a", "B": "b", "C": "c", "D": "d", "answer": "A"},
        {"question": "Q2?", "options": ["x", "y"], "correctAnswer": 1}
    ]"#;

    #[test]
    fn valid_file_passes() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "bank.json", VALID_BANK);
        assert!(execute(path).is_ok());
    }

    #[test]
    fn malformed_json_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "bank.json", "{nope");
        assert!(execute(path).is_err());
    }

    #[test]
    fn file_with_only_unusable_records_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "bank.json", r#"[{"question": "orphan"}]"#);
        assert!(execute(path).is_err());
    }

    #[test]
    fn directory_validates_every_json_file() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "good.json", VALID_BANK);
        write(dir.path(), "bad.json", "broken");
        write(dir.path(), "ignored.txt", "not json");

        let err = execute(dir.path().to_path_buf()).unwrap_err();
        assert!(err.to_string().contains("1 of 2"));
    }

    #[test]
    fn empty_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(execute(dir.path().to_path_buf()).is_err());
    }
}
