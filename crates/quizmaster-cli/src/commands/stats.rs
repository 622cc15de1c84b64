//! Statistics display and reset.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use comfy_table::{presets::UTF8_FULL, Table};

use quizmaster_core::store::StatsStore;
use quizmaster_core::traits::KeyValueStore;
use quizmaster_providers::load_config_from;
use quizmaster_storage::JsonFileStore;

pub fn execute(state: Option<PathBuf>, reset: bool, config: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config.as_deref())?;
    let state_path = state.unwrap_or(config.state_file);

    let store: Arc<dyn KeyValueStore> = Arc::new(JsonFileStore::open(&state_path));
    let stats = StatsStore::new(store);

    if reset {
        stats.reset();
        println!("Statistics reset.");
        return Ok(());
    }

    let summary = stats.summary();
    println!("Quizzes taken: {}", summary.total_quizzes);
    if summary.total_quizzes == 0 {
        println!("No quiz history yet. Play a quiz to get started.");
        return Ok(());
    }
    println!("Average score: {}%", summary.average_score);
    println!("Best score:    {}%", summary.best_score);

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Date", "Category", "Score", "Correct"]);
    for record in &summary.recent {
        table.add_row(vec![
            record.date.format("%Y-%m-%d").to_string(),
            record.category.clone(),
            format!("{}%", record.score),
            format!("{}/{}", record.correct_answers, record.total_questions),
        ]);
    }
    println!("{table}");
    Ok(())
}
