//! Category listing.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{presets::UTF8_FULL, Table};

use quizmaster_core::loader::CategoryRegistry;
use quizmaster_providers::load_config_from;

pub fn execute(data_dir: Option<PathBuf>, config: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config.as_deref())?;
    let data_dir = data_dir.unwrap_or(config.data_dir);
    let registry = CategoryRegistry::new(&data_dir);

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Id", "Title", "Source"]);

    for category in registry.categories() {
        let source = match (&category.file, &category.sample_file) {
            (Some(file), _) => file.clone(),
            (None, Some(sample)) => sample.clone(),
            (None, None) => "built-in".to_string(),
        };
        table.add_row(vec![
            category.id.clone(),
            category.title.clone(),
            source,
        ]);
    }

    for custom in registry.list_custom_files() {
        table.add_row(vec![custom.id, custom.title, custom.filename]);
    }

    println!("{table}");
    Ok(())
}
