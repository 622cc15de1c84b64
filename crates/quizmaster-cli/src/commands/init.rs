//! Starter config and sample data.

use std::path::Path;

use anyhow::{Context, Result};

const CONFIG_FILE: &str = "quizmaster.toml";
const SAMPLE_FILE: &str = "data/sample-biology.json";

const STARTER_CONFIG: &str = r#"# quizmaster configuration

default_provider = "gemini"
default_model = "gemini-1.5-flash"
data_dir = "./data"
state_file = "./quizmaster-state.json"

[providers.gemini]
type = "gemini"
api_key = "${GEMINI_API_KEY}"

# [providers.openai]
# type = "openai"
# api_key = "${OPENAI_API_KEY}"
"#;

const SAMPLE_QUESTIONS: &str = r#"[
  {
    "question": "Which of the following is the powerhouse of the cell?",
    "A": "Nucleus",
    "B": "Mitochondria",
    "C": "Golgi Apparatus",
    "D": "Endoplasmic Reticulum",
    "answer": "B",
    "explanation": "Mitochondria are often referred to as the powerhouse of the cell."
  },
  {
    "question": "What is the process by which plants make their own food using sunlight?",
    "A": "Respiration",
    "B": "Photosynthesis",
    "C": "Transpiration",
    "D": "Germination",
    "answer": "B",
    "explanation": "Photosynthesis is the process used by plants to create food."
  }
]
"#;

pub fn execute() -> Result<()> {
    write_if_absent(Path::new(CONFIG_FILE), STARTER_CONFIG)?;
    write_if_absent(Path::new(SAMPLE_FILE), SAMPLE_QUESTIONS)?;
    println!("Next steps:");
    println!("  1. Set GEMINI_API_KEY (or edit {CONFIG_FILE}) to enable chat");
    println!("  2. quizmaster play --category biology");
    Ok(())
}

fn write_if_absent(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping", path.display());
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("cannot create {}", parent.display()))?;
        }
    }
    std::fs::write(path, content).with_context(|| format!("cannot write {}", path.display()))?;
    println!("Created {}", path.display());
    Ok(())
}
