//! Question-bank loading and normalization.
//!
//! Loads heterogeneous question records from JSON files and normalizes them
//! into the canonical [`Question`] shape. Declared-category loads are
//! infallible: missing files, malformed JSON, and empty results fall through
//! a fixed tier chain (primary file, sample file, built-in questions) so the
//! caller always receives a non-empty list.

use std::path::{Path, PathBuf};

use crate::error::LoadError;
use crate::model::{Question, RawQuestionRecord, RecordShape};

/// A declared question category.
#[derive(Debug, Clone)]
pub struct Category {
    /// Stable identifier used in URLs and storage keys (e.g. "biology").
    pub id: String,
    /// Display title.
    pub title: String,
    /// Primary question-bank file inside the data directory.
    pub file: Option<String>,
    /// Smaller sample file used when the primary is absent or unusable.
    pub sample_file: Option<String>,
}

/// A category discovered from a custom question file in the data directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomCategory {
    /// Identifier of the form `custom-<file stem>`.
    pub id: String,
    /// Display title derived from the file name.
    pub title: String,
    /// File name inside the data directory.
    pub filename: String,
}

/// Explicit registry of categories and the data directory backing them.
///
/// Passed into the loader at construction so independent sessions and tests
/// never share process-global category tables.
#[derive(Debug, Clone)]
pub struct CategoryRegistry {
    data_dir: PathBuf,
    categories: Vec<Category>,
}

impl CategoryRegistry {
    /// Create a registry with the stock category set.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self::with_categories(data_dir, default_categories())
    }

    /// Create a registry with an explicit category list.
    pub fn with_categories(data_dir: impl Into<PathBuf>, categories: Vec<Category>) -> Self {
        Self {
            data_dir: data_dir.into(),
            categories,
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Look up a declared category by id.
    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Scan the data directory for custom question files: `.json` files not
    /// claimed by any declared category. A missing or unreadable directory
    /// yields an empty list, never an error.
    pub fn list_custom_files(&self) -> Vec<CustomCategory> {
        let entries = match std::fs::read_dir(&self.data_dir) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("cannot scan data directory {}: {e}", self.data_dir.display());
                return Vec::new();
            }
        };

        let declared: Vec<&str> = self
            .categories
            .iter()
            .flat_map(|c| [c.file.as_deref(), c.sample_file.as_deref()])
            .flatten()
            .collect();

        let mut custom = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().is_none_or(|ext| ext != "json") {
                continue;
            }
            let Some(filename) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if declared.contains(&filename) {
                continue;
            }
            let stem = filename.strip_suffix(".json").unwrap_or(filename);
            custom.push(CustomCategory {
                id: format!("custom-{stem}"),
                title: stem.replace(['-', '_'], " "),
                filename: filename.to_string(),
            });
        }
        custom.sort_by(|a, b| a.filename.cmp(&b.filename));
        custom
    }
}

fn default_categories() -> Vec<Category> {
    vec![
        Category {
            id: "general".into(),
            title: "General Knowledge".into(),
            file: None,
            sample_file: None,
        },
        Category {
            id: "science".into(),
            title: "Science & Technology".into(),
            file: None,
            sample_file: None,
        },
        Category {
            id: "history".into(),
            title: "History".into(),
            file: None,
            sample_file: None,
        },
        Category {
            id: "sports".into(),
            title: "Sports".into(),
            file: None,
            sample_file: None,
        },
        Category {
            id: "biology".into(),
            title: "Biology".into(),
            file: Some("450singlebest.json".into()),
            sample_file: Some("sample-biology.json".into()),
        },
    ]
}

/// Loads question banks for a [`CategoryRegistry`].
#[derive(Debug, Clone)]
pub struct QuestionBankLoader {
    registry: CategoryRegistry,
}

impl QuestionBankLoader {
    pub fn new(registry: CategoryRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &CategoryRegistry {
        &self.registry
    }

    /// Load the question bank for a declared category.
    ///
    /// Resolution tiers, first non-empty result wins:
    /// 1. the category's primary file,
    /// 2. its sample file,
    /// 3. built-in questions.
    ///
    /// Never fails and never returns an empty list.
    pub fn load(&self, category_id: &str) -> Vec<Question> {
        let category = self.registry.category(category_id);

        let declared_files = category
            .map(|c| [c.file.as_deref(), c.sample_file.as_deref()])
            .unwrap_or([None, None]);

        for filename in declared_files.into_iter().flatten() {
            let path = self.registry.data_dir().join(filename);
            match self.load_file(&path) {
                Ok(questions) if !questions.is_empty() => {
                    tracing::info!(
                        "loaded {} questions for '{category_id}' from {filename}",
                        questions.len()
                    );
                    return questions;
                }
                Ok(_) => {
                    tracing::info!("no usable questions in {filename}, trying next tier");
                }
                Err(e) => {
                    tracing::info!("cannot use {filename} ({e}), trying next tier");
                }
            }
        }

        tracing::info!("falling back to built-in questions for '{category_id}'");
        fallback_questions(category_id)
    }

    /// Load a custom question file by name.
    ///
    /// Unlike declared categories there is no fallback here: an absent file
    /// is reported as [`LoadError::NotFound`] so the boundary layer can
    /// redirect, and an unreadable one as [`LoadError::Malformed`].
    pub fn load_custom(&self, filename: &str) -> Result<Vec<Question>, LoadError> {
        let path = self.registry.data_dir().join(filename);
        if !path.is_file() {
            return Err(LoadError::NotFound(filename.to_string()));
        }
        self.load_file(&path).map_err(|reason| LoadError::Malformed {
            file: filename.to_string(),
            reason,
        })
    }

    fn load_file(&self, path: &Path) -> Result<Vec<Question>, String> {
        let content = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
        let records: Vec<RawQuestionRecord> =
            serde_json::from_str(&content).map_err(|e| e.to_string())?;
        Ok(normalize_records(&records))
    }
}

/// Normalize a batch of raw records, dropping anything unrecognizable.
/// Source order is preserved; no shuffling, truncation, or deduplication.
pub fn normalize_records(records: &[RawQuestionRecord]) -> Vec<Question> {
    records
        .iter()
        .filter_map(|record| {
            let question = normalize_record(record);
            if question.is_none() {
                tracing::debug!("dropping unrecognizable record: {:?}", record.question);
            }
            question
        })
        .collect()
}

/// Normalize one raw record into a canonical [`Question`].
///
/// Returns `None` when the record supplies fewer than 2 resolvable options
/// or no resolvable correct index.
pub fn normalize_record(record: &RawQuestionRecord) -> Option<Question> {
    match RecordShape::of(record) {
        RecordShape::Options => {
            let raw_options = record.options.as_ref()?;
            // Numeric index wins over the answer letter when both are given.
            let correct_index = match record.correct_answer {
                Some(index) => usize::try_from(index).ok()?,
                None => letter_offset(record.answer.as_deref()?)?,
            };
            let options = raw_options
                .iter()
                .map(|opt| strip_option_prefix(opt).to_string())
                .collect();
            Some(Question {
                text: record.question.clone(),
                options,
                correct_index,
                explanation: default_explanation(record),
            })
        }
        RecordShape::Lettered => {
            let correct_index = letter_offset(record.answer.as_deref()?)?;
            let options = vec![
                record.option_a.clone()?,
                record.option_b.clone()?,
                record.option_c.clone()?,
                record.option_d.clone()?,
            ];
            Some(Question {
                text: record.question.clone(),
                options,
                correct_index,
                explanation: default_explanation(record),
            })
        }
        RecordShape::Unrecognized => None,
    }
}

/// Offset of an answer letter from 'A'. An answer like "E" resolves to 4
/// even when only four options exist; the out-of-bounds index is kept as-is
/// to match the source data's permissive handling. Anything that does not
/// start with an ASCII uppercase letter is unresolvable.
fn letter_offset(answer: &str) -> Option<usize> {
    let first = answer.bytes().next()?;
    if first.is_ascii_uppercase() {
        Some((first - b'A') as usize)
    } else {
        None
    }
}

/// Strip a leading letter prefix of the form "A. " (letters A–E) from an
/// option string. Options without the prefix are kept verbatim.
fn strip_option_prefix(option: &str) -> &str {
    let bytes = option.as_bytes();
    if bytes.len() >= 2 && (b'A'..=b'E').contains(&bytes[0]) && bytes[1] == b'.' {
        option[2..].trim_start()
    } else {
        option
    }
}

fn default_explanation(record: &RawQuestionRecord) -> String {
    if let Some(explanation) = &record.explanation {
        return explanation.clone();
    }
    match &record.answer {
        Some(letter) => format!("The correct answer is {letter}."),
        None => "No explanation provided.".to_string(),
    }
}

/// Deterministic built-in questions, the final fallback tier.
pub fn fallback_questions(category_id: &str) -> Vec<Question> {
    if category_id == "biology" {
        return vec![
            Question {
                text: "Which of the following is the powerhouse of the cell?".into(),
                options: vec![
                    "Nucleus".into(),
                    "Mitochondria".into(),
                    "Golgi Apparatus".into(),
                    "Endoplasmic Reticulum".into(),
                ],
                correct_index: 1,
                explanation: "Mitochondria are often referred to as the powerhouse of the cell."
                    .into(),
            },
            Question {
                text: "What is the process by which plants make their own food using sunlight?"
                    .into(),
                options: vec![
                    "Respiration".into(),
                    "Photosynthesis".into(),
                    "Transpiration".into(),
                    "Germination".into(),
                ],
                correct_index: 1,
                explanation: "Photosynthesis is the process used by plants to create food.".into(),
            },
        ];
    }

    vec![
        Question {
            text: "What is the capital of France?".into(),
            options: vec![
                "Paris".into(),
                "London".into(),
                "Berlin".into(),
                "Madrid".into(),
            ],
            correct_index: 0,
            explanation: "Paris is the capital and most populous city of France.".into(),
        },
        Question {
            text: "Which planet is known as the Red Planet?".into(),
            options: vec![
                "Earth".into(),
                "Mars".into(),
                "Jupiter".into(),
                "Saturn".into(),
            ],
            correct_index: 1,
            explanation: "Mars is often called the \"Red Planet\" because of its reddish appearance."
                .into(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RawQuestionRecord;

    fn options_record(options: &[&str], answer: Option<&str>, index: Option<i64>) -> RawQuestionRecord {
        RawQuestionRecord {
            question: "Q".into(),
            options: Some(options.iter().map(|s| s.to_string()).collect()),
            answer: answer.map(Into::into),
            correct_answer: index,
            ..Default::default()
        }
    }

    #[test]
    fn numeric_correct_answer_preserved_verbatim() {
        for index in [0, 1, 3, 7] {
            let record = options_record(&["a", "b", "c", "d"], None, Some(index));
            let question = normalize_record(&record).unwrap();
            assert_eq!(question.correct_index, index as usize);
        }
    }

    #[test]
    fn negative_numeric_answer_drops_record() {
        let record = options_record(&["a", "b"], None, Some(-1));
        assert!(normalize_record(&record).is_none());
    }

    #[test]
    fn letter_prefix_stripped_and_letter_resolved() {
        let record = options_record(&["A. x", "B. y"], Some("B"), None);
        let question = normalize_record(&record).unwrap();
        assert_eq!(question.options, vec!["x", "y"]);
        assert_eq!(question.correct_index, 1);
    }

    #[test]
    fn unprefixed_options_kept_verbatim() {
        let record = options_record(&["Apples", "B minor", "4. numbered"], Some("A"), None);
        let question = normalize_record(&record).unwrap();
        // "B minor" lacks the dot, "4. numbered" lacks the letter.
        assert_eq!(question.options, vec!["Apples", "B minor", "4. numbered"]);
    }

    #[test]
    fn lettered_form_maps_answer_position() {
        let record = RawQuestionRecord {
            question: "Q".into(),
            option_a: Some("first".into()),
            option_b: Some("second".into()),
            option_c: Some("third".into()),
            option_d: Some("fourth".into()),
            answer: Some("C".into()),
            ..Default::default()
        };
        let question = normalize_record(&record).unwrap();
        assert_eq!(question.options, vec!["first", "second", "third", "fourth"]);
        assert_eq!(question.correct_index, 2);
    }

    #[test]
    fn out_of_range_letter_preserved_out_of_bounds() {
        // Answer "E" with four options stays out of bounds, as the source
        // data behaves; the record is not rejected.
        let record = options_record(&["a", "b", "c", "d"], Some("E"), None);
        let question = normalize_record(&record).unwrap();
        assert_eq!(question.correct_index, 4);
        assert!(question.correct_index >= question.options.len());
    }

    #[test]
    fn lowercase_answer_letter_is_unresolvable() {
        let record = options_record(&["a", "b"], Some("b"), None);
        assert!(normalize_record(&record).is_none());
    }

    #[test]
    fn explanation_defaults() {
        let with_letter = options_record(&["a", "b"], Some("B"), None);
        assert_eq!(
            normalize_record(&with_letter).unwrap().explanation,
            "The correct answer is B."
        );

        let numeric_only = options_record(&["a", "b"], None, Some(0));
        assert_eq!(
            normalize_record(&numeric_only).unwrap().explanation,
            "No explanation provided."
        );

        let mut explicit = options_record(&["a", "b"], Some("A"), None);
        explicit.explanation = Some("Because.".into());
        assert_eq!(normalize_record(&explicit).unwrap().explanation, "Because.");
    }

    #[test]
    fn batch_drops_bad_records_and_keeps_order() {
        let records = vec![
            options_record(&["a", "b"], Some("A"), None),
            RawQuestionRecord::default(), // unrecognizable
            options_record(&["c", "d"], Some("B"), None),
        ];
        let questions = normalize_records(&records);
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].options, vec!["a", "b"]);
        assert_eq!(questions[1].options, vec!["c", "d"]);
    }

    #[test]
    fn missing_files_fall_back_to_builtin() {
        let dir = tempfile::tempdir().unwrap();
        let loader = QuestionBankLoader::new(CategoryRegistry::new(dir.path()));

        let questions = loader.load("biology");
        assert!(!questions.is_empty());
        assert_eq!(questions[0].correct_index, 1);

        let generic = loader.load("no-such-category");
        assert!(!generic.is_empty());
    }

    #[test]
    fn malformed_primary_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("450singlebest.json"), "not json at all").unwrap();
        let loader = QuestionBankLoader::new(CategoryRegistry::new(dir.path()));

        let questions = loader.load("biology");
        assert!(!questions.is_empty());
        assert_eq!(questions[0].options[1], "Mitochondria");
    }

    #[test]
    fn primary_tier_wins_when_usable() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("450singlebest.json"),
            r#"[{"question":"From primary","A":"a","B":"b","C":"c","D":"d","answer":"A"}]"#,
        )
        .unwrap();
        let loader = QuestionBankLoader::new(CategoryRegistry::new(dir.path()));

        let questions = loader.load("biology");
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].text, "From primary");
    }

    #[test]
    fn empty_primary_falls_through_to_sample() {
        let dir = tempfile::tempdir().unwrap();
        // Present but with zero recognizable records.
        std::fs::write(dir.path().join("450singlebest.json"), r#"[{"question":"no options"}]"#)
            .unwrap();
        std::fs::write(
            dir.path().join("sample-biology.json"),
            r#"[{"question":"From sample","A":"a","B":"b","C":"c","D":"d","answer":"D"}]"#,
        )
        .unwrap();
        let loader = QuestionBankLoader::new(CategoryRegistry::new(dir.path()));

        let questions = loader.load("biology");
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].text, "From sample");
        assert_eq!(questions[0].correct_index, 3);
    }

    #[test]
    fn custom_file_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let loader = QuestionBankLoader::new(CategoryRegistry::new(dir.path()));

        let err = loader.load_custom("missing.json").unwrap_err();
        assert!(matches!(err, LoadError::NotFound(_)));
    }

    #[test]
    fn custom_file_malformed() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("broken.json"), "{not an array").unwrap();
        let loader = QuestionBankLoader::new(CategoryRegistry::new(dir.path()));

        let err = loader.load_custom("broken.json").unwrap_err();
        assert!(matches!(err, LoadError::Malformed { .. }));
    }

    #[test]
    fn custom_file_loads() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("my-quiz.json"),
            r#"[{"question":"Custom","options":["x","y"],"correctAnswer":0}]"#,
        )
        .unwrap();
        let loader = QuestionBankLoader::new(CategoryRegistry::new(dir.path()));

        let questions = loader.load_custom("my-quiz.json").unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].correct_index, 0);
    }

    #[test]
    fn list_custom_files_excludes_declared_banks() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("450singlebest.json"), "[]").unwrap();
        std::fs::write(dir.path().join("sample-biology.json"), "[]").unwrap();
        std::fs::write(dir.path().join("world_capitals.json"), "[]").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        let registry = CategoryRegistry::new(dir.path());

        let custom = registry.list_custom_files();
        assert_eq!(custom.len(), 1);
        assert_eq!(custom[0].id, "custom-world_capitals");
        assert_eq!(custom[0].title, "world capitals");
        assert_eq!(custom[0].filename, "world_capitals.json");
    }

    #[test]
    fn custom_id_strips_the_extension_once() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("quiz.json.json"), "[]").unwrap();
        let registry = CategoryRegistry::new(dir.path());

        let custom = registry.list_custom_files();
        assert_eq!(custom.len(), 1);
        assert_eq!(custom[0].id, "custom-quiz.json");
        assert_eq!(custom[0].filename, "quiz.json.json");
    }

    #[test]
    fn list_custom_files_missing_dir_is_empty() {
        let registry = CategoryRegistry::new("/definitely/not/here");
        assert!(registry.list_custom_files().is_empty());
    }
}
