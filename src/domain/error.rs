// ============================================================
// Layer 3 — Error Taxonomy
// ============================================================
// Every failure in this tool is fatal to the run. The variants
// below are the ones callers (and tests) need to tell apart;
// everything else travels as an anyhow error with context.
//
//   MalformedDictionary  — a .tsv row without exactly 2 fields
//   ExperimentExists     — preprocess refuses to reuse a directory
//   MissingExperiment    — train/export before preprocess/train
//   InsufficientEntries  — validation draw larger than a language
//   MissingKey           — required config key absent
//   InvalidValidation    — nonsensical validation settings
//   External             — the external library call failed
//
// Reference: thiserror crate documentation
//            Rust Book §9 (Error Handling)

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PrepError {
    /// A dictionary row did not split into word + phonemes
    #[error(
        "Malformed dictionary at {dictionary} ({}:{line}): expected 2 tab-separated fields, found {fields}",
        .path.display()
    )]
    MalformedDictionary {
        dictionary: String,
        path:       PathBuf,
        line:       usize,
        fields:     usize,
    },

    #[error("Experiment directory '{}' already exists", .0.display())]
    ExperimentExists(PathBuf),

    /// A file produced by an earlier stage is not on disk
    #[error("Missing '{}'. {hint}", .path.display())]
    MissingExperiment {
        path: PathBuf,
        hint: &'static str,
    },

    #[error(
        "Language '{language}' has {available} entries but {requested} were requested for validation"
    )]
    InsufficientEntries {
        language:  String,
        available: usize,
        requested: usize,
    },

    #[error("Missing required config key '{0}'")]
    MissingKey(String),

    #[error("Invalid validation settings: {0}")]
    InvalidValidation(String),

    /// The external library exited unsuccessfully
    #[error("External {stage} step failed: {detail}")]
    External {
        stage:  &'static str,
        detail: String,
    },
}
