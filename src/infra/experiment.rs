// ============================================================
// Layer 6 — Experiment Directory
// ============================================================
// Knows where every stage reads and writes its files.
//
// Layout under the working root:
//   experiments/
//     <exp>/
//       config.yaml        ← derived config (preprocess)
//       train_set.tsv      ← training entries (preprocess)
//       val_set.tsv        ← validation entries (preprocess)
//       logs/best_model.pt ← best checkpoint (train)
//   artifacts/
//     <exp>.pt             ← scripted model (export)
//
// Preprocess refuses to reuse an experiment directory; train
// and export refuse to start when the previous stage's output
// is missing.
//
// Reference: Rust Book §9 (Error Handling)

use anyhow::{Context, Result};
use std::{
    fs, io,
    path::PathBuf,
};

use crate::domain::error::PrepError;

pub const EXPERIMENTS_DIR: &str = "experiments";
pub const ARTIFACTS_DIR: &str = "artifacts";

const CONFIG_FILE: &str = "config.yaml";
const TRAIN_SET_FILE: &str = "train_set.tsv";
const VAL_SET_FILE: &str = "val_set.tsv";
const BEST_CHECKPOINT: [&str; 2] = ["logs", "best_model.pt"];

/// Paths of one named experiment below a working root.
#[derive(Debug, Clone)]
pub struct ExperimentDir {
    root: PathBuf,
    name: String,
}

impl ExperimentDir {
    pub fn new(root: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            name: name.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// `<root>/experiments/<exp>`
    pub fn dir(&self) -> PathBuf {
        self.root.join(EXPERIMENTS_DIR).join(&self.name)
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir().join(CONFIG_FILE)
    }

    pub fn train_set_path(&self) -> PathBuf {
        self.dir().join(TRAIN_SET_FILE)
    }

    pub fn val_set_path(&self) -> PathBuf {
        self.dir().join(VAL_SET_FILE)
    }

    pub fn best_checkpoint_path(&self) -> PathBuf {
        BEST_CHECKPOINT
            .iter()
            .fold(self.dir(), |path, part| path.join(part))
    }

    /// `<root>/artifacts/<exp>.pt`
    pub fn artifact_path(&self) -> PathBuf {
        self.root
            .join(ARTIFACTS_DIR)
            .join(format!("{}.pt", self.name))
    }

    /// Create the experiment directory.
    /// `experiments/` is created if needed; the experiment itself must not exist.
    pub fn create(&self) -> Result<()> {
        let parent = self.root.join(EXPERIMENTS_DIR);
        fs::create_dir_all(&parent)
            .with_context(|| format!("Cannot create '{}'", parent.display()))?;

        let dir = self.dir();
        match fs::create_dir(&dir) {
            Ok(()) => {
                tracing::debug!("Created experiment directory '{}'", dir.display());
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                Err(PrepError::ExperimentExists(dir).into())
            }
            Err(e) => Err(e).with_context(|| format!("Cannot create '{}'", dir.display())),
        }
    }

    /// The derived config written by `preprocess`.
    pub fn require_config(&self) -> Result<PathBuf, PrepError> {
        require(
            self.config_path(),
            "Make sure you have run 'preprocess' for this experiment first.",
        )
    }

    /// The best checkpoint written by `train`.
    pub fn require_best_checkpoint(&self) -> Result<PathBuf, PrepError> {
        require(
            self.best_checkpoint_path(),
            "Make sure you have run 'train' for this experiment first.",
        )
    }

    /// Make sure `artifacts/` exists before export writes into it.
    pub fn ensure_artifacts_dir(&self) -> Result<PathBuf> {
        let dir = self.root.join(ARTIFACTS_DIR);
        fs::create_dir_all(&dir)
            .with_context(|| format!("Cannot create '{}'", dir.display()))?;
        Ok(dir)
    }
}

fn require(path: PathBuf, hint: &'static str) -> Result<PathBuf, PrepError> {
    if path.is_file() {
        Ok(path)
    } else {
        Err(PrepError::MissingExperiment { path, hint })
    }
}
