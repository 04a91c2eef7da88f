// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates a training run in order:
//
//   Step 1: Locate experiments/<exp>/config.yaml     (Layer 6 - infra)
//   Step 2: Sanity-check the derived config           (Layer 6 - infra)
//   Step 3: Resolve the resume checkpoint, if any
//   Step 4: Count accelerators                        (backend)
//   Step 5: Plan and dispatch the training loop       (Layer 5 - ml)
//
// Reference: Rust Book §13 (Iterators and Closures)

use anyhow::{Context, Result};
use std::{fs, path::PathBuf};

use crate::domain::traits::PhonemizerBackend;
use crate::infra::{config_store::ConfigDocument, experiment::ExperimentDir};
use crate::ml::trainer::{plan_training, run_training};

// ─── Training Request ────────────────────────────────────────────────────────
#[derive(Debug, Clone)]
pub struct TrainRequest {
    pub exp_name:   String,
    /// Directory holding experiments/
    pub workdir:    PathBuf,
    /// Resume from this checkpoint instead of starting fresh
    pub checkpoint: Option<PathBuf>,
    /// Overrides the accelerator count query
    pub gpus:       Option<usize>,
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
pub struct TrainUseCase<'a, B: PhonemizerBackend + ?Sized> {
    request: TrainRequest,
    backend: &'a B,
}

impl<'a, B: PhonemizerBackend + ?Sized> TrainUseCase<'a, B> {
    pub fn new(request: TrainRequest, backend: &'a B) -> Self {
        Self { request, backend }
    }

    pub fn execute(&self) -> Result<()> {
        let req        = &self.request;
        let experiment = ExperimentDir::new(&req.workdir, &req.exp_name);

        // ── Step 1: Derived config ────────────────────────────────────────────
        let config_file = experiment.require_config()?;

        // ── Step 2: It must be a preprocessed config ──────────────────────────
        // The symbol lists only exist after `preprocess` rewrote the file
        let config = ConfigDocument::load(&config_file)?;
        config.require(&["preprocessing", "text_symbols"])?;
        config.require(&["preprocessing", "phoneme_symbols"])?;

        // ── Step 3: Resume checkpoint ─────────────────────────────────────────
        // Canonical path, since the child process runs inside the workdir
        let checkpoint = match &req.checkpoint {
            Some(path) => {
                let resolved = fs::canonicalize(path).with_context(|| {
                    format!("Checkpoint file '{}' does not exist", path.display())
                })?;
                let file_name = resolved
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                tracing::info!("Resuming training from checkpoint {}", file_name);
                Some(resolved)
            }
            None => None,
        };

        // ── Step 4: Accelerators ──────────────────────────────────────────────
        let num_gpus = match req.gpus {
            Some(n) => n,
            None    => self.backend.device_count().context("Cannot count accelerators")?,
        };
        tracing::info!("Accelerators available: {}", num_gpus);

        // ── Step 5: Dispatch ──────────────────────────────────────────────────
        let plan = plan_training(config_file, checkpoint, num_gpus);
        run_training(self.backend, &plan).context("Training failed")
    }
}
