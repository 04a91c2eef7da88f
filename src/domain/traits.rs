// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The heavy lifting (tokenisation, the transformer, the
// training loop, TorchScript export) lives in an external
// phonemizer library. The application layer only talks to it
// through PhonemizerBackend, so:
//   - PythonBridge implements it by running the real library
//   - tests implement it with a recorder that runs nothing
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use anyhow::Result;
use std::path::Path;

use crate::domain::training::TrainPlan;

/// Everything the pipeline needs from the external library.
pub trait PhonemizerBackend {
    /// Tokenise the training and validation sets into the
    /// data directory named by `config_file`.
    fn preprocess(&self, config_file: &Path, train_set: &Path, val_set: &Path) -> Result<()>;

    /// Number of accelerators the library can see
    fn device_count(&self) -> Result<usize>;

    /// Run (or resume) training as described by the plan
    fn train(&self, plan: &TrainPlan) -> Result<()>;

    /// Script the predictor inside `checkpoint` and save it to `artifact`
    fn export(&self, checkpoint: &Path, artifact: &Path) -> Result<()>;
}
