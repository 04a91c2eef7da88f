// ============================================================
// Layer 3 — Training Dispatch Plan
// ============================================================
// The external library owns the training loop and its worker
// processes. The only decision made on this side is whether to
// call it once (rank 0) or to let its multiprocessing helper
// spawn one worker per accelerator.

use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchMode {
    /// A single in-process call with rank 0
    Sequential,
    /// One worker per visible accelerator
    Spawn { workers: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainPlan {
    /// The experiment's derived config.yaml
    pub config_file: PathBuf,

    /// Checkpoint to resume from, if any
    pub checkpoint:  Option<PathBuf>,

    /// Accelerators visible to the external library
    pub num_gpus:    usize,

    pub mode:        DispatchMode,
}
