// ============================================================
// Layer 5 — Training Dispatch
// ============================================================
// The training loop itself belongs to the external library.
// This module decides how to call it:
//
//   accelerators ≤ 1  → one call, rank 0
//   accelerators  > 1 → one worker per accelerator, spawned by
//                       the library's multiprocessing helper
//
// and then hands the plan to the backend.

use anyhow::Result;
use std::path::PathBuf;

use crate::domain::traits::PhonemizerBackend;
use crate::domain::training::{DispatchMode, TrainPlan};

pub fn plan_training(
    config_file: PathBuf,
    checkpoint:  Option<PathBuf>,
    num_gpus:    usize,
) -> TrainPlan {
    let mode = if num_gpus > 1 {
        DispatchMode::Spawn { workers: num_gpus }
    } else {
        DispatchMode::Sequential
    };

    TrainPlan {
        config_file,
        checkpoint,
        num_gpus,
        mode,
    }
}

pub fn run_training<B: PhonemizerBackend + ?Sized>(backend: &B, plan: &TrainPlan) -> Result<()> {
    match plan.mode {
        DispatchMode::Sequential => {
            tracing::info!("Training on {} accelerator(s) in a single process", plan.num_gpus);
        }
        DispatchMode::Spawn { workers } => {
            tracing::info!("Spawning {} training workers", workers);
        }
    }
    backend.train(plan)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cpu_only_is_sequential() {
        let plan = plan_training("c.yaml".into(), None, 0);
        assert_eq!(plan.mode, DispatchMode::Sequential);
        assert_eq!(plan.num_gpus, 0);
    }

    #[test]
    fn test_single_gpu_is_sequential() {
        let plan = plan_training("c.yaml".into(), Some("ckpt.pt".into()), 1);
        assert_eq!(plan.mode, DispatchMode::Sequential);
        assert_eq!(plan.checkpoint, Some(PathBuf::from("ckpt.pt")));
    }

    #[test]
    fn test_multi_gpu_spawns_one_worker_each() {
        let plan = plan_training("c.yaml".into(), None, 4);
        assert_eq!(plan.mode, DispatchMode::Spawn { workers: 4 });
    }
}
