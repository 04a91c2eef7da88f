// ============================================================
// Layer 5 — Model Export
// ============================================================
// Scripts the predictor model inside the best checkpoint into a
// standalone TorchScript artifact that can be loaded without
// the training library.

use anyhow::Result;

use crate::domain::traits::PhonemizerBackend;
use crate::infra::experiment::ExperimentDir;

/// Export `experiments/<exp>/logs/best_model.pt` to `artifacts/<exp>.pt`.
/// Returns the artifact path.
pub fn export_best_model<B: PhonemizerBackend + ?Sized>(
    backend:    &B,
    experiment: &ExperimentDir,
) -> Result<std::path::PathBuf> {
    let checkpoint = experiment.require_best_checkpoint()?;
    experiment.ensure_artifacts_dir()?;
    let artifact = experiment.artifact_path();

    tracing::info!(
        "Exporting '{}' to '{}'",
        checkpoint.display(),
        artifact.display()
    );
    backend.export(&checkpoint, &artifact)?;
    Ok(artifact)
}
