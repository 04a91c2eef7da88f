// ============================================================
// Layer 2 — ExportUseCase
// ============================================================
// experiments/<exp>/logs/best_model.pt → artifacts/<exp>.pt

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::domain::traits::PhonemizerBackend;
use crate::infra::experiment::ExperimentDir;
use crate::ml::exporter::export_best_model;

pub struct ExportUseCase<'a, B: PhonemizerBackend + ?Sized> {
    experiment: ExperimentDir,
    backend:    &'a B,
}

impl<'a, B: PhonemizerBackend + ?Sized> ExportUseCase<'a, B> {
    pub fn new(workdir: impl Into<PathBuf>, exp_name: &str, backend: &'a B) -> Self {
        Self {
            experiment: ExperimentDir::new(workdir, exp_name),
            backend,
        }
    }

    /// Returns the path of the written artifact.
    pub fn execute(&self) -> Result<PathBuf> {
        export_best_model(self.backend, &self.experiment)
            .with_context(|| format!("Export of '{}' failed", self.experiment.name()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::{Call, RecordingBackend};
    use crate::domain::error::PrepError;
    use std::fs;

    #[test]
    fn test_exports_best_checkpoint() {
        let root = tempfile::tempdir().unwrap();
        let exp  = ExperimentDir::new(root.path(), "demo");
        exp.create().unwrap();
        let best = exp.best_checkpoint_path();
        fs::create_dir_all(best.parent().unwrap()).unwrap();
        fs::write(&best, b"weights").unwrap();

        let backend  = RecordingBackend::new(0);
        let artifact = ExportUseCase::new(root.path(), "demo", &backend)
            .execute()
            .unwrap();

        assert_eq!(artifact, root.path().join("artifacts").join("demo.pt"));
        assert!(root.path().join("artifacts").is_dir());
        assert_eq!(
            backend.calls(),
            vec![Call::Export { checkpoint: best, artifact }]
        );
    }

    #[test]
    fn test_untrained_experiment() {
        let root    = tempfile::tempdir().unwrap();
        let backend = RecordingBackend::new(0);

        let err = ExportUseCase::new(root.path(), "demo", &backend)
            .execute()
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<PrepError>(),
            Some(PrepError::MissingExperiment { .. })
        ));
        assert!(backend.calls().is_empty());
    }
}
