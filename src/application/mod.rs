// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// This layer orchestrates all the other layers to accomplish
// one command (preprocess, train, or export).
//
// Rules for this layer:
//   - No parsing or sampling logic here (that's Layer 4)
//   - No printing here (that's Layer 1); progress goes to tracing
//   - Only workflow coordination
//
// Every use case talks to the external library through the
// PhonemizerBackend trait, so tests can swap in a recorder.
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// Dictionaries → vocabularies → config → split → external preprocess
pub mod preprocess_use_case;

// Derived config → external training loop
pub mod train_use_case;

// Best checkpoint → TorchScript artifact
pub mod export_use_case;

#[cfg(test)]
pub(crate) mod testing {
    use anyhow::Result;
    use std::cell::RefCell;
    use std::path::{Path, PathBuf};

    use crate::domain::traits::PhonemizerBackend;
    use crate::domain::training::TrainPlan;

    #[derive(Debug, Clone, PartialEq)]
    pub enum Call {
        Preprocess { config: PathBuf, train: PathBuf, val: PathBuf },
        DeviceCount,
        Train(TrainPlan),
        Export { checkpoint: PathBuf, artifact: PathBuf },
    }

    /// Records every call instead of running the external library.
    pub struct RecordingBackend {
        pub devices: usize,
        pub calls:   RefCell<Vec<Call>>,
    }

    impl RecordingBackend {
        pub fn new(devices: usize) -> Self {
            Self {
                devices,
                calls: RefCell::new(Vec::new()),
            }
        }

        pub fn calls(&self) -> Vec<Call> {
            self.calls.borrow().clone()
        }
    }

    impl PhonemizerBackend for RecordingBackend {
        fn preprocess(&self, config_file: &Path, train_set: &Path, val_set: &Path) -> Result<()> {
            self.calls.borrow_mut().push(Call::Preprocess {
                config: config_file.to_path_buf(),
                train:  train_set.to_path_buf(),
                val:    val_set.to_path_buf(),
            });
            Ok(())
        }

        fn device_count(&self) -> Result<usize> {
            self.calls.borrow_mut().push(Call::DeviceCount);
            Ok(self.devices)
        }

        fn train(&self, plan: &TrainPlan) -> Result<()> {
            self.calls.borrow_mut().push(Call::Train(plan.clone()));
            Ok(())
        }

        fn export(&self, checkpoint: &Path, artifact: &Path) -> Result<()> {
            self.calls.borrow_mut().push(Call::Export {
                checkpoint: checkpoint.to_path_buf(),
                artifact:   artifact.to_path_buf(),
            });
            Ok(())
        }
    }
}
