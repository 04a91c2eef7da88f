// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the three subcommands: `preprocess`, `train` and
// `export`, with all their flags.
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::application::{
    preprocess_use_case::PreprocessConfig,
    train_use_case::TrainRequest,
};

/// The three top-level subcommands available to the user
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build vocabularies, a validation split and an experiment config
    Preprocess(PreprocessArgs),

    /// Train a preprocessed experiment
    Train(TrainArgs),

    /// Export the best checkpoint as a TorchScript artifact
    Export(ExportArgs),
}

/// All arguments for the `preprocess` command
#[derive(Args, Debug)]
pub struct PreprocessArgs {
    /// Master config file (YAML)
    pub config: PathBuf,

    /// Linguistic manifest listing languages and their dictionaries (YAML)
    pub linguistic: PathBuf,

    /// Name of the experiment; must not exist yet under experiments/
    pub exp_name: String,

    /// Seed the validation sampler for a reproducible split
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write config and datasets but skip the external preprocess step
    #[arg(long)]
    pub prepare_only: bool,
}

impl PreprocessArgs {
    /// The application layer never sees clap types.
    pub fn into_config(self, workdir: PathBuf) -> PreprocessConfig {
        PreprocessConfig {
            config:       self.config,
            linguistic:   self.linguistic,
            exp_name:     self.exp_name,
            workdir,
            seed:         self.seed,
            prepare_only: self.prepare_only,
        }
    }
}

/// All arguments for the `train` command
#[derive(Args, Debug)]
pub struct TrainArgs {
    /// Name of a preprocessed experiment
    pub exp_name: String,

    /// Resume from this checkpoint
    #[arg(short, long)]
    pub checkpoint: Option<PathBuf>,

    /// Number of accelerators to use instead of probing for them
    #[arg(long)]
    pub gpus: Option<usize>,
}

impl TrainArgs {
    pub fn into_request(self, workdir: PathBuf) -> TrainRequest {
        TrainRequest {
            exp_name:   self.exp_name,
            workdir,
            checkpoint: self.checkpoint,
            gpus:       self.gpus,
        }
    }
}

/// All arguments for the `export` command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Name of a trained experiment
    pub exp_name: String,
}
