// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// This is the entry point for all user interaction.
// It uses the `clap` crate to parse command line arguments.
// All business logic is delegated to Layer 2 (application).
//
// Three commands are supported:
//   1. `preprocess` — dictionaries → experiment config + datasets
//   2. `train`      — runs the external training loop
//   3. `export`     — best checkpoint → artifacts/<exp>.pt
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use anyhow::{Context, Result};
use clap::Parser;
use commands::{Commands, ExportArgs, PreprocessArgs, TrainArgs};
use std::{fs, path::PathBuf};

use crate::infra::python_bridge::PythonBridge;

#[derive(Parser, Debug)]
#[command(
    name = "g2p-prep",
    version,
    about = "Prepare, train and export grapheme-to-phoneme models."
)]
pub struct Cli {
    /// Directory holding experiments/ and artifacts/
    #[arg(long, global = true, default_value = ".")]
    pub workdir: PathBuf,

    /// Python interpreter with the phonemizer library installed
    #[arg(long, global = true, env = "G2P_PYTHON", default_value = "python3")]
    pub python: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch to the correct use case.
    pub fn run(self) -> Result<()> {
        // The Python child runs inside the workdir, so every path
        // handed to it is built from the canonical form
        let workdir = fs::canonicalize(&self.workdir)
            .with_context(|| format!("Working directory '{}' not found", self.workdir.display()))?;
        let backend = PythonBridge::new(&self.python, &workdir);

        match self.command {
            Commands::Preprocess(args) => run_preprocess(args, workdir, &backend),
            Commands::Train(args)      => run_train(args, workdir, &backend),
            Commands::Export(args)     => run_export(args, workdir, &backend),
        }
    }
}

fn run_preprocess(args: PreprocessArgs, workdir: PathBuf, backend: &PythonBridge) -> Result<()> {
    use crate::application::preprocess_use_case::PreprocessUseCase;

    let report = PreprocessUseCase::new(args.into_config(workdir), backend).execute()?;

    for lang in &report.languages {
        println!(
            "{:<12} train {:>8}  validation {:>6}",
            lang.name, lang.training, lang.validation
        );
    }
    println!(
        "{:<12} train {:>8}  validation {:>6}",
        "total", report.training, report.validation
    );
    println!(
        "Graphemes: {}, phonemes: {}",
        report.graphemes, report.phonemes
    );
    println!("Experiment: {}", report.experiment_dir.display());
    println!("Experiment config: {}", report.config_path.display());
    if !report.external_ran {
        println!("External preprocess skipped (--prepare-only).");
    }
    Ok(())
}

fn run_train(args: TrainArgs, workdir: PathBuf, backend: &PythonBridge) -> Result<()> {
    use crate::application::train_use_case::TrainUseCase;

    tracing::info!("Starting training for experiment '{}'", args.exp_name);
    TrainUseCase::new(args.into_request(workdir), backend).execute()?;

    println!("Training complete.");
    Ok(())
}

fn run_export(args: ExportArgs, workdir: PathBuf, backend: &PythonBridge) -> Result<()> {
    use crate::application::export_use_case::ExportUseCase;

    let artifact = ExportUseCase::new(workdir, &args.exp_name, backend).execute()?;
    println!("Model saved to {}", artifact.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_preprocess_positionals_and_flags() {
        let cli = Cli::try_parse_from([
            "g2p-prep", "preprocess", "cfg.yaml", "ling.yaml", "exp1", "--seed", "7", "--prepare-only",
        ])
        .unwrap();

        match cli.command {
            Commands::Preprocess(args) => {
                assert_eq!(args.exp_name, "exp1");
                assert_eq!(args.seed, Some(7));
                assert!(args.prepare_only);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_train_short_checkpoint_and_global_workdir() {
        let cli = Cli::try_parse_from([
            "g2p-prep", "train", "exp1", "-c", "ckpt.pt", "--workdir", "/tmp",
        ])
        .unwrap();

        assert_eq!(cli.workdir, PathBuf::from("/tmp"));
        match cli.command {
            Commands::Train(args) => {
                assert_eq!(args.checkpoint, Some(PathBuf::from("ckpt.pt")));
                assert_eq!(args.gpus, None);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_export_requires_name() {
        assert!(Cli::try_parse_from(["g2p-prep", "export"]).is_err());
    }
}
