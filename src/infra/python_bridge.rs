// ============================================================
// Layer 6 — Python Bridge
// ============================================================
// The phonemizer library (DeepPhonemizer on PyTorch) is only
// reachable from Python, so each external step runs a short
// Python program in a child process:
//
//   g2p-prep ──spawn──► python <program>.py <args...>
//                          │
//                          └── dp.preprocess / dp.train / torch.jit
//
// Programs run from a temporary .py file inside the working
// root. Spawned training workers re-import that file, so the
// checkpoint-safe type registration at its top runs in every
// worker too.
//
// The child runs with the working root as its current
// directory, so the relative `experiments/<exp>/...` paths in
// the derived config resolve the same way for both sides.
//
// Reference: std::process::Command documentation
//            tempfile crate documentation

use anyhow::{Context, Result};
use std::{
    ffi::OsString,
    io::Write,
    path::{Path, PathBuf},
    process::{Command, Output, Stdio},
};

use crate::domain::error::PrepError;
use crate::domain::traits::PhonemizerBackend;
use crate::domain::training::{DispatchMode, TrainPlan};

/// Types a checkpoint may contain besides plain tensors.
/// Newer torch versions refuse to unpickle anything not listed.
pub const CHECKPOINT_SAFE_TYPES: [(&str, &str); 3] = [
    ("dp.preprocessing.text", "Preprocessor"),
    ("dp.preprocessing.text", "LanguageTokenizer"),
    ("dp.preprocessing.text", "SequenceTokenizer"),
];

const PREPROCESS_PROGRAM: &str = r#"
import sys
import dp.preprocess


def read_split(path):
    rows = []
    with open(path, 'r', encoding='utf-8') as f:
        for line in f:
            language, word, phonemes = line.rstrip('\n').split('\t')
            rows.append((language, word, phonemes.split()))
    return rows


if __name__ == '__main__':
    dp.preprocess.preprocess(config_file=sys.argv[1],
                             train_data=read_split(sys.argv[2]),
                             val_data=read_split(sys.argv[3]),
                             deduplicate_train_data=False)
"#;

const DEVICE_COUNT_PROGRAM: &str = r#"
import torch

print(torch.cuda.device_count())
"#;

const TRAIN_PROGRAM: &str = r#"
import sys
from torch import multiprocessing as mp
from dp.train import train

if __name__ == '__main__':
    config_file = sys.argv[1]
    num_gpus = int(sys.argv[2])
    workers = int(sys.argv[3])
    checkpoint = tuple(sys.argv[4:5])
    if workers > 1:
        mp.spawn(train, nprocs=workers, args=(num_gpus, config_file) + checkpoint)
    else:
        train(0, num_gpus, config_file, *checkpoint)
"#;

const EXPORT_PROGRAM: &str = r#"
import sys
from dp.phonemizer import Phonemizer

if __name__ == '__main__':
    model = Phonemizer.from_checkpoint(sys.argv[1]).predictor.model
    torch.jit.save(torch.jit.script(model), sys.argv[2])
"#;

/// Runs the external library through a Python interpreter.
#[derive(Debug, Clone)]
pub struct PythonBridge {
    interpreter: PathBuf,
    workdir:     PathBuf,
}

impl PythonBridge {
    pub fn new(interpreter: impl Into<PathBuf>, workdir: impl Into<PathBuf>) -> Self {
        Self {
            interpreter: interpreter.into(),
            workdir:     workdir.into(),
        }
    }

    /// Run `program` with inherited stdio; the child's own output
    /// (progress, losses) goes straight to the terminal.
    fn run(&self, stage: &'static str, program: &str, args: Vec<OsString>) -> Result<()> {
        let script = write_program(&self.workdir, program)?;
        tracing::debug!("Running external {} step with {}", stage, self.interpreter.display());

        let status = self
            .command(script.path(), args)
            .status()
            .with_context(|| self.launch_error())?;

        if !status.success() {
            return Err(PrepError::External {
                stage,
                detail: status.to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Run `program` and return its trimmed stdout.
    fn capture(&self, stage: &'static str, program: &str, args: Vec<OsString>) -> Result<String> {
        let script = write_program(&self.workdir, program)?;

        let Output { status, stdout, stderr } = self
            .command(script.path(), args)
            .stdin(Stdio::null())
            .output()
            .with_context(|| self.launch_error())?;

        if !status.success() {
            let stderr = String::from_utf8_lossy(&stderr);
            return Err(PrepError::External {
                stage,
                detail: format!("{status}: {}", stderr.trim()),
            }
            .into());
        }
        Ok(String::from_utf8_lossy(&stdout).trim().to_string())
    }

    fn command(&self, script: &Path, args: Vec<OsString>) -> Command {
        let mut cmd = Command::new(&self.interpreter);
        cmd.arg(script).args(args).current_dir(&self.workdir);
        cmd
    }

    fn launch_error(&self) -> String {
        format!(
            "Cannot launch Python interpreter '{}'",
            self.interpreter.display()
        )
    }
}

impl PhonemizerBackend for PythonBridge {
    fn preprocess(&self, config_file: &Path, train_set: &Path, val_set: &Path) -> Result<()> {
        let args = vec![
            config_file.as_os_str().to_owned(),
            train_set.as_os_str().to_owned(),
            val_set.as_os_str().to_owned(),
        ];
        self.run("preprocess", PREPROCESS_PROGRAM, args)
    }

    fn device_count(&self) -> Result<usize> {
        let out = self.capture("device query", DEVICE_COUNT_PROGRAM, Vec::new())?;
        out.lines()
            .last()
            .unwrap_or_default()
            .trim()
            .parse()
            .with_context(|| format!("Unexpected device count output: {out:?}"))
    }

    fn train(&self, plan: &TrainPlan) -> Result<()> {
        let workers = match plan.mode {
            DispatchMode::Sequential        => 1,
            DispatchMode::Spawn { workers } => workers,
        };

        let mut args = vec![
            plan.config_file.as_os_str().to_owned(),
            OsString::from(plan.num_gpus.to_string()),
            OsString::from(workers.to_string()),
        ];
        if let Some(checkpoint) = &plan.checkpoint {
            args.push(checkpoint.as_os_str().to_owned());
        }

        self.run("train", &with_safe_types(TRAIN_PROGRAM), args)
    }

    fn export(&self, checkpoint: &Path, artifact: &Path) -> Result<()> {
        let args = vec![
            checkpoint.as_os_str().to_owned(),
            artifact.as_os_str().to_owned(),
        ];
        self.run("export", &with_safe_types(EXPORT_PROGRAM), args)
    }
}

/// Prefix a program with torch's safe-type registration.
pub fn with_safe_types(program: &str) -> String {
    let mut out = String::from("import torch\n");
    for (module, name) in CHECKPOINT_SAFE_TYPES {
        out.push_str(&format!("from {module} import {name}\n"));
    }
    let names: Vec<&str> = CHECKPOINT_SAFE_TYPES.iter().map(|(_, n)| *n).collect();
    out.push_str(&format!(
        "torch.serialization.add_safe_globals([{}])\n",
        names.join(", ")
    ));
    out.push_str(program);
    out
}

/// The program lands in the working root, so the child's `sys.path[0]`
/// is the working root and not a shared temp directory.
fn write_program(dir: &Path, program: &str) -> Result<tempfile::NamedTempFile> {
    let mut file = tempfile::Builder::new()
        .prefix(".g2p-prep-")
        .suffix(".py")
        .tempfile_in(dir)
        .with_context(|| format!("Cannot create Python program in '{}'", dir.display()))?;
    file.write_all(program.as_bytes())?;
    file.flush()?;
    Ok(file)
}
