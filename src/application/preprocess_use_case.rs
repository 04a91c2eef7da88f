// ============================================================
// Layer 2 — PreprocessUseCase
// ============================================================
// Orchestrates the full preprocessing pipeline in order:
//
//   Step 1: Load master config + validation settings  (Layer 6 - infra)
//   Step 2: Create experiments/<exp>/                  (Layer 6 - infra)
//   Step 3: Load every language's dictionaries         (Layer 4 - data)
//   Step 4: Collate graphemes and phonemes             (Layer 4 - data)
//   Step 5: Write the experiment config                (Layer 4 + 6)
//   Step 6: Split training / validation per language   (Layer 4 - data)
//   Step 7: Write both sets to disk                    (Layer 6 - infra)
//   Step 8: Run the external preprocess step           (backend)
//
// Reference: Rust Book §13 (Iterators and Closures)

use anyhow::{Context, Result};
use rand::{rngs::StdRng, SeedableRng};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::data::{
    aggregator::{language_names, process_languages},
    config_synthesizer::create_experiment_config,
    splitter::create_sets,
    symbols::collate_symbols,
};
use crate::domain::manifest::LinguisticManifest;
use crate::domain::traits::PhonemizerBackend;
use crate::infra::{
    config_store::ConfigDocument,
    dataset_store::write_tagged_entries,
    experiment::ExperimentDir,
};

// ─── Preprocess Configuration ────────────────────────────────────────────────
#[derive(Debug, Clone)]
pub struct PreprocessConfig {
    /// Master config (YAML)
    pub config:       PathBuf,
    /// Linguistic manifest (YAML)
    pub linguistic:   PathBuf,
    pub exp_name:     String,
    /// Directory holding experiments/ and artifacts/
    pub workdir:      PathBuf,
    /// Fixed seed for a reproducible split; None draws from the thread RNG
    pub seed:         Option<u64>,
    /// Stop after writing config and datasets
    pub prepare_only: bool,
}

/// Per-language outcome of the split
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageSummary {
    pub name:       String,
    pub training:   usize,
    pub validation: usize,
}

/// What a preprocess run produced.
#[derive(Debug, Clone)]
pub struct PreprocessReport {
    pub experiment_dir: PathBuf,
    pub config_path:    PathBuf,
    pub languages:      Vec<LanguageSummary>,
    pub graphemes:      usize,
    pub phonemes:       usize,
    pub training:       usize,
    pub validation:     usize,
    /// False with `prepare_only`
    pub external_ran:   bool,
}

// ─── PreprocessUseCase ───────────────────────────────────────────────────────
pub struct PreprocessUseCase<'a, B: PhonemizerBackend + ?Sized> {
    config:  PreprocessConfig,
    backend: &'a B,
}

impl<'a, B: PhonemizerBackend + ?Sized> PreprocessUseCase<'a, B> {
    pub fn new(config: PreprocessConfig, backend: &'a B) -> Self {
        Self { config, backend }
    }

    pub fn execute(&self) -> Result<PreprocessReport> {
        let cfg = &self.config;

        // ── Step 1: Master config ─────────────────────────────────────────────
        // Validation settings are checked before anything touches disk
        let master   = ConfigDocument::load(&cfg.config)?;
        let settings = master.validation_settings()?;
        settings.check()?;

        // ── Step 2: Experiment directory ──────────────────────────────────────
        let experiment = ExperimentDir::new(&cfg.workdir, &cfg.exp_name);
        experiment.create()?;

        tracing::info!("config: {}", display_abs(&cfg.config));
        tracing::info!("linguistic: {}", display_abs(&cfg.linguistic));
        tracing::info!("experiment: {}", cfg.exp_name);

        // ── Step 3: Languages ─────────────────────────────────────────────────
        tracing::info!("Parsing linguistic file: {}", display_abs(&cfg.linguistic));
        let manifest  = load_manifest(&cfg.linguistic)?;
        tracing::info!("Languages: {}", manifest.language_names().join(", "));
        let bundles   = process_languages(&manifest)?;
        let languages = language_names(&bundles);

        // ── Step 4: Vocabularies ──────────────────────────────────────────────
        tracing::info!("Processing graphemes and phonemes...");
        let symbols = collate_symbols(&bundles);
        tracing::info!(
            "Total graphemes: {}, Total phonemes: {}",
            symbols.graphemes.len(),
            symbols.phonemes.len()
        );

        // ── Step 5: Experiment config ─────────────────────────────────────────
        tracing::info!("Creating experiment...");
        let derived     = create_experiment_config(&master, &symbols, &languages, &cfg.exp_name)?;
        let config_path = experiment.config_path();
        derived.save(&config_path)?;
        tracing::debug!("Experiment config:\n{}", derived.to_yaml_string()?);

        // ── Step 6: Training / validation split ───────────────────────────────
        tracing::info!("Selecting validation data...");
        let split = match cfg.seed {
            Some(seed) => create_sets(bundles, &settings, &mut StdRng::seed_from_u64(seed))?,
            None       => create_sets(bundles, &settings, &mut rand::thread_rng())?,
        };

        let summaries: Vec<LanguageSummary> = languages
            .iter()
            .map(|name| LanguageSummary {
                name:       name.clone(),
                training:   split.training_count(name),
                validation: split.validation_count(name),
            })
            .collect();

        // ── Step 7: Dataset files ─────────────────────────────────────────────
        write_tagged_entries(&experiment.train_set_path(), &split.training)?;
        write_tagged_entries(&experiment.val_set_path(), &split.validation)?;
        tracing::info!(
            "Wrote {} entries, validating with {} words",
            split.total(),
            split.validation.len()
        );

        // ── Step 8: External preprocess ───────────────────────────────────────
        if cfg.prepare_only {
            tracing::info!("Skipping external preprocess step");
        } else {
            self.backend
                .preprocess(
                    &config_path,
                    &experiment.train_set_path(),
                    &experiment.val_set_path(),
                )
                .context("External preprocess step failed")?;
        }

        Ok(PreprocessReport {
            experiment_dir: experiment.dir(),
            config_path,
            languages:      summaries,
            graphemes:      symbols.graphemes.len(),
            phonemes:       symbols.phonemes.len(),
            training:       split.training.len(),
            validation:     split.validation.len(),
            external_ran:   !cfg.prepare_only,
        })
    }
}

fn load_manifest(path: &Path) -> Result<LinguisticManifest> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Cannot read linguistic file '{}'", path.display()))?;
    LinguisticManifest::from_yaml_str(&text)
        .with_context(|| format!("Cannot parse linguistic file '{}'", path.display()))
}

fn display_abs(path: &Path) -> String {
    fs::canonicalize(path)
        .unwrap_or_else(|_| path.to_path_buf())
        .display()
        .to_string()
}
