// ============================================================
// Layer 4 — Experiment Config Synthesizer
// ============================================================
// Turns the master config into the config the external trainer
// reads for one experiment:
//
//   master config                    experiments/<exp>/config.yaml
//   ─────────────                    ─────────────────────────────
//   preprocessing: {...}       ──►   preprocessing:
//                                      ...original keys...
//                                      text_symbols: ['a', 'b', ...]
//                                      phoneme_symbols: ['p', ...]
//                                      languages: [en_us, de]
//   paths:                           paths:
//     checkpoint_dir: logs     ──►     checkpoint_dir: experiments/<exp>/logs
//     data_dir: datasets       ──►     data_dir: experiments/<exp>/datasets
//   validation: {...}          ──►   (removed)
//
// The master document itself is never modified.

use anyhow::Result;
use serde_yaml::Value;
use std::path::{Component, Path};

use crate::data::symbols::SymbolInventory;
use crate::domain::error::PrepError;
use crate::infra::config_store::ConfigDocument;
use crate::infra::experiment::EXPERIMENTS_DIR;

/// Keys under `paths` that move into the experiment directory
const EXPERIMENT_PATH_KEYS: [&str; 2] = ["checkpoint_dir", "data_dir"];

pub fn create_experiment_config(
    master:    &ConfigDocument,
    symbols:   &SymbolInventory,
    languages: &[String],
    exp_name:  &str,
) -> Result<ConfigDocument> {
    let mut config = master.clone();

    // ── Drop the splitter-only settings ──────────────────────────────────────
    config
        .remove("validation")
        .ok_or_else(|| PrepError::MissingKey("validation".into()))?;

    // ── Vocabularies and languages ────────────────────────────────────────────
    let preprocessing = config.require_mapping_mut(&["preprocessing"])?;
    preprocessing.insert("text_symbols".into(), string_list(symbols.grapheme_list()));
    preprocessing.insert("phoneme_symbols".into(), string_list(symbols.phoneme_list()));
    preprocessing.insert("languages".into(), string_list(languages.to_vec()));

    config.mark_single_quoted(&["preprocessing", "text_symbols"]);
    config.mark_single_quoted(&["preprocessing", "phoneme_symbols"]);

    // ── Move output directories under experiments/<exp>/ ─────────────────────
    for key in EXPERIMENT_PATH_KEYS {
        let slot = config
            .get_mut(&["paths", key])
            .ok_or_else(|| PrepError::MissingKey(format!("paths.{key}")))?;
        let original = scalar_text(slot)
            .ok_or_else(|| PrepError::MissingKey(format!("paths.{key}")))?;
        *slot = Value::String(experiment_path(exp_name, &original));
    }

    Ok(config)
}

/// `experiments/<exp>/<dir>`, keeping only the normal components
/// of `dir` so the result always stays inside the experiment.
pub fn experiment_path(exp_name: &str, dir: &str) -> String {
    let mut parts = vec![EXPERIMENTS_DIR.to_string(), exp_name.to_string()];
    parts.extend(Path::new(dir).components().filter_map(|c| match c {
        Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
        _ => None,
    }));
    parts.join("/")
}

fn string_list(items: Vec<String>) -> Value {
    Value::Sequence(items.into_iter().map(Value::String).collect())
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
