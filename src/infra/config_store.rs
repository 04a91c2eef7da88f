// ============================================================
// Layer 6 — Config Store
// ============================================================
// Loads YAML configuration files into an ordered document and
// writes them back out.
//
// The master config is an open-ended YAML mapping owned by the
// external trainer. Only a few keys matter here:
//
//   preprocessing:        ← receives text/phoneme symbols + languages
//   paths:
//     checkpoint_dir: ... ← rewritten under experiments/<exp>/
//     data_dir: ...       ← rewritten under experiments/<exp>/
//   validation:           ← consumed by the splitter, then dropped
//     validation_minimum / validation_maximum / validation_percentage
//
// Everything else passes through untouched, in its original
// key order (serde_yaml's Mapping preserves insertion order).
//
// Paths can be marked "single-quoted": every string under them
// is written as a '...' scalar so symbols such as `'`, `:` or
// `-` reload as exactly the same strings.
//
// Reference: serde_yaml crate documentation
//            Rust Book §9 (Error Handling)

use anyhow::{Context, Result};
use serde_yaml::{Mapping, Value};
use std::{collections::BTreeSet, fs, path::Path};

use crate::domain::error::PrepError;
use crate::domain::split::ValidationSettings;
use crate::infra::yaml_writer;

/// An ordered YAML mapping plus output quoting hints.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigDocument {
    root:          Mapping,
    single_quoted: BTreeSet<Vec<String>>,
}

impl ConfigDocument {
    pub fn new(root: Mapping) -> Self {
        Self {
            root,
            single_quoted: BTreeSet::new(),
        }
    }

    /// Read and parse a YAML file whose top level is a mapping.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Cannot read config '{}'", path.display()))?;
        Self::from_yaml_str(&text)
            .with_context(|| format!("Cannot parse config '{}'", path.display()))
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        match serde_yaml::from_str::<Value>(text)? {
            Value::Mapping(root) => Ok(Self::new(root)),
            // an empty file
            Value::Null => Ok(Self::new(Mapping::new())),
            other => anyhow::bail!("top level of a config must be a mapping, found {other:?}"),
        }
    }

    pub fn root(&self) -> &Mapping {
        &self.root
    }

    /// Follow a key path, e.g. `["paths", "data_dir"]`.
    pub fn get(&self, path: &[&str]) -> Option<&Value> {
        let (first, rest) = path.split_first()?;
        let mut node = self.root.get(*first)?;
        for key in rest {
            node = node.get(*key)?;
        }
        Some(node)
    }

    pub fn get_mut(&mut self, path: &[&str]) -> Option<&mut Value> {
        let (first, rest) = path.split_first()?;
        let mut node = self.root.get_mut(*first)?;
        for key in rest {
            node = node.get_mut(*key)?;
        }
        Some(node)
    }

    /// Like `get`, but a missing key is a `MissingKey` error.
    pub fn require(&self, path: &[&str]) -> Result<&Value, PrepError> {
        self.get(path)
            .ok_or_else(|| PrepError::MissingKey(path.join(".")))
    }

    /// The mapping at `path`, which must exist and be a mapping.
    pub fn require_mapping_mut(&mut self, path: &[&str]) -> Result<&mut Mapping, PrepError> {
        self.get_mut(path)
            .and_then(Value::as_mapping_mut)
            .ok_or_else(|| PrepError::MissingKey(path.join(".")))
    }

    /// Remove a top-level key, keeping the order of the others.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.root.shift_remove(key)
    }

    /// The `validation` block. Each of its three keys is required.
    pub fn validation_settings(&self) -> Result<ValidationSettings> {
        for key in ["validation_minimum", "validation_maximum", "validation_percentage"] {
            self.require(&["validation", key])?;
        }
        let block = self.require(&["validation"])?.clone();
        serde_yaml::from_value(block).context("Invalid 'validation' block")
    }

    /// Write every string at or below `path` as a single-quoted scalar.
    pub fn mark_single_quoted(&mut self, path: &[&str]) {
        self.single_quoted
            .insert(path.iter().map(|k| k.to_string()).collect());
    }

    /// True when `path` is at or below a single-quoted path
    pub fn is_single_quoted(&self, path: &[String]) -> bool {
        self.single_quoted
            .iter()
            .any(|marked| path.starts_with(marked))
    }

    pub fn to_yaml_string(&self) -> Result<String> {
        yaml_writer::render(self)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let yaml = self.to_yaml_string()?;
        fs::write(path, yaml)
            .with_context(|| format!("Cannot write config to '{}'", path.display()))?;
        tracing::debug!("Saved config to '{}'", path.display());
        Ok(())
    }
}
