// ============================================================
// Layer 6 — Dataset Store
// ============================================================
// Writes the training and validation sets to disk so the
// external preprocess step (a separate process) can read them.
//
// One entry per line, tab separated:
//   language<TAB>word<TAB>phoneme1 phoneme2 ...
//
// Example:
//   en_us	hello	h ə l oʊ
//   de	hallo	h a l o
//
// Reference: Rust Book §12 (I/O and File Handling)

use anyhow::{Context, Result};
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use crate::domain::entry::TaggedEntry;

/// Write `entries` to `path`, replacing any existing file.
pub fn write_tagged_entries(path: &Path, entries: &[TaggedEntry]) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Cannot create dataset file '{}'", path.display()))?;
    let mut out = BufWriter::new(file);

    for e in entries {
        writeln!(out, "{}\t{}\t{}", e.language, e.word, e.phonemes.join(" "))?;
    }
    out.flush()?;

    tracing::debug!("Wrote {} entries to '{}'", entries.len(), path.display());
    Ok(())
}

/// Read back a file written by `write_tagged_entries`.
#[cfg(test)]
pub fn read_tagged_entries(path: &Path) -> Result<Vec<TaggedEntry>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read dataset file '{}'", path.display()))?;

    let mut entries = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let fields: Vec<&str> = line.split('\t').collect();
        let [language, word, phonemes] = fields.as_slice() else {
            anyhow::bail!(
                "'{}' line {}: expected 3 tab-separated fields, found {}",
                path.display(),
                index + 1,
                fields.len()
            );
        };
        entries.push(TaggedEntry {
            language: language.to_string(),
            word:     word.to_string(),
            phonemes: phonemes.split_whitespace().map(str::to_string).collect(),
        });
    }
    Ok(entries)
}
