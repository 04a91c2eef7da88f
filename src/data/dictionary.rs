// ============================================================
// Layer 4 — Dictionary Reader
// ============================================================
// Loads one pronunciation dictionary (.tsv) for one language.
//
// File location:
//   <linguistic_path>/<language>/<dictionary id>.tsv
//
// File format (UTF-8, one entry per line):
//   word<TAB>phoneme1 phoneme2 phoneme3
//
// Every row must have exactly two tab-separated fields. A row
// with any other shape aborts the whole run; nothing read so
// far is kept.
//
// Reference: Rust Book §8 (Strings), §9 (Error Handling)

use anyhow::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::domain::entry::DictionaryEntry;
use crate::domain::error::PrepError;

/// Resolve a dictionary identifier to its .tsv path.
pub fn dictionary_path(linguistic_path: &Path, language: &str, dict_id: &str) -> PathBuf {
    linguistic_path
        .join(language)
        .join(format!("{dict_id}.tsv"))
}

/// Read and parse one dictionary file, preserving row order.
pub fn read_dictionary(
    dict_id:         &str,
    linguistic_path: &Path,
    language:        &str,
) -> Result<Vec<DictionaryEntry>> {
    let path = dictionary_path(linguistic_path, language, dict_id);

    let text = fs::read_to_string(&path)
        .with_context(|| format!("Cannot read dictionary '{}'", path.display()))?;

    let entries = parse_dictionary(&text, dict_id, &path)?;
    tracing::debug!(
        "Read {} entries from '{}'",
        entries.len(),
        path.display()
    );
    Ok(entries)
}

/// Parse the text of a dictionary.
///
/// `dict_id` and `path` are only used to report malformed rows.
pub fn parse_dictionary(
    text:    &str,
    dict_id: &str,
    path:    &Path,
) -> Result<Vec<DictionaryEntry>, PrepError> {
    let mut entries = Vec::new();

    // lines() drops the final newline and any trailing \r,
    // so CRLF files parse the same as LF files
    for (index, line) in text.lines().enumerate() {
        let fields: Vec<&str> = if line.is_empty() {
            Vec::new()
        } else {
            line.split('\t').collect()
        };

        match fields.as_slice() {
            [word, phonemes] => {
                let phonemes = phonemes.split_whitespace().map(str::to_string).collect();
                entries.push(DictionaryEntry::new(*word, phonemes));
            }
            _ => {
                return Err(PrepError::MalformedDictionary {
                    dictionary: dict_id.to_string(),
                    path:       path.to_path_buf(),
                    line:       index + 1,
                    fields:     fields.len(),
                });
            }
        }
    }

    Ok(entries)
}
