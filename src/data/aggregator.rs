// ============================================================
// Layer 4 — Language Aggregator
// ============================================================
// Walks the linguistic manifest in declaration order and loads
// every dictionary of every language:
//
//   manifest.languages
//       │
//       ├── en_us: [cmudict, extra] ──► read ──► concat ──► tag "en_us"
//       └── de:    [wiktionary]     ──► read ──────────────► tag "de"
//
// Dictionaries within a language are concatenated as-is; words
// listed twice stay listed twice.

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;

use crate::data::dictionary::read_dictionary;
use crate::domain::entry::LanguageBundle;
use crate::domain::manifest::LinguisticManifest;

/// Load one bundle per manifest language.
pub fn process_languages(manifest: &LinguisticManifest) -> Result<Vec<LanguageBundle>> {
    let linguistic_path = Path::new(&manifest.linguistic_path);
    let mut bundles     = Vec::with_capacity(manifest.languages.len());

    let bar = progress_bar(manifest.languages.len() as u64);

    for language in &manifest.languages {
        bar.set_message(format!("Loading {}", language.name));

        let mut entries = Vec::new();
        for dict_id in &language.dictionaries {
            let words = read_dictionary(dict_id, linguistic_path, &language.name)?;
            entries.extend(words.into_iter().map(|w| w.tagged(language.name.as_str())));
        }

        tracing::debug!(
            "Language '{}': {} entries from {} dictionaries",
            language.name,
            entries.len(),
            language.dictionaries.len()
        );
        let bundle = LanguageBundle::new(language.name.as_str(), entries);
        if bundle.is_empty() {
            tracing::warn!("Language '{}' has no dictionary entries", bundle.name);
        }
        bundles.push(bundle);
        bar.inc(1);
    }

    bar.finish_and_clear();
    Ok(bundles)
}

/// Language names in bundle order
pub fn language_names(bundles: &[LanguageBundle]) -> Vec<String> {
    bundles.iter().map(|b| b.name.clone()).collect()
}

/// Shared progress bar style for per-language loops.
pub(crate) fn progress_bar(len: u64) -> ProgressBar {
    let bar = ProgressBar::new(len);
    if let Ok(style) = ProgressStyle::with_template("{msg} [{bar:30}] {pos}/{len}") {
        bar.set_style(style.progress_chars("=> "));
    }
    bar
}
