// ============================================================
// Layer 4 — Symbol Collator
// ============================================================
// Builds the two vocabularies the external trainer needs:
//   - text_symbols:    every character seen in any word
//   - phoneme_symbols: every phoneme token seen in any entry
//
// Both are pooled across ALL languages, not per language.
// BTreeSet keeps them sorted so the derived config is stable
// from one run to the next.

use std::collections::BTreeSet;

use crate::domain::entry::LanguageBundle;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolInventory {
    pub graphemes: BTreeSet<String>,
    pub phonemes:  BTreeSet<String>,
}

impl SymbolInventory {
    pub fn grapheme_list(&self) -> Vec<String> {
        self.graphemes.iter().cloned().collect()
    }

    pub fn phoneme_list(&self) -> Vec<String> {
        self.phonemes.iter().cloned().collect()
    }
}

/// Collect the union of graphemes and phonemes over every bundle.
pub fn collate_symbols(bundles: &[LanguageBundle]) -> SymbolInventory {
    let mut inventory = SymbolInventory::default();

    for entry in bundles.iter().flat_map(|b| b.entries.iter()) {
        // chars() yields Unicode scalar values, one grapheme each
        inventory
            .graphemes
            .extend(entry.word.chars().map(|c| c.to_string()));
        inventory.phonemes.extend(entry.phonemes.iter().cloned());
    }

    inventory
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entry::DictionaryEntry;

    fn bundle(name: &str, rows: &[(&str, &str)]) -> LanguageBundle {
        let entries = rows
            .iter()
            .map(|(w, p)| {
                DictionaryEntry::new(*w, p.split_whitespace().map(String::from).collect())
                    .tagged(name)
            })
            .collect();
        LanguageBundle::new(name, entries)
    }

    #[test]
    fn test_union_across_languages() {
        let bundles = vec![
            bundle("en", &[("ab", "x y")]),
            bundle("de", &[("bä", "y z")]),
        ];
        let inv = collate_symbols(&bundles);
        assert_eq!(inv.grapheme_list(), vec!["a", "b", "ä"]);
        assert_eq!(inv.phoneme_list(), vec!["x", "y", "z"]);
    }

    #[test]
    fn test_idempotent_on_same_input() {
        let bundles = vec![bundle("en", &[("hello", "h ə l oʊ"), ("hi", "h aɪ")])];
        assert_eq!(collate_symbols(&bundles), collate_symbols(&bundles));
    }

    #[test]
    fn test_no_duplicates() {
        let bundles = vec![bundle("en", &[("aaa", "p p p")])];
        let inv = collate_symbols(&bundles);
        assert_eq!(inv.graphemes.len(), 1);
        assert_eq!(inv.phonemes.len(), 1);
    }

    #[test]
    fn test_empty_input() {
        let inv = collate_symbols(&[]);
        assert!(inv.graphemes.is_empty());
        assert!(inv.phonemes.is_empty());
    }
}
