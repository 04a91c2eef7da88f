// ============================================================
// Layer 3 — Dictionary Entry Domain Types
// ============================================================
// A pronunciation dictionary row is a word and the ordered
// phoneme tokens that pronounce it:
//
//   hello	h ə l oʊ
//   ─────	────────
//   word	phonemes (space separated)
//
// Once rows are grouped per language they are tagged with the
// language name; the external trainer receives every language
// in one training set.
//
// Reference: Rust Book §5 (Structs and Methods)

use serde::{Deserialize, Serialize};

/// One row of a pronunciation dictionary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryEntry {
    /// The written form, split into graphemes later on
    pub word: String,

    /// Pronunciation as discrete phoneme tokens, in order
    pub phonemes: Vec<String>,
}

impl DictionaryEntry {
    pub fn new(word: impl Into<String>, phonemes: Vec<String>) -> Self {
        Self {
            word: word.into(),
            phonemes,
        }
    }

    /// Attach the language this entry belongs to
    pub fn tagged(self, language: impl Into<String>) -> TaggedEntry {
        TaggedEntry {
            language: language.into(),
            word:     self.word,
            phonemes: self.phonemes,
        }
    }
}

/// A dictionary entry that knows its language.
/// This is the unit that lands in the training or validation set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedEntry {
    pub language: String,
    pub word:     String,
    pub phonemes: Vec<String>,
}

/// Every entry loaded for one language, in dictionary order.
///
/// The split builder drains entries out of the bundle into the
/// validation set, so an entry is never in both sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageBundle {
    pub entries: Vec<TaggedEntry>,
    pub name:    String,
}

impl LanguageBundle {
    pub fn new(name: impl Into<String>, entries: Vec<TaggedEntry>) -> Self {
        Self {
            entries,
            name: name.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tagged_keeps_word_and_phonemes() {
        let entry  = DictionaryEntry::new("cat", vec!["k".into(), "æ".into(), "t".into()]);
        let tagged = entry.tagged("en_us");
        assert_eq!(tagged.language, "en_us");
        assert_eq!(tagged.word, "cat");
        assert_eq!(tagged.phonemes, vec!["k", "æ", "t"]);
    }
}
