// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything between the linguistic manifest and the files the
// external trainer reads.
//
// The pipeline flows in this order:
//
//   linguistic manifest
//       │
//       ▼
//   Aggregator         → reads every dictionary, one bundle per language
//       │
//       ├──► Collator   → grapheme + phoneme vocabularies
//       │       │
//       │       ▼
//       │    Synthesizer → experiment config.yaml
//       ▼
//   Splitter           → training / validation sets
//
// Reference: Rust Book §13 (Iterators and Closures)

/// Parses one .tsv pronunciation dictionary
pub mod dictionary;

/// Loads all dictionaries of all manifest languages
pub mod aggregator;

/// Unions graphemes and phonemes across languages
pub mod symbols;

/// Per-language validation sampling
pub mod splitter;

/// Builds the experiment config from the master config
pub mod config_synthesizer;
