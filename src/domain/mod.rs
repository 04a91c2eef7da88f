// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust structs, enums, and traits that define the core
// concepts of the pipeline:
//
//   entry.rs    — dictionary entries and per-language bundles
//   manifest.rs — the linguistic manifest (languages + dictionaries)
//   split.rs    — validation settings and the train/val split
//   training.rs — how a training run is dispatched
//   error.rs    — the failure taxonomy shared by every layer
//   traits.rs   — seams to the external phonemizer library
//
// Rules for this layer:
//   - NO file I/O or subprocess calls
//   - NO progress bars or printing
//   - Only plain data and the traits other layers implement
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// Dictionary entries, tagged entries, and language bundles
pub mod entry;

// The linguistic manifest parsed from YAML
pub mod manifest;

// Validation settings and dataset split types
pub mod split;

// Training dispatch plan
pub mod training;

// Typed errors for the failure taxonomy
pub mod error;

// Core abstractions (traits) that other layers implement
pub mod traits;
