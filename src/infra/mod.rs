// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Files, directories, and child processes:
//
//   config_store.rs   — YAML config documents: load, query, save
//
//   yaml_writer.rs    — renders documents back to YAML with the
//                       quoting the external trainer expects
//
//   experiment.rs     — experiments/<exp>/ and artifacts/ layout
//
//   dataset_store.rs  — training/validation sets as TSV files
//
//   python_bridge.rs  — runs the external phonemizer library in
//                       a Python child process
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §9 (Error Handling with anyhow)

/// Ordered YAML config documents
pub mod config_store;

/// YAML rendering with explicit quoting
pub mod yaml_writer;

/// Experiment directory layout
pub mod experiment;

/// Training/validation TSV files
pub mod dataset_store;

/// External library bridge
pub mod python_bridge;
