// ============================================================
// Layer 5 — Training / Export Drivers
// ============================================================
// Thin drivers around the external library. No model code
// lives here; the architecture, training loop, and TorchScript
// tracing all run inside the library.
//
//   trainer.rs  — one process or one worker per accelerator
//   exporter.rs — best checkpoint → artifacts/<exp>.pt

/// Sequential vs. spawned training dispatch
pub mod trainer;

/// TorchScript export of the best checkpoint
pub mod exporter;
