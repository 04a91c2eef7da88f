// ============================================================
// Layer 3 — Validation Settings and Dataset Split
// ============================================================
// The master config carries a `validation` block:
//
//   validation:
//     validation_minimum: 5
//     validation_maximum: 50
//     validation_percentage: 0.2
//
// For each language the split builder takes
//   round(entries * percentage), clamped to [minimum, maximum]
// entries for validation, and the rest for training.

use serde::{Deserialize, Serialize};

use crate::domain::entry::TaggedEntry;
use crate::domain::error::PrepError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValidationSettings {
    pub validation_minimum:    usize,
    pub validation_maximum:    usize,
    pub validation_percentage: f64,
}

impl ValidationSettings {
    #[cfg(test)]
    pub fn new(minimum: usize, maximum: usize, percentage: f64) -> Self {
        Self {
            validation_minimum:    minimum,
            validation_maximum:    maximum,
            validation_percentage: percentage,
        }
    }

    /// Reject a percentage that cannot describe a share of entries.
    pub fn check(&self) -> Result<(), PrepError> {
        let p = self.validation_percentage;
        if !p.is_finite() || !(0.0..=1.0).contains(&p) {
            return Err(PrepError::InvalidValidation(format!(
                "validation_percentage must be within [0, 1], got {p}"
            )));
        }
        Ok(())
    }
}

/// The two collections handed to the external preprocess step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DatasetSplit {
    pub training:   Vec<TaggedEntry>,
    pub validation: Vec<TaggedEntry>,
}

impl DatasetSplit {
    pub fn total(&self) -> usize {
        self.training.len() + self.validation.len()
    }

    /// Number of validation entries drawn from `language`
    pub fn validation_count(&self, language: &str) -> usize {
        self.validation.iter().filter(|e| e.language == language).count()
    }

    /// Number of training entries left for `language`
    pub fn training_count(&self, language: &str) -> usize {
        self.training.iter().filter(|e| e.language == language).count()
    }
}
