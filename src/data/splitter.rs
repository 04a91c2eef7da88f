// ============================================================
// Layer 4 — Train/Validation Splitter
// ============================================================
// Splits every language into two sets:
//   - Training set:   fed to the external training loop
//   - Validation set: held out to measure generalisation
//
// Each language gets its own validation count:
//
//     k = round(entries * validation_percentage)
//     k < validation_minimum  → validation_minimum
//     k > validation_maximum  → validation_maximum
//
// Rounding is half-to-even (2.5 → 2, 3.5 → 4).
//
// Sampling draws k entries uniformly without replacement: each
// draw picks a random remaining index and removes it. What is
// left, still in dictionary order, goes to training.
//
// Reference: Rust Book §8 (Vectors)
//            rand crate documentation

use indicatif::ProgressBar;
use rand::Rng;

use crate::data::aggregator::progress_bar;
use crate::domain::entry::LanguageBundle;
use crate::domain::error::PrepError;
use crate::domain::split::{DatasetSplit, ValidationSettings};

/// How many validation entries to draw from a language of `num_entries`.
///
/// # Example
/// ```ignore
/// assert_eq!(get_validation_amount(100, 5, 50, 0.2), 20);
/// assert_eq!(get_validation_amount(10, 5, 50, 0.2), 5);
/// assert_eq!(get_validation_amount(1000, 5, 50, 0.2), 50);
/// ```
pub fn get_validation_amount(
    num_entries:    usize,
    val_min:        usize,
    val_max:        usize,
    val_percentage: f64,
) -> usize {
    let amount = (num_entries as f64 * val_percentage).round_ties_even();
    // a negative product saturates to 0 in the cast
    let amount = amount as usize;

    if amount < val_min {
        val_min
    } else if amount > val_max {
        val_max
    } else {
        amount
    }
}

/// Drain every bundle into a global training and validation set.
///
/// Bundles are consumed: an entry ends up in exactly one set.
pub fn create_sets<R: Rng>(
    bundles:  Vec<LanguageBundle>,
    settings: &ValidationSettings,
    rng:      &mut R,
) -> Result<DatasetSplit, PrepError> {
    settings.check()?;

    tracing::info!(
        "val_minimum: {}, val_max: {}, val_percentage: {}",
        settings.validation_minimum,
        settings.validation_maximum,
        settings.validation_percentage
    );

    let mut split = DatasetSplit::default();
    let bar       = progress_bar(bundles.len() as u64);

    for bundle in bundles {
        bar.set_message(format!("Creating training and validation for {}", bundle.name));
        split_language(bundle, settings, rng, &mut split, &bar)?;
        bar.inc(1);
    }

    bar.finish_and_clear();
    Ok(split)
}

fn split_language<R: Rng>(
    mut bundle: LanguageBundle,
    settings:   &ValidationSettings,
    rng:        &mut R,
    split:      &mut DatasetSplit,
    bar:        &ProgressBar,
) -> Result<(), PrepError> {
    let available = bundle.len();
    let requested = get_validation_amount(
        available,
        settings.validation_minimum,
        settings.validation_maximum,
        settings.validation_percentage,
    );

    if requested > available {
        bar.abandon();
        return Err(PrepError::InsufficientEntries {
            language: bundle.name,
            available,
            requested,
        });
    }

    for _ in 0..requested {
        let index = rng.gen_range(0..bundle.entries.len());
        split.validation.push(bundle.entries.remove(index));
    }

    tracing::debug!(
        "{}: {} validation, {} training",
        bundle.name,
        requested,
        bundle.entries.len()
    );
    split.training.append(&mut bundle.entries);
    Ok(())
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entry::{DictionaryEntry, TaggedEntry};
    use rand::{rngs::StdRng, SeedableRng};
    use std::collections::HashSet;

    fn bundle(name: &str, n: usize) -> LanguageBundle {
        let entries = (0..n)
            .map(|i| DictionaryEntry::new(format!("w{i}"), vec![format!("p{i}")]).tagged(name))
            .collect();
        LanguageBundle::new(name, entries)
    }

    fn key(e: &TaggedEntry) -> (String, String) {
        (e.language.clone(), e.word.clone())
    }

    #[test]
    fn test_validation_amount_in_range() {
        assert_eq!(get_validation_amount(100, 5, 50, 0.2), 20);
    }

    #[test]
    fn test_validation_amount_clamped_up() {
        assert_eq!(get_validation_amount(10, 5, 50, 0.2), 5);
    }

    #[test]
    fn test_validation_amount_clamped_down() {
        assert_eq!(get_validation_amount(1000, 5, 50, 0.2), 50);
    }

    #[test]
    fn test_validation_amount_rounds_half_to_even() {
        // 5 * 0.5 = 2.5 → 2, 7 * 0.5 = 3.5 → 4
        assert_eq!(get_validation_amount(5, 0, 100, 0.5), 2);
        assert_eq!(get_validation_amount(7, 0, 100, 0.5), 4);
    }

    #[test]
    fn test_two_languages_end_to_end_counts() {
        let settings = ValidationSettings::new(2, 20, 0.1);
        let mut rng  = StdRng::seed_from_u64(7);
        let split    = create_sets(vec![bundle("a", 10), bundle("b", 100)], &settings, &mut rng).unwrap();

        assert_eq!(split.validation_count("a"), 2);
        assert_eq!(split.training_count("a"), 8);
        assert_eq!(split.validation_count("b"), 10);
        assert_eq!(split.training_count("b"), 90);
        assert_eq!(split.total(), 110);
    }

    #[test]
    fn test_sets_are_disjoint_and_complete() {
        let settings = ValidationSettings::new(3, 40, 0.3);
        let mut rng  = StdRng::seed_from_u64(1);
        let split    = create_sets(vec![bundle("x", 57), bundle("y", 9)], &settings, &mut rng).unwrap();

        let train: HashSet<_> = split.training.iter().map(key).collect();
        let val:   HashSet<_> = split.validation.iter().map(key).collect();
        assert!(train.is_disjoint(&val));
        assert_eq!(train.len() + val.len(), 66);
    }

    #[test]
    fn test_training_keeps_dictionary_order() {
        let settings = ValidationSettings::new(0, 100, 0.5);
        let mut rng  = StdRng::seed_from_u64(3);
        let split    = create_sets(vec![bundle("x", 20)], &settings, &mut rng).unwrap();

        let idx: Vec<usize> = split
            .training
            .iter()
            .map(|e| e.word[1..].parse().unwrap())
            .collect();
        let mut sorted = idx.clone();
        sorted.sort();
        assert_eq!(idx, sorted);
    }

    #[test]
    fn test_same_seed_same_split() {
        let settings = ValidationSettings::new(1, 10, 0.2);
        let a = create_sets(vec![bundle("x", 30)], &settings, &mut StdRng::seed_from_u64(9)).unwrap();
        let b = create_sets(vec![bundle("x", 30)], &settings, &mut StdRng::seed_from_u64(9)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_minimum_above_population_is_an_error() {
        let settings = ValidationSettings::new(5, 10, 0.1);
        let mut rng  = StdRng::seed_from_u64(0);
        let err      = create_sets(vec![bundle("tiny", 3)], &settings, &mut rng).unwrap_err();
        match err {
            PrepError::InsufficientEntries { language, available, requested } => {
                assert_eq!(language, "tiny");
                assert_eq!(available, 3);
                assert_eq!(requested, 5);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_minimum_equal_to_population_takes_everything() {
        let settings = ValidationSettings::new(4, 10, 0.1);
        let mut rng  = StdRng::seed_from_u64(0);
        let split    = create_sets(vec![bundle("x", 4)], &settings, &mut rng).unwrap();
        assert_eq!(split.validation.len(), 4);
        assert!(split.training.is_empty());
    }

    #[test]
    fn test_bad_percentage_rejected() {
        let settings = ValidationSettings::new(0, 10, 2.0);
        let mut rng  = StdRng::seed_from_u64(0);
        assert!(matches!(
            create_sets(vec![bundle("x", 4)], &settings, &mut rng),
            Err(PrepError::InvalidValidation(_))
        ));
    }
}
