//! Duplicate detection and record cleaning.
//!
//! The cleaned dataset must hold at most one observation per
//! (subject, timepoint) pair. Cleaning first drops excluded subjects
//! entirely, then keeps the first-encountered member of every
//! duplicated key group, stable under input order.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use trial_core::{Observation, SubjectId, Timepoint};

/// Statistics about a cleaning pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CleanStats {
    /// Observations given as input.
    pub input_rows: usize,
    /// Observations dropped because their subject was excluded.
    pub excluded_rows: usize,
    /// Observations dropped as later members of a duplicated key group.
    pub duplicate_rows_dropped: usize,
    /// Observations retained.
    pub retained_rows: usize,
}

/// Subjects whose observations violate the (subject, timepoint)
/// uniqueness constraint, in first-violation order.
pub fn find_duplicate_subjects(observations: &[Observation]) -> Vec<SubjectId> {
    let mut seen: HashSet<(&str, Timepoint)> = HashSet::with_capacity(observations.len());
    let mut flagged: HashSet<&str> = HashSet::new();
    let mut duplicates = Vec::new();

    for obs in observations {
        if !seen.insert(obs.key()) && flagged.insert(obs.subject_id()) {
            duplicates.push(obs.subject_id().to_string());
        }
    }

    duplicates
}

/// Clean a joined dataset.
///
/// 1. Remove every observation of a subject listed in
///    `excluded_subjects`, regardless of duplication status.
/// 2. Deduplicate on (subject, timepoint), keeping the first-encountered
///    observation of each group.
///
/// Post-condition: no two retained observations share a key. The input
/// is not mutated; already-clean input comes back identical, so the
/// operation is idempotent.
pub fn clean(
    observations: &[Observation],
    excluded_subjects: &[SubjectId],
) -> (Vec<Observation>, CleanStats) {
    let excluded: HashSet<&str> = excluded_subjects.iter().map(|s| s.as_str()).collect();

    let mut stats = CleanStats {
        input_rows: observations.len(),
        ..CleanStats::default()
    };

    let mut seen: HashSet<(&str, Timepoint)> = HashSet::with_capacity(observations.len());
    let mut retained = Vec::with_capacity(observations.len());

    for obs in observations {
        if excluded.contains(obs.subject_id()) {
            stats.excluded_rows += 1;
            continue;
        }
        if !seen.insert(obs.key()) {
            stats.duplicate_rows_dropped += 1;
            continue;
        }
        retained.push(obs.clone());
    }

    stats.retained_rows = retained.len();
    tracing::debug!(
        input = stats.input_rows,
        excluded = stats.excluded_rows,
        duplicates = stats.duplicate_rows_dropped,
        retained = stats.retained_rows,
        "cleaning complete"
    );

    (retained, stats)
}

/// Number of distinct subjects present in a dataset.
pub fn unique_subject_count(observations: &[Observation]) -> usize {
    observations
        .iter()
        .map(|o| o.subject_id())
        .collect::<HashSet<_>>()
        .len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use trial_core::{MeasurementRecord, Sex};

    fn make_observation(subject_id: &str, timepoint: Timepoint, volume: f64) -> Observation {
        Observation {
            measurement: MeasurementRecord {
                subject_id: subject_id.to_string(),
                timepoint,
                tumor_volume_mm3: volume,
                metastatic_sites: 0,
            },
            sex: Sex::Female,
            weight_g: 26.0,
            regimen: "Propriva".to_string(),
        }
    }

    #[test]
    fn test_find_duplicate_subjects() {
        let observations = vec![
            make_observation("a203", 0, 45.0),
            make_observation("g989", 0, 45.0),
            make_observation("g989", 0, 45.3), // Duplicate key
            make_observation("g989", 5, 48.0),
            make_observation("a203", 5, 46.1),
        ];

        let duplicates = find_duplicate_subjects(&observations);
        assert_eq!(duplicates, vec!["g989".to_string()]);
    }

    #[test]
    fn test_clean_excludes_subject_entirely() {
        let observations = vec![
            make_observation("g989", 0, 45.0),
            make_observation("a203", 0, 45.0),
            make_observation("g989", 5, 47.0), // Not a duplicate, still excluded
        ];

        let (cleaned, stats) = clean(&observations, &["g989".to_string()]);

        assert_eq!(cleaned.len(), 1);
        assert_eq!(cleaned[0].subject_id(), "a203");
        assert_eq!(stats.excluded_rows, 2);
        assert_eq!(stats.duplicate_rows_dropped, 0);
    }

    #[test]
    fn test_clean_keeps_first_of_duplicated_key() {
        let observations = vec![
            make_observation("a203", 0, 45.0),
            make_observation("a203", 0, 99.9),
            make_observation("a203", 5, 46.1),
        ];

        let (cleaned, stats) = clean(&observations, &[]);

        assert_eq!(cleaned.len(), 2);
        assert!((cleaned[0].tumor_volume() - 45.0).abs() < 1e-10); // First kept
        assert_eq!(stats.duplicate_rows_dropped, 1);
    }

    #[test]
    fn test_clean_post_condition_and_idempotence() {
        let observations = vec![
            make_observation("a203", 0, 45.0),
            make_observation("b128", 0, 45.0),
            make_observation("a203", 0, 45.5),
            make_observation("b128", 5, 43.9),
        ];

        let (cleaned, _) = clean(&observations, &[]);

        // No two retained observations share a key.
        let mut keys: Vec<_> = cleaned.iter().map(|o| o.key()).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), cleaned.len());

        // Cleaning an already-clean dataset changes nothing.
        let (recleaned, stats) = clean(&cleaned, &[]);
        assert_eq!(recleaned.len(), cleaned.len());
        assert_eq!(stats.excluded_rows, 0);
        assert_eq!(stats.duplicate_rows_dropped, 0);
        for (a, b) in cleaned.iter().zip(recleaned.iter()) {
            assert_eq!(a.key(), b.key());
            assert!((a.tumor_volume() - b.tumor_volume()).abs() < 1e-10);
        }
    }

    #[test]
    fn test_unique_subject_count() {
        let observations = vec![
            make_observation("a203", 0, 45.0),
            make_observation("a203", 5, 46.0),
            make_observation("b128", 0, 45.0),
        ];
        assert_eq!(unique_subject_count(&observations), 2);
    }
}
