//! Inner join of study measurements with subject metadata.
//!
//! Matches measurements to subject attribute sets on the subject
//! identifier. Rows without a match on either side are dropped and
//! counted.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use trial_core::{MeasurementRecord, Observation, SubjectRecord};

/// Statistics about a join pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JoinStats {
    /// Observations produced by the join.
    pub matched_rows: usize,
    /// Measurements dropped for lack of a metadata match.
    pub unmatched_measurements: usize,
    /// Metadata rows that matched no measurement.
    pub unmatched_subjects: usize,
}

impl JoinStats {
    /// Whether any input row was dropped by the join.
    pub fn has_drops(&self) -> bool {
        self.unmatched_measurements > 0 || self.unmatched_subjects > 0
    }
}

/// Join measurements with subject metadata on the subject identifier.
///
/// Inner join semantics: measurements without a metadata match and
/// metadata rows without any measurement are dropped (and counted in
/// the returned stats). Output preserves measurement input order. A
/// subject identifier duplicated in the metadata expands each of its
/// measurements once per metadata row, in metadata order; this mirrors
/// the upstream data and is not corrected here.
pub fn join_records(
    measurements: &[MeasurementRecord],
    subjects: &[SubjectRecord],
) -> (Vec<Observation>, JoinStats) {
    let mut by_subject: HashMap<&str, Vec<&SubjectRecord>> = HashMap::new();
    for subject in subjects {
        by_subject
            .entry(subject.subject_id.as_str())
            .or_default()
            .push(subject);
    }

    let mut observations = Vec::with_capacity(measurements.len());
    let mut matched_ids: HashSet<&str> = HashSet::new();
    let mut stats = JoinStats::default();

    for measurement in measurements {
        match by_subject.get(measurement.subject_id.as_str()) {
            Some(matches) => {
                matched_ids.insert(measurement.subject_id.as_str());
                for subject in matches {
                    observations.push(Observation {
                        measurement: measurement.clone(),
                        sex: subject.sex,
                        weight_g: subject.weight_g,
                        regimen: subject.regimen.clone(),
                    });
                }
            }
            None => stats.unmatched_measurements += 1,
        }
    }

    stats.matched_rows = observations.len();
    stats.unmatched_subjects = subjects
        .iter()
        .filter(|s| !matched_ids.contains(s.subject_id.as_str()))
        .count();

    if stats.unmatched_measurements > 0 {
        tracing::warn!(
            dropped = stats.unmatched_measurements,
            "measurements without metadata match dropped by join"
        );
    }
    tracing::debug!(
        matched = stats.matched_rows,
        unmatched_subjects = stats.unmatched_subjects,
        "join complete"
    );

    (observations, stats)
}
