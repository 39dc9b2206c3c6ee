//! Chart-ready derived tables.
//!
//! Each function recomputes its table from a cleaned observation
//! collection; the presentation layer renders them as-is.

use std::collections::{BTreeMap, HashSet};

use trial_core::{
    Observation, RegimenCount, SeriesPoint, SexDistribution, SubjectSeries, WeightVolumePoint,
};

/// Observation counts per regimen, sorted descending by count.
///
/// Ties break ascending by regimen label.
pub fn regimen_observation_counts(observations: &[Observation]) -> Vec<RegimenCount> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for obs in observations {
        *counts.entry(obs.regimen.as_str()).or_default() += 1;
    }

    let mut rows: Vec<RegimenCount> = counts
        .into_iter()
        .map(|(regimen, observations)| RegimenCount {
            regimen: regimen.to_string(),
            observations,
        })
        .collect();
    // BTreeMap iteration gives label order; the stable sort keeps it
    // for equal counts.
    rows.sort_by(|a, b| b.observations.cmp(&a.observations));
    rows
}

/// Unique-subject counts by sex.
///
/// Each subject is counted once, regardless of how many observations
/// it has.
pub fn sex_distribution(observations: &[Observation]) -> SexDistribution {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut dist = SexDistribution::default();

    for obs in observations {
        if seen.insert(obs.subject_id()) {
            dist.record(obs.sex);
        }
    }

    dist
}

/// Tumor-volume trajectory of one subject, points sorted by timepoint.
///
/// Returns `None` when the subject has no observations.
pub fn subject_series(observations: &[Observation], subject_id: &str) -> Option<SubjectSeries> {
    let mut points = Vec::new();
    let mut regimen = None;

    for obs in observations {
        if obs.subject_id() == subject_id {
            regimen.get_or_insert_with(|| obs.regimen.clone());
            points.push(SeriesPoint {
                timepoint: obs.timepoint(),
                tumor_volume_mm3: obs.tumor_volume(),
            });
        }
    }

    let regimen = regimen?;
    points.sort_by_key(|p| p.timepoint);

    Some(SubjectSeries {
        subject_id: subject_id.to_string(),
        regimen,
        points,
    })
}

/// Weight vs. mean tumor volume per subject of one regimen, sorted by
/// subject identifier.
///
/// The weight is taken from the subject's first observation (it is an
/// immutable attribute); the volume is the mean across all of the
/// subject's observations.
pub fn weight_vs_avg_volume(observations: &[Observation], regimen: &str) -> Vec<WeightVolumePoint> {
    let mut per_subject: BTreeMap<&str, (f64, f64, usize)> = BTreeMap::new();

    for obs in observations {
        if obs.regimen != regimen {
            continue;
        }
        let entry = per_subject
            .entry(obs.subject_id())
            .or_insert((obs.weight_g, 0.0, 0));
        entry.1 += obs.tumor_volume();
        entry.2 += 1;
    }

    per_subject
        .into_iter()
        .map(|(subject_id, (weight_g, sum, count))| WeightVolumePoint {
            subject_id: subject_id.to_string(),
            weight_g,
            avg_tumor_volume_mm3: sum / count as f64,
        })
        .collect()
}
