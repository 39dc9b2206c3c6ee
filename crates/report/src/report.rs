//! Full study report assembly.
//!
//! One pass over the two raw record sets produces every typed output
//! the presentation layer consumes: the cleaned dataset, summary
//! statistics, outlier screens, endpoint volumes, focus tables and the
//! weight/volume regression.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use trial_analysis::{detect_outliers, final_observations, final_volumes, linear_fit, summarize};
use trial_core::{
    Config, MeasurementRecord, Observation, OutlierSummary, RegimenCount, RegressionSummary,
    Result, SexDistribution, SubjectId, SubjectRecord, SubjectSeries, SummaryRow, VolumeMm3,
    WeightVolumePoint,
};
use trial_ingestion::{
    clean, find_duplicate_subjects, join_records, unique_subject_count, CleanStats, JoinStats,
};

use crate::tables;

/// A per-regimen computation that failed without aborting the rest of
/// the report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupFailure {
    /// Regimen whose computation failed.
    pub regimen: String,
    /// Failure description.
    pub reason: String,
}

/// Every derived output of one study analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudyReport {
    /// Join statistics (dropped rows are counted, not errors).
    pub join_stats: JoinStats,
    /// Cleaning statistics.
    pub clean_stats: CleanStats,
    /// Subjects that violated the (subject, timepoint) uniqueness
    /// constraint before cleaning.
    pub duplicate_subjects: Vec<SubjectId>,
    /// The cleaned observation collection.
    pub observations: Vec<Observation>,
    /// Unique subjects in the joined dataset, before cleaning.
    pub subjects_before_cleaning: usize,
    /// Unique subjects in the cleaned dataset.
    pub subjects_after_cleaning: usize,
    /// Descriptive statistics per regimen, sorted by regimen label.
    pub summary: Vec<SummaryRow>,
    /// Observation counts per regimen, sorted descending.
    pub regimen_counts: Vec<RegimenCount>,
    /// Unique-subject counts by sex.
    pub sex_distribution: SexDistribution,
    /// Final tumor volume per subject.
    pub final_volumes: BTreeMap<SubjectId, VolumeMm3>,
    /// Outlier screen of final volumes per configured treatment.
    pub outliers: BTreeMap<String, OutlierSummary>,
    /// Treatments whose outlier screen failed (e.g., no subjects).
    pub outlier_failures: Vec<GroupFailure>,
    /// Trajectory of the configured focus subject, if present.
    pub focus_series: Option<SubjectSeries>,
    /// Weight vs. mean volume per subject of the focus regimen.
    pub weight_volume: Vec<WeightVolumePoint>,
    /// Least-squares fit of mean volume on weight for the focus regimen.
    pub regression: RegressionSummary,
}

/// Assembles a [`StudyReport`] from raw record sets.
pub struct ReportBuilder {
    config: Config,
}

impl ReportBuilder {
    /// Create a builder with the given configuration.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Run the full pipeline: join, clean, aggregate, screen, fit.
    ///
    /// Outlier screens are isolated per treatment: one failing group is
    /// recorded in `outlier_failures` and the others still compute. The
    /// regression over the focus regimen is not isolated; too few
    /// subjects there fails the build with a typed error.
    pub fn build(
        &self,
        subjects: &[SubjectRecord],
        measurements: &[MeasurementRecord],
    ) -> Result<StudyReport> {
        let (joined, join_stats) = join_records(measurements, subjects);
        let duplicate_subjects = find_duplicate_subjects(&joined);
        let subjects_before_cleaning = unique_subject_count(&joined);

        let (observations, clean_stats) =
            clean(&joined, &self.config.cleaning.excluded_subjects);
        let subjects_after_cleaning = unique_subject_count(&observations);

        let summary = summarize(&observations)?;
        let regimen_counts = tables::regimen_observation_counts(&observations);
        let sex_distribution = tables::sex_distribution(&observations);

        let finals = final_observations(&observations);
        let final_volumes = final_volumes(&observations)?;

        let mut outliers = BTreeMap::new();
        let mut outlier_failures = Vec::new();
        for treatment in &self.config.outliers.treatments {
            let sample: Vec<f64> = finals
                .iter()
                .filter(|o| o.regimen == *treatment)
                .map(|o| o.tumor_volume())
                .collect();
            match detect_outliers(&sample, self.config.outliers.fence_multiplier) {
                Ok(screen) => {
                    outliers.insert(treatment.clone(), screen);
                }
                Err(err) => {
                    tracing::warn!(regimen = %treatment, error = %err, "outlier screen failed");
                    outlier_failures.push(GroupFailure {
                        regimen: treatment.clone(),
                        reason: err.to_string(),
                    });
                }
            }
        }

        let focus_series = tables::subject_series(&observations, &self.config.focus.subject_id);
        let weight_volume =
            tables::weight_vs_avg_volume(&observations, &self.config.focus.regimen);
        let weights: Vec<f64> = weight_volume.iter().map(|p| p.weight_g).collect();
        let volumes: Vec<f64> = weight_volume.iter().map(|p| p.avg_tumor_volume_mm3).collect();
        let regression = linear_fit(&weights, &volumes)?;

        Ok(StudyReport {
            join_stats,
            clean_stats,
            duplicate_subjects,
            observations,
            subjects_before_cleaning,
            subjects_after_cleaning,
            summary,
            regimen_counts,
            sex_distribution,
            final_volumes,
            outliers,
            outlier_failures,
            focus_series,
            weight_volume,
            regression,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trial_core::config::{CleaningConfig, FocusConfig, OutlierConfig};
    use trial_core::Sex;

    fn make_subject(subject_id: &str, sex: Sex, weight_g: f64, regimen: &str) -> SubjectRecord {
        SubjectRecord {
            subject_id: subject_id.to_string(),
            sex,
            weight_g,
            regimen: regimen.to_string(),
        }
    }

    fn make_measurement(subject_id: &str, timepoint: u32, volume: f64) -> MeasurementRecord {
        MeasurementRecord {
            subject_id: subject_id.to_string(),
            timepoint,
            tumor_volume_mm3: volume,
            metastatic_sites: 0,
        }
    }

    fn study_config() -> Config {
        Config {
            cleaning: CleaningConfig {
                excluded_subjects: vec!["g989".to_string()],
            },
            outliers: OutlierConfig {
                fence_multiplier: 1.5,
                // Infubinol has no subjects in the fixture; its screen
                // must fail without taking the others down.
                treatments: vec![
                    "Capomulin".to_string(),
                    "Ramicane".to_string(),
                    "Infubinol".to_string(),
                ],
            },
            focus: FocusConfig {
                regimen: "Capomulin".to_string(),
                subject_id: "c001".to_string(),
            },
        }
    }

    fn study_fixture() -> (Vec<SubjectRecord>, Vec<MeasurementRecord>) {
        let subjects = vec![
            make_subject("c001", Sex::Male, 22.0, "Capomulin"),
            make_subject("c002", Sex::Female, 24.0, "Capomulin"),
            make_subject("c003", Sex::Male, 26.0, "Capomulin"),
            make_subject("r001", Sex::Female, 23.0, "Ramicane"),
            make_subject("g989", Sex::Female, 26.0, "Propriva"),
        ];
        let measurements = vec![
            make_measurement("c001", 0, 45.0),
            make_measurement("c001", 10, 43.0),
            make_measurement("c002", 0, 46.0),
            make_measurement("c002", 10, 45.0),
            make_measurement("c003", 0, 47.0),
            make_measurement("c003", 10, 48.0),
            make_measurement("r001", 0, 45.0),
            make_measurement("g989", 0, 45.0),
            make_measurement("g989", 0, 45.3), // Duplicate key
            make_measurement("g989", 5, 46.0),
            make_measurement("none", 0, 45.0), // No metadata
        ];
        (subjects, measurements)
    }

    #[test]
    fn test_full_report() {
        let (subjects, measurements) = study_fixture();
        let report = ReportBuilder::new(study_config())
            .build(&subjects, &measurements)
            .unwrap();

        // Join dropped the orphan measurement.
        assert_eq!(report.join_stats.unmatched_measurements, 1);
        assert_eq!(report.join_stats.matched_rows, 10);

        // The duplicate violator was detected and then excluded.
        assert_eq!(report.duplicate_subjects, vec!["g989".to_string()]);
        assert_eq!(report.subjects_before_cleaning, 5);
        assert_eq!(report.subjects_after_cleaning, 4);
        assert_eq!(report.clean_stats.excluded_rows, 3);

        // Post-condition: retained keys are unique.
        let mut keys: Vec<_> = report.observations.iter().map(|o| o.key()).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), report.observations.len());

        // Summary rows are sorted by regimen.
        let labels: Vec<_> = report.summary.iter().map(|r| r.regimen.as_str()).collect();
        assert_eq!(labels, vec!["Capomulin", "Ramicane"]);
        let capomulin = &report.summary[0];
        assert_eq!(capomulin.n, 6);
        assert!((capomulin.mean - 45.666666666666664).abs() < 1e-9);

        // Bar-chart counts descending.
        assert_eq!(report.regimen_counts[0].regimen, "Capomulin");
        assert_eq!(report.regimen_counts[0].observations, 6);
        assert_eq!(report.regimen_counts[1].observations, 1);

        // Unique subjects by sex (post-cleaning: g989 is gone).
        assert_eq!(report.sex_distribution.male, 2);
        assert_eq!(report.sex_distribution.female, 2);

        // Endpoints.
        assert!((report.final_volumes["c001"] - 43.0).abs() < 1e-10);
        assert!((report.final_volumes["r001"] - 45.0).abs() < 1e-10);

        // Outlier screens: two computed, one isolated failure.
        assert!(report.outliers.contains_key("Capomulin"));
        assert!(report.outliers.contains_key("Ramicane"));
        assert_eq!(report.outlier_failures.len(), 1);
        assert_eq!(report.outlier_failures[0].regimen, "Infubinol");

        // Focus tables.
        let series = report.focus_series.as_ref().unwrap();
        assert_eq!(series.subject_id, "c001");
        assert_eq!(series.points.len(), 2);
        assert_eq!(report.weight_volume.len(), 3);

        // Regression over (22, 44), (24, 45.5), (26, 47.5): positive
        // slope, strong correlation.
        assert!(report.regression.slope > 0.0);
        assert!(report.regression.r_value > 0.9);
        assert_eq!(report.regression.n, 3);
    }

    #[test]
    fn test_report_serializes_to_json() {
        let (subjects, measurements) = study_fixture();
        let report = ReportBuilder::new(study_config())
            .build(&subjects, &measurements)
            .unwrap();

        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("Capomulin"));
    }

    #[test]
    fn test_missing_focus_subject_is_tolerated() {
        let (subjects, measurements) = study_fixture();
        let mut config = study_config();
        config.focus.subject_id = "zz99".to_string();

        let report = ReportBuilder::new(config)
            .build(&subjects, &measurements)
            .unwrap();
        assert!(report.focus_series.is_none());
    }
}
