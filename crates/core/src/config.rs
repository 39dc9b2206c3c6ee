//! Configuration structures for the tumor-trial analysis pipeline.

use serde::{Deserialize, Serialize};

use crate::types::SubjectId;

/// Main configuration for a study analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Record cleaning configuration.
    pub cleaning: CleaningConfig,
    /// Outlier detection configuration.
    pub outliers: OutlierConfig,
    /// Focus selections for single-subject and single-regimen tables.
    pub focus: FocusConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cleaning: CleaningConfig::default(),
            outliers: OutlierConfig::default(),
            focus: FocusConfig::default(),
        }
    }
}

/// Record cleaning configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleaningConfig {
    /// Subjects dropped entirely before deduplication (known
    /// data-integrity violators).
    pub excluded_subjects: Vec<SubjectId>,
}

impl Default for CleaningConfig {
    fn default() -> Self {
        Self {
            excluded_subjects: vec!["g989".to_string()],
        }
    }
}

/// Outlier detection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutlierConfig {
    /// IQR fence multiplier (e.g., 1.5 for the standard Tukey fences).
    pub fence_multiplier: f64,
    /// Regimens whose final-volume distributions are screened for outliers.
    pub treatments: Vec<String>,
}

impl Default for OutlierConfig {
    fn default() -> Self {
        Self {
            fence_multiplier: 1.5,
            treatments: vec![
                "Capomulin".to_string(),
                "Ramicane".to_string(),
                "Infubinol".to_string(),
                "Ceftamin".to_string(),
            ],
        }
    }
}

/// Focus selections for single-subject and single-regimen tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FocusConfig {
    /// Regimen used for the weight vs. volume table and regression.
    pub regimen: String,
    /// Subject whose tumor-volume trajectory is extracted.
    pub subject_id: SubjectId,
}

impl Default for FocusConfig {
    fn default() -> Self {
        Self {
            regimen: "Capomulin".to_string(),
            subject_id: "l509".to_string(),
        }
    }
}
