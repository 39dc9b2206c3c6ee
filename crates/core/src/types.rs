//! Core data types for the tumor-trial analysis pipeline.

use serde::{Deserialize, Serialize};

/// Unique mouse identifier (study subject key).
pub type SubjectId = String;

/// Study day of a measurement (non-negative).
pub type Timepoint = u32;

/// Tumor volume in cubic millimeters.
pub type VolumeMm3 = f64;

/// Subject sex recorded in the study metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    Male,
    Female,
}

/// One row of the subject metadata table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectRecord {
    /// Subject identifier.
    pub subject_id: SubjectId,
    /// Subject sex.
    pub sex: Sex,
    /// Initial body weight in grams.
    pub weight_g: f64,
    /// Assigned treatment regimen.
    pub regimen: String,
}

/// One row of the study-results table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeasurementRecord {
    /// Subject identifier (foreign key into the metadata table).
    pub subject_id: SubjectId,
    /// Study day of the measurement.
    pub timepoint: Timepoint,
    /// Measured tumor volume (mm3).
    pub tumor_volume_mm3: VolumeMm3,
    /// Number of metastatic sites observed.
    pub metastatic_sites: u32,
}

/// A measurement joined with its subject's metadata attributes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Observation {
    /// Original measurement.
    pub measurement: MeasurementRecord,
    /// Subject sex.
    pub sex: Sex,
    /// Initial body weight in grams.
    pub weight_g: f64,
    /// Assigned treatment regimen.
    pub regimen: String,
}

impl Observation {
    /// Subject identifier of the underlying measurement.
    #[inline]
    pub fn subject_id(&self) -> &str {
        &self.measurement.subject_id
    }

    /// Study day of the underlying measurement.
    #[inline]
    pub fn timepoint(&self) -> Timepoint {
        self.measurement.timepoint
    }

    /// Measured tumor volume (mm3).
    #[inline]
    pub fn tumor_volume(&self) -> VolumeMm3 {
        self.measurement.tumor_volume_mm3
    }

    /// Uniqueness key of the cleaned dataset: (subject, timepoint).
    #[inline]
    pub fn key(&self) -> (&str, Timepoint) {
        (self.subject_id(), self.timepoint())
    }
}

/// Descriptive statistics of tumor volume for one regimen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryRow {
    /// Treatment regimen label.
    pub regimen: String,
    /// Number of observations in the group.
    pub n: usize,
    /// Arithmetic mean.
    pub mean: f64,
    /// 50th percentile (linear interpolation).
    pub median: f64,
    /// Sample variance (n - 1 denominator). NaN when n == 1.
    pub variance: f64,
    /// Sample standard deviation. NaN when n == 1.
    pub std_dev: f64,
    /// Standard error of the mean (std_dev / sqrt(n)). NaN when n == 1.
    pub sem: f64,
}

/// Quartile fences and flagged values for one sample.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutlierSummary {
    /// First quartile (25th percentile).
    pub quartile1: f64,
    /// Third quartile (75th percentile).
    pub quartile3: f64,
    /// Interquartile range (Q3 - Q1).
    pub iqr: f64,
    /// Lower fence (Q1 - k * IQR).
    pub lower_bound: f64,
    /// Upper fence (Q3 + k * IQR).
    pub upper_bound: f64,
    /// Sample values strictly outside the fences, in sample order.
    pub outliers: Vec<f64>,
}

impl OutlierSummary {
    /// Whether a value lies strictly outside the fences.
    #[inline]
    pub fn is_outlier(&self, value: f64) -> bool {
        value < self.lower_bound || value > self.upper_bound
    }
}

/// Least-squares fit of y on x.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegressionSummary {
    /// Fitted slope.
    pub slope: f64,
    /// Fitted intercept.
    pub intercept: f64,
    /// Pearson correlation coefficient.
    pub r_value: f64,
    /// Two-sided p-value of the slope-is-zero t-test. NaN when n == 2.
    pub p_value: f64,
    /// Standard error of the slope estimate. NaN when n == 2.
    pub std_err: f64,
    /// Number of points in the fit.
    pub n: usize,
}

impl RegressionSummary {
    /// Evaluate the fitted line at x.
    #[inline]
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Unique-subject counts by sex.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SexDistribution {
    /// Unique male subjects.
    pub male: usize,
    /// Unique female subjects.
    pub female: usize,
}

impl SexDistribution {
    /// Total unique subjects counted.
    #[inline]
    pub fn total(&self) -> usize {
        self.male + self.female
    }

    /// Record one subject of the given sex.
    pub fn record(&mut self, sex: Sex) {
        match sex {
            Sex::Male => self.male += 1,
            Sex::Female => self.female += 1,
        }
    }
}

/// Observation count for one regimen (bar-chart table row).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegimenCount {
    /// Treatment regimen label.
    pub regimen: String,
    /// Number of observations recorded under the regimen.
    pub observations: usize,
}

/// One point of a subject's tumor-volume trajectory.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SeriesPoint {
    /// Study day.
    pub timepoint: Timepoint,
    /// Tumor volume at the timepoint (mm3).
    pub tumor_volume_mm3: VolumeMm3,
}

/// Tumor-volume trajectory of a single subject (line-plot table).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectSeries {
    /// Subject identifier.
    pub subject_id: SubjectId,
    /// Regimen the subject was treated with.
    pub regimen: String,
    /// Trajectory points sorted by timepoint.
    pub points: Vec<SeriesPoint>,
}

/// Weight vs. mean tumor volume for one subject (scatter-plot table row).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightVolumePoint {
    /// Subject identifier.
    pub subject_id: SubjectId,
    /// Initial body weight in grams.
    pub weight_g: f64,
    /// Mean tumor volume across the subject's observations (mm3).
    pub avg_tumor_volume_mm3: f64,
}
