//! Statistical analysis for the tumor-trial pipeline.
//!
//! This crate handles:
//! - Per-regimen descriptive statistics (aggregation)
//! - Final-timepoint (endpoint) extraction
//! - Quartile-fence outlier detection
//! - Linear regression and Pearson correlation

pub mod endpoints;
pub mod outliers;
pub mod quantile;
pub mod regression;
pub mod summary;

pub use endpoints::{final_observations, final_volumes};
pub use outliers::detect_outliers;
pub use quantile::{median, quantile};
pub use regression::{correlation, linear_fit};
pub use summary::summarize;
