//! Report assembly for the tumor-trial analysis pipeline.
//!
//! This crate provides:
//! - Chart-ready derived tables (counts, distributions, trajectories)
//! - Full study report assembly with per-group failure isolation

pub mod report;
pub mod tables;

pub use report::{GroupFailure, ReportBuilder, StudyReport};
pub use tables::{
    regimen_observation_counts, sex_distribution, subject_series, weight_vs_avg_volume,
};
