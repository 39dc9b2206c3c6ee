//! Core types and configuration for the tumor-trial analysis pipeline.
//!
//! This crate provides shared types used across all other crates:
//! - Study record types (subjects, measurements, joined observations)
//! - Derived statistics types (summary rows, outlier and regression summaries)
//! - Configuration structures
//! - Common error types

pub mod config;
pub mod error;
pub mod types;

pub use config::Config;
pub use error::{Error, Result};
pub use types::*;
