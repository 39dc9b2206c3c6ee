//! Shared quantile computation.
//!
//! Linear interpolation between order statistics. Both the aggregator's
//! median and the outlier detector's quartiles go through this routine
//! so the two stay consistent.

use ordered_float::OrderedFloat;
use trial_core::{Error, Result};

/// Compute the q-th quantile (q in [0, 1]) of a sample.
///
/// The sample is sorted internally; the quantile position is
/// q * (n - 1), with fractional positions blending the two neighboring
/// order statistics linearly. Empty samples are an `EmptySample` error.
pub fn quantile(values: &[f64], q: f64) -> Result<f64> {
    if values.is_empty() {
        return Err(Error::empty_sample("quantile of empty sample"));
    }
    if !(0.0..=1.0).contains(&q) {
        return Err(Error::config(format!("quantile {q} outside [0, 1]")));
    }

    let mut sorted = values.to_vec();
    sorted.sort_by_key(|v| OrderedFloat(*v));

    Ok(interpolate(&sorted, q))
}

/// 50th percentile.
pub fn median(values: &[f64]) -> Result<f64> {
    quantile(values, 0.5)
}

fn interpolate(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        sorted[lo] + (pos - lo as f64) * (sorted[hi] - sorted[lo])
    }
}
