//! Per-regimen descriptive statistics of tumor volume.

use std::collections::BTreeMap;

use trial_core::{Observation, Result, SummaryRow};

use crate::quantile;

/// Summarize tumor volume per treatment regimen.
///
/// Produces one row per distinct regimen, sorted by regimen label.
/// Statistics: arithmetic mean, median (linear interpolation), sample
/// variance (n - 1 denominator), standard deviation, and SEM computed
/// as std_dev / sqrt(n), exactly that formula and not a library
/// variant. A group of size 1 reports NaN for variance, standard
/// deviation and SEM (the n - 1 denominator is undefined there).
pub fn summarize(observations: &[Observation]) -> Result<Vec<SummaryRow>> {
    let mut groups: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for obs in observations {
        groups
            .entry(obs.regimen.as_str())
            .or_default()
            .push(obs.tumor_volume());
    }

    let mut rows = Vec::with_capacity(groups.len());
    for (regimen, values) in groups {
        let n = values.len();
        let mean = values.iter().sum::<f64>() / n as f64;
        let median = quantile::median(&values)?;
        let variance = sample_variance(&values, mean);
        let std_dev = variance.sqrt();
        let sem = std_dev / (n as f64).sqrt();

        rows.push(SummaryRow {
            regimen: regimen.to_string(),
            n,
            mean,
            median,
            variance,
            std_dev,
            sem,
        });
    }

    Ok(rows)
}

/// Sample variance with n - 1 denominator. NaN when n < 2.
fn sample_variance(values: &[f64], mean: f64) -> f64 {
    let n = values.len();
    if n < 2 {
        return f64::NAN;
    }
    values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n as f64 - 1.0)
}
