//! Quartile-fence outlier detection.

use trial_core::{Error, OutlierSummary, Result};

use crate::quantile::quantile;

/// Detect outliers in a sample using IQR fences.
///
/// Quartiles use the same linear-interpolation rule as the aggregator's
/// median. The fences are Q1 - k * IQR and Q3 + k * IQR where k is
/// `fence_multiplier` (1.5 for the standard Tukey rule); values
/// strictly outside the fences are flagged, in sample order. An empty
/// sample is an `EmptySample` error: its fences would be undefined and
/// must not come back as silent zeros.
pub fn detect_outliers(sample: &[f64], fence_multiplier: f64) -> Result<OutlierSummary> {
    if sample.is_empty() {
        return Err(Error::empty_sample("outlier detection on empty sample"));
    }

    let quartile1 = quantile(sample, 0.25)?;
    let quartile3 = quantile(sample, 0.75)?;
    let iqr = quartile3 - quartile1;
    let lower_bound = quartile1 - fence_multiplier * iqr;
    let upper_bound = quartile3 + fence_multiplier * iqr;

    let outliers = sample
        .iter()
        .copied()
        .filter(|v| *v < lower_bound || *v > upper_bound)
        .collect();

    Ok(OutlierSummary {
        quartile1,
        quartile3,
        iqr,
        lower_bound,
        upper_bound,
        outliers,
    })
}
