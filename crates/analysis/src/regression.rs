//! Least-squares linear regression and Pearson correlation.
//!
//! The p-value is two-sided, from a Student's t test with n - 2
//! degrees of freedom via `statrs`.

use statrs::distribution::{ContinuousCDF, StudentsT};
use trial_core::{Error, RegressionSummary, Result};

// Guards the t-statistic against division by zero when r is exactly ±1.
const TINY: f64 = 1e-20;

/// Pearson correlation coefficient between two equal-length samples.
///
/// Zero variance on either side yields r = 0.
pub fn correlation(x: &[f64], y: &[f64]) -> Result<f64> {
    let sums = centered_sums(x, y)?;
    if x.len() < 2 {
        return Err(Error::insufficient_data(
            "correlation needs at least 2 points",
        ));
    }
    Ok(sums.r_value())
}

/// Fit y = slope * x + intercept by least squares.
///
/// Returns the slope, intercept, Pearson r, two-sided p-value and the
/// standard error of the slope. Fewer than 2 points is an
/// `InsufficientData` error; zero variance in x is a `Regression`
/// error (the slope is undefined). With exactly 2 points the fit has
/// zero degrees of freedom, so p-value and standard error are NaN.
pub fn linear_fit(x: &[f64], y: &[f64]) -> Result<RegressionSummary> {
    let sums = centered_sums(x, y)?;
    let n = x.len();
    if n < 2 {
        return Err(Error::insufficient_data("linear fit needs at least 2 points"));
    }
    if sums.ss_xx <= 0.0 {
        return Err(Error::regression("zero variance in x, slope undefined"));
    }

    let slope = sums.ss_xy / sums.ss_xx;
    let intercept = sums.y_mean - slope * sums.x_mean;
    let r_value = sums.r_value();

    let (p_value, std_err) = if n > 2 {
        let df = (n - 2) as f64;
        let t_stat = r_value * (df / ((1.0 - r_value + TINY) * (1.0 + r_value + TINY))).sqrt();
        let dist =
            StudentsT::new(0.0, 1.0, df).map_err(|e| Error::regression(e.to_string()))?;
        let p_value = (2.0 * dist.sf(t_stat.abs())).min(1.0);
        let std_err = ((1.0 - r_value * r_value) * sums.ss_yy / sums.ss_xx / df).sqrt();
        (p_value, std_err)
    } else {
        (f64::NAN, f64::NAN)
    };

    Ok(RegressionSummary {
        slope,
        intercept,
        r_value,
        p_value,
        std_err,
        n,
    })
}

/// Centered sums of squares and cross-products of two samples.
struct CenteredSums {
    x_mean: f64,
    y_mean: f64,
    ss_xx: f64,
    ss_yy: f64,
    ss_xy: f64,
}

impl CenteredSums {
    fn r_value(&self) -> f64 {
        if self.ss_xx <= 0.0 || self.ss_yy <= 0.0 {
            return 0.0;
        }
        // Rounding can push a perfect fit just past ±1.
        (self.ss_xy / (self.ss_xx * self.ss_yy).sqrt()).clamp(-1.0, 1.0)
    }
}

fn centered_sums(x: &[f64], y: &[f64]) -> Result<CenteredSums> {
    if x.len() != y.len() {
        return Err(Error::data(format!(
            "sample length mismatch: {} vs {}",
            x.len(),
            y.len()
        )));
    }
    if x.is_empty() {
        return Err(Error::empty_sample("regression over empty samples"));
    }

    let n = x.len() as f64;
    let x_mean = x.iter().sum::<f64>() / n;
    let y_mean = y.iter().sum::<f64>() / n;

    let mut ss_xx = 0.0;
    let mut ss_yy = 0.0;
    let mut ss_xy = 0.0;
    for (&xi, &yi) in x.iter().zip(y.iter()) {
        let dx = xi - x_mean;
        let dy = yi - y_mean;
        ss_xx += dx * dx;
        ss_yy += dy * dy;
        ss_xy += dx * dy;
    }

    Ok(CenteredSums {
        x_mean,
        y_mean,
        ss_xx,
        ss_yy,
        ss_xy,
    })
}
