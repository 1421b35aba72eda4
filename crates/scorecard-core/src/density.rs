//! Gaussian kernel density estimation for the distribution charts

use std::f64::consts::PI;

/// Number of evaluation points on a density curve
pub const GRID_POINTS: usize = 200;

/// A smoothed density curve sampled on an evenly spaced grid
#[derive(Debug, Clone, PartialEq)]
pub struct DensityCurve {
    /// Evaluation points, ascending
    pub xs: Vec<f64>,
    /// Density at each evaluation point
    pub ys: Vec<f64>,
}

/// Estimate the density of `samples` with a Gaussian kernel
///
/// The bandwidth follows Scott's rule, `n^(-1/5)` times the sample standard
/// deviation, and the curve is evaluated on [`GRID_POINTS`] points spanning
/// three bandwidths beyond the data on each side.
///
/// Returns `None` for fewer than two samples or samples with no spread,
/// where no curve can be drawn.
pub fn gaussian_kde(samples: &[f64]) -> Option<DensityCurve> {
    let n = samples.len();
    if n < 2 {
        return None;
    }

    let count = n as f64;
    let mean = samples.iter().sum::<f64>() / count;
    let variance = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (count - 1.0);
    let std_dev = variance.sqrt();
    if !std_dev.is_finite() || std_dev <= 0.0 {
        return None;
    }

    let bandwidth = count.powf(-0.2) * std_dev;
    let (min, max) = samples
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), x| (lo.min(*x), hi.max(*x)));
    let start = min - 3.0 * bandwidth;
    let step = (max - min + 6.0 * bandwidth) / (GRID_POINTS - 1) as f64;
    let norm = 1.0 / (count * bandwidth * (2.0 * PI).sqrt());

    let xs: Vec<f64> = (0..GRID_POINTS).map(|i| start + step * i as f64).collect();
    let ys = xs
        .iter()
        .map(|x| {
            norm * samples
                .iter()
                .map(|sample| {
                    let z = (x - sample) / bandwidth;
                    (-0.5 * z * z).exp()
                })
                .sum::<f64>()
        })
        .collect();

    Some(DensityCurve { xs, ys })
}
