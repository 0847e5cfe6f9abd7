use argminmax::ArgMinMax;
use std::f64;

#[inline]
pub(crate) fn get_max(vec: &[f64]) -> f64 {
    let max_index: usize = vec.argmax();
    vec[max_index]
}

#[inline]
pub(crate) fn get_min(vec: &[f64]) -> f64 {
    let min_index: usize = vec.argmin();
    vec[min_index]
}

/// Population mean and standard deviation over a slice.
/// Returns (0.0, 0.0) on empty input.
#[inline]
pub fn mean_and_stddev(data: &[f64]) -> (f64, f64) {
    let count = data.len();
    if count == 0 {
        return (0.0, 0.0);
    }

    let sum: f64 = data.iter().sum();
    let mean = sum / count as f64;

    let variance: f64 = data
        .iter()
        .map(|value| {
            let diff = mean - *value;
            diff * diff
        })
        .sum::<f64>()
        / count as f64;

    (mean, variance.sqrt())
}

/// Least-squares line fit over `ys` with implicit x = 0..n.
/// Returns (slope, intercept). Slope is 0.0 for fewer than 2 points.
pub fn linear_fit(ys: &[f64]) -> (f64, f64) {
    let n = ys.len();
    if n < 2 {
        return (0.0, ys.first().copied().unwrap_or(0.0));
    }

    let n_f = n as f64;
    // x values are 0, 1, .., n-1 so the sums have closed forms
    let sum_x = (n_f - 1.0) * n_f / 2.0;
    let sum_xx = (n_f - 1.0) * n_f * (2.0 * n_f - 1.0) / 6.0;

    let sum_y: f64 = ys.iter().sum();
    let sum_xy: f64 = ys.iter().enumerate().map(|(i, y)| i as f64 * y).sum();

    let denom = n_f * sum_xx - sum_x * sum_x;
    if denom.abs() < f64::EPSILON {
        return (0.0, sum_y / n_f);
    }

    let slope = (n_f * sum_xy - sum_x * sum_y) / denom;
    let intercept = (sum_y - slope * sum_x) / n_f;
    (slope, intercept)
}

/// Fit a line through an explicit set of (index, value) points.
/// Used when the points are scattered extrema rather than a dense window.
pub fn linear_fit_points(points: &[(usize, f64)]) -> (f64, f64) {
    let n = points.len();
    if n < 2 {
        return (0.0, points.first().map(|p| p.1).unwrap_or(0.0));
    }

    let n_f = n as f64;
    let sum_x: f64 = points.iter().map(|p| p.0 as f64).sum();
    let sum_y: f64 = points.iter().map(|p| p.1).sum();
    let sum_xx: f64 = points.iter().map(|p| (p.0 as f64) * (p.0 as f64)).sum();
    let sum_xy: f64 = points.iter().map(|p| (p.0 as f64) * p.1).sum();

    let denom = n_f * sum_xx - sum_x * sum_x;
    if denom.abs() < f64::EPSILON {
        return (0.0, sum_y / n_f);
    }

    let slope = (n_f * sum_xy - sum_x * sum_y) / denom;
    let intercept = (sum_y - slope * sum_x) / n_f;
    (slope, intercept)
}

/// Relative difference between two prices, as a fraction of the first.
#[inline]
pub fn percent_diff(a: f64, b: f64) -> f64 {
    if a.abs() > f64::EPSILON {
        (b - a).abs() / a.abs()
    } else {
        0.0
    }
}
