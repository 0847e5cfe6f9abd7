//! Sloped-boundary shapes: triangles and flags.
//!
//! Both detectors walk sliding windows, fit straight lines to the window's
//! highs and lows, and classify on the normalized slope pair. Slopes are
//! expressed as fraction-of-mean-price per bar so tolerances hold across
//! price scales.

use crate::config::{FlagSettings, TriangleSettings};
use crate::patterns::extrema::{find_peaks, find_troughs};
use crate::patterns::{FlagDirection, FlagPattern, TriangleKind, TrianglePattern};
use crate::utils::maths_utils::{linear_fit, linear_fit_points};

/// Candidate window lengths between min and max: the two endpoints plus the
/// midpoint. Finer sweeps buy little once slopes are fit over extrema.
fn candidate_lengths(min_length: usize, max_length: usize) -> Vec<usize> {
    let mut lengths = vec![min_length];
    let mid = usize::midpoint(min_length, max_length);
    if mid > min_length {
        lengths.push(mid);
    }
    if max_length > mid {
        lengths.push(max_length);
    }
    lengths
}

fn overlaps(found: &[(usize, usize)], start: usize, end: usize) -> bool {
    found.iter().any(|&(s, e)| start < e && s < end)
}

/// Fit a boundary line through the window's extrema. A trending bound may
/// expose fewer than two extrema, in which case the dense column is fit instead.
fn boundary_slope(extrema: &[(usize, f64)], dense: &[f64]) -> f64 {
    if extrema.len() >= 2 {
        linear_fit_points(extrema).0
    } else {
        linear_fit(dense).0
    }
}

// ============================================================================
// Triangles
// ============================================================================

pub fn detect_triangles(
    highs: &[f64],
    lows: &[f64],
    closes: &[f64],
    settings: &TriangleSettings,
) -> Vec<TrianglePattern> {
    let n = closes.len();
    if settings.min_length < 4 || n < settings.min_length {
        return Vec::new();
    }

    let mut found: Vec<TrianglePattern> = Vec::new();
    let mut claimed: Vec<(usize, usize)> = Vec::new();

    // Longest windows first so a big structure claims its span before a
    // fragment of it does.
    for length in candidate_lengths(settings.min_length, settings.max_length)
        .into_iter()
        .rev()
    {
        if length > n {
            continue;
        }
        let stride = (length / 2).max(1);

        let mut start = 0;
        while start + length <= n {
            let end = start + length;
            if !overlaps(&claimed, start, end)
                && let Some((kind, upper_slope, lower_slope)) = classify_triangle_window(
                    &highs[start..end],
                    &lows[start..end],
                    &closes[start..end],
                    settings,
                )
            {
                claimed.push((start, end));
                found.push(TrianglePattern {
                    kind,
                    start_idx: start,
                    end_idx: end - 1,
                    upper_slope,
                    lower_slope,
                });
            }
            start += stride;
        }
    }

    found.sort_by_key(|t| t.start_idx);
    found
}

/// Fit the window's boundary lines through its local highs/lows and classify.
/// Returns (kind, upper_slope, lower_slope) in normalized units.
fn classify_triangle_window(
    highs: &[f64],
    lows: &[f64],
    closes: &[f64],
    settings: &TriangleSettings,
) -> Option<(TriangleKind, f64, f64)> {
    let order = (highs.len() / 10).max(2);

    let mean_close = closes.iter().sum::<f64>() / closes.len() as f64;
    if mean_close <= f64::EPSILON {
        return None;
    }

    let peak_points: Vec<(usize, f64)> = find_peaks(highs, order)
        .into_iter()
        .map(|i| (i, highs[i]))
        .collect();
    let trough_points: Vec<(usize, f64)> = find_troughs(lows, order)
        .into_iter()
        .map(|i| (i, lows[i]))
        .collect();

    let upper = boundary_slope(&peak_points, highs) / mean_close;
    let lower = boundary_slope(&trough_points, lows) / mean_close;

    let tol = settings.slope_tolerance;
    let upper_flat = upper.abs() <= tol;
    let lower_flat = lower.abs() <= tol;

    // The bounds must approach each other left to right
    if lower <= upper {
        return None;
    }

    let kind = if lower > tol && upper < -tol {
        TriangleKind::Symmetrical
    } else if lower > tol && upper_flat {
        TriangleKind::Ascending
    } else if upper < -tol && lower_flat {
        TriangleKind::Descending
    } else {
        return None;
    };

    Some((kind, upper, lower))
}

// ============================================================================
// Flags
// ============================================================================

pub fn detect_flags(
    highs: &[f64],
    lows: &[f64],
    closes: &[f64],
    settings: &FlagSettings,
) -> Vec<FlagPattern> {
    let n = closes.len();
    if settings.min_length < 3 || n < settings.min_length * 2 {
        return Vec::new();
    }

    let mut found: Vec<FlagPattern> = Vec::new();
    let mut claimed: Vec<(usize, usize)> = Vec::new();

    for length in candidate_lengths(settings.min_length, settings.max_length)
        .into_iter()
        .rev()
    {
        // The impulse leg preceding the channel is measured over the same span
        let impulse_len = length;
        if impulse_len + length > n {
            continue;
        }
        let stride = (length / 2).max(1);

        let mut start = impulse_len;
        while start + length <= n {
            let end = start + length;
            if !overlaps(&claimed, start, end) {
                let impulse_base = closes[start - impulse_len];
                if impulse_base > f64::EPSILON {
                    let impulse_return = (closes[start] - impulse_base) / impulse_base;

                    if impulse_return.abs() >= settings.impulse_min_pct
                        && let Some(channel_slope) = classify_flag_channel(
                            &highs[start..end],
                            &lows[start..end],
                            &closes[start..end],
                            settings,
                        )
                    {
                        let direction = if impulse_return > 0.0 {
                            FlagDirection::Bullish
                        } else {
                            FlagDirection::Bearish
                        };
                        claimed.push((start, end));
                        found.push(FlagPattern {
                            direction,
                            start_idx: start,
                            end_idx: end - 1,
                            channel_slope,
                        });
                    }
                }
            }
            start += stride;
        }
    }

    found.sort_by_key(|f| f.start_idx);
    found
}

/// A flag channel: boundary slopes parallel within channel_tolerance, and the
/// drift itself shallow (within slope_tolerance). Returns the channel slope.
fn classify_flag_channel(
    highs: &[f64],
    lows: &[f64],
    closes: &[f64],
    settings: &FlagSettings,
) -> Option<f64> {
    let mean_close = closes.iter().sum::<f64>() / closes.len() as f64;
    if mean_close <= f64::EPSILON {
        return None;
    }

    let (upper_raw, _) = linear_fit(highs);
    let (lower_raw, _) = linear_fit(lows);
    let upper = upper_raw / mean_close;
    let lower = lower_raw / mean_close;

    if (upper - lower).abs() > settings.channel_tolerance {
        return None;
    }

    let channel_slope = f64::midpoint(upper, lower);
    if channel_slope.abs() > settings.slope_tolerance {
        return None;
    }

    Some(channel_slope)
}
