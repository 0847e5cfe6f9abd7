//! Momentum oscillators: RSI, MACD, Stochastic.

use crate::indicators::moving_average::{ema_unmasked, sma_over_gaps};
use crate::indicators::IndicatorSeries;
use crate::utils::maths_utils::{get_max, get_min};
use crate::utils::vec_utils::first_some_index;

/// Relative Strength Index with Wilder smoothing.
///
/// The first `period` indices are None (one extra slot versus SMA because
/// the oscillator works on deltas, not prices). Output is clamped to [0, 100].
pub fn rsi(values: &[f64], period: usize) -> IndicatorSeries {
    let n = values.len();
    let mut out = vec![None; n];
    if period == 0 || n < period + 1 {
        return out;
    }

    // Split deltas into gain/loss legs
    let mut gains = Vec::with_capacity(n - 1);
    let mut losses = Vec::with_capacity(n - 1);
    for i in 1..n {
        let change = values[i] - values[i - 1];
        if change > 0.0 {
            gains.push(change);
            losses.push(0.0);
        } else {
            gains.push(0.0);
            losses.push(-change);
        }
    }

    let period_f = period as f64;
    let mut avg_gain: f64 = gains[..period].iter().sum::<f64>() / period_f;
    let mut avg_loss: f64 = losses[..period].iter().sum::<f64>() / period_f;

    out[period] = Some(rsi_value(avg_gain, avg_loss));

    // Wilder smoothing for the rest
    for i in period..gains.len() {
        avg_gain = (avg_gain * (period_f - 1.0) + gains[i]) / period_f;
        avg_loss = (avg_loss * (period_f - 1.0) + losses[i]) / period_f;
        out[i + 1] = Some(rsi_value(avg_gain, avg_loss));
    }

    out
}

#[inline]
fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
    // avg_loss of zero means rs -> infinity, which pins RSI at 100
    let raw = if avg_loss == 0.0 {
        100.0
    } else {
        let rs = avg_gain / avg_loss;
        100.0 - (100.0 / (1.0 + rs))
    };
    raw.clamp(0.0, 100.0)
}

pub struct MacdResult {
    pub macd: IndicatorSeries,
    pub signal: IndicatorSeries,
    pub histogram: IndicatorSeries,
}

/// MACD line, signal line, and histogram.
///
/// The signal EMA runs over the index-aligned macd series: the recursion is
/// seeded at the first defined macd index and the leading gap is preserved,
/// so signal values land at the indices they describe.
pub fn macd(
    values: &[f64],
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
) -> MacdResult {
    let n = values.len();
    let mut macd_line = vec![None; n];
    let mut signal_line = vec![None; n];
    let mut histogram = vec![None; n];

    let warm_up = fast_period.max(slow_period);
    if fast_period == 0 || slow_period == 0 || signal_period == 0 || n < warm_up {
        return MacdResult {
            macd: macd_line,
            signal: signal_line,
            histogram,
        };
    }

    let fast_ema = ema_unmasked(values, fast_period);
    let slow_ema = ema_unmasked(values, slow_period);

    for i in 0..n {
        if i + 1 >= warm_up {
            macd_line[i] = Some(fast_ema[i] - slow_ema[i]);
        }
    }

    // Signal: EMA recursion over the aligned macd values, starting where
    // the macd line starts rather than over a gap-compacted copy.
    if let Some(start) = first_some_index(&macd_line) {
        let k = 2.0 / (signal_period as f64 + 1.0);
        let mut current = macd_line[start].unwrap_or(0.0);

        for i in start..n {
            if let Some(m) = macd_line[i] {
                if i > start {
                    current = m * k + current * (1.0 - k);
                }
                // Same display parity rule as every other EMA
                if i + 1 >= start + signal_period {
                    signal_line[i] = Some(current);
                }
            }
        }
    }

    for i in 0..n {
        if let (Some(m), Some(s)) = (macd_line[i], signal_line[i]) {
            histogram[i] = Some(m - s);
        }
    }

    MacdResult {
        macd: macd_line,
        signal: signal_line,
        histogram,
    }
}

pub struct StochasticResult {
    pub k: IndicatorSeries,
    pub d: IndicatorSeries,
}

/// Stochastic oscillator.
/// %K = 100 * (close - windowLow) / (windowHigh - windowLow), %D = SMA of %K.
/// A dead-flat window (high == low) reads as neutral 50.
pub fn stochastic(
    highs: &[f64],
    lows: &[f64],
    closes: &[f64],
    k_period: usize,
    d_period: usize,
) -> StochasticResult {
    let n = closes.len();
    let mut k_line = vec![None; n];

    if k_period == 0 || n < k_period {
        return StochasticResult {
            k: k_line,
            d: vec![None; n],
        };
    }

    for i in (k_period - 1)..n {
        let lo = get_min(&lows[i + 1 - k_period..=i]);
        let hi = get_max(&highs[i + 1 - k_period..=i]);
        let range = hi - lo;

        let value = if range > f64::EPSILON {
            100.0 * (closes[i] - lo) / range
        } else {
            50.0
        };
        k_line[i] = Some(value.clamp(0.0, 100.0));
    }

    let d_line = sma_over_gaps(&k_line, d_period);

    StochasticResult {
        k: k_line,
        d: d_line,
    }
}
