//! Moving averages and the bands built on them: SMA, EMA, Bollinger.

use crate::indicators::IndicatorSeries;
use crate::utils::maths_utils::mean_and_stddev;

/// Simple Moving Average over a rolling-sum window.
/// The first `period - 1` indices are None; a series shorter than the
/// period (or a zero period) comes back entirely None.
pub fn sma(values: &[f64], period: usize) -> IndicatorSeries {
    let n = values.len();
    let mut out = vec![None; n];
    if period == 0 || n < period {
        return out;
    }

    let mut rolling_sum = 0.0;
    for (i, &v) in values.iter().enumerate() {
        rolling_sum += v;

        if i >= period {
            // Subtract the element that fell out of the window
            rolling_sum -= values[i - period];
        }

        if i + 1 >= period {
            out[i] = Some(rolling_sum / period as f64);
        }
    }

    out
}

/// SMA over a gapped series. A window only produces a value when every
/// element in it is defined, so leading warm-up gaps stay aligned.
pub fn sma_over_gaps(values: &[Option<f64>], period: usize) -> IndicatorSeries {
    let n = values.len();
    let mut out = vec![None; n];
    if period == 0 || n < period {
        return out;
    }

    for i in (period - 1)..n {
        let window = &values[i + 1 - period..=i];
        let mut sum = 0.0;
        let mut complete = true;
        for v in window {
            match v {
                Some(x) => sum += x,
                None => {
                    complete = false;
                    break;
                }
            }
        }
        if complete {
            out[i] = Some(sum / period as f64);
        }
    }

    out
}

/// Exponential Moving Average.
///
/// The recursion `ema[i] = price[i]*k + ema[i-1]*(1-k)` is seeded with the
/// first value and runs from index 0, but values are reported only from
/// `period - 1` onward for display parity with SMA.
pub fn ema(values: &[f64], period: usize) -> IndicatorSeries {
    let n = values.len();
    let mut out = vec![None; n];
    if period == 0 || n < period {
        return out;
    }

    let k = 2.0 / (period as f64 + 1.0);
    let mut current = values[0];

    for (i, &v) in values.iter().enumerate() {
        if i > 0 {
            current = v * k + current * (1.0 - k);
        }
        if i + 1 >= period {
            out[i] = Some(current);
        }
    }

    out
}

/// The raw EMA recursion without warm-up masking. MACD needs the full
/// sequence so its own mask can be applied after subtraction.
pub(crate) fn ema_unmasked(values: &[f64], period: usize) -> Vec<f64> {
    let n = values.len();
    if n == 0 || period == 0 {
        return Vec::new();
    }

    let k = 2.0 / (period as f64 + 1.0);
    let mut out = Vec::with_capacity(n);
    let mut current = values[0];
    out.push(current);

    for &v in &values[1..] {
        current = v * k + current * (1.0 - k);
        out.push(current);
    }

    out
}

pub struct BollingerBands {
    pub upper: IndicatorSeries,
    pub middle: IndicatorSeries,
    pub lower: IndicatorSeries,
}

/// Bollinger Bands: middle = SMA(period), upper/lower = middle +/- mult
/// population standard deviations of the trailing window.
pub fn bollinger(values: &[f64], period: usize, std_dev_mult: f64) -> BollingerBands {
    let n = values.len();
    let middle = sma(values, period);
    let mut upper = vec![None; n];
    let mut lower = vec![None; n];

    if period > 0 && n >= period {
        for i in (period - 1)..n {
            if let Some(mid) = middle[i] {
                let window = &values[i + 1 - period..=i];
                let (_, sd) = mean_and_stddev(window);
                upper[i] = Some(mid + std_dev_mult * sd);
                lower[i] = Some(mid - std_dev_mult * sd);
            }
        }
    }

    BollingerBands {
        upper,
        middle,
        lower,
    }
}
