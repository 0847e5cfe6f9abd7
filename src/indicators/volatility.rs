//! Average True Range.

use crate::indicators::IndicatorSeries;
use crate::models::BarSeries;

/// ATR: Wilder average of the True Range.
/// The first bar has no previous close, so its TR falls back to high-low.
pub fn atr(bars: &BarSeries, period: usize) -> IndicatorSeries {
    let n = bars.len();
    let mut out = vec![None; n];
    if period == 0 || n < period {
        return out;
    }

    let mut tr = Vec::with_capacity(n);
    let mut prev_close = None;
    for i in 0..n {
        let bar = bars.get_bar(i);
        tr.push(bar.true_range(prev_close));
        prev_close = Some(bar.close);
    }

    let period_f = period as f64;

    // Seed with the plain mean of the first window, then Wilder-smooth
    let mut current: f64 = tr[..period].iter().sum::<f64>() / period_f;
    out[period - 1] = Some(current);

    for i in period..n {
        current = (current * (period_f - 1.0) + tr[i]) / period_f;
        out[i] = Some(current);
    }

    out
}
