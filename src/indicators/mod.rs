//! The indicator engine: pure functions from a validated series to
//! index-aligned derived series.

mod momentum;
mod moving_average;
mod volatility;
mod volume;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

use crate::config::IndicatorParams;
use crate::models::BarSeries;
use crate::utils::vec_utils::count_none_elements;

pub use momentum::{MacdResult, StochasticResult, macd, rsi, stochastic};
pub use moving_average::{BollingerBands, bollinger, ema, sma, sma_over_gaps};
pub use volatility::atr;
pub use volume::obv;

/// One derived value per source bar; None while the indicator warms up.
pub type IndicatorSeries = Vec<Option<f64>>;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display,
    EnumIter,
)]
pub enum IndicatorKind {
    Sma,
    Ema,
    Rsi,
    MacdLine,
    MacdSignal,
    MacdHistogram,
    BollingerUpper,
    BollingerMiddle,
    BollingerLower,
    StochK,
    StochD,
    Atr,
    Obv,
}

/// Every computed indicator series, keyed by kind. All members are exactly
/// as long as the source series they were derived from.
#[derive(Debug, Clone, Default)]
pub struct IndicatorSet {
    series: BTreeMap<IndicatorKind, IndicatorSeries>,
}

impl IndicatorSet {
    pub fn get(&self, kind: IndicatorKind) -> Option<&IndicatorSeries> {
        self.series.get(&kind)
    }

    pub fn insert(&mut self, kind: IndicatorKind, series: IndicatorSeries) {
        self.series.insert(kind, series);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&IndicatorKind, &IndicatorSeries)> {
        self.series.iter()
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

/// Compute the full indicator family for one validated series.
///
/// Total over any input: a series shorter than an indicator's warm-up just
/// yields an all-None member for that indicator.
pub fn compute_indicators(bars: &BarSeries, params: &IndicatorParams) -> IndicatorSet {
    let closes = &bars.closes;
    let highs = &bars.highs;
    let lows = &bars.lows;
    let volumes = &bars.volumes;

    let mut set = IndicatorSet::default();

    set.insert(IndicatorKind::Sma, sma(closes, params.sma_period));
    set.insert(IndicatorKind::Ema, ema(closes, params.ema_period));
    set.insert(IndicatorKind::Rsi, rsi(closes, params.rsi_period));

    let macd_result = macd(
        closes,
        params.macd.fast_period,
        params.macd.slow_period,
        params.macd.signal_period,
    );
    set.insert(IndicatorKind::MacdLine, macd_result.macd);
    set.insert(IndicatorKind::MacdSignal, macd_result.signal);
    set.insert(IndicatorKind::MacdHistogram, macd_result.histogram);

    let bands = bollinger(closes, params.bollinger.period, params.bollinger.std_dev_mult);
    set.insert(IndicatorKind::BollingerUpper, bands.upper);
    set.insert(IndicatorKind::BollingerMiddle, bands.middle);
    set.insert(IndicatorKind::BollingerLower, bands.lower);

    let stoch = stochastic(
        highs,
        lows,
        closes,
        params.stochastic.k_period,
        params.stochastic.d_period,
    );
    set.insert(IndicatorKind::StochK, stoch.k);
    set.insert(IndicatorKind::StochD, stoch.d);

    set.insert(IndicatorKind::Atr, atr(bars, params.atr_period));
    set.insert(IndicatorKind::Obv, obv(closes, volumes));

    if log::log_enabled!(log::Level::Debug) {
        for (kind, series) in set.iter() {
            log::debug!(
                "indicator {}: {} values, warm-up gap {}",
                kind,
                series.len(),
                count_none_elements(series)
            );
        }
    }

    set
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::INDICATORS;
    use crate::domain::Bar;
    use strum::IntoEnumIterator;

    fn series_of(closes: &[f64]) -> BarSeries {
        let bars: Vec<Bar> = closes
            .iter()
            .enumerate()
            .map(|(i, &c)| Bar::new(i as i64 * 60, c, c + 1.0, c - 1.0, c, 100.0))
            .collect();
        BarSeries::from_bars(bars)
    }

    #[test]
    fn test_all_kinds_present_and_aligned() {
        let closes: Vec<f64> = (0..120).map(|i| 100.0 + (i as f64 * 0.2).sin() * 8.0).collect();
        let bars = series_of(&closes);
        let set = compute_indicators(&bars, &INDICATORS);

        for kind in IndicatorKind::iter() {
            let series = set.get(kind).unwrap_or_else(|| panic!("missing {kind}"));
            assert_eq!(series.len(), bars.len(), "{kind} misaligned");
        }
    }

    #[test]
    fn test_short_series_is_all_absent() {
        // Shorter than every warm-up window in the default params
        let bars = series_of(&[10.0, 11.0, 12.0]);
        let set = compute_indicators(&bars, &INDICATORS);

        for kind in IndicatorKind::iter() {
            if kind == IndicatorKind::Obv {
                continue; // OBV has no warm-up window
            }
            let series = set.get(kind).unwrap();
            assert!(
                series.iter().all(|v| v.is_none()),
                "{kind} produced values below its warm-up"
            );
        }
    }

    #[test]
    fn test_empty_series() {
        let bars = BarSeries::new();
        let set = compute_indicators(&bars, &INDICATORS);
        for kind in IndicatorKind::iter() {
            assert!(set.get(kind).unwrap().is_empty());
        }
    }
}
