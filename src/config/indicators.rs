//! Indicator computation configuration

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct MacdSettings {
    pub fast_period: usize,
    pub slow_period: usize,
    pub signal_period: usize,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct BollingerSettings {
    pub period: usize,
    /// Band width in population standard deviations
    pub std_dev_mult: f64,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct StochasticSettings {
    pub k_period: usize,
    pub d_period: usize,
}

/// The Master Indicator Configuration
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct IndicatorParams {
    pub sma_period: usize,
    pub ema_period: usize,
    pub rsi_period: usize,
    pub atr_period: usize,

    // Sub-groups
    pub macd: MacdSettings,
    pub bollinger: BollingerSettings,
    pub stochastic: StochasticSettings,
}

impl Default for IndicatorParams {
    fn default() -> Self {
        INDICATORS
    }
}

pub const INDICATORS: IndicatorParams = IndicatorParams {
    sma_period: 20,
    ema_period: 20,
    rsi_period: 14,
    atr_period: 14,

    macd: MacdSettings {
        fast_period: 12,
        slow_period: 26,
        signal_period: 9,
    },

    bollinger: BollingerSettings {
        period: 20,
        std_dev_mult: 2.0,
    },

    stochastic: StochasticSettings {
        k_period: 14,
        d_period: 3,
    },
};
