//! Configuration module: immutable blueprint defaults plus the live config structs.

mod indicators;
mod patterns;

use serde::{Deserialize, Serialize};

// Re-export commonly used items
pub use indicators::{
    BollingerSettings, INDICATORS, IndicatorParams, MacdSettings, StochasticSettings,
};
pub use patterns::{
    DoubleSettings, FlagSettings, LevelSettings, PATTERNS, PatternParams, TriangleSettings,
    VolumeAnomalySettings,
};

/// Everything the engine needs to recompute a symbol from scratch.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct EngineConfig {
    pub indicators: IndicatorParams,
    pub patterns: PatternParams,
}

impl Default for EngineConfig {
    fn default() -> Self {
        ENGINE_DEFAULTS
    }
}

pub const ENGINE_DEFAULTS: EngineConfig = EngineConfig {
    indicators: INDICATORS,
    patterns: PATTERNS,
};
