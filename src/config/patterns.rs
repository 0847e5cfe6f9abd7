//! Pattern detection configuration

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct LevelSettings {
    /// Closes within this fraction of each other share a cluster (0.01 = 1%)
    pub tolerance_pct: f64,
    /// A cluster only becomes a level at this many touches
    pub min_touches: usize,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct TriangleSettings {
    pub min_length: usize,
    pub max_length: usize,
    /// Normalized slope (fraction of mean price per bar) below which a bound counts as flat
    pub slope_tolerance: f64,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct FlagSettings {
    pub min_length: usize,
    pub max_length: usize,
    pub slope_tolerance: f64,
    /// Max normalized slope difference for the channel bounds to count as parallel
    pub channel_tolerance: f64,
    /// Minimum fractional move of the preceding impulse leg
    pub impulse_min_pct: f64,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct DoubleSettings {
    /// Max fractional difference between the two extremes
    pub tolerance_pct: f64,
    /// Minimum bars between the two extremes
    pub min_separation: usize,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct VolumeAnomalySettings {
    /// Flag volume above mean + multiplier * stddev of the trailing window
    pub multiplier: f64,
    pub window_size: usize,
}

/// The Master Pattern Configuration
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct PatternParams {
    /// Half-window for the shared peak/trough search; divergence and
    /// double top/bottom pairing both run on these extrema
    pub extrema_order: usize,

    // Sub-groups
    pub levels: LevelSettings,
    pub triangle: TriangleSettings,
    pub flag: FlagSettings,
    pub double: DoubleSettings,
    pub volume: VolumeAnomalySettings,
}

impl Default for PatternParams {
    fn default() -> Self {
        PATTERNS
    }
}

pub const PATTERNS: PatternParams = PatternParams {
    extrema_order: 5,

    levels: LevelSettings {
        tolerance_pct: 0.01, // 1% clustering keeps levels tight on liquid pairs
        min_touches: 3,
    },

    triangle: TriangleSettings {
        min_length: 20,
        max_length: 60,
        slope_tolerance: 0.0005,
    },

    flag: FlagSettings {
        min_length: 8,
        max_length: 20,
        slope_tolerance: 0.003,
        channel_tolerance: 0.001,
        impulse_min_pct: 0.04, // 4% leg before the channel qualifies as an impulse
    },

    double: DoubleSettings {
        tolerance_pct: 0.015,
        min_separation: 10,
    },

    volume: VolumeAnomalySettings {
        multiplier: 2.5,
        window_size: 20,
    },
};
