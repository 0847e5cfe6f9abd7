//! Chart pattern detection over a validated series.
//!
//! Every detector is independent, pure, and returns nothing rather than
//! erroring when the series is too short for it. Patterns reference the
//! source series by index only; prices are never copied into them.

mod divergence;
mod double;
mod extrema;
mod levels;
mod trend_shapes;
mod volume_anomaly;

use serde::{Deserialize, Serialize};

use crate::config::PatternParams;
use crate::domain::BarKind;
use crate::indicators::{IndicatorKind, IndicatorSet};
use crate::models::BarSeries;

pub use divergence::detect_divergences;
pub use double::detect_double_tops_bottoms;
pub use extrema::{find_peaks, find_troughs};
pub use levels::detect_levels;
pub use trend_shapes::{detect_flags, detect_triangles};
pub use volume_anomaly::detect_volume_anomalies;

// ============================================================================
// Pattern types
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DivergenceKind {
    /// Price trough falls while the oscillator trough rises
    Bullish,
    /// Price peak rises while the oscillator peak falls
    Bearish,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Divergence {
    pub kind: DivergenceKind,
    pub first_idx: usize,
    pub second_idx: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelKind {
    Support,
    Resistance,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupportResistanceLevel {
    pub kind: LevelKind,
    /// Touch count; what the level's strength is quoted in
    pub strength: usize,
    pub touch_indices: Vec<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TriangleKind {
    Ascending,
    Descending,
    Symmetrical,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrianglePattern {
    pub kind: TriangleKind,
    pub start_idx: usize,
    pub end_idx: usize,
    /// Normalized slope of the upper bound (fraction of mean price per bar)
    pub upper_slope: f64,
    pub lower_slope: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlagDirection {
    Bullish,
    Bearish,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlagPattern {
    pub direction: FlagDirection,
    pub start_idx: usize,
    pub end_idx: usize,
    pub channel_slope: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DoubleKind {
    Top,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DoubleTopBottom {
    pub kind: DoubleKind,
    pub first_idx: usize,
    pub second_idx: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolumeAnomaly {
    pub index: usize,
    /// Baseline deviations above the trailing mean
    pub sigma: f64,
    pub bar_kind: BarKind,
}

/// The detected-pattern union. Index fields always refer to the series the
/// detection ran over.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Pattern {
    Divergence(Divergence),
    SupportResistance(SupportResistanceLevel),
    Triangle(TrianglePattern),
    Flag(FlagPattern),
    DoubleTopBottom(DoubleTopBottom),
    VolumeAnomaly(VolumeAnomaly),
}

// ============================================================================
// Orchestration
// ============================================================================

/// Run every detector over one validated series.
///
/// Divergence is checked against the RSI member of `indicators`; an absent
/// RSI series simply skips that detector.
pub fn detect_patterns(
    bars: &BarSeries,
    indicators: &IndicatorSet,
    params: &PatternParams,
) -> Vec<Pattern> {
    let closes = &bars.closes;
    let highs = &bars.highs;
    let lows = &bars.lows;

    let mut patterns = Vec::new();

    if let Some(oscillator) = indicators.get(IndicatorKind::Rsi) {
        patterns.extend(
            detect_divergences(closes, oscillator, params.extrema_order)
                .into_iter()
                .map(Pattern::Divergence),
        );
    }

    patterns.extend(
        detect_levels(closes, &params.levels)
            .into_iter()
            .map(Pattern::SupportResistance),
    );
    patterns.extend(
        detect_triangles(highs, lows, closes, &params.triangle)
            .into_iter()
            .map(Pattern::Triangle),
    );
    patterns.extend(
        detect_flags(highs, lows, closes, &params.flag)
            .into_iter()
            .map(Pattern::Flag),
    );
    patterns.extend(
        detect_double_tops_bottoms(closes, &params.double, params.extrema_order)
            .into_iter()
            .map(Pattern::DoubleTopBottom),
    );
    patterns.extend(
        detect_volume_anomalies(bars, &params.volume)
            .into_iter()
            .map(Pattern::VolumeAnomaly),
    );

    log::debug!("detected {} patterns over {} bars", patterns.len(), bars.len());
    patterns
}
