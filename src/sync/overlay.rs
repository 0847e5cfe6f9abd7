//! Overlay identity and declarative desired-state diffing.
//!
//! Toggling a category never mutates the surface directly; the active set is
//! diffed against what is mounted and only the delta is applied.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

use crate::indicators::IndicatorKind;

/// Which stacked pane a series belongs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Display)]
pub enum PaneKind {
    Price,
    Volume,
    Oscillator,
}

/// One toggleable overlay family, as exposed to the host UI.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display,
    EnumIter,
)]
pub enum OverlayCategory {
    Sma,
    Ema,
    Bollinger,
    Rsi,
    Macd,
    Stochastic,
    Atr,
    Obv,
    Divergences,
    SupportResistance,
    Triangles,
    Flags,
    DoubleTopsBottoms,
    VolumeAnomalies,
}

/// A category may own several visual series (MACD has three).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display,
)]
pub enum OverlayPart {
    Main,
    Upper,
    Middle,
    Lower,
    Signal,
    Histogram,
}

/// Identity of one visual series within a pane.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct OverlayKey {
    pub category: OverlayCategory,
    pub part: OverlayPart,
}

impl std::fmt::Display for OverlayKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.category, self.part)
    }
}

impl OverlayCategory {
    pub fn home_pane(&self) -> PaneKind {
        match self {
            Self::Sma
            | Self::Ema
            | Self::Bollinger
            | Self::Divergences
            | Self::SupportResistance
            | Self::Triangles
            | Self::Flags
            | Self::DoubleTopsBottoms => PaneKind::Price,
            Self::Obv | Self::VolumeAnomalies => PaneKind::Volume,
            Self::Rsi | Self::Macd | Self::Stochastic | Self::Atr => PaneKind::Oscillator,
        }
    }

    pub fn parts(&self) -> &'static [OverlayPart] {
        match self {
            Self::Bollinger => &[OverlayPart::Upper, OverlayPart::Middle, OverlayPart::Lower],
            Self::Macd => &[OverlayPart::Main, OverlayPart::Signal, OverlayPart::Histogram],
            Self::Stochastic => &[OverlayPart::Main, OverlayPart::Signal],
            _ => &[OverlayPart::Main],
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = OverlayKey> + '_ {
        self.parts().iter().map(|&part| OverlayKey {
            category: *self,
            part,
        })
    }
}

/// Map an overlay series back to the indicator that feeds it.
/// Pattern overlays return None; their data is marker-built instead.
pub fn indicator_for(key: OverlayKey) -> Option<IndicatorKind> {
    match (key.category, key.part) {
        (OverlayCategory::Sma, OverlayPart::Main) => Some(IndicatorKind::Sma),
        (OverlayCategory::Ema, OverlayPart::Main) => Some(IndicatorKind::Ema),
        (OverlayCategory::Rsi, OverlayPart::Main) => Some(IndicatorKind::Rsi),
        (OverlayCategory::Atr, OverlayPart::Main) => Some(IndicatorKind::Atr),
        (OverlayCategory::Obv, OverlayPart::Main) => Some(IndicatorKind::Obv),
        (OverlayCategory::Macd, OverlayPart::Main) => Some(IndicatorKind::MacdLine),
        (OverlayCategory::Macd, OverlayPart::Signal) => Some(IndicatorKind::MacdSignal),
        (OverlayCategory::Macd, OverlayPart::Histogram) => Some(IndicatorKind::MacdHistogram),
        (OverlayCategory::Bollinger, OverlayPart::Upper) => Some(IndicatorKind::BollingerUpper),
        (OverlayCategory::Bollinger, OverlayPart::Middle) => Some(IndicatorKind::BollingerMiddle),
        (OverlayCategory::Bollinger, OverlayPart::Lower) => Some(IndicatorKind::BollingerLower),
        (OverlayCategory::Stochastic, OverlayPart::Main) => Some(IndicatorKind::StochK),
        (OverlayCategory::Stochastic, OverlayPart::Signal) => Some(IndicatorKind::StochD),
        _ => None,
    }
}

/// The full key set a pane should be showing for the active categories.
pub fn desired_keys(active: &BTreeSet<OverlayCategory>, pane: PaneKind) -> BTreeSet<OverlayKey> {
    active
        .iter()
        .filter(|category| category.home_pane() == pane)
        .flat_map(|category| category.keys())
        .collect()
}

/// Compute the create/remove delta between what is mounted and what should be.
pub fn diff_overlays(
    mounted: &BTreeSet<OverlayKey>,
    desired: &BTreeSet<OverlayKey>,
) -> (Vec<OverlayKey>, Vec<OverlayKey>) {
    let to_add = desired.difference(mounted).copied().collect();
    let to_remove = mounted.difference(desired).copied().collect();
    (to_add, to_remove)
}
