//! Price/oscillator divergence detection.

use itertools::Itertools;

use crate::patterns::extrema::{find_peaks, find_troughs};
use crate::patterns::{Divergence, DivergenceKind};

/// Compare consecutive price extrema against the oscillator at the same
/// indices. Bearish: price peaks rise while the oscillator peaks fall.
/// Bullish: price troughs fall while the oscillator troughs rise.
/// Extrema without an oscillator value are dropped before pairing.
pub fn detect_divergences(
    closes: &[f64],
    indicator: &[Option<f64>],
    order: usize,
) -> Vec<Divergence> {
    // Defensive: a misaligned indicator series produces nothing rather than nonsense
    if closes.len() != indicator.len() || closes.is_empty() {
        return Vec::new();
    }

    let mut found = Vec::new();

    let with_indicator = |indices: Vec<usize>| {
        indices
            .into_iter()
            .filter(|&idx| indicator[idx].is_some())
            .collect::<Vec<_>>()
    };

    for (a, b) in with_indicator(find_peaks(closes, order))
        .into_iter()
        .tuple_windows()
    {
        let (Some(ind_a), Some(ind_b)) = (indicator[a], indicator[b]) else {
            continue;
        };
        if closes[b] > closes[a] && ind_b < ind_a {
            found.push(Divergence {
                kind: DivergenceKind::Bearish,
                first_idx: a,
                second_idx: b,
            });
        }
    }

    for (a, b) in with_indicator(find_troughs(closes, order))
        .into_iter()
        .tuple_windows()
    {
        let (Some(ind_a), Some(ind_b)) = (indicator[a], indicator[b]) else {
            continue;
        };
        if closes[b] < closes[a] && ind_b > ind_a {
            found.push(Divergence {
                kind: DivergenceKind::Bullish,
                first_idx: a,
                second_idx: b,
            });
        }
    }

    found
}
