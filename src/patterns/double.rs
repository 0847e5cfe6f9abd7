//! Double top / double bottom detection.

use itertools::Itertools;

use crate::config::DoubleSettings;
use crate::patterns::extrema::{find_peaks, find_troughs};
use crate::patterns::{DoubleKind, DoubleTopBottom};
use crate::utils::maths_utils::{get_max, get_min, percent_diff};

/// Two peaks (or troughs) of near-equal price, separated by at least
/// `min_separation` bars, with a genuine reversal between them.
/// `order` is the shared extrema half-window.
pub fn detect_double_tops_bottoms(
    closes: &[f64],
    settings: &DoubleSettings,
    order: usize,
) -> Vec<DoubleTopBottom> {
    if closes.len() < settings.min_separation + 2 {
        return Vec::new();
    }

    let mut found = Vec::new();

    for (a, b) in find_peaks(closes, order).into_iter().tuple_windows() {
        if b - a < settings.min_separation {
            continue;
        }
        if percent_diff(closes[a], closes[b]) > settings.tolerance_pct {
            continue;
        }
        // The neckline between the two tops must dip clearly below them
        let valley = get_min(&closes[a..=b]);
        let lower_peak = closes[a].min(closes[b]);
        if valley < lower_peak * (1.0 - settings.tolerance_pct) {
            found.push(DoubleTopBottom {
                kind: DoubleKind::Top,
                first_idx: a,
                second_idx: b,
            });
        }
    }

    for (a, b) in find_troughs(closes, order).into_iter().tuple_windows() {
        if b - a < settings.min_separation {
            continue;
        }
        if percent_diff(closes[a], closes[b]) > settings.tolerance_pct {
            continue;
        }
        let ridge = get_max(&closes[a..=b]);
        let higher_trough = closes[a].max(closes[b]);
        if ridge > higher_trough * (1.0 + settings.tolerance_pct) {
            found.push(DoubleTopBottom {
                kind: DoubleKind::Bottom,
                first_idx: a,
                second_idx: b,
            });
        }
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORDER: usize = 2;

    fn settings() -> DoubleSettings {
        DoubleSettings {
            tolerance_pct: 0.02,
            min_separation: 4,
        }
    }

    /// Ramp up to a top, sell off, ramp back to a near-equal top, sell off.
    fn double_top_closes() -> Vec<f64> {
        vec![
            90.0, 95.0, 100.0, 95.0, 90.0, 88.0, 90.0, 95.0, 100.5, 95.0, 90.0,
        ]
    }

    #[test]
    fn test_double_top() {
        let found = detect_double_tops_bottoms(&double_top_closes(), &settings(), ORDER);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].kind, DoubleKind::Top);
        assert_eq!((found[0].first_idx, found[0].second_idx), (2, 8));
    }

    #[test]
    fn test_double_bottom_mirror() {
        let closes: Vec<f64> = double_top_closes().iter().map(|c| 200.0 - c).collect();
        let found = detect_double_tops_bottoms(&closes, &settings(), ORDER);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].kind, DoubleKind::Bottom);
    }

    #[test]
    fn test_unequal_peaks_rejected() {
        // Second top 10% above the first: outside tolerance
        let closes = vec![
            90.0, 95.0, 100.0, 95.0, 90.0, 88.0, 90.0, 100.0, 110.0, 100.0, 90.0,
        ];
        assert!(detect_double_tops_bottoms(&closes, &settings(), ORDER).is_empty());
    }

    #[test]
    fn test_insufficient_separation_rejected() {
        let mut tight = settings();
        tight.min_separation = 10;
        assert!(detect_double_tops_bottoms(&double_top_closes(), &tight, ORDER).is_empty());
    }

    #[test]
    fn test_no_reversal_between_peaks() {
        // Plateau between the two tops never dips: one broad structure, not two tops
        let closes = vec![
            90.0, 95.0, 100.0, 99.5, 99.0, 99.2, 99.0, 99.5, 100.2, 95.0, 90.0,
        ];
        assert!(detect_double_tops_bottoms(&closes, &settings(), ORDER).is_empty());
    }

    #[test]
    fn test_short_input_is_empty() {
        assert!(detect_double_tops_bottoms(&[100.0, 101.0], &settings(), ORDER).is_empty());
    }
}
