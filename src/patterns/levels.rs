//! Horizontal support/resistance levels from close-price clustering.

use crate::config::LevelSettings;
use crate::patterns::{LevelKind, SupportResistanceLevel};
use crate::utils::maths_utils::percent_diff;

/// Cluster closes that sit within `tolerance_pct` of each other; a cluster
/// becomes a level once it has `min_touches` members. Strength = touch count.
///
/// A touch approached from above (the previous close was higher) votes for
/// support; approached from below it votes for resistance. The majority wins,
/// with ties read as support.
pub fn detect_levels(closes: &[f64], settings: &LevelSettings) -> Vec<SupportResistanceLevel> {
    let min_touches = settings.min_touches.max(1);
    if closes.len() < min_touches {
        return Vec::new();
    }

    // Sort indices by price so clustering is a single sweep
    let mut by_price: Vec<usize> = (0..closes.len()).collect();
    by_price.sort_by(|&a, &b| closes[a].total_cmp(&closes[b]));

    let mut clusters: Vec<Vec<usize>> = Vec::new();
    let mut cluster_sum = 0.0;

    for &idx in &by_price {
        let price = closes[idx];

        let mut joined = false;
        if let Some(current) = clusters.last_mut() {
            let cluster_mean = cluster_sum / current.len() as f64;
            if percent_diff(cluster_mean, price) <= settings.tolerance_pct {
                current.push(idx);
                cluster_sum += price;
                joined = true;
            }
        }
        if !joined {
            clusters.push(vec![idx]);
            cluster_sum = price;
        }
    }

    let mut levels = Vec::new();

    for mut touches in clusters {
        if touches.len() < min_touches {
            continue;
        }
        touches.sort_unstable();

        let mut from_above = 0usize;
        let mut from_below = 0usize;
        for &idx in &touches {
            if idx == 0 {
                continue;
            }
            if closes[idx - 1] > closes[idx] {
                from_above += 1;
            } else if closes[idx - 1] < closes[idx] {
                from_below += 1;
            }
        }

        let kind = if from_above >= from_below {
            LevelKind::Support
        } else {
            LevelKind::Resistance
        };

        levels.push(SupportResistanceLevel {
            kind,
            strength: touches.len(),
            touch_indices: touches,
        });
    }

    // Deterministic output order: by first touch
    levels.sort_by_key(|level| level.touch_indices[0]);
    levels
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(tolerance_pct: f64, min_touches: usize) -> LevelSettings {
        LevelSettings {
            tolerance_pct,
            min_touches,
        }
    }

    #[test]
    fn test_support_level_from_repeated_floor() {
        // Price keeps dropping to ~100 and bouncing
        let closes = vec![105.0, 100.0, 104.0, 100.2, 106.0, 99.9, 105.0];
        let levels = detect_levels(&closes, &settings(0.005, 3));

        assert_eq!(levels.len(), 1);
        let level = &levels[0];
        assert_eq!(level.kind, LevelKind::Support);
        assert_eq!(level.strength, 3);
        assert_eq!(level.touch_indices, vec![1, 3, 5]);
    }

    #[test]
    fn test_resistance_level_from_repeated_ceiling() {
        let closes = vec![95.0, 100.0, 96.0, 100.1, 94.0, 99.9, 95.0];
        let levels = detect_levels(&closes, &settings(0.01, 3));

        assert_eq!(levels.len(), 1);
        assert_eq!(levels[0].kind, LevelKind::Resistance);
        assert_eq!(levels[0].strength, 3);
    }

    #[test]
    fn test_min_touches_filters_weak_clusters() {
        let closes = vec![105.0, 100.0, 104.0, 100.2, 106.0];
        // Only two touches near 100: not enough for min_touches = 3
        assert!(detect_levels(&closes, &settings(0.01, 3)).is_empty());
    }

    #[test]
    fn test_short_input_is_empty() {
        assert!(detect_levels(&[100.0], &settings(0.01, 3)).is_empty());
        assert!(detect_levels(&[], &settings(0.01, 3)).is_empty());
    }
}
