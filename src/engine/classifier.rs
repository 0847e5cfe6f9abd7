//! Update classification: deciding what a freshly fetched series means
//! relative to the one we already hold, in O(1).

use crate::domain::Bar;
use crate::models::BarSeries;

/// What a new delivery amounts to.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateClassification {
    /// Start over with this series
    FullReload(BarSeries),
    /// In-place revision of the still-open last bar
    TickUpdate(Bar),
    /// One new bar arrived at the tail
    Append(Bar),
}

/// Everything needed to classify without touching the full held series.
#[derive(Debug, Clone, Copy, PartialEq)]
struct SeriesFingerprint {
    len: usize,
    first_ts: i64,
    last_bar: Bar,
}

impl SeriesFingerprint {
    fn of(series: &BarSeries) -> Option<Self> {
        let last_bar = series.last_bar()?;
        let first_ts = series.first_timestamp()?;
        Some(Self {
            len: series.len(),
            first_ts,
            last_bar,
        })
    }
}

/// Carries the cached fingerprint of the last-adopted series so the engine
/// loop classifies each delivery against head/tail data only.
#[derive(Debug, Clone, Default)]
pub struct UpdateClassifier {
    held: Option<SeriesFingerprint>,
}

impl UpdateClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_initialized(&self) -> bool {
        self.held.is_some()
    }

    /// Classify a new delivery against the cached fingerprint.
    pub fn classify(&self, new_series: &BarSeries) -> UpdateClassification {
        classify_against(self.held.as_ref(), new_series)
    }

    /// Cache the fingerprint of the series the engine now holds.
    /// Call after the classification's patch has been applied.
    pub fn adopt(&mut self, series: &BarSeries) {
        self.held = SeriesFingerprint::of(series);
    }
}

/// One-shot form for collaborators that hold both series themselves.
pub fn classify_update(prior: &BarSeries, new_series: &BarSeries) -> UpdateClassification {
    classify_against(SeriesFingerprint::of(prior).as_ref(), new_series)
}

fn classify_against(
    held: Option<&SeriesFingerprint>,
    new_series: &BarSeries,
) -> UpdateClassification {
    // Uninitialized (or previously empty): everything is a reload
    let Some(held) = held else {
        return UpdateClassification::FullReload(new_series.clone());
    };

    let new_len = new_series.len();
    let (Some(new_first), Some(new_last)) = (new_series.first_timestamp(), new_series.last_bar())
    else {
        // New delivery is empty: reload down to nothing
        return UpdateClassification::FullReload(new_series.clone());
    };

    // 1. Shrunk or re-anchored history
    if new_len < held.len || new_first != held.first_ts {
        return UpdateClassification::FullReload(new_series.clone());
    }

    // 2. Same shape, same closing bar slot: a tick revision. An identical
    //    bar still classifies here; applying it is a no-op, which keeps
    //    classify(S, S) idempotent.
    if new_len == held.len && new_last.timestamp == held.last_bar.timestamp {
        if new_last == held.last_bar {
            log::trace!("tick update with no value change at ts {}", new_last.timestamp);
        }
        return UpdateClassification::TickUpdate(new_last);
    }

    // 3. Exactly one newer bar at the tail
    if new_len == held.len + 1 && new_last.timestamp > held.last_bar.timestamp {
        return UpdateClassification::Append(new_last);
    }

    // 4. Anything else degrades safely
    log::debug!(
        "unexpected series shape (held len {}, new len {}): falling back to full reload",
        held.len,
        new_len
    );
    UpdateClassification::FullReload(new_series.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Bar;

    fn bar(ts: i64, close: f64) -> Bar {
        Bar::new(ts, close, close + 1.0, close - 1.0, close, 100.0)
    }

    fn series(n: usize) -> BarSeries {
        BarSeries::from_bars((0..n).map(|i| bar(i as i64 * 60, 100.0 + i as f64)).collect())
    }

    #[test]
    fn test_uninitialized_is_full_reload() {
        let s = series(5);
        let classifier = UpdateClassifier::new();
        assert!(!classifier.is_initialized());
        assert!(matches!(
            classifier.classify(&s),
            UpdateClassification::FullReload(_)
        ));
    }

    #[test]
    fn test_identical_series_is_degenerate_tick_update() {
        let s = series(5);
        match classify_update(&s, &s) {
            UpdateClassification::TickUpdate(last) => {
                // No value change: the patch is a no-op
                assert_eq!(Some(last), s.last_bar());
            }
            other => panic!("expected TickUpdate, got {other:?}"),
        }
    }

    #[test]
    fn test_changed_last_bar_is_tick_update() {
        let held = series(5);
        let mut fresh = held.clone();
        fresh.patch_last(&bar(4 * 60, 500.0));

        match classify_update(&held, &fresh) {
            UpdateClassification::TickUpdate(last) => assert_eq!(last.close, 500.0),
            other => panic!("expected TickUpdate, got {other:?}"),
        }
    }

    #[test]
    fn test_one_new_bar_is_append() {
        let held = series(5);
        let mut fresh = held.clone();
        fresh.push_bar(bar(5 * 60, 123.0));

        match classify_update(&held, &fresh) {
            UpdateClassification::Append(new_bar) => {
                assert_eq!(new_bar.timestamp, 300);
                assert_eq!(new_bar.close, 123.0);
            }
            other => panic!("expected Append, got {other:?}"),
        }
    }

    #[test]
    fn test_shrunk_series_is_full_reload() {
        let held = series(5);
        let fresh = series(3);
        assert!(matches!(
            classify_update(&held, &fresh),
            UpdateClassification::FullReload(_)
        ));
    }

    #[test]
    fn test_reanchored_history_is_full_reload() {
        let held = series(5);
        // Same length, but history now starts later
        let fresh = BarSeries::from_bars(
            (0..5).map(|i| bar((i as i64 + 10) * 60, 100.0)).collect(),
        );
        assert!(matches!(
            classify_update(&held, &fresh),
            UpdateClassification::FullReload(_)
        ));
    }

    #[test]
    fn test_two_new_bars_fall_back_to_reload() {
        let held = series(5);
        let fresh = series(7);
        assert!(matches!(
            classify_update(&held, &fresh),
            UpdateClassification::FullReload(_)
        ));
    }

    #[test]
    fn test_empty_delivery_reloads_to_empty() {
        let held = series(5);
        let fresh = BarSeries::new();
        match classify_update(&held, &fresh) {
            UpdateClassification::FullReload(s) => assert!(s.is_empty()),
            other => panic!("expected FullReload, got {other:?}"),
        }
    }

    #[test]
    fn test_classifier_adoption_cycle() {
        let mut classifier = UpdateClassifier::new();
        let mut held = series(5);
        classifier.adopt(&held);

        // Append one bar, adopt, append again
        let mut fresh = held.clone();
        fresh.push_bar(bar(5 * 60, 111.0));
        match classifier.classify(&fresh) {
            UpdateClassification::Append(new_bar) => held.push_bar(new_bar),
            other => panic!("expected Append, got {other:?}"),
        }
        classifier.adopt(&held);

        let mut next = held.clone();
        next.push_bar(bar(6 * 60, 112.0));
        assert!(matches!(
            classifier.classify(&next),
            UpdateClassification::Append(_)
        ));
    }
}
