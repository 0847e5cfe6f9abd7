use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::RawBar;
use crate::models::BarSeries;
use crate::utils::time_utils::epoch_sec_to_utc;

// ============================================================================
// Rejection bookkeeping
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectReason {
    /// NaN or infinity somewhere in the OHLCV fields
    NonFinite,
    /// A negative price or volume
    Negative,
    /// low/high/open/close ordering broken
    OhlcViolation,
    /// Timestamp not strictly greater than the previous accepted bar
    NonMonotonicTimestamp,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFinite => write!(f, "non-finite value"),
            Self::Negative => write!(f, "negative value"),
            Self::OhlcViolation => write!(f, "OHLC invariant violation"),
            Self::NonMonotonicTimestamp => write!(f, "non-monotonic timestamp"),
        }
    }
}

/// One rejected bar. Downstream consumers never see the bar itself;
/// these are kept purely for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValidationWarning {
    pub timestamp: i64,
    pub reason: RejectReason,
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rejected bar at {} ({}): {}",
            self.timestamp,
            epoch_sec_to_utc(self.timestamp),
            self.reason
        )
    }
}

// ============================================================================
// The validator
// ============================================================================

/// Filter a raw candidate stream down to a clean BarSeries.
///
/// Rejection is silent to downstream consumers; each dropped bar leaves a
/// warning behind and a log line at warn level.
pub fn validate_series(candidates: &[RawBar]) -> (BarSeries, Vec<ValidationWarning>) {
    let mut series = BarSeries::new();
    let mut warnings = Vec::new();

    let mut last_accepted_ts: Option<i64> = None;

    for raw in candidates {
        let reason = check_bar(raw, last_accepted_ts);

        match reason {
            Some(reason) => {
                let warning = ValidationWarning {
                    timestamp: raw.timestamp,
                    reason,
                };
                log::warn!("validator: {}", warning);
                warnings.push(warning);
            }
            None => {
                last_accepted_ts = Some(raw.timestamp);
                series.push_bar(raw.into_bar());
            }
        }
    }

    (series, warnings)
}

/// First failing check wins. Ordering matters: a NaN bar would also trip the
/// OHLC comparison, so finiteness is checked before anything else.
fn check_bar(raw: &RawBar, last_accepted_ts: Option<i64>) -> Option<RejectReason> {
    if !raw.has_finite_values() {
        return Some(RejectReason::NonFinite);
    }
    if raw.has_negative_values() {
        return Some(RejectReason::Negative);
    }
    if !raw.into_bar().ohlc_consistent() {
        return Some(RejectReason::OhlcViolation);
    }
    if let Some(last_ts) = last_accepted_ts {
        // Duplicates count as non-monotonic too
        if raw.timestamp <= last_ts {
            return Some(RejectReason::NonMonotonicTimestamp);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(ts: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> RawBar {
        RawBar {
            timestamp: ts,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    #[test]
    fn test_clean_stream_passes_through() {
        let candidates = vec![
            raw(100, 10.0, 12.0, 9.0, 11.0, 50.0),
            raw(160, 11.0, 13.0, 10.0, 12.0, 60.0),
        ];
        let (series, warnings) = validate_series(&candidates);
        assert_eq!(series.len(), 2);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_rejects_non_finite_and_negative() {
        let candidates = vec![
            raw(100, 10.0, 12.0, 9.0, f64::NAN, 50.0),
            raw(160, 10.0, 12.0, 9.0, 11.0, -5.0),
            raw(220, 10.0, 12.0, 9.0, 11.0, 50.0),
        ];
        let (series, warnings) = validate_series(&candidates);
        assert_eq!(series.len(), 1);
        assert_eq!(series.first_timestamp(), Some(220));
        assert_eq!(warnings.len(), 2);
        assert_eq!(warnings[0].reason, RejectReason::NonFinite);
        assert_eq!(warnings[1].reason, RejectReason::Negative);
    }

    #[test]
    fn test_rejects_ohlc_violation() {
        // close above high
        let candidates = vec![raw(100, 10.0, 12.0, 9.0, 14.0, 50.0)];
        let (series, warnings) = validate_series(&candidates);
        assert!(series.is_empty());
        assert_eq!(warnings[0].reason, RejectReason::OhlcViolation);
    }

    #[test]
    fn test_rejects_duplicate_and_backwards_timestamps() {
        let candidates = vec![
            raw(100, 10.0, 12.0, 9.0, 11.0, 50.0),
            raw(100, 10.0, 12.0, 9.0, 11.0, 50.0), // duplicate
            raw(40, 10.0, 12.0, 9.0, 11.0, 50.0),  // backwards
            raw(160, 10.0, 12.0, 9.0, 11.0, 50.0),
        ];
        let (series, warnings) = validate_series(&candidates);
        assert_eq!(series.len(), 2);
        assert_eq!(warnings.len(), 2);
        assert!(
            warnings
                .iter()
                .all(|w| w.reason == RejectReason::NonMonotonicTimestamp)
        );
    }

    #[test]
    fn test_rejection_is_silent_downstream() {
        // The surviving series carries no trace of the bad bar
        let candidates = vec![
            raw(100, 10.0, 12.0, 9.0, 11.0, 50.0),
            raw(160, f64::INFINITY, 13.0, 10.0, 12.0, 60.0),
            raw(220, 11.0, 13.0, 10.0, 12.0, 60.0),
        ];
        let (series, warnings) = validate_series(&candidates);
        assert_eq!(series.timestamps, vec![100, 220]);
        assert_eq!(warnings.len(), 1);
    }
}
