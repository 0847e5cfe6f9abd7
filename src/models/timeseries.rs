use serde::{Deserialize, Serialize};

use crate::domain::{Bar, PaneViewport};

// ============================================================================
// BarSeries: validated OHLCV time series, column-major storage
// ============================================================================

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct BarSeries {
    /// UTC epoch seconds, strictly increasing.
    pub timestamps: Vec<i64>,

    // Prices
    pub opens: Vec<f64>,
    pub highs: Vec<f64>,
    pub lows: Vec<f64>,
    pub closes: Vec<f64>,

    pub volumes: Vec<f64>,
}

impl BarSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a series from validated bars. The caller guarantees ordering.
    pub fn from_bars(bars: Vec<Bar>) -> Self {
        let len = bars.len();

        // Pre-allocate everything
        let mut ts_vec = Vec::with_capacity(len);
        let mut open_vec = Vec::with_capacity(len);
        let mut high_vec = Vec::with_capacity(len);
        let mut low_vec = Vec::with_capacity(len);
        let mut close_vec = Vec::with_capacity(len);
        let mut vol_vec = Vec::with_capacity(len);

        for b in bars {
            ts_vec.push(b.timestamp);
            open_vec.push(b.open);
            high_vec.push(b.high);
            low_vec.push(b.low);
            close_vec.push(b.close);
            vol_vec.push(b.volume);
        }

        Self {
            timestamps: ts_vec,
            opens: open_vec,
            highs: high_vec,
            lows: low_vec,
            closes: close_vec,
            volumes: vol_vec,
        }
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn get_bar(&self, idx: usize) -> Bar {
        Bar::new(
            self.timestamps[idx],
            self.opens[idx],
            self.highs[idx],
            self.lows[idx],
            self.closes[idx],
            self.volumes[idx],
        )
    }

    pub fn first_timestamp(&self) -> Option<i64> {
        self.timestamps.first().copied()
    }

    pub fn last_timestamp(&self) -> Option<i64> {
        self.timestamps.last().copied()
    }

    pub fn last_bar(&self) -> Option<Bar> {
        if self.is_empty() {
            None
        } else {
            Some(self.get_bar(self.len() - 1))
        }
    }

    /// Append a new bar at the tail. The Append patch from the classifier.
    pub fn push_bar(&mut self, bar: Bar) {
        self.timestamps.push(bar.timestamp);
        self.opens.push(bar.open);
        self.highs.push(bar.high);
        self.lows.push(bar.low);
        self.closes.push(bar.close);
        self.volumes.push(bar.volume);
    }

    /// Overwrite the last (still-forming) bar in place. The TickUpdate patch.
    /// Ignored on an empty series or a timestamp mismatch.
    pub fn patch_last(&mut self, bar: &Bar) {
        if self.is_empty() {
            return;
        }
        let last_idx = self.len() - 1;
        if self.timestamps[last_idx] != bar.timestamp {
            return;
        }

        self.opens[last_idx] = bar.open;
        self.highs[last_idx] = bar.high;
        self.lows[last_idx] = bar.low;
        self.closes[last_idx] = bar.close;
        self.volumes[last_idx] = bar.volume;
    }

    /// The viewport covering the whole series, if any data exists.
    pub fn full_range(&self) -> Option<PaneViewport> {
        match (self.first_timestamp(), self.last_timestamp()) {
            (Some(from), Some(to)) => Some(PaneViewport::new(from, to)),
            _ => None,
        }
    }

    /// Half-open index range [start, end) of bars whose timestamps fall inside the window.
    pub fn indices_in_window(&self, viewport: &PaneViewport) -> (usize, usize) {
        let start = self.timestamps.partition_point(|&ts| ts < viewport.from);
        let end = self.timestamps.partition_point(|&ts| ts <= viewport.to);
        (start, end)
    }
}
