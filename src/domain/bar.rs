use serde::{Deserialize, Serialize};

// Define the BarKind enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BarKind {
    Bullish,
    Bearish,
}

/// One raw OHLCV candidate as delivered by the external feed adapter.
/// Nothing here has been checked yet; the Series Validator decides what survives.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawBar {
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

// Define the Bar struct with all its properties
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// UTC epoch seconds. Strictly increasing across a series.
    pub timestamp: i64,

    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,

    pub volume: f64,
}

// Implement methods for the Bar struct
impl Bar {
    // A constructor for convenience
    pub fn new(timestamp: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Bar {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    // A method to determine the type of bar
    pub fn kind(&self) -> BarKind {
        if self.close >= self.open {
            BarKind::Bullish
        } else {
            BarKind::Bearish
        }
    }

    /// True Range against the previous close.
    /// Pass None for the very first bar of a series.
    pub fn true_range(&self, prev_close: Option<f64>) -> f64 {
        let hl = self.high - self.low;
        match prev_close {
            None => hl,
            Some(pc) => hl.max((self.high - pc).abs()).max((self.low - pc).abs()),
        }
    }

    /// OHLC consistency: low <= open,close <= high and low <= high.
    pub fn ohlc_consistent(&self) -> bool {
        self.low <= self.high
            && self.low <= self.open
            && self.low <= self.close
            && self.open <= self.high
            && self.close <= self.high
    }
}

impl RawBar {
    pub fn has_finite_values(&self) -> bool {
        self.open.is_finite()
            && self.high.is_finite()
            && self.low.is_finite()
            && self.close.is_finite()
            && self.volume.is_finite()
    }

    pub fn has_negative_values(&self) -> bool {
        self.open < 0.0 || self.high < 0.0 || self.low < 0.0 || self.close < 0.0 || self.volume < 0.0
    }

    /// Promote to a validated Bar. Caller must have run the checks first.
    pub fn into_bar(self) -> Bar {
        Bar::new(
            self.timestamp,
            self.open,
            self.high,
            self.low,
            self.close,
            self.volume,
        )
    }
}
