use serde::{Deserialize, Serialize};

/// The visible time window of one pane. Ephemeral UI state, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaneViewport {
    pub from: i64,
    pub to: i64,
}

impl PaneViewport {
    pub fn new(from: i64, to: i64) -> Self {
        // Normalize so `from <= to` whatever the caller hands us
        if from <= to {
            Self { from, to }
        } else {
            Self { from: to, to: from }
        }
    }

    pub fn contains(&self, timestamp: i64) -> bool {
        timestamp >= self.from && timestamp <= self.to
    }
}
