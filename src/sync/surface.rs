//! The boundary to the external charting widget.
//!
//! Everything behind this trait is a collaborator; failures coming back from
//! it are logged at the boundary and never reach the computation core.

use std::fmt;

use crate::domain::PaneViewport;
use crate::sync::overlay::OverlayKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceError {
    /// The pane's widget has already been torn down by the host
    Disposed,
    /// Operation against a series that was never created (or already removed)
    UnknownSeries(OverlayKey),
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disposed => write!(f, "surface already disposed"),
            Self::UnknownSeries(key) => write!(f, "unknown series {}", key),
        }
    }
}

impl std::error::Error for SurfaceError {}

/// One rendering surface per pane. Mirrors the operations the external
/// widget exposes: series lifecycle, data push, and the visible time range.
pub trait RenderSurface {
    fn create_series(&mut self, key: OverlayKey) -> Result<(), SurfaceError>;
    fn remove_series(&mut self, key: OverlayKey) -> Result<(), SurfaceError>;

    /// Replace the full data of one series.
    fn set_data(&mut self, key: OverlayKey, points: &[(i64, f64)]) -> Result<(), SurfaceError>;
    /// Patch the point at `point.0`, or extend the series if it is new.
    fn update_last(&mut self, key: OverlayKey, point: (i64, f64)) -> Result<(), SurfaceError>;

    fn visible_range(&self) -> Option<PaneViewport>;
    fn set_visible_range(&mut self, viewport: PaneViewport) -> Result<(), SurfaceError>;
}
