//! Per-pane state.

use std::collections::BTreeSet;
use std::fmt;

use crate::domain::PaneViewport;
use crate::sync::overlay::{OverlayKey, PaneKind};
use crate::sync::surface::RenderSurface;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PaneId(pub usize);

impl fmt::Display for PaneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pane#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaneRole {
    /// The pane whose viewport drives everyone else
    Master,
    Follower,
}

/// Mount lifecycle. A pane only accepts data and viewport pushes once Ready.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaneLifecycle {
    Unmounted,
    Initializing,
    Ready,
}

pub(crate) struct Pane {
    pub id: PaneId,
    pub kind: PaneKind,
    pub role: PaneRole,
    pub lifecycle: PaneLifecycle,
    pub surface: Box<dyn RenderSurface>,
    /// Last viewport this pane was told about (or reported itself)
    pub viewport: Option<PaneViewport>,
    /// Overlay series currently alive on the surface
    pub mounted: BTreeSet<OverlayKey>,
}

impl Pane {
    pub fn is_ready(&self) -> bool {
        self.lifecycle == PaneLifecycle::Ready
    }
}
