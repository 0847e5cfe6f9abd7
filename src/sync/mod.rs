//! Multi-pane time-axis synchronization and overlay management.

mod overlay;
mod pane;
mod registry;
mod surface;
mod synchronizer;

pub use overlay::{
    OverlayCategory, OverlayKey, OverlayPart, PaneKind, desired_keys, diff_overlays, indicator_for,
};
pub use pane::{PaneId, PaneLifecycle, PaneRole};
pub use registry::{SubscriptionHandle, ViewportHandler, ViewportRegistry};
pub use surface::{RenderSurface, SurfaceError};
pub use synchronizer::{PaneSynchronizer, RenderContext};
