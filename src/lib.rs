#![allow(clippy::collapsible_if)]
#![allow(clippy::collapsible_else_if)]
#![allow(clippy::type_complexity)]

// Core modules
pub mod config;
pub mod data;
pub mod domain;
pub mod engine;
pub mod indicators;
pub mod models;
pub mod patterns;
pub mod sync;
pub mod utils;

// Re-export the surface collaborators actually program against
pub use config::{ENGINE_DEFAULTS, EngineConfig, IndicatorParams, PatternParams};
pub use data::{RejectReason, ValidationWarning, validate_series};
pub use domain::{Bar, BarKind, PaneViewport, RawBar};
pub use engine::{AppliedUpdate, ChartEngine, UpdateClassification, classify_update};
pub use indicators::{IndicatorKind, IndicatorSeries, IndicatorSet, compute_indicators};
pub use models::BarSeries;
pub use patterns::{Pattern, detect_patterns};
pub use sync::{
    OverlayCategory, PaneId, PaneKind, PaneRole, PaneSynchronizer, RenderContext, RenderSurface,
    SurfaceError,
};
