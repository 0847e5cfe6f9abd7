//! The delivery loop: validate, classify, patch, recompute, propagate.
//!
//! Logically single-threaded. The external feed adapter pushes candidate
//! series into the channel from wherever it likes; the host drives
//! `process_pending` from its update loop and each delivery is processed to
//! completion before the next is taken.

use std::sync::mpsc::{Receiver, Sender, channel};

use anyhow::Result;

use crate::config::EngineConfig;
use crate::data::{ValidationWarning, validate_series};
use crate::domain::{PaneViewport, RawBar};
use crate::indicators::{IndicatorSet, compute_indicators};
use crate::models::BarSeries;
use crate::patterns::{Pattern, detect_patterns};
use crate::sync::{
    OverlayCategory, PaneId, PaneKind, PaneRole, PaneSynchronizer, RenderContext, RenderSurface,
    SubscriptionHandle, ViewportHandler,
};
use crate::utils::TimeUtils;
use crate::utils::time_utils::format_duration;

use super::classifier::{UpdateClassification, UpdateClassifier};

/// What a processed delivery amounted to, for observability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppliedUpdate {
    FullReload,
    TickUpdate,
    Append,
}

pub struct ChartEngine {
    /// THE FRONT BUFFER.
    /// The validated series every downstream computation reads.
    held: BarSeries,
    warnings: Vec<ValidationWarning>,

    /// Pure derivations of `held`; rebuilt whenever it (or the config) changes
    indicators: IndicatorSet,
    patterns: Vec<Pattern>,

    classifier: UpdateClassifier,
    sync: PaneSynchronizer,
    config: EngineConfig,

    // Live Data Channels
    delivery_rx: Receiver<Vec<RawBar>>,
    /// Public so the feed adapter can grab it easily
    pub delivery_tx: Sender<Vec<RawBar>>,
}

impl ChartEngine {
    pub fn new(config: EngineConfig) -> Self {
        let (delivery_tx, delivery_rx) = channel();

        Self {
            held: BarSeries::new(),
            warnings: Vec::new(),
            indicators: IndicatorSet::default(),
            patterns: Vec::new(),
            classifier: UpdateClassifier::new(),
            sync: PaneSynchronizer::new(),
            config,
            delivery_rx,
            delivery_tx,
        }
    }

    // ========================================================================
    // Delivery processing
    // ========================================================================

    /// Drain the feed channel. Deliveries are applied strictly in arrival
    /// order, each one fully (classified, recomputed, propagated) before the
    /// next is looked at.
    pub fn process_pending(&mut self) -> usize {
        let mut deliveries = Vec::new();
        while let Ok(batch) = self.delivery_rx.try_recv() {
            deliveries.push(batch);
        }

        let count = deliveries.len();
        for batch in deliveries {
            self.ingest(&batch);
        }
        count
    }

    /// Apply one candidate series synchronously.
    pub fn ingest(&mut self, candidates: &[RawBar]) -> AppliedUpdate {
        let (fresh, warnings) = validate_series(candidates);
        self.warnings = warnings;

        let applied = match self.classifier.classify(&fresh) {
            UpdateClassification::FullReload(series) => {
                match (series.first_timestamp(), series.last_timestamp()) {
                    (Some(first), Some(last)) => {
                        let interval = series.timestamps.get(1).map_or(0, |&t| t - first);
                        log::info!(
                            "full reload: {} bars ({}) spanning {}",
                            series.len(),
                            TimeUtils::interval_to_string(interval),
                            format_duration(last - first)
                        );
                    }
                    _ => log::info!("full reload: empty series"),
                }
                self.held = series;
                self.recompute();
                self.sync
                    .apply_full_reload(&render_ctx(&self.held, &self.indicators, &self.patterns));
                AppliedUpdate::FullReload
            }

            UpdateClassification::TickUpdate(bar) => {
                let changed = self.held.last_bar().is_some_and(|held_last| held_last != bar);
                if changed {
                    self.held.patch_last(&bar);
                    self.recompute();
                    self.sync.apply_tick_update(&render_ctx(
                        &self.held,
                        &self.indicators,
                        &self.patterns,
                    ));
                }
                AppliedUpdate::TickUpdate
            }

            UpdateClassification::Append(bar) => {
                self.held.push_bar(bar);
                self.recompute();
                self.sync
                    .apply_append(&render_ctx(&self.held, &self.indicators, &self.patterns));
                AppliedUpdate::Append
            }
        };

        self.classifier.adopt(&self.held);
        applied
    }

    fn recompute(&mut self) {
        self.indicators = compute_indicators(&self.held, &self.config.indicators);
        self.patterns = detect_patterns(&self.held, &self.indicators, &self.config.patterns);
    }

    // ========================================================================
    // Pane surface API (thin wrappers handing the synchronizer its context)
    // ========================================================================

    pub fn register_pane(
        &mut self,
        kind: PaneKind,
        role: PaneRole,
        surface: Box<dyn RenderSurface>,
    ) -> Result<PaneId> {
        let ctx = render_ctx(&self.held, &self.indicators, &self.patterns);
        self.sync.register_pane(kind, role, surface, &ctx)
    }

    pub fn remove_pane(&mut self, id: PaneId) {
        self.sync.remove_pane(id);
    }

    pub fn toggle_overlay(&mut self, category: OverlayCategory, enabled: bool) {
        let ctx = render_ctx(&self.held, &self.indicators, &self.patterns);
        self.sync.toggle_overlay(category, enabled, &ctx);
    }

    pub fn notify_viewport(&mut self, id: PaneId, viewport: PaneViewport, manual: bool) {
        self.sync.notify_viewport(id, viewport, manual);
    }

    pub fn on_viewport_change(&self, handler: ViewportHandler) -> SubscriptionHandle {
        self.sync.on_viewport_change(handler)
    }

    // ========================================================================
    // Configuration
    // ========================================================================

    /// Swap indicator/pattern parameters and rebuild all derivations.
    /// Overlays repaint in place; viewports are not touched.
    pub fn set_config(&mut self, config: EngineConfig) {
        self.config = config;
        self.recompute();
        self.sync
            .repaint_overlays(&render_ctx(&self.held, &self.indicators, &self.patterns));
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn series(&self) -> &BarSeries {
        &self.held
    }

    pub fn indicators(&self) -> &IndicatorSet {
        &self.indicators
    }

    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    /// Warnings from the most recent delivery's validation pass.
    pub fn warnings(&self) -> &[ValidationWarning] {
        &self.warnings
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn synchronizer(&self) -> &PaneSynchronizer {
        &self.sync
    }

    /// Machine-readable snapshot of the engine's state, for the host's
    /// diagnostics panel.
    pub fn diagnostics(&self) -> serde_json::Value {
        serde_json::json!({
            "bars": self.held.len(),
            "first_ts": self.held.first_timestamp(),
            "last_ts": self.held.last_timestamp(),
            "warnings": self.warnings,
            "indicator_count": self.indicators.len(),
            "pattern_count": self.patterns.len(),
            "panes": self.sync.pane_count(),
        })
    }
}

fn render_ctx<'a>(
    series: &'a BarSeries,
    indicators: &'a IndicatorSet,
    patterns: &'a [Pattern],
) -> RenderContext<'a> {
    RenderContext {
        series,
        indicators,
        patterns,
    }
}
