//! Multi-pane coordination: one master time axis, N follower panes,
//! declarative overlays, and reload/append/tick application.

use std::collections::BTreeSet;

use anyhow::{Result, bail};

use crate::domain::PaneViewport;
use crate::indicators::IndicatorSet;
use crate::models::BarSeries;
use crate::patterns::Pattern;
use crate::sync::overlay::{
    OverlayCategory, OverlayKey, PaneKind, desired_keys, diff_overlays, indicator_for,
};
use crate::sync::pane::{Pane, PaneId, PaneLifecycle, PaneRole};
use crate::sync::registry::{SubscriptionHandle, ViewportHandler, ViewportRegistry};
use crate::sync::surface::RenderSurface;

/// Context handed to every data-building call.
/// This prevents argument explosion.
pub struct RenderContext<'a> {
    pub series: &'a BarSeries,
    pub indicators: &'a IndicatorSet,
    pub patterns: &'a [Pattern],
}

pub struct PaneSynchronizer {
    panes: Vec<Pane>,
    next_pane_id: usize,
    registry: ViewportRegistry,

    /// Desired overlay state, as toggled by the host
    active: BTreeSet<OverlayCategory>,

    /// True while a master viewport push is in flight; echoes arriving
    /// during the push are dropped instead of re-broadcast.
    broadcasting: bool,

    /// Latched on the first manual zoom/pan. Once set, reloads preserve
    /// the viewport instead of resetting it.
    user_interacted: bool,
}

impl Default for PaneSynchronizer {
    fn default() -> Self {
        Self::new()
    }
}

impl PaneSynchronizer {
    pub fn new() -> Self {
        Self {
            panes: Vec::new(),
            next_pane_id: 0,
            registry: ViewportRegistry::new(),
            active: BTreeSet::new(),
            broadcasting: false,
            user_interacted: false,
        }
    }

    // ========================================================================
    // Pane lifecycle
    // ========================================================================

    /// Mount a pane: Unmounted -> Initializing (overlays created and filled)
    /// -> Ready. At most one master may exist at a time.
    pub fn register_pane(
        &mut self,
        kind: PaneKind,
        role: PaneRole,
        surface: Box<dyn RenderSurface>,
        ctx: &RenderContext,
    ) -> Result<PaneId> {
        if role == PaneRole::Master && self.master_id().is_some() {
            bail!("a master pane is already registered");
        }

        let id = PaneId(self.next_pane_id);
        self.next_pane_id += 1;

        let mut pane = Pane {
            id,
            kind,
            role,
            lifecycle: PaneLifecycle::Unmounted,
            surface,
            viewport: None,
            mounted: BTreeSet::new(),
        };

        pane.lifecycle = PaneLifecycle::Initializing;
        log::debug!("{} ({kind:?}/{role:?}) initializing", pane.id);

        for key in desired_keys(&self.active, kind) {
            mount_key(&mut pane, key, ctx);
        }

        // A new pane joins at the shared viewport: whatever the master shows,
        // or the full data range when nothing is shown yet.
        let shared = self
            .master_viewport()
            .or_else(|| ctx.series.full_range());
        if let Some(vp) = shared {
            apply_viewport(&mut pane, vp);
        }

        pane.lifecycle = PaneLifecycle::Ready;
        log::info!("{} ready with {} overlays", pane.id, pane.mounted.len());

        self.panes.push(pane);
        Ok(id)
    }

    /// Tear a pane down, removing its series first. Surface errors here are
    /// expected (the widget may already be gone) and only logged.
    pub fn remove_pane(&mut self, id: PaneId) {
        let Some(pos) = self.panes.iter().position(|p| p.id == id) else {
            log::warn!("remove_pane: {id} not registered");
            return;
        };

        let mut pane = self.panes.remove(pos);
        for key in pane.mounted.clone() {
            if let Err(e) = pane.surface.remove_series(key) {
                log::warn!("{id}: removing {key} on teardown: {e}");
            }
        }
        log::debug!("{id} unmounted");
    }

    pub fn pane_count(&self) -> usize {
        self.panes.len()
    }

    pub fn master_id(&self) -> Option<PaneId> {
        self.panes
            .iter()
            .find(|p| p.role == PaneRole::Master)
            .map(|p| p.id)
    }

    fn master_viewport(&self) -> Option<PaneViewport> {
        self.panes
            .iter()
            .find(|p| p.role == PaneRole::Master)
            .and_then(|p| p.viewport)
    }

    pub fn viewport_of(&self, id: PaneId) -> Option<PaneViewport> {
        self.panes.iter().find(|p| p.id == id).and_then(|p| p.viewport)
    }

    pub fn mounted_of(&self, id: PaneId) -> Option<&BTreeSet<OverlayKey>> {
        self.panes.iter().find(|p| p.id == id).map(|p| &p.mounted)
    }

    pub fn user_has_interacted(&self) -> bool {
        self.user_interacted
    }

    // ========================================================================
    // Viewport propagation
    // ========================================================================

    /// Subscribe an external observer to viewport broadcasts.
    pub fn on_viewport_change(&self, handler: ViewportHandler) -> SubscriptionHandle {
        self.registry.subscribe(handler)
    }

    /// The host calls this when a pane's widget reports a new visible range.
    /// Only a master pane propagates; follower reports are absorbed, and
    /// anything arriving mid-broadcast is treated as an echo and dropped.
    pub fn notify_viewport(&mut self, id: PaneId, viewport: PaneViewport, manual: bool) {
        if self.broadcasting {
            log::trace!("{id}: viewport echo during broadcast, dropped");
            return;
        }

        let Some(pane) = self.panes.iter_mut().find(|p| p.id == id) else {
            log::warn!("notify_viewport: {id} not registered");
            return;
        };
        if !pane.is_ready() {
            return;
        }

        // Last write wins; identical writes are no-ops
        if pane.viewport == Some(viewport) {
            return;
        }
        pane.viewport = Some(viewport);

        if manual {
            self.user_interacted = true;
        }

        if self.panes.iter().any(|p| p.id == id && p.role == PaneRole::Master) {
            self.broadcast_from_master(id, viewport);
        }
    }

    /// Push the master's viewport to every follower synchronously, then let
    /// external observers know. One event, one broadcast.
    fn broadcast_from_master(&mut self, origin: PaneId, viewport: PaneViewport) {
        self.broadcasting = true;

        for pane in self.panes.iter_mut() {
            if pane.id == origin || !pane.is_ready() {
                continue;
            }
            apply_viewport(pane, viewport);
        }
        self.registry.broadcast(&viewport);

        self.broadcasting = false;
    }

    // ========================================================================
    // Overlay toggling
    // ========================================================================

    /// Flip one overlay category. Only the delta touches the surfaces:
    /// unrelated overlays and the viewport stay exactly as they are.
    pub fn toggle_overlay(&mut self, category: OverlayCategory, enabled: bool, ctx: &RenderContext) {
        let changed = if enabled {
            self.active.insert(category)
        } else {
            self.active.remove(&category)
        };
        if !changed {
            return;
        }
        log::debug!("overlay {category} -> {}", if enabled { "on" } else { "off" });

        let active = self.active.clone();
        for pane in self.panes.iter_mut() {
            if !pane.is_ready() || category.home_pane() != pane.kind {
                continue;
            }

            let desired = desired_keys(&active, pane.kind);
            let (to_add, to_remove) = diff_overlays(&pane.mounted, &desired);

            for key in to_add {
                mount_key(pane, key, ctx);
            }
            for key in to_remove {
                if let Err(e) = pane.surface.remove_series(key) {
                    log::warn!("{}: removing {key}: {e}", pane.id);
                }
                pane.mounted.remove(&key);
            }
        }
    }

    // ========================================================================
    // Update application
    // ========================================================================

    /// A fresh series replaced the held one. Every overlay is rebuilt; the
    /// viewport resets to the full data range unless the user has zoomed or
    /// panned by hand, in which case their window survives the reload.
    pub fn apply_full_reload(&mut self, ctx: &RenderContext) {
        let reset_to = if self.user_interacted {
            None
        } else {
            ctx.series.full_range()
        };

        for pane in self.panes.iter_mut() {
            if !pane.is_ready() {
                continue;
            }
            for key in pane.mounted.clone() {
                populate_key(pane, key, ctx);
            }

            // Preserved viewports are re-asserted: a widget-side setData may
            // have moved the camera.
            let target = reset_to.or(pane.viewport);
            if let Some(vp) = target {
                apply_viewport(pane, vp);
            }
        }
    }

    /// Rebuild every mounted overlay from scratch without touching any
    /// viewport. Used when indicator/pattern parameters change under a
    /// series that stayed put.
    pub fn repaint_overlays(&mut self, ctx: &RenderContext) {
        for pane in self.panes.iter_mut() {
            if !pane.is_ready() {
                continue;
            }
            for key in pane.mounted.clone() {
                populate_key(pane, key, ctx);
            }
        }
    }

    /// The still-open bar changed in place. Indicator overlays patch their
    /// tail point; pattern overlays rebuild (a tick can create or destroy a
    /// pattern wholesale). The viewport is not touched.
    pub fn apply_tick_update(&mut self, ctx: &RenderContext) {
        self.refresh_tail(ctx);
    }

    /// A new bar arrived. Same data path as a tick; the window does not move
    /// even if the bar lands outside it.
    pub fn apply_append(&mut self, ctx: &RenderContext) {
        if let (Some(last_ts), Some(vp)) = (ctx.series.last_timestamp(), self.master_viewport())
            && !vp.contains(last_ts)
        {
            log::debug!("appended bar at {last_ts} lands outside the visible window, not scrolling");
        }
        self.refresh_tail(ctx);
    }

    fn refresh_tail(&mut self, ctx: &RenderContext) {
        let Some(last_idx) = ctx.series.len().checked_sub(1) else {
            return;
        };
        let last_ts = ctx.series.timestamps[last_idx];

        for pane in self.panes.iter_mut() {
            if !pane.is_ready() {
                continue;
            }
            for key in pane.mounted.clone() {
                match indicator_for(key) {
                    Some(kind) => {
                        let tail = ctx
                            .indicators
                            .get(kind)
                            .and_then(|series| series.get(last_idx).copied().flatten());
                        if let Some(value) = tail
                            && let Err(e) = pane.surface.update_last(key, (last_ts, value))
                        {
                            log::warn!("{}: tail update {key}: {e}", pane.id);
                        }
                    }
                    None => populate_key(pane, key, ctx),
                }
            }
        }
    }
}

// ============================================================================
// Pane-local helpers (free functions so the synchronizer can split borrows)
// ============================================================================

fn apply_viewport(pane: &mut Pane, viewport: PaneViewport) {
    if let Err(e) = pane.surface.set_visible_range(viewport) {
        log::warn!("{}: set_visible_range: {e}", pane.id);
    }
    pane.viewport = Some(viewport);
}

fn mount_key(pane: &mut Pane, key: OverlayKey, ctx: &RenderContext) {
    if let Err(e) = pane.surface.create_series(key) {
        log::warn!("{}: creating {key}: {e}", pane.id);
        return;
    }
    pane.mounted.insert(key);
    populate_key(pane, key, ctx);
}

fn populate_key(pane: &mut Pane, key: OverlayKey, ctx: &RenderContext) {
    let points = points_for_key(key, ctx);
    if let Err(e) = pane.surface.set_data(key, &points) {
        log::warn!("{}: set_data {key}: {e}", pane.id);
    }
}

/// Build the full point list for one overlay series.
fn points_for_key(key: OverlayKey, ctx: &RenderContext) -> Vec<(i64, f64)> {
    match indicator_for(key) {
        Some(kind) => match ctx.indicators.get(kind) {
            Some(series) => ctx
                .series
                .timestamps
                .iter()
                .zip(series.iter())
                .filter_map(|(&ts, value)| value.map(|v| (ts, v)))
                .collect(),
            None => Vec::new(),
        },
        None => pattern_markers(key.category, ctx),
    }
}

/// Pattern overlays render as markers anchored at the bars the pattern
/// references: close prices on the price pane, volumes on the volume pane.
fn pattern_markers(category: OverlayCategory, ctx: &RenderContext) -> Vec<(i64, f64)> {
    let series = ctx.series;
    let close_point = |idx: usize| (series.timestamps[idx], series.closes[idx]);

    let mut markers: Vec<(i64, f64)> = Vec::new();

    for pattern in ctx.patterns {
        match (category, pattern) {
            (OverlayCategory::Divergences, Pattern::Divergence(d)) => {
                markers.push(close_point(d.first_idx));
                markers.push(close_point(d.second_idx));
            }
            (OverlayCategory::SupportResistance, Pattern::SupportResistance(level)) => {
                markers.extend(level.touch_indices.iter().map(|&i| close_point(i)));
            }
            (OverlayCategory::Triangles, Pattern::Triangle(t)) => {
                markers.push(close_point(t.start_idx));
                markers.push(close_point(t.end_idx));
            }
            (OverlayCategory::Flags, Pattern::Flag(f)) => {
                markers.push(close_point(f.start_idx));
                markers.push(close_point(f.end_idx));
            }
            (OverlayCategory::DoubleTopsBottoms, Pattern::DoubleTopBottom(d)) => {
                markers.push(close_point(d.first_idx));
                markers.push(close_point(d.second_idx));
            }
            (OverlayCategory::VolumeAnomalies, Pattern::VolumeAnomaly(v)) => {
                markers.push((series.timestamps[v.index], series.volumes[v.index]));
            }
            _ => {}
        }
    }

    markers.sort_by_key(|(ts, _)| *ts);
    markers.dedup_by_key(|(ts, _)| *ts);
    markers
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::BTreeMap;
    use std::rc::Rc;

    use crate::config::INDICATORS;
    use crate::domain::Bar;
    use crate::indicators::compute_indicators;
    use crate::sync::overlay::OverlayPart;
    use crate::sync::surface::SurfaceError;

    #[derive(Default)]
    struct SurfaceState {
        created: BTreeSet<OverlayKey>,
        data: BTreeMap<OverlayKey, Vec<(i64, f64)>>,
        viewport: Option<PaneViewport>,
        set_range_calls: usize,
        update_last_calls: usize,
        fail_remove: bool,
    }

    /// Records every call so tests can assert exactly what the synchronizer
    /// touched. Cloning shares the state, letting the test keep a probe after
    /// the box moves into the pane.
    #[derive(Clone, Default)]
    struct RecordingSurface(Rc<RefCell<SurfaceState>>);

    impl RenderSurface for RecordingSurface {
        fn create_series(&mut self, key: OverlayKey) -> Result<(), SurfaceError> {
            self.0.borrow_mut().created.insert(key);
            Ok(())
        }

        fn remove_series(&mut self, key: OverlayKey) -> Result<(), SurfaceError> {
            let mut state = self.0.borrow_mut();
            if state.fail_remove {
                return Err(SurfaceError::Disposed);
            }
            if !state.created.remove(&key) {
                return Err(SurfaceError::UnknownSeries(key));
            }
            state.data.remove(&key);
            Ok(())
        }

        fn set_data(&mut self, key: OverlayKey, points: &[(i64, f64)]) -> Result<(), SurfaceError> {
            let mut state = self.0.borrow_mut();
            if !state.created.contains(&key) {
                return Err(SurfaceError::UnknownSeries(key));
            }
            state.data.insert(key, points.to_vec());
            Ok(())
        }

        fn update_last(&mut self, key: OverlayKey, point: (i64, f64)) -> Result<(), SurfaceError> {
            let mut state = self.0.borrow_mut();
            if !state.created.contains(&key) {
                return Err(SurfaceError::UnknownSeries(key));
            }
            state.update_last_calls += 1;
            let points = state.data.entry(key).or_default();
            match points.last_mut() {
                Some(last) if last.0 == point.0 => *last = point,
                _ => points.push(point),
            }
            Ok(())
        }

        fn visible_range(&self) -> Option<PaneViewport> {
            self.0.borrow().viewport
        }

        fn set_visible_range(&mut self, viewport: PaneViewport) -> Result<(), SurfaceError> {
            let mut state = self.0.borrow_mut();
            state.viewport = Some(viewport);
            state.set_range_calls += 1;
            Ok(())
        }
    }

    fn sample_series(n: usize) -> BarSeries {
        let bars: Vec<Bar> = (0..n)
            .map(|i| {
                let base = 100.0 + (i % 7) as f64;
                Bar::new(i as i64 * 60, base, base + 2.0, base - 2.0, base + 1.0, 100.0)
            })
            .collect();
        BarSeries::from_bars(bars)
    }

    struct Fixture {
        series: BarSeries,
        indicators: IndicatorSet,
        patterns: Vec<Pattern>,
    }

    impl Fixture {
        fn new(n: usize) -> Self {
            let series = sample_series(n);
            let indicators = compute_indicators(&series, &INDICATORS);
            Self {
                series,
                indicators,
                patterns: Vec::new(),
            }
        }

        fn ctx(&self) -> RenderContext<'_> {
            RenderContext {
                series: &self.series,
                indicators: &self.indicators,
                patterns: &self.patterns,
            }
        }
    }

    fn three_pane_setup(
        sync: &mut PaneSynchronizer,
        fixture: &Fixture,
    ) -> (PaneId, PaneId, PaneId, Vec<RecordingSurface>) {
        let surfaces: Vec<RecordingSurface> =
            (0..3).map(|_| RecordingSurface::default()).collect();

        let master = sync
            .register_pane(
                PaneKind::Price,
                PaneRole::Master,
                Box::new(surfaces[0].clone()),
                &fixture.ctx(),
            )
            .unwrap();
        let follower_a = sync
            .register_pane(
                PaneKind::Volume,
                PaneRole::Follower,
                Box::new(surfaces[1].clone()),
                &fixture.ctx(),
            )
            .unwrap();
        let follower_b = sync
            .register_pane(
                PaneKind::Oscillator,
                PaneRole::Follower,
                Box::new(surfaces[2].clone()),
                &fixture.ctx(),
            )
            .unwrap();

        (master, follower_a, follower_b, surfaces)
    }

    #[test]
    fn test_single_master_enforced() {
        let fixture = Fixture::new(30);
        let mut sync = PaneSynchronizer::new();

        sync.register_pane(
            PaneKind::Price,
            PaneRole::Master,
            Box::new(RecordingSurface::default()),
            &fixture.ctx(),
        )
        .unwrap();

        let second = sync.register_pane(
            PaneKind::Volume,
            PaneRole::Master,
            Box::new(RecordingSurface::default()),
            &fixture.ctx(),
        );
        assert!(second.is_err());
    }

    #[test]
    fn test_master_change_reaches_all_followers_once() {
        let fixture = Fixture::new(30);
        let mut sync = PaneSynchronizer::new();
        let (master, follower_a, follower_b, surfaces) = three_pane_setup(&mut sync, &fixture);

        let broadcast_count = Rc::new(RefCell::new(0u32));
        let counter = broadcast_count.clone();
        let _handle = sync.on_viewport_change(Box::new(move |_| {
            *counter.borrow_mut() += 1;
        }));

        let calls_before: Vec<usize> =
            surfaces.iter().map(|s| s.0.borrow().set_range_calls).collect();

        let window = PaneViewport::new(300, 900);
        sync.notify_viewport(master, window, true);

        assert_eq!(sync.viewport_of(follower_a), Some(window));
        assert_eq!(sync.viewport_of(follower_b), Some(window));
        assert_eq!(*broadcast_count.borrow(), 1);

        // Exactly one set_visible_range per follower, none extra on the master
        assert_eq!(surfaces[0].0.borrow().set_range_calls, calls_before[0]);
        assert_eq!(surfaces[1].0.borrow().set_range_calls, calls_before[1] + 1);
        assert_eq!(surfaces[2].0.borrow().set_range_calls, calls_before[2] + 1);

        // The host relaying a follower's change event back must not trigger
        // a second broadcast round.
        sync.notify_viewport(follower_a, window, false);
        assert_eq!(*broadcast_count.borrow(), 1);
        assert_eq!(surfaces[1].0.borrow().set_range_calls, calls_before[1] + 1);
        assert_eq!(surfaces[2].0.borrow().set_range_calls, calls_before[2] + 1);
    }

    #[test]
    fn test_follower_change_does_not_propagate() {
        let fixture = Fixture::new(30);
        let mut sync = PaneSynchronizer::new();
        let (master, follower_a, follower_b, _surfaces) = three_pane_setup(&mut sync, &fixture);

        let before_master = sync.viewport_of(master);
        let window = PaneViewport::new(60, 240);
        sync.notify_viewport(follower_a, window, true);

        assert_eq!(sync.viewport_of(follower_a), Some(window));
        assert_eq!(sync.viewport_of(master), before_master);
        assert_ne!(sync.viewport_of(follower_b), Some(window));
    }

    #[test]
    fn test_full_reload_resets_viewport_when_untouched() {
        let fixture = Fixture::new(30);
        let mut sync = PaneSynchronizer::new();
        let (master, follower_a, _b, _surfaces) = three_pane_setup(&mut sync, &fixture);

        let grown = Fixture::new(50);
        sync.apply_full_reload(&grown.ctx());

        let full = grown.series.full_range().unwrap();
        assert_eq!(sync.viewport_of(master), Some(full));
        assert_eq!(sync.viewport_of(follower_a), Some(full));
    }

    #[test]
    fn test_full_reload_preserves_viewport_after_manual_zoom() {
        let fixture = Fixture::new(30);
        let mut sync = PaneSynchronizer::new();
        let (master, follower_a, _b, _surfaces) = three_pane_setup(&mut sync, &fixture);

        let window = PaneViewport::new(300, 600);
        sync.notify_viewport(master, window, true);
        assert!(sync.user_has_interacted());

        let grown = Fixture::new(50);
        sync.apply_full_reload(&grown.ctx());

        assert_eq!(sync.viewport_of(master), Some(window));
        assert_eq!(sync.viewport_of(follower_a), Some(window));
    }

    #[test]
    fn test_toggle_overlay_touches_only_its_delta() {
        let fixture = Fixture::new(40);
        let mut sync = PaneSynchronizer::new();
        let (master, _a, _b, surfaces) = three_pane_setup(&mut sync, &fixture);

        sync.toggle_overlay(OverlayCategory::Sma, true, &fixture.ctx());
        sync.toggle_overlay(OverlayCategory::Bollinger, true, &fixture.ctx());

        let mounted = sync.mounted_of(master).unwrap();
        assert_eq!(mounted.len(), 4); // SMA + three bands
        let viewport_calls = surfaces[0].0.borrow().set_range_calls;

        // Turning Bollinger off must leave the SMA series alone
        sync.toggle_overlay(OverlayCategory::Bollinger, false, &fixture.ctx());
        let mounted = sync.mounted_of(master).unwrap();
        assert_eq!(mounted.len(), 1);
        assert_eq!(
            mounted.iter().next().unwrap().category,
            OverlayCategory::Sma
        );

        // And the viewport is untouched by overlay churn
        assert_eq!(surfaces[0].0.borrow().set_range_calls, viewport_calls);

        // Idempotent: toggling off twice is a no-op
        sync.toggle_overlay(OverlayCategory::Bollinger, false, &fixture.ctx());
        assert_eq!(sync.mounted_of(master).unwrap().len(), 1);
    }

    #[test]
    fn test_overlay_data_follows_warm_up() {
        let fixture = Fixture::new(40);
        let mut sync = PaneSynchronizer::new();
        let (_m, _a, _b, surfaces) = three_pane_setup(&mut sync, &fixture);

        sync.toggle_overlay(OverlayCategory::Sma, true, &fixture.ctx());

        let state = surfaces[0].0.borrow();
        let key = OverlayKey {
            category: OverlayCategory::Sma,
            part: OverlayPart::Main,
        };
        let points = state.data.get(&key).unwrap();
        // 40 bars minus the 19-bar warm-up gap
        assert_eq!(points.len(), 21);
        assert_eq!(points[0].0, 19 * 60);
    }

    #[test]
    fn test_append_leaves_viewport_alone_and_patches_tail() {
        let fixture = Fixture::new(40);
        let mut sync = PaneSynchronizer::new();
        let (master, _a, _b, surfaces) = three_pane_setup(&mut sync, &fixture);
        sync.toggle_overlay(OverlayCategory::Sma, true, &fixture.ctx());

        let window = PaneViewport::new(0, 600);
        sync.notify_viewport(master, window, true);

        let grown = Fixture::new(41);
        sync.apply_append(&grown.ctx());

        assert_eq!(sync.viewport_of(master), Some(window));
        assert!(surfaces[0].0.borrow().update_last_calls >= 1);
    }

    #[test]
    fn test_teardown_swallows_surface_errors() {
        let fixture = Fixture::new(40);
        let mut sync = PaneSynchronizer::new();
        let (master, _a, _b, surfaces) = three_pane_setup(&mut sync, &fixture);
        sync.toggle_overlay(OverlayCategory::Sma, true, &fixture.ctx());

        // Simulate the widget being disposed before teardown
        surfaces[0].0.borrow_mut().fail_remove = true;
        sync.remove_pane(master);
        assert_eq!(sync.pane_count(), 2);
        assert_eq!(sync.master_id(), None);
    }
}
