//! The carousel engine: owns the runtime state and reconciles scroll
//! notifications, frames and input against the measured strip.

use std::{fmt, time::Duration};

use tracing::{debug, trace};

use crate::{
    active::{nearest_display_index, ActiveIndexTracker},
    autoplay::{AutoplayGate, AutoplayScheduler, Tick},
    config::CarouselConfig,
    geometry::{ScrollBehavior, ScrollSurface},
    input::{InputController, NavKey, PointerEvent},
    item::ensure_unique_ids,
    metrics::{measure, Metrics},
    normalize::normalize_offset,
    sequence::{clone_count, ExtendedItem, ExtendedSequence},
    timeline::{FrameLoop, FrameRequest},
    view::SlideView,
    CarouselItem, Result,
};

/// Callback invoked with the logical item behind a clicked card.
pub type SelectCallback = Box<dyn FnMut(&CarouselItem)>;

/// Mutable per-instance state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarouselRuntimeState {
    pub clone_count: usize,
    pub active_display_index: usize,
    /// Set while the engine moves the scroll position itself.
    pub is_jumping: bool,
    pub is_paused: bool,
}

pub struct Carousel {
    config: CarouselConfig,
    items: Vec<CarouselItem>,
    state: CarouselRuntimeState,
    metrics: Option<Metrics>,
    metrics_dirty: bool,
    /// Item to center once metrics are (re)measured.
    recenter: Option<usize>,
    /// A normalization jump waits for the next frame to settle.
    settle_pending: bool,
    tracker: ActiveIndexTracker,
    autoplay: AutoplayScheduler,
    input: InputController,
    frames: FrameLoop,
    container_width: f64,
    normalizations: usize,
    centerings: usize,
    on_select: Option<SelectCallback>,
}

impl Carousel {
    /// Mounts a carousel for `items` inside a container of `container_width`.
    pub fn new(
        items: Vec<CarouselItem>,
        config: CarouselConfig,
        container_width: f64,
    ) -> Result<Self> {
        config.validate()?;
        ensure_unique_ids(&items)?;

        let clones = clone_count(container_width, &config.layout);
        let autoplay = AutoplayScheduler::new(&config.autoplay);
        let input = InputController::new(config.pause_on_hover);
        let recenter = (!items.is_empty()).then_some(0);

        Ok(Self {
            state: CarouselRuntimeState {
                clone_count: clones,
                active_display_index: clones,
                is_jumping: false,
                is_paused: false,
            },
            config,
            items,
            metrics: None,
            metrics_dirty: true,
            recenter,
            settle_pending: false,
            tracker: ActiveIndexTracker::new(),
            autoplay,
            input,
            frames: FrameLoop::default(),
            container_width,
            normalizations: 0,
            centerings: 0,
            on_select: None,
        })
    }

    pub fn with_on_select(mut self, callback: impl FnMut(&CarouselItem) + 'static) -> Self {
        self.on_select = Some(Box::new(callback));
        self
    }

    pub fn set_on_select(&mut self, callback: impl FnMut(&CarouselItem) + 'static) {
        self.on_select = Some(Box::new(callback));
    }

    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    pub fn items(&self) -> &[CarouselItem] {
        &self.items
    }

    pub fn state(&self) -> CarouselRuntimeState {
        self.state
    }

    pub fn metrics(&self) -> Option<Metrics> {
        self.metrics
    }

    pub fn is_mounted(&self) -> bool {
        self.frames.is_running()
    }

    /// Number of normalization jumps performed since mount.
    pub fn normalization_count(&self) -> usize {
        self.normalizations
    }

    /// Number of instant centering jumps (initial, resize, item change).
    pub fn centering_count(&self) -> usize {
        self.centerings
    }

    pub fn sequence(&self) -> ExtendedSequence {
        ExtendedSequence::new(self.items.len(), self.state.clone_count)
    }

    pub fn extended(&self) -> Vec<ExtendedItem<'_>> {
        self.sequence().build(&self.items)
    }

    pub fn slides(&self) -> Vec<SlideView<'_>> {
        let count = self.items.len();
        let active = self.state.active_display_index;
        self.extended()
            .into_iter()
            .map(|extended| SlideView::new(extended, count, active, &self.config.emphasis))
            .collect()
    }

    /// Position in the original list of the active card.
    pub fn active_source_index(&self) -> Option<usize> {
        self.sequence().source_index(self.state.active_display_index)
    }

    pub fn active_item(&self) -> Option<&CarouselItem> {
        self.active_source_index().and_then(|i| self.items.get(i))
    }

    /// Replaces the item list. The host re-renders the strip afterwards.
    pub fn set_items(&mut self, items: Vec<CarouselItem>) -> Result<()> {
        ensure_unique_ids(&items)?;
        if items == self.items {
            return Ok(());
        }

        let length_changed = items.len() != self.items.len();
        self.items = items;
        if length_changed {
            self.state.active_display_index = self.state.clone_count;
            self.tracker.cancel();
        }
        if self.items.is_empty() {
            self.metrics = None;
            self.recenter = None;
        } else if length_changed || self.metrics.is_none() {
            self.metrics_dirty = true;
            self.recenter = Some(0);
        }
        debug!(count = self.items.len(), "carousel items replaced");
        Ok(())
    }

    /// Reacts to a new container width. Metrics stay usable, if stale, until
    /// the next frame remeasures them.
    pub fn resize(&mut self, container_width: f64) {
        if container_width == self.container_width {
            return;
        }
        self.container_width = container_width;

        let active_source = self.active_source_index();
        let clones = clone_count(container_width, &self.config.layout);
        if clones != self.state.clone_count {
            debug!(
                from = self.state.clone_count,
                to = clones,
                "clone count changed"
            );
            self.state.clone_count = clones;
            self.state.active_display_index = active_source
                .and_then(|source| self.sequence().display_index_of(source))
                .unwrap_or(clones);
        }

        if !self.items.is_empty() {
            self.metrics_dirty = true;
            self.recenter = active_source.or(Some(0));
        }
    }

    /// Layout pass: measures the strip if needed and performs any pending
    /// centering jump.
    pub fn on_layout<S: ScrollSurface + ?Sized>(&mut self, surface: &mut S) {
        if !self.is_mounted() || self.items.is_empty() || self.state.is_jumping {
            return;
        }

        if self.metrics.is_none() || self.metrics_dirty {
            let sequence = self.sequence();
            match measure(&*surface, &sequence, &self.config.layout) {
                Some(metrics) => {
                    debug!(
                        start_left = metrics.start_left,
                        span_width = metrics.span_width,
                        stride = metrics.stride,
                        "measured carousel"
                    );
                    self.metrics = Some(metrics);
                    self.metrics_dirty = false;
                }
                None => {
                    trace!("carousel not laid out yet");
                    return;
                }
            }
        }

        if let Some(source) = self.recenter.take() {
            self.center_on(surface, source);
        }
    }

    /// Scroll notification from the surface.
    pub fn on_scroll<S: ScrollSurface + ?Sized>(&mut self, surface: &mut S) {
        if !self.is_mounted() || self.items.is_empty() || self.state.is_jumping {
            return;
        }
        self.tracker.request();

        let Some(metrics) = self.metrics else {
            return;
        };
        let offset = surface.scroll_offset();
        let threshold = self.config.layout.normalize_threshold;
        if let Some(fix) = normalize_offset(offset, &metrics, threshold) {
            debug!(offset, delta = fix.delta(), "normalizing scroll offset");
            self.state.is_jumping = true;
            self.settle_pending = true;
            self.normalizations += 1;
            surface.jump_by(fix.delta());
        }
    }

    /// Per-frame callback. Returns whether the host should request another frame.
    pub fn on_frame<S: ScrollSurface + ?Sized>(
        &mut self,
        now: Duration,
        surface: &mut S,
    ) -> FrameRequest {
        if !self.is_mounted() {
            return FrameRequest::Stop;
        }
        if self.items.is_empty() {
            return FrameRequest::Idle;
        }

        if self.settle_pending {
            self.settle_pending = false;
            self.state.is_jumping = false;
            self.tracker.request();
        }

        self.on_layout(surface);

        if !self.state.is_jumping {
            let len = self.sequence().len();
            let current = self.state.active_display_index;
            if let Some(index) = self.tracker.flush(&*surface, len, current) {
                trace!(from = self.state.active_display_index, to = index, "active card");
                self.state.active_display_index = index;
            }
        }

        let gate = AutoplayGate {
            stride: self.metrics.map(|m| m.stride),
            jumping: self.state.is_jumping,
            paused: self.state.is_paused,
        };
        match self.autoplay.tick(now, gate) {
            Tick::Advance(distance) => {
                debug!(distance, "autoplay advance");
                surface.scroll_by(distance, ScrollBehavior::Smooth);
            }
            Tick::Skip(reason) => trace!(?reason, "autoplay skipped"),
        }

        self.frame_request()
    }

    /// Whether the engine needs another frame to make progress.
    pub fn frame_request(&self) -> FrameRequest {
        if !self.is_mounted() {
            FrameRequest::Stop
        } else if self.items.is_empty() {
            FrameRequest::Idle
        } else if self.autoplay.is_enabled()
            || self.settle_pending
            || self.tracker.is_pending()
            || self.metrics.is_none()
            || self.metrics_dirty
        {
            FrameRequest::Continue
        } else {
            FrameRequest::Idle
        }
    }

    pub fn handle_pointer(&mut self, event: PointerEvent) {
        self.state.is_paused = self.input.handle(event);
    }

    pub fn handle_key<S: ScrollSurface + ?Sized>(&mut self, key: NavKey, surface: &mut S) {
        if !self.is_mounted() {
            return;
        }
        match key {
            NavKey::Activate => {
                self.select(self.state.active_display_index);
            }
            NavKey::Next | NavKey::Previous => {
                let Some(metrics) = self.metrics else {
                    return;
                };
                let delta = if key == NavKey::Next {
                    metrics.stride
                } else {
                    -metrics.stride
                };
                surface.scroll_by(delta, ScrollBehavior::Smooth);
            }
        }
    }

    /// Click on the card at `display_index`. Clones report their original item.
    pub fn select(&mut self, display_index: usize) -> Option<&CarouselItem> {
        let source = self.sequence().source_index(display_index)?;
        let item = self.items.get(source)?;
        if let Some(callback) = self.on_select.as_mut() {
            callback(item);
        }
        Some(item)
    }

    /// Changes the autoplay cadence. Zero stops the frame loop from
    /// requesting further frames for autoplay.
    pub fn set_autoplay_interval(&mut self, interval: Duration) {
        self.autoplay.set_interval(interval);
        self.config.autoplay.interval_ms = u64::try_from(interval.as_millis()).unwrap_or(u64::MAX);
    }

    pub fn set_pause_on_hover(&mut self, enabled: bool) {
        self.config.pause_on_hover = enabled;
        self.input.set_pause_on_hover(enabled);
        self.state.is_paused = self.input.is_paused();
    }

    /// Tears the engine down: no further frames, notifications are ignored.
    pub fn unmount(&mut self) {
        self.frames.cancel();
        self.tracker.cancel();
        self.settle_pending = false;
        self.state.is_jumping = false;
        debug!("carousel unmounted");
    }

    fn center_on<S: ScrollSurface + ?Sized>(&mut self, surface: &mut S, source: usize) {
        let Some(metrics) = self.metrics else {
            return;
        };
        let sequence = self.sequence();
        let source = source.min(self.items.len().saturating_sub(1));
        let target = sequence
            .display_index_of(source)
            .and_then(|index| surface.item_rect(index))
            .zip(surface.viewport_width())
            .map(|(rect, viewport)| rect.left - (viewport - rect.width) / 2.0)
            .unwrap_or(metrics.start_left + source as f64 * metrics.stride);

        self.state.is_jumping = true;
        surface.scroll_to(target, ScrollBehavior::Instant);
        self.state.is_jumping = false;

        if let Some(index) = nearest_display_index(&*surface, sequence.len()) {
            self.state.active_display_index = index;
        }
        self.tracker.cancel();
        self.centerings += 1;
        debug!(
            target,
            active = self.state.active_display_index,
            "centered carousel"
        );
    }
}

impl fmt::Debug for Carousel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Carousel")
            .field("items", &self.items.len())
            .field("state", &self.state)
            .field("metrics", &self.metrics)
            .field("frames", &self.frames)
            .field("container_width", &self.container_width)
            .finish()
    }
}
