//! Deterministic single-threaded driver tying an engine, a synthetic surface
//! and a manual clock together the way a rendering host would.

use std::time::Duration;

use crate::{
    config::CarouselConfig,
    engine::Carousel,
    geometry::{GeometryProvider, ScrollBehavior, ScrollSurface, StripSurface},
    input::{NavKey, PointerEvent},
    timeline::{Clock, FrameClock, FrameRequest},
    CarouselItem, Result,
};

/// Something observable that happened during one simulated frame.
#[derive(Debug, Clone, PartialEq)]
pub enum SimEvent {
    ActiveChanged {
        at: Duration,
        display_index: usize,
        item_id: String,
    },
    Normalized {
        at: Duration,
        offset: f64,
    },
}

#[derive(Debug)]
pub struct Simulation {
    carousel: Carousel,
    surface: StripSurface,
    clock: FrameClock,
    frame_requested: bool,
}

impl Simulation {
    /// Mounts `items` in a viewport of `viewport_width`. Cards use the
    /// configured card width and gap.
    pub fn new(
        items: Vec<CarouselItem>,
        config: CarouselConfig,
        viewport_width: f64,
        smooth_duration: Duration,
    ) -> Result<Self> {
        let layout = config.layout.clone();
        let carousel = Carousel::new(items, config, viewport_width)?;
        let surface = StripSurface::new(
            carousel.sequence().len(),
            layout.card_width,
            layout.gap,
            viewport_width,
        )
        .with_smooth_duration(smooth_duration);

        let mut sim = Self {
            carousel,
            surface,
            clock: FrameClock::new(),
            frame_requested: false,
        };
        sim.carousel.on_layout(&mut sim.surface);
        sim.frame_requested = sim.carousel.frame_request() == FrameRequest::Continue;
        Ok(sim)
    }

    pub fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    pub fn carousel_mut(&mut self) -> &mut Carousel {
        &mut self.carousel
    }

    pub fn surface(&self) -> &StripSurface {
        &self.surface
    }

    pub fn now(&self) -> Duration {
        self.clock.now()
    }

    pub fn scroll_offset(&self) -> f64 {
        self.surface.scroll_offset()
    }

    /// Whether the engine asked for another frame callback.
    pub fn frame_requested(&self) -> bool {
        self.frame_requested
    }

    /// Advances time by `dt` and delivers one frame if one was requested.
    pub fn step(&mut self, dt: Duration) -> Vec<SimEvent> {
        self.clock.advance(dt);
        let now = self.clock.now();
        let mut events = Vec::new();

        if self.surface.advance(now) {
            self.notify_scroll(&mut events);
        }

        if self.frame_requested {
            let before = self.carousel.state().active_display_index;
            let request = self.carousel.on_frame(now, &mut self.surface);
            self.frame_requested = request == FrameRequest::Continue;

            let after = self.carousel.state().active_display_index;
            if after != before {
                if let Some(item) = self.carousel.active_item() {
                    events.push(SimEvent::ActiveChanged {
                        at: now,
                        display_index: after,
                        item_id: item.id.clone(),
                    });
                }
            }
        }
        events
    }

    /// Runs frames of `frame` length until `duration` has elapsed.
    pub fn run(&mut self, duration: Duration, frame: Duration) -> Vec<SimEvent> {
        let mut events = Vec::new();
        if frame.is_zero() {
            return events;
        }
        let end = self.clock.now() + duration;
        while self.clock.now() + frame <= end {
            events.extend(self.step(frame));
        }
        events
    }

    /// User scroll to an absolute offset.
    pub fn scroll_to(&mut self, offset: f64) -> Vec<SimEvent> {
        let mut events = Vec::new();
        self.surface.scroll_to(offset, ScrollBehavior::Instant);
        self.notify_scroll(&mut events);
        events
    }

    pub fn pointer(&mut self, event: PointerEvent) {
        self.carousel.handle_pointer(event);
    }

    pub fn key(&mut self, key: NavKey) {
        self.carousel.handle_key(key, &mut self.surface);
        self.frame_requested = true;
    }

    /// Host resize: the strip re-renders with the new clone count.
    pub fn resize(&mut self, viewport_width: f64) {
        self.carousel.resize(viewport_width);
        self.surface.set_count(self.carousel.sequence().len());
        self.surface.set_viewport_width(viewport_width);
        self.frame_requested = self.carousel.frame_request() == FrameRequest::Continue;
    }

    pub fn set_items(&mut self, items: Vec<CarouselItem>) -> Result<()> {
        self.carousel.set_items(items)?;
        self.surface.set_count(self.carousel.sequence().len());
        self.frame_requested = self.carousel.frame_request() == FrameRequest::Continue;
        Ok(())
    }

    pub fn unmount(&mut self) {
        self.carousel.unmount();
        self.frame_requested = false;
    }

    fn notify_scroll(&mut self, events: &mut Vec<SimEvent>) {
        let before = self.carousel.normalization_count();
        self.carousel.on_scroll(&mut self.surface);
        if self.carousel.normalization_count() != before {
            events.push(SimEvent::Normalized {
                at: self.clock.now(),
                offset: self.surface.scroll_offset(),
            });
        }
        if self.carousel.frame_request() == FrameRequest::Continue {
            self.frame_requested = true;
        }
    }
}
