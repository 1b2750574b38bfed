//! Access to the rendering surface.
//!
//! The engine never talks to a real widget tree. Hosts implement
//! [`GeometryProvider`] and [`ScrollSurface`] over whatever draws the strip;
//! [`StripSurface`] is a synthetic implementation with uniform cards used by
//! tests and the command line driver.

use std::time::Duration;

/// Horizontal placement of one displayed card, relative to the start of the
/// scrollable content.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemRect {
    pub left: f64,
    pub width: f64,
}

impl ItemRect {
    pub fn center(&self) -> f64 {
        self.left + self.width / 2.0
    }
}

/// How a scroll request should reach its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    /// Jump immediately, without animation.
    Instant,
    /// Animate towards the target over subsequent frames.
    Smooth,
}

/// Read-only view over the laid out strip.
pub trait GeometryProvider {
    /// Width of the visible viewport, or `None` while the container is not laid out.
    fn viewport_width(&self) -> Option<f64>;

    fn scroll_offset(&self) -> f64;

    /// Rect of the card at `display_index`, or `None` if it is not laid out.
    fn item_rect(&self, display_index: usize) -> Option<ItemRect>;

    /// Spacing between adjacent cards, when the surface can report it.
    fn gap(&self) -> Option<f64>;
}

/// A geometry provider whose scroll position can be driven.
pub trait ScrollSurface: GeometryProvider {
    fn scroll_to(&mut self, offset: f64, behavior: ScrollBehavior);

    fn scroll_by(&mut self, delta: f64, behavior: ScrollBehavior) {
        let target = self.scroll_offset() + delta;
        self.scroll_to(target, behavior);
    }

    /// Translates the scroll position by `delta` without animating. A smooth
    /// scroll in flight keeps running, shifted by the same amount.
    fn jump_by(&mut self, delta: f64) {
        self.scroll_by(delta, ScrollBehavior::Instant);
    }
}

#[derive(Debug, Clone, Copy)]
struct Tween {
    from: f64,
    to: f64,
    start: Duration,
    duration: Duration,
}

impl Tween {
    fn sample(&self, now: Duration) -> f64 {
        let elapsed = now.saturating_sub(self.start).as_secs_f64();
        let t = (elapsed / self.duration.as_secs_f64().max(f64::EPSILON)).clamp(0.0, 1.0);
        self.from + (self.to - self.from) * smoothstep(t)
    }

    fn is_done(&self, now: Duration) -> bool {
        now.saturating_sub(self.start) >= self.duration
    }
}

fn smoothstep(t: f64) -> f64 {
    t * t * (3.0 - 2.0 * t)
}

/// Synthetic strip of `count` equally sized cards.
#[derive(Debug, Clone)]
pub struct StripSurface {
    count: usize,
    card_width: f64,
    gap: f64,
    viewport_width: f64,
    offset: f64,
    laid_out: bool,
    smooth_duration: Duration,
    now: Duration,
    tween: Option<Tween>,
}

impl StripSurface {
    pub fn new(count: usize, card_width: f64, gap: f64, viewport_width: f64) -> Self {
        Self {
            count,
            card_width,
            gap,
            viewport_width,
            offset: 0.0,
            laid_out: true,
            smooth_duration: Duration::from_millis(300),
            now: Duration::ZERO,
            tween: None,
        }
    }

    /// Duration of smooth scrolls. Zero makes smooth scrolls land immediately.
    pub fn with_smooth_duration(mut self, duration: Duration) -> Self {
        self.smooth_duration = duration;
        self
    }

    /// Simulates a surface whose children have not been laid out yet.
    pub fn set_laid_out(&mut self, laid_out: bool) {
        self.laid_out = laid_out;
    }

    /// Replaces the rendered card count, as a host does after re-rendering.
    pub fn set_count(&mut self, count: usize) {
        self.count = count;
        self.offset = self.clamp(self.offset);
    }

    pub fn set_viewport_width(&mut self, width: f64) {
        self.viewport_width = width;
        self.offset = self.clamp(self.offset);
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn content_width(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.count as f64 * (self.card_width + self.gap) - self.gap
        }
    }

    pub fn max_offset(&self) -> f64 {
        (self.content_width() - self.viewport_width).max(0.0)
    }

    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    /// Moves any running smooth scroll to `now`. Returns whether the offset changed.
    pub fn advance(&mut self, now: Duration) -> bool {
        self.now = now;
        let Some(tween) = self.tween else {
            return false;
        };
        let before = self.offset;
        self.offset = self.clamp(tween.sample(now));
        if tween.is_done(now) {
            self.tween = None;
        }
        self.offset != before
    }

    fn clamp(&self, offset: f64) -> f64 {
        offset.clamp(0.0, self.max_offset())
    }
}

impl GeometryProvider for StripSurface {
    fn viewport_width(&self) -> Option<f64> {
        (self.laid_out && self.viewport_width > 0.0).then_some(self.viewport_width)
    }

    fn scroll_offset(&self) -> f64 {
        self.offset
    }

    fn item_rect(&self, display_index: usize) -> Option<ItemRect> {
        if !self.laid_out || display_index >= self.count {
            return None;
        }
        Some(ItemRect {
            left: display_index as f64 * (self.card_width + self.gap),
            width: self.card_width,
        })
    }

    fn gap(&self) -> Option<f64> {
        self.laid_out.then_some(self.gap)
    }
}

impl ScrollSurface for StripSurface {
    fn scroll_to(&mut self, offset: f64, behavior: ScrollBehavior) {
        match behavior {
            // The target stays unclamped so `jump_by` can shift it back into
            // range; `advance` clamps each sample.
            ScrollBehavior::Smooth if !self.smooth_duration.is_zero() => {
                self.tween = Some(Tween {
                    from: self.offset,
                    to: offset,
                    start: self.now,
                    duration: self.smooth_duration,
                });
            }
            _ => {
                self.tween = None;
                self.offset = self.clamp(offset);
            }
        }
    }

    fn jump_by(&mut self, delta: f64) {
        self.offset = self.clamp(self.offset + delta);
        if let Some(tween) = self.tween.as_mut() {
            tween.from += delta;
            tween.to += delta;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lays_out_uniform_cards() {
        let surface = StripSurface::new(9, 240.0, 16.0, 240.0);

        assert_eq!(surface.item_rect(0).unwrap().left, 0.0);
        assert_eq!(surface.item_rect(3).unwrap().left, 768.0);
        assert_eq!(surface.item_rect(3).unwrap().center(), 888.0);
        assert!(surface.item_rect(9).is_none());
        assert_eq!(surface.content_width(), 9.0 * 256.0 - 16.0);
    }

    #[test]
    fn clamps_scroll_to_content() {
        let mut surface = StripSurface::new(4, 100.0, 0.0, 200.0);
        surface.scroll_to(-10.0, ScrollBehavior::Instant);
        assert_eq!(surface.scroll_offset(), 0.0);

        surface.scroll_to(1_000.0, ScrollBehavior::Instant);
        assert_eq!(surface.scroll_offset(), 200.0);
    }

    #[test]
    fn smooth_scroll_eases_to_target() {
        let mut surface = StripSurface::new(10, 100.0, 0.0, 100.0)
            .with_smooth_duration(Duration::from_millis(100));
        surface.scroll_by(100.0, ScrollBehavior::Smooth);
        assert_eq!(surface.scroll_offset(), 0.0);

        assert!(surface.advance(Duration::from_millis(50)));
        assert_eq!(surface.scroll_offset(), 50.0);

        assert!(surface.advance(Duration::from_millis(100)));
        assert_eq!(surface.scroll_offset(), 100.0);
        assert!(!surface.is_animating());
        assert!(!surface.advance(Duration::from_millis(120)));
    }

    #[test]
    fn instant_scroll_cancels_running_animation() {
        let mut surface = StripSurface::new(10, 100.0, 0.0, 100.0);
        surface.scroll_to(500.0, ScrollBehavior::Smooth);
        surface.scroll_to(200.0, ScrollBehavior::Instant);

        assert!(!surface.is_animating());
        assert!(!surface.advance(Duration::from_secs(1)));
        assert_eq!(surface.scroll_offset(), 200.0);
    }

    #[test]
    fn jump_keeps_animation_running() {
        let mut surface = StripSurface::new(20, 100.0, 0.0, 100.0)
            .with_smooth_duration(Duration::from_millis(100));
        surface.scroll_to(1_000.0, ScrollBehavior::Instant);
        surface.scroll_by(100.0, ScrollBehavior::Smooth);
        surface.advance(Duration::from_millis(50));
        assert_eq!(surface.scroll_offset(), 1_050.0);

        surface.jump_by(-500.0);
        assert_eq!(surface.scroll_offset(), 550.0);
        assert!(surface.is_animating());

        surface.advance(Duration::from_millis(100));
        assert_eq!(surface.scroll_offset(), 600.0);
    }

    #[test]
    fn jump_retargets_animation_aimed_past_the_end() {
        let mut surface = StripSurface::new(10, 100.0, 0.0, 300.0)
            .with_smooth_duration(Duration::from_millis(100));
        assert_eq!(surface.max_offset(), 700.0);
        surface.scroll_to(600.0, ScrollBehavior::Instant);
        surface.scroll_by(200.0, ScrollBehavior::Smooth);

        surface.advance(Duration::from_millis(50));
        assert_eq!(surface.scroll_offset(), 700.0);

        surface.jump_by(-400.0);
        assert_eq!(surface.scroll_offset(), 300.0);

        surface.advance(Duration::from_millis(100));
        assert_eq!(surface.scroll_offset(), 400.0);
        assert!(!surface.is_animating());
    }

    #[test]
    fn smooth_scroll_past_the_end_rests_at_the_edge() {
        let mut surface = StripSurface::new(10, 100.0, 0.0, 300.0)
            .with_smooth_duration(Duration::from_millis(100));
        surface.scroll_to(650.0, ScrollBehavior::Instant);
        surface.scroll_by(200.0, ScrollBehavior::Smooth);

        surface.advance(Duration::from_millis(100));
        assert_eq!(surface.scroll_offset(), 700.0);
        assert!(!surface.is_animating());
    }

    #[test]
    fn reports_nothing_before_layout() {
        let mut surface = StripSurface::new(3, 100.0, 10.0, 100.0);
        surface.set_laid_out(false);

        assert!(surface.viewport_width().is_none());
        assert!(surface.item_rect(0).is_none());
        assert!(surface.gap().is_none());
    }
}
