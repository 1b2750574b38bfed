use crate::geometry::GeometryProvider;

/// Display index whose card center is closest to the viewport center.
/// Ties go to the lower index. `None` when nothing is laid out.
pub fn nearest_display_index<G>(geometry: &G, len: usize) -> Option<usize>
where
    G: GeometryProvider + ?Sized,
{
    let viewport = geometry.viewport_width()?;
    let center = geometry.scroll_offset() + viewport / 2.0;

    let mut best: Option<(usize, f64)> = None;
    for index in 0..len {
        let Some(rect) = geometry.item_rect(index) else {
            continue;
        };
        let distance = (rect.center() - center).abs();
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((index, distance)),
        }
    }
    best.map(|(index, _)| index)
}

/// Coalesces scroll notifications into at most one recomputation per frame.
#[derive(Debug, Default)]
pub struct ActiveIndexTracker {
    pending: bool,
}

impl ActiveIndexTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules a recomputation for the next frame. Returns `true` when this
    /// is the first request since the last flush.
    pub fn request(&mut self) -> bool {
        !std::mem::replace(&mut self.pending, true)
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Drops a scheduled recomputation without running it.
    pub fn cancel(&mut self) {
        self.pending = false;
    }

    /// Runs the scheduled recomputation, if any, and returns the new active
    /// index when it differs from `current`.
    pub fn flush<G: GeometryProvider + ?Sized>(
        &mut self,
        geometry: &G,
        len: usize,
        current: usize,
    ) -> Option<usize> {
        if !std::mem::take(&mut self.pending) {
            return None;
        }
        nearest_display_index(geometry, len).filter(|index| *index != current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{ItemRect, ScrollBehavior, ScrollSurface, StripSurface};

    /// Cards of varying width laid out left to right.
    struct Ragged {
        rects: Vec<ItemRect>,
        viewport: f64,
        offset: f64,
    }

    impl Ragged {
        fn new(widths: &[f64], gap: f64, viewport: f64) -> Self {
            let mut left = 0.0;
            let rects = widths
                .iter()
                .map(|width| {
                    let rect = ItemRect {
                        left,
                        width: *width,
                    };
                    left += width + gap;
                    rect
                })
                .collect();
            Self {
                rects,
                viewport,
                offset: 0.0,
            }
        }
    }

    impl GeometryProvider for Ragged {
        fn viewport_width(&self) -> Option<f64> {
            Some(self.viewport)
        }

        fn scroll_offset(&self) -> f64 {
            self.offset
        }

        fn item_rect(&self, display_index: usize) -> Option<ItemRect> {
            self.rects.get(display_index).copied()
        }

        fn gap(&self) -> Option<f64> {
            None
        }
    }

    fn brute_force(geometry: &Ragged) -> usize {
        let center = geometry.offset + geometry.viewport / 2.0;
        let distances: Vec<f64> = geometry
            .rects
            .iter()
            .map(|rect| (rect.center() - center).abs())
            .collect();
        let min = distances.iter().cloned().fold(f64::INFINITY, f64::min);
        distances.iter().position(|d| *d == min).unwrap()
    }

    #[test]
    fn matches_brute_force_on_ragged_geometry() {
        let widths = [120.0, 80.0, 200.0, 64.0, 150.0, 96.0, 240.0, 48.0, 130.0];
        let mut geometry = Ragged::new(&widths, 12.0, 300.0);

        let mut offset = 0.0;
        while offset < 1_400.0 {
            geometry.offset = offset;
            let index = nearest_display_index(&geometry, widths.len()).unwrap();
            assert!(index < widths.len());
            assert_eq!(index, brute_force(&geometry), "offset {offset}");
            offset += 3.7;
        }
    }

    #[test]
    fn ties_prefer_lower_index() {
        // Viewport center exactly between card 0 and card 1.
        let mut geometry = Ragged::new(&[100.0, 100.0], 0.0, 100.0);
        geometry.offset = 50.0;
        assert_eq!(nearest_display_index(&geometry, 2), Some(0));
    }

    #[test]
    fn coalesces_requests_within_a_frame() {
        let mut surface = StripSurface::new(9, 240.0, 16.0, 240.0);
        let mut tracker = ActiveIndexTracker::new();

        surface.scroll_to(768.0, ScrollBehavior::Instant);
        assert!(tracker.request());
        surface.scroll_to(1024.0, ScrollBehavior::Instant);
        assert!(!tracker.request());

        assert_eq!(tracker.flush(&surface, 9, 0), Some(4));
        assert!(!tracker.is_pending());
        assert_eq!(tracker.flush(&surface, 9, 0), None);
    }

    #[test]
    fn unchanged_index_reports_nothing() {
        let surface = StripSurface::new(9, 240.0, 16.0, 240.0);
        let mut tracker = ActiveIndexTracker::new();
        tracker.request();
        assert_eq!(tracker.flush(&surface, 9, 0), None);
    }

    #[test]
    fn cancelled_request_is_discarded() {
        let surface = StripSurface::new(9, 240.0, 16.0, 240.0);
        let mut tracker = ActiveIndexTracker::new();
        tracker.request();
        tracker.cancel();
        assert_eq!(tracker.flush(&surface, 9, 5), None);
    }
}
