use crate::{config::LayoutConfig, geometry::GeometryProvider, sequence::ExtendedSequence};

/// Scroll-space quantities derived from the laid out extended sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    /// Offset that centers the first real item in the viewport.
    pub start_left: f64,
    /// Distance covered by one full pass over the real items.
    pub span_width: f64,
    /// Distance between the centers of adjacent cards. Always positive.
    pub stride: f64,
}

impl Metrics {
    pub fn left_edge(&self) -> f64 {
        self.start_left
    }

    pub fn right_edge(&self) -> f64 {
        self.start_left + self.span_width
    }
}

/// Measures the strip. Returns `None` while anything needed is not laid out.
pub fn measure<G: GeometryProvider + ?Sized>(
    geometry: &G,
    sequence: &ExtendedSequence,
    layout: &LayoutConfig,
) -> Option<Metrics> {
    if sequence.is_empty() {
        return None;
    }

    let first = sequence.real_range().start;
    let viewport = geometry.viewport_width()?;
    let first_rect = geometry.item_rect(first)?;
    let first_clone = geometry.item_rect(first + sequence.item_count())?;

    let start_left = first_rect.left - (viewport - first_rect.width) / 2.0;
    let span_width = first_clone.left - first_rect.left;
    if !start_left.is_finite() || !span_width.is_finite() || span_width <= 0.0 {
        return None;
    }

    let gap = geometry.gap().unwrap_or(layout.gap);
    let stride = geometry
        .item_rect(first + 1)
        .map(|next| next.left - first_rect.left)
        .filter(|stride| stride.is_finite() && *stride > 0.0)
        .unwrap_or_else(|| fallback_stride(layout, gap));

    Some(Metrics {
        start_left,
        span_width,
        stride,
    })
}

/// `card_width + gap`, or just the card width if that is degenerate.
pub fn fallback_stride(layout: &LayoutConfig, gap: f64) -> f64 {
    let stride = layout.card_width + gap;
    if stride.is_finite() && stride > 0.0 {
        stride
    } else {
        layout.card_width.max(1.0)
    }
}
