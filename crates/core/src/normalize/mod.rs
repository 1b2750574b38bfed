use crate::metrics::Metrics;

/// Correction the normalizer wants applied to the scroll offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Normalization {
    /// Scrolled too far left: move forward by one span.
    Forward(f64),
    /// Scrolled too far right: move back by one span.
    Backward(f64),
}

impl Normalization {
    /// Signed distance to add to the current offset.
    pub fn delta(&self) -> f64 {
        match *self {
            Normalization::Forward(span) => span,
            Normalization::Backward(span) => -span,
        }
    }

    pub fn target(&self, offset: f64) -> f64 {
        offset + self.delta()
    }
}

/// Decides whether `offset` has drifted far enough past the real items to be
/// wrapped by one span. `threshold` is measured in strides.
pub fn normalize_offset(offset: f64, metrics: &Metrics, threshold: f64) -> Option<Normalization> {
    let slack = metrics.stride * threshold;
    if offset < metrics.left_edge() - slack {
        Some(Normalization::Forward(metrics.span_width))
    } else if offset > metrics.right_edge() + slack {
        Some(Normalization::Backward(metrics.span_width))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const METRICS: Metrics = Metrics {
        start_left: 768.0,
        span_width: 768.0,
        stride: 256.0,
    };

    #[test]
    fn leaves_offsets_within_tolerance_alone() {
        let mut offset = METRICS.left_edge() - METRICS.stride;
        while offset <= METRICS.right_edge() + METRICS.stride {
            assert_eq!(normalize_offset(offset, &METRICS, 1.0), None, "offset {offset}");
            offset += 7.5;
        }
        assert_eq!(normalize_offset(1792.0, &METRICS, 1.0), None);
        assert_eq!(normalize_offset(512.0, &METRICS, 1.0), None);
    }

    #[test]
    fn wraps_past_either_edge() {
        assert_eq!(
            normalize_offset(511.0, &METRICS, 1.0),
            Some(Normalization::Forward(768.0))
        );
        assert_eq!(
            normalize_offset(1800.0, &METRICS, 1.0),
            Some(Normalization::Backward(768.0))
        );
        assert_eq!(Normalization::Backward(768.0).target(1800.0), 1032.0);
    }

    #[test]
    fn threshold_scales_the_tolerance() {
        assert_eq!(normalize_offset(700.0, &METRICS, 1.0), None);
        assert_eq!(
            normalize_offset(700.0, &METRICS, 0.0),
            Some(Normalization::Forward(768.0))
        );
    }

    #[test]
    fn forward_then_backward_restores_offset() {
        for offset in [0.0, 123.25, 511.5, 1800.75, 2047.0] {
            let there = Normalization::Forward(METRICS.span_width).target(offset);
            let back = Normalization::Backward(METRICS.span_width).target(there);
            assert_eq!(back, offset);

            let there = Normalization::Backward(METRICS.span_width).target(offset);
            let back = Normalization::Forward(METRICS.span_width).target(there);
            assert_eq!(back, offset);
        }
    }

    #[test]
    fn wrapped_offset_lands_inside_tolerance() {
        for offset in [100.0, 511.0, 1793.0, 2040.0] {
            let fix = normalize_offset(offset, &METRICS, 1.0).unwrap();
            assert_eq!(normalize_offset(fix.target(offset), &METRICS, 1.0), None);
        }
    }
}
