use std::time::Duration;

/// Source of the "now" passed into every frame.
pub trait Clock {
    /// Time elapsed since the clock started.
    fn now(&self) -> Duration;
}

/// Manually advanced clock, so frame timing is deterministic.
#[derive(Debug, Default, Clone)]
pub struct FrameClock {
    elapsed: Duration,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }

    pub fn advance(&mut self, delta: Duration) {
        self.elapsed += delta;
    }
}

impl Clock for FrameClock {
    fn now(&self) -> Duration {
        self.elapsed
    }
}

/// State of a repeating per-frame task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrameLoop {
    #[default]
    Running,
    Cancelled,
}

impl FrameLoop {
    pub fn is_running(&self) -> bool {
        matches!(self, FrameLoop::Running)
    }

    /// Stops the loop for good; later frames are refused.
    pub fn cancel(&mut self) {
        *self = FrameLoop::Cancelled;
    }
}

/// What the host should do after delivering a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameRequest {
    /// Schedule another frame callback.
    Continue,
    /// Nothing to do until the next scroll, resize or input notification.
    Idle,
    /// The engine is torn down; never schedule again.
    Stop,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_clock_accumulates_and_resets() {
        let mut clock = FrameClock::new();
        clock.advance(Duration::from_millis(16));
        clock.advance(Duration::from_millis(17));
        assert_eq!(clock.now(), Duration::from_millis(33));

        clock.reset();
        assert_eq!(clock.now(), Duration::ZERO);
    }

    #[test]
    fn cancelled_loop_stays_cancelled() {
        let mut frames = FrameLoop::default();
        assert!(frames.is_running());
        frames.cancel();
        frames.cancel();
        assert!(!frames.is_running());
    }
}
