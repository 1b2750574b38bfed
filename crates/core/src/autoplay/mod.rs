use std::time::Duration;

use crate::config::AutoplayConfig;

/// Engine state the scheduler consults on every frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutoplayGate {
    /// Current stride, `None` while metrics are unavailable.
    pub stride: Option<f64>,
    pub jumping: bool,
    pub paused: bool,
}

/// Why a frame did not advance the strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Disabled,
    NoMetrics,
    Jumping,
    Paused,
    /// First frame observed; starts the cadence.
    Arming,
    /// The cadence has not elapsed yet.
    Waiting,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tick {
    /// Scroll smoothly forward by this distance.
    Advance(f64),
    Skip(SkipReason),
}

/// Fixed-cadence advance driven by frame callbacks rather than a timer.
#[derive(Debug, Clone)]
pub struct AutoplayScheduler {
    interval: Duration,
    step: u32,
    last_advance: Option<Duration>,
}

impl AutoplayScheduler {
    pub fn new(config: &AutoplayConfig) -> Self {
        Self {
            interval: config.interval(),
            step: config.step,
            last_advance: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        !self.interval.is_zero() && self.step > 0
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Changes the cadence. The next advance is measured from the next frame.
    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
        self.last_advance = None;
    }

    pub fn last_advance(&self) -> Option<Duration> {
        self.last_advance
    }

    pub fn tick(&mut self, now: Duration, gate: AutoplayGate) -> Tick {
        if !self.is_enabled() {
            return Tick::Skip(SkipReason::Disabled);
        }

        // Blocked frames restart the cadence so nothing is owed on resume.
        let blocked = match gate.stride {
            None => Some(SkipReason::NoMetrics),
            Some(_) if gate.jumping => Some(SkipReason::Jumping),
            Some(_) if gate.paused => Some(SkipReason::Paused),
            Some(_) => None,
        };
        if let Some(reason) = blocked {
            self.last_advance = Some(now);
            return Tick::Skip(reason);
        }

        let Some(last) = self.last_advance else {
            self.last_advance = Some(now);
            return Tick::Skip(SkipReason::Arming);
        };
        if now.saturating_sub(last) < self.interval {
            return Tick::Skip(SkipReason::Waiting);
        }

        self.last_advance = Some(now);
        let stride = gate.stride.unwrap_or_default();
        Tick::Advance(stride * f64::from(self.step))
    }
}
