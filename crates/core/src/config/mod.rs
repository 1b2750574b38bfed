use std::{fs, path::Path, time::Duration};

use serde::{Deserialize, Serialize};

use crate::{CarouselError, Result};

/// Top-level configuration structure for a carousel instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CarouselConfig {
    pub autoplay: AutoplayConfig,
    /// Pause autoplay while the pointer hovers or focus sits inside the strip.
    pub pause_on_hover: bool,
    pub layout: LayoutConfig,
    pub emphasis: EmphasisConfig,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            autoplay: AutoplayConfig::default(),
            pause_on_hover: true,
            layout: LayoutConfig::default(),
            emphasis: EmphasisConfig::default(),
        }
    }
}

impl CarouselConfig {
    /// Reads a JSON configuration file. Missing fields take their defaults.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the values the engine relies on for its geometry fallbacks.
    pub fn validate(&self) -> Result<()> {
        let layout = &self.layout;
        if !layout.card_width.is_finite() || layout.card_width <= 0.0 {
            return Err(CarouselError::InvalidConfig(
                "cardWidth must be a positive number",
            ));
        }
        if !layout.gap.is_finite() || layout.gap < 0.0 {
            return Err(CarouselError::InvalidConfig("gap must not be negative"));
        }
        if layout.min_clones == 0 {
            return Err(CarouselError::InvalidConfig("minClones must be at least 1"));
        }
        if !layout.normalize_threshold.is_finite() || layout.normalize_threshold < 0.0 {
            return Err(CarouselError::InvalidConfig(
                "normalizeThreshold must not be negative",
            ));
        }

        let emphasis = &self.emphasis;
        let opacities = [emphasis.active_opacity, emphasis.inactive_opacity];
        if opacities.iter().any(|o| !(0.0..=1.0).contains(o)) {
            return Err(CarouselError::InvalidConfig(
                "opacities must lie within [0, 1]",
            ));
        }
        Ok(())
    }
}

/// Cadence of the automatic advance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AutoplayConfig {
    /// Milliseconds between advances. Zero disables autoplay.
    pub interval_ms: u64,
    /// Number of cards moved per advance.
    pub step: u32,
}

impl AutoplayConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl Default for AutoplayConfig {
    fn default() -> Self {
        Self {
            interval_ms: 3_500,
            step: 1,
        }
    }
}

/// Assumed card geometry plus the empirical looping constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutConfig {
    pub card_width: f64,
    pub gap: f64,
    /// Lower bound on the number of clones rendered on each side.
    pub min_clones: usize,
    /// Extra clones added on top of the cards that fit in the viewport.
    pub clone_slack: usize,
    /// Distance past an edge, in strides, before a normalization jump fires.
    pub normalize_threshold: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            card_width: 240.0,
            gap: 16.0,
            min_clones: 3,
            clone_slack: 1,
            normalize_threshold: 1.0,
        }
    }
}

/// Visual treatment of the active card versus the others.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmphasisConfig {
    pub active_scale: f32,
    pub inactive_scale: f32,
    pub active_opacity: f32,
    pub inactive_opacity: f32,
}

impl Default for EmphasisConfig {
    fn default() -> Self {
        Self {
            active_scale: 1.0,
            inactive_scale: 0.85,
            active_opacity: 1.0,
            inactive_opacity: 0.5,
        }
    }
}
