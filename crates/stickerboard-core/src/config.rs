//! Canvas configuration.

use crate::error::ConfigError;
use kurbo::Size;
use serde::{Deserialize, Serialize};

/// Distance below which an edge snaps onto a guideline (in canvas units).
pub const DEFAULT_SNAP_THRESHOLD: f64 = 4.0;

/// Layout and behaviour settings for a canvas.
///
/// Every field has a default, so a partial JSON document is enough to
/// override a single value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Number of reference zones laid out side by side.
    pub zone_count: usize,
    /// Size of each zone.
    pub zone_size: Size,
    /// Horizontal gap between adjacent zones.
    pub zone_spacing: f64,
    /// Size given to overlays added from the catalog.
    pub overlay_size: Size,
    /// Snap distance; an edge at exactly this distance does not snap.
    pub snap_threshold: f64,
    /// Width of the visible part of the canvas, used to place new overlays.
    pub viewport_width: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            zone_count: 3,
            zone_size: Size::new(250.0, 250.0),
            zone_spacing: 1.0,
            overlay_size: Size::new(100.0, 50.0),
            snap_threshold: DEFAULT_SNAP_THRESHOLD,
            viewport_width: 390.0,
        }
    }
}

impl CanvasConfig {
    /// Parse and validate a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Check that the configuration describes a usable canvas.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.zone_count == 0 {
            return Err(ConfigError::Invalid("zone_count must be at least 1".into()));
        }
        if !positive_size(self.zone_size) {
            return Err(ConfigError::Invalid(format!(
                "zone_size must be positive, got {:?}",
                self.zone_size
            )));
        }
        if !positive_size(self.overlay_size) {
            return Err(ConfigError::Invalid(format!(
                "overlay_size must be positive, got {:?}",
                self.overlay_size
            )));
        }
        if !(self.zone_spacing.is_finite() && self.zone_spacing >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "zone_spacing must be non-negative, got {}",
                self.zone_spacing
            )));
        }
        if !(self.snap_threshold.is_finite() && self.snap_threshold >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "snap_threshold must be non-negative, got {}",
                self.snap_threshold
            )));
        }
        if !(self.viewport_width.is_finite() && self.viewport_width > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "viewport_width must be positive, got {}",
                self.viewport_width
            )));
        }
        Ok(())
    }

    /// Total size of the scrollable content holding all zones.
    pub fn content_size(&self) -> Size {
        let n = self.zone_count as f64;
        let gaps = self.zone_count.saturating_sub(1) as f64;
        Size::new(
            n * self.zone_size.width + gaps * self.zone_spacing,
            self.zone_size.height,
        )
    }
}

fn positive_size(size: Size) -> bool {
    size.width.is_finite() && size.height.is_finite() && size.width > 0.0 && size.height > 0.0
}
