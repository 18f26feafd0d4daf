//! Canvas state: zones, overlays and guideline visibility.

use crate::config::CanvasConfig;
use crate::error::{CanvasResult, ConfigError};
use crate::geometry::frame;
use crate::guides::{GuidelineRegistry, Zone, layout_zones};
use crate::overlay::{Overlay, OverlayId, OverlayStore};
use crate::scene::Scene;
use crate::snap::SnapEngine;
use kurbo::{Rect, Size};

/// Runtime canvas state (not persisted).
///
/// Zones are laid out once here and never move afterwards.
#[derive(Debug, Clone)]
pub struct Canvas {
    config: CanvasConfig,
    zones: Vec<Zone>,
    /// Overlays and focus.
    pub overlays: OverlayStore,
    /// Guideline visibility.
    pub guides: GuidelineRegistry,
    engine: SnapEngine,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::build(CanvasConfig::default())
    }
}

impl Canvas {
    /// Create a canvas from a validated configuration.
    pub fn new(config: CanvasConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: CanvasConfig) -> Self {
        let zones = layout_zones(&config);
        let guides = GuidelineRegistry::new(&zones);
        let engine = SnapEngine::new(config.snap_threshold);
        Self {
            config,
            zones,
            overlays: OverlayStore::new(),
            guides,
            engine,
        }
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    pub fn engine(&self) -> &SnapEngine {
        &self.engine
    }

    /// Size of the scrollable content.
    pub fn content_size(&self) -> Size {
        self.config.content_size()
    }

    /// Frame for a new default-size overlay, centred on the visible part of
    /// the canvas for the given horizontal scroll offset.
    pub fn new_overlay_frame(&self, scroll_offset_x: f64) -> Rect {
        let size = self.config.overlay_size;
        let center_x = self.config.viewport_width / 2.0 + scroll_offset_x;
        let center_y = self.content_size().height / 2.0;
        frame(
            center_x - size.width / 2.0,
            center_y - size.height / 2.0,
            size.width,
            size.height,
        )
    }

    /// Place an overlay and focus it.
    pub fn add_overlay(&mut self, frame: Rect, catalog_item: Option<u64>) -> CanvasResult<OverlayId> {
        self.overlays.create_from(frame, catalog_item)
    }

    /// Remove an overlay along with its guidelines.
    pub fn remove_overlay(&mut self, id: OverlayId) -> CanvasResult<Overlay> {
        let overlay = self.overlays.remove(id)?;
        self.guides.forget_owner(id);
        Ok(overlay)
    }

    pub fn focused(&self) -> Option<OverlayId> {
        self.overlays.focused()
    }

    pub fn scroll_enabled(&self) -> bool {
        self.overlays.scroll_enabled()
    }

    /// Render snapshot with the default style.
    pub fn scene(&self) -> Scene {
        Scene::capture(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{FrameEdge, FrameExt};
    use crate::guides::{GuidelineId, GuidelineOwner};

    #[test]
    fn test_new_validates_config() {
        let config = CanvasConfig {
            zone_count: 0,
            ..CanvasConfig::default()
        };
        assert!(matches!(Canvas::new(config), Err(ConfigError::Invalid(_))));
        assert!(Canvas::new(CanvasConfig::default()).is_ok());
    }

    #[test]
    fn test_new_overlay_frame_centres_on_viewport() {
        let canvas = Canvas::default();
        let f = canvas.new_overlay_frame(0.0);
        assert_eq!(f.size(), Size::new(100.0, 50.0));
        assert_eq!(f.center_x(), 195.0);
        assert_eq!(f.center_y(), 125.0);

        let f = canvas.new_overlay_frame(300.0);
        assert_eq!(f.center_x(), 495.0);
    }

    #[test]
    fn test_add_and_remove_overlay() {
        let mut canvas = Canvas::default();
        let frame = canvas.new_overlay_frame(0.0);
        let id = canvas.add_overlay(frame, Some(268)).unwrap();
        assert_eq!(canvas.focused(), Some(id));
        assert!(!canvas.scroll_enabled());
        assert_eq!(canvas.overlays.get(id).unwrap().catalog_item, Some(268));

        let top = GuidelineId::new(GuidelineOwner::Overlay(id), FrameEdge::Top);
        canvas.guides.set_visible(top, true);

        canvas.remove_overlay(id).unwrap();
        assert!(!canvas.guides.is_visible(top));
        assert!(canvas.scroll_enabled());
        assert!(canvas.remove_overlay(id).is_err());
    }
}
