//! Render snapshot of the canvas.
//!
//! The host draws a [`Scene`] however it likes. Building one never mutates
//! the canvas.

use crate::canvas::Canvas;
use crate::geometry::Axis;
use crate::guides::GuidelineId;
use crate::overlay::OverlayId;
use kurbo::{Rect, Size};
use peniko::Color;

/// Colors and stroke widths used in a scene.
#[derive(Debug, Clone)]
pub struct SceneStyle {
    pub guideline_color: Color,
    pub guideline_thickness: f64,
    pub focus_border_color: Color,
    pub focus_border_width: f64,
}

impl Default for SceneStyle {
    fn default() -> Self {
        Self {
            guideline_color: Color::from_rgba8(255, 255, 0, 255), // Yellow
            guideline_thickness: 1.0,
            focus_border_color: Color::from_rgba8(0, 0, 255, 255), // Blue
            focus_border_width: 2.0,
        }
    }
}

/// Stroke drawn around the focused overlay.
#[derive(Debug, Clone, Copy)]
pub struct Border {
    pub width: f64,
    pub color: Color,
}

/// An overlay as it should be drawn.
#[derive(Debug, Clone)]
pub struct OverlaySprite {
    pub id: OverlayId,
    pub frame: Rect,
    pub focused: bool,
    pub catalog_item: Option<u64>,
    /// Present only on the focused overlay.
    pub border: Option<Border>,
}

/// A visible guideline, as a thin rectangle across the whole canvas.
#[derive(Debug, Clone)]
pub struct GuideLine {
    pub id: GuidelineId,
    pub rect: Rect,
    pub color: Color,
}

/// Everything needed to draw one frame.
#[derive(Debug, Clone)]
pub struct Scene {
    pub content_size: Size,
    pub zones: Vec<Rect>,
    /// Back to front.
    pub overlays: Vec<OverlaySprite>,
    pub guidelines: Vec<GuideLine>,
    pub scroll_enabled: bool,
}

impl Scene {
    /// Snapshot `canvas` with the default style.
    pub fn capture(canvas: &Canvas) -> Self {
        Self::build(canvas, &SceneStyle::default())
    }

    pub fn build(canvas: &Canvas, style: &SceneStyle) -> Self {
        let content_size = canvas.content_size();
        let focused = canvas.focused();

        let overlays = canvas
            .overlays
            .iter()
            .map(|overlay| {
                let is_focused = focused == Some(overlay.id());
                OverlaySprite {
                    id: overlay.id(),
                    frame: overlay.frame(),
                    focused: is_focused,
                    catalog_item: overlay.catalog_item,
                    border: is_focused.then_some(Border {
                        width: style.focus_border_width,
                        color: style.focus_border_color,
                    }),
                }
            })
            .collect();

        let half = style.guideline_thickness / 2.0;
        let guidelines = canvas
            .guides
            .all_guidelines(&canvas.overlays)
            .into_iter()
            .filter(|g| g.visible)
            .map(|g| {
                let rect = match g.axis() {
                    Axis::Horizontal => {
                        Rect::new(0.0, g.position - half, content_size.width, g.position + half)
                    }
                    Axis::Vertical => {
                        Rect::new(g.position - half, 0.0, g.position + half, content_size.height)
                    }
                };
                GuideLine {
                    id: g.id,
                    rect,
                    color: style.guideline_color,
                }
            })
            .collect();

        Self {
            content_size,
            zones: canvas.zones().iter().map(|z| z.frame).collect(),
            overlays,
            guidelines,
            scroll_enabled: canvas.scroll_enabled(),
        }
    }

    /// The sprite drawn with a focus border, if any.
    pub fn focused(&self) -> Option<&OverlaySprite> {
        self.overlays.iter().find(|s| s.focused)
    }
}
