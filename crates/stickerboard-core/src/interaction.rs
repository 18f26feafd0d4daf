//! Gesture handling for overlays.
//!
//! Translates tap, drag and background-touch events into overlay store
//! mutations and snap engine calls. Gesture callbacks arrive one at a time on
//! the interaction thread; nothing here blocks.

use crate::canvas::Canvas;
use crate::error::CanvasError;
use crate::overlay::OverlayId;
use crate::snap::SnapOutcome;
use kurbo::{Point, Rect, Vec2};

/// Discrete feedback emitted when an edge lands on a guideline.
pub trait HapticFeedback {
    fn pulse(&mut self);
}

/// Feedback sink that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFeedback;

impl HapticFeedback for NoFeedback {
    fn pulse(&mut self) {}
}

/// State of the drag gesture.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        overlay: OverlayId,
        /// Frame when the drag started.
        origin: Rect,
        /// Translation accumulated since the drag started.
        translation: Vec2,
    },
}

impl DragState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, DragState::Dragging { .. })
    }

    /// Overlay being dragged, if any.
    pub fn overlay(&self) -> Option<OverlayId> {
        match self {
            DragState::Idle => None,
            DragState::Dragging { overlay, .. } => Some(*overlay),
        }
    }
}

/// Handles input events and translates them to canvas operations.
pub struct InteractionController {
    drag: DragState,
    feedback: Box<dyn HapticFeedback>,
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new()
    }
}

impl InteractionController {
    /// Create a controller without haptic output.
    pub fn new() -> Self {
        Self::with_feedback(NoFeedback)
    }

    pub fn with_feedback(feedback: impl HapticFeedback + 'static) -> Self {
        Self {
            drag: DragState::Idle,
            feedback: Box::new(feedback),
        }
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    /// Tap on the canvas: focus the topmost overlay under the point, or
    /// clear focus when the tap lands on empty canvas.
    pub fn on_tap(&mut self, canvas: &mut Canvas, point: Point) -> Option<OverlayId> {
        let hit = canvas.overlays.hit_test(point);
        self.set_focus(canvas, hit);
        hit
    }

    /// Touch outside the scrollable canvas.
    pub fn on_background_touch(&mut self, canvas: &mut Canvas) {
        self.set_focus(canvas, None);
    }

    /// Place a new overlay, e.g. after a catalog selection. The new overlay
    /// takes focus.
    pub fn add_overlay(
        &mut self,
        canvas: &mut Canvas,
        frame: Rect,
        catalog_item: Option<u64>,
    ) -> Option<OverlayId> {
        match canvas.add_overlay(frame, catalog_item) {
            Ok(id) => {
                self.end_drag(canvas);
                Some(id)
            }
            Err(e) => {
                log::warn!("Ignoring overlay creation: {}", e);
                None
            }
        }
    }

    /// Begin dragging `id`. Only the focused overlay can be dragged.
    pub fn on_drag_start(&mut self, canvas: &mut Canvas, id: OverlayId) -> bool {
        if canvas.focused() != Some(id) {
            log::debug!("Drag start on unfocused overlay {} ignored", id);
            return false;
        }
        let Some(overlay) = canvas.overlays.get(id) else {
            return false;
        };
        self.drag = DragState::Dragging {
            overlay: id,
            origin: overlay.frame(),
            translation: Vec2::ZERO,
        };
        log::debug!("Drag started on overlay {}", id);
        true
    }

    /// Apply a drag translation to the focused overlay.
    ///
    /// `delta` is the translation since the previous update; the host resets
    /// its gesture translation after each callback. Returns the snap outcome
    /// that was applied, or `None` when the update was ignored.
    pub fn on_drag_update(
        &mut self,
        canvas: &mut Canvas,
        id: OverlayId,
        delta: Vec2,
    ) -> Option<SnapOutcome> {
        if canvas.focused() != Some(id) {
            return None;
        }
        if !(delta.x.is_finite() && delta.y.is_finite()) {
            log::warn!("Ignoring non-finite drag delta {:?}", delta);
            return None;
        }
        if self.drag.overlay() != Some(id) && !self.on_drag_start(canvas, id) {
            return None;
        }

        let DragState::Dragging {
            overlay,
            origin,
            translation,
        } = self.drag
        else {
            return None;
        };
        // Committed only once the store accepts the resulting frame.
        let translation = translation + delta;
        let proposed = origin + translation;
        let outcome = canvas
            .engine()
            .snap(proposed, id, &canvas.guides, &canvas.overlays);

        if let Err(e) = canvas.overlays.set_frame(id, outcome.frame) {
            match e {
                CanvasError::UnknownOverlay(_) => log::warn!("Drag update dropped: {}", e),
                CanvasError::InvalidGeometry { .. } => {
                    log::warn!("Drag update kept previous frame: {}", e)
                }
            }
            return None;
        }
        self.drag = DragState::Dragging {
            overlay,
            origin,
            translation,
        };

        let matched = outcome.matched_guidelines();
        for _ in &matched {
            self.feedback.pulse();
        }
        canvas.guides.set_exactly_visible(matched);
        Some(outcome)
    }

    /// Finish the drag. Every guideline is hidden; focus is unchanged.
    pub fn on_drag_end(&mut self, canvas: &mut Canvas, id: OverlayId) {
        if let Some(dragged) = self.drag.overlay() {
            if dragged != id {
                log::debug!("Drag end for {} while dragging {}", id, dragged);
            }
        }
        self.end_drag(canvas);
    }

    /// The host cancelled the gesture. Same effect as ending it.
    pub fn on_drag_cancel(&mut self, canvas: &mut Canvas, id: OverlayId) {
        self.on_drag_end(canvas, id);
    }

    fn end_drag(&mut self, canvas: &mut Canvas) {
        if self.drag.is_dragging() {
            log::debug!("Drag finished");
        }
        self.drag = DragState::Idle;
        canvas.guides.hide_all();
    }

    fn set_focus(&mut self, canvas: &mut Canvas, id: Option<OverlayId>) {
        if let Err(e) = canvas.overlays.focus(id) {
            log::warn!("Focus change ignored: {}", e);
            return;
        }
        if self.drag.is_dragging() && self.drag.overlay() != id {
            self.end_drag(canvas);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{FrameEdge, frame};
    use crate::guides::{GuidelineId, GuidelineOwner};
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct CountingFeedback(Rc<Cell<usize>>);

    impl HapticFeedback for CountingFeedback {
        fn pulse(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    fn visible_count(canvas: &Canvas) -> usize {
        canvas
            .guides
            .all_guidelines(&canvas.overlays)
            .iter()
            .filter(|g| g.visible)
            .count()
    }

    #[test]
    fn test_drag_snaps_to_zone_boundary() {
        let pulses = CountingFeedback::default();
        let mut controller = InteractionController::with_feedback(pulses.clone());
        let mut canvas = Canvas::default();
        let id = controller
            .add_overlay(&mut canvas, frame(500.0, 100.0, 40.0, 20.0), None)
            .unwrap();

        assert!(controller.on_drag_start(&mut canvas, id));
        let outcome = controller
            .on_drag_update(&mut canvas, id, Vec2::new(-251.5, 0.0))
            .unwrap();

        let trailing = GuidelineId::new(GuidelineOwner::Zone(0), FrameEdge::Trailing);
        assert_eq!(outcome.matched_guidelines(), vec![trailing]);
        assert_eq!(canvas.overlays.get(id).unwrap().frame(), frame(250.0, 100.0, 40.0, 20.0));
        assert!(canvas.guides.is_visible(trailing));
        assert_eq!(visible_count(&canvas), 1);
        assert_eq!(pulses.0.get(), 1);
    }

    #[test]
    fn test_drag_accumulates_translation() {
        let mut controller = InteractionController::new();
        let mut canvas = Canvas::default();
        let id = controller
            .add_overlay(&mut canvas, frame(1000.0, 400.0, 40.0, 20.0), None)
            .unwrap();

        controller.on_drag_start(&mut canvas, id);
        controller.on_drag_update(&mut canvas, id, Vec2::new(10.0, 5.0));
        controller.on_drag_update(&mut canvas, id, Vec2::new(10.0, 5.0));
        assert_eq!(canvas.overlays.get(id).unwrap().frame(), frame(1020.0, 410.0, 40.0, 20.0));
        assert_eq!(
            controller.drag_state(),
            DragState::Dragging {
                overlay: id,
                origin: frame(1000.0, 400.0, 40.0, 20.0),
                translation: Vec2::new(20.0, 10.0),
            }
        );
    }

    #[test]
    fn test_drag_escapes_snap() {
        let mut controller = InteractionController::new();
        let mut canvas = Canvas::default();
        let id = controller
            .add_overlay(&mut canvas, frame(400.0, 400.0, 40.0, 20.0), None)
            .unwrap();

        // Zone 1 centre line sits at x = 376.
        controller.on_drag_start(&mut canvas, id);
        controller.on_drag_update(&mut canvas, id, Vec2::new(-22.0, 0.0));
        assert_eq!(canvas.overlays.get(id).unwrap().frame().x0, 376.0);

        // Stays snapped until the accumulated translation leaves the threshold.
        controller.on_drag_update(&mut canvas, id, Vec2::new(1.0, 0.0));
        assert_eq!(canvas.overlays.get(id).unwrap().frame().x0, 376.0);
        controller.on_drag_update(&mut canvas, id, Vec2::new(10.0, 0.0));
        assert_eq!(canvas.overlays.get(id).unwrap().frame().x0, 389.0);
        assert_eq!(visible_count(&canvas), 0);
    }

    #[test]
    fn test_drag_on_unfocused_overlay_is_ignored() {
        let mut controller = InteractionController::new();
        let mut canvas = Canvas::default();
        let a = controller
            .add_overlay(&mut canvas, frame(500.0, 100.0, 40.0, 20.0), None)
            .unwrap();
        let b = controller
            .add_overlay(&mut canvas, frame(600.0, 100.0, 40.0, 20.0), None)
            .unwrap();

        assert!(!controller.on_drag_start(&mut canvas, a));
        assert!(controller
            .on_drag_update(&mut canvas, a, Vec2::new(-251.5, 0.0))
            .is_none());
        assert_eq!(canvas.overlays.get(a).unwrap().frame(), frame(500.0, 100.0, 40.0, 20.0));
        assert_eq!(visible_count(&canvas), 0);
        assert_eq!(canvas.focused(), Some(b));
    }

    #[test]
    fn test_update_without_start_begins_drag() {
        let mut controller = InteractionController::new();
        let mut canvas = Canvas::default();
        let id = controller
            .add_overlay(&mut canvas, frame(1000.0, 400.0, 40.0, 20.0), None)
            .unwrap();

        assert!(controller
            .on_drag_update(&mut canvas, id, Vec2::new(5.0, 0.0))
            .is_some());
        assert_eq!(controller.drag_state().overlay(), Some(id));
    }

    #[test]
    fn test_drag_end_hides_guidelines() {
        let mut controller = InteractionController::new();
        let mut canvas = Canvas::default();
        let id = controller
            .add_overlay(&mut canvas, frame(500.0, 100.0, 40.0, 20.0), None)
            .unwrap();

        controller.on_drag_start(&mut canvas, id);
        controller.on_drag_update(&mut canvas, id, Vec2::new(-251.5, 0.0));
        assert!(visible_count(&canvas) > 0);

        controller.on_drag_end(&mut canvas, id);
        assert_eq!(visible_count(&canvas), 0);
        assert_eq!(controller.drag_state(), DragState::Idle);
        assert_eq!(canvas.focused(), Some(id));
    }

    #[test]
    fn test_drag_end_hides_even_for_other_overlay() {
        let mut controller = InteractionController::new();
        let mut canvas = Canvas::default();
        let id = controller
            .add_overlay(&mut canvas, frame(500.0, 100.0, 40.0, 20.0), None)
            .unwrap();
        canvas
            .guides
            .set_visible(GuidelineId::new(GuidelineOwner::Zones, FrameEdge::Top), true);

        controller.on_drag_cancel(&mut canvas, OverlayId::new());
        assert_eq!(visible_count(&canvas), 0);
        assert_eq!(canvas.focused(), Some(id));
    }

    #[test]
    fn test_tap_focus_and_background_touch() {
        let mut controller = InteractionController::new();
        let mut canvas = Canvas::default();
        let back = controller
            .add_overlay(&mut canvas, frame(0.0, 0.0, 100.0, 100.0), None)
            .unwrap();
        let front = controller
            .add_overlay(&mut canvas, frame(50.0, 50.0, 100.0, 100.0), None)
            .unwrap();

        assert_eq!(controller.on_tap(&mut canvas, Point::new(75.0, 75.0)), Some(front));
        assert_eq!(canvas.focused(), Some(front));

        assert_eq!(controller.on_tap(&mut canvas, Point::new(10.0, 10.0)), Some(back));
        assert_eq!(canvas.focused(), Some(back));
        assert!(!canvas.overlays.is_interactive(front));

        assert_eq!(controller.on_tap(&mut canvas, Point::new(600.0, 200.0)), None);
        assert_eq!(canvas.focused(), None);
        assert!(canvas.scroll_enabled());

        controller.on_tap(&mut canvas, Point::new(10.0, 10.0));
        controller.on_background_touch(&mut canvas);
        assert_eq!(canvas.focused(), None);
        assert!(canvas.overlays.iter().all(|o| !o.is_interactive()));
    }

    #[test]
    fn test_focus_change_ends_drag() {
        let mut controller = InteractionController::new();
        let mut canvas = Canvas::default();
        let id = controller
            .add_overlay(&mut canvas, frame(500.0, 100.0, 40.0, 20.0), None)
            .unwrap();
        controller.on_drag_start(&mut canvas, id);
        controller.on_drag_update(&mut canvas, id, Vec2::new(-251.5, 0.0));

        controller.on_background_touch(&mut canvas);
        assert_eq!(controller.drag_state(), DragState::Idle);
        assert_eq!(visible_count(&canvas), 0);
        assert!(controller
            .on_drag_update(&mut canvas, id, Vec2::new(1.0, 0.0))
            .is_none());
    }

    #[test]
    fn test_non_finite_delta_is_ignored() {
        let mut controller = InteractionController::new();
        let mut canvas = Canvas::default();
        let id = controller
            .add_overlay(&mut canvas, frame(500.0, 100.0, 40.0, 20.0), None)
            .unwrap();
        assert!(controller
            .on_drag_update(&mut canvas, id, Vec2::new(f64::NAN, 0.0))
            .is_none());
        assert_eq!(canvas.overlays.get(id).unwrap().frame(), frame(500.0, 100.0, 40.0, 20.0));
    }

    #[test]
    fn test_rejected_update_does_not_accumulate() {
        let mut controller = InteractionController::new();
        let mut canvas = Canvas::default();
        let start = frame(500.0, 100.0, 40.0, 20.0);
        let id = controller.add_overlay(&mut canvas, start, None).unwrap();
        controller.on_drag_start(&mut canvas, id);

        // Each of these collapses the frame to zero width and is rejected.
        for dx in [1e308, 1e308, -1e308] {
            assert!(controller
                .on_drag_update(&mut canvas, id, Vec2::new(dx, 0.0))
                .is_none());
            assert_eq!(canvas.overlays.get(id).unwrap().frame(), start);
        }
        assert_eq!(
            controller.drag_state(),
            DragState::Dragging {
                overlay: id,
                origin: start,
                translation: Vec2::ZERO,
            }
        );

        assert!(controller
            .on_drag_update(&mut canvas, id, Vec2::new(10.0, 0.0))
            .is_some());
        assert_eq!(canvas.overlays.get(id).unwrap().frame(), frame(510.0, 100.0, 40.0, 20.0));
    }

    #[test]
    fn test_add_overlay_rejects_degenerate_frame() {
        let mut controller = InteractionController::new();
        let mut canvas = Canvas::default();
        assert!(controller
            .add_overlay(&mut canvas, frame(0.0, 0.0, 0.0, 0.0), None)
            .is_none());
        assert!(canvas.overlays.is_empty());
    }
}
