//! Overlay entities, z-order and focus.

use crate::error::{CanvasError, CanvasResult};
use crate::geometry::{FrameEdge, is_valid_frame};
use crate::guides::{GuidelineId, GuidelineOwner};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

/// Stable identity of an overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OverlayId(Uuid);

impl OverlayId {
    /// Allocate a fresh identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for OverlayId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for OverlayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Edges of an overlay that produce guidelines, horizontal pair first.
pub const OVERLAY_GUIDE_EDGES: [FrameEdge; 4] = [
    FrameEdge::Top,
    FrameEdge::Bottom,
    FrameEdge::Leading,
    FrameEdge::Trailing,
];

/// A movable sticker placed on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    id: OverlayId,
    frame: Rect,
    z_generation: u64,
    interactive: bool,
    /// Catalog item this overlay was created from, if any.
    pub catalog_item: Option<u64>,
}

impl Overlay {
    pub fn id(&self) -> OverlayId {
        self.id
    }

    pub fn frame(&self) -> Rect {
        self.frame
    }

    /// Creation counter; higher values are drawn in front.
    pub fn z_generation(&self) -> u64 {
        self.z_generation
    }

    /// Whether the overlay currently accepts direct manipulation.
    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    /// The guideline pairs bound to this overlay: `[top, bottom, leading, trailing]`.
    pub fn guideline_ids(&self) -> [GuidelineId; 4] {
        OVERLAY_GUIDE_EDGES.map(|edge| GuidelineId::new(GuidelineOwner::Overlay(self.id), edge))
    }
}

/// Owns every overlay on the canvas together with the focus state.
///
/// Insertion order is z-order: the last overlay added is frontmost and wins
/// hit tests.
#[derive(Debug, Clone, Default)]
pub struct OverlayStore {
    overlays: HashMap<OverlayId, Overlay>,
    /// Back to front.
    z_order: Vec<OverlayId>,
    focused: Option<OverlayId>,
    next_generation: u64,
}

impl OverlayStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an overlay with the given frame and focus it.
    pub fn create(&mut self, initial_frame: Rect) -> CanvasResult<OverlayId> {
        self.create_from(initial_frame, None)
    }

    /// Add an overlay that originates from a catalog item and focus it.
    pub fn create_from(
        &mut self,
        initial_frame: Rect,
        catalog_item: Option<u64>,
    ) -> CanvasResult<OverlayId> {
        if !is_valid_frame(initial_frame) {
            return Err(CanvasError::InvalidGeometry {
                frame: initial_frame,
            });
        }

        let id = OverlayId::new();
        let overlay = Overlay {
            id,
            frame: initial_frame,
            z_generation: self.next_generation,
            interactive: false,
            catalog_item,
        };
        self.next_generation += 1;
        self.overlays.insert(id, overlay);
        self.z_order.push(id);
        log::debug!("Created overlay {} at {:?}", id, initial_frame);

        self.focus(Some(id))?;
        Ok(id)
    }

    /// Remove an overlay. Its guidelines disappear with it.
    pub fn remove(&mut self, id: OverlayId) -> CanvasResult<Overlay> {
        let overlay = self
            .overlays
            .remove(&id)
            .ok_or(CanvasError::UnknownOverlay(id))?;
        self.z_order.retain(|&other| other != id);
        if self.focused == Some(id) {
            self.focused = None;
        }
        Ok(overlay)
    }

    /// Replace the frame of an overlay.
    ///
    /// A degenerate frame is rejected and the previous one is kept.
    pub fn set_frame(&mut self, id: OverlayId, frame: Rect) -> CanvasResult<()> {
        if !is_valid_frame(frame) {
            return Err(CanvasError::InvalidGeometry { frame });
        }
        let overlay = self
            .overlays
            .get_mut(&id)
            .ok_or(CanvasError::UnknownOverlay(id))?;
        overlay.frame = frame;
        Ok(())
    }

    /// Move focus to `id`, or clear it with `None`.
    ///
    /// The previous overlay loses interactivity before the new one gains it.
    pub fn focus(&mut self, id: Option<OverlayId>) -> CanvasResult<()> {
        if let Some(new_id) = id {
            if !self.overlays.contains_key(&new_id) {
                return Err(CanvasError::UnknownOverlay(new_id));
            }
        }

        if let Some(old) = self.focused.take() {
            if let Some(overlay) = self.overlays.get_mut(&old) {
                overlay.interactive = false;
            }
        }

        if let Some(new_id) = id {
            if let Some(overlay) = self.overlays.get_mut(&new_id) {
                overlay.interactive = true;
            }
        }
        self.focused = id;

        match id {
            Some(id) => log::debug!("Focus moved to overlay {}", id),
            None => log::debug!("Focus cleared"),
        }
        Ok(())
    }

    /// Topmost overlay whose frame contains `point`.
    pub fn hit_test(&self, point: Point) -> Option<OverlayId> {
        self.z_order
            .iter()
            .rev()
            .copied()
            .find(|id| self.overlays.get(id).is_some_and(|o| o.frame.contains(point)))
    }

    pub fn get(&self, id: OverlayId) -> Option<&Overlay> {
        self.overlays.get(&id)
    }

    pub fn contains(&self, id: OverlayId) -> bool {
        self.overlays.contains_key(&id)
    }

    /// Overlays back to front.
    pub fn iter(&self) -> impl Iterator<Item = &Overlay> {
        self.z_order.iter().filter_map(|id| self.overlays.get(id))
    }

    pub fn focused(&self) -> Option<OverlayId> {
        self.focused
    }

    pub fn is_interactive(&self, id: OverlayId) -> bool {
        self.overlays.get(&id).is_some_and(|o| o.interactive)
    }

    /// The canvas scrolls only while nothing is focused.
    pub fn scroll_enabled(&self) -> bool {
        self.focused.is_none()
    }

    pub fn len(&self) -> usize {
        self.overlays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::frame;

    fn interactive_count(store: &OverlayStore) -> usize {
        store.iter().filter(|o| o.is_interactive()).count()
    }

    #[test]
    fn test_create_focuses_new_overlay() {
        let mut store = OverlayStore::new();
        let a = store.create(frame(0.0, 0.0, 40.0, 20.0)).unwrap();
        assert_eq!(store.focused(), Some(a));
        assert!(store.is_interactive(a));
        assert!(!store.scroll_enabled());

        let b = store.create(frame(10.0, 10.0, 40.0, 20.0)).unwrap();
        assert_eq!(store.focused(), Some(b));
        assert!(!store.is_interactive(a));
        assert!(store.is_interactive(b));
        assert!(store.get(b).unwrap().z_generation() > store.get(a).unwrap().z_generation());
    }

    #[test]
    fn test_create_rejects_degenerate_frame() {
        let mut store = OverlayStore::new();
        let result = store.create(frame(0.0, 0.0, 0.0, 20.0));
        assert!(matches!(result, Err(CanvasError::InvalidGeometry { .. })));
        assert!(store.is_empty());
        assert!(store.scroll_enabled());
    }

    #[test]
    fn test_exclusive_focus() {
        let mut store = OverlayStore::new();
        let ids: Vec<_> = (0..4)
            .map(|i| store.create(frame(i as f64 * 50.0, 0.0, 40.0, 20.0)).unwrap())
            .collect();

        let sequence = [Some(ids[0]), Some(ids[2]), None, Some(ids[3]), Some(ids[3]), Some(ids[1]), None];
        for target in sequence {
            store.focus(target).unwrap();
            assert!(interactive_count(&store) <= 1);
            assert_eq!(store.focused(), target);
            assert_eq!(store.scroll_enabled(), target.is_none());
            if let Some(id) = target {
                assert!(store.is_interactive(id));
            }
        }
    }

    #[test]
    fn test_focus_unknown_keeps_state() {
        let mut store = OverlayStore::new();
        let a = store.create(frame(0.0, 0.0, 40.0, 20.0)).unwrap();
        let stranger = OverlayId::new();
        assert_eq!(store.focus(Some(stranger)), Err(CanvasError::UnknownOverlay(stranger)));
        assert_eq!(store.focused(), Some(a));
        assert!(store.is_interactive(a));
    }

    #[test]
    fn test_set_frame() {
        let mut store = OverlayStore::new();
        let a = store.create(frame(0.0, 0.0, 40.0, 20.0)).unwrap();

        store.set_frame(a, frame(5.0, 6.0, 40.0, 20.0)).unwrap();
        assert_eq!(store.get(a).unwrap().frame(), frame(5.0, 6.0, 40.0, 20.0));

        let bad = frame(5.0, 6.0, 0.0, 0.0);
        assert!(matches!(store.set_frame(a, bad), Err(CanvasError::InvalidGeometry { .. })));
        assert_eq!(store.get(a).unwrap().frame(), frame(5.0, 6.0, 40.0, 20.0));

        let stranger = OverlayId::new();
        assert_eq!(
            store.set_frame(stranger, frame(0.0, 0.0, 1.0, 1.0)),
            Err(CanvasError::UnknownOverlay(stranger))
        );
    }

    #[test]
    fn test_hit_test_topmost() {
        let mut store = OverlayStore::new();
        let back = store.create(frame(0.0, 0.0, 100.0, 100.0)).unwrap();
        let front = store.create(frame(50.0, 50.0, 100.0, 100.0)).unwrap();

        assert_eq!(store.hit_test(Point::new(75.0, 75.0)), Some(front));
        assert_eq!(store.hit_test(Point::new(25.0, 25.0)), Some(back));
        assert_eq!(store.hit_test(Point::new(300.0, 300.0)), None);
    }

    #[test]
    fn test_remove_clears_focus() {
        let mut store = OverlayStore::new();
        let a = store.create(frame(0.0, 0.0, 40.0, 20.0)).unwrap();
        let removed = store.remove(a).unwrap();
        assert_eq!(removed.id(), a);
        assert!(store.focused().is_none());
        assert!(store.scroll_enabled());
        assert_eq!(store.hit_test(Point::new(10.0, 10.0)), None);
        assert_eq!(store.remove(a), Err(CanvasError::UnknownOverlay(a)));
    }

    #[test]
    fn test_guideline_ids_bound_to_owner() {
        let mut store = OverlayStore::new();
        let a = store.create(frame(0.0, 0.0, 40.0, 20.0)).unwrap();
        let ids = store.get(a).unwrap().guideline_ids();
        assert!(ids.iter().all(|g| g.owner == GuidelineOwner::Overlay(a)));
        assert_eq!(ids.map(|g| g.edge), OVERLAY_GUIDE_EDGES);
    }
}
