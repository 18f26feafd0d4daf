//! Alignment guidelines.
//!
//! Zones contribute a fixed set of static guidelines computed once at canvas
//! construction. Every overlay contributes a top/bottom and leading/trailing
//! pair that is derived from its current frame whenever it is read, so an
//! overlay guideline can never disagree with the frame that owns it.
//!
//! The registry itself only stores which guidelines are visible.

use crate::config::CanvasConfig;
use crate::geometry::{Axis, FrameEdge, FrameExt, frame};
use crate::overlay::{Overlay, OverlayId, OverlayStore};
use kurbo::Rect;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Edges of a zone that produce guidelines.
const ZONE_HORIZONTAL_EDGES: [FrameEdge; 3] = [FrameEdge::Top, FrameEdge::CenterY, FrameEdge::Bottom];
const ZONE_VERTICAL_EDGES: [FrameEdge; 3] = [FrameEdge::Leading, FrameEdge::CenterX, FrameEdge::Trailing];

/// A fixed reference rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Zone {
    pub index: usize,
    pub frame: Rect,
}

/// Lay out the configured zones side by side, the first one at the origin.
pub fn layout_zones(config: &CanvasConfig) -> Vec<Zone> {
    let step = config.zone_size.width + config.zone_spacing;
    (0..config.zone_count)
        .map(|index| Zone {
            index,
            frame: frame(
                index as f64 * step,
                0.0,
                config.zone_size.width,
                config.zone_size.height,
            ),
        })
        .collect()
}

/// Who a guideline belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GuidelineOwner {
    /// Horizontal lines shared by every zone.
    Zones,
    /// Vertical lines of a single zone.
    Zone(usize),
    Overlay(OverlayId),
}

/// Coarse owner category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OwnerKind {
    Zone,
    Overlay,
}

impl GuidelineOwner {
    pub fn kind(self) -> OwnerKind {
        match self {
            GuidelineOwner::Zones | GuidelineOwner::Zone(_) => OwnerKind::Zone,
            GuidelineOwner::Overlay(_) => OwnerKind::Overlay,
        }
    }
}

/// Structural guideline identity: owner plus the edge it follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GuidelineId {
    pub owner: GuidelineOwner,
    pub edge: FrameEdge,
}

impl GuidelineId {
    pub fn new(owner: GuidelineOwner, edge: FrameEdge) -> Self {
        Self { owner, edge }
    }

    pub fn axis(self) -> Axis {
        self.edge.axis()
    }
}

/// A guideline as seen by the snap engine and the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Guideline {
    pub id: GuidelineId,
    /// Y for horizontal guidelines, X for vertical ones.
    pub position: f64,
    pub visible: bool,
}

impl Guideline {
    pub fn axis(&self) -> Axis {
        self.id.axis()
    }

    pub fn owner(&self) -> GuidelineOwner {
        self.id.owner
    }

    pub fn owner_kind(&self) -> OwnerKind {
        self.id.owner.kind()
    }

    fn hidden(owner: GuidelineOwner, edge: FrameEdge, position: f64) -> Self {
        Self {
            id: GuidelineId::new(owner, edge),
            position,
            visible: false,
        }
    }
}

/// Guidelines derived from one overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayGuidelines {
    /// `[top, bottom]`
    pub horizontal: [Guideline; 2],
    /// `[leading, trailing]`
    pub vertical: [Guideline; 2],
}

/// Static guidelines: three shared horizontals, then three verticals per zone.
pub fn static_guidelines(zones: &[Zone]) -> Vec<Guideline> {
    let mut guides = Vec::with_capacity(3 + 3 * zones.len());

    // Zones share top, centre and bottom, so the first one stands for all.
    if let Some(first) = zones.first() {
        for edge in ZONE_HORIZONTAL_EDGES {
            guides.push(Guideline::hidden(GuidelineOwner::Zones, edge, first.frame.edge(edge)));
        }
    }
    for zone in zones {
        for edge in ZONE_VERTICAL_EDGES {
            guides.push(Guideline::hidden(
                GuidelineOwner::Zone(zone.index),
                edge,
                zone.frame.edge(edge),
            ));
        }
    }
    guides
}

/// Guidelines of an overlay at its current frame.
pub fn dynamic_guidelines(overlay: &Overlay) -> OverlayGuidelines {
    let owner = GuidelineOwner::Overlay(overlay.id());
    let frame = overlay.frame();
    let guide = |edge| Guideline::hidden(owner, edge, frame.edge(edge));
    OverlayGuidelines {
        horizontal: [guide(FrameEdge::Top), guide(FrameEdge::Bottom)],
        vertical: [guide(FrameEdge::Leading), guide(FrameEdge::Trailing)],
    }
}

/// Holds the static guidelines and the visibility of every guideline.
#[derive(Debug, Clone, Default)]
pub struct GuidelineRegistry {
    static_guides: Vec<Guideline>,
    visible: HashSet<GuidelineId>,
}

impl GuidelineRegistry {
    /// Build the registry for a fixed set of zones.
    pub fn new(zones: &[Zone]) -> Self {
        Self {
            static_guides: static_guidelines(zones),
            visible: HashSet::new(),
        }
    }

    /// Static guidelines with their current visibility.
    pub fn static_guidelines(&self) -> Vec<Guideline> {
        self.static_guides.iter().map(|g| self.with_visibility(*g)).collect()
    }

    /// Guidelines of one overlay with their current visibility.
    pub fn dynamic_guidelines(&self, overlay: &Overlay) -> OverlayGuidelines {
        let mut guides = dynamic_guidelines(overlay);
        for g in guides.horizontal.iter_mut().chain(guides.vertical.iter_mut()) {
            g.visible = self.visible.contains(&g.id);
        }
        guides
    }

    /// All guidelines on one axis: static first, then overlays in creation order.
    pub fn all(&self, axis: Axis, overlays: &OverlayStore) -> Vec<Guideline> {
        let statics = self.static_guides.iter().copied().filter(|g| g.axis() == axis);
        let dynamics = overlays.iter().flat_map(|overlay| {
            let guides = dynamic_guidelines(overlay);
            match axis {
                Axis::Horizontal => guides.horizontal,
                Axis::Vertical => guides.vertical,
            }
        });
        statics
            .chain(dynamics)
            .map(|g| self.with_visibility(g))
            .collect()
    }

    pub fn all_horizontal(&self, overlays: &OverlayStore) -> Vec<Guideline> {
        self.all(Axis::Horizontal, overlays)
    }

    pub fn all_vertical(&self, overlays: &OverlayStore) -> Vec<Guideline> {
        self.all(Axis::Vertical, overlays)
    }

    /// Every guideline, horizontal first.
    pub fn all_guidelines(&self, overlays: &OverlayStore) -> Vec<Guideline> {
        let mut guides = self.all_horizontal(overlays);
        guides.extend(self.all_vertical(overlays));
        guides
    }

    pub fn set_visible(&mut self, id: GuidelineId, visible: bool) {
        if visible {
            self.visible.insert(id);
        } else {
            self.visible.remove(&id);
        }
    }

    pub fn hide_all(&mut self) {
        self.visible.clear();
    }

    /// Show exactly the given guidelines and hide every other one.
    pub fn set_exactly_visible(&mut self, ids: impl IntoIterator<Item = GuidelineId>) {
        self.visible.clear();
        self.visible.extend(ids);
    }

    pub fn is_visible(&self, id: GuidelineId) -> bool {
        self.visible.contains(&id)
    }

    pub fn visible_ids(&self) -> impl Iterator<Item = GuidelineId> + '_ {
        self.visible.iter().copied()
    }

    /// Drop any state held for a removed overlay's guidelines.
    pub fn forget_owner(&mut self, overlay: OverlayId) {
        self.visible
            .retain(|id| id.owner != GuidelineOwner::Overlay(overlay));
    }

    fn with_visibility(&self, mut guide: Guideline) -> Guideline {
        guide.visible = self.visible.contains(&guide.id);
        guide
    }
}
