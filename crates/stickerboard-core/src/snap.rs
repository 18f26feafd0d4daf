//! Snap functionality for aligning a dragged overlay to guidelines.
//!
//! Each axis is handled independently. The three reference edges of the
//! proposed frame are checked in a fixed order (top, bottom, centre for the
//! horizontal axis; leading, trailing, centre for the vertical one). A check
//! picks the first candidate guideline closer than the threshold and moves
//! the frame so that edge lies on it. Later checks overwrite earlier ones, so
//! when several edges match at once the centre wins over the bottom, which
//! wins over the top. Only edges that still lie on their guideline in the
//! final frame are reported as matches.

use crate::config::DEFAULT_SNAP_THRESHOLD;
use crate::geometry::{Axis, FrameEdge, FrameExt, sanitize};
use crate::guides::{Guideline, GuidelineId, GuidelineOwner, GuidelineRegistry};
use crate::overlay::{OverlayId, OverlayStore};
use kurbo::Rect;

/// Tolerance for deciding that a snapped edge lies on its guideline.
const ON_GUIDE_EPSILON: f64 = 1e-9;

/// One reference edge that landed on a guideline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapMatch {
    /// The guideline that matched.
    pub guideline: GuidelineId,
    /// Edge of the dragged frame that matched it.
    pub reference: FrameEdge,
    /// Guideline position the edge was moved to.
    pub position: f64,
}

impl SnapMatch {
    pub fn axis(&self) -> Axis {
        self.reference.axis()
    }
}

/// Result of a snap operation.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapOutcome {
    /// The snapped frame. Size is always that of the proposed frame.
    pub frame: Rect,
    /// Matches in evaluation order, horizontal axis first.
    pub matches: Vec<SnapMatch>,
}

impl SnapOutcome {
    /// Create a result with no snapping.
    pub fn none(frame: Rect) -> Self {
        Self {
            frame,
            matches: Vec::new(),
        }
    }

    /// Check if any snapping occurred.
    pub fn is_snapped(&self) -> bool {
        !self.matches.is_empty()
    }

    /// Whether the Y coordinate was snapped.
    pub fn snapped_y(&self) -> bool {
        self.matches.iter().any(|m| m.axis() == Axis::Horizontal)
    }

    /// Whether the X coordinate was snapped.
    pub fn snapped_x(&self) -> bool {
        self.matches.iter().any(|m| m.axis() == Axis::Vertical)
    }

    /// Distinct guidelines that matched, in evaluation order.
    pub fn matched_guidelines(&self) -> Vec<GuidelineId> {
        let mut ids: Vec<GuidelineId> = Vec::with_capacity(self.matches.len());
        for m in &self.matches {
            if !ids.contains(&m.guideline) {
                ids.push(m.guideline);
            }
        }
        ids
    }
}

/// Snap the proposed frame on one axis against an ordered candidate list.
///
/// Returns the adjusted frame and the matches that hold in it. A match whose
/// edge was moved off its guideline by a later check is dropped. Reference
/// coordinates are always read from `proposed`, never from a partially
/// snapped frame.
pub fn snap_axis(
    proposed: Rect,
    axis: Axis,
    candidates: &[Guideline],
    threshold: f64,
) -> (Rect, Vec<SnapMatch>) {
    let mut frame = proposed;
    let mut matches = Vec::new();

    for reference in axis.reference_edges() {
        let coordinate = proposed.edge(reference);
        let hit = candidates
            .iter()
            .filter(|g| g.axis() == axis)
            .find(|g| (g.position - coordinate).abs() < threshold);

        if let Some(guide) = hit {
            frame = frame.align_edge(reference, guide.position);
            matches.push(SnapMatch {
                guideline: guide.id,
                reference,
                position: guide.position,
            });
        }
    }

    matches.retain(|m| (frame.edge(m.reference) - m.position).abs() <= ON_GUIDE_EPSILON);
    (frame, matches)
}

/// Snap a frame against explicit candidate lists for both axes.
pub fn snap_frame(
    proposed: Rect,
    horizontal: &[Guideline],
    vertical: &[Guideline],
    threshold: f64,
) -> SnapOutcome {
    let proposed = sanitize(proposed);
    let (after_y, mut matches) = snap_axis(proposed, Axis::Horizontal, horizontal, threshold);
    let (after_x, vertical_matches) = snap_axis(proposed, Axis::Vertical, vertical, threshold);
    matches.extend(vertical_matches);

    SnapOutcome {
        frame: Rect::new(after_x.x0, after_y.y0, after_x.x1, after_y.y1),
        matches,
    }
}

/// Computes snapped frames for the overlay being dragged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapEngine {
    threshold: f64,
}

impl Default for SnapEngine {
    fn default() -> Self {
        Self::new(DEFAULT_SNAP_THRESHOLD)
    }
}

impl SnapEngine {
    /// Create an engine with the given threshold. Negative or NaN values
    /// disable snapping.
    pub fn new(threshold: f64) -> Self {
        let threshold = if threshold.is_finite() && threshold > 0.0 {
            threshold
        } else {
            0.0
        };
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Snap `proposed`, the dragged overlay's frame before alignment.
    ///
    /// Guidelines owned by `dragged` are never candidates.
    pub fn snap(
        &self,
        proposed: Rect,
        dragged: OverlayId,
        registry: &GuidelineRegistry,
        overlays: &OverlayStore,
    ) -> SnapOutcome {
        let own = GuidelineOwner::Overlay(dragged);
        let candidates = |axis| -> Vec<Guideline> {
            registry
                .all(axis, overlays)
                .into_iter()
                .filter(|g| g.owner() != own)
                .collect()
        };

        let outcome = snap_frame(
            proposed,
            &candidates(Axis::Horizontal),
            &candidates(Axis::Vertical),
            self.threshold,
        );
        for m in &outcome.matches {
            log::debug!(
                "Overlay {} snapped {:?} to {:?} at {}",
                dragged,
                m.reference,
                m.guideline.owner,
                m.position
            );
        }
        outcome
    }
}
