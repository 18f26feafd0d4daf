//! Geometry primitives shared by the guideline, overlay and snap modules.
//!
//! Frames are plain `kurbo::Rect` values. The helpers here name their edges
//! the way the alignment engine talks about them.

use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

/// Alignment axis.
///
/// A horizontal guideline is a Y coordinate spanning the canvas width, a
/// vertical guideline is an X coordinate spanning the canvas height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// Both axes, horizontal first.
    pub const ALL: [Axis; 2] = [Axis::Horizontal, Axis::Vertical];

    /// Reference edges checked by the snap engine, in priority order.
    pub fn reference_edges(self) -> [FrameEdge; 3] {
        match self {
            Axis::Horizontal => [FrameEdge::Top, FrameEdge::Bottom, FrameEdge::CenterY],
            Axis::Vertical => [FrameEdge::Leading, FrameEdge::Trailing, FrameEdge::CenterX],
        }
    }
}

/// A named line of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FrameEdge {
    Top,
    Bottom,
    CenterY,
    Leading,
    Trailing,
    CenterX,
}

impl FrameEdge {
    /// The axis this edge lies on.
    pub fn axis(self) -> Axis {
        match self {
            FrameEdge::Top | FrameEdge::Bottom | FrameEdge::CenterY => Axis::Horizontal,
            FrameEdge::Leading | FrameEdge::Trailing | FrameEdge::CenterX => Axis::Vertical,
        }
    }

    /// Offset of this edge from the frame origin along its axis.
    fn offset(self, size: Size) -> f64 {
        match self {
            FrameEdge::Top | FrameEdge::Leading => 0.0,
            FrameEdge::Bottom => size.height,
            FrameEdge::Trailing => size.width,
            FrameEdge::CenterY => size.height / 2.0,
            FrameEdge::CenterX => size.width / 2.0,
        }
    }
}

/// Edge accessors for overlay and zone frames.
pub trait FrameExt {
    fn top(&self) -> f64;
    fn bottom(&self) -> f64;
    fn leading(&self) -> f64;
    fn trailing(&self) -> f64;
    fn center_x(&self) -> f64;
    fn center_y(&self) -> f64;

    /// Coordinate of the given edge.
    fn edge(&self, edge: FrameEdge) -> f64;

    /// Move the frame so that `edge` lies at `position`, keeping its size.
    fn align_edge(&self, edge: FrameEdge, position: f64) -> Rect;
}

impl FrameExt for Rect {
    fn top(&self) -> f64 {
        self.y0
    }

    fn bottom(&self) -> f64 {
        self.y1
    }

    fn leading(&self) -> f64 {
        self.x0
    }

    fn trailing(&self) -> f64 {
        self.x1
    }

    fn center_x(&self) -> f64 {
        (self.x0 + self.x1) / 2.0
    }

    fn center_y(&self) -> f64 {
        (self.y0 + self.y1) / 2.0
    }

    fn edge(&self, edge: FrameEdge) -> f64 {
        match edge {
            FrameEdge::Top => self.top(),
            FrameEdge::Bottom => self.bottom(),
            FrameEdge::CenterY => self.center_y(),
            FrameEdge::Leading => self.leading(),
            FrameEdge::Trailing => self.trailing(),
            FrameEdge::CenterX => self.center_x(),
        }
    }

    fn align_edge(&self, edge: FrameEdge, position: f64) -> Rect {
        let size = self.size();
        let origin = position - edge.offset(size);
        match edge.axis() {
            Axis::Horizontal => Rect::from_origin_size(Point::new(self.x0, origin), size),
            Axis::Vertical => Rect::from_origin_size(Point::new(origin, self.y0), size),
        }
    }
}

/// Build a frame from origin and size components.
pub fn frame(x: f64, y: f64, width: f64, height: f64) -> Rect {
    Rect::from_origin_size(Point::new(x, y), Size::new(width, height))
}

/// A frame is usable when every coordinate is finite and it has a non-zero area.
pub fn is_valid_frame(rect: Rect) -> bool {
    [rect.x0, rect.y0, rect.x1, rect.y1].iter().all(|v| v.is_finite())
        && rect.width() > 0.0
        && rect.height() > 0.0
}

/// Clamp malformed input into a well-formed rectangle.
///
/// Non-finite coordinates become `0.0`, an inverted rectangle collapses to
/// zero size at its origin.
pub fn sanitize(rect: Rect) -> Rect {
    let finite = |v: f64| if v.is_finite() { v } else { 0.0 };
    let x0 = finite(rect.x0);
    let y0 = finite(rect.y0);
    let x1 = finite(rect.x1).max(x0);
    let y1 = finite(rect.y1).max(y0);
    Rect::new(x0, y0, x1, y1)
}
