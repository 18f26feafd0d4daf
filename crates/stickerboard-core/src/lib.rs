//! Stickerboard Core Library
//!
//! Platform-agnostic layout and snap-alignment engine for the Stickerboard
//! sticker canvas: fixed zones, movable overlays, guidelines and the gesture
//! controller that ties them together.

pub mod canvas;
pub mod config;
pub mod error;
pub mod geometry;
pub mod guides;
pub mod interaction;
pub mod overlay;
pub mod scene;
pub mod snap;

pub use canvas::Canvas;
pub use config::{CanvasConfig, DEFAULT_SNAP_THRESHOLD};
pub use error::{CanvasError, CanvasResult, ConfigError};
pub use geometry::{Axis, FrameEdge, FrameExt};
pub use guides::{Guideline, GuidelineId, GuidelineOwner, GuidelineRegistry, OwnerKind, Zone};
pub use interaction::{DragState, HapticFeedback, InteractionController, NoFeedback};
pub use overlay::{Overlay, OverlayId, OverlayStore};
pub use scene::{Scene, SceneStyle};
pub use snap::{SnapEngine, SnapMatch, SnapOutcome};
