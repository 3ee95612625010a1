//! Pointer input delivered to the drawer by the platform layer.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Identifies one contact (finger, pen, mouse) for the duration of a
/// press.
pub type PointerId = u64;

/// Pointer event type for unified mouse/touch handling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PointerEvent {
    Down { pointer: PointerId, position: Point },
    Move { pointer: PointerId, position: Point },
    Up { pointer: PointerId, position: Point },
    /// The platform took the gesture away (scroll, system gesture).
    Cancel { pointer: PointerId },
}

impl PointerEvent {
    pub fn pointer(&self) -> PointerId {
        match *self {
            PointerEvent::Down { pointer, .. }
            | PointerEvent::Move { pointer, .. }
            | PointerEvent::Up { pointer, .. }
            | PointerEvent::Cancel { pointer } => pointer,
        }
    }

    pub fn position(&self) -> Option<Point> {
        match *self {
            PointerEvent::Down { position, .. }
            | PointerEvent::Move { position, .. }
            | PointerEvent::Up { position, .. } => Some(position),
            PointerEvent::Cancel { .. } => None,
        }
    }
}
