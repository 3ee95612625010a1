//! Overlay projection.
//!
//! The drawer does not render itself. While mounted it hands the
//! rendering layer an [`Overlay`]: the caller's content, the host the
//! overlay must be projected into, and the animated frame values.

use crate::direction::Direction;
use kurbo::Vec2;
use serde::{Deserialize, Serialize};

/// Where the overlay is mounted, independent of the drawer's logical
/// position in the caller's tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlayTarget {
    /// The document body (or the platform's root surface).
    #[default]
    Body,
    /// A host element identified by the rendering layer.
    Element(String),
}

/// Visual state of a mounted drawer for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawerFrame {
    pub direction: Direction,
    /// Animated panel offset along the drawer axis.
    pub offset: f64,
    /// Offset of the fully open panel.
    pub rest_offset: f64,
    /// Animated scrim alpha.
    pub scrim_opacity: f64,
    /// Whether a finger is currently on the panel.
    pub touching: bool,
    pub container_class: Option<String>,
    pub modal_class: Option<String>,
}

impl DrawerFrame {
    /// Screen-space displacement of the panel from its open position.
    pub fn translation(&self) -> Vec2 {
        let travel = (self.offset - self.rest_offset) * self.direction.closing_sign();
        self.direction.axis().translation(travel)
    }
}

/// Content paired with the host it must be projected into.
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay<C> {
    pub content: C,
    pub target: OverlayTarget,
    pub frame: DrawerFrame,
}

impl<C> Overlay<C> {
    /// Replace the content, keeping target and frame.
    pub fn map<D>(self, f: impl FnOnce(C) -> D) -> Overlay<D> {
        Overlay {
            content: f(self.content),
            target: self.target,
            frame: self.frame,
        }
    }
}
