//! Drag Drawer Core Library
//!
//! Platform-agnostic gesture tracking and presentation state for a
//! draggable drawer/modal overlay. Rendering layers feed pointer events,
//! time and measured geometry in, and read animated frame values out.

pub mod config;
pub mod direction;
pub mod drawer;
pub mod gesture;
pub mod input;
pub mod listeners;
pub mod overlay;
pub mod spring;
pub mod timer;

pub use config::{ConfigError, ConfigResult, DrawerConfig, DEPRECATED_OPTIONS};
pub use direction::{Axis, Direction, ParseDirectionError};
pub use drawer::{Drawer, DrawerCallbacks, PanelLayout, Phase};
pub use gesture::{DragMove, DragSession, GestureTracker, Release, DEFAULT_OVERSCROLL_BOUND};
pub use input::{PointerEvent, PointerId};
pub use listeners::{GestureSource, ListenerAttachment, NullSource, Subscription};
pub use overlay::{DrawerFrame, Overlay, OverlayTarget};
pub use spring::{Spring, SpringConfig};
pub use timer::DeferredTimer;
