//! Egui rendering for the drag drawer.
//!
//! - **Overlay**: paints the scrim and the panel from a drawer frame and
//!   routes pointer input back into the drawer
//! - **Source**: the gesture source the drawer binds its listeners through

pub mod overlay;
pub mod source;

pub use overlay::{panel_rect, scrim_color, DrawerOverlay};
pub use source::EguiGestureSource;

/// Standard sizing constants used by the overlay.
pub mod sizing {
    /// Panel corner radius
    pub const PANEL_RADIUS: u8 = 8;
    /// Inner padding between the panel edge and its content
    pub const PANEL_PADDING: f32 = 16.0;
    /// Default panel size along the drawer axis (fraction of the screen)
    pub const PANEL_EXTENT_FRACTION: f32 = 0.6;
}

/// Standard colors used by the overlay.
pub mod theme {
    use egui::Color32;

    /// Scrim base color; alpha comes from the drawer frame.
    pub const SCRIM: Color32 = Color32::from_rgb(55, 56, 56);
    /// Panel background
    pub const PANEL_BG: Color32 = Color32::WHITE;
}
