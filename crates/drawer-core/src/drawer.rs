//! Presentation state machine.
//!
//! [`Drawer`] reconciles the caller's open/closed intent with whether the
//! panel is mounted, keeps the panel mounted through the close
//! animation, routes pointer input to the [`GestureTracker`] while drag
//! listeners are attached, and animates offset and scrim opacity with
//! springs.
//!
//! Time is passed in by the caller (`Instant` for the unmount timer,
//! `Duration` for animation steps), so the state machine has no
//! platform dependencies.

use crate::config::DrawerConfig;
use crate::gesture::{DragMove, GestureTracker, Release};
use crate::input::PointerEvent;
use crate::listeners::{GestureSource, ListenerAttachment};
use crate::overlay::{DrawerFrame, Overlay};
use crate::spring::{Spring, SpringConfig};
use crate::timer::DeferredTimer;
use kurbo::{Rect, Size};
use std::fmt;

#[cfg(not(target_arch = "wasm32"))]
use std::time::{Duration, Instant};

#[cfg(target_arch = "wasm32")]
use web_time::{Duration, Instant};

/// Lifecycle phase of a drawer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Not mounted.
    #[default]
    Closed,
    /// Mounted, animating toward the rest offset.
    Opening,
    /// Mounted, at rest, interactive.
    Open,
    /// Mounted, animating off-screen until the unmount timer fires.
    Closing,
}

impl Phase {
    pub fn is_mounted(self) -> bool {
        self != Phase::Closed
    }
}

/// Measured geometry of the rendered overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelLayout {
    /// The full-screen container (scrim) rectangle.
    pub container: Rect,
    /// The panel (modal) rectangle.
    pub panel: Rect,
}

/// Caller hooks.
///
/// `on_request_close` is required; every other hook defaults to a no-op.
pub struct DrawerCallbacks {
    on_request_close: Box<dyn FnMut()>,
    on_drag: Box<dyn FnMut(f64)>,
    on_open: Box<dyn FnMut()>,
    notify_will_close: Box<dyn FnMut(bool)>,
    in_viewport_change: Box<dyn FnMut(bool)>,
    get_container_ref: Box<dyn FnMut(Rect)>,
    get_modal_ref: Box<dyn FnMut(Rect)>,
}

impl DrawerCallbacks {
    /// Create hooks with the required close request handler. The caller
    /// is expected to respond by eventually setting `open` to false.
    pub fn new(on_request_close: impl FnMut() + 'static) -> Self {
        Self {
            on_request_close: Box::new(on_request_close),
            on_drag: Box::new(|_| {}),
            on_open: Box::new(|| {}),
            notify_will_close: Box::new(|_| {}),
            in_viewport_change: Box::new(|_| {}),
            get_container_ref: Box::new(|_| {}),
            get_modal_ref: Box::new(|_| {}),
        }
    }

    /// Called with the new offset for every applied drag sample.
    pub fn on_drag(mut self, f: impl FnMut(f64) + 'static) -> Self {
        self.on_drag = Box::new(f);
        self
    }

    /// Called once per closed-to-open transition.
    pub fn on_open(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_open = Box::new(f);
        self
    }

    /// Called during a drag with whether a release would close.
    pub fn notify_will_close(mut self, f: impl FnMut(bool) + 'static) -> Self {
        self.notify_will_close = Box::new(f);
        self
    }

    /// Called when the viewport visibility flag changes.
    pub fn in_viewport_change(mut self, f: impl FnMut(bool) + 'static) -> Self {
        self.in_viewport_change = Box::new(f);
        self
    }

    /// Called with the container rectangle whenever it is measured.
    pub fn get_container_ref(mut self, f: impl FnMut(Rect) + 'static) -> Self {
        self.get_container_ref = Box::new(f);
        self
    }

    /// Called with the panel rectangle whenever it is measured.
    pub fn get_modal_ref(mut self, f: impl FnMut(Rect) + 'static) -> Self {
        self.get_modal_ref = Box::new(f);
        self
    }
}

impl fmt::Debug for DrawerCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DrawerCallbacks").finish_non_exhaustive()
    }
}

/// A draggable drawer.
#[derive(Debug)]
pub struct Drawer {
    config: DrawerConfig,
    callbacks: DrawerCallbacks,
    /// Caller's desired state.
    intent: bool,
    phase: Phase,
    tracker: GestureTracker,
    listeners: ListenerAttachment,
    unmount_timer: DeferredTimer,
    viewport: Size,
    viewport_visible: bool,
    layout: Option<PanelLayout>,
    offset_spring: Spring,
    opacity_spring: Spring,
}

impl Drawer {
    /// Create a closed drawer. Drag listeners are bound through `source`
    /// while the drawer is open.
    pub fn new(
        config: DrawerConfig,
        callbacks: DrawerCallbacks,
        source: Box<dyn GestureSource>,
    ) -> Self {
        let tracker = GestureTracker::new(
            config.direction,
            config.allow_close,
            config.close_threshold,
        );
        let hidden = config.direction.hidden_offset(0.0, 0.0);
        Self {
            config,
            callbacks,
            intent: false,
            phase: Phase::Closed,
            tracker,
            listeners: ListenerAttachment::new(source),
            unmount_timer: DeferredTimer::new(),
            viewport: Size::ZERO,
            viewport_visible: true,
            layout: None,
            offset_spring: Spring::new(hidden),
            opacity_spring: Spring::new(0.0),
        }
    }

    pub fn config(&self) -> &DrawerConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The caller's current intent.
    pub fn is_open(&self) -> bool {
        self.intent
    }

    pub fn is_mounted(&self) -> bool {
        self.phase.is_mounted()
    }

    pub fn is_touching(&self) -> bool {
        self.tracker.is_touching()
    }

    pub fn listeners_attached(&self) -> bool {
        self.listeners.is_attached()
    }

    /// Committed (non-animated) panel offset.
    pub fn offset(&self) -> f64 {
        self.tracker.offset()
    }

    pub fn rest_offset(&self) -> f64 {
        self.tracker.rest_offset()
    }

    /// Offset that puts the panel off-screen.
    pub fn hidden_offset(&self) -> f64 {
        let viewport_extent = self.config.direction.axis().extent(self.viewport);
        self.config
            .direction
            .hidden_offset(self.tracker.panel_extent(), viewport_extent)
    }

    pub fn tracker(&self) -> &GestureTracker {
        &self.tracker
    }

    pub fn layout(&self) -> Option<PanelLayout> {
        self.layout
    }

    /// Deadline of the pending unmount, if closing.
    pub fn unmount_deadline(&self) -> Option<Instant> {
        self.unmount_timer.deadline()
    }

    /// Apply the caller's intent.
    pub fn set_open(&mut self, open: bool, now: Instant) {
        if open == self.intent {
            return;
        }
        self.intent = open;

        if open {
            if self.unmount_timer.cancel() {
                log::debug!("Drawer reopened before unmount, keeping it mounted");
            }
            if self.phase == Phase::Closed {
                let hidden = self.hidden_offset();
                self.offset_spring.snap_to(hidden);
                self.opacity_spring.snap_to(0.0);
            }
            self.phase = Phase::Opening;
            log::debug!("Drawer opening ({})", self.config.direction);
            (self.callbacks.on_open)();
            self.ensure_listeners();
        } else {
            self.listeners.detach();
            self.tracker.reset();
            if self.phase.is_mounted() {
                self.phase = Phase::Closing;
                self.unmount_timer.schedule(now, self.config.close_delay());
                log::debug!("Drawer closing, unmount in {}ms", self.config.close_delay_ms);
            }
        }
        self.retarget();
    }

    /// Fire the unmount timer if it is due.
    pub fn tick(&mut self, now: Instant) {
        if !self.unmount_timer.poll(now) {
            return;
        }
        if self.intent {
            log::debug!("Unmount timer fired while open, ignoring");
            return;
        }
        self.phase = Phase::Closed;
        self.tracker.reset();
        let hidden = self.hidden_offset();
        self.offset_spring.snap_to(hidden);
        self.opacity_spring.snap_to(0.0);
        log::debug!("Drawer unmounted");
    }

    /// Step the animations.
    pub fn advance(&mut self, dt: Duration) {
        if !self.phase.is_mounted() {
            return;
        }
        self.offset_spring.step(dt);
        self.opacity_spring.step(dt);

        if self.phase == Phase::Opening
            && self.offset_spring.is_at_rest()
            && self.opacity_spring.is_at_rest()
        {
            self.phase = Phase::Open;
            log::debug!("Drawer open");
        }
    }

    /// Whether any animation is still moving.
    pub fn is_animating(&self) -> bool {
        self.phase.is_mounted()
            && !(self.offset_spring.is_at_rest() && self.opacity_spring.is_at_rest())
    }

    /// Deliver a pointer event from the platform.
    ///
    /// Events are only honoured while drag listeners are attached.
    /// Returns true when the platform should suppress its default
    /// handling (scrolling, pull-to-refresh).
    pub fn handle_pointer(&mut self, event: PointerEvent) -> bool {
        if !self.listeners.is_attached() {
            return false;
        }

        match event {
            PointerEvent::Down { pointer, position } => {
                self.tracker.touch_start(pointer, position);
                self.retarget();
                false
            }
            PointerEvent::Move { pointer, position } => {
                match self
                    .tracker
                    .touch_move(pointer, position, self.viewport_visible)
                {
                    DragMove::Ignored => false,
                    DragMove::Applied {
                        offset,
                        would_close,
                    } => {
                        (self.callbacks.on_drag)(offset);
                        (self.callbacks.notify_will_close)(would_close);
                        self.retarget();
                        true
                    }
                }
            }
            PointerEvent::Up { pointer, .. } => {
                let release = self.tracker.touch_end(pointer);
                self.finish_release(release);
                false
            }
            PointerEvent::Cancel { pointer } => {
                let release = self.tracker.touch_cancel(pointer);
                self.finish_release(release);
                false
            }
        }
    }

    fn finish_release(&mut self, release: Release) {
        match release {
            Release::Ignored => {}
            Release::Close => {
                log::debug!("Drag released past threshold, requesting close");
                (self.callbacks.on_request_close)();
            }
            Release::SnapBack { offset } => {
                log::trace!("Drag released, snapping back to {}", offset);
            }
        }
        self.retarget();
    }

    /// The scrim was clicked.
    pub fn backdrop_click(&mut self) {
        if self.intent && self.phase.is_mounted() {
            (self.callbacks.on_request_close)();
        }
    }

    /// Update the flag that freezes dragging while the panel's scroll
    /// anchor is out of view.
    pub fn set_viewport_visibility(&mut self, visible: bool) {
        if visible != self.viewport_visible {
            self.viewport_visible = visible;
            (self.callbacks.in_viewport_change)(visible);
        }
    }

    pub fn viewport_visible(&self) -> bool {
        self.viewport_visible
    }

    /// Size of the surface the overlay covers.
    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
        self.retarget();
        if !self.phase.is_mounted() {
            let hidden = self.hidden_offset();
            self.offset_spring.snap_to(hidden);
        }
    }

    /// Record the measured overlay geometry.
    pub fn set_layout(&mut self, layout: PanelLayout) {
        let axis = self.config.direction.axis();
        self.tracker.set_layout(
            axis.extent(layout.container.size()),
            axis.extent(layout.panel.size()),
            self.config.overscroll_buffer,
        );
        if self.viewport == Size::ZERO {
            self.viewport = layout.container.size();
        }
        self.layout = Some(layout);

        (self.callbacks.get_container_ref)(layout.container);
        (self.callbacks.get_modal_ref)(layout.panel);

        self.ensure_listeners();
        self.retarget();
    }

    /// Bind drag listeners if the drawer wants them and they are not
    /// bound yet.
    fn ensure_listeners(&mut self) {
        if self.config.dont_apply_listeners || !self.intent || !self.phase.is_mounted() {
            return;
        }
        if !self.listeners.attach() {
            log::debug!("Drawer panel not available yet, listeners deferred");
        }
    }

    /// Point both springs at the targets implied by the current state.
    fn retarget(&mut self) {
        let open = self.intent && self.phase.is_mounted();
        let preset = SpringConfig::for_touch(self.tracker.is_touching());
        let (offset, opacity) = if open {
            (self.tracker.offset(), self.config.scrim_opacity)
        } else {
            (self.hidden_offset(), 0.0)
        };
        self.offset_spring.set_target(offset, preset);
        self.opacity_spring.set_target(opacity, preset);
    }

    /// Visual state for the rendering layer, while mounted.
    pub fn frame(&self) -> Option<DrawerFrame> {
        if !self.phase.is_mounted() {
            return None;
        }
        Some(DrawerFrame {
            direction: self.config.direction,
            offset: self.offset_spring.value(),
            rest_offset: self.tracker.rest_offset(),
            scrim_opacity: self.opacity_spring.value(),
            touching: self.tracker.is_touching(),
            container_class: self.config.container_element_class.clone(),
            modal_class: self.config.modal_element_class.clone(),
        })
    }

    /// Pair `content` with the overlay host, while mounted.
    pub fn project<C>(&self, content: C) -> Option<Overlay<C>> {
        self.frame().map(|frame| Overlay {
            content,
            target: self.config.parent_element.clone(),
            frame,
        })
    }
}
