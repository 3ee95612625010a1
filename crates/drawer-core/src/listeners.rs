//! Drag listener capability.
//!
//! The platform layer owns the real event listeners (DOM, winit, egui).
//! The drawer only asks a [`GestureSource`] to start delivering pointer
//! events for the panel and keeps the returned [`Subscription`] alive for
//! as long as it wants them. Dropping the subscription detaches.

use std::fmt;

/// Something that can bind drag listeners to the rendered panel.
pub trait GestureSource {
    /// Bind listeners to the panel.
    ///
    /// Returns `None` when there is nothing to bind to yet (the panel has
    /// not been rendered). The caller retries later.
    fn subscribe(&mut self) -> Option<Subscription>;
}

/// An active listener binding. Unbinds exactly once.
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(unsubscribe: impl FnOnce() + 'static) -> Self {
        Self {
            unsubscribe: Some(Box::new(unsubscribe)),
        }
    }

    /// Unbind now.
    pub fn unsubscribe(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.unsubscribe.is_some())
            .finish()
    }
}

/// A source that never binds. Used for non-draggable drawers.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSource;

impl GestureSource for NullSource {
    fn subscribe(&mut self) -> Option<Subscription> {
        None
    }
}

/// One-shot guard around a gesture source: at most one live binding.
pub struct ListenerAttachment {
    source: Box<dyn GestureSource>,
    active: Option<Subscription>,
}

impl ListenerAttachment {
    pub fn new(source: Box<dyn GestureSource>) -> Self {
        Self {
            source,
            active: None,
        }
    }

    pub fn is_attached(&self) -> bool {
        self.active.is_some()
    }

    /// Bind if not already bound. Returns whether listeners are bound
    /// afterwards.
    pub fn attach(&mut self) -> bool {
        if self.active.is_none() {
            self.active = self.source.subscribe();
            if self.active.is_some() {
                log::debug!("Drawer drag listeners attached");
            }
        }
        self.active.is_some()
    }

    /// Unbind if bound.
    pub fn detach(&mut self) {
        if let Some(subscription) = self.active.take() {
            subscription.unsubscribe();
            log::debug!("Drawer drag listeners detached");
        }
    }
}

impl fmt::Debug for ListenerAttachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerAttachment")
            .field("attached", &self.is_attached())
            .finish()
    }
}
