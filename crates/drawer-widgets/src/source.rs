//! Gesture source backed by the egui overlay.

use drawer_core::{GestureSource, Subscription};
use std::cell::Cell;
use std::rc::Rc;

/// Binding state shared between [`EguiGestureSource`] and the overlay
/// that paints the panel.
#[derive(Debug, Default)]
pub(crate) struct SourceState {
    /// The panel has been painted at least once.
    pub painted: Cell<bool>,
    /// Number of live subscriptions (0 or 1).
    pub bound: Cell<usize>,
}

/// Hands out listener bindings once the overlay has painted the panel.
#[derive(Debug, Clone)]
pub struct EguiGestureSource {
    pub(crate) state: Rc<SourceState>,
}

impl EguiGestureSource {
    /// Whether the drawer currently holds a binding.
    pub fn is_bound(&self) -> bool {
        self.state.bound.get() > 0
    }
}

impl GestureSource for EguiGestureSource {
    fn subscribe(&mut self) -> Option<Subscription> {
        if !self.state.painted.get() {
            return None;
        }
        self.state.bound.set(self.state.bound.get() + 1);
        let state = self.state.clone();
        Some(Subscription::new(move || {
            state.bound.set(state.bound.get().saturating_sub(1));
        }))
    }
}
