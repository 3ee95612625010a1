//! Drives a [`Drawer`] through a [`Script`] on a simulated clock and
//! records every callback it makes.

use crate::script::{Script, Step};
use drawer_core::{
    Drawer, DrawerCallbacks, DrawerConfig, GestureSource, PanelLayout, Phase, Subscription,
};
use kurbo::Rect;
use serde::Serialize;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::{Duration, Instant};

/// A callback the drawer made, stamped with simulated milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "callback", rename_all = "camelCase")]
pub enum CallbackEvent {
    RequestClose { at_ms: u64 },
    Open { at_ms: u64 },
    Drag { at_ms: u64, offset: f64 },
    WillClose { at_ms: u64, closing: bool },
    ViewportChange { at_ms: u64, visible: bool },
    ContainerRef { at_ms: u64, rect: Rect },
    ModalRef { at_ms: u64, rect: Rect },
}

impl CallbackEvent {
    pub fn at_ms(&self) -> u64 {
        match *self {
            CallbackEvent::RequestClose { at_ms }
            | CallbackEvent::Open { at_ms }
            | CallbackEvent::Drag { at_ms, .. }
            | CallbackEvent::WillClose { at_ms, .. }
            | CallbackEvent::ViewportChange { at_ms, .. }
            | CallbackEvent::ContainerRef { at_ms, .. }
            | CallbackEvent::ModalRef { at_ms, .. } => at_ms,
        }
    }
}

/// Final drawer state after a replay.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplaySummary {
    pub elapsed_ms: u64,
    pub phase: String,
    pub mounted: bool,
    pub offset: f64,
    pub listeners_bound: usize,
    pub attaches: usize,
    pub events: Vec<CallbackEvent>,
}

/// Binding counts shared between the replay and its gesture source.
#[derive(Debug, Default)]
struct Bindings {
    live: Cell<usize>,
    total: Cell<usize>,
}

/// Gesture source that always binds and counts bindings.
#[derive(Debug, Clone, Default)]
struct ScriptSource {
    bindings: Rc<Bindings>,
}

impl GestureSource for ScriptSource {
    fn subscribe(&mut self) -> Option<Subscription> {
        let bindings = self.bindings.clone();
        bindings.live.set(bindings.live.get() + 1);
        bindings.total.set(bindings.total.get() + 1);
        log::debug!("Listeners attached");
        Some(Subscription::new(move || {
            bindings.live.set(bindings.live.get().saturating_sub(1));
            log::debug!("Listeners detached");
        }))
    }
}

/// Simulated clock shared with the callbacks so they can stamp events.
#[derive(Debug, Clone)]
struct Clock {
    start: Instant,
    now: Rc<Cell<Instant>>,
}

impl Clock {
    fn new() -> Self {
        let start = Instant::now();
        Self {
            start,
            now: Rc::new(Cell::new(start)),
        }
    }

    fn now(&self) -> Instant {
        self.now.get()
    }

    fn elapsed_ms(&self) -> u64 {
        (self.now.get() - self.start).as_millis() as u64
    }

    fn advance(&self, dt: Duration) {
        self.now.set(self.now.get() + dt);
    }
}

/// Runs scripts against one drawer.
pub struct Replay {
    drawer: Drawer,
    clock: Clock,
    frame: Duration,
    respond_to_close: bool,
    close_requested: Rc<Cell<bool>>,
    events: Rc<RefCell<Vec<CallbackEvent>>>,
    bindings: Rc<Bindings>,
}

impl Replay {
    pub fn new(config: DrawerConfig, frame: Duration) -> Self {
        let clock = Clock::new();
        let events = Rc::new(RefCell::new(Vec::new()));
        let close_requested = Rc::new(Cell::new(false));
        let source = ScriptSource::default();
        let bindings = source.bindings.clone();

        let recorder = Recorder {
            clock: clock.clone(),
            events: events.clone(),
        };
        let callbacks = recording_callbacks(&recorder, &close_requested);
        let drawer = Drawer::new(config, callbacks, Box::new(source));

        Self {
            drawer,
            clock,
            frame,
            respond_to_close: true,
            close_requested,
            events,
            bindings,
        }
    }

    pub fn drawer(&self) -> &Drawer {
        &self.drawer
    }

    /// Run every step of `script` in order.
    pub fn run(&mut self, script: &Script) -> ReplaySummary {
        self.respond_to_close = script.respond_to_close;
        for step in &script.steps {
            self.apply(step);
        }
        self.summary()
    }

    /// Apply a single step.
    pub fn apply(&mut self, step: &Step) {
        log::debug!("t={}ms {:?}", self.clock.elapsed_ms(), step);
        let now = self.clock.now();
        match step {
            Step::Open => self.drawer.set_open(true, now),
            Step::Close => self.drawer.set_open(false, now),
            Step::Pointer { event } => {
                self.drawer.handle_pointer(*event);
            }
            Step::Wait { ms } => self.wait(Duration::from_millis(*ms)),
            Step::Viewport { .. } => {
                if let Some(size) = step.viewport_size() {
                    self.drawer.set_viewport(size);
                }
            }
            Step::Layout { container, panel } => self.drawer.set_layout(PanelLayout {
                container: *container,
                panel: *panel,
            }),
            Step::Visibility { visible } => self.drawer.set_viewport_visibility(*visible),
            Step::Backdrop => self.drawer.backdrop_click(),
        }
        self.respond();
    }

    /// Step the clock frame by frame.
    fn wait(&mut self, duration: Duration) {
        let mut remaining = duration;
        while !remaining.is_zero() {
            let dt = self.frame.min(remaining);
            remaining -= dt;
            self.clock.advance(dt);
            self.drawer.tick(self.clock.now());
            self.drawer.advance(dt);
            self.respond();
        }
    }

    /// Act as the controlling parent: a close request flips `open` off.
    fn respond(&mut self) {
        if self.close_requested.replace(false) && self.respond_to_close && self.drawer.is_open() {
            log::info!("Parent closing drawer after close request");
            self.drawer.set_open(false, self.clock.now());
        }
    }

    pub fn summary(&self) -> ReplaySummary {
        let phase = match self.drawer.phase() {
            Phase::Closed => "closed",
            Phase::Opening => "opening",
            Phase::Open => "open",
            Phase::Closing => "closing",
        };
        ReplaySummary {
            elapsed_ms: self.clock.elapsed_ms(),
            phase: phase.to_string(),
            mounted: self.drawer.is_mounted(),
            offset: self.drawer.offset(),
            listeners_bound: self.bindings.live.get(),
            attaches: self.bindings.total.get(),
            events: self.events.borrow().clone(),
        }
    }
}

/// Appends stamped callback events to the shared log.
#[derive(Debug, Clone)]
struct Recorder {
    clock: Clock,
    events: Rc<RefCell<Vec<CallbackEvent>>>,
}

impl Recorder {
    fn record(&self, make: impl FnOnce(u64) -> CallbackEvent) {
        let event = make(self.clock.elapsed_ms());
        log::info!("{:?}", event);
        self.events.borrow_mut().push(event);
    }
}

fn recording_callbacks(recorder: &Recorder, close_requested: &Rc<Cell<bool>>) -> DrawerCallbacks {
    let requested = close_requested.clone();
    let on_close = recorder.clone();
    let on_open = recorder.clone();
    let on_drag = recorder.clone();
    let on_will_close = recorder.clone();
    let on_viewport = recorder.clone();
    let on_container = recorder.clone();
    let on_modal = recorder.clone();

    DrawerCallbacks::new(move || {
        requested.set(true);
        on_close.record(|at_ms| CallbackEvent::RequestClose { at_ms });
    })
    .on_open(move || on_open.record(|at_ms| CallbackEvent::Open { at_ms }))
    .on_drag(move |offset| on_drag.record(|at_ms| CallbackEvent::Drag { at_ms, offset }))
    .notify_will_close(move |closing| {
        on_will_close.record(|at_ms| CallbackEvent::WillClose { at_ms, closing })
    })
    .in_viewport_change(move |visible| {
        on_viewport.record(|at_ms| CallbackEvent::ViewportChange { at_ms, visible })
    })
    .get_container_ref(move |rect| {
        on_container.record(|at_ms| CallbackEvent::ContainerRef { at_ms, rect })
    })
    .get_modal_ref(move |rect| on_modal.record(|at_ms| CallbackEvent::ModalRef { at_ms, rect }))
}
