//! Damped spring used to animate the panel offset and scrim opacity.
//!
//! The spring is a unit-mass oscillator pulled toward its target:
//! `a = -stiffness * (x - target) - damping * v`, integrated with
//! semi-implicit Euler in fixed steps so the result does not depend on
//! the caller's frame rate.

#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

#[cfg(target_arch = "wasm32")]
use web_time::Duration;

/// Fixed integration step (one 60 Hz frame).
const STEP_SECS: f64 = 1.0 / 60.0;

/// Spring tuning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringConfig {
    /// Spring constant. Higher values pull harder toward the target.
    pub stiffness: f64,
    /// Damping coefficient applied to velocity.
    pub damping: f64,
    /// Distance and speed below which the spring snaps to its target.
    pub precision: f64,
}

impl SpringConfig {
    pub const NO_WOBBLE: SpringConfig = SpringConfig::new(170.0, 26.0);
    pub const GENTLE: SpringConfig = SpringConfig::new(120.0, 14.0);
    pub const WOBBLY: SpringConfig = SpringConfig::new(180.0, 12.0);
    /// Settle preset used when no finger is on the panel.
    pub const STIFF: SpringConfig = SpringConfig::new(210.0, 20.0);
    /// Snappier preset that keeps the panel under a moving finger.
    pub const TOUCHING: SpringConfig = SpringConfig::new(300.0, 20.0);

    pub const fn new(stiffness: f64, damping: f64) -> Self {
        Self {
            stiffness,
            damping,
            precision: 0.01,
        }
    }

    /// Pick the preset for the current touch state.
    pub fn for_touch(touching: bool) -> Self {
        if touching {
            Self::TOUCHING
        } else {
            Self::STIFF
        }
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::STIFF
    }
}

/// An animated scalar.
#[derive(Debug, Clone, PartialEq)]
pub struct Spring {
    value: f64,
    velocity: f64,
    target: f64,
    config: SpringConfig,
    /// Integration time not yet consumed by a whole step.
    carry: f64,
}

impl Spring {
    /// Create a spring resting at `value`.
    pub fn new(value: f64) -> Self {
        Self {
            value,
            velocity: 0.0,
            target: value,
            config: SpringConfig::default(),
            carry: 0.0,
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn config(&self) -> SpringConfig {
        self.config
    }

    /// Retarget the spring. Current value and velocity are kept so the
    /// motion stays continuous.
    pub fn set_target(&mut self, target: f64, config: SpringConfig) {
        self.target = target;
        self.config = config;
    }

    /// Jump to `value` and stop.
    pub fn snap_to(&mut self, value: f64) {
        self.value = value;
        self.target = value;
        self.velocity = 0.0;
        self.carry = 0.0;
    }

    pub fn is_at_rest(&self) -> bool {
        self.value == self.target && self.velocity == 0.0
    }

    /// Advance the simulation by `dt`.
    pub fn step(&mut self, dt: Duration) {
        if self.is_at_rest() {
            self.carry = 0.0;
            return;
        }

        self.carry += dt.as_secs_f64();
        while self.carry >= STEP_SECS {
            self.carry -= STEP_SECS;
            self.integrate(STEP_SECS);
            if self.is_at_rest() {
                self.carry = 0.0;
                break;
            }
        }
    }

    fn integrate(&mut self, h: f64) {
        let SpringConfig {
            stiffness,
            damping,
            precision,
        } = self.config;

        let spring_force = -stiffness * (self.value - self.target);
        let damper_force = -damping * self.velocity;
        let acceleration = spring_force + damper_force;

        let velocity = self.velocity + acceleration * h;
        let value = self.value + velocity * h;

        if velocity.abs() < precision && (value - self.target).abs() < precision {
            self.value = self.target;
            self.velocity = 0.0;
        } else {
            self.value = value;
            self.velocity = velocity;
        }
    }
}
