//! Cancellable deferred action used for the close-out unmount.

#[cfg(not(target_arch = "wasm32"))]
use std::time::{Duration, Instant};

#[cfg(target_arch = "wasm32")]
use web_time::{Duration, Instant};

/// A single pending deadline.
///
/// The timer does not run anything itself; the owner polls it with the
/// current time and acts when it reports that the deadline passed.
#[derive(Debug, Clone, Default)]
pub struct DeferredTimer {
    deadline: Option<Instant>,
}

impl DeferredTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm (or re-arm) the timer to fire `delay` after `now`.
    pub fn schedule(&mut self, now: Instant, delay: Duration) {
        self.deadline = Some(now + delay);
    }

    /// Disarm the timer. Returns whether it was pending.
    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Time left until the deadline, if armed.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Returns true exactly once when `now` has reached the deadline.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_after_deadline() {
        let start = Instant::now();
        let mut timer = DeferredTimer::new();
        timer.schedule(start, Duration::from_millis(300));

        assert!(!timer.poll(start + Duration::from_millis(299)));
        assert!(timer.poll(start + Duration::from_millis(300)));
        assert!(!timer.poll(start + Duration::from_millis(400)));
    }

    #[test]
    fn test_cancel_prevents_firing() {
        let start = Instant::now();
        let mut timer = DeferredTimer::new();
        timer.schedule(start, Duration::from_millis(300));

        assert!(timer.cancel());
        assert!(!timer.poll(start + Duration::from_secs(1)));
        assert!(!timer.cancel());
    }

    #[test]
    fn test_reschedule_moves_deadline() {
        let start = Instant::now();
        let mut timer = DeferredTimer::new();
        timer.schedule(start, Duration::from_millis(300));
        timer.schedule(start + Duration::from_millis(200), Duration::from_millis(300));

        assert!(!timer.poll(start + Duration::from_millis(300)));
        assert!(timer.poll(start + Duration::from_millis(500)));
    }

    #[test]
    fn test_remaining() {
        let start = Instant::now();
        let mut timer = DeferredTimer::new();
        assert_eq!(timer.remaining(start), None);
        timer.schedule(start, Duration::from_millis(300));
        assert_eq!(
            timer.remaining(start + Duration::from_millis(100)),
            Some(Duration::from_millis(200))
        );
    }
}
