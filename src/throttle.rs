//! Trailing-edge throttle driven by caller-supplied timestamps.
//!
//! The first value in a quiet period passes straight through and opens a
//! window of `interval_ms`. Values offered while the window is open replace
//! one another; the last of them is released by [`Throttle::poll`] once the
//! window has elapsed, which opens the next window. The final value of a
//! burst is therefore never lost, only delayed.

#[cfg(test)]
#[path = "throttle_test.rs"]
mod throttle_test;

#[derive(Debug, Clone)]
pub struct Throttle<T> {
    interval_ms: u64,
    window_start: Option<u64>,
    pending: Option<T>,
}

impl<T> Throttle<T> {
    #[must_use]
    pub fn new(interval_ms: u64) -> Self {
        Self { interval_ms, window_start: None, pending: None }
    }

    /// Offer a value at time `now_ms`. Returns it if it may be handled now.
    pub fn offer(&mut self, now_ms: u64, value: T) -> Option<T> {
        if self.window_open(now_ms) {
            self.pending = Some(value);
            return None;
        }
        self.window_start = Some(now_ms);
        self.pending = None;
        Some(value)
    }

    /// Release the held value if its window has elapsed.
    pub fn poll(&mut self, now_ms: u64) -> Option<T> {
        if self.pending.is_none() || self.window_open(now_ms) {
            return None;
        }
        self.window_start = Some(now_ms);
        self.pending.take()
    }

    /// Whether a value is waiting for the window to elapse.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Forget the held value and the current window.
    pub fn reset(&mut self) {
        self.window_start = None;
        self.pending = None;
    }

    fn window_open(&self, now_ms: u64) -> bool {
        self.window_start
            .is_some_and(|start| now_ms.saturating_sub(start) < self.interval_ms)
    }
}
