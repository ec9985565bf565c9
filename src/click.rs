//! Suppression of the click synthesized after a drag release.
//!
//! Platforms fire a click after a press and release even when the pointer
//! travelled far in between. After a drag that click must not reach the rest
//! of the UI, so the sensor arms a guard on every drag stop.

use crate::event::{EventType, PointerEvent};

/// Post-drag click suppression, as consumed by the sensor.
pub trait ClickGuard {
    /// Arm suppression of exactly one subsequent click.
    fn prevent_next(&mut self);

    /// Release any pending suppression immediately.
    fn abort(&mut self);
}

/// Default [`ClickGuard`]: a one-shot flag consumed by the next click.
#[derive(Debug, Clone, Default)]
pub struct ClickBlocker {
    armed: bool,
    suppressed: u64,
}

impl ClickBlocker {
    /// Create a disarmed blocker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether the next click will be suppressed.
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Number of clicks suppressed so far.
    pub fn suppressed_count(&self) -> u64 {
        self.suppressed
    }

    /// Offer a click to the blocker.
    ///
    /// Returns `true` when the click was swallowed; its default action and
    /// propagation are stopped and the blocker disarms. Non-click events are
    /// never touched.
    pub fn filter_click(&mut self, event: &mut PointerEvent) -> bool {
        if event.event_type != EventType::Click || !self.armed {
            return false;
        }

        self.armed = false;
        self.suppressed += 1;
        event.prevent_default();
        event.stop_propagation();
        log::trace!("suppressed post-drag click");
        true
    }
}

impl ClickGuard for ClickBlocker {
    fn prevent_next(&mut self) {
        self.armed = true;
    }

    fn abort(&mut self) {
        self.armed = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suppresses_exactly_one_click() {
        let mut blocker = ClickBlocker::new();
        blocker.prevent_next();

        let mut first = PointerEvent::click(1.0, 1.0);
        assert!(blocker.filter_click(&mut first));
        assert!(first.default_prevented);
        assert!(first.propagation_stopped);

        let mut second = PointerEvent::click(1.0, 1.0);
        assert!(!blocker.filter_click(&mut second));
        assert!(!second.default_prevented);
        assert_eq!(blocker.suppressed_count(), 1);
    }

    #[test]
    fn test_abort_disarms() {
        let mut blocker = ClickBlocker::new();
        blocker.prevent_next();
        blocker.abort();
        assert!(!blocker.is_armed());

        let mut click = PointerEvent::click(0.0, 0.0);
        assert!(!blocker.filter_click(&mut click));
    }

    #[test]
    fn test_ignores_non_click_events() {
        let mut blocker = ClickBlocker::new();
        blocker.prevent_next();

        let mut up = PointerEvent::pointer_up(0.0, 0.0);
        assert!(!blocker.filter_click(&mut up));
        assert!(blocker.is_armed());
    }
}
