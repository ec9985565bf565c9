//! Frame-coalesced delivery of drag movement.

use crate::event::Position;

/// Throttles movement notifications to at most one per scheduling tick.
pub trait MovementScheduler {
    /// Enqueue the latest point, replacing any point not yet delivered.
    fn schedule(&mut self, point: Position);

    /// Take the point due for delivery on this tick, if any.
    fn take(&mut self) -> Option<Position>;

    /// Discard any pending delivery. Safe to call with nothing scheduled.
    fn cancel(&mut self);
}

/// Default [`MovementScheduler`] holding only the most recent point.
///
/// The host calls [`PointerSensor::on_frame`](crate::PointerSensor::on_frame)
/// once per animation frame; intermediate points are dropped.
#[derive(Debug, Clone, Default)]
pub struct FrameScheduler {
    pending: Option<Position>,
    dropped: u64,
}

impl FrameScheduler {
    /// Create an empty scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether a delivery is waiting for the next tick.
    pub fn is_scheduled(&self) -> bool {
        self.pending.is_some()
    }

    /// Number of stale points replaced before delivery.
    pub fn dropped_count(&self) -> u64 {
        self.dropped
    }
}

impl MovementScheduler for FrameScheduler {
    fn schedule(&mut self, point: Position) {
        if self.pending.replace(point).is_some() {
            self.dropped += 1;
        }
    }

    fn take(&mut self) -> Option<Position> {
        self.pending.take()
    }

    fn cancel(&mut self) {
        self.pending = None;
    }
}
