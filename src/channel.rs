//! Channel-based delivery of drag notifications.
//!
//! This module provides channel-based alternatives to implementing
//! [`SensorCallbacks`] by hand: the sensor forwards each notification as a
//! [`DragEvent`] and the drag pipeline drains the receiver at its own pace.
//!
//! # Example
//!
//! ```
//! use dragsense::channel::{DragEvent, sensor_channel};
//! use dragsense::{CaptureMarshal, PointerEvent};
//!
//! let (sensor, rx) = sensor_channel(16, |_event| true);
//! let mut sensor = sensor.with_marshal(CaptureMarshal::new());
//!
//! sensor.on_pointer_down(&mut PointerEvent::pointer_down(0.0, 0.0)).unwrap();
//! sensor.handle_window_event(&mut PointerEvent::pointer_move(10.0, 10.0));
//! sensor.handle_window_event(&mut PointerEvent::pointer_up(10.0, 10.0));
//!
//! let events: Vec<DragEvent> = rx.try_iter().collect();
//! assert_eq!(events.len(), 2);
//! assert_eq!(events[1], DragEvent::Drop);
//! ```

use crate::event::{PointerEvent, Position};
use crate::sensor::{LiftArgs, PointerSensor, SensorCallbacks};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::time::Duration;

/// A drag notification forwarded through a channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragEvent {
    /// The drag started.
    Lift(LiftArgs),
    /// Coalesced drag movement.
    Move(Position),
    /// The drag ended with a release.
    Drop,
    /// The gesture was terminated externally.
    Cancel,
}

impl DragEvent {
    fn is_move(&self) -> bool {
        matches!(self, DragEvent::Move(_))
    }
}

/// Budget for `Move` notifications waiting in a channel.
///
/// Lifecycle notifications (`Lift`, `Drop`, `Cancel`) bypass the budget so a
/// consumer always sees every drag start and end.
#[derive(Clone)]
struct MoveBudget {
    queued: Arc<AtomicUsize>,
    capacity: Option<usize>,
}

impl MoveBudget {
    fn new(capacity: Option<usize>) -> Self {
        Self {
            queued: Arc::new(AtomicUsize::new(0)),
            capacity,
        }
    }

    /// Reserve room for one move, or return `false` if the budget is spent.
    fn try_reserve(&self) -> bool {
        match self.capacity {
            None => {
                self.queued.fetch_add(1, Ordering::SeqCst);
                true
            }
            Some(capacity) => self
                .queued
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |queued| {
                    (queued < capacity).then_some(queued + 1)
                })
                .is_ok(),
        }
    }

    fn release(&self) {
        let _ = self
            .queued
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |queued| {
                queued.checked_sub(1)
            });
    }

    /// Account for an event leaving the channel.
    fn received(&self, event: &DragEvent) {
        if event.is_move() {
            self.release();
        }
    }
}

/// [`SensorCallbacks`] that forward notifications to a std channel.
///
/// Authorization is delegated to a filter closure evaluated on every
/// pointer-down.
pub struct ChannelCallbacks<F>
where
    F: FnMut(&PointerEvent) -> bool,
{
    sender: Sender<DragEvent>,
    budget: MoveBudget,
    filter: F,
}

impl<F> ChannelCallbacks<F>
where
    F: FnMut(&PointerEvent) -> bool,
{
    fn send(&self, event: DragEvent) {
        // Don't block event handling if the consumer is slow; stale moves go first.
        if event.is_move() && !self.budget.try_reserve() {
            log::trace!("drag channel full, dropping {:?}", event);
            return;
        }
        if self.sender.send(event).is_err() {
            if event.is_move() {
                self.budget.release();
            }
            log::warn!("drag channel closed, dropping {:?}", event);
        }
    }
}

impl<F> SensorCallbacks for ChannelCallbacks<F>
where
    F: FnMut(&PointerEvent) -> bool,
{
    fn can_start_capturing(&mut self, event: &PointerEvent) -> bool {
        (self.filter)(event)
    }

    fn on_lift(&mut self, args: LiftArgs) {
        self.send(DragEvent::Lift(args));
    }

    fn on_move(&mut self, point: Position) {
        self.send(DragEvent::Move(point));
    }

    fn on_drop(&mut self) {
        self.send(DragEvent::Drop);
    }

    fn on_cancel(&mut self) {
        self.send(DragEvent::Cancel);
    }
}

/// Receiving end of a sensor channel.
///
/// Frees move budget as notifications are taken out.
pub struct DragReceiver {
    receiver: Receiver<DragEvent>,
    budget: MoveBudget,
}

impl DragReceiver {
    /// Block until the next notification, or `None` once the sensor is gone.
    pub fn recv(&self) -> Option<DragEvent> {
        let event = self.receiver.recv().ok()?;
        self.budget.received(&event);
        Some(event)
    }

    /// Wait up to `timeout` for the next notification.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<DragEvent, RecvTimeoutError> {
        let event = self.receiver.recv_timeout(timeout)?;
        self.budget.received(&event);
        Ok(event)
    }

    /// Take the next notification without blocking.
    pub fn try_recv(&self) -> Result<DragEvent, TryRecvError> {
        let event = self.receiver.try_recv()?;
        self.budget.received(&event);
        Ok(event)
    }

    /// Iterate over the notifications currently queued, without blocking.
    pub fn try_iter(&self) -> impl Iterator<Item = DragEvent> + '_ {
        std::iter::from_fn(move || self.try_recv().ok())
    }
}

fn channel_with_budget<F>(
    capacity: Option<usize>,
    filter: F,
) -> (PointerSensor<ChannelCallbacks<F>>, DragReceiver)
where
    F: FnMut(&PointerEvent) -> bool,
{
    let (sender, receiver) = mpsc::channel();
    let budget = MoveBudget::new(capacity);
    let callbacks = ChannelCallbacks {
        sender,
        budget: budget.clone(),
        filter,
    };
    (
        PointerSensor::new(callbacks),
        DragReceiver { receiver, budget },
    )
}

/// Build a sensor that sends its notifications to a bounded channel.
///
/// # Arguments
///
/// * `capacity` - Maximum number of `Move` notifications to buffer. If the
///   buffer is full, new moves are dropped rather than blocking input
///   handling. `Lift`, `Drop` and `Cancel` are never dropped.
/// * `filter` - Returns `true` to let a pointer-down start capturing.
pub fn sensor_channel<F>(
    capacity: usize,
    filter: F,
) -> (PointerSensor<ChannelCallbacks<F>>, DragReceiver)
where
    F: FnMut(&PointerEvent) -> bool,
{
    channel_with_budget(Some(capacity), filter)
}

/// Build a sensor that sends its notifications to an unbounded channel.
///
/// Similar to [`sensor_channel`], but never drops notifications.
pub fn unbounded_sensor_channel<F>(
    filter: F,
) -> (PointerSensor<ChannelCallbacks<F>>, DragReceiver)
where
    F: FnMut(&PointerEvent) -> bool,
{
    channel_with_budget(None, filter)
}

// ============================================================================
// Tokio async support (behind feature flag)
// ============================================================================

#[cfg(feature = "tokio")]
pub use tokio_channel::*;

#[cfg(feature = "tokio")]
mod tokio_channel {
    use super::*;
    use tokio::sync::mpsc as tokio_mpsc;

    /// [`SensorCallbacks`] that forward notifications to a tokio channel.
    pub struct TokioChannelCallbacks<F>
    where
        F: FnMut(&PointerEvent) -> bool,
    {
        sender: tokio_mpsc::UnboundedSender<DragEvent>,
        budget: MoveBudget,
        filter: F,
    }

    impl<F> TokioChannelCallbacks<F>
    where
        F: FnMut(&PointerEvent) -> bool,
    {
        fn send(&self, event: DragEvent) {
            // Never await in the event handler; only moves are shed when full
            if event.is_move() && !self.budget.try_reserve() {
                log::trace!("async drag channel full, dropping {:?}", event);
                return;
            }
            if self.sender.send(event).is_err() {
                if event.is_move() {
                    self.budget.release();
                }
                log::warn!("async drag channel closed, dropping {:?}", event);
            }
        }
    }

    impl<F> SensorCallbacks for TokioChannelCallbacks<F>
    where
        F: FnMut(&PointerEvent) -> bool,
    {
        fn can_start_capturing(&mut self, event: &PointerEvent) -> bool {
            (self.filter)(event)
        }

        fn on_lift(&mut self, args: LiftArgs) {
            self.send(DragEvent::Lift(args));
        }

        fn on_move(&mut self, point: Position) {
            self.send(DragEvent::Move(point));
        }

        fn on_drop(&mut self) {
            self.send(DragEvent::Drop);
        }

        fn on_cancel(&mut self) {
            self.send(DragEvent::Cancel);
        }
    }

    /// Async receiving end of a sensor channel.
    pub struct AsyncDragReceiver {
        receiver: tokio_mpsc::UnboundedReceiver<DragEvent>,
        budget: MoveBudget,
    }

    impl AsyncDragReceiver {
        /// Wait for the next notification, or `None` once the sensor is gone.
        pub async fn recv(&mut self) -> Option<DragEvent> {
            let event = self.receiver.recv().await?;
            self.budget.received(&event);
            Some(event)
        }

        /// Take the next notification without waiting.
        pub fn try_recv(&mut self) -> Option<DragEvent> {
            let event = self.receiver.try_recv().ok()?;
            self.budget.received(&event);
            Some(event)
        }
    }

    /// Build a sensor that sends its notifications to a tokio channel.
    ///
    /// `capacity` bounds queued `Move` notifications only, as in
    /// [`sensor_channel`].
    ///
    /// # Example
    ///
    /// ```ignore
    /// use dragsense::channel::async_sensor_channel;
    ///
    /// #[tokio::main]
    /// async fn main() {
    ///     let (sensor, mut rx) = async_sensor_channel(64, |_| true);
    ///     // hand `sensor` to the event loop...
    ///     while let Some(event) = rx.recv().await {
    ///         println!("{:?}", event);
    ///     }
    /// }
    /// ```
    pub fn async_sensor_channel<F>(
        capacity: usize,
        filter: F,
    ) -> (PointerSensor<TokioChannelCallbacks<F>>, AsyncDragReceiver)
    where
        F: FnMut(&PointerEvent) -> bool,
    {
        let (sender, receiver) = tokio_mpsc::unbounded_channel();
        let budget = MoveBudget::new(Some(capacity));
        let callbacks = TokioChannelCallbacks {
            sender,
            budget: budget.clone(),
            filter,
        };
        (
            PointerSensor::new(callbacks),
            AsyncDragReceiver { receiver, budget },
        )
    }
}
