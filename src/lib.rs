//! # dragsense
//!
//! A race-free pointer drag sensor: recognizes drag gestures from raw pointer
//! events and arbitrates which of many nested draggables owns a press.
//!
//! ## Features
//!
//! - Three-state machine: idle, pending (pressed, waiting for movement), dragging
//! - Shared claim marshal so nested sensors never double-start a drag
//! - Window-wide listener set bound only while a gesture is captured
//! - Frame-coalesced movement delivery
//! - Post-drag click suppression
//! - Channel-based delivery (std, or tokio with the `tokio` feature)
//! - Gesture recording and replay (`recorder` feature)
//!
//! ## Quick Start
//!
//! ```
//! use dragsense::{CaptureMarshal, LiftArgs, PointerEvent, PointerSensor, SensorCallbacks};
//!
//! #[derive(Default)]
//! struct Pipeline {
//!     lifted: bool,
//!     dropped: bool,
//! }
//!
//! impl SensorCallbacks for Pipeline {
//!     fn can_start_capturing(&mut self, _event: &PointerEvent) -> bool {
//!         true
//!     }
//!     fn on_lift(&mut self, _args: LiftArgs) {
//!         self.lifted = true;
//!     }
//!     fn on_drop(&mut self) {
//!         self.dropped = true;
//!     }
//!     fn on_cancel(&mut self) {}
//! }
//!
//! let mut sensor = PointerSensor::new(Pipeline::default()).with_marshal(CaptureMarshal::new());
//!
//! // Press on the element, then move and release over the window.
//! sensor.on_pointer_down(&mut PointerEvent::pointer_down(0.0, 0.0)).unwrap();
//! sensor.handle_window_event(&mut PointerEvent::pointer_move(10.0, 10.0));
//! assert!(sensor.is_dragging());
//! sensor.handle_window_event(&mut PointerEvent::pointer_up(10.0, 10.0));
//!
//! assert!(sensor.callbacks().lifted && sensor.callbacks().dropped);
//! assert!(!sensor.is_capturing());
//! ```
//!
//! ## Architecture
//!
//! A pointer-down on the hosting element reaches [`PointerSensor::on_pointer_down`].
//! If the shared [`CaptureMarshal`] is unclaimed and the consumer authorizes
//! it, the sensor claims the press, enters `Pending`, and binds its window
//! listener set through a [`WindowChannel`]. From then on window events drive
//! the machine via [`PointerSensor::handle_window_event`] until a release, a
//! visibility change, or an explicit [`kill`](PointerSensor::kill) /
//! [`cancel`](PointerSensor::cancel) returns it to idle.
//!
//! Everything runs synchronously on the caller's thread; every teardown is
//! complete by the time the triggering call returns.

pub mod channel;
pub mod click;
pub mod error;
pub mod event;
pub mod options;
#[cfg(feature = "recorder")]
pub mod recorder;
pub mod schedule;
pub mod sensor;
pub mod state;
pub mod window;

// Re-exports
pub use click::{ClickBlocker, ClickGuard};
pub use error::{Error, Result};
pub use event::{EventType, PointerEvent, PointerKind, Position};
pub use options::SensorOptions;
#[cfg(feature = "recorder")]
pub use recorder::{GestureRecorder, RecordedEvent, Recording};
pub use schedule::{FrameScheduler, MovementScheduler};
pub use sensor::{
    LiftArgs, MovementMode, PointerDownOutcome, PointerSensor, SensorCallbacks, SensorState,
};
pub use state::CaptureMarshal;
pub use window::{
    BindOptions, Binding, EventChannel, WindowChannel, visibility_event_name, window_bindings,
};
