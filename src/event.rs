//! Pointer event types consumed by the sensor.

use std::time::SystemTime;

#[cfg(feature = "recorder")]
use serde::{Deserialize, Serialize};

/// A point in client or screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "recorder", derive(Serialize, Deserialize))]
pub struct Position {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
}

impl Position {
    /// Create a new position.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another position.
    pub fn distance(&self, other: Position) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Neither coordinate is NaN or infinite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// The type of a window or element event seen by the sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "recorder", derive(Serialize, Deserialize))]
pub enum EventType {
    /// A pointer was pressed on the hosting element.
    PointerDown,
    /// A pointer moved.
    PointerMove,
    /// A pointer was released.
    PointerUp,
    /// Legacy mouse movement, delivered alongside pointer movement.
    MouseMove,
    /// The element lost its pointer capture.
    LostPointerCapture,
    /// The page visibility changed.
    VisibilityChange,
    /// A click was synthesized after a press and release.
    Click,
}

impl EventType {
    /// The DOM-style event name used when binding a listener for this type.
    ///
    /// Visibility change has no fixed name; see
    /// [`visibility_event_name`](crate::window::visibility_event_name).
    pub fn name(&self) -> &'static str {
        match self {
            EventType::PointerDown => "pointerdown",
            EventType::PointerMove => "pointermove",
            EventType::PointerUp => "pointerup",
            EventType::MouseMove => "mousemove",
            EventType::LostPointerCapture => "lostpointercapture",
            EventType::VisibilityChange => "visibilitychange",
            EventType::Click => "click",
        }
    }
}

/// The device that produced a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "recorder", derive(Serialize, Deserialize))]
pub enum PointerKind {
    /// A mouse.
    #[default]
    Mouse,
    /// A touch contact.
    Touch,
    /// A stylus.
    Pen,
}

/// A pointer event as delivered to the sensor.
///
/// The sensor suppresses default behaviour and propagation by setting the
/// flags on the event it is handed; the host is expected to honour them.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "recorder", derive(Serialize, Deserialize))]
pub struct PointerEvent {
    /// The type of event.
    pub event_type: EventType,
    /// Timestamp when the event occurred.
    pub time: SystemTime,
    /// Position relative to the viewport.
    pub client: Position,
    /// Position relative to the screen.
    pub screen: Position,
    /// Identifier of the pointer that produced the event.
    pub pointer_id: u32,
    /// Device kind.
    pub pointer_kind: PointerKind,
    /// Whether this is the primary pointer of a multi-pointer interaction.
    pub is_primary: bool,
    /// Set once the default browser action has been suppressed.
    pub default_prevented: bool,
    /// Set once propagation has been stopped.
    pub propagation_stopped: bool,
}

impl PointerEvent {
    /// Create a primary mouse event of the given type at a client position.
    ///
    /// Screen coordinates default to the client coordinates.
    pub fn new(event_type: EventType, x: f64, y: f64) -> Self {
        Self {
            event_type,
            time: SystemTime::now(),
            client: Position::new(x, y),
            screen: Position::new(x, y),
            pointer_id: 1,
            pointer_kind: PointerKind::Mouse,
            is_primary: true,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    /// Create a pointer down event.
    pub fn pointer_down(x: f64, y: f64) -> Self {
        Self::new(EventType::PointerDown, x, y)
    }

    /// Create a pointer move event.
    pub fn pointer_move(x: f64, y: f64) -> Self {
        Self::new(EventType::PointerMove, x, y)
    }

    /// Create a pointer up event.
    pub fn pointer_up(x: f64, y: f64) -> Self {
        Self::new(EventType::PointerUp, x, y)
    }

    /// Create a mouse move event.
    pub fn mouse_move(x: f64, y: f64) -> Self {
        Self::new(EventType::MouseMove, x, y)
    }

    /// Create a lost pointer capture event.
    pub fn lost_pointer_capture() -> Self {
        Self::new(EventType::LostPointerCapture, 0.0, 0.0)
    }

    /// Create a visibility change event.
    pub fn visibility_change() -> Self {
        Self::new(EventType::VisibilityChange, 0.0, 0.0)
    }

    /// Create a click event.
    pub fn click(x: f64, y: f64) -> Self {
        Self::new(EventType::Click, x, y)
    }

    /// Mark this event as coming from a secondary touch contact.
    pub fn secondary(mut self, pointer_id: u32) -> Self {
        self.pointer_id = pointer_id;
        self.pointer_kind = PointerKind::Touch;
        self.is_primary = false;
        self
    }

    /// Override the screen coordinates.
    pub fn with_screen(mut self, x: f64, y: f64) -> Self {
        self.screen = Position::new(x, y);
        self
    }

    /// Suppress the default browser action for this event.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Stop this event from propagating further.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Check that both coordinate pairs are finite numbers.
    pub fn has_finite_coordinates(&self) -> bool {
        self.client.is_finite() && self.screen.is_finite()
    }
}
