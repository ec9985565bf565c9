//! Window-level listener bindings.
//!
//! Once a sensor claims a pointer-down it listens on the whole window rather
//! than the original element, so the pointer can leave the element without
//! the gesture being lost. The listener set is bound and unbound as a unit.

use crate::event::{EventType, PointerEvent};

/// Visibility event names, in feature detection order.
pub const VISIBILITY_EVENT_NAMES: [&str; 4] = [
    "visibilitychange",
    "webkitvisibilitychange",
    "mozvisibilitychange",
    "msvisibilitychange",
];

/// Resolve the page visibility event name supported by the host.
///
/// `is_supported` is asked about each candidate in turn (typically by checking
/// for an `on<name>` property on the document). Falls back to the standard
/// name when nothing matches.
pub fn visibility_event_name<F>(is_supported: F) -> &'static str
where
    F: Fn(&str) -> bool,
{
    VISIBILITY_EVENT_NAMES
        .iter()
        .copied()
        .find(|name| is_supported(name))
        .unwrap_or(VISIBILITY_EVENT_NAMES[0])
}

/// A single named listener in a binding set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Binding {
    /// Event name as registered with the window.
    pub name: &'static str,
    /// Event type the listener routes to the sensor.
    pub event_type: EventType,
}

/// Listener registration options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BindOptions {
    /// Register for the capture phase.
    pub capture: bool,
    /// Register as passive (listener will not prevent default).
    pub passive: bool,
}

impl Default for BindOptions {
    fn default() -> Self {
        Self {
            capture: true,
            passive: false,
        }
    }
}

/// Build the window binding set used while a gesture is captured.
pub fn window_bindings(visibility_event: &'static str) -> Vec<Binding> {
    vec![
        Binding {
            name: EventType::PointerMove.name(),
            event_type: EventType::PointerMove,
        },
        Binding {
            name: EventType::PointerUp.name(),
            event_type: EventType::PointerUp,
        },
        Binding {
            name: EventType::MouseMove.name(),
            event_type: EventType::MouseMove,
        },
        Binding {
            name: EventType::LostPointerCapture.name(),
            event_type: EventType::LostPointerCapture,
        },
        Binding {
            name: visibility_event,
            event_type: EventType::VisibilityChange,
        },
    ]
}

/// Binds and unbinds listener sets on a window-like target.
///
/// Implementations register every binding or none; the sensor never asks
/// for a partial set.
pub trait WindowChannel {
    /// Register all bindings.
    fn bind(&mut self, bindings: &[Binding], options: BindOptions);

    /// Remove all bindings previously registered with the same options.
    fn unbind(&mut self, bindings: &[Binding], options: BindOptions);
}

/// Default [`WindowChannel`]: tracks the bound set in memory.
///
/// Hosts that own their own event loop use [`accepts`](Self::accepts) to
/// decide which window events to route into
/// [`PointerSensor::handle_window_event`](crate::PointerSensor::handle_window_event).
#[derive(Debug, Clone, Default)]
pub struct EventChannel {
    bound: Vec<Binding>,
    options: Option<BindOptions>,
    bind_count: u64,
    unbind_count: u64,
}

impl EventChannel {
    /// Create a channel with nothing bound.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether a listener set is currently bound.
    pub fn is_bound(&self) -> bool {
        !self.bound.is_empty()
    }

    /// Names of the currently bound listeners, in binding order.
    pub fn bound_names(&self) -> Vec<&'static str> {
        self.bound.iter().map(|b| b.name).collect()
    }

    /// Options the current set was bound with.
    pub fn options(&self) -> Option<BindOptions> {
        self.options
    }

    /// Number of times a set has been bound.
    pub fn bind_count(&self) -> u64 {
        self.bind_count
    }

    /// Number of times a set has been unbound.
    pub fn unbind_count(&self) -> u64 {
        self.unbind_count
    }

    /// Check whether a window event has a bound listener.
    pub fn accepts(&self, event: &PointerEvent) -> bool {
        self.bound.iter().any(|b| b.event_type == event.event_type)
    }
}

impl WindowChannel for EventChannel {
    fn bind(&mut self, bindings: &[Binding], options: BindOptions) {
        if self.is_bound() {
            log::warn!("binding window listeners over an existing set, replacing it");
        }
        self.bound = bindings.to_vec();
        self.options = Some(options);
        self.bind_count += 1;
    }

    fn unbind(&mut self, bindings: &[Binding], options: BindOptions) {
        if !self.is_bound() {
            return;
        }
        if self.bound != bindings || self.options != Some(options) {
            log::warn!("unbinding a window listener set that does not match the bound one");
        }
        self.bound.clear();
        self.options = None;
        self.unbind_count += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visibility_detection_prefers_standard() {
        assert_eq!(visibility_event_name(|_| true), "visibilitychange");
    }

    #[test]
    fn test_visibility_detection_vendor_prefix() {
        let name = visibility_event_name(|n| n == "webkitvisibilitychange");
        assert_eq!(name, "webkitvisibilitychange");
    }

    #[test]
    fn test_visibility_detection_fallback() {
        assert_eq!(visibility_event_name(|_| false), "visibilitychange");
    }

    #[test]
    fn test_bind_unbind_whole_set() {
        let mut channel = EventChannel::new();
        let bindings = window_bindings("visibilitychange");

        channel.bind(&bindings, BindOptions::default());
        assert!(channel.is_bound());
        assert_eq!(
            channel.bound_names(),
            vec![
                "pointermove",
                "pointerup",
                "mousemove",
                "lostpointercapture",
                "visibilitychange"
            ]
        );
        assert_eq!(channel.options().map(|o| o.capture), Some(true));

        channel.unbind(&bindings, BindOptions::default());
        assert!(!channel.is_bound());
        assert!(channel.bound_names().is_empty());
        assert_eq!(channel.bind_count(), 1);
        assert_eq!(channel.unbind_count(), 1);
    }

    #[test]
    fn test_unbind_when_unbound_is_noop() {
        let mut channel = EventChannel::new();
        channel.unbind(&window_bindings("visibilitychange"), BindOptions::default());
        assert_eq!(channel.unbind_count(), 0);
    }

    #[test]
    fn test_accepts_only_bound_types() {
        let mut channel = EventChannel::new();
        assert!(!channel.accepts(&PointerEvent::pointer_move(0.0, 0.0)));

        channel.bind(&window_bindings("visibilitychange"), BindOptions::default());
        assert!(channel.accepts(&PointerEvent::pointer_move(0.0, 0.0)));
        assert!(channel.accepts(&PointerEvent::visibility_change()));
        assert!(!channel.accepts(&PointerEvent::pointer_down(0.0, 0.0)));
        assert!(!channel.accepts(&PointerEvent::click(0.0, 0.0)));
    }
}
