//! Sensor configuration.

use crate::error::{Error, Result};
use crate::window::VISIBILITY_EVENT_NAMES;

/// Tunables for a [`PointerSensor`](crate::PointerSensor).
#[derive(Debug, Clone, PartialEq)]
pub struct SensorOptions {
    /// Minimum distance (screen units) from the pointer-down origin before a
    /// pending gesture lifts. `0.0` lifts on the first move.
    pub drag_threshold: f64,
    /// Page visibility event name, resolved with
    /// [`visibility_event_name`](crate::window::visibility_event_name).
    pub visibility_event: &'static str,
    /// Bind window listeners for the capture phase.
    pub capture: bool,
}

impl Default for SensorOptions {
    fn default() -> Self {
        Self {
            drag_threshold: 0.0,
            visibility_event: VISIBILITY_EVENT_NAMES[0],
            capture: true,
        }
    }
}

impl SensorOptions {
    /// Create the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the lift threshold.
    pub fn with_drag_threshold(mut self, threshold: f64) -> Self {
        self.drag_threshold = threshold;
        self
    }

    /// Set the visibility event name.
    pub fn with_visibility_event(mut self, name: &'static str) -> Self {
        self.visibility_event = name;
        self
    }

    /// Bind listeners for the capture (`true`) or bubble (`false`) phase.
    pub fn with_capture(mut self, capture: bool) -> Self {
        self.capture = capture;
        self
    }

    /// Check that every option is in range.
    pub fn validate(&self) -> Result<()> {
        if !self.drag_threshold.is_finite() || self.drag_threshold < 0.0 {
            return Err(Error::InvalidOption(format!(
                "drag threshold must be a non-negative finite number, got {}",
                self.drag_threshold
            )));
        }
        if self.visibility_event.is_empty() {
            return Err(Error::InvalidOption(
                "visibility event name must not be empty".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = SensorOptions::new();
        assert_eq!(options.drag_threshold, 0.0);
        assert_eq!(options.visibility_event, "visibilitychange");
        assert!(options.capture);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_builders() {
        let options = SensorOptions::new()
            .with_drag_threshold(5.0)
            .with_visibility_event("webkitvisibilitychange")
            .with_capture(false);
        assert_eq!(options.drag_threshold, 5.0);
        assert_eq!(options.visibility_event, "webkitvisibilitychange");
        assert!(!options.capture);
    }

    #[test]
    fn test_validate_rejects_bad_threshold() {
        let negative = SensorOptions::new().with_drag_threshold(-1.0);
        assert!(matches!(negative.validate(), Err(Error::InvalidOption(_))));

        let nan = SensorOptions::new().with_drag_threshold(f64::NAN);
        assert!(nan.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_visibility_name() {
        let options = SensorOptions::new().with_visibility_event("");
        assert!(options.validate().is_err());
    }
}
