//! Gesture recording and replay.
//!
//! Record the pointer events a host feeds to a sensor, save them as JSON,
//! and replay them into a fresh sensor later. Useful for:
//! - Reproducing gesture bugs reported from the field
//! - Regression tests built from real input traces
//!
//! # Example
//!
//! ```no_run
//! use dragsense::recorder::{GestureRecorder, Recording};
//! use dragsense::PointerEvent;
//!
//! let mut recorder = GestureRecorder::new();
//! recorder.record(&PointerEvent::pointer_down(0.0, 0.0));
//! recorder.record(&PointerEvent::pointer_move(12.0, 4.0));
//! recorder.record(&PointerEvent::pointer_up(12.0, 4.0));
//!
//! let recording = recorder.finish().with_description("short drag");
//! recording.save("drag.json").unwrap();
//!
//! let recording = Recording::load("drag.json").unwrap();
//! assert_eq!(recording.event_count(), 3);
//! ```

use crate::click::ClickBlocker;
use crate::error::{Error, Result};
use crate::event::{EventType, PointerEvent};
use crate::schedule::MovementScheduler;
use crate::sensor::{PointerSensor, SensorCallbacks};
use crate::window::EventChannel;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::{Duration, Instant, SystemTime};

/// A recorded event with its timestamp relative to recording start.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordedEvent {
    /// Time elapsed since recording start.
    pub elapsed: Duration,
    /// The event that occurred.
    pub event: PointerEvent,
}

/// A recorded sequence of pointer events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recording {
    /// Recorded events with timestamps.
    pub events: Vec<RecordedEvent>,
    /// When the recording was created.
    pub created_at: SystemTime,
    /// Optional description.
    pub description: Option<String>,
}

impl Recording {
    /// Create a new empty recording.
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            created_at: SystemTime::now(),
            description: None,
        }
    }

    /// Set a description for this recording.
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    /// Get the duration of this recording.
    pub fn duration(&self) -> Duration {
        self.events
            .last()
            .map(|e| e.elapsed)
            .unwrap_or(Duration::ZERO)
    }

    /// Get the number of events in this recording.
    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    /// Save the recording to a file (JSON format).
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| Error::Recording(format!("failed to serialize recording: {}", e)))?;
        std::fs::write(path, json)
            .map_err(|e| Error::Recording(format!("failed to write recording file: {}", e)))?;
        Ok(())
    }

    /// Load a recording from a file (JSON format).
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| Error::Recording(format!("failed to read recording file: {}", e)))?;
        let recording: Recording = serde_json::from_str(&json)
            .map_err(|e| Error::Recording(format!("failed to deserialize recording: {}", e)))?;
        Ok(recording)
    }

    /// Replay this recording into a sensor, without timing.
    ///
    /// Pointer-downs go to the sensor's element handler, clicks to its click
    /// guard, and everything else only if the sensor currently has a listener
    /// bound for it. One frame is ticked after each delivered event. Returns
    /// the number of events delivered.
    pub fn replay<C, S>(
        &self,
        sensor: &mut PointerSensor<C, EventChannel, ClickBlocker, S>,
    ) -> Result<usize>
    where
        C: SensorCallbacks,
        S: MovementScheduler,
    {
        let mut delivered = 0;

        for recorded in &self.events {
            let mut event = recorded.event.clone();

            match event.event_type {
                EventType::PointerDown => {
                    sensor.on_pointer_down(&mut event)?;
                }
                EventType::Click => {
                    sensor.click_guard_mut().filter_click(&mut event);
                }
                _ if sensor.window().accepts(&event) => {
                    sensor.handle_window_event(&mut event);
                }
                _ => {
                    log::trace!("skipping unrouted {} during replay", event.event_type.name());
                    continue;
                }
            }

            sensor.on_frame();
            delivered += 1;
        }

        Ok(delivered)
    }
}

impl Default for Recording {
    fn default() -> Self {
        Self::new()
    }
}

/// Stamps events with their time since the recorder was created.
#[derive(Debug)]
pub struct GestureRecorder {
    start: Instant,
    recording: Recording,
}

impl GestureRecorder {
    /// Start a new recording.
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            recording: Recording::new(),
        }
    }

    /// Append an event.
    pub fn record(&mut self, event: &PointerEvent) {
        self.recording.events.push(RecordedEvent {
            elapsed: self.start.elapsed(),
            event: event.clone(),
        });
    }

    /// Number of events recorded so far.
    pub fn event_count(&self) -> usize {
        self.recording.event_count()
    }

    /// Stop recording and return the recording.
    pub fn finish(self) -> Recording {
        self.recording
    }
}

impl Default for GestureRecorder {
    fn default() -> Self {
        Self::new()
    }
}
