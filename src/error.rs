//! Error types for the drag sensor.

use thiserror::Error;

/// Result type alias for dragsense operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while driving a pointer sensor.
#[derive(Debug, Error)]
pub enum Error {
    /// A pointer-down reached a sensor that is already pending or dragging.
    ///
    /// This is a caller bug: the host routed a second pointer-down to a
    /// sensor without waiting for the first gesture to finish.
    #[error("sensor is already capturing a gesture")]
    AlreadyCapturing,

    /// The capture marshal was claimed while already claimed.
    #[error("pointer-down has already been claimed by another sensor")]
    AlreadyClaimed,

    /// A sensor option is out of range.
    #[error("invalid sensor option: {0}")]
    InvalidOption(String),

    /// Failed to save, load or replay a gesture recording.
    #[error("recording error: {0}")]
    Recording(String),
}
