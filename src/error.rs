//! Error types for playback.

use thiserror::Error;

/// Errors surfaced by the playback pipeline.
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Requested preset name is not in the catalog. Recoverable; playback is
    /// not started and the audio device is not touched.
    #[error("unknown preset: {name:?}")]
    UnknownPreset { name: String },

    /// A session is already active. Concurrent starts are rejected rather
    /// than silently abandoning the running render task.
    #[error("playback already active")]
    AlreadyPlaying,

    /// Sample rate that cannot describe a playable stream.
    #[error("invalid sample rate: {rate} Hz")]
    InvalidSampleRate { rate: u32 },

    /// Session duration that cannot describe a playable stream.
    #[error("invalid duration: {seconds} seconds")]
    InvalidDuration { seconds: u64 },

    /// The audio output device failed to initialize.
    #[error("failed to initialize audio output: {0}")]
    DeviceInit(String),

    /// The audio engine thread is gone or its command channel is closed.
    #[error("audio output unavailable: {0}")]
    OutputUnavailable(String),
}
