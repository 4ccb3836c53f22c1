//! Binaural beat sweep generator and player.
//!
//! Two sine tones per preset, one per stereo ear, each sweeping linearly
//! between a start and end frequency over the session duration. The library
//! covers the whole pipeline short of a frontend: preset resolution, sample
//! generation, stereo mixing, and the play/stop session lifecycle against
//! the system audio output.

pub mod audio;
pub mod error;
pub mod playback;
pub mod presets;

use std::time::Duration;

pub use audio::{AudioOutput, OutputSink};
pub use error::PlaybackError;
pub use playback::{PlaybackController, PlaybackState};
pub use presets::{PresetCatalog, PresetEntry, SweepSpec};

/// Session length when the caller does not override it.
pub const DEFAULT_DURATION: Duration = Duration::from_secs(30 * 60);

/// Output sample rate when the caller does not override it.
pub const DEFAULT_SAMPLE_RATE: u32 = 44100;
