//! Sample generation and audio output.
//!
//! A session's signal chain: two [`SweepingSine`] generators (one per ear)
//! feed a [`StereoMixer`], whose frames are streamed through a
//! [`SessionSource`] into the [`OutputSink`].

pub mod mixer;
pub mod output;
pub mod source;
pub mod sweep;

pub use mixer::{StereoFrame, StereoMixer};
pub use output::{AudioOutput, OutputSink};
pub use source::SessionSource;
pub use sweep::SweepingSine;
