use std::time::Duration;

use rodio::Source;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use super::mixer::{StereoFrame, StereoMixer};

/// Frames pulled from the mixer per refill. Cancellation is observed at
/// this granularity, so a stop lands within one block of the signal.
const BLOCK_FRAMES: usize = 512;

/// The stream handed to the audio sink for one session.
///
/// Wraps the mixer with the session's frame budget, the per-session
/// cancellation token, and a completion signal. Yields interleaved stereo
/// samples (left first) through rodio's `Source` contract, refilling from
/// the mixer one block at a time.
pub struct SessionSource {
    mixer: StereoMixer,
    sample_rate: u32,
    duration: Duration,
    frames_remaining: u64,
    cancel: CancellationToken,
    done_tx: Option<watch::Sender<bool>>,
    scratch: Vec<StereoFrame>,
    buf: Vec<f32>,
    pos: usize,
    finished: bool,
}

impl SessionSource {
    pub fn new(
        mixer: StereoMixer,
        sample_rate: u32,
        total_frames: u64,
        cancel: CancellationToken,
        done_tx: watch::Sender<bool>,
    ) -> Self {
        Self {
            mixer,
            sample_rate,
            duration: Duration::from_secs_f64(total_frames as f64 / sample_rate as f64),
            frames_remaining: total_frames,
            cancel,
            done_tx: Some(done_tx),
            scratch: Vec::with_capacity(BLOCK_FRAMES),
            buf: Vec::with_capacity(BLOCK_FRAMES * 2),
            pos: 0,
            finished: false,
        }
    }

    fn refill(&mut self) {
        self.buf.clear();
        self.pos = 0;

        if self.finished {
            return;
        }
        if self.cancel.is_cancelled() {
            // Stop path: end the stream without a completion signal. The
            // sink is cleared by the controller, which also sees the
            // cancellation through its own token handle.
            self.finished = true;
            return;
        }
        if self.frames_remaining == 0 {
            // Natural end of the session; signal completion exactly once.
            self.finished = true;
            if let Some(tx) = self.done_tx.take() {
                let _ = tx.send(true);
            }
            return;
        }

        let take = BLOCK_FRAMES.min(self.frames_remaining as usize);
        self.frames_remaining -= take as u64;

        self.scratch.resize(take, StereoFrame::default());
        self.mixer.render(&mut self.scratch);
        for frame in &self.scratch {
            self.buf.push(frame.left);
            self.buf.push(frame.right);
        }
    }
}

impl Iterator for SessionSource {
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.buf.len() {
            self.refill();
        }
        let sample = self.buf.get(self.pos).copied();
        self.pos += 1;
        sample
    }
}

impl Source for SessionSource {
    fn current_frame_len(&self) -> Option<usize> {
        None
    }

    fn channels(&self) -> u16 {
        2
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn total_duration(&self) -> Option<Duration> {
        Some(self.duration)
    }
}
