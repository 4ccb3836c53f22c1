use std::f64::consts::PI;

use crate::presets::SweepSpec;

/// Single-channel sweeping sine generator.
///
/// Produces samples for a tone whose frequency moves linearly from
/// `start_hz` to `end_hz` over the session duration. The instantaneous
/// frequency depends only on how many samples this generator has emitted,
/// never on wall-clock time, so output is deterministic regardless of
/// scheduling jitter.
///
/// The phase argument is `2π · f(i) · i / rate` with the absolute sample
/// index `i`, not an integrated phase. The sweep is therefore a
/// reparametrized sine rather than a phase-continuous chirp; frequency
/// changes produce small phase jumps. Kept intentionally, see DESIGN.md.
#[derive(Debug)]
pub struct SweepingSine {
    spec: SweepSpec,
    sample_rate: u32,
    total_samples: u64,
    samples_emitted: u64,
    channel: u8,
}

impl SweepingSine {
    /// `channel` is 0 for left, 1 for right; `total_samples` is the session
    /// duration in samples and only parametrizes the sweep. The generator
    /// itself never stops producing; the session stream enforces the budget.
    pub fn new(spec: SweepSpec, sample_rate: u32, total_samples: u64, channel: u8) -> Self {
        debug_assert!(channel < 2);
        Self {
            spec,
            sample_rate,
            total_samples,
            samples_emitted: 0,
            channel,
        }
    }

    /// Sweep progress for the next sample, in [0, 1] while within the
    /// session duration.
    fn progress(&self) -> f64 {
        self.samples_emitted as f64 / self.total_samples as f64
    }

    /// Compute the next sample and advance the emitted-sample counter.
    pub fn next_sample(&mut self) -> f32 {
        let i = self.samples_emitted as f64;
        let freq = self.spec.start_hz + (self.spec.end_hz - self.spec.start_hz) * self.progress();
        self.samples_emitted += 1;
        (2.0 * PI * freq * i / self.sample_rate as f64).sin() as f32
    }

    /// Fill a block of samples, advancing the counter by `out.len()`.
    pub fn render(&mut self, out: &mut [f32]) {
        for sample in out.iter_mut() {
            *sample = self.next_sample();
        }
    }

    pub fn channel(&self) -> u8 {
        self.channel
    }

    pub fn samples_emitted(&self) -> u64 {
        self.samples_emitted
    }
}
