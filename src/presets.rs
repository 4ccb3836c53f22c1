//! Builtin binaural preset table.
//!
//! Each preset names a pair of frequency sweeps, one per stereo ear. The
//! classic brainwave bands (delta, theta, alpha, beta, gamma) sweep both ears
//! through the same range; the themed presets sweep the ears in opposite
//! directions so the perceived beat narrows and widens over the session.

use rand::seq::SliceRandom;

/// One channel's linear frequency trajectory over the session duration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepSpec {
    pub start_hz: f64,
    pub end_hz: f64,
}

impl SweepSpec {
    pub const fn new(start_hz: f64, end_hz: f64) -> Self {
        Self { start_hz, end_hz }
    }
}

/// A named preset: sweep specs for the left and right channel.
#[derive(Debug, Clone, Copy)]
pub struct PresetEntry {
    pub name: &'static str,
    pub channels: [SweepSpec; 2],
}

const fn preset(name: &'static str, left: (f64, f64), right: (f64, f64)) -> PresetEntry {
    PresetEntry {
        name,
        channels: [SweepSpec::new(left.0, left.1), SweepSpec::new(right.0, right.1)],
    }
}

const BUILTIN: [PresetEntry; 26] = [
    preset("delta", (0.5, 4.0), (0.5, 4.0)),
    preset("theta", (4.0, 8.0), (4.0, 8.0)),
    preset("alpha", (8.0, 13.0), (8.0, 13.0)),
    preset("beta", (13.0, 30.0), (13.0, 30.0)),
    preset("gamma", (30.0, 50.0), (30.0, 50.0)),
    preset("confidence", (60.0, 30.0), (30.0, 60.0)),
    preset("relaxing", (70.0, 35.0), (35.0, 70.0)),
    preset("higherconsciousness", (85.0, 42.5), (42.5, 85.0)),
    preset("inspiration", (90.0, 45.0), (45.0, 90.0)),
    preset("clarity", (95.0, 47.5), (47.5, 95.0)),
    preset("stressrelief", (20.0, 5.0), (5.0, 20.0)),
    preset("calm", (30.0, 7.5), (7.5, 30.0)),
    preset("meditation", (45.0, 11.25), (11.25, 45.0)),
    preset("creativity", (50.0, 12.5), (12.5, 50.0)),
    preset("memoryrecall", (55.0, 13.75), (13.75, 55.0)),
    preset("luciddreaming", (65.0, 16.25), (16.25, 65.0)),
    preset("mindfulness", (70.0, 17.5), (17.5, 70.0)),
    preset("productivity", (75.0, 18.75), (18.75, 75.0)),
    preset("motivation", (80.0, 20.0), (20.0, 80.0)),
    preset("positiveenergy", (85.0, 21.25), (21.25, 85.0)),
    preset("anxietyrelief", (95.0, 23.75), (23.75, 95.0)),
    preset("innerpeace", (100.0, 25.0), (25.0, 100.0)),
    preset("positivity", (115.0, 32.5), (32.5, 115.0)),
    preset("focus", (120.0, 35.0), (35.0, 120.0)),
    preset("energy", (125.0, 37.5), (37.5, 125.0)),
    preset("relaxation", (130.0, 40.0), (40.0, 130.0)),
];

/// Read-only catalog of all known presets.
///
/// Constructed once at process start and passed by reference to whichever
/// component needs lookup; there is no global mutable table.
#[derive(Debug, Clone)]
pub struct PresetCatalog {
    entries: &'static [PresetEntry],
}

impl PresetCatalog {
    /// The builtin 26-preset catalog.
    pub fn builtin() -> Self {
        Self { entries: &BUILTIN }
    }

    pub fn lookup(&self, name: &str) -> Option<&PresetEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|entry| entry.name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Uniformly random preset name, used by frontends for a default
    /// dropdown selection.
    pub fn random_name(&self) -> &'static str {
        self.entries
            .choose(&mut rand::thread_rng())
            .map(|entry| entry.name)
            .expect("builtin catalog is never empty")
    }
}

impl Default for PresetCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
