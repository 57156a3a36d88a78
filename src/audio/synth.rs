//! In-memory tone synthesis
//!
//! Cues are short sine chirps. The pitch glides up to 1.5x its start over
//! the first 100 ms and the gain decays exponentially over the whole tone.

use std::f64::consts::TAU;
use std::sync::Arc;

use kira::{
    sound::static_sound::{StaticSoundData, StaticSoundSettings},
    Frame,
};

use super::cues::Cue;

pub const SAMPLE_RATE: u32 = 44_100;

/// Time the pitch takes to reach its peak
const SWEEP_SECONDS: f64 = 0.1;
/// Peak pitch relative to the start pitch
const SWEEP_RATIO: f64 = 1.5;
/// Gain at the end of the tone relative to its start
const END_GAIN: f64 = 0.02;

/// Shape of one chirp
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    /// Start pitch in Hz
    pub frequency: f64,
    /// Length in seconds
    pub seconds: f64,
}

impl Tone {
    pub fn frame_count(&self) -> usize {
        (self.seconds * SAMPLE_RATE as f64).round() as usize
    }

    fn pitch_at(&self, t: f64) -> f64 {
        let sweep = (t / SWEEP_SECONDS).min(1.0);
        self.frequency * SWEEP_RATIO.powf(sweep)
    }

    fn gain_at(&self, t: f64) -> f64 {
        END_GAIN.powf(t / self.seconds)
    }
}

/// Sample a tone into mono frames
pub fn render(tone: Tone) -> Vec<Frame> {
    let dt = 1.0 / SAMPLE_RATE as f64;
    let mut phase = 0.0_f64;

    (0..tone.frame_count())
        .map(|i| {
            let t = i as f64 * dt;
            let sample = phase.sin() * tone.gain_at(t);
            phase = (phase + TAU * tone.pitch_at(t) * dt) % TAU;
            Frame::from_mono(sample as f32)
        })
        .collect()
}

/// Playable sound data for a cue
pub fn sound_data(cue: Cue) -> StaticSoundData {
    StaticSoundData {
        sample_rate: SAMPLE_RATE,
        frames: Arc::from(render(cue.tone())),
        settings: StaticSoundSettings::default(),
        slice: None,
    }
}
