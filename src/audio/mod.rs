//! Audio system
//!
//! Achievement chirps synthesized in memory and played through the Kira
//! audio library. Playback is
//! cosmetic: every failure is logged and dropped.

pub mod manager;
pub mod cues;
pub mod synth;

pub use manager::AudioManager;
pub use cues::Cue;

/// Anything that can sound a cue
pub trait CuePlayer: Send {
    fn play(&mut self, cue: Cue);
}

/// Player that ignores every cue
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl CuePlayer for Silent {
    fn play(&mut self, _cue: Cue) {}
}
