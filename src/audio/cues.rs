//! Achievement cue definitions

use super::synth::Tone;

/// Sound cues played on awards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    /// Short chime for ordinary awards
    XpMinor,
    /// Longer, brighter chime for large single awards
    XpMajor,
    /// Level-up fanfare
    LevelUp,
}

impl Cue {
    pub const ALL: [Cue; 3] = [Cue::XpMinor, Cue::XpMajor, Cue::LevelUp];

    /// Cue for a single award of `amount` XP
    pub fn for_award(amount: u64, major_threshold: u64) -> Self {
        if amount >= major_threshold {
            Cue::XpMajor
        } else {
            Cue::XpMinor
        }
    }

    /// Chirp synthesized for this cue
    pub fn tone(&self) -> Tone {
        match self {
            Cue::XpMinor => Tone { frequency: 523.25, seconds: 0.4 },
            Cue::XpMajor => Tone { frequency: 659.25, seconds: 0.8 },
            Cue::LevelUp => Tone { frequency: 783.99, seconds: 1.2 },
        }
    }

    /// Get the default volume for this cue (0.0 - 1.0)
    pub fn default_volume(&self) -> f64 {
        match self {
            Cue::XpMinor => 0.4,
            Cue::XpMajor => 0.7,
            Cue::LevelUp => 0.8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_major_threshold() {
        assert_eq!(Cue::for_award(5, 100), Cue::XpMinor);
        assert_eq!(Cue::for_award(99, 100), Cue::XpMinor);
        assert_eq!(Cue::for_award(100, 100), Cue::XpMajor);
        assert_eq!(Cue::for_award(200, 100), Cue::XpMajor);
    }

    #[test]
    fn test_tones_rise_in_pitch_and_length() {
        let [minor, major, level_up] = Cue::ALL.map(|c| c.tone());
        assert!(minor.frequency < major.frequency && major.frequency < level_up.frequency);
        assert!(minor.seconds < major.seconds && major.seconds < level_up.seconds);
    }

    #[test]
    fn test_major_is_louder() {
        assert!(Cue::XpMajor.default_volume() > Cue::XpMinor.default_volume());
    }
}
