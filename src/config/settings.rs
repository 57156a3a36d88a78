//! Tunable progression settings

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::progression::{AwardTable, LevelCurve};

/// Everything the progression session can be tuned with
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressionConfig {
    /// Level thresholds
    pub curve: LevelCurve,
    /// Lifetimes of the ephemeral feedback
    pub feedback: FeedbackTimings,
    /// XP per completed action
    pub awards: AwardTable,
    /// Achievement tones
    pub sound: SoundSettings,
}

/// Achievement tone playback
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoundSettings {
    pub enabled: bool,
    /// Master volume, 0.0 - 1.0
    pub volume: f64,
}

impl Default for SoundSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            volume: 1.0,
        }
    }
}

/// Display windows of the cosmetic feedback, in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackTimings {
    /// Lifetime of a "+N XP" popup
    pub popup_ms: u64,
    /// Level bar highlight after any award
    pub pulse_ms: u64,
    /// Level-up celebration
    pub level_up_ms: u64,
    /// Single awards at or above this play the major tone
    pub major_tone_threshold: u64,
}

impl Default for FeedbackTimings {
    fn default() -> Self {
        Self {
            popup_ms: 1200,
            pulse_ms: 600,
            level_up_ms: 3000,
            major_tone_threshold: 100,
        }
    }
}

impl FeedbackTimings {
    pub fn popup(&self) -> Duration {
        Duration::from_millis(self.popup_ms)
    }

    pub fn pulse(&self) -> Duration {
        Duration::from_millis(self.pulse_ms)
    }

    pub fn level_up(&self) -> Duration {
        Duration::from_millis(self.level_up_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timings() {
        let timings = FeedbackTimings::default();
        assert_eq!(timings.popup(), Duration::from_millis(1200));
        assert_eq!(timings.pulse(), Duration::from_millis(600));
        assert_eq!(timings.level_up(), Duration::from_secs(3));
        assert_eq!(timings.major_tone_threshold, 100);
    }
}
