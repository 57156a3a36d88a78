//! Audio manager using Kira
//!
//! Owns the output device and the synthesized cue sounds.

use std::collections::HashMap;

use kira::{
    manager::{AudioManager as KiraManager, AudioManagerSettings, backend::DefaultBackend},
    sound::static_sound::{StaticSoundData, StaticSoundSettings},
    Volume,
};

use crate::config::SoundSettings;

use super::cues::Cue;
use super::synth;
use super::CuePlayer;

/// Plays cues through the default output device
pub struct AudioManager {
    /// Kira audio manager, `None` when no device could be opened
    manager: Option<KiraManager>,
    /// Rendered cue sounds
    sounds: HashMap<Cue, StaticSoundData>,
    /// Master volume (0.0 - 1.0)
    master_volume: f64,
}

impl AudioManager {
    /// Open the default device and render the cues
    pub fn new() -> Self {
        let manager = match KiraManager::<DefaultBackend>::new(AudioManagerSettings::default()) {
            Ok(m) => {
                log::info!("Audio manager initialized successfully");
                Some(m)
            }
            Err(e) => {
                log::warn!("Failed to initialize audio manager: {}. Audio disabled.", e);
                None
            }
        };

        let sounds = if manager.is_some() {
            Cue::ALL.into_iter().map(|cue| (cue, synth::sound_data(cue))).collect()
        } else {
            HashMap::new()
        };

        Self {
            manager,
            sounds,
            master_volume: 1.0,
        }
    }

    /// Manager that never touches an audio device
    pub fn disabled() -> Self {
        Self {
            manager: None,
            sounds: HashMap::new(),
            master_volume: 1.0,
        }
    }

    /// Manager configured from the user's sound settings
    pub fn from_settings(settings: &SoundSettings) -> Self {
        let mut audio = if settings.enabled {
            Self::new()
        } else {
            log::info!("Sound disabled in config");
            Self::disabled()
        };
        audio.set_master_volume(settings.volume);
        audio
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, volume: f64) {
        self.master_volume = volume.clamp(0.0, 1.0);
    }

    pub fn master_volume(&self) -> f64 {
        self.master_volume
    }

    /// Backed by a device
    pub fn is_enabled(&self) -> bool {
        self.manager.is_some()
    }
}

impl CuePlayer for AudioManager {
    fn play(&mut self, cue: Cue) {
        let Some(manager) = &mut self.manager else {
            return;
        };
        let Some(sound_data) = self.sounds.get(&cue) else {
            log::debug!("No sound rendered for cue {:?}", cue);
            return;
        };

        let volume = cue.default_volume() * self.master_volume;
        let settings = StaticSoundSettings::new().volume(Volume::Amplitude(volume));
        if let Err(e) = manager.play(sound_data.with_settings(settings)) {
            log::debug!("Failed to play cue {:?}: {:?}", cue, e);
        }
    }
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_manager_swallows_play() {
        let mut audio = AudioManager::disabled();
        assert!(!audio.is_enabled());
        audio.play(Cue::LevelUp);
        audio.set_master_volume(3.0);
        assert_eq!(audio.master_volume(), 1.0);
    }

    #[test]
    fn test_settings_disable_sound() {
        let settings = SoundSettings {
            enabled: false,
            volume: 0.25,
        };
        let audio = AudioManager::from_settings(&settings);
        assert!(!audio.is_enabled());
        assert_eq!(audio.master_volume(), 0.25);
    }
}
