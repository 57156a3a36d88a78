//! RON config loader
//!
//! Loads `ProgressionConfig` from a RON file, with fallback to the
//! built-in defaults.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::progression::MIN_GROWTH_FACTOR;

use super::settings::ProgressionConfig;

/// Environment variable overriding the config file location
pub const CONFIG_ENV: &str = "LIVREMENTE_CONFIG";

/// Config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "livremente.ron";

/// Config loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
    #[error("Failed to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] ron::Error),
    #[error("Invalid setting: {0}")]
    Invalid(String),
}

impl ProgressionConfig {
    /// Load from `$LIVREMENTE_CONFIG` or `./livremente.ron`, using defaults
    /// when the file is missing or unusable. A missing file is created with
    /// the defaults so they can be edited.
    pub fn load() -> Self {
        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

        if !path.exists() {
            log::info!("No config at {:?}, using defaults", path);
            let config = Self::default();
            match config.write_starter(&path) {
                Ok(()) => log::info!("Wrote starter config to {:?}", path),
                Err(e) => log::warn!("{}", e),
            }
            return config;
        }

        match Self::load_from(&path) {
            Ok(config) => {
                log::info!("Config loaded from {:?}", path);
                config
            }
            Err(e) => {
                log::warn!("{}. Using defaults.", e);
                Self::default()
            }
        }
    }

    /// Load and validate a specific file
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron(&content).map_err(|e| match e {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }

    /// Parse and validate RON text
    pub fn from_ron(content: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(content).map_err(|source| ConfigError::Parse {
            path: PathBuf::new(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would break the engine invariants
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.curve.base_threshold == 0 {
            return Err(ConfigError::Invalid("curve.base_threshold must be positive".to_string()));
        }
        if !self.curve.is_valid() {
            return Err(ConfigError::Invalid(format!(
                "curve.growth_factor must be a finite number of at least {}, got {}",
                MIN_GROWTH_FACTOR, self.curve.growth_factor
            )));
        }
        if self.feedback.popup_ms == 0 || self.feedback.level_up_ms == 0 {
            return Err(ConfigError::Invalid("feedback windows must be positive".to_string()));
        }
        if !(0.0..=1.0).contains(&self.sound.volume) {
            return Err(ConfigError::Invalid(format!(
                "sound.volume must be between 0.0 and 1.0, got {}",
                self.sound.volume
            )));
        }
        Ok(())
    }

    /// RON text of this config
    pub fn to_ron(&self) -> Result<String, ron::Error> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
    }

    /// Write this config to `path`, creating parent directories
    pub fn write_starter(&self, path: &Path) -> Result<(), ConfigError> {
        let text = self.to_ron()?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(path, text).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = ProgressionConfig::from_ron("(curve: (growth_factor: 1.2))").unwrap();
        assert_eq!(config.curve.growth_factor, 1.2);
        assert_eq!(config.curve.base_threshold, 500);
        assert_eq!(config.awards.daily_consult, 200);
        assert_eq!(config.feedback.level_up_ms, 3000);
    }

    #[test]
    fn test_award_overrides() {
        let config = ProgressionConfig::from_ron("(awards: (habit_activated: 15, thought_record_filed: 50))").unwrap();
        assert_eq!(config.awards.habit_activated, 15);
        assert_eq!(config.awards.thought_record_filed, 50);
        assert_eq!(config.awards.exposure_validated, 75);
    }

    #[test]
    fn test_rejects_flat_curve() {
        let err = ProgressionConfig::from_ron("(curve: (growth_factor: 1.0))").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_zero_threshold() {
        let err = ProgressionConfig::from_ron("(curve: (base_threshold: 0))").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_malformed_ron() {
        let err = ProgressionConfig::from_ron("(curve: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_rejects_near_flat_curve() {
        let err = ProgressionConfig::from_ron("(curve: (growth_factor: 1.000000000000001))").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_loud_volume() {
        let err = ProgressionConfig::from_ron("(sound: (volume: 1.5))").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_sound_settings() {
        let config = ProgressionConfig::from_ron("(sound: (enabled: false))").unwrap();
        assert!(!config.sound.enabled);
        assert_eq!(config.sound.volume, 1.0);
    }

    #[test]
    fn test_starter_file_loads_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join(DEFAULT_CONFIG_FILE);

        ProgressionConfig::default().write_starter(&path).unwrap();
        let loaded = ProgressionConfig::load_from(&path).unwrap();
        assert_eq!(loaded, ProgressionConfig::default());
    }

    #[test]
    fn test_shipped_config_matches_defaults() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join(DEFAULT_CONFIG_FILE);
        let loaded = ProgressionConfig::load_from(&path).unwrap();
        assert_eq!(loaded, ProgressionConfig::default());
    }
}
