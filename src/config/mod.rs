//! Configuration
//!
//! Progression tuning loaded from an optional RON file.

pub mod settings;
pub mod loader;

pub use settings::{ProgressionConfig, FeedbackTimings, SoundSettings};
pub use loader::{ConfigError, CONFIG_ENV, DEFAULT_CONFIG_FILE};
