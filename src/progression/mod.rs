//! Progression systems

pub mod curve;
pub mod engine;
pub mod awards;

pub use curve::{LevelCurve, DEFAULT_BASE_THRESHOLD, DEFAULT_GROWTH_FACTOR, MIN_GROWTH_FACTOR};
pub use engine::{award, Advance};
pub use awards::{AwardSource, AwardTable};
