//! Level thresholds
//!
//! The threshold curve deciding how much XP each level needs.

use serde::{Deserialize, Serialize};

/// XP needed to leave level 1
pub const DEFAULT_BASE_THRESHOLD: u64 = 500;

/// Threshold multiplier applied on every level-up
pub const DEFAULT_GROWTH_FACTOR: f64 = 1.3;

/// Flattest accepted curve; keeps the number of levels any `u64` award can
/// cross in the low thousands
pub const MIN_GROWTH_FACTOR: f64 = 1.01;

/// Geometric threshold curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelCurve {
    /// Threshold of level 1
    pub base_threshold: u64,
    /// Multiplier for the next threshold, must be > 1.0
    pub growth_factor: f64,
}

impl Default for LevelCurve {
    fn default() -> Self {
        Self {
            base_threshold: DEFAULT_BASE_THRESHOLD,
            growth_factor: DEFAULT_GROWTH_FACTOR,
        }
    }
}

impl LevelCurve {
    pub fn new(base_threshold: u64, growth_factor: f64) -> Self {
        Self {
            base_threshold,
            growth_factor,
        }
    }

    /// Whether the curve guarantees strictly growing, positive thresholds
    pub fn is_valid(&self) -> bool {
        self.base_threshold > 0 && self.growth_factor.is_finite() && self.growth_factor >= MIN_GROWTH_FACTOR
    }

    /// Threshold of the level following one whose threshold is `current`.
    ///
    /// `floor(current * growth_factor)`, but never less than `current + 1`
    /// so small thresholds keep climbing.
    pub fn next_threshold(&self, current: u64) -> u64 {
        // f64 -> u64 casts saturate
        let scaled = (current as f64 * self.growth_factor).floor() as u64;
        scaled.max(current.saturating_add(1))
    }

    /// Threshold that applies while sitting at `level`
    pub fn threshold_for_level(&self, level: u32) -> u64 {
        let mut threshold = self.base_threshold;
        for _ in 1..level.max(1) {
            threshold = self.next_threshold(threshold);
        }
        threshold
    }

    /// Total XP needed from a fresh profile to reach `level`
    pub fn total_xp_for_level(&self, level: u32) -> u64 {
        (1..level.max(1))
            .map(|l| self.threshold_for_level(l))
            .fold(0u64, |acc, t| acc.saturating_add(t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_curve() {
        let curve = LevelCurve::default();
        assert!(curve.is_valid());
        assert_eq!(curve.threshold_for_level(1), 500);
        assert_eq!(curve.threshold_for_level(2), 650);
        assert_eq!(curve.threshold_for_level(3), 845);
    }

    #[test]
    fn test_total_xp_for_level() {
        let curve = LevelCurve::default();
        assert_eq!(curve.total_xp_for_level(1), 0);
        assert_eq!(curve.total_xp_for_level(2), 500);
        assert_eq!(curve.total_xp_for_level(3), 1150);
    }

    #[test]
    fn test_small_threshold_still_grows() {
        let curve = LevelCurve::new(1, 1.3);
        // floor(1 * 1.3) == 1, bumped to 2
        assert_eq!(curve.next_threshold(1), 2);
        assert_eq!(curve.next_threshold(2), 3);
    }

    #[test]
    fn test_invalid_curves() {
        assert!(!LevelCurve::new(0, 1.3).is_valid());
        assert!(!LevelCurve::new(500, 1.0).is_valid());
        assert!(!LevelCurve::new(500, 1.000000000000001).is_valid());
        assert!(LevelCurve::new(500, MIN_GROWTH_FACTOR).is_valid());
        assert!(!LevelCurve::new(500, 0.5).is_valid());
        assert!(!LevelCurve::new(500, f64::NAN).is_valid());
        assert!(!LevelCurve::new(500, f64::INFINITY).is_valid());
    }

    #[test]
    fn test_next_threshold_saturates() {
        let curve = LevelCurve::default();
        assert_eq!(curve.next_threshold(u64::MAX), u64::MAX);
    }
}
