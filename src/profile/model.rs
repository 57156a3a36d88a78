//! Persisted progression profile

use serde::{Deserialize, Serialize};

use crate::progression::{engine, LevelCurve, DEFAULT_BASE_THRESHOLD};

/// Per-user progression state
///
/// Serialized with the camelCase field names of the stored record
/// (`points`, `level`, `xpToNextLevel`, `badges`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// XP within the current level
    pub points: u64,
    /// Current level, starts at 1
    pub level: u32,
    /// XP needed to leave the current level
    pub xp_to_next_level: u64,
    /// Earned badge ids, reserved
    #[serde(default)]
    pub badges: Vec<String>,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            points: 0,
            level: 1,
            xp_to_next_level: DEFAULT_BASE_THRESHOLD,
            badges: Vec::new(),
        }
    }
}

impl UserProfile {
    /// Fresh profile starting on the given curve
    pub fn new(curve: &LevelCurve) -> Self {
        Self {
            xp_to_next_level: curve.base_threshold,
            ..Self::default()
        }
    }

    /// Add XP in place and return how many levels were gained
    pub fn add_xp(&mut self, amount: u64, curve: &LevelCurve) -> u32 {
        self.points = self.points.saturating_add(amount);
        engine::resolve_level_ups(self, curve)
    }

    /// Fill level bar, 0.0 - 100.0
    pub fn progress_percent(&self) -> f64 {
        if self.xp_to_next_level == 0 {
            return 0.0;
        }
        (self.points as f64 / self.xp_to_next_level as f64 * 100.0).clamp(0.0, 100.0)
    }

    /// XP still missing for the next level
    pub fn xp_remaining(&self) -> u64 {
        self.xp_to_next_level.saturating_sub(self.points)
    }

    /// Whether the profile satisfies the engine invariants
    pub fn is_consistent(&self) -> bool {
        self.level >= 1 && self.xp_to_next_level > 0 && self.points < self.xp_to_next_level
    }

    /// Repair a profile read from storage so the engine invariants hold.
    ///
    /// Level 0 becomes 1, a zero threshold becomes the curve base, and
    /// overflowing points are resolved into level-ups.
    pub fn normalized(mut self, curve: &LevelCurve) -> Self {
        if self.level == 0 {
            self.level = 1;
        }
        if self.xp_to_next_level == 0 {
            self.xp_to_next_level = curve.base_threshold.max(1);
        }
        let repaired = engine::resolve_level_ups(&mut self, curve);
        if repaired > 0 {
            log::warn!("Stored profile held surplus points, resolved {} level(s)", repaired);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let profile = UserProfile::default();
        assert_eq!(profile.points, 0);
        assert_eq!(profile.level, 1);
        assert_eq!(profile.xp_to_next_level, 500);
        assert!(profile.badges.is_empty());
        assert!(profile.is_consistent());
    }

    #[test]
    fn test_add_xp_in_place() {
        let curve = LevelCurve::default();
        let mut profile = UserProfile {
            points: 480,
            ..UserProfile::default()
        };
        assert_eq!(profile.add_xp(30, &curve), 1);
        assert_eq!(profile.points, 10);
        assert_eq!(profile.level, 2);
        assert_eq!(profile.xp_to_next_level, 650);
    }

    #[test]
    fn test_progress_percent() {
        let profile = UserProfile {
            points: 125,
            ..UserProfile::default()
        };
        assert!((profile.progress_percent() - 25.0).abs() < f64::EPSILON);
        assert_eq!(profile.xp_remaining(), 375);
    }

    #[test]
    fn test_serialized_field_names() {
        let json = serde_json::to_value(UserProfile::default()).unwrap();
        assert_eq!(json["xpToNextLevel"], 500);
        assert_eq!(json["points"], 0);
        assert_eq!(json["level"], 1);
        assert!(json["badges"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_reads_camel_case_record() {
        let json = r#"{"points":10,"level":2,"xpToNextLevel":650,"badges":["calm"]}"#;
        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.level, 2);
        assert_eq!(profile.badges, vec!["calm".to_string()]);
    }

    #[test]
    fn test_missing_badges_default_to_empty() {
        let json = r#"{"points":0,"level":1,"xpToNextLevel":500}"#;
        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert!(profile.badges.is_empty());
    }

    #[test]
    fn test_normalize_repairs_broken_profile() {
        let curve = LevelCurve::default();
        let broken = UserProfile {
            points: 700,
            level: 0,
            xp_to_next_level: 0,
            badges: Vec::new(),
        };
        let fixed = broken.normalized(&curve);
        assert!(fixed.is_consistent());
        assert_eq!(fixed.level, 2);
        assert_eq!(fixed.points, 200);
        assert_eq!(fixed.xp_to_next_level, 650);
    }
}
