//! Experience award resolution
//!
//! Converts a raw XP award into new points/level state, resolving any
//! number of level-ups in one call.

use crate::profile::UserProfile;
use super::curve::LevelCurve;

/// Result of applying one award to a profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advance {
    /// XP granted by the call
    pub amount: u64,
    /// Profile after the award
    pub profile: UserProfile,
    /// Thresholds crossed by this single award
    pub levels_gained: u32,
}

impl Advance {
    pub fn leveled_up(&self) -> bool {
        self.levels_gained > 0
    }
}

/// Apply `amount` XP to a copy of `profile`.
///
/// Postconditions: `points < xp_to_next_level`, `level` grows by exactly
/// `levels_gained`, badges are untouched. Iterates once per level gained.
pub fn award(profile: &UserProfile, amount: u64, curve: &LevelCurve) -> Advance {
    let mut next = profile.clone();
    next.points = next.points.saturating_add(amount);
    let levels_gained = resolve_level_ups(&mut next, curve);

    Advance {
        amount,
        profile: next,
        levels_gained,
    }
}

/// Consume thresholds while the profile holds enough points for them
pub(crate) fn resolve_level_ups(profile: &mut UserProfile, curve: &LevelCurve) -> u32 {
    let mut levels_gained: u32 = 0;
    while profile.points >= profile.xp_to_next_level {
        profile.points -= profile.xp_to_next_level;
        profile.level = profile.level.saturating_add(1);
        profile.xp_to_next_level = curve.next_threshold(profile.xp_to_next_level);
        levels_gained = levels_gained.saturating_add(1);
    }
    levels_gained
}
